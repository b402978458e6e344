//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting site, user and
//! document persistence, along with [`StorageError`] for unified error
//! handling across backends.
//!
//! # Soft Deletion
//!
//! Default lookups ([`Storage::document`], [`Storage::find_by_slug`] and
//! queries without `include_deleted`) never return soft-deleted documents.
//! [`Storage::document_with_deleted`] is the explicit escape hatch.

use crate::model::{
    Document, DocumentId, DocumentPatch, NewDocument, NewSite, NewUser, Site, SiteId, User, UserId,
};
use crate::query::DocumentQuery;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Row does not exist (or is soft-deleted for default lookups).
    NotFound,
    /// Unique `(site, parent, slug)` constraint violated.
    Conflict,
    /// Reference to a missing, foreign-site or cyclic row.
    InvalidReference,
    /// Input rejected before reaching the store (e.g., empty slug).
    InvalidInput,
    /// Backend is unavailable (e.g., poisoned lock, lost connection).
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Entity name (e.g., "document", "site").
    pub entity: Option<&'static str>,
    /// Identifier of the entity involved (if applicable).
    pub id: Option<String>,
    /// Human-readable detail.
    pub detail: Option<String>,
    /// Backend identifier (e.g., "Memory").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            entity: None,
            id: None,
            detail: None,
            backend: None,
            source: None,
        }
    }

    /// Attach entity context.
    #[must_use]
    pub fn with_entity(mut self, entity: &'static str, id: impl Into<u64>) -> Self {
        self.entity = Some(entity);
        self.id = Some(id.into().to_string());
        self
    }

    /// Attach a detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error for an entity.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<u64>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_entity(entity, id)
    }

    /// Create a uniqueness conflict error.
    #[must_use]
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::Conflict).with_detail(detail)
    }

    /// Create an invalid reference error.
    #[must_use]
    pub fn invalid_reference(detail: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::InvalidReference).with_detail(detail)
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::InvalidInput).with_detail(detail)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.kind == StorageErrorKind::Conflict
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: detail: source (document: 5)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::Conflict => "Conflict",
            StorageErrorKind::InvalidReference => "Invalid reference",
            StorageErrorKind::InvalidInput => "Invalid input",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let (Some(entity), Some(id)) = (self.entity, &self.id) {
            write!(f, " ({entity}: {id})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Persistence abstraction for sites, users and documents.
///
/// Implementations enforce the content model's constraints:
/// - `(site, parent, slug)` is unique among live documents
/// - a parent belongs to the same site as its child and is live
/// - a document is never its own ancestor
/// - referenced sites and authors exist
///
/// Violations surface as [`StorageError`]s with
/// [`StorageErrorKind::Conflict`] or [`StorageErrorKind::InvalidReference`].
pub trait Storage: Send + Sync {
    /// Get a site by id.
    fn site(&self, id: SiteId) -> Result<Site, StorageError>;

    /// List all sites ordered by id.
    fn sites(&self) -> Result<Vec<Site>, StorageError>;

    /// Get a user by id.
    fn user(&self, id: UserId) -> Result<User, StorageError>;

    /// Get a live (non-deleted) document by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] for missing and soft-deleted rows.
    fn document(&self, id: DocumentId) -> Result<Document, StorageError>;

    /// Get a document by id including soft-deleted rows.
    fn document_with_deleted(&self, id: DocumentId) -> Result<Document, StorageError>;

    /// Find a live document by its slug under a parent (`None` for root level).
    fn find_by_slug(
        &self,
        site_id: SiteId,
        parent_id: Option<DocumentId>,
        slug: &str,
    ) -> Result<Option<Document>, StorageError>;

    /// List documents matching a query.
    fn query(&self, query: &DocumentQuery) -> Result<Vec<Document>, StorageError>;

    /// Create a site.
    fn create_site(&self, site: NewSite) -> Result<Site, StorageError>;

    /// Create a user.
    fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    /// Create a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Conflict`] if the slug is taken under the
    /// same site and parent, [`StorageErrorKind::InvalidReference`] if the
    /// site, author or parent is missing or the parent belongs to another site.
    fn create_document(&self, document: NewDocument) -> Result<Document, StorageError>;

    /// Apply a partial update to a live document.
    fn update_document(
        &self,
        id: DocumentId,
        patch: DocumentPatch,
    ) -> Result<Document, StorageError>;

    /// Soft-delete a live document, releasing its slug.
    fn soft_delete(&self, id: DocumentId) -> Result<Document, StorageError>;

    /// Clear the deletion marker of a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Conflict`] if its slug was taken meanwhile.
    fn restore(&self, id: DocumentId) -> Result<Document, StorageError>;

    /// Delete a site and all of its documents.
    fn delete_site(&self, id: SiteId) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.entity.is_none());
        assert!(err.id.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_not_found() {
        let err = StorageError::not_found("document", DocumentId(7));

        assert!(err.is_not_found());
        assert_eq!(err.entity, Some("document"));
        assert_eq!(err.id.as_deref(), Some("7"));
    }

    #[test]
    fn test_storage_error_with_source() {
        let io_err = std::io::Error::other("disk gone");
        let err = StorageError::new(StorageErrorKind::Unavailable).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_storage_error_display_full() {
        let err = StorageError::conflict("slug 'about' already exists")
            .with_backend("Memory")
            .with_entity("document", DocumentId(3));

        assert_eq!(
            err.to_string(),
            "[Memory] Conflict: slug 'about' already exists (document: 3)"
        );
    }

    #[test]
    fn test_storage_error_kinds_distinct() {
        assert!(StorageError::conflict("x").is_conflict());
        assert!(!StorageError::invalid_reference("x").is_conflict());
        assert_eq!(
            StorageError::invalid_input("x").kind,
            StorageErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        static_assertions::assert_impl_all!(StorageError: Send, Sync);
    }
}
