//! Site-scoped access to the document hierarchy.
//!
//! Documents are flat rows with parent references; [`DocumentTree`] resolves
//! those references through a [`Storage`] backend.
//!
//! # Site Scoping
//!
//! A tree is bound to a single site. Every query it issues carries that site
//! id, and documents reached through parent links are checked against it, so
//! content never leaks across sites.
//!
//! # Breadcrumbs
//!
//! Breadcrumbs are built in O(d) storage reads where d is the document depth.
//! The walk tracks visited ids and fails on a repeated one instead of looping.

use std::collections::HashSet;

use serde::Serialize;
use trellis_storage::{Document, DocumentId, DocumentQuery, DocumentType, OrderBy, SiteId, Storage};

use crate::error::RenderError;

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub id: DocumentId,
    pub title: String,
    pub slug: String,
}

impl From<&Document> for BreadcrumbItem {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title.clone(),
            slug: doc.slug.clone(),
        }
    }
}

/// Read access to one site's document tree.
#[derive(Clone, Copy)]
pub struct DocumentTree<'a> {
    storage: &'a dyn Storage,
    site_id: SiteId,
}

impl<'a> DocumentTree<'a> {
    /// Bind a tree to a site.
    #[must_use]
    pub fn new(storage: &'a dyn Storage, site_id: SiteId) -> Self {
        Self { storage, site_id }
    }

    /// Load a live document of this site.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::NotFound` if the document is missing, soft-deleted
    /// or belongs to another site.
    pub fn load(&self, id: DocumentId) -> Result<Document, RenderError> {
        match self.storage.document(id) {
            Ok(doc) if doc.site_id == self.site_id => Ok(doc),
            Ok(_) => Err(RenderError::NotFound(id)),
            Err(e) if e.is_not_found() => Err(RenderError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a slash-separated slug path from the root level down.
    ///
    /// # Arguments
    ///
    /// * `path` - Slug path (e.g., "about", "about/team"); leading and trailing
    ///   slashes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::PathNotFound` if any segment is missing.
    pub fn find_by_path(&self, path: &str) -> Result<Document, RenderError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
        if segments.peek().is_none() {
            return Err(RenderError::PathNotFound(path.to_owned()));
        }

        let mut current: Option<Document> = None;
        for slug in segments {
            let parent_id = current.as_ref().map(|doc| doc.id);
            current = Some(
                self.storage
                    .find_by_slug(self.site_id, parent_id, slug)?
                    .ok_or_else(|| RenderError::PathNotFound(path.to_owned()))?,
            );
        }

        current.ok_or_else(|| RenderError::PathNotFound(path.to_owned()))
    }

    /// Get the published direct children of a document.
    ///
    /// Returns an empty list (not an error) when nothing matches.
    pub fn find_published_children(
        &self,
        document: &Document,
        order: OrderBy,
    ) -> Result<Vec<Document>, RenderError> {
        self.ensure_in_site(document)?;
        let query = self
            .scoped()
            .child_of(document.id)
            .published()
            .order_by(order);
        Ok(self.storage.query(&query)?)
    }

    /// Get all live direct children of a document, drafts included.
    pub fn children(&self, document: &Document) -> Result<Vec<Document>, RenderError> {
        self.ensure_in_site(document)?;
        let query = self
            .scoped()
            .child_of(document.id)
            .order_by(OrderBy::SORT_ORDER);
        Ok(self.storage.query(&query)?)
    }

    /// Get all live root-level documents, drafts included.
    pub fn roots(&self) -> Result<Vec<Document>, RenderError> {
        let query = self.scoped().root_level().order_by(OrderBy::SORT_ORDER);
        Ok(self.storage.query(&query)?)
    }

    /// Build breadcrumbs from the root ancestor down to the document itself.
    ///
    /// A soft-deleted ancestor is invisible to default lookups and ends the
    /// walk, so the trail then starts at its child.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::CyclicAncestry` if the parent chain loops and
    /// `RenderError::SiteMismatch` if an ancestor belongs to another site.
    pub fn build_breadcrumbs(
        &self,
        document: &Document,
    ) -> Result<Vec<BreadcrumbItem>, RenderError> {
        self.ensure_in_site(document)?;

        let mut trail = vec![BreadcrumbItem::from(document)];
        let mut seen = HashSet::from([document.id]);
        let mut next = document.parent_id;

        while let Some(parent_id) = next {
            if !seen.insert(parent_id) {
                tracing::warn!(
                    document = %document.id,
                    ancestor = %parent_id,
                    "Cyclic document ancestry"
                );
                return Err(RenderError::CyclicAncestry {
                    id: document.id,
                    ancestor: parent_id,
                });
            }

            let parent = match self.storage.document(parent_id) {
                Ok(parent) => parent,
                Err(e) if e.is_not_found() => break,
                Err(e) => return Err(e.into()),
            };
            self.ensure_in_site(&parent)?;

            next = parent.parent_id;
            trail.push(BreadcrumbItem::from(&parent));
        }

        trail.reverse();
        Ok(trail)
    }

    /// Get published documents of a type for "related content" lists.
    ///
    /// Always scoped to this site and never includes `exclude_id`.
    pub fn related_by_site_and_type(
        &self,
        exclude_id: DocumentId,
        doc_type: DocumentType,
        limit: usize,
        order: OrderBy,
    ) -> Result<Vec<Document>, RenderError> {
        let query = self
            .scoped()
            .published()
            .of_type(doc_type)
            .excluding(exclude_id)
            .order_by(order)
            .limit(limit);
        Ok(self.storage.query(&query)?)
    }

    /// Get published documents sharing the document's parent, excluding itself.
    ///
    /// Root-level documents have no siblings here.
    pub fn siblings(
        &self,
        document: &Document,
        limit: usize,
    ) -> Result<Vec<Document>, RenderError> {
        self.ensure_in_site(document)?;
        let Some(parent_id) = document.parent_id else {
            return Ok(Vec::new());
        };
        let query = self
            .scoped()
            .child_of(parent_id)
            .published()
            .excluding(document.id)
            .limit(limit);
        Ok(self.storage.query(&query)?)
    }

    fn scoped(&self) -> DocumentQuery {
        DocumentQuery::new().for_site(self.site_id)
    }

    fn ensure_in_site(&self, document: &Document) -> Result<(), RenderError> {
        if document.site_id == self.site_id {
            Ok(())
        } else {
            tracing::warn!(
                document = %document.id,
                expected = %self.site_id,
                actual = %document.site_id,
                "Document reached outside its site"
            );
            Err(RenderError::SiteMismatch {
                document: document.id,
                expected: self.site_id,
                actual: document.site_id,
            })
        }
    }
}
