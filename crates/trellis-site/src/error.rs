//! Error types for rendering and handler registration.

use trellis_storage::{DocumentId, SiteId, StorageError};

/// Error returned when resolving or rendering a document fails.
///
/// Rendering is a read path: errors abort the request as-is and no partial
/// payload is produced.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Document id does not resolve to a live document of the site.
    #[error("Document not found: {0}")]
    NotFound(DocumentId),
    /// Slug path does not resolve to a live document of the site.
    #[error("Document path not found: {0}")]
    PathNotFound(String),
    /// The parent chain of a document loops back on itself.
    #[error("Cyclic ancestry: document {id} reaches ancestor {ancestor} twice")]
    CyclicAncestry {
        /// Document whose breadcrumbs were requested.
        id: DocumentId,
        /// Ancestor seen twice during the walk.
        ancestor: DocumentId,
    },
    /// A document reached through a site-scoped read belongs to another site.
    #[error("Document {document} belongs to site {actual}, expected site {expected}")]
    SiteMismatch {
        document: DocumentId,
        expected: SiteId,
        actual: SiteId,
    },
    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// A handler-specific field reuses a key of the base payload.
    #[error("Payload field '{0}' is reserved")]
    ReservedField(String),
    /// Handler-specific payload field could not be serialized.
    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

impl RenderError {
    /// True for errors the presentation layer should report as "not found".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::PathNotFound(_) => true,
            Self::Storage(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Configuration error raised while building a
/// [`HandlerRegistry`](crate::HandlerRegistry).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Handler names must be non-empty and free of whitespace.
    #[error("Invalid handler name '{0}'")]
    InvalidName(String),
    /// The handler does not satisfy the handler contract.
    #[error("Handler '{name}' does not satisfy the handler contract: {reason}")]
    InvalidHandler { name: String, reason: String },
    /// An alias points at a name that is not registered.
    #[error("Cannot bind '{name}' to unregistered handler '{target}'")]
    UnknownHandler { name: String, target: String },
}

#[cfg(test)]
mod tests {
    use trellis_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(RenderError::NotFound(DocumentId(1)).is_not_found());
        assert!(RenderError::PathNotFound("a/b".to_owned()).is_not_found());
        assert!(
            RenderError::Storage(StorageError::not_found("site", SiteId(1))).is_not_found()
        );
        assert!(
            !RenderError::Storage(StorageError::new(StorageErrorKind::Unavailable)).is_not_found()
        );
        assert!(
            !RenderError::CyclicAncestry {
                id: DocumentId(1),
                ancestor: DocumentId(2),
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::UnknownHandler {
            name: "CustomController".to_owned(),
            target: "MissingController".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot bind 'CustomController' to unregistered handler 'MissingController'"
        );
    }
}
