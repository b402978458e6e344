//! Render payload handed to the presentation layer.

use serde::Serialize;
use serde_json::{Map, Value};
use trellis_storage::{Document, Site, User};

use crate::error::RenderError;
use crate::tree::BreadcrumbItem;

/// Document together with its eagerly loaded associations.
///
/// Serializes as the document's own fields plus `site`, `author` and, when
/// loaded, `children`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    pub site: Site,
    pub author: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Document>>,
}

/// Top-level keys of the base payload. Handler fields may not reuse them.
pub const RESERVED_FIELDS: [&str; 3] = ["component", "document", "breadcrumbs"];

/// Result of rendering one document.
///
/// `extra` holds handler-specific fields (camelCase keys) and is flattened
/// next to `document` and `breadcrumbs` when serialized.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderPayload {
    pub component: String,
    pub document: DocumentView,
    pub breadcrumbs: Vec<BreadcrumbItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RenderPayload {
    #[must_use]
    pub fn new(
        component: impl Into<String>,
        document: DocumentView,
        breadcrumbs: Vec<BreadcrumbItem>,
    ) -> Self {
        Self {
            component: component.into(),
            document,
            breadcrumbs,
            extra: Map::new(),
        }
    }

    /// Attach a handler-specific field.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ReservedField` if `key` is one of
    /// [`RESERVED_FIELDS`], or `RenderError::Payload` if the value cannot be
    /// serialized.
    pub fn with_extra(mut self, key: &str, value: impl Serialize) -> Result<Self, RenderError> {
        if RESERVED_FIELDS.contains(&key) {
            return Err(RenderError::ReservedField(key.to_owned()));
        }
        let value = serde_json::to_value(value)?;
        self.extra.insert(key.to_owned(), value);
        Ok(self)
    }

    /// Get a handler-specific field.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Id of the rendered document.
    #[must_use]
    pub fn document_id(&self) -> trellis_storage::DocumentId {
        self.document.document.id
    }
}
