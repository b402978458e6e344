//! Document handler contract.
//!
//! A handler turns one resolved [`Document`] into a [`RenderPayload`]. All
//! handlers share the base payload (document view plus breadcrumbs) built by
//! [`RenderContext::payload`] and only add their own associations and extra
//! fields on top.

use trellis_storage::{Document, SiteId, Storage};

use crate::error::RenderError;
use crate::payload::{DocumentView, RenderPayload};
use crate::renderer::RenderConfig;
use crate::tree::DocumentTree;

/// Renders one kind of document.
///
/// Implementations must be stateless with respect to a single render: the
/// same handler instance is shared by every request resolving to it.
pub trait DocumentHandler: Send + Sync {
    /// Registry name this handler is known under (e.g., `"BlogController"`).
    fn name(&self) -> &str;

    /// Presentation component the payload is meant for (e.g., `"Documents/Blog"`).
    fn component(&self) -> &str;

    /// Assemble the payload for a live document.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if any association fails to load. No partial
    /// payload is returned.
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        document: Document,
    ) -> Result<RenderPayload, RenderError>;
}

/// Collaborators available to a handler during one render.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    storage: &'a dyn Storage,
    config: &'a RenderConfig,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(storage: &'a dyn Storage, config: &'a RenderConfig) -> Self {
        Self { storage, config }
    }

    #[must_use]
    pub fn storage(&self) -> &'a dyn Storage {
        self.storage
    }

    #[must_use]
    pub fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Tree scoped to the given site.
    #[must_use]
    pub fn tree(&self, site_id: SiteId) -> DocumentTree<'a> {
        DocumentTree::new(self.storage, site_id)
    }

    /// Load the document's site and author.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Storage` if either row is missing.
    pub fn view(
        &self,
        document: Document,
        children: Option<Vec<Document>>,
    ) -> Result<DocumentView, RenderError> {
        let site = self.storage.site(document.site_id)?;
        let author = self.storage.user(document.author_id)?;
        Ok(DocumentView {
            document,
            site,
            author,
            children,
        })
    }

    /// Build the base payload: document view plus breadcrumbs.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if associations fail to load or the breadcrumb
    /// walk fails.
    pub fn payload(
        &self,
        component: &str,
        document: Document,
        children: Option<Vec<Document>>,
    ) -> Result<RenderPayload, RenderError> {
        let breadcrumbs = self.tree(document.site_id).build_breadcrumbs(&document)?;
        let view = self.view(document, children)?;
        Ok(RenderPayload::new(component, view, breadcrumbs))
    }
}
