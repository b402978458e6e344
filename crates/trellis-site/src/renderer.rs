//! Request-level rendering entry point.
//!
//! [`Renderer`] ties the pieces together: it loads a live document of a site,
//! resolves its handler through the [`HandlerRegistry`] and returns the
//! handler's payload. It holds no per-request state and is `Send + Sync`.

use std::sync::Arc;

use trellis_storage::{Document, DocumentId, SiteId, Storage};

use crate::error::RenderError;
use crate::handler::{DocumentHandler, RenderContext};
use crate::payload::RenderPayload;
use crate::registry::HandlerRegistry;
use crate::tree::DocumentTree;

/// Limits for handler-specific related content lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum entries in a blog's `relatedPosts`.
    pub related_posts_limit: usize,
    /// Maximum entries in a product's `relatedProducts`.
    pub related_products_limit: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            related_posts_limit: 3,
            related_products_limit: 4,
        }
    }
}

/// Renders documents of any site.
pub struct Renderer {
    storage: Arc<dyn Storage>,
    registry: Arc<HandlerRegistry>,
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer.
    ///
    /// # Arguments
    ///
    /// * `storage` - Backend holding sites, users and documents
    /// * `registry` - Frozen handler registry
    /// * `config` - Related content limits
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        registry: Arc<HandlerRegistry>,
        config: RenderConfig,
    ) -> Self {
        Self {
            storage,
            registry,
            config,
        }
    }

    /// Render a document by id.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::NotFound` if the document is missing, soft-deleted
    /// or not part of `site_id`, otherwise whatever the handler reports.
    pub fn render(&self, site_id: SiteId, id: DocumentId) -> Result<RenderPayload, RenderError> {
        let document = self.tree(site_id).load(id)?;
        self.render_document(document)
    }

    /// Render a document by slug path (e.g., `"products/widget"`).
    ///
    /// # Errors
    ///
    /// Returns `RenderError::PathNotFound` if the path does not resolve.
    pub fn render_path(&self, site_id: SiteId, path: &str) -> Result<RenderPayload, RenderError> {
        let document = self.tree(site_id).find_by_path(path)?;
        self.render_document(document)
    }

    /// Render an already loaded document with its resolved handler.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler reports.
    pub fn render_document(&self, document: Document) -> Result<RenderPayload, RenderError> {
        let handler = self.resolve(&document);
        tracing::info!(
            document = %document.id,
            site = %document.site_id,
            handler = handler.name(),
            "Rendering document"
        );
        let ctx = RenderContext::new(self.storage.as_ref(), &self.config);
        handler.render(&ctx, document)
    }

    /// Handler the document would be rendered with.
    #[must_use]
    pub fn resolve(&self, document: &Document) -> &Arc<dyn DocumentHandler> {
        self.registry.resolve(document)
    }

    /// Tree access scoped to a site.
    #[must_use]
    pub fn tree(&self, site_id: SiteId) -> DocumentTree<'_> {
        DocumentTree::new(self.storage.as_ref(), site_id)
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}
