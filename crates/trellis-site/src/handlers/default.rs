use trellis_storage::{Document, OrderBy};

use crate::error::RenderError;
use crate::handler::{DocumentHandler, RenderContext};
use crate::payload::RenderPayload;

/// Generic handler: published children in navigation order.
///
/// Also serves every document whose controller name is missing or unknown.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHandler;

impl DefaultHandler {
    pub const NAME: &'static str = "DefaultController";
    pub const COMPONENT: &'static str = "Documents/Default";
}

impl DocumentHandler for DefaultHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn component(&self) -> &str {
        Self::COMPONENT
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        document: Document,
    ) -> Result<RenderPayload, RenderError> {
        let children = ctx
            .tree(document.site_id)
            .find_published_children(&document, OrderBy::SORT_ORDER)?;
        ctx.payload(self.component(), document, Some(children))
    }
}
