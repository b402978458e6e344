use chrono::{DateTime, Utc};
use serde::Serialize;
use trellis_storage::{Document, DocumentId, DocumentType, OrderBy};

use crate::error::RenderError;
use crate::handler::{DocumentHandler, RenderContext};
use crate::payload::RenderPayload;

/// Entry of the `relatedPosts` list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelatedPost {
    pub id: DocumentId,
    pub title: String,
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Document> for RelatedPost {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            slug: doc.slug,
            published_at: doc.published_at,
        }
    }
}

/// Chronological feed: children are posts, newest first.
///
/// Adds `relatedPosts`, the latest published pages of the same site.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlogHandler;

impl BlogHandler {
    pub const NAME: &'static str = "BlogController";
    pub const COMPONENT: &'static str = "Documents/Blog";
}

impl DocumentHandler for BlogHandler {
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
        let tree = ctx.tree(document.site_id);
        let posts = tree.find_published_children(&document, OrderBy::NEWEST)?;
        let related: Vec<RelatedPost> = tree
            .related_by_site_and_type(
                document.id,
                DocumentType::Page,
                ctx.config().related_posts_limit,
                OrderBy::NEWEST,
            )?
            .into_iter()
            .map(RelatedPost::from)
            .collect();

        ctx.payload(self.component(), document, Some(posts))?
            .with_extra("relatedPosts", related)
    }
}
