use serde::Serialize;
use serde_json::Value;
use trellis_storage::{Document, DocumentId, DocumentQuery, DocumentType, Meta, OrderBy};

use crate::error::RenderError;
use crate::handler::{DocumentHandler, RenderContext};
use crate::payload::RenderPayload;

/// Entry of the `variants` list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductVariant {
    pub id: DocumentId,
    pub title: String,
    pub slug: String,
    pub meta: Meta,
}

impl From<Document> for ProductVariant {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            slug: doc.slug,
            meta: doc.meta,
        }
    }
}

/// Entry of the `relatedProducts` list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelatedProduct {
    pub id: DocumentId,
    pub title: String,
    pub slug: String,
}

impl From<Document> for RelatedProduct {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            slug: doc.slug,
        }
    }
}

/// Product page: specifications from metadata, page children as variants,
/// published siblings as related products.
///
/// Children are not attached to the document view.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProductHandler;

impl ProductHandler {
    pub const NAME: &'static str = "ProductController";
    pub const COMPONENT: &'static str = "Documents/Product";

    fn specifications(document: &Document) -> Value {
        document
            .meta
            .get("specifications")
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    fn variants(
        ctx: &RenderContext<'_>,
        document: &Document,
    ) -> Result<Vec<ProductVariant>, RenderError> {
        let query = DocumentQuery::new()
            .for_site(document.site_id)
            .child_of(document.id)
            .published()
            .of_type(DocumentType::Page)
            .order_by(OrderBy::SORT_ORDER);
        Ok(ctx
            .storage()
            .query(&query)?
            .into_iter()
            .map(ProductVariant::from)
            .collect())
    }
}

impl DocumentHandler for ProductHandler {
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
        let specifications = Self::specifications(&document);
        let variants = Self::variants(ctx, &document)?;
        let related: Vec<RelatedProduct> = ctx
            .tree(document.site_id)
            .siblings(&document, ctx.config().related_products_limit)?
            .into_iter()
            .map(RelatedProduct::from)
            .collect();

        ctx.payload(self.component(), document, None)?
            .with_extra("specifications", specifications)?
            .with_extra("variants", variants)?
            .with_extra("relatedProducts", related)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::renderer::RenderConfig;
    use crate::testing::Content;

    fn meta(value: Value) -> Meta {
        match value {
            Value::Object(map) => map,
            _ => panic!("meta must be an object"),
        }
    }

    #[test]
    fn test_product_without_parent() {
        let content = Content::new();
        let product = content.create(
            content
                .doc("Widget", "widget")
                .controller("ProductController")
                .published(),
        );
        let config = RenderConfig::default();
        let ctx = RenderContext::new(content.storage.as_ref(), &config);

        let payload = ProductHandler.render(&ctx, product).unwrap();

        assert_eq!(payload.component, "Documents/Product");
        assert!(payload.document.children.is_none());
        assert_eq!(payload.extra("specifications").unwrap(), &json!([]));
        assert_eq!(payload.extra("variants").unwrap(), &json!([]));
        assert_eq!(payload.extra("relatedProducts").unwrap(), &json!([]));
    }

    #[test]
    fn test_specifications_from_meta() {
        let content = Content::new();
        let specs = json!([{"name": "Weight", "value": "2kg"}]);
        let product = content.create(
            content
                .doc("Widget", "widget")
                .meta(meta(json!({"specifications": specs, "color": "red"}))),
        );
        let config = RenderConfig::default();
        let ctx = RenderContext::new(content.storage.as_ref(), &config);

        let payload = ProductHandler.render(&ctx, product).unwrap();

        assert_eq!(payload.extra("specifications").unwrap(), &specs);
    }

    #[test]
    fn test_variants_are_published_page_children() {
        let content = Content::new();
        let product = content.create(content.doc("Widget", "widget"));
        let blue = content.create(
            content
                .doc("Blue", "blue")
                .parent(product.id)
                .meta(meta(json!({"sku": "W-BLU"})))
                .published(),
        );
        content.create(content.doc("Hidden", "hidden").parent(product.id));
        content.create(
            content
                .doc("Manuals", "manuals")
                .parent(product.id)
                .doc_type(DocumentType::Folder)
                .published(),
        );
        let config = RenderConfig::default();
        let ctx = RenderContext::new(content.storage.as_ref(), &config);

        let payload = ProductHandler.render(&ctx, product).unwrap();

        assert_eq!(
            payload.extra("variants").unwrap(),
            &json!([{
                "id": blue.id.0,
                "title": "Blue",
                "slug": "blue",
                "meta": {"sku": "W-BLU"},
            }])
        );
    }

    #[test]
    fn test_related_products_are_bounded_siblings() {
        let content = Content::new();
        let catalog = content.create(content.doc("Catalog", "catalog"));
        let product = content.create(
            content
                .doc("Widget", "widget")
                .parent(catalog.id)
                .published(),
        );
        for n in 1..=6 {
            content.create(
                content
                    .doc(&format!("Gadget {n}"), &format!("gadget-{n}"))
                    .parent(catalog.id)
                    .published(),
            );
        }
        content.create(content.doc("Draft", "draft").parent(catalog.id));
        let config = RenderConfig::default();
        let ctx = RenderContext::new(content.storage.as_ref(), &config);

        let payload = ProductHandler.render(&ctx, product.clone()).unwrap();
        let related = payload
            .extra("relatedProducts")
            .unwrap()
            .as_array()
            .unwrap();

        assert_eq!(related.len(), 4);
        let product_id = json!(product.id.0);
        assert!(related.iter().all(|entry| entry["id"] != product_id));
        assert!(related.iter().all(|entry| entry.get("meta").is_none()));
        assert_eq!(payload.breadcrumbs.len(), 2);
    }
}
