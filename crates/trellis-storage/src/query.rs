//! Document query description.
//!
//! A [`DocumentQuery`] is a backend-neutral filter + ordering + limit
//! description. Backends either translate it (SQL) or evaluate it directly
//! with [`DocumentQuery::matches`] and [`DocumentQuery::compare`].

use std::cmp::Ordering;

use crate::model::{Document, DocumentId, DocumentType, SiteId};

/// Parent filter for a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParentFilter {
    /// Any parent, including none.
    #[default]
    Any,
    /// Root-level documents only.
    Root,
    /// Direct children of the given document.
    ChildOf(DocumentId),
}

/// Sortable document column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Column {
    #[default]
    Id,
    SortOrder,
    PublishedAt,
    Title,
    CreatedAt,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Ordering clause. Ties are always broken by ascending id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderBy {
    pub column: Column,
    pub direction: Direction,
}

impl OrderBy {
    /// Ascending `sort_order`, the natural order of a navigation tree.
    pub const SORT_ORDER: Self = Self::asc(Column::SortOrder);
    /// Newest publication first, the order of chronological feeds.
    pub const NEWEST: Self = Self::desc(Column::PublishedAt);

    #[must_use]
    pub const fn asc(column: Column) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub const fn desc(column: Column) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// Filter, ordering and limit for listing documents.
///
/// Soft-deleted documents are excluded unless [`with_deleted`](Self::with_deleted)
/// is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    pub site_id: Option<SiteId>,
    pub parent: ParentFilter,
    pub published: Option<bool>,
    pub doc_type: Option<DocumentType>,
    pub exclude_id: Option<DocumentId>,
    pub include_deleted: bool,
    pub order: OrderBy,
    pub limit: Option<usize>,
}

impl DocumentQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_site(mut self, site_id: SiteId) -> Self {
        self.site_id = Some(site_id);
        self
    }

    #[must_use]
    pub fn root_level(mut self) -> Self {
        self.parent = ParentFilter::Root;
        self
    }

    #[must_use]
    pub fn child_of(mut self, parent_id: DocumentId) -> Self {
        self.parent = ParentFilter::ChildOf(parent_id);
        self
    }

    #[must_use]
    pub fn published(mut self) -> Self {
        self.published = Some(true);
        self
    }

    #[must_use]
    pub fn of_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    #[must_use]
    pub fn excluding(mut self, id: DocumentId) -> Self {
        self.exclude_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a document passes every filter of this query.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        if !self.include_deleted && doc.is_deleted() {
            return false;
        }
        if self.site_id.is_some_and(|site| site != doc.site_id) {
            return false;
        }
        let parent_ok = match self.parent {
            ParentFilter::Any => true,
            ParentFilter::Root => doc.parent_id.is_none(),
            ParentFilter::ChildOf(parent) => doc.parent_id == Some(parent),
        };
        if !parent_ok {
            return false;
        }
        if self.published.is_some_and(|p| p != doc.published) {
            return false;
        }
        if self.doc_type.is_some_and(|t| t != doc.doc_type) {
            return false;
        }
        self.exclude_id != Some(doc.id)
    }

    /// Compare two documents according to this query's ordering.
    ///
    /// Missing `published_at` values sort first ascending and last
    /// descending, like NULLs in SQL.
    #[must_use]
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let primary = match self.order.column {
            Column::Id => a.id.cmp(&b.id),
            Column::SortOrder => a.sort_order.cmp(&b.sort_order),
            Column::PublishedAt => a.published_at.cmp(&b.published_at),
            Column::Title => a.title.cmp(&b.title),
            Column::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let primary = match self.order.direction {
            Direction::Asc => primary,
            Direction::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}
