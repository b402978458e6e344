//! Content model: sites, users and documents.
//!
//! Rows reference each other through typed identifiers rather than embedded
//! objects. Relations (site, author, parent, children) are resolved through
//! a [`Storage`](crate::Storage) backend.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open-ended key/value metadata attached to a document.
pub type Meta = serde_json::Map<String, serde_json::Value>;

macro_rules! entity_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

entity_id!(
    /// Site identifier.
    SiteId
);
entity_id!(
    /// User identifier.
    UserId
);
entity_id!(
    /// Document identifier.
    DocumentId
);

/// Tenant boundary partitioning all content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub domain: String,
    pub locale: String,
    pub is_active: bool,
}

/// Input for creating a [`Site`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewSite {
    pub name: String,
    pub domain: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewSite {
    /// Active site with the default `en` locale.
    #[must_use]
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            locale: default_locale(),
            is_active: true,
        }
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

fn default_locale() -> String {
    "en".to_owned()
}

fn default_true() -> bool {
    true
}

/// Document author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Input for creating a [`User`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Semantic document type tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Page,
    Folder,
    Link,
}

impl DocumentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Folder => "folder",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site-scoped content node.
///
/// `controller` names the handler that renders this document. It is a
/// lookup key into the handler registry, not a foreign key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub site_id: SiteId,
    pub parent_id: Option<DocumentId>,
    pub author_id: UserId,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub controller: Option<String>,
    pub key: Option<String>,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub meta: Meta,
    pub sort_order: i32,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Document {
    /// True if the document carries a soft-deletion marker.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// True if the document sits at the root level of its site.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Renderer name, with blank values treated as absent.
    #[must_use]
    pub fn controller_name(&self) -> Option<&str> {
        self.controller
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Input for creating a [`Document`].
///
/// Defaults follow the storage schema: type `page`, sort order 0,
/// unpublished, no parent, no controller.
#[derive(Clone, Debug, PartialEq)]
pub struct NewDocument {
    pub site_id: SiteId,
    pub parent_id: Option<DocumentId>,
    pub author_id: UserId,
    pub doc_type: DocumentType,
    pub controller: Option<String>,
    pub key: Option<String>,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub meta: Meta,
    pub sort_order: i32,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewDocument {
    #[must_use]
    pub fn new(
        site_id: SiteId,
        author_id: UserId,
        title: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            site_id,
            parent_id: None,
            author_id,
            doc_type: DocumentType::default(),
            controller: None,
            key: None,
            title: title.into(),
            slug: slug.into(),
            content: None,
            meta: Meta::new(),
            sort_order: 0,
            published: false,
            published_at: None,
        }
    }

    #[must_use]
    pub fn parent(mut self, parent_id: DocumentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    #[must_use]
    pub fn doc_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = doc_type;
        self
    }

    #[must_use]
    pub fn controller(mut self, name: impl Into<String>) -> Self {
        self.controller = Some(name.into());
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Mark as published at the given time.
    #[must_use]
    pub fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.published = true;
        self.published_at = Some(at);
        self
    }

    /// Mark as published without a publication timestamp.
    #[must_use]
    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }
}

/// Partial update of a [`Document`]. `None` leaves a field unchanged.
///
/// Nullable columns use a nested `Option`: `Some(None)` clears the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentPatch {
    pub parent_id: Option<Option<DocumentId>>,
    pub doc_type: Option<DocumentType>,
    pub controller: Option<Option<String>>,
    pub key: Option<Option<String>>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<Option<String>>,
    pub meta: Option<Meta>,
    pub sort_order: Option<i32>,
    pub published: Option<bool>,
    pub published_at: Option<Option<DateTime<Utc>>>,
}
