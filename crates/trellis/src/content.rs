//! YAML content file loading.
//!
//! A content file declares users and sites; each site carries its document
//! tree as nested lists:
//!
//! ```yaml
//! users:
//!   - name: Ada Lovelace
//!     email: ada@example.com
//! sites:
//!   - name: Main Site
//!     domain: main.example.com
//!     documents:
//!       - title: Blog
//!         slug: blog
//!         author: ada@example.com
//!         controller: BlogController
//!         published: true
//!         children:
//!           - title: Hello
//!             slug: hello
//!             author: ada@example.com
//!             published_at: 2025-01-10T09:00:00Z
//! ```
//!
//! Rows are inserted through [`Storage`], so the content file is subject to
//! the same slug uniqueness and parent checks as any other writer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use trellis_storage::{
    DocumentId, DocumentType, MemoryStorage, Meta, NewDocument, NewSite, NewUser, SiteId, Storage,
    StorageError, UserId,
};

/// Content file loading error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ContentError {
    #[error("Cannot read content file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid content file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Document '{slug}' references unknown author '{email}'")]
    UnknownAuthor { slug: String, email: String },

    #[error("{0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentFile {
    users: Vec<NewUser>,
    sites: Vec<SiteEntry>,
}

#[derive(Debug, Deserialize)]
struct SiteEntry {
    #[serde(flatten)]
    site: NewSite,
    #[serde(default)]
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    title: String,
    slug: String,
    /// Author email.
    author: String,
    #[serde(rename = "type", default)]
    doc_type: DocumentType,
    controller: Option<String>,
    key: Option<String>,
    content: Option<String>,
    #[serde(default)]
    meta: Meta,
    /// Defaults to the position among siblings.
    sort_order: Option<i32>,
    /// Defaults to true when `published_at` is set.
    published: Option<bool>,
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    children: Vec<DocumentEntry>,
}

impl DocumentEntry {
    fn to_new(&self, site_id: SiteId, author_id: UserId, position: usize) -> NewDocument {
        let mut doc = NewDocument::new(site_id, author_id, &self.title, &self.slug)
            .doc_type(self.doc_type)
            .meta(self.meta.clone())
            .sort_order(
                self.sort_order
                    .unwrap_or_else(|| i32::try_from(position).unwrap_or(i32::MAX)),
            );
        doc.controller.clone_from(&self.controller);
        doc.key.clone_from(&self.key);
        doc.content.clone_from(&self.content);
        doc.published_at = self.published_at;
        doc.published = self.published.unwrap_or(self.published_at.is_some());
        doc
    }
}

/// Load a content file into a fresh [`MemoryStorage`].
pub(crate) fn load_content(path: &Path) -> Result<MemoryStorage, ContentError> {
    let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let storage = parse_content(&text)?;
    tracing::info!(path = %path.display(), "Loaded content file");
    Ok(storage)
}

/// Parse content YAML into a fresh [`MemoryStorage`].
pub(crate) fn parse_content(text: &str) -> Result<MemoryStorage, ContentError> {
    let file: ContentFile = serde_yaml::from_str(text)?;
    let storage = MemoryStorage::new();

    let mut authors = HashMap::new();
    for user in file.users {
        let user = storage.create_user(user)?;
        authors.insert(user.email, user.id);
    }

    for entry in file.sites {
        let site = storage.create_site(entry.site)?;
        let mut loader = Loader {
            storage: &storage,
            authors: &authors,
            site_id: site.id,
            documents: 0,
        };
        loader.insert_level(&entry.documents, None)?;
        tracing::debug!(site = %site.id, documents = loader.documents, "Loaded site");
    }

    Ok(storage)
}

struct Loader<'a> {
    storage: &'a MemoryStorage,
    authors: &'a HashMap<String, UserId>,
    site_id: SiteId,
    documents: usize,
}

impl Loader<'_> {
    fn insert_level(
        &mut self,
        entries: &[DocumentEntry],
        parent: Option<DocumentId>,
    ) -> Result<(), ContentError> {
        for (position, entry) in entries.iter().enumerate() {
            let author_id = *self.authors.get(&entry.author).ok_or_else(|| {
                ContentError::UnknownAuthor {
                    slug: entry.slug.clone(),
                    email: entry.author.clone(),
                }
            })?;

            let mut new = entry.to_new(self.site_id, author_id, position);
            new.parent_id = parent;
            let doc = self.storage.create_document(new)?;
            self.documents += 1;

            self.insert_level(&entry.children, Some(doc.id))?;
        }
        Ok(())
    }
}
