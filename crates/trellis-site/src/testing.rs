//! Shared fixtures for unit tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use trellis_storage::{
    Document, MemoryStorage, NewDocument, NewSite, NewUser, SiteId, Storage, UserId,
};

/// Two sites and one author over a fresh [`MemoryStorage`].
pub(crate) struct Content {
    pub(crate) storage: Arc<MemoryStorage>,
    pub(crate) site: SiteId,
    pub(crate) other_site: SiteId,
    pub(crate) author: UserId,
}

impl Content {
    pub(crate) fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let site = storage
            .create_site(NewSite::new("Main Site", "main.example.com"))
            .unwrap()
            .id;
        let other_site = storage
            .create_site(NewSite::new("Spanish Site", "es.example.com").locale("es"))
            .unwrap()
            .id;
        let author = storage
            .create_user(NewUser::new("Ada Lovelace", "ada@example.com"))
            .unwrap()
            .id;
        Self {
            storage,
            site,
            other_site,
            author,
        }
    }

    /// Draft document template in the main site.
    pub(crate) fn doc(&self, title: &str, slug: &str) -> NewDocument {
        NewDocument::new(self.site, self.author, title, slug)
    }

    /// Draft document template in the other site.
    pub(crate) fn foreign_doc(&self, title: &str, slug: &str) -> NewDocument {
        NewDocument::new(self.other_site, self.author, title, slug)
    }

    pub(crate) fn create(&self, doc: NewDocument) -> Document {
        self.storage.create_document(doc).unwrap()
    }
}

/// Midnight UTC on the given day of January 2025.
pub(crate) fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, n, 0, 0, 0).unwrap()
}
