//! In-memory storage backend.
//!
//! Documents live in a flat arena (`Vec<Document>`) with parent/child
//! relations expressed as [`DocumentId`] references. Side indexes provide:
//! - O(1) id lookups via `index`
//! - O(1) slug uniqueness checks via `slugs` (live documents only)

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::model::{
    Document, DocumentId, DocumentPatch, NewDocument, NewSite, NewUser, Site, SiteId, User, UserId,
};
use crate::query::DocumentQuery;
use crate::storage::{Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Memory";

/// Unique key for live documents: `(site, parent, slug)`.
type SlugKey = (SiteId, Option<DocumentId>, String);

#[derive(Debug, Default)]
struct Tables {
    sites: BTreeMap<SiteId, Site>,
    users: BTreeMap<UserId, User>,
    documents: Vec<Document>,
    index: HashMap<DocumentId, usize>,
    slugs: HashMap<SlugKey, DocumentId>,
    last_site_id: u64,
    last_user_id: u64,
    last_document_id: u64,
}

fn slug_key(doc: &Document) -> SlugKey {
    (doc.site_id, doc.parent_id, doc.slug.clone())
}

impl Tables {
    fn get(&self, id: DocumentId) -> Option<&Document> {
        self.index.get(&id).map(|&i| &self.documents[i])
    }

    fn get_live(&self, id: DocumentId) -> Option<&Document> {
        self.get(id).filter(|doc| !doc.is_deleted())
    }

    fn rebuild_indexes(&mut self) {
        self.index = self
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.id, i))
            .collect();
        self.slugs = self
            .documents
            .iter()
            .filter(|doc| !doc.is_deleted())
            .map(|doc| (slug_key(doc), doc.id))
            .collect();
    }

    /// Validate that `parent_id` can be the parent of a document in `site_id`.
    ///
    /// `child` is the document being re-parented, if any; the parent must not
    /// be the child itself or one of its descendants.
    fn check_parent(
        &self,
        site_id: SiteId,
        parent_id: DocumentId,
        child: Option<DocumentId>,
    ) -> Result<(), StorageError> {
        let Some(parent) = self.get_live(parent_id) else {
            let detail = format!("parent document {parent_id} does not exist");
            return Err(invalid_reference(detail));
        };

        if parent.site_id != site_id {
            let detail = format!(
                "parent document {parent_id} belongs to site {}, not site {site_id}",
                parent.site_id
            );
            return Err(invalid_reference(detail));
        }

        let Some(child) = child else {
            return Ok(());
        };

        // Walk up from the new parent; reaching the child means a cycle
        let mut seen = HashSet::new();
        let mut current = Some(parent_id);
        while let Some(id) = current {
            if id == child || !seen.insert(id) {
                let detail = format!("document {child} cannot move under descendant {parent_id}");
                return Err(invalid_reference(detail).with_entity("document", child));
            }
            current = self.get(id).and_then(|doc| doc.parent_id);
        }

        Ok(())
    }

    fn check_slug_free(
        &self,
        key: &SlugKey,
        owner: Option<DocumentId>,
    ) -> Result<(), StorageError> {
        let Some(&existing) = self.slugs.get(key) else {
            return Ok(());
        };
        if Some(existing) == owner {
            return Ok(());
        }

        let (site_id, parent_id, slug) = key;
        let scope = parent_id.map_or_else(|| "root".to_owned(), |p| format!("document {p}"));
        let detail = format!("slug '{slug}' is taken in site {site_id} under {scope}");
        let err = StorageError::conflict(detail)
            .with_backend(BACKEND)
            .with_entity("document", existing);
        Err(err)
    }
}

/// In-memory [`Storage`] implementation.
///
/// Thread-safe through an internal `RwLock`. A poisoned lock is reported as
/// [`StorageErrorKind::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Create a new empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables.write().map_err(|_| poisoned())
    }

    /// Insert a document row verbatim, bypassing every constraint check.
    ///
    /// Intended for tests that need rows a well-behaved backend would never
    /// produce (e.g., a parent cycle). An existing row with the same id is
    /// replaced.
    #[cfg(any(test, feature = "mock"))]
    pub fn insert_raw(&self, document: Document) -> Result<(), StorageError> {
        let mut tables = self.write()?;
        tables.last_document_id = tables.last_document_id.max(document.id.0);
        tables.documents.retain(|doc| doc.id != document.id);
        tables.documents.push(document);
        tables.rebuild_indexes();
        Ok(())
    }
}

fn poisoned() -> StorageError {
    StorageError::new(StorageErrorKind::Unavailable)
        .with_detail("storage lock poisoned")
        .with_backend(BACKEND)
}

fn not_found(entity: &'static str, id: impl Into<u64>) -> StorageError {
    StorageError::not_found(entity, id).with_backend(BACKEND)
}

fn invalid_reference(detail: String) -> StorageError {
    StorageError::invalid_reference(detail).with_backend(BACKEND)
}

fn empty_slug() -> StorageError {
    StorageError::invalid_input("slug cannot be empty").with_backend(BACKEND)
}

impl Storage for MemoryStorage {
    fn site(&self, id: SiteId) -> Result<Site, StorageError> {
        self.read()?
            .sites
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("site", id))
    }

    fn sites(&self) -> Result<Vec<Site>, StorageError> {
        Ok(self.read()?.sites.values().cloned().collect())
    }

    fn user(&self, id: UserId) -> Result<User, StorageError> {
        self.read()?
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("user", id))
    }

    fn document(&self, id: DocumentId) -> Result<Document, StorageError> {
        self.read()?
            .get_live(id)
            .cloned()
            .ok_or_else(|| not_found("document", id))
    }

    fn document_with_deleted(&self, id: DocumentId) -> Result<Document, StorageError> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("document", id))
    }

    fn find_by_slug(
        &self,
        site_id: SiteId,
        parent_id: Option<DocumentId>,
        slug: &str,
    ) -> Result<Option<Document>, StorageError> {
        let tables = self.read()?;
        let key = (site_id, parent_id, slug.to_owned());
        Ok(tables
            .slugs
            .get(&key)
            .and_then(|&id| tables.get_live(id))
            .cloned())
    }

    fn query(&self, query: &DocumentQuery) -> Result<Vec<Document>, StorageError> {
        let tables = self.read()?;
        let mut matched: Vec<&Document> = tables
            .documents
            .iter()
            .filter(|doc| query.matches(doc))
            .collect();
        matched.sort_by(|a, b| query.compare(a, b));
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched.into_iter().cloned().collect())
    }

    fn create_site(&self, site: NewSite) -> Result<Site, StorageError> {
        let mut tables = self.write()?;
        tables.last_site_id += 1;
        let id = SiteId(tables.last_site_id);
        let site = Site {
            id,
            name: site.name,
            domain: site.domain,
            locale: site.locale,
            is_active: site.is_active,
        };
        tables.sites.insert(id, site.clone());
        tracing::debug!(site = %id, domain = %site.domain, "Created site");
        Ok(site)
    }

    fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut tables = self.write()?;
        tables.last_user_id += 1;
        let id = UserId(tables.last_user_id);
        let user = User {
            id,
            name: user.name,
            email: user.email,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    fn create_document(&self, new: NewDocument) -> Result<Document, StorageError> {
        if new.slug.trim().is_empty() {
            return Err(empty_slug());
        }

        let mut tables = self.write()?;

        if !tables.sites.contains_key(&new.site_id) {
            let detail = format!("site {} does not exist", new.site_id);
            return Err(invalid_reference(detail));
        }
        if !tables.users.contains_key(&new.author_id) {
            let detail = format!("author {} does not exist", new.author_id);
            return Err(invalid_reference(detail));
        }
        if let Some(parent_id) = new.parent_id {
            tables.check_parent(new.site_id, parent_id, None)?;
        }

        let key = (new.site_id, new.parent_id, new.slug.clone());
        tables.check_slug_free(&key, None)?;

        tables.last_document_id += 1;
        let id = DocumentId(tables.last_document_id);
        let now = Utc::now();
        let document = Document {
            id,
            site_id: new.site_id,
            parent_id: new.parent_id,
            author_id: new.author_id,
            doc_type: new.doc_type,
            controller: new.controller,
            key: new.key,
            title: new.title,
            slug: new.slug,
            content: new.content,
            meta: new.meta,
            sort_order: new.sort_order,
            published: new.published,
            published_at: new.published_at,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let position = tables.documents.len();
        tables.documents.push(document.clone());
        tables.index.insert(id, position);
        tables.slugs.insert(key, id);

        tracing::debug!(
            document = %id,
            site = %document.site_id,
            slug = %document.slug,
            "Created document"
        );
        Ok(document)
    }

    fn update_document(
        &self,
        id: DocumentId,
        patch: DocumentPatch,
    ) -> Result<Document, StorageError> {
        let mut tables = self.write()?;
        let current = tables
            .get_live(id)
            .cloned()
            .ok_or_else(|| not_found("document", id))?;

        let parent_id = patch.parent_id.unwrap_or(current.parent_id);
        if let Some(parent_id) = parent_id
            && Some(parent_id) != current.parent_id
        {
            tables.check_parent(current.site_id, parent_id, Some(id))?;
        }

        let slug = patch.slug.unwrap_or_else(|| current.slug.clone());
        if slug.trim().is_empty() {
            return Err(empty_slug());
        }

        let old_key = slug_key(&current);
        let new_key = (current.site_id, parent_id, slug.clone());
        tables.check_slug_free(&new_key, Some(id))?;

        let mut updated = current;
        updated.parent_id = parent_id;
        updated.slug = slug;
        if let Some(doc_type) = patch.doc_type {
            updated.doc_type = doc_type;
        }
        if let Some(controller) = patch.controller {
            updated.controller = controller;
        }
        if let Some(key) = patch.key {
            updated.key = key;
        }
        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(content) = patch.content {
            updated.content = content;
        }
        if let Some(meta) = patch.meta {
            updated.meta = meta;
        }
        if let Some(sort_order) = patch.sort_order {
            updated.sort_order = sort_order;
        }
        if let Some(published) = patch.published {
            updated.published = published;
        }
        if let Some(published_at) = patch.published_at {
            updated.published_at = published_at;
        }
        updated.updated_at = Utc::now();

        tables.slugs.remove(&old_key);
        tables.slugs.insert(new_key, id);
        let position = tables.index[&id];
        tables.documents[position] = updated.clone();

        Ok(updated)
    }

    fn soft_delete(&self, id: DocumentId) -> Result<Document, StorageError> {
        let mut tables = self.write()?;
        let position = match tables.index.get(&id) {
            Some(&i) if !tables.documents[i].is_deleted() => i,
            _ => return Err(not_found("document", id)),
        };

        let now = Utc::now();
        let key = slug_key(&tables.documents[position]);
        let doc = &mut tables.documents[position];
        doc.deleted_at = Some(now);
        doc.updated_at = now;
        let deleted = doc.clone();
        tables.slugs.remove(&key);

        tracing::debug!(document = %id, "Soft-deleted document");
        Ok(deleted)
    }

    fn restore(&self, id: DocumentId) -> Result<Document, StorageError> {
        let mut tables = self.write()?;
        let position = *tables
            .index
            .get(&id)
            .ok_or_else(|| not_found("document", id))?;

        if !tables.documents[position].is_deleted() {
            return Ok(tables.documents[position].clone());
        }

        let key = slug_key(&tables.documents[position]);
        tables.check_slug_free(&key, Some(id))?;

        let doc = &mut tables.documents[position];
        doc.deleted_at = None;
        doc.updated_at = Utc::now();
        let restored = doc.clone();
        tables.slugs.insert(key, id);

        Ok(restored)
    }

    fn delete_site(&self, id: SiteId) -> Result<(), StorageError> {
        let mut tables = self.write()?;
        if tables.sites.remove(&id).is_none() {
            return Err(not_found("site", id));
        }

        let before = tables.documents.len();
        tables.documents.retain(|doc| doc.site_id != id);
        let removed = before - tables.documents.len();
        tables.rebuild_indexes();

        tracing::debug!(site = %id, documents = removed, "Deleted site");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{DocumentType, Meta};

    struct Fixture {
        storage: MemoryStorage,
        site: SiteId,
        other_site: SiteId,
        author: UserId,
    }

    fn fixture() -> Fixture {
        let storage = MemoryStorage::new();
        let site = storage
            .create_site(NewSite::new("Main Site", "main.example.com"))
            .unwrap()
            .id;
        let other_site = storage
            .create_site(NewSite::new("Spanish Site", "es.example.com").locale("es"))
            .unwrap()
            .id;
        let author = storage
            .create_user(NewUser::new("Ada", "ada@example.com"))
            .unwrap()
            .id;
        Fixture {
            storage,
            site,
            other_site,
            author,
        }
    }

    impl Fixture {
        fn create(&self, title: &str, slug: &str) -> Document {
            self.storage
                .create_document(NewDocument::new(self.site, self.author, title, slug))
                .unwrap()
        }

        fn create_foreign(&self, title: &str, slug: &str) -> Document {
            self.storage
                .create_document(NewDocument::new(self.other_site, self.author, title, slug))
                .unwrap()
        }

        fn create_child(&self, parent: DocumentId, title: &str, slug: &str) -> Document {
            self.storage
                .create_document(
                    NewDocument::new(self.site, self.author, title, slug).parent(parent),
                )
                .unwrap()
        }
    }

    #[test]
    fn test_create_document_assigns_ids_and_timestamps() {
        let f = fixture();
        let first = f.create("Home", "home");
        let second = f.create("About", "about");

        assert_eq!(first.id, DocumentId(1));
        assert_eq!(second.id, DocumentId(2));
        assert_eq!(first.created_at, first.updated_at);
        assert!(first.deleted_at.is_none());
    }

    #[test]
    fn test_same_slug_allowed_on_different_sites() {
        let f = fixture();
        let doc1 = f.create("Same", "same-slug");
        let doc2 = f.create_foreign("Same", "same-slug");

        assert_eq!(doc1.slug, doc2.slug);
        assert_ne!(doc1.site_id, doc2.site_id);
    }

    #[test]
    fn test_same_slug_allowed_under_different_parents() {
        let f = fixture();
        let a = f.create("A", "a");
        let b = f.create("B", "b");

        f.create_child(a.id, "Team", "team");
        f.create_child(b.id, "Team", "team");
    }

    #[test]
    fn test_slug_must_be_unique_per_site_and_parent() {
        let f = fixture();
        let parent = f.create("Parent", "parent");
        f.create_child(parent.id, "Test Page", "test-page");

        let err = f
            .storage
            .create_document(
                NewDocument::new(f.site, f.author, "Test Page 2", "test-page").parent(parent.id),
            )
            .unwrap_err();

        assert!(err.is_conflict());
    }

    #[test]
    fn test_slug_must_be_unique_at_root_level() {
        let f = fixture();
        f.create("Home", "home");

        let err = f
            .storage
            .create_document(NewDocument::new(f.site, f.author, "Home 2", "home"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::Conflict);
    }

    #[test]
    fn test_empty_slug_rejected() {
        let f = fixture();
        let err = f
            .storage
            .create_document(NewDocument::new(f.site, f.author, "Blank", "  "))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_site_or_author_rejected() {
        let f = fixture();

        let err = f
            .storage
            .create_document(NewDocument::new(SiteId(99), f.author, "X", "x"))
            .unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidReference);

        let err = f
            .storage
            .create_document(NewDocument::new(f.site, UserId(99), "X", "x"))
            .unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidReference);
    }

    #[test]
    fn test_cross_site_parent_rejected() {
        let f = fixture();
        let foreign = f.create_foreign("Foreign", "foreign");

        let err = f
            .storage
            .create_document(
                NewDocument::new(f.site, f.author, "Child", "child").parent(foreign.id),
            )
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidReference);
    }

    #[test]
    fn test_soft_delete_hides_document() {
        let f = fixture();
        let doc = f.create("Doomed", "doomed");

        let deleted = f.storage.soft_delete(doc.id).unwrap();
        assert!(deleted.deleted_at.is_some());

        let err = f.storage.document(doc.id).unwrap_err();
        assert!(err.is_not_found());

        let row = f.storage.document_with_deleted(doc.id).unwrap();
        assert!(row.deleted_at.is_some());

        assert!(f.storage.query(&DocumentQuery::new()).unwrap().is_empty());
        assert_eq!(
            f.storage
                .query(&DocumentQuery::new().with_deleted())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_soft_delete_twice_is_not_found() {
        let f = fixture();
        let doc = f.create("Doomed", "doomed");
        f.storage.soft_delete(doc.id).unwrap();

        assert!(f.storage.soft_delete(doc.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_soft_delete_releases_slug() {
        let f = fixture();
        let doc = f.create("Old", "page");
        f.storage.soft_delete(doc.id).unwrap();

        let replacement = f.create("New", "page");
        assert_ne!(replacement.id, doc.id);
    }

    #[test]
    fn test_restore_conflicts_when_slug_taken() {
        let f = fixture();
        let doc = f.create("Old", "page");
        f.storage.soft_delete(doc.id).unwrap();
        f.create("New", "page");

        assert!(f.storage.restore(doc.id).unwrap_err().is_conflict());
    }

    #[test]
    fn test_restore_clears_marker() {
        let f = fixture();
        let doc = f.create("Old", "page");
        f.storage.soft_delete(doc.id).unwrap();

        let restored = f.storage.restore(doc.id).unwrap();
        assert!(restored.deleted_at.is_none());
        assert_eq!(f.storage.document(doc.id).unwrap().id, doc.id);
        assert!(
            f.storage
                .find_by_slug(f.site, None, "page")
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_update_detects_slug_conflict() {
        let f = fixture();
        f.create("Home", "home");
        let about = f.create("About", "about");

        let err = f
            .storage
            .update_document(
                about.id,
                DocumentPatch {
                    slug: Some("home".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(err.is_conflict());
        // Old slug still registered
        assert!(
            f.storage
                .find_by_slug(f.site, None, "about")
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_update_moves_slug_index() {
        let f = fixture();
        let about = f.create("About", "about");

        let updated = f
            .storage
            .update_document(
                about.id,
                DocumentPatch {
                    slug: Some("about-us".to_owned()),
                    title: Some("About Us".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "About Us");
        assert!(
            f.storage
                .find_by_slug(f.site, None, "about")
                .unwrap()
                .is_none()
        );
        assert_eq!(
            f.storage
                .find_by_slug(f.site, None, "about-us")
                .unwrap()
                .map(|d| d.id),
            Some(about.id)
        );
    }

    #[test]
    fn test_update_rejects_cycle() {
        let f = fixture();
        let a = f.create("A", "a");
        let b = f.create_child(a.id, "B", "b");
        let c = f.create_child(b.id, "C", "c");

        let err = f
            .storage
            .update_document(
                a.id,
                DocumentPatch {
                    parent_id: Some(Some(c.id)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidReference);

        let err = f
            .storage
            .update_document(
                a.id,
                DocumentPatch {
                    parent_id: Some(Some(a.id)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidReference);
    }

    #[test]
    fn test_update_rejects_cross_site_parent() {
        let f = fixture();
        let doc = f.create("Local", "local");
        let foreign = f.create_foreign("Foreign", "foreign");

        let err = f
            .storage
            .update_document(
                doc.id,
                DocumentPatch {
                    parent_id: Some(Some(foreign.id)),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidReference);
        assert!(f.storage.document(doc.id).unwrap().is_root());
    }

    #[test]
    fn test_update_rejects_deleted_parent() {
        let f = fixture();
        let doc = f.create("Local", "local");
        let gone = f.create("Gone", "gone");
        f.storage.soft_delete(gone.id).unwrap();

        let err = f
            .storage
            .update_document(
                doc.id,
                DocumentPatch {
                    parent_id: Some(Some(gone.id)),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidReference);
        assert!(
            f.storage
                .find_by_slug(f.site, None, "local")
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_update_to_root_level() {
        let f = fixture();
        let a = f.create("A", "a");
        let b = f.create_child(a.id, "B", "b");

        let moved = f
            .storage
            .update_document(
                b.id,
                DocumentPatch {
                    parent_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(moved.is_root());
        assert!(f.storage.find_by_slug(f.site, None, "b").unwrap().is_some());
    }

    #[test]
    fn test_query_scopes() {
        let f = fixture();
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        for i in 0..2 {
            f.storage
                .create_document(
                    NewDocument::new(f.site, f.author, "P", format!("published-{i}"))
                        .published_at(ts),
                )
                .unwrap();
        }
        for i in 0..3 {
            f.create("Draft", &format!("draft-{i}"));
        }
        for i in 0..4 {
            f.storage
                .create_document(
                    NewDocument::new(f.other_site, f.author, "P", format!("other-{i}"))
                        .published_at(ts),
                )
                .unwrap();
        }

        let count = |q: DocumentQuery| f.storage.query(&q).unwrap().len();
        assert_eq!(count(DocumentQuery::new().for_site(f.site)), 5);
        assert_eq!(count(DocumentQuery::new().for_site(f.site).published()), 2);
        assert_eq!(count(DocumentQuery::new().for_site(f.site).root_level()), 5);
        assert_eq!(
            count(DocumentQuery::new().for_site(f.other_site).published()),
            4
        );
        assert_eq!(count(DocumentQuery::new()), 9);
    }

    #[test]
    fn test_query_orders_and_limits() {
        let f = fixture();
        let parent = f.create("Parent", "parent");
        for (slug, order) in [("c", 30), ("a", 10), ("b", 20)] {
            f.storage
                .create_document(
                    NewDocument::new(f.site, f.author, slug, slug)
                        .parent(parent.id)
                        .sort_order(order),
                )
                .unwrap();
        }

        let query = DocumentQuery::new()
            .child_of(parent.id)
            .order_by(crate::OrderBy::asc(crate::Column::SortOrder))
            .limit(2);
        let slugs: Vec<String> = f
            .storage
            .query(&query)
            .unwrap()
            .into_iter()
            .map(|d| d.slug)
            .collect();

        assert_eq!(slugs, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_delete_site_cascades() {
        let f = fixture();
        let home = f.create("Home", "home");
        f.create_child(home.id, "Child", "child");
        let foreign = f.create_foreign("Keep", "keep");

        f.storage.delete_site(f.site).unwrap();

        assert!(f.storage.site(f.site).unwrap_err().is_not_found());
        assert!(f.storage.document_with_deleted(home.id).is_err());
        assert_eq!(f.storage.document(foreign.id).unwrap().slug, "keep");
        assert_eq!(f.storage.query(&DocumentQuery::new()).unwrap().len(), 1);
    }

    #[test]
    fn test_insert_raw_bypasses_constraints() {
        let f = fixture();
        let a = f.create("A", "a");
        let mut looped = a.clone();
        looped.parent_id = Some(a.id);
        looped.doc_type = DocumentType::Folder;
        looped.meta = Meta::new();

        f.storage.insert_raw(looped).unwrap();

        let stored = f.storage.document(a.id).unwrap();
        assert_eq!(stored.parent_id, Some(a.id));
        assert_eq!(stored.doc_type, DocumentType::Folder);
    }

    #[test]
    fn test_memory_storage_is_send_sync() {
        static_assertions::assert_impl_all!(MemoryStorage: Send, Sync);
    }
}
