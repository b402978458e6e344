//! Content model and storage abstraction for Trellis.
//!
//! This crate provides the persistence side of the content model:
//!
//! - [`Site`], [`User`] and [`Document`] rows linked by typed identifiers
//! - [`Storage`] trait with site, user and document operations
//! - [`DocumentQuery`] for backend-neutral filtering and ordering
//! - [`MemoryStorage`], an in-process backend enforcing the model's constraints
//!
//! # Example
//!
//! ```
//! use trellis_storage::{DocumentQuery, MemoryStorage, NewDocument, NewSite, NewUser, Storage};
//!
//! # fn main() -> Result<(), trellis_storage::StorageError> {
//! let storage = MemoryStorage::new();
//! let site = storage.create_site(NewSite::new("Main Site", "main.example.com"))?;
//! let author = storage.create_user(NewUser::new("Ada", "ada@example.com"))?;
//! let home = NewDocument::new(site.id, author.id, "Home", "home").published();
//! let home = storage.create_document(home)?;
//!
//! let roots = storage.query(&DocumentQuery::new().for_site(site.id).root_level())?;
//! assert_eq!(roots[0].id, home.id);
//! # Ok(())
//! # }
//! ```

mod memory;
mod model;
mod query;
mod storage;

pub use memory::MemoryStorage;
pub use model::{
    Document, DocumentId, DocumentPatch, DocumentType, Meta, NewDocument, NewSite, NewUser, Site,
    SiteId, User, UserId,
};
pub use query::{Column, Direction, DocumentQuery, OrderBy, ParentFilter};
pub use storage::{Storage, StorageError, StorageErrorKind};
