//! Document tree access and handler dispatch for Trellis.
//!
//! This crate provides:
//! - [`DocumentTree`]: site-scoped children, breadcrumbs and related content
//! - [`HandlerRegistry`]: controller name to [`DocumentHandler`] resolution
//!   with a default fallback
//! - Built-in handlers: [`DefaultHandler`], [`BlogHandler`], [`ProductHandler`]
//! - [`Renderer`]: loads a document, resolves its handler and returns the
//!   [`RenderPayload`] for the presentation layer
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use trellis_site::{HandlerRegistry, RenderConfig, Renderer};
//! use trellis_storage::{MemoryStorage, NewDocument, NewSite, NewUser, Storage};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let site = storage.create_site(NewSite::new("Main Site", "main.example.com"))?;
//! let author = storage.create_user(NewUser::new("Ada", "ada@example.com"))?;
//! let blog = storage.create_document(
//!     NewDocument::new(site.id, author.id, "Blog", "blog")
//!         .controller("BlogController")
//!         .published(),
//! )?;
//!
//! let mut builder = HandlerRegistry::builder();
//! builder.register_alias("NewsController", "BlogController")?;
//! let renderer = Renderer::new(storage, Arc::new(builder.build()), RenderConfig::default());
//!
//! let payload = renderer.render(site.id, blog.id)?;
//! assert_eq!(payload.component, "Documents/Blog");
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
pub mod handlers;
mod payload;
mod registry;
mod renderer;
mod tree;

#[cfg(test)]
mod testing;

pub use error::{RegistryError, RenderError};
pub use handler::{DocumentHandler, RenderContext};
pub use handlers::{BlogHandler, DefaultHandler, ProductHandler};
pub use payload::{DocumentView, RESERVED_FIELDS, RenderPayload};
pub use registry::{DEFAULT_HANDLER, HandlerRegistry, RegistryBuilder};
pub use renderer::{RenderConfig, Renderer};
pub use tree::{BreadcrumbItem, DocumentTree};
