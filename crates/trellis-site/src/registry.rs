//! Controller name to handler resolution.
//!
//! A [`HandlerRegistry`] is assembled once through a [`RegistryBuilder`] and
//! is immutable afterwards, so it can be shared across threads behind an
//! `Arc` and resolved without locking.
//!
//! # Resolution
//!
//! [`HandlerRegistry::resolve`] reads the document's controller name on every
//! call. Missing, blank and unknown names resolve to the handler registered
//! under [`DEFAULT_HANDLER`]; resolution itself never fails. Invalid bindings
//! are rejected while building instead.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use trellis_storage::Document;

use crate::error::RegistryError;
use crate::handler::DocumentHandler;
use crate::handlers::{BlogHandler, DefaultHandler, ProductHandler};

/// Name of the fallback handler.
pub const DEFAULT_HANDLER: &str = DefaultHandler::NAME;

/// Mutable registry under construction.
///
/// Starts with the built-in handlers registered under their own names.
pub struct RegistryBuilder {
    handlers: HashMap<String, Arc<dyn DocumentHandler>>,
    default: Arc<dyn DocumentHandler>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        let default: Arc<dyn DocumentHandler> = Arc::new(DefaultHandler);
        let mut handlers: HashMap<String, Arc<dyn DocumentHandler>> = HashMap::new();
        handlers.insert(DefaultHandler::NAME.to_owned(), Arc::clone(&default));
        handlers.insert(BlogHandler::NAME.to_owned(), Arc::new(BlogHandler));
        handlers.insert(ProductHandler::NAME.to_owned(), Arc::new(ProductHandler));
        Self { handlers, default }
    }

    /// Register a handler under a name, replacing any previous binding.
    ///
    /// Registering under [`DEFAULT_HANDLER`] also replaces the fallback.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidName` for an empty name or one containing
    /// whitespace, and `RegistryError::InvalidHandler` if the handler reports
    /// an empty name or component.
    pub fn register(
        &mut self,
        name: &str,
        handler: impl DocumentHandler + 'static,
    ) -> Result<&mut Self, RegistryError> {
        self.register_shared(name, Arc::new(handler))
    }

    /// Register an already shared handler instance.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_shared(
        &mut self,
        name: &str,
        handler: Arc<dyn DocumentHandler>,
    ) -> Result<&mut Self, RegistryError> {
        validate_name(name)?;
        validate_handler(handler.as_ref())?;

        if name == DEFAULT_HANDLER {
            self.default = Arc::clone(&handler);
        }
        let replaced = self.handlers.insert(name.to_owned(), handler).is_some();
        tracing::debug!(name, replaced, "Registered document handler");
        Ok(self)
    }

    /// Bind `name` to the handler currently registered under `target`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownHandler` if `target` is not registered
    /// and `RegistryError::InvalidName` if `name` is malformed.
    pub fn register_alias(&mut self, name: &str, target: &str) -> Result<&mut Self, RegistryError> {
        let handler = self
            .handlers
            .get(target)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownHandler {
                name: name.to_owned(),
                target: target.to_owned(),
            })?;
        self.register_shared(name, handler)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> HandlerRegistry {
        tracing::debug!(handlers = self.handlers.len(), "Built handler registry");
        HandlerRegistry {
            handlers: self.handlers,
            default: self.default,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(RegistryError::InvalidName(name.to_owned()));
    }
    Ok(())
}

fn validate_handler(handler: &dyn DocumentHandler) -> Result<(), RegistryError> {
    let invalid = |reason: &str| RegistryError::InvalidHandler {
        name: handler.name().to_owned(),
        reason: reason.to_owned(),
    };
    if handler.name().trim().is_empty() {
        return Err(invalid("empty handler name"));
    }
    if handler.component().trim().is_empty() {
        return Err(invalid("empty component name"));
    }
    Ok(())
}

/// Immutable mapping from controller name to handler.
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn DocumentHandler>>,
    default: Arc<dyn DocumentHandler>,
}

impl HandlerRegistry {
    /// Start from the built-in handlers.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve the handler for a document, falling back to the default.
    #[must_use]
    pub fn resolve(&self, document: &Document) -> &Arc<dyn DocumentHandler> {
        self.resolve_name(document.controller_name())
    }

    /// Resolve a controller name, falling back to the default.
    #[must_use]
    pub fn resolve_name(&self, name: Option<&str>) -> &Arc<dyn DocumentHandler> {
        let Some(name) = name else {
            return &self.default;
        };
        self.handlers.get(name).unwrap_or_else(|| {
            tracing::debug!(
                controller = name,
                "Unknown controller, using default handler"
            );
            &self.default
        })
    }

    /// Exact lookup without fallback.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn DocumentHandler>> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn list_available(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn default_handler(&self) -> &Arc<dyn DocumentHandler> {
        &self.default
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        RegistryBuilder::new().build()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.list_available())
            .field("default", &self.default.name())
            .finish()
    }
}
