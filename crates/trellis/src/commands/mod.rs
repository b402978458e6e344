//! CLI command implementations.

pub(crate) mod controllers;
pub(crate) mod render;
pub(crate) mod tree;

pub(crate) use render::RenderArgs;
pub(crate) use tree::TreeArgs;
