//! Wiring shared by every command: config, content and renderer.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use trellis_config::{CliSettings, Config};
use trellis_site::{HandlerRegistry, RenderConfig, Renderer};
use trellis_storage::Storage;

use crate::content::load_content;
use crate::error::CliError;

/// Options accepted by every command.
#[derive(Args, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover trellis.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Content file to load (overrides config).
    #[arg(long, global = true, env = "TRELLIS_CONTENT")]
    pub content: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            content_file: self.content.clone(),
            ..CliSettings::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build the handler registry, binding `[controllers]` aliases.
pub(crate) fn build_registry(config: &Config) -> Result<HandlerRegistry, CliError> {
    let mut builder = HandlerRegistry::builder();
    for (alias, target) in &config.controllers {
        builder.register_alias(alias, target)?;
    }
    Ok(builder.build())
}

/// Load content and assemble a renderer.
pub(crate) fn build_renderer(config: &Config) -> Result<Renderer, CliError> {
    let registry = build_registry(config)?;
    let storage: Arc<dyn Storage> = Arc::new(load_content(&config.content_resolved.file)?);
    let render_config = RenderConfig {
        related_posts_limit: config.render.related_posts_limit,
        related_products_limit: config.render.related_products_limit,
    };
    Ok(Renderer::new(storage, Arc::new(registry), render_config))
}
