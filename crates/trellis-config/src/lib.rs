//! Configuration management for Trellis.
//!
//! Parses `trellis.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Sections
//!
//! ```toml
//! [content]
//! file = "content.yaml"
//!
//! [render]
//! related_posts_limit = 3
//! related_products_limit = 4
//!
//! [controllers]
//! NewsController = "BlogController"
//! ```
//!
//! `[controllers]` binds extra controller names to already registered
//! handlers.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.file`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "trellis.toml";

/// Content filename used when none is configured.
const DEFAULT_CONTENT_FILE: &str = "content.yaml";

/// Upper bound for related content limits.
const MAX_RELATED_LIMIT: usize = 100;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content file.
    pub content_file: Option<PathBuf>,
    /// Override blog related posts limit.
    pub related_posts_limit: Option<usize>,
    /// Override product related products limit.
    pub related_products_limit: Option<usize>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (path is a relative string from TOML).
    content: ContentConfigRaw,
    /// Rendering limits.
    pub render: RenderSettings,
    /// Controller aliases: alias name to registered handler name.
    pub controllers: BTreeMap<String, String>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    file: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// YAML file declaring users, sites and documents.
    pub file: PathBuf,
}

/// Related content limits.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Maximum entries in a blog's related posts.
    pub related_posts_limit: usize,
    /// Maximum entries in a product's related products.
    pub related_products_limit: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            related_posts_limit: 3,
            related_products_limit: 4,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.file`").
        field: String,
        /// Error message (e.g., "${`CONTENT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a limit to be within `1..=MAX_RELATED_LIMIT`.
fn require_limit(value: usize, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    if value > MAX_RELATED_LIMIT {
        return Err(ConfigError::Validation(format!(
            "{field} cannot exceed {MAX_RELATED_LIMIT}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `trellis.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(file) = &settings.content_file {
            self.content_resolved.file.clone_from(file);
        }
        if let Some(limit) = settings.related_posts_limit {
            self.render.related_posts_limit = limit;
        }
        if let Some(limit) = settings.related_products_limit {
            self.render.related_products_limit = limit;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            render: RenderSettings::default(),
            controllers: BTreeMap::new(),
            content_resolved: ContentConfig {
                file: base.join(DEFAULT_CONTENT_FILE),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_limit(
            self.render.related_posts_limit,
            "render.related_posts_limit",
        )?;
        require_limit(
            self.render.related_products_limit,
            "render.related_products_limit",
        )?;
        self.validate_controllers()?;
        Ok(())
    }

    /// Validate controller aliases. Whether targets exist is checked when the
    /// handler registry is built.
    fn validate_controllers(&self) -> Result<(), ConfigError> {
        for (alias, target) in &self.controllers {
            if alias.chars().any(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "controllers: alias '{alias}' cannot contain whitespace"
                )));
            }
            require_non_empty(target, &format!("controllers.{alias}"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref file) = self.content.file {
            self.content.file = Some(expand::expand_env(file, "content.file")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let file = self.content.file.as_deref().unwrap_or(DEFAULT_CONTENT_FILE);
        self.content_resolved = ContentConfig {
            file: config_dir.join(file),
        };
    }
}
