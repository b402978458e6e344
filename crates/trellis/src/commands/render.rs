//! `trellis render` command implementation.

use clap::{ArgGroup, Args};
use trellis_site::{RenderPayload, Renderer};
use trellis_storage::{DocumentId, SiteId};

use crate::app::{GlobalArgs, build_renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "path"])))]
pub(crate) struct RenderArgs {
    /// Site id.
    #[arg(short, long)]
    site: u64,

    /// Document id.
    #[arg(long)]
    id: Option<u64>,

    /// Slug path from the site root (e.g., "products/widget").
    #[arg(long)]
    path: Option<String>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the document cannot be rendered.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let config = global.load_config()?;
        let renderer = build_renderer(&config)?;

        let payload = self.render(&renderer)?;
        let json = if self.compact {
            serde_json::to_string(&payload)?
        } else {
            serde_json::to_string_pretty(&payload)?
        };

        Output::new().print(&json);
        Ok(())
    }

    /// Render by id, or by path when no id is given.
    ///
    /// The `target` group guarantees one of the two is set.
    fn render(&self, renderer: &Renderer) -> Result<RenderPayload, CliError> {
        let site = SiteId(self.site);
        let payload = match self.id {
            Some(id) => renderer.render(site, DocumentId(id))?,
            None => renderer.render_path(site, self.path.as_deref().unwrap_or_default())?,
        };
        Ok(payload)
    }
}
