//! `trellis tree` command implementation.

use clap::Args;
use trellis_site::Renderer;
use trellis_storage::{Document, Site, SiteId};

use crate::app::{GlobalArgs, build_renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args, Debug)]
pub(crate) struct TreeArgs {
    /// Site id (default: every site).
    #[arg(short, long)]
    site: Option<u64>,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the site does not exist.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let config = global.load_config()?;
        let renderer = build_renderer(&config)?;
        let output = Output::new();

        let sites = match self.site {
            Some(id) => vec![renderer.storage().site(SiteId(id))?],
            None => renderer.storage().sites()?,
        };
        if sites.is_empty() {
            output.info("No sites in content file");
        }

        for site in &sites {
            output.heading(&site_heading(site));
            for line in tree_lines(&renderer, site.id)? {
                output.print(&line);
            }
        }
        Ok(())
    }
}

fn site_heading(site: &Site) -> String {
    let inactive = if site.is_active { "" } else { ", inactive" };
    format!(
        "{} ({}) [site {}, {}{inactive}]",
        site.name, site.domain, site.id, site.locale
    )
}

/// Render a site's live documents as an indented tree, drafts included.
fn tree_lines(renderer: &Renderer, site_id: SiteId) -> Result<Vec<String>, CliError> {
    let tree = renderer.tree(site_id);
    let mut lines = Vec::new();
    let roots = tree.roots()?;
    walk(renderer, &roots, "", "", &mut lines)?;
    Ok(lines)
}

fn walk(
    renderer: &Renderer,
    level: &[Document],
    prefix: &str,
    path: &str,
    lines: &mut Vec<String>,
) -> Result<(), CliError> {
    for (i, doc) in level.iter().enumerate() {
        let last = i + 1 == level.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let doc_path = format!("{path}/{}", doc.slug);
        let label = describe(renderer, doc, &doc_path);
        lines.push(format!("{prefix}{branch}{label}"));

        let children = renderer.tree(doc.site_id).children(doc)?;
        let child_prefix = format!("{prefix}{indent}");
        walk(renderer, &children, &child_prefix, &doc_path, lines)?;
    }
    Ok(())
}

fn describe(renderer: &Renderer, doc: &Document, path: &str) -> String {
    let handler = renderer.resolve(doc);
    let status = if doc.published { "" } else { ", draft" };
    format!(
        "{} {path} [#{}, {}, {}{status}]",
        doc.title,
        doc.id,
        doc.doc_type,
        handler.name()
    )
}
