//! `trellis controllers` command implementation.

use trellis_site::HandlerRegistry;

use crate::app::{GlobalArgs, build_registry};
use crate::error::CliError;
use crate::output::Output;

/// Execute the controllers command.
///
/// # Errors
///
/// Returns an error if the config is invalid or an alias targets an
/// unregistered handler.
pub(crate) fn execute(global: &GlobalArgs) -> Result<(), CliError> {
    let config = global.load_config()?;
    let registry = build_registry(&config)?;
    let output = Output::new();
    for line in controller_lines(&registry) {
        output.print(&line);
    }
    Ok(())
}

fn controller_lines(registry: &HandlerRegistry) -> Vec<String> {
    registry
        .list_available()
        .into_iter()
        .filter_map(|name| {
            let handler = registry.get(name)?;
            let default = if std::sync::Arc::ptr_eq(handler, registry.default_handler()) {
                " (default)"
            } else {
                ""
            };
            Some(format!("{name} -> {}{default}", handler.component()))
        })
        .collect()
}
