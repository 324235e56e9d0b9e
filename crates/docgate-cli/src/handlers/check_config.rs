//! Check-config command handler.

use std::fmt::Write as _;

use docgate_core::ConfigSource;

use crate::bootstrap::{self, CliConfig, Startup};
use crate::error::CliError;

/// Load and validate the configuration, print the report, and fail when
/// the installation has hard errors.
pub fn execute(config: &CliConfig) -> Result<(), CliError> {
    let startup = bootstrap::load(config)?;
    print!("{}", render(&startup));

    if startup.report.valid {
        Ok(())
    } else {
        Err(CliError::Invalid(startup.report.errors))
    }
}

fn render(startup: &Startup) -> String {
    let Startup { loaded, report } = startup;
    let source = match loaded.source {
        ConfigSource::User => "user",
        ConfigSource::BundledExample => "bundled example",
    };

    let mut out = String::new();
    let _ = writeln!(out, "config = {} ({source})", loaded.path.display());
    let _ = writeln!(out, "pythonPath = {}", loaded.config.python_path);
    let _ = writeln!(out, "plantumlPath = {}", loaded.config.plantuml_path);
    let _ = writeln!(out, "pandocPath = {}", loaded.config.pandoc_path);
    let _ = writeln!(out, "valid = {}", report.valid);
    for error in &report.errors {
        let _ = writeln!(out, "error: {error}");
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    out
}
