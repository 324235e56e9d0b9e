//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where concrete adapters are wired together:
//! - Configuration loading and installation validation (docgate-core)
//! - Process runner and command probe (docgate-runtime)
//! - Dispatcher and its operation context (docgate-mcp)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use docgate_core::paths::config_file_path;
use docgate_core::{AssetPaths, CommandProbe, LoadedConfig, ProcessRunner, ToolConfig, ValidationReport};
use docgate_mcp::{Dispatcher, OperationContext};
use docgate_runtime::{PathCommandProbe, TokioProcessRunner};
use tracing::{info, warn};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// User configuration file (may not exist).
    pub config_file: PathBuf,
    /// Bundled assets, including the fallback example configuration.
    pub assets: AssetPaths,
    /// Base for relative paths in tool arguments.
    pub working_dir: PathBuf,
    pub process_timeout: Option<Duration>,
    pub output_limit: usize,
}

impl CliConfig {
    /// Resolve paths from the environment and limits from the command line.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(Self {
            config_file: config_file_path()?,
            assets: AssetPaths::discover()?,
            working_dir: std::env::current_dir()?,
            process_timeout: cli.process_timeout(),
            output_limit: cli.output_limit,
        })
    }
}

/// A loaded configuration and the result of checking the installation.
#[derive(Debug, Clone)]
pub struct Startup {
    pub loaded: LoadedConfig,
    pub report: ValidationReport,
}

/// Load the configuration and validate the installation it describes.
///
/// Load failures are errors; validation problems are reported, not raised.
pub fn load(config: &CliConfig) -> Result<Startup, CliError> {
    let loaded = ToolConfig::load_from(&config.config_file, &config.assets.example_config)?;
    let report = loaded.config.validate(&config.assets);
    Ok(Startup { loaded, report })
}

/// Build the dispatcher the server runs on.
///
/// Fails when the configuration cannot be loaded or the installation has
/// hard errors. Warnings are logged and startup continues.
pub fn bootstrap(config: &CliConfig) -> Result<Dispatcher, CliError> {
    let Startup { loaded, report } = load(config)?;
    if !report.valid {
        return Err(CliError::Invalid(report.errors));
    }
    for warning in &report.warnings {
        warn!("{warning}");
    }
    info!(
        config = %loaded.path.display(),
        source = ?loaded.source,
        "Configuration ready"
    );

    let runner: Arc<dyn ProcessRunner> = Arc::new(
        TokioProcessRunner::new()
            .with_timeout(config.process_timeout)
            .with_output_limit(config.output_limit),
    );
    let probe: Arc<dyn CommandProbe> = Arc::new(PathCommandProbe::new());

    Ok(Dispatcher::new(OperationContext::new(
        loaded.config,
        config.assets.clone(),
        config.working_dir.clone(),
        runner,
        probe,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgate_core::{ConfigSource, DEFAULT_OUTPUT_LIMIT};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn cli_config(root: &Path) -> CliConfig {
        CliConfig {
            config_file: root.join("user/config.json"),
            assets: AssetPaths::under(root.join("install")),
            working_dir: root.to_path_buf(),
            process_timeout: None,
            output_limit: DEFAULT_OUTPUT_LIMIT,
        }
    }

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    const CONFIG: &str =
        r#"{"pythonPath": "python3", "plantumlPath": "/opt/plantuml", "pandocPath": "pandoc"}"#;

    #[test]
    fn falls_back_to_bundled_example() {
        let dir = tempdir().unwrap();
        let config = cli_config(dir.path());
        write(&config.assets.example_config, CONFIG);

        let startup = load(&config).unwrap();
        assert_eq!(startup.loaded.source, ConfigSource::BundledExample);
        assert_eq!(startup.loaded.config.python_path, "python3");
    }

    #[test]
    fn missing_keys_are_a_config_error() {
        let dir = tempdir().unwrap();
        let config = cli_config(dir.path());
        write(&config.config_file, r#"{"pythonPath": "python3"}"#);

        let err = bootstrap(&config).unwrap_err();
        assert_eq!(err.exit_code(), 78);
        let message = err.to_string();
        assert!(message.contains("plantumlPath"));
        assert!(message.contains("pandocPath"));
    }

    #[test]
    fn missing_compiler_script_blocks_startup() {
        let dir = tempdir().unwrap();
        let config = cli_config(dir.path());
        write(&config.config_file, CONFIG);

        let err = bootstrap(&config).unwrap_err();
        assert!(matches!(err, CliError::Invalid(_)));
        assert!(err.to_string().contains("compiler script not found"));
    }

    #[test]
    fn warnings_do_not_block_startup() {
        let dir = tempdir().unwrap();
        let config = cli_config(dir.path());
        write(&config.config_file, CONFIG);
        write(&config.assets.compiler_script, "print('ok')\n");

        let startup = load(&config).unwrap();
        assert!(startup.report.valid);
        assert!(!startup.report.warnings.is_empty());

        let dispatcher = bootstrap(&config).unwrap();
        assert_eq!(dispatcher.context().working_dir, dir.path());
        assert_eq!(dispatcher.context().config.plantuml_path, "/opt/plantuml");
    }
}
