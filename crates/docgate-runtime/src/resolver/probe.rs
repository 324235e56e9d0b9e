//! `CommandProbe` adapter backed by the executable resolver.

use docgate_core::CommandProbe;
use tracing::debug;

use super::env::{EnvProvider, SystemEnv};
use super::fs::{FsProvider, SystemFs};
use super::resolve::resolve_executable_with_deps;

/// Reports whether a command resolves through PATH and the usual locations.
pub struct PathCommandProbe {
    env: Box<dyn EnvProvider>,
    fs: Box<dyn FsProvider>,
    extra_dirs: Vec<String>,
}

impl Default for PathCommandProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl PathCommandProbe {
    /// Probe against the real environment and filesystem.
    pub fn new() -> Self {
        Self::with_providers(Box::new(SystemEnv), Box::new(SystemFs))
    }

    pub fn with_providers(env: Box<dyn EnvProvider>, fs: Box<dyn FsProvider>) -> Self {
        Self {
            env,
            fs,
            extra_dirs: Vec::new(),
        }
    }

    /// Additional directories searched after the platform defaults.
    #[must_use]
    pub fn with_extra_dirs(mut self, dirs: Vec<String>) -> Self {
        self.extra_dirs = dirs;
        self
    }
}

impl CommandProbe for PathCommandProbe {
    fn is_available(&self, command: &str) -> bool {
        match resolve_executable_with_deps(command, &self.extra_dirs, &*self.env, &*self.fs) {
            Ok(result) => {
                debug!(command, path = %result.resolved_path.display(), "Command resolved");
                true
            }
            Err(e) => {
                debug!(command, error = %e, "Command not resolvable");
                false
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::resolver::{MockEnv, MockFs};

    #[test]
    fn probe_reports_path_hits() {
        let probe = PathCommandProbe::with_providers(
            Box::new(MockEnv::new().with_var("PATH", "/opt/bin")),
            Box::new(MockFs::new().with_executable("/opt/bin/plantuml")),
        );

        assert!(probe.is_available("plantuml"));
        assert!(!probe.is_available("definitely-not-installed-xyz"));
    }

    #[test]
    fn probe_searches_extra_dirs() {
        let probe = PathCommandProbe::with_providers(
            Box::new(MockEnv::new()),
            Box::new(MockFs::new().with_executable("/srv/plantuml/plantuml")),
        )
        .with_extra_dirs(vec!["/srv/plantuml".into()]);

        assert!(probe.is_available("plantuml"));
    }
}
