//! Environment provider trait for testable executable lookup.

use std::ffi::OsString;

/// Trait for accessing environment variables (injectable for testing).
pub trait EnvProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<OsString>;
}

/// Reads from the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Fixed set of variables for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MockEnv {
    vars: std::collections::HashMap<String, OsString>,
}

#[cfg(test)]
impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl EnvProvider for MockEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }
}
