//! Command availability probe.
//!
//! The diagram renderer prefers a `plantuml` launcher on PATH and falls back
//! to invoking the archive through Java. Handlers ask this port first so the
//! fallback can be chosen without spawning a shell.

/// Answers whether a bare command name would resolve at spawn time.
pub trait CommandProbe: Send + Sync {
    fn is_available(&self, command: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static [&'static str]);

    impl CommandProbe for Fixed {
        fn is_available(&self, command: &str) -> bool {
            self.0.contains(&command)
        }
    }

    #[test]
    fn probe_is_object_safe() {
        let probe: Box<dyn CommandProbe> = Box::new(Fixed(&["java"]));
        assert!(probe.is_available("java"));
        assert!(!probe.is_available("plantuml"));
    }
}
