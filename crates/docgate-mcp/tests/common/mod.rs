//! Shared fixtures: a throwaway installation and mock ports.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docgate_core::{
    AssetPaths, CommandProbe, Invocation, ProcessOutput, ProcessRunner, ToolConfig,
};
use docgate_mcp::{Dispatcher, OperationContext};
use mockall::mock;
use tempfile::TempDir;

pub const STUB_TEMPLATE: &str =
    include_str!("../../../../assets/templates/TEMPLATE_Markdown_Stub.md");

mock! {
    pub Runner {}

    #[async_trait]
    impl ProcessRunner for Runner {
        async fn run(&self, invocation: &Invocation) -> ProcessOutput;
    }
}

mock! {
    pub Probe {}

    impl CommandProbe for Probe {
        fn is_available(&self, command: &str) -> bool;
    }
}

/// A runner that must never be called.
pub fn idle_runner() -> MockRunner {
    let mut runner = MockRunner::new();
    runner.expect_run().never();
    runner
}

/// A probe that answers the same for every command.
pub fn probe(available: bool) -> MockProbe {
    let mut probe = MockProbe::new();
    probe.expect_is_available().return_const(available);
    probe
}

/// Invocations seen by a recording runner.
pub type Calls = Arc<Mutex<Vec<Invocation>>>;

/// A temporary installation plus a workspace for user files.
pub struct Fixture {
    pub dir: TempDir,
    pub assets: AssetPaths,
    pub config: ToolConfig,
    pub work: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let install = dir.path().join("install");
        let assets = AssetPaths::under(&install);

        write(&assets.compiler_script, "print('compiled')\n");
        write(&assets.signature_template, "sig");
        write(&assets.content_template, "content");
        write(&assets.stub_template, STUB_TEMPLATE);
        write(&assets.markdown_guide, "# Markdown Style Guide\n");
        write(&assets.plantuml_guide, "# PlantUML Style Guide\n");

        let plantuml_dir = dir.path().join("plantuml");
        write(&AssetPaths::plantuml_archive(&plantuml_dir), "jar");

        let work = dir.path().join("work");
        fs::create_dir_all(&work).unwrap();

        let config = ToolConfig {
            python_path: "python3".into(),
            plantuml_path: plantuml_dir.to_string_lossy().into_owned(),
            pandoc_path: "pandoc".into(),
        };

        Self {
            dir,
            assets,
            config,
            work,
        }
    }

    /// Create a file under the workspace and return its absolute path.
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.work.join(relative);
        write(&path, contents);
        path
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work.join(relative)
    }

    pub fn archive(&self) -> PathBuf {
        AssetPaths::plantuml_archive(Path::new(&self.config.plantuml_path))
    }

    pub fn dispatcher(&self, runner: MockRunner, probe: MockProbe) -> Dispatcher {
        Dispatcher::new(OperationContext::new(
            self.config.clone(),
            self.assets.clone(),
            self.work.clone(),
            Arc::new(runner),
            Arc::new(probe),
        ))
    }
}

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

pub fn args(value: serde_json::Value) -> Option<serde_json::Value> {
    Some(value)
}
