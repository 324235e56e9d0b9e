//! Drives the built `docgate` binary against a throwaway installation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const STUB_TEMPLATE: &str = include_str!("../../../assets/templates/TEMPLATE_Markdown_Stub.md");
const COMPILER: &str = include_str!("../../../assets/compiler/generate_document.py");

struct Install {
    dir: TempDir,
}

impl Install {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let install = Self { dir };
        install.write("install/assets/compiler/generate_document.py", COMPILER);
        install.write("install/assets/templates/TEMPLATE_Markdown_Stub.md", STUB_TEMPLATE);
        install.write(
            "config.json",
            r#"{"pythonPath": "python3", "plantumlPath": "/nonexistent/plantuml", "pandocPath": "pandoc"}"#,
        );
        fs::create_dir_all(install.path("work")).unwrap();
        install
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_docgate"));
        cmd.env("DOCGATE_RESOURCE_DIR", self.path("install"))
            .env("DOCGATE_CONFIG", self.path("config.json"))
            .env_remove("DOCGATE_PROCESS_TIMEOUT")
            .env_remove("RUST_LOG")
            .current_dir(self.path("work"));
        cmd
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn paths_reports_overrides() {
    let install = Install::new();
    let output = install.command().arg("paths").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains(&format!(
        "config_file = {}",
        install.path("config.json").display()
    )));
    assert!(text.contains(&format!(
        "resource_root = {}",
        install.path("install").display()
    )));
}

#[test]
fn check_config_accepts_installation_with_warnings() {
    let install = Install::new();
    let output = install.command().arg("check-config").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("valid = true"));
    assert!(text.contains("warning: PlantUML directory not found"));
}

#[test]
fn missing_keys_exit_with_ex_config() {
    let install = Install::new();
    install.write("config.json", r#"{"pythonPath": "python3"}"#);

    let output = install.command().arg("check-config").output().unwrap();
    assert_eq!(output.status.code(), Some(78));
    let err = stderr(&output);
    assert!(err.contains("plantumlPath"));
    assert!(err.contains("pandocPath"));
}

#[test]
fn bundled_compiler_takes_input_output_and_templates() {
    assert!(COMPILER.starts_with("#!/usr/bin/env python3"));
    for arg in 1..=4 {
        assert!(COMPILER.contains(&format!("sys.argv[{arg}]")), "argv[{arg}] unused");
    }
}

#[test]
fn serve_refuses_to_start_without_compiler() {
    let install = Install::new();
    fs::remove_file(install.path("install/assets/compiler/generate_document.py")).unwrap();

    let output = install
        .command()
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(78));
    assert!(stderr(&output).contains("compiler script not found"));
    assert!(output.stdout.is_empty());
}

#[test]
fn serve_answers_over_stdio() {
    let install = Install::new();
    let mut child = install
        .command()
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(
            stdin,
            r#"{{"jsonrpc":"2.0","id":1,"method":"initialize","params":{{"protocolVersion":"2024-11-05"}}}}"#
        )
        .unwrap();
        writeln!(stdin, r#"{{"jsonrpc":"2.0","method":"notifications/initialized"}}"#).unwrap();
        writeln!(
            stdin,
            r#"{{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{{"name":"generate-stub","arguments":{{"output_path":"draft.md","title":"Draft"}}}}}}"#
        )
        .unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let responses: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2, "stdout must carry only responses");

    let stub = responses.iter().find(|r| r["id"] == 2).unwrap();
    assert_eq!(stub["result"]["isError"], false);
    assert!(is_stub(&install.path("work/draft.md")));
}

fn is_stub(path: &Path) -> bool {
    fs::read_to_string(path).is_ok_and(|text| text.starts_with("---\n") && text.contains("title: Draft"))
}
