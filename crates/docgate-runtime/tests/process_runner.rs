//! Real child-process tests for `TokioProcessRunner`.

#![cfg(unix)]

use std::time::{Duration, Instant};

use docgate_core::{Invocation, OutputStream, ProcessFailure, ProcessRunner};
use docgate_runtime::TokioProcessRunner;
use tempfile::tempdir;

#[tokio::test]
async fn captures_stdout_and_stderr() {
    let runner = TokioProcessRunner::new();
    let out = runner
        .run(&Invocation::direct(
            "/bin/sh",
            ["-c", "echo converted; echo 'a warning' >&2"],
        ))
        .await;

    assert!(out.success);
    assert_eq!(out.stdout.trim(), "converted");
    assert_eq!(out.stderr.trim(), "a warning");
    assert_eq!(out.error, None);
}

#[tokio::test]
async fn non_zero_exit_is_reported_with_streams() {
    let runner = TokioProcessRunner::new();
    let out = runner
        .run(&Invocation::direct(
            "/bin/sh",
            ["-c", "echo 'Traceback: boom' >&2; exit 3"],
        ))
        .await;

    assert!(!out.success);
    assert_eq!(out.error, Some(ProcessFailure::ExitStatus(Some(3))));
    assert!(out.stderr.contains("Traceback: boom"));
}

#[tokio::test]
async fn missing_program_is_command_not_found() {
    let runner = TokioProcessRunner::new();
    let out = runner
        .run(&Invocation::direct("docgate-no-such-program-4711", ["-v"]))
        .await;

    assert!(!out.success);
    assert!(out.is_command_not_found());
}

#[tokio::test]
async fn shell_unknown_command_is_command_not_found() {
    let runner = TokioProcessRunner::new();
    let out = runner
        .run(&Invocation::shell("docgate-no-such-alias-4711", ["-tsvg", "x.puml"]))
        .await;

    assert!(!out.success);
    assert_eq!(out.error, Some(ProcessFailure::CommandNotFound));
}

#[tokio::test]
async fn shell_failure_other_than_not_found_is_exit_status() {
    let runner = TokioProcessRunner::new();
    let out = runner.run(&Invocation::shell("exit", ["2"])).await;

    assert_eq!(out.error, Some(ProcessFailure::ExitStatus(Some(2))));
}

#[tokio::test]
async fn working_dir_and_env_are_applied() {
    let dir = tempdir().unwrap();
    let runner = TokioProcessRunner::new();
    let out = runner
        .run(
            &Invocation::direct("/bin/sh", ["-c", "pwd; echo \"$DOCGATE_TEST_VAR\""])
                .in_dir(dir.path())
                .with_env("DOCGATE_TEST_VAR", "from-env"),
        )
        .await;

    assert!(out.success);
    let mut lines = out.stdout.lines();
    let pwd = lines.next().unwrap();
    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(std::path::Path::new(pwd).canonicalize().unwrap(), expected);
    assert_eq!(lines.next(), Some("from-env"));
}

#[tokio::test]
async fn output_ceiling_kills_child_and_keeps_prefix() {
    let runner = TokioProcessRunner::new().with_output_limit(1024);
    let started = Instant::now();
    let out = runner
        .run(&Invocation::direct("/bin/sh", ["-c", "yes docgate"]))
        .await;

    assert!(!out.success);
    assert_eq!(
        out.error,
        Some(ProcessFailure::OutputLimitExceeded {
            stream: OutputStream::Stdout,
            limit: 1024
        })
    );
    assert_eq!(out.stdout.len(), 1024);
    assert!(out.stdout.starts_with("docgate\n"));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn timeout_kills_long_running_child() {
    let runner = TokioProcessRunner::new().with_timeout(Some(Duration::from_millis(200)));
    let started = Instant::now();
    let out = runner
        .run(&Invocation::direct("/bin/sh", ["-c", "echo started; sleep 30"]))
        .await;

    assert!(!out.success);
    assert_eq!(
        out.error,
        Some(ProcessFailure::TimedOut(Duration::from_millis(200)))
    );
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn stdin_is_closed() {
    let runner = TokioProcessRunner::new().with_timeout(Some(Duration::from_secs(10)));
    let out = runner
        .run(&Invocation::direct("/bin/sh", ["-c", "cat; echo done"]))
        .await;

    assert!(out.success);
    assert_eq!(out.stdout.trim(), "done");
}

#[tokio::test]
async fn shell_arguments_are_not_expanded() {
    let dir = tempdir().unwrap();
    let runner = TokioProcessRunner::new();
    let text = "$(touch PWNED) `touch PWNED2` $HOME it's";
    let out = runner
        .run(&Invocation::shell("printf", ["%s", text]).in_dir(dir.path()))
        .await;

    assert!(out.success, "{out:?}");
    assert_eq!(out.stdout, text);
    assert!(!dir.path().join("PWNED").exists());
    assert!(!dir.path().join("PWNED2").exists());
}
