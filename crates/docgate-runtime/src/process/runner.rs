//! Tokio-backed implementation of the `ProcessRunner` port.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use docgate_core::{
    DEFAULT_OUTPUT_LIMIT, Invocation, ProcessFailure, ProcessOutput, ProcessRunner,
};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::capture::{Captured, drain};
use super::shell::{ShellKind, shell_command};

/// Runs converters as child processes.
///
/// Every child gets a null stdin, piped stdout/stderr and `kill_on_drop`, so
/// a cancelled request never leaves a converter running.
#[derive(Debug, Clone)]
pub struct TokioProcessRunner {
    timeout: Option<Duration>,
    output_limit: usize,
    shell: ShellKind,
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioProcessRunner {
    /// Runner with no timeout and the default output ceiling.
    pub fn new() -> Self {
        Self {
            timeout: None,
            output_limit: DEFAULT_OUTPUT_LIMIT,
            shell: ShellKind::detect(|key| std::env::var(key).ok()),
        }
    }

    /// Kill children that run longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-stream capture ceiling in bytes.
    #[must_use]
    pub const fn with_output_limit(mut self, limit: usize) -> Self {
        self.output_limit = limit;
        self
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub const fn output_limit(&self) -> usize {
        self.output_limit
    }

    fn build_command(&self, invocation: &Invocation) -> (Command, String) {
        let (mut cmd, program) = match invocation {
            Invocation::Direct { program, args, .. } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                (cmd, program.clone())
            }
            Invocation::Shell { program, args, .. } => (
                shell_command(&self.shell, program, args),
                self.shell.program().to_string(),
            ),
        };

        if let Some(dir) = invocation.working_dir() {
            cmd.current_dir(dir);
        }
        for (key, value) in invocation.env() {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        (cmd, program)
    }

    /// Capture output and wait for exit, bounded by the output ceiling.
    async fn drive(
        child: &mut Child,
        limit: usize,
        captured: &mut Captured,
    ) -> Result<ExitStatus, ProcessFailure> {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        drain(stdout, stderr, limit, captured).await?;
        child
            .wait()
            .await
            .map_err(|e| ProcessFailure::Io(e.to_string()))
    }

    fn classify(&self, invocation: &Invocation, status: ExitStatus) -> Option<ProcessFailure> {
        if status.success() {
            return None;
        }
        match status.code() {
            Some(code) if invocation.is_shell() && self.shell.is_not_found_code(code) => {
                Some(ProcessFailure::CommandNotFound)
            }
            code => Some(ProcessFailure::ExitStatus(code)),
        }
    }
}

fn spawn_failure(program: &str, err: &io::Error) -> ProcessFailure {
    if err.kind() == io::ErrorKind::NotFound {
        ProcessFailure::CommandNotFound
    } else {
        ProcessFailure::SpawnFailed {
            program: program.to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &Invocation) -> ProcessOutput {
        let (mut cmd, program) = self.build_command(invocation);
        debug!(command = %invocation, "Spawning process");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                let failure = spawn_failure(&program, &e);
                warn!(command = %invocation, error = %e, "Failed to spawn process");
                return ProcessOutput::failed(failure);
            }
        };

        let mut captured = Captured::default();
        let result = {
            let fut = Self::drive(&mut child, self.output_limit, &mut captured);
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, fut)
                    .await
                    .unwrap_or(Err(ProcessFailure::TimedOut(limit))),
                None => fut.await,
            }
        };

        let error = match result {
            Ok(status) => self.classify(invocation, status),
            Err(failure) => {
                // Overflow, timeout or pipe error: the child may still be running
                if let Err(e) = child.kill().await {
                    debug!(error = %e, "Child already exited");
                }
                Some(failure)
            }
        };

        if let Some(failure) = &error {
            warn!(command = %invocation, %failure, "Process did not succeed");
        } else {
            debug!(command = %invocation, "Process completed");
        }

        ProcessOutput {
            success: error.is_none(),
            stdout: captured.stdout_text(),
            stderr: captured.stderr_text(),
            error,
        }
    }
}
