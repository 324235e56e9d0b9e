//! Platform shell selection for command lines that rely on user aliases.
//!
//! On Unix the operator's `$SHELL` is used (falling back to `/bin/sh`) so
//! launcher scripts and aliases on its PATH resolve. On Windows PowerShell is
//! preferred when `PSModulePath` is set, otherwise `cmd.exe`.

use tokio::process::Command;

/// Exit code a POSIX shell reports for an unknown command.
pub(crate) const POSIX_NOT_FOUND: i32 = 127;

/// Exit code `cmd.exe` reports for an unknown command.
pub(crate) const CMD_NOT_FOUND: i32 = 9009;

/// Which shell a command line is handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellKind {
    /// POSIX shell invoked as `<shell> -c <line>`.
    Posix(String),
    PowerShell,
    Cmd,
}

impl ShellKind {
    /// Pick the shell for this platform from the given environment lookup.
    pub fn detect(var: impl Fn(&str) -> Option<String>) -> Self {
        if cfg!(windows) {
            if var("PSModulePath").is_some_and(|v| !v.is_empty()) {
                Self::PowerShell
            } else {
                Self::Cmd
            }
        } else {
            let shell = var("SHELL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "/bin/sh".to_string());
            Self::Posix(shell)
        }
    }

    /// Whether `code` means the shell could not find the command.
    pub const fn is_not_found_code(&self, code: i32) -> bool {
        match self {
            Self::Posix(_) => code == POSIX_NOT_FOUND,
            Self::Cmd => code == CMD_NOT_FOUND,
            Self::PowerShell => false,
        }
    }

    pub fn program(&self) -> &str {
        match self {
            Self::Posix(shell) => shell,
            Self::PowerShell => "powershell.exe",
            Self::Cmd => "cmd.exe",
        }
    }
}

impl ShellKind {
    /// Join `program` and quoted `args` into a line this shell runs without
    /// expanding anything inside the arguments.
    pub fn command_line(&self, program: &str, args: &[String]) -> String {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&self.quote(arg));
        }
        line
    }

    fn quote(&self, arg: &str) -> String {
        match self {
            // Nothing is special inside single quotes; a quote closes, is
            // escaped, and reopens.
            Self::Posix(_) => format!("'{}'", arg.replace('\'', r"'\''")),
            Self::PowerShell => format!("'{}'", arg.replace('\'', "''")),
            // cmd expands %VAR% even inside double quotes; a caret outside
            // the quotes keeps the percent sign literal.
            Self::Cmd => format!("\"{}\"", arg.replace('"', "").replace('%', "\"^%\"")),
        }
    }
}

/// Build a command that runs `program` with `args` through `shell`.
pub fn shell_command(shell: &ShellKind, program: &str, args: &[String]) -> Command {
    let command_line = shell.command_line(program, args);
    let command_line = command_line.as_str();
    let mut cmd = Command::new(shell.program());
    match shell {
        ShellKind::Posix(_) => {
            cmd.arg("-c").arg(command_line);
        }
        ShellKind::PowerShell => {
            cmd.args(["-NoLogo", "-NoProfile", "-Command", command_line]);
        }
        ShellKind::Cmd => {
            cmd.args(["/C", command_line]);
        }
    }
    cmd
}
