//! External process invocation
//!
//! Every git, npm and yarn call goes through [`CommandRunner`] so the pipeline
//! never spawns anything directly.

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// A program, its arguments and the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Run the program in `dir` instead of the inherited working directory
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// The command line as a user would type it, for diagnostics
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    fn std_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Outcome of a child process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Exit code, or -1 when the child was terminated by a signal
    pub exit_code: i32,
    pub command: String,
    pub args: Vec<String>,
}

impl ProcessResult {
    pub fn from_invocation(invocation: &Invocation, exit_code: i32) -> Self {
        Self {
            exit_code,
            command: invocation.program.clone(),
            args: invocation.args.clone(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Starts external programs on behalf of the pipeline
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Spawn with inherited stdio and wait until the child exits.
    ///
    /// Only a failure to start the child is an error; a non-zero exit is
    /// reported through [`ProcessResult::exit_code`].
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessResult>;

    /// Run to completion with all output discarded; true on a zero exit
    fn succeeds(&self, invocation: &Invocation) -> bool;

    /// Run to completion and return stdout followed by stderr.
    ///
    /// `None` when the program could not be started.
    fn capture(&self, invocation: &Invocation) -> Option<String>;

    /// Run to completion and return stdout alone.
    ///
    /// `None` when the program could not be started or exited non-zero.
    fn capture_stdout(&self, invocation: &Invocation) -> Option<String>;
}

/// [`CommandRunner`] backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessResult> {
        debug!(command = %invocation, cwd = ?invocation.cwd, "spawning");

        let mut command = TokioCommand::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }

        let status = command.status().await?;
        let exit_code = status.code().unwrap_or(-1);
        debug!(command = %invocation, exit_code, "child exited");

        Ok(ProcessResult::from_invocation(invocation, exit_code))
    }

    fn succeeds(&self, invocation: &Invocation) -> bool {
        let ok = invocation
            .std_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        debug!(command = %invocation, ok, "exit status check");
        ok
    }

    fn capture(&self, invocation: &Invocation) -> Option<String> {
        let output = invocation
            .std_command()
            .stdin(Stdio::null())
            .output()
            .ok()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!(command = %invocation, bytes = text.len(), "captured output");
        Some(text)
    }

    fn capture_stdout(&self, invocation: &Invocation) -> Option<String> {
        let output = invocation
            .std_command()
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            debug!(command = %invocation, status = ?output.status.code(), "query failed");
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_args() {
        let invocation = Invocation::new("npm", ["install", "--prefix", "/work/app"]);
        assert_eq!(invocation.command_line(), "npm install --prefix /work/app");
        assert_eq!(invocation.to_string(), "npm install --prefix /work/app");

        let bare = Invocation::new("git", Vec::<String>::new());
        assert_eq!(bare.command_line(), "git");
    }

    #[test]
    fn test_in_dir_sets_cwd() {
        let invocation = Invocation::new("npm", ["config", "list"]).in_dir(Path::new("/work/app"));
        assert_eq!(invocation.cwd, Some(PathBuf::from("/work/app")));
    }

    #[test]
    fn test_process_result_keeps_invocation() {
        let invocation = Invocation::new("git", ["clone", "repo", "/work/app"]);
        let result = ProcessResult::from_invocation(&invocation, 128);

        assert!(!result.success());
        assert_eq!(result.command, "git");
        assert_eq!(result.command_line(), "git clone repo /work/app");
    }

    #[test]
    fn test_missing_program_cannot_be_checked_or_captured() {
        let invocation = Invocation::new("definitely-not-a-real-binary-7f3a", ["--version"]);
        assert!(!SystemRunner.succeeds(&invocation));
        assert!(SystemRunner.capture(&invocation).is_none());
        assert!(SystemRunner.capture_stdout(&invocation).is_none());
    }

    #[tokio::test]
    async fn test_run_missing_program_is_spawn_error() {
        let invocation = Invocation::new("definitely-not-a-real-binary-7f3a", ["install"]);
        assert!(SystemRunner.run(&invocation).await.is_err());
    }
}
