//! Recording fakes for the process and DNS seams

use crate::runtime::network::HostResolver;
use crate::runtime::process::{CommandRunner, Invocation, ProcessResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

/// Fake [`CommandRunner`] that never starts a process.
///
/// A successful `git clone` writes the configured manifest into the clone
/// target so later stages see a template tree.
#[derive(Default)]
pub struct FakeRunner {
    yarn_available: bool,
    exit_codes: HashMap<String, i32>,
    spawn_failures: HashSet<String>,
    captures: HashMap<String, (i32, String)>,
    template_manifest: Option<String>,
    runs: Mutex<Vec<Invocation>>,
    checks: Mutex<Vec<String>>,
    captured: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_yarn(mut self, available: bool) -> Self {
        self.yarn_available = available;
        self
    }

    /// Exit code returned by every `run` of `program`
    pub fn with_exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Make `run` of `program` fail as if the binary did not exist
    pub fn with_spawn_failure(mut self, program: &str) -> Self {
        self.spawn_failures.insert(program.to_string());
        self
    }

    /// Output returned by `capture` for an exact command line
    pub fn with_capture(mut self, command_line: &str, output: &str) -> Self {
        self.captures
            .insert(command_line.to_string(), (0, output.to_string()));
        self
    }

    /// Output of a command line that exits with `code`
    pub fn with_failed_capture(mut self, command_line: &str, code: i32, output: &str) -> Self {
        self.captures
            .insert(command_line.to_string(), (code, output.to_string()));
        self
    }

    pub fn with_template_manifest(mut self, manifest: &str) -> Self {
        self.template_manifest = Some(manifest.to_string());
        self
    }

    pub fn runs(&self) -> Vec<Invocation> {
        self.runs.lock().unwrap().clone()
    }

    pub fn run_lines(&self) -> Vec<String> {
        self.runs().iter().map(Invocation::command_line).collect()
    }

    pub fn checks(&self) -> Vec<String> {
        self.checks.lock().unwrap().clone()
    }

    pub fn captured(&self) -> Vec<Invocation> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessResult> {
        self.runs.lock().unwrap().push(invocation.clone());

        if self.spawn_failures.contains(&invocation.program) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", invocation.program),
            ));
        }

        let exit_code = self
            .exit_codes
            .get(&invocation.program)
            .copied()
            .unwrap_or(0);

        if exit_code == 0 && invocation.program == "git" {
            if let (Some(manifest), Some(target)) =
                (&self.template_manifest, invocation.args.last())
            {
                let target = PathBuf::from(target);
                std::fs::create_dir_all(&target)?;
                std::fs::write(target.join("package.json"), manifest)?;
                std::fs::write(target.join("README.md"), "# template\n")?;
            }
        }

        Ok(ProcessResult::from_invocation(invocation, exit_code))
    }

    fn succeeds(&self, invocation: &Invocation) -> bool {
        self.checks.lock().unwrap().push(invocation.command_line());
        invocation.program == "yarnpkg" && self.yarn_available
    }

    fn capture(&self, invocation: &Invocation) -> Option<String> {
        self.captured.lock().unwrap().push(invocation.clone());
        self.captures
            .get(&invocation.command_line())
            .map(|(_, output)| output.clone())
    }

    fn capture_stdout(&self, invocation: &Invocation) -> Option<String> {
        self.captured.lock().unwrap().push(invocation.clone());
        match self.captures.get(&invocation.command_line()) {
            Some((0, output)) => Some(output.clone()),
            _ => None,
        }
    }
}

/// Fake [`HostResolver`] with a fixed set of resolvable hosts
#[derive(Default)]
pub struct FakeResolver {
    resolvable: HashSet<String>,
    lookups: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn new<'a>(hosts: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            resolvable: hosts.into_iter().map(str::to_string).collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostResolver for FakeResolver {
    async fn resolves(&self, host: &str) -> bool {
        self.lookups.lock().unwrap().push(host.to_string());
        self.resolvable.contains(host)
    }
}
