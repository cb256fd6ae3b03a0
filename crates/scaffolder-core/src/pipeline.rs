//! Scaffolding pipeline
//!
//! One linear pass, each stage a hard dependency of the next:
//!
//! ```text
//! Init -> DirectoryCreated -> CloneComplete -> ManifestPatched
//!      -> ReachabilityKnown -> ManagerSelected -> InstallComplete
//! ```
//!
//! The first failure aborts the run. Nothing is retried and nothing written
//! so far is removed.

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::project::{ResolvedPaths, ScaffoldRequest};
use crate::report::Reporter;
use crate::runtime::check::{check_node_version, check_npm_can_read_cwd};
use crate::runtime::manager::{select_package_manager, PackageManagerChoice};
use crate::runtime::network::{check_if_online, HostResolver};
use crate::runtime::process::{CommandRunner, Invocation};
use crate::templates::{clone_template, rewrite_manifest, ManifestPatch};
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Pipeline states, in the order a successful run passes through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    DirectoryCreated,
    CloneComplete,
    ManifestPatched,
    ReachabilityKnown,
    ManagerSelected,
    InstallComplete,
}

impl Stage {
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Init => "resolving the project directory",
            Stage::DirectoryCreated => "project directory created",
            Stage::CloneComplete => "template cloned",
            Stage::ManifestPatched => "package.json updated",
            Stage::ReachabilityKnown => "registry reachability checked",
            Stage::ManagerSelected => "package manager selected",
            Stage::InstallComplete => "dependencies installed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    pub paths: ResolvedPaths,
    pub choice: PackageManagerChoice,
    /// Files in the cloned template, `.git` excluded
    pub template_files: usize,
}

/// Runs the pipeline against injectable process, DNS and output seams
pub struct Scaffolder<'a, C: ProductConfig> {
    config: &'a C,
    runner: &'a dyn CommandRunner,
    resolver: &'a dyn HostResolver,
    reporter: &'a dyn Reporter,
}

impl<'a, C: ProductConfig> Scaffolder<'a, C> {
    pub fn new(
        config: &'a C,
        runner: &'a dyn CommandRunner,
        resolver: &'a dyn HostResolver,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            config,
            runner,
            resolver,
            reporter,
        }
    }

    /// Scaffold `request`, resolving relative paths against `cwd`
    pub async fn run(
        &self,
        request: &ScaffoldRequest,
        cwd: &Path,
    ) -> Result<ScaffoldOutcome, ScaffoldError> {
        let paths = ResolvedPaths::resolve(request, cwd)?;

        fs::create_dir_all(&paths.root)
            .await
            .map_err(|source| ScaffoldError::CreateDirectory {
                path: paths.root.clone(),
                source,
            })?;
        enter(Stage::DirectoryCreated);
        self.reporter.info(&format!(
            "Creating a new {} project in {}",
            self.config.display_name(),
            paths.root.display()
        ));

        self.advise_node_version();
        check_npm_can_read_cwd(self.runner, &paths.root)?;

        let repository = self.config.template_repository();
        let template_files =
            clone_template(self.runner, self.reporter, &repository, &paths.root).await?;
        enter(Stage::CloneComplete);

        rewrite_manifest(
            &paths.manifest_path(),
            &ManifestPatch::for_app(&paths.app_name),
        )
        .await?;
        enter(Stage::ManifestPatched);

        let manager = select_package_manager(self.runner, request.use_npm());
        let online = check_if_online(
            manager,
            self.config.registry_host(),
            self.resolver,
            self.runner,
        )
        .await;
        enter(Stage::ReachabilityKnown);

        let choice = PackageManagerChoice::new(manager, online);
        info!(manager = %choice.manager, online, "package manager selected");
        enter(Stage::ManagerSelected);

        self.install(&choice, &paths.root, request.verbose()).await?;
        enter(Stage::InstallComplete);

        Ok(ScaffoldOutcome {
            paths,
            choice,
            template_files,
        })
    }

    /// Warn, without failing, when Node.js is older than the template wants
    fn advise_node_version(&self) {
        let Some(output) = self
            .runner
            .capture(&Invocation::new("node", ["--version"]))
        else {
            return;
        };

        if let Some(warning) = check_node_version(&output, self.config.minimum_node_version()) {
            self.reporter.warning(&warning);
        }
    }

    async fn install(
        &self,
        choice: &PackageManagerChoice,
        root: &Path,
        verbose: bool,
    ) -> Result<(), ScaffoldError> {
        if choice.offline() {
            self.reporter
                .warning("You appear to be offline. Installing from the yarn cache.");
            self.reporter
                .warning("If the install fails, clear the yarn cache and try again online.");
        }

        let invocation = choice.install_invocation(root, verbose).in_dir(root);
        self.reporter.info(&format!(
            "Installing packages with {}: {}",
            choice.manager,
            invocation.command_line()
        ));

        let result = self
            .runner
            .run(&invocation)
            .await
            .map_err(|source| ScaffoldError::Spawn {
                command: invocation.command_line(),
                source,
                stage: Stage::ManagerSelected,
            })?;

        if result.success() {
            Ok(())
        } else {
            Err(ScaffoldError::InstallFailed {
                command: result.command_line(),
                exit_code: result.exit_code,
            })
        }
    }
}

fn enter(stage: Stage) {
    debug!(stage = ?stage, "{}", stage);
}
