//! Package manager selection and install command construction

use super::process::{CommandRunner, Invocation};
use std::fmt;
use std::path::Path;

/// Package managers the template can be installed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Preferred when its binary is available
    Yarn,
    /// Fallback, or forced with `--use-npm`
    Npm,
}

impl PackageManager {
    /// Binary invoked for this manager
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarnpkg",
            PackageManager::Npm => "npm",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "Yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Command a user runs afterwards to start the dev server
    pub fn start_command(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn start",
            PackageManager::Npm => "npm start",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Pick the manager for this run.
///
/// npm is used unconditionally when forced; otherwise yarn wins whenever
/// `yarnpkg --version` succeeds.
pub fn select_package_manager(runner: &dyn CommandRunner, use_npm: bool) -> PackageManager {
    if use_npm {
        return PackageManager::Npm;
    }

    let version_check = Invocation::new(PackageManager::Yarn.binary(), ["--version"]);
    if runner.succeeds(&version_check) {
        PackageManager::Yarn
    } else {
        PackageManager::Npm
    }
}

/// The manager decided for this run together with the registry verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageManagerChoice {
    pub manager: PackageManager,
    /// Only meaningful for yarn; npm is always treated as online
    pub online: bool,
}

impl PackageManagerChoice {
    pub fn new(manager: PackageManager, online: bool) -> Self {
        Self { manager, online }
    }

    /// Whether yarn must install from its offline cache
    pub fn offline(&self) -> bool {
        self.manager == PackageManager::Yarn && !self.online
    }

    /// Build the install command aimed at `root`
    pub fn install_invocation(&self, root: &Path, verbose: bool) -> Invocation {
        let root = root.display().to_string();
        let mut args = vec!["install".to_string()];

        match self.manager {
            PackageManager::Yarn => {
                if self.offline() {
                    args.push("--offline".to_string());
                }
                args.push("--cwd".to_string());
                args.push(root);
            }
            PackageManager::Npm => {
                args.push("--prefix".to_string());
                args.push(root);
                if verbose {
                    args.push("--verbose".to_string());
                }
            }
        }

        Invocation::new(self.manager.binary(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRunner;

    #[test]
    fn test_use_npm_skips_yarn_check() {
        let runner = FakeRunner::new().with_yarn(true);
        assert_eq!(select_package_manager(&runner, true), PackageManager::Npm);
        assert!(runner.checks().is_empty());
    }

    #[test]
    fn test_yarn_selected_when_available() {
        let runner = FakeRunner::new().with_yarn(true);
        assert_eq!(select_package_manager(&runner, false), PackageManager::Yarn);
        assert_eq!(runner.checks(), vec!["yarnpkg --version".to_string()]);
    }

    #[test]
    fn test_npm_fallback_when_yarn_missing() {
        let runner = FakeRunner::new().with_yarn(false);
        assert_eq!(select_package_manager(&runner, false), PackageManager::Npm);
    }

    #[test]
    fn test_yarn_install_online() {
        let choice = PackageManagerChoice::new(PackageManager::Yarn, true);
        let invocation = choice.install_invocation(Path::new("/work/app"), true);

        assert_eq!(invocation.program, "yarnpkg");
        assert_eq!(invocation.args, vec!["install", "--cwd", "/work/app"]);
    }

    #[test]
    fn test_yarn_install_offline() {
        let choice = PackageManagerChoice::new(PackageManager::Yarn, false);
        assert!(choice.offline());
        assert_eq!(
            choice.install_invocation(Path::new("/work/app"), false).command_line(),
            "yarnpkg install --offline --cwd /work/app"
        );
    }

    #[test]
    fn test_npm_install_never_offline() {
        let choice = PackageManagerChoice::new(PackageManager::Npm, false);
        assert!(!choice.offline());
        assert_eq!(
            choice.install_invocation(Path::new("/abs/path/my-app"), false).command_line(),
            "npm install --prefix /abs/path/my-app"
        );
        assert_eq!(
            choice.install_invocation(Path::new("/abs/path/my-app"), true).command_line(),
            "npm install --prefix /abs/path/my-app --verbose"
        );
    }
}
