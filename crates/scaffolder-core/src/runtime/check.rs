//! Environment checks run before and around scaffolding

use super::process::{CommandRunner, Invocation};
use crate::error::ScaffoldError;
use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Line prefix `npm config list` uses to report its working directory
const NPM_CWD_PREFIX: &str = "; cwd = ";

/// Extract the working directory from `npm config list` output
pub fn parse_npm_cwd(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .find_map(|line| line.strip_prefix(NPM_CWD_PREFIX))
        .map(|dir| dir.trim_end_matches('\r').trim())
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

/// Verify a freshly started npm process would operate in `expected`.
///
/// Shell wrappers (e.g. a Windows AutoRun entry) can silently move npm
/// somewhere else. Anything short of a parsed, different directory passes.
pub fn check_npm_can_read_cwd(
    runner: &dyn CommandRunner,
    expected: &Path,
) -> Result<(), ScaffoldError> {
    let query = Invocation::new("npm", ["config", "list"]).in_dir(expected);

    let Some(output) = runner.capture(&query) else {
        debug!("npm config list could not run, skipping cwd check");
        return Ok(());
    };

    let Some(reported) = parse_npm_cwd(&output) else {
        debug!("no cwd line in npm config list output");
        return Ok(());
    };

    // npm reports the physical directory, so a symlinked root still matches
    let physical = std::fs::canonicalize(expected).ok();
    if reported == expected || physical.as_deref() == Some(reported.as_path()) {
        Ok(())
    } else {
        Err(ScaffoldError::WorkingDirectoryMismatch {
            expected: expected.to_path_buf(),
            reported,
        })
    }
}

/// Compare an installed Node.js version against the recommended minimum.
///
/// Returns a warning when `installed` is older; unparsable input gives no
/// warning.
pub fn check_node_version(installed: &str, minimum: &str) -> Option<String> {
    let installed_ver = parse_version(installed)?;
    let minimum_ver = parse_version(minimum)?;

    if installed_ver < minimum_ver {
        Some(format!(
            "You are using Node.js {}. Upgrade to {} or newer for a better experience.",
            installed_ver, minimum_ver
        ))
    } else {
        None
    }
}

/// Parse version output such as `v18.17.1\n`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).ok()
}

/// One line of the environment report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// Version text, or "Not Found"
    pub fn version_or_missing(&self) -> &str {
        self.version.as_deref().unwrap_or("Not Found")
    }
}

/// Query `program --version`
pub fn check_tool(runner: &dyn CommandRunner, name: &'static str, program: &str) -> RuntimeInfo {
    let version = runner
        .capture(&Invocation::new(program, ["--version"]))
        .and_then(|output| {
            output
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
        });

    RuntimeInfo {
        name,
        available: version.is_some(),
        version,
    }
}

/// Versions of the binaries the scaffolder depends on
pub fn check_binaries(runner: &dyn CommandRunner) -> Vec<RuntimeInfo> {
    vec![
        check_tool(runner, "Node", "node"),
        check_tool(runner, "npm", "npm"),
        check_tool(runner, "Yarn", "yarnpkg"),
        check_tool(runner, "Git", "git"),
    ]
}

#[derive(Deserialize)]
struct InstalledPackage {
    version: Option<String>,
}

/// Installed version of each package under `dir/node_modules`
pub fn installed_packages<'a>(dir: &Path, packages: &[&'a str]) -> Vec<(&'a str, Option<String>)> {
    packages
        .iter()
        .map(|&package| {
            let manifest = dir.join("node_modules").join(package).join("package.json");
            let version = std::fs::read_to_string(&manifest)
                .ok()
                .and_then(|content| serde_json::from_str::<InstalledPackage>(&content).ok())
                .and_then(|installed| installed.version);
            (package, version)
        })
        .collect()
}
