//! Template repository cloning

use crate::error::ScaffoldError;
use crate::pipeline::Stage;
use crate::report::Reporter;
use crate::runtime::process::{CommandRunner, Invocation};
use std::path::Path;
use walkdir::WalkDir;

/// Build the `git clone` command for `repository` into `root`
pub fn clone_invocation(repository: &str, root: &Path) -> Invocation {
    Invocation::new(
        "git",
        [
            "clone".to_string(),
            repository.to_string(),
            root.display().to_string(),
        ],
    )
}

/// Clone the template into `root`, streaming git's own progress output.
///
/// Returns the number of template files (outside `.git`) now in `root`.
pub async fn clone_template(
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    repository: &str,
    root: &Path,
) -> Result<usize, ScaffoldError> {
    let invocation = clone_invocation(repository, root);
    reporter.spinner_start(&format!("Cloning template from {}", repository));

    let result = match runner.run(&invocation).await {
        Ok(result) => result,
        Err(source) => {
            reporter.spinner_stop(false, "clone template failed");
            return Err(ScaffoldError::Spawn {
                command: invocation.command_line(),
                source,
                stage: Stage::DirectoryCreated,
            });
        }
    };

    if !result.success() {
        reporter.spinner_stop(false, "clone template failed");
        return Err(ScaffoldError::CloneFailed {
            command: result.command_line(),
            exit_code: result.exit_code,
        });
    }

    let files = count_template_files(root);
    reporter.spinner_stop(true, &format!("clone template succeeded ({} files)", files));
    Ok(files)
}

/// Count regular files under `root`, skipping the `.git` directory
pub fn count_template_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != ".git")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Event, SilentReporter};
    use crate::testing::FakeRunner;

    const REPO: &str = "https://example.com/template.git";

    #[test]
    fn test_clone_invocation() {
        assert_eq!(
            clone_invocation(REPO, Path::new("/work/app")).command_line(),
            "git clone https://example.com/template.git /work/app"
        );
    }

    #[tokio::test]
    async fn test_clone_success_counts_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("app");
        let runner = FakeRunner::new().with_template_manifest("{}");
        let reporter = SilentReporter::new();

        let files = clone_template(&runner, &reporter, REPO, &root).await.unwrap();

        assert_eq!(files, 2);
        let events = reporter.events();
        assert_eq!(events.first().unwrap().0, Event::SpinnerStart);
        assert_eq!(events.last().unwrap().0, Event::SpinnerSucceeded);
    }

    #[tokio::test]
    async fn test_clone_failure_carries_command() {
        let runner = FakeRunner::new().with_exit_code("git", 128);
        let reporter = SilentReporter::new();

        let err = clone_template(&runner, &reporter, REPO, Path::new("/work/app"))
            .await
            .unwrap_err();

        match err {
            ScaffoldError::CloneFailed { command, exit_code } => {
                assert_eq!(command, "git clone https://example.com/template.git /work/app");
                assert_eq!(exit_code, 128);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(reporter.events().last().unwrap().0, Event::SpinnerFailed);
    }

    #[tokio::test]
    async fn test_missing_git_is_spawn_error() {
        let runner = FakeRunner::new().with_spawn_failure("git");
        let reporter = SilentReporter::new();

        let err = clone_template(&runner, &reporter, REPO, Path::new("/work/app"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Spawn { .. }));
    }

    #[test]
    fn test_count_skips_git_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/index.js"), "").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::write(dir.path().join(".gitignore"), "node_modules").unwrap();

        assert_eq!(count_template_files(dir.path()), 3);
    }
}
