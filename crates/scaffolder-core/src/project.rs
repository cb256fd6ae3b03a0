//! Scaffold request and the paths derived from it

use crate::error::ScaffoldError;
use crate::templates::MANIFEST_FILE;
use std::path::{Component, Path, PathBuf};

/// What the user asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    target_name: String,
    use_npm: bool,
    verbose: bool,
}

impl ScaffoldRequest {
    /// Build a request, rejecting an empty project directory
    pub fn new(
        target_name: impl Into<String>,
        use_npm: bool,
        verbose: bool,
    ) -> Result<Self, ScaffoldError> {
        let target_name = target_name.into();
        if target_name.trim().is_empty() {
            return Err(ScaffoldError::Usage(
                "Please specify the project directory".to_string(),
            ));
        }
        Ok(Self {
            target_name,
            use_npm,
            verbose,
        })
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Whether npm was forced with `--use-npm`
    pub fn use_npm(&self) -> bool {
        self.use_npm
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Absolute locations used by every stage after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub app_name: String,
    pub original_dir: PathBuf,
}

impl ResolvedPaths {
    /// Resolve the request against `cwd` without touching the filesystem
    pub fn resolve(request: &ScaffoldRequest, cwd: &Path) -> Result<Self, ScaffoldError> {
        let target = Path::new(request.target_name());
        let joined = if target.is_absolute() {
            target.to_path_buf()
        } else {
            cwd.join(target)
        };
        let root = normalize(&joined);

        let app_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ScaffoldError::Usage(format!(
                    "Cannot derive a project name from {}",
                    root.display()
                ))
            })?;

        Ok(Self {
            root,
            app_name,
            original_dir: cwd.to_path_buf(),
        })
    }

    /// Location of the cloned package manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }
}

/// Lexically collapse `.` and `..` so the root reads like a resolved path
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_target_is_usage_error() {
        assert!(matches!(
            ScaffoldRequest::new("", false, false),
            Err(ScaffoldError::Usage(_))
        ));
        assert!(ScaffoldRequest::new("   ", true, false).is_err());
    }

    #[test]
    fn test_resolve_relative_target() {
        let request = ScaffoldRequest::new("my-app", false, false).unwrap();
        let paths = ResolvedPaths::resolve(&request, Path::new("/work")).unwrap();

        assert_eq!(paths.root, PathBuf::from("/work/my-app"));
        assert_eq!(paths.app_name, "my-app");
        assert_eq!(paths.original_dir, PathBuf::from("/work"));
        assert_eq!(paths.manifest_path(), PathBuf::from("/work/my-app/package.json"));
    }

    #[test]
    fn test_resolve_collapses_dot_segments() {
        let request = ScaffoldRequest::new("./nested/../apps/./shop/", false, false).unwrap();
        let paths = ResolvedPaths::resolve(&request, Path::new("/work")).unwrap();

        assert_eq!(paths.root, PathBuf::from("/work/apps/shop"));
        assert_eq!(paths.app_name, "shop");
    }

    #[test]
    fn test_resolve_absolute_target_ignores_cwd() {
        let request = ScaffoldRequest::new("/srv/site", true, true).unwrap();
        let paths = ResolvedPaths::resolve(&request, Path::new("/work")).unwrap();

        assert_eq!(paths.root, PathBuf::from("/srv/site"));
        assert_eq!(paths.app_name, "site");
        assert!(request.use_npm());
        assert!(request.verbose());
    }

    #[test]
    fn test_resolve_filesystem_root_has_no_name() {
        let request = ScaffoldRequest::new("/", false, false).unwrap();
        assert!(ResolvedPaths::resolve(&request, Path::new("/work")).is_err());
    }
}
