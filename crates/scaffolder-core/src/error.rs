//! Error taxonomy for a scaffolding run

use crate::pipeline::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a scaffolding run can abort
///
/// All variants are fatal: nothing is retried and files written before the
/// failure are left on disk.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The request itself was unusable (e.g. an empty project directory)
    #[error("{0}")]
    Usage(String),

    #[error("failed to create project directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// npm would run in a different directory than the one being scaffolded
    #[error(
        "could not start an npm process in the right directory \
         (expected {}, npm runs in {})",
        expected.display(),
        reported.display()
    )]
    WorkingDirectoryMismatch { expected: PathBuf, reported: PathBuf },

    #[error("cloning the template failed ({command} exited with code {exit_code}), please check your network")]
    CloneFailed { command: String, exit_code: i32 },

    #[error("invalid package manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("installing dependencies failed ({command} exited with code {exit_code})")]
    InstallFailed { command: String, exit_code: i32 },

    /// A child process could not be started at all
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
        stage: Stage,
    },
}

impl ScaffoldError {
    /// The last stage the run reached before aborting
    pub fn stage(&self) -> Stage {
        match self {
            ScaffoldError::Usage(_) | ScaffoldError::CreateDirectory { .. } => Stage::Init,
            ScaffoldError::WorkingDirectoryMismatch { .. } | ScaffoldError::CloneFailed { .. } => {
                Stage::DirectoryCreated
            }
            ScaffoldError::Manifest { .. } => Stage::CloneComplete,
            ScaffoldError::InstallFailed { .. } => Stage::ManagerSelected,
            ScaffoldError::Spawn { stage, .. } => *stage,
        }
    }

    /// Process exit status the binary should report for this failure
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Exact command line of the failed child process, if one was involved
    pub fn command(&self) -> Option<&str> {
        match self {
            ScaffoldError::CloneFailed { command, .. }
            | ScaffoldError::InstallFailed { command, .. }
            | ScaffoldError::Spawn { command, .. } => Some(command),
            _ => None,
        }
    }
}
