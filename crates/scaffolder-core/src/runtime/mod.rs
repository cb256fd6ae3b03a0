//! External tooling: processes, package managers, environment checks
//!
//! This module provides:
//! - A process seam ([`CommandRunner`]) for git, npm and yarn
//! - Package manager selection and install command construction
//! - The npm working-directory check and environment reporting
//! - Registry reachability probing

pub mod check;
pub mod manager;
pub mod network;
pub mod process;

pub use check::{check_npm_can_read_cwd, parse_npm_cwd, RuntimeInfo};
pub use manager::{select_package_manager, PackageManager, PackageManagerChoice};
pub use network::{check_if_online, HostResolver, SystemResolver};
pub use process::{CommandRunner, Invocation, ProcessResult, SystemRunner};
