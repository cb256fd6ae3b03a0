//! Scaffolder Core - clone a template repository and install its dependencies
//!
//! This library sequences the side-effecting steps of creating a new front-end
//! project so that any step can fail on its own and leave the filesystem in a
//! state the user can understand.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - process seam, package manager selection,
//!   npm working-directory check, reachability check, cloning, manifest rewriting
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the `Scaffolder` pipeline
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based terminal output module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{report::SilentReporter, runtime, ScaffoldRequest, Scaffolder};
//!
//! let request = ScaffoldRequest::new("my-app", false, false)?;
//! let reporter = SilentReporter::new();
//! let scaffolder = Scaffolder::new(
//!     &MyConfig,
//!     &runtime::SystemRunner,
//!     &runtime::SystemResolver,
//!     &reporter,
//! );
//! let outcome = scaffolder.run(&request, &std::env::current_dir()?).await?;
//! ```

pub mod error;
pub mod pipeline;
pub mod product;
pub mod project;
pub mod report;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use pipeline::{ScaffoldOutcome, Scaffolder, Stage};
pub use product::ProductConfig;
pub use project::{ResolvedPaths, ScaffoldRequest};
pub use report::{Reporter, SilentReporter};
pub use runtime::{PackageManager, PackageManagerChoice};
pub use templates::ManifestPatch;

#[cfg(feature = "tui")]
pub use tui::run;
