//! Template cloning and manifest rewriting
//!
//! This module provides:
//! - Cloning the template repository with git
//! - Stamping the new project's identity onto the cloned `package.json`

pub mod cloner;
pub mod manifest;

pub use cloner::{clone_template, count_template_files};
pub use manifest::{rewrite_manifest, ManifestPatch, MANIFEST_FILE};
