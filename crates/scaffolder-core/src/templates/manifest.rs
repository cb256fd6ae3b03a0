//! Package manifest rewriting

use crate::error::ScaffoldError;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// File name of the package manifest inside a cloned template
pub const MANIFEST_FILE: &str = "package.json";

/// Identity fields stamped onto the cloned manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    pub name: String,
    pub version: String,
    pub description: String,
    pub private: bool,
}

impl ManifestPatch {
    /// Fresh identity for a new app
    pub fn for_app(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: "0.1.0".to_string(),
            description: String::new(),
            private: true,
        }
    }

    /// Shallow-merge the patch over `manifest`.
    ///
    /// Patched keys always win; every other key is kept in its original
    /// position and new keys are appended.
    pub fn apply(&self, manifest: Value) -> Result<Value, String> {
        let Value::Object(mut map) = manifest else {
            return Err("expected a JSON object at the top level".to_string());
        };

        for (key, value) in self.entries() {
            map.insert(key.to_string(), value);
        }

        Ok(Value::Object(map))
    }

    fn entries(&self) -> [(&'static str, Value); 4] {
        [
            ("name", Value::String(self.name.clone())),
            ("version", Value::String(self.version.clone())),
            ("description", Value::String(self.description.clone())),
            ("private", Value::Bool(self.private)),
        ]
    }
}

/// Pretty-print a manifest with 2-space indentation and a trailing newline
pub fn render_manifest(manifest: &Value) -> String {
    let mut text = serde_json::to_string_pretty(manifest).unwrap_or_else(|_| "{}".to_string());
    text.push('\n');
    text
}

/// Read the manifest at `path`, apply `patch`, and write it back in place
pub async fn rewrite_manifest(path: &Path, patch: &ManifestPatch) -> Result<Value, ScaffoldError> {
    let manifest_error = |reason: String| ScaffoldError::Manifest {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| manifest_error(e.to_string()))?;
    let original: Value =
        serde_json::from_str(&content).map_err(|e| manifest_error(e.to_string()))?;

    let patched = patch.apply(original).map_err(manifest_error)?;

    fs::write(path, render_manifest(&patched))
        .await
        .map_err(|e| manifest_error(e.to_string()))?;

    Ok(patched)
}
