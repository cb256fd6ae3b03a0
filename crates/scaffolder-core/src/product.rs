//! Product configuration trait for CLI binaries
//!
//! Each binary built on this library implements [`ProductConfig`] to describe
//! which template repository it clones and how it presents itself.

/// Configuration trait for scaffolding products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Template repository and its environment override
/// - Registry host used for the reachability check
/// - Environment report contents
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Git URL of the template repository cloned into new projects
    fn default_template_repository(&self) -> &'static str;

    /// Environment variable name for overriding the template repository
    fn template_repository_env(&self) -> &'static str;

    /// Registry host resolved to decide whether yarn can install online
    fn registry_host(&self) -> &'static str {
        "registry.yarnpkg.com"
    }

    /// Where users should report problems
    fn issues_url(&self) -> &'static str;

    /// Packages whose installed versions are listed by `--info`
    fn info_packages(&self) -> &'static [&'static str] {
        &[]
    }

    /// Oldest Node.js release the template is known to work with
    fn minimum_node_version(&self) -> &'static str {
        "6.0.0"
    }

    /// Template repository, honoring the environment override when it is set
    fn template_repository(&self) -> String {
        std::env::var(self.template_repository_env())
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.default_template_repository().to_string())
    }
}
