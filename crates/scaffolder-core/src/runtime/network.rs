//! Registry reachability probing
//!
//! A DNS lookup stands in for "can we install online". Behind a proxy the
//! registry usually does not resolve directly, so the proxy host is resolved
//! instead.

use super::manager::PackageManager;
use super::process::{CommandRunner, Invocation};
use async_trait::async_trait;
use tokio::net::lookup_host;
use tracing::debug;
use url::Url;

/// Environment variable holding the HTTPS proxy
pub const PROXY_ENV: &str = "https_proxy";

/// Answers whether a host name resolves
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolves(&self, host: &str) -> bool;
}

/// [`HostResolver`] using the system resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolves(&self, host: &str) -> bool {
        match lookup_host((host, 443)).await {
            Ok(mut addrs) => addrs.next().is_some(),
            Err(e) => {
                debug!(host, error = %e, "lookup failed");
                false
            }
        }
    }
}

/// Decide whether `manager` can reach its registry. Never fails.
///
/// npm is assumed to cope with being offline on its own, so nothing is looked up
/// for it.
pub async fn check_if_online(
    manager: PackageManager,
    registry_host: &str,
    resolver: &dyn HostResolver,
    runner: &dyn CommandRunner,
) -> bool {
    let proxy_env = std::env::var(PROXY_ENV).ok();
    check_if_online_with_proxy(manager, registry_host, resolver, runner, proxy_env).await
}

/// [`check_if_online`] with the proxy environment value passed in
pub async fn check_if_online_with_proxy(
    manager: PackageManager,
    registry_host: &str,
    resolver: &dyn HostResolver,
    runner: &dyn CommandRunner,
    proxy_env: Option<String>,
) -> bool {
    if manager != PackageManager::Yarn {
        return true;
    }

    if resolver.resolves(registry_host).await {
        debug!(registry_host, "registry resolved");
        return true;
    }

    let Some(proxy) = get_proxy(proxy_env, runner) else {
        debug!(registry_host, "registry unresolved and no proxy configured");
        return false;
    };

    match proxy_host(&proxy) {
        Some(host) => {
            let online = resolver.resolves(&host).await;
            debug!(proxy = %proxy, host = %host, online, "resolved proxy instead of registry");
            online
        }
        None => false,
    }
}

/// Configured HTTPS proxy: the environment first, then npm's own config
pub fn get_proxy(proxy_env: Option<String>, runner: &dyn CommandRunner) -> Option<String> {
    if let Some(proxy) = proxy_env.filter(|value| !value.trim().is_empty()) {
        return Some(proxy);
    }

    // a failing query means no usable proxy, whatever it printed
    let output =
        runner.capture_stdout(&Invocation::new("npm", ["config", "get", "https-proxy"]))?;
    let value = output.lines().map(str::trim).find(|line| !line.is_empty())?;
    match value {
        "null" | "undefined" => None,
        proxy => Some(proxy.to_string()),
    }
}

/// Host name of a proxy URL, tolerating a missing scheme
pub fn proxy_host(proxy: &str) -> Option<String> {
    let host_of = |candidate: &str| {
        Url::parse(candidate)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .filter(|host| !host.is_empty())
    };

    host_of(proxy).or_else(|| host_of(&format!("http://{}", proxy)))
}
