//! Server configuration from command-line flags and environment.

use anyhow::{bail, Context, Result};
use clap::Parser;
use jargon_core::default_log_level;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

/// Runtime settings for `jargon-server`.
///
/// Every flag can also be supplied through its `JARGON_*` environment
/// variable; flags win over the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jargon-server",
    version,
    about = "HTTP API over the Jargon Buster term store"
)]
pub struct ServerConfig {
    /// SQLite database file; created when absent.
    #[arg(long, env = "JARGON_DB_PATH", default_value = "terms.db")]
    pub db_path: PathBuf,

    #[arg(long, env = "JARGON_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "JARGON_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Prefix the `/terms` routes are mounted under; empty mounts at root.
    #[arg(long, env = "JARGON_BASE_PATH", default_value = "/api")]
    pub base_path: String,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "JARGON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset.
    #[arg(long, env = "JARGON_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| default_log_level())
    }

    /// Resolves `host:port`; host names such as `localhost` are looked up.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| {
                format!(
                    "bind address {}:{} resolved to nothing",
                    self.host, self.port
                )
            })
    }

    /// Base path normalized to `""` or `/segment[/segment...]` without a
    /// trailing slash.
    pub fn base_path(&self) -> Result<String> {
        normalize_base_path(&self.base_path)
    }
}

fn normalize_base_path(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        bail!("base path must start with `/`, got `{raw}`");
    }
    if trimmed.contains(['{', '}', '*']) {
        bail!("base path must be a literal path, got `{raw}`");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_base_path, ServerConfig};
    use clap::Parser;

    #[test]
    fn defaults_listen_on_3000_under_api() {
        let config = ServerConfig::try_parse_from(["jargon-server"]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.base_path().unwrap(), "/api");
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path("/").unwrap(), "");
        assert_eq!(normalize_base_path("").unwrap(), "");
        assert_eq!(normalize_base_path("/v1/").unwrap(), "/v1");
        assert!(normalize_base_path("api").is_err());
        assert!(normalize_base_path("/{id}").is_err());
    }

    #[test]
    fn host_names_are_resolved() {
        let config =
            ServerConfig::try_parse_from(["jargon-server", "--host", "localhost"]).unwrap();
        let addr = config.bind_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let config = ServerConfig::try_parse_from(["jargon-server"]).unwrap();
        assert_eq!(config.log_level(), jargon_core::default_log_level());

        let config =
            ServerConfig::try_parse_from(["jargon-server", "--log-level", "warn"]).unwrap();
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn invalid_host_is_reported() {
        let config =
            ServerConfig::try_parse_from(["jargon-server", "--host", "not a host"]).unwrap();
        assert!(config.bind_addr().is_err());
    }
}
