//! Runtime configuration.
//!
//! Settings come from `breakline.toml` (every section optional) and are then
//! overridden by environment variables, which may be supplied through a
//! `.env` file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use breakline_lib::{EgressConfig, ProxyEndpoint, ScrapingService, Upstream};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "breakline.toml";

/// Relay endpoint used when only an API key is supplied.
pub(crate) const DEFAULT_SCRAPER_ENDPOINT: &str = "https://api.scraperapi.com/";

const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// HTTP server settings.
    pub(crate) server: ServerConfig,
    /// Forecast provider location and window.
    pub(crate) upstream: Upstream,
    /// Outbound network identity.
    pub(crate) egress: EgressConfig,
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct ServerConfig {
    /// Socket address to listen on.
    pub(crate) bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration and applies process environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `breakline.toml` is read
    /// if present and defaults are used otherwise.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                tracing::debug!("no config file found, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a TOML config file.
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Applies overrides looked up through `var`.
    pub(crate) fn apply_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = var("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {port}"))?;
            let host = self
                .server
                .bind
                .rsplit_once(':')
                .map_or("0.0.0.0", |(host, _)| host);
            self.server.bind = format!("{host}:{port}");
        }

        if let Some(kind) = var("BREAKLINE_EGRESS") {
            self.egress.kind = kind.trim().parse()?;
        }

        let host = var("BREAKLINE_PROXY_HOST");
        let port = var("BREAKLINE_PROXY_PORT");
        let username = var("BREAKLINE_PROXY_USER");
        let password = var("BREAKLINE_PROXY_PASS");
        if host.is_some() || port.is_some() || username.is_some() || password.is_some() {
            let proxy = self.egress.proxy.get_or_insert_with(|| ProxyEndpoint {
                host: String::new(),
                port: 0,
                username: None,
                password: None,
            });
            if let Some(host) = host {
                proxy.host = host;
            }
            if let Some(port) = port {
                proxy.port = port
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid BREAKLINE_PROXY_PORT: {port}"))?;
            }
            if username.is_some() {
                proxy.username = username;
            }
            if password.is_some() {
                proxy.password = password;
            }
        }

        if let Some(api_key) = var("BREAKLINE_SCRAPER_KEY") {
            match &mut self.egress.scraping {
                Some(scraping) => scraping.api_key = api_key,
                None => {
                    self.egress.scraping = Some(ScrapingService {
                        endpoint: DEFAULT_SCRAPER_ENDPOINT.to_string(),
                        api_key,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakline_lib::EgressKind;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert_eq!(config.upstream, Upstream::default());
        assert_eq!(config.egress.kind, EgressKind::Direct);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
bind = "127.0.0.1:8080"

[upstream]
days = 2

[egress]
kind = "residential_proxy"
timeout_secs = 15

[egress.proxy]
host = "brd.superproxy.io"
port = 22225
username = "customer"
password = "secret"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.upstream.days, 2);
        assert_eq!(config.upstream.interval_hours, 1);
        assert_eq!(config.egress.kind, EgressKind::ResidentialProxy);
        assert_eq!(config.egress.timeout_secs, 15);
        assert_eq!(config.egress.connect_timeout_secs, 10);
        let proxy = config.egress.proxy.unwrap();
        assert_eq!(proxy.port, 22225);
        assert_eq!(proxy.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[egress]\nkind = \"carrier_pigeon\"\n").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_port_override_keeps_host() {
        let mut config = AppConfig::default();
        config.server.bind = "127.0.0.1:8080".to_string();
        config.apply_overrides(env(&[("PORT", "9000")])).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");

        assert!(config.apply_overrides(env(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn test_proxy_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[
                ("BREAKLINE_EGRESS", "socks5"),
                ("BREAKLINE_PROXY_HOST", "proxy.local"),
                ("BREAKLINE_PROXY_PORT", "1080"),
                ("BREAKLINE_PROXY_USER", "user"),
                ("BREAKLINE_PROXY_PASS", "pass"),
            ]))
            .unwrap();

        assert_eq!(config.egress.kind, EgressKind::Socks5Proxy);
        let proxy = config.egress.proxy.as_ref().unwrap();
        assert_eq!(proxy.host, "proxy.local");
        assert_eq!(proxy.port, 1080);
        assert_eq!(proxy.username.as_deref(), Some("user"));
        let debug = format!("{proxy:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("\"pass\""));
    }

    #[test]
    fn test_partial_proxy_override_keeps_file_values() {
        let mut config = AppConfig::default();
        config.egress.proxy = Some(ProxyEndpoint {
            host: "brd.superproxy.io".to_string(),
            port: 22225,
            username: Some("customer".to_string()),
            password: Some("old".to_string()),
        });
        config
            .apply_overrides(env(&[("BREAKLINE_PROXY_PASS", "new")]))
            .unwrap();

        let proxy = config.egress.proxy.unwrap();
        assert_eq!(proxy.host, "brd.superproxy.io");
        assert_eq!(proxy.username.as_deref(), Some("customer"));
        assert_eq!(proxy.password.as_deref(), Some("new"));
    }

    #[test]
    fn test_scraper_key_override() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[("BREAKLINE_SCRAPER_KEY", "k3y")]))
            .unwrap();
        let scraping = config.egress.scraping.unwrap();
        assert_eq!(scraping.endpoint, DEFAULT_SCRAPER_ENDPOINT);
        assert_eq!(scraping.api_key, "k3y");
    }

    #[test]
    fn test_unknown_egress_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(env(&[("BREAKLINE_EGRESS", "carrier_pigeon")]))
            .unwrap_err();
        assert!(err.to_string().contains("carrier_pigeon"));
    }
}
