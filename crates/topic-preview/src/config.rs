use std::env;
use std::time::Duration;

use forum_client::ForumClient;
use url::Url;

use crate::error::{Result, ServiceError};

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub forum_base_url: String,
    pub cors_origins: Vec<String>,
    pub sweep_interval: Duration,
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3005,
            forum_base_url: ForumClient::DEFAULT_BASE_URL.to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            sweep_interval: ttl_cache::DEFAULT_SWEEP_INTERVAL,
            json_logs: false,
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Parse configuration from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let forum_base_url = lookup("FORUM_BASE_URL").unwrap_or(defaults.forum_base_url);
        Url::parse(&forum_base_url)
            .map_err(|e| ServiceError::Config(format!("invalid FORUM_BASE_URL: {e}")))?;

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or(defaults.cors_origins);

        let sweep_interval = lookup("SWEEP_INTERVAL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.sweep_interval);

        let json_logs = lookup("LOG_FORMAT").is_some_and(|v| v == "json");

        Ok(Self {
            port,
            forum_base_url,
            cors_origins,
            sweep_interval,
            json_logs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3005);
        assert_eq!(config.forum_base_url, "https://forum.cfx.re");
        assert_eq!(config.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
        assert!(!config.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("FORUM_BASE_URL", "https://meta.discourse.org"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("SWEEP_INTERVAL_SECS", "60"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.forum_base_url, "https://meta.discourse.org");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert!(config.json_logs);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "not-a-port"),
            ("SWEEP_INTERVAL_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3005);
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_invalid_forum_url_is_rejected() {
        let result = Config::from_lookup(lookup(&[("FORUM_BASE_URL", "forum.cfx.re")]));
        assert!(matches!(result, Err(ServiceError::Config(_))));
    }
}
