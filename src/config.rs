//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_TTL_SECS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path of the cutoff dataset served by `/api/data`
    pub data_file: PathBuf,
    /// Directory served for non-API paths, if any
    pub static_dir: Option<PathBuf>,
    /// Lifetime of a cached entry in seconds
    pub cache_ttl: u64,
    /// Interval between expiry sweeps in seconds
    pub sweep_interval: u64,
    /// Requests a single client may make per rate-limit window
    pub rate_limit_max_requests: u32,
    /// Rate-limit window length in seconds
    pub rate_limit_window: u64,
    /// Domains allowed to call the API; empty allows every domain
    pub allowed_hosts: Vec<String>,
    /// Single allowed CORS origin; `None` allows any origin
    pub cors_origin: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATA_FILE` - Dataset path (default: data/cutoffs.json)
    /// - `STATIC_DIR` - Static file directory (default: unset)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 1800)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 600)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window per client (default: 100)
    /// - `RATE_LIMIT_WINDOW` - Window length in seconds (default: 900)
    /// - `ALLOWED_HOSTS` - Comma-separated domain list (default: empty, allow all)
    /// - `CORS_ORIGIN` - Allowed origin, `*` or unset for any (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            data_file: non_empty_var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            static_dir: non_empty_var("STATIC_DIR").map(PathBuf::from),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            sweep_interval: parse_var::<u64>("SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            rate_limit_max_requests: parse_var("RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or(defaults.rate_limit_max_requests),
            rate_limit_window: parse_var::<u64>("RATE_LIMIT_WINDOW")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.rate_limit_window),
            allowed_hosts: non_empty_var("ALLOWED_HOSTS")
                .map(|v| parse_host_list(&v))
                .unwrap_or_default(),
            cors_origin: non_empty_var("CORS_ORIGIN").filter(|v| v != "*"),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            data_file: PathBuf::from("data/cutoffs.json"),
            static_dir: None,
            cache_ttl: DEFAULT_TTL_SECS,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            rate_limit_max_requests: 100,
            rate_limit_window: 15 * 60,
            allowed_hosts: Vec::new(),
            cors_origin: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|v| v.parse().ok())
}

/// Splits a comma-separated domain list, lowercasing and dropping blanks.
pub fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, 1800);
        assert_eq!(config.sweep_interval, 600);
        assert_eq!(config.rate_limit_max_requests, 100);
        assert_eq!(config.rate_limit_window, 900);
        assert!(config.allowed_hosts.is_empty());
        assert!(config.cors_origin.is_none());
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_config_durations() {
        let config = Config::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(30 * 60));
        assert_eq!(config.sweep_interval(), Duration::from_secs(10 * 60));
        assert_eq!(config.rate_limit_window(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "SERVER_PORT",
            "DATA_FILE",
            "STATIC_DIR",
            "CACHE_TTL",
            "SWEEP_INTERVAL",
            "RATE_LIMIT_MAX_REQUESTS",
            "RATE_LIMIT_WINDOW",
            "ALLOWED_HOSTS",
            "CORS_ORIGIN",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.data_file, PathBuf::from("data/cutoffs.json"));
        assert_eq!(config.cache_ttl, 1800);
        assert_eq!(config.sweep_interval, 600);
        assert!(config.allowed_hosts.is_empty());
    }

    #[test]
    fn test_parse_host_list() {
        let hosts = parse_host_list(" Example.com, .cutoffs.in ,,localhost ");
        assert_eq!(hosts, vec!["example.com", "cutoffs.in", "localhost"]);
    }

    #[test]
    fn test_parse_host_list_blank() {
        assert!(parse_host_list(" , ").is_empty());
    }
}
