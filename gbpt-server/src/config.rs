//! Process configuration, read from the environment at startup.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::logging::LogFormat;
use crate::mbta::MbtaConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Upstream client settings
    pub mbta: MbtaConfig,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// | Variable            | Default                   |
    /// |---------------------|---------------------------|
    /// | `MBTA_API_KEY`      | unset (no key)            |
    /// | `MBTA_API_URI`      | `https://api-v3.mbta.com` |
    /// | `MBTA_TIMEOUT_SECS` | `30`                      |
    /// | `GBPT_BIND_ADDR`    | `127.0.0.1:8000`          |
    /// | `GBPT_LOG_FORMAT`   | `pretty`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut mbta = MbtaConfig::new();

        if let Some(key) = lookup("MBTA_API_KEY") {
            mbta = mbta.with_api_key(key.trim());
        }

        if let Some(uri) = lookup("MBTA_API_URI").filter(|u| !u.trim().is_empty()) {
            let uri = uri.trim().to_string();
            url::Url::parse(&uri).map_err(|e| ConfigError::Invalid {
                name: "MBTA_API_URI",
                value: uri.clone(),
                reason: e.to_string(),
            })?;
            mbta = mbta.with_base_url(uri);
        }

        if let Some(secs) = lookup("MBTA_TIMEOUT_SECS") {
            let parsed: u64 = parse_var("MBTA_TIMEOUT_SECS", &secs)?;
            if parsed == 0 {
                return Err(ConfigError::Invalid {
                    name: "MBTA_TIMEOUT_SECS",
                    value: secs,
                    reason: "must be greater than 0".to_string(),
                });
            }
            mbta = mbta.with_timeout(parsed);
        }

        let bind_addr = match lookup("GBPT_BIND_ADDR") {
            Some(addr) => parse_var("GBPT_BIND_ADDR", &addr)?,
            None => parse_var("GBPT_BIND_ADDR", DEFAULT_BIND_ADDR)?,
        };

        let log_format = match lookup("GBPT_LOG_FORMAT") {
            Some(format) => parse_var("GBPT_LOG_FORMAT", &format)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            mbta,
            log_format,
        })
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
