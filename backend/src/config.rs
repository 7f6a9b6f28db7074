//! Server settings, read from `BUDGET_*` environment variables with
//! defaults suited to a local development setup.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

pub const BIND_ADDR_VAR: &str = "BUDGET_BIND_ADDR";
pub const CORS_ORIGIN_VAR: &str = "BUDGET_CORS_ORIGIN";
pub const STATIC_DIR_VAR: &str = "BUDGET_STATIC_DIR";
pub const SEED_VAR: &str = "BUDGET_SEED";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_STATIC_DIR: &str = "../frontend/dist";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    InvalidBindAddr { var: &'static str, value: String },
    #[error("{var}: invalid origin '{value}'")]
    InvalidOrigin { var: &'static str, value: String },
    #[error("{var}: expected a boolean, got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Origin allowed to call the API from another port during development
    pub cors_origin: HeaderValue,
    /// Built frontend, served for every path outside `/api`
    pub static_dir: PathBuf,
    /// Start with one sample income and one sample expense
    pub seed: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidBindAddr {
            var: BIND_ADDR_VAR,
            value: bind_addr.clone(),
        })?;

        let cors_origin = read(CORS_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&cors_origin).map_err(|_| ConfigError::InvalidOrigin {
            var: CORS_ORIGIN_VAR,
            value: cors_origin.clone(),
        })?;

        let static_dir = PathBuf::from(read(STATIC_DIR_VAR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()));

        let seed = match read(SEED_VAR) {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag { var: SEED_VAR, value })?,
        };

        Ok(Self {
            bind_addr,
            cors_origin,
            static_dir,
            seed,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            seed: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert_eq!(config.static_dir, PathBuf::from("../frontend/dist"));
        assert!(!config.seed);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (BIND_ADDR_VAR, "0.0.0.0:8000"),
            (CORS_ORIGIN_VAR, "https://budget.example.org"),
            (STATIC_DIR_VAR, "/srv/budget"),
            (SEED_VAR, "Yes"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.cors_origin, "https://budget.example.org");
        assert_eq!(config.static_dir, PathBuf::from("/srv/budget"));
        assert!(config.seed);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[(BIND_ADDR_VAR, "  "), (SEED_VAR, "")]).unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert!(!config.seed);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[(BIND_ADDR_VAR, "localhost")]).unwrap_err(),
            ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: "localhost".to_string()
            }
        );
        assert!(matches!(
            config_from(&[(SEED_VAR, "maybe")]),
            Err(ConfigError::InvalidFlag { .. })
        ));
        assert!(matches!(
            config_from(&[(CORS_ORIGIN_VAR, "http://bad\norigin")]),
            Err(ConfigError::InvalidOrigin { .. })
        ));
    }
}
