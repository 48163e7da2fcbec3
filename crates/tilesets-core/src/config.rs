// crates/tilesets-core/src/config.rs

//! Where the client talks to and with which credentials.
//!
//! Resolution order for the access token: explicit `--token` value, then
//! `MAPBOX_ACCESS_TOKEN`, then `MapboxAccessToken`. The API base URL comes from
//! `MAPBOX_API` and defaults to the public endpoint.

use crate::error::{Result, TilesetsError};

pub const DEFAULT_API_URL: &str = "https://api.mapbox.com";
pub const API_URL_ENV: &str = "MAPBOX_API";
pub const TOKEN_ENVS: [&str; 2] = ["MAPBOX_ACCESS_TOKEN", "MapboxAccessToken"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
    pub user_agent: String,
}

impl ApiConfig {
    /// Resolves the configuration from the process environment.
    pub fn from_env(token: Option<&str>) -> Result<Self> {
        Self::resolve(token, |key| std::env::var(key).ok())
    }

    /// Resolves the configuration through `lookup` instead of the process
    /// environment. Empty values count as unset.
    pub fn resolve(token: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let token = token
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| TOKEN_ENVS.iter().find_map(|key| lookup(*key)))
            .ok_or(TilesetsError::MissingToken)?;

        let base_url = lookup(API_URL_ENV)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            base_url,
            token,
            user_agent: default_user_agent(),
        })
    }
}

pub fn default_user_agent() -> String {
    format!("tilesets-rs/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn flag_wins_over_environment() {
        let cfg = ApiConfig::resolve(
            Some("flag-token"),
            env(&[("MAPBOX_ACCESS_TOKEN", "fake-token")]),
        )
        .unwrap();
        assert_eq!(cfg.token, "flag-token");
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn primary_env_var_wins_over_legacy() {
        let cfg = ApiConfig::resolve(
            None,
            env(&[
                ("MAPBOX_ACCESS_TOKEN", "fake-token"),
                ("MapboxAccessToken", "test-token"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.token, "fake-token");

        let cfg = ApiConfig::resolve(None, env(&[("MapboxAccessToken", "test-token")])).unwrap();
        assert_eq!(cfg.token, "test-token");
    }

    #[test]
    fn missing_token() {
        let err = ApiConfig::resolve(None, env(&[("MAPBOX_ACCESS_TOKEN", "")])).unwrap_err();
        assert!(matches!(err, TilesetsError::MissingToken));
    }

    #[test]
    fn api_url_override_drops_trailing_slash() {
        let cfg = ApiConfig::resolve(
            Some("t"),
            env(&[("MAPBOX_API", "https://api.example.com/")]),
        )
        .unwrap();
        assert_eq!(cfg.base_url, "https://api.example.com");
    }
}
