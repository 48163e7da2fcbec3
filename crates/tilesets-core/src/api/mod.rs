// crates/tilesets-core/src/api/mod.rs

//! # Tilesets API Client
//!
//! Thin blocking wrapper over the REST endpoints. Every request carries the
//! access token as an `access_token` query parameter; any status outside the
//! endpoint's success set becomes [`TilesetsError::Api`] holding the raw
//! response body.

#![cfg(feature = "api")]

mod activity;
mod recipes;
mod sources;
mod tilesets;
pub mod token;
pub mod upload;

pub use activity::{next_start_from_link, ActivityOptions, ActivityPage};
pub use sources::UploadTarget;
pub use tilesets::{ListOptions, NewTileset, TilesetUpdate};
pub use token::{ensure_token_username, token_username};
pub use upload::{write_features, ProgressFn, ProgressReader, SpooledBody};

use crate::config::ApiConfig;
use crate::error::{Result, TilesetsError};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { config, http })
    }

    /// Client configured from `--token` and the process environment.
    pub fn from_env(token: Option<&str>) -> Result<Self> {
        Self::new(ApiConfig::from_env(token)?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // REQUEST PLUMBING
    // -------------------------------------------------------------------------

    /// `{base}/{path}?access_token=...&k=v...`. Empty values are dropped.
    pub fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.config.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| TilesetsError::Usage(format!("invalid API URL {raw}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("access_token", &self.config.token);
            for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, path = url.path(), "api request");
        self.http.request(method, url)
    }

    fn send(&self, builder: RequestBuilder, ok: &[u16]) -> Result<Response> {
        let response = builder.send()?;
        let status = response.status().as_u16();
        if ok.contains(&status) {
            Ok(response)
        } else {
            let body = response.text()?;
            debug!(status, "api error");
            Err(TilesetsError::Api { status, body })
        }
    }

    fn get_json(&self, url: Url) -> Result<Value> {
        let response = self.send(self.request(Method::GET, url), &[200])?;
        Ok(response.json()?)
    }

    /// Some endpoints report failures as JSON documents worth showing as-is.
    fn get_json_any_status(&self, url: Url) -> Result<Value> {
        Ok(self.request(Method::GET, url).send()?.json()?)
    }
}
