// crates/tilesets-core/src/api/tilesets.rs

use super::ApiClient;
use crate::error::Result;
use crate::validate::validate_tileset_id;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

/// Query filters for listing an account's tilesets.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub tileset_type: Option<String>,
    pub visibility: Option<String>,
    pub sortby: Option<String>,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize)]
pub struct NewTileset {
    pub recipe: Value,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Value>,
}

/// Fields to change on an existing tileset; unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TilesetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Value>,
}

fn opt(v: Option<impl ToString>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl ApiClient {
    /// Latest job of a tileset as `{"id", "latest_job", "status"}`.
    pub fn status(&self, tileset: &str) -> Result<Value> {
        let url = self.url(
            &format!("tilesets/v1/{tileset}/jobs"),
            &[("limit", "1".to_string())],
        )?;
        let jobs = self.get_json(url)?;

        let mut status = Map::new();
        for job in jobs.as_array().into_iter().flatten() {
            status.insert("id".into(), job["tilesetId"].clone());
            status.insert("latest_job".into(), job["id"].clone());
            status.insert("status".into(), job["stage"].clone());
        }
        Ok(Value::Object(status))
    }

    /// TileJSON for one tileset or a comma-separated composite.
    pub fn tilejson(&self, tilesets: &str, secure: bool) -> Result<Value> {
        for id in tilesets.split(',') {
            validate_tileset_id(id)?;
        }
        let mut url = self.url(&format!("v4/{tilesets}.json"), &[])?;
        if secure {
            let query = format!("{}&secure", url.query().unwrap_or_default());
            url.set_query(Some(&query));
        }
        self.get_json(url)
    }

    pub fn list_tilesets(&self, username: &str, options: &ListOptions) -> Result<Value> {
        let url = self.url(
            &format!("tilesets/v1/{username}"),
            &[
                ("limit", opt(options.limit)),
                ("type", opt(options.tileset_type.as_deref())),
                ("visibility", opt(options.visibility.as_deref())),
                ("sortby", opt(options.sortby.as_deref())),
            ],
        )?;
        self.get_json(url)
    }

    pub fn create_tileset(&self, tileset: &str, body: &NewTileset) -> Result<Value> {
        validate_tileset_id(tileset)?;
        let url = self.url(&format!("tilesets/v1/{tileset}"), &[])?;
        let response = self.send(self.request(Method::POST, url).json(body), &[200, 201])?;
        Ok(response.json()?)
    }

    pub fn publish(&self, tileset: &str) -> Result<Value> {
        let url = self.url(&format!("tilesets/v1/{tileset}/publish"), &[])?;
        let response = self.send(self.request(Method::POST, url), &[200])?;
        Ok(response.json()?)
    }

    pub fn update_tileset(&self, tileset: &str, update: &TilesetUpdate) -> Result<()> {
        let url = self.url(&format!("tilesets/v1/{tileset}"), &[])?;
        self.send(self.request(Method::PATCH, url).json(update), &[200, 204])?;
        Ok(())
    }

    pub fn delete_tileset(&self, tileset: &str) -> Result<()> {
        let url = self.url(&format!("tilesets/v1/{tileset}"), &[])?;
        self.send(self.request(Method::DELETE, url), &[200, 204])?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // JOBS
    // -------------------------------------------------------------------------

    pub fn jobs(&self, tileset: &str, stage: Option<&str>, limit: Option<u32>) -> Result<Value> {
        let url = self.url(
            &format!("tilesets/v1/{tileset}/jobs"),
            &[("limit", opt(limit)), ("stage", opt(stage))],
        )?;
        self.get_json_any_status(url)
    }

    pub fn job(&self, tileset: &str, job_id: &str) -> Result<Value> {
        let url = self.url(&format!("tilesets/v1/{tileset}/jobs/{job_id}"), &[])?;
        self.get_json_any_status(url)
    }
}
