// crates/tilesets-core/src/api/sources.rs

use super::upload::{ProgressFn, ProgressReader, SpooledBody};
use super::ApiClient;
use crate::error::{Result, TilesetsError};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Most raster files accepted by one upload-raster-source call.
pub const MAX_RASTER_FILES: usize = 10;

/// Where an upload lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Source,
    Changeset,
}

impl UploadTarget {
    fn endpoint(self) -> &'static str {
        match self {
            UploadTarget::Source => "sources",
            UploadTarget::Changeset => "changesets",
        }
    }
}

impl ApiClient {
    /// Uploads a spooled line-delimited body. `replace` switches POST (append)
    /// to PUT (replace).
    pub fn upload(
        &self,
        target: UploadTarget,
        username: &str,
        id: &str,
        body: SpooledBody,
        replace: bool,
        progress: Option<ProgressFn>,
    ) -> Result<Value> {
        let url = self.url(
            &format!("tilesets/v1/{}/{username}/{id}", target.endpoint()),
            &[],
        )?;
        let method = if replace { Method::PUT } else { Method::POST };

        let part = match progress {
            Some(on_progress) => Part::reader_with_length(
                ProgressReader::new(body.file, body.len, on_progress),
                body.len,
            ),
            None => Part::reader_with_length(body.file, body.len),
        }
        .file_name("file");

        info!(
            endpoint = target.endpoint(),
            features = body.features,
            bytes = body.len,
            "uploading"
        );
        let form = Form::new().part("file", part);
        let response = self.send(self.request(method, url).multipart(form), &[200])?;
        Ok(response.json()?)
    }

    /// Uploads raster files one request each; returns the last response.
    pub fn upload_raster_source<P: AsRef<Path>>(
        &self,
        username: &str,
        id: &str,
        files: &[P],
        replace: bool,
    ) -> Result<Value> {
        if files.len() > MAX_RASTER_FILES {
            return Err(TilesetsError::Usage(format!(
                "Maximum {MAX_RASTER_FILES} files can be uploaded at once."
            )));
        }
        let url = self.url(&format!("tilesets/v1/sources/{username}/{id}"), &[])?;
        let method = if replace { Method::PUT } else { Method::POST };

        let mut last = Value::Null;
        for path in files {
            let part = Part::file(path.as_ref())?
                .file_name("file")
                .mime_str("multipart/form-data")?;
            let form = Form::new().part("file", part);
            let response = self.send(
                self.request(method.clone(), url.clone()).multipart(form),
                &[200],
            )?;
            last = response.json()?;
        }
        Ok(last)
    }

    pub fn view_source(&self, username: &str, id: &str) -> Result<Value> {
        self.get_json(self.url(&format!("tilesets/v1/sources/{username}/{id}"), &[])?)
    }

    pub fn delete_source(&self, username: &str, id: &str) -> Result<()> {
        let url = self.url(&format!("tilesets/v1/sources/{username}/{id}"), &[])?;
        self.send(self.request(Method::DELETE, url), &[204])?;
        Ok(())
    }

    /// Source ids of an account, in server order.
    pub fn list_sources(&self, username: &str) -> Result<Vec<String>> {
        let sources = self.get_json(self.url(&format!("tilesets/v1/sources/{username}"), &[])?)?;
        Ok(sources
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|s| s.get("id").and_then(Value::as_str).map(str::to_string))
            .collect())
    }

    // -------------------------------------------------------------------------
    // CHANGESETS
    // -------------------------------------------------------------------------

    pub fn view_changeset(&self, username: &str, id: &str) -> Result<Value> {
        self.get_json(self.url(&format!("tilesets/v1/changesets/{username}/{id}"), &[])?)
    }

    pub fn delete_changeset(&self, username: &str, id: &str) -> Result<()> {
        let url = self.url(&format!("tilesets/v1/changesets/{username}/{id}"), &[])?;
        self.send(self.request(Method::DELETE, url), &[204])?;
        Ok(())
    }

    pub fn publish_changesets(&self, tileset: &str, payload: &Value) -> Result<Value> {
        let url = self.url(&format!("tilesets/v1/{tileset}/publish-changesets"), &[])?;
        let response = self.send(self.request(Method::POST, url).json(payload), &[200])?;
        Ok(response.json()?)
    }
}
