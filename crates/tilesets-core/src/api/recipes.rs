// crates/tilesets-core/src/api/recipes.rs

use super::ApiClient;
use crate::error::Result;
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// Server-side recipe validation; the verdict document is returned for
    /// any status.
    pub fn validate_recipe(&self, recipe: &Value) -> Result<Value> {
        let url = self.url("tilesets/v1/validateRecipe", &[])?;
        Ok(self.request(Method::PUT, url).json(recipe).send()?.json()?)
    }

    pub fn view_recipe(&self, tileset: &str) -> Result<Value> {
        self.get_json(self.url(&format!("tilesets/v1/{tileset}/recipe"), &[])?)
    }

    pub fn update_recipe(&self, tileset: &str, recipe: &Value) -> Result<()> {
        let url = self.url(&format!("tilesets/v1/{tileset}/recipe"), &[])?;
        self.send(self.request(Method::PATCH, url).json(recipe), &[201, 204])?;
        Ok(())
    }
}
