// crates/tilesets-core/src/api/activity.rs

use super::ApiClient;
use crate::error::Result;
use reqwest::header::LINK;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct ActivityOptions {
    pub sortby: Option<String>,
    pub orderby: Option<String>,
    pub limit: Option<u32>,
    pub start: Option<String>,
}

/// One page of tileset activity. `next` is the pagination key for the
/// following page, if the server announced one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPage {
    pub data: Value,
    pub next: Option<String>,
}

/// Extracts the `start` query parameter from the first URL of a `Link` header.
pub fn next_start_from_link(link: &str) -> Option<String> {
    let open = link.find('<')?;
    let close = open + link[open..].find('>')?;
    let url = Url::parse(&link[open + 1..close]).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "start")
        .map(|(_, value)| value.into_owned())
}

impl ApiClient {
    pub fn list_activity(&self, username: &str, options: &ActivityOptions) -> Result<ActivityPage> {
        let url = self.url(
            &format!("activity/v1/{username}/tilesets"),
            &[
                ("sortby", options.sortby.clone().unwrap_or_default()),
                ("orderby", options.orderby.clone().unwrap_or_default()),
                ("limit", options.limit.map(|l| l.to_string()).unwrap_or_default()),
                ("start", options.start.clone().unwrap_or_default()),
            ],
        )?;
        let response = self.send(self.request(reqwest::Method::GET, url), &[200])?;

        // Without a Link header the request's own start key is echoed back.
        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_start_from_link)
            .or_else(|| options.start.clone());

        Ok(ActivityPage {
            data: response.json()?,
            next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_from_link_header() {
        let link = "<https://api.mapbox.com/activity/v1/test-user/tilesets?access_token=x&start=abc123&limit=10>; rel=\"next\"";
        assert_eq!(next_start_from_link(link).as_deref(), Some("abc123"));
    }

    #[test]
    fn link_without_start() {
        assert_eq!(next_start_from_link("<https://api.mapbox.com/x?limit=1>; rel=\"next\""), None);
        assert_eq!(next_start_from_link("garbage"), None);
    }
}
