//! GitHub Gist publisher.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Method, Request};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::config::GistConfig;
use crate::fetch::{ApiKey, BasicClient, HttpClient};

use super::Publisher;

#[derive(Serialize)]
struct GistPatch<'a> {
    files: HashMap<&'a str, GistFile<'a>>,
}

#[derive(Serialize)]
struct GistFile<'a> {
    content: &'a str,
}

/// Overwrites one file of a GitHub Gist with the compiled document.
pub struct GistPublisher {
    client: ApiKey<BasicClient>,
    gist_id: String,
    file_name: String,
}

impl GistPublisher {
    pub fn new(config: &GistConfig) -> Result<Self> {
        Ok(Self {
            client: ApiKey::bearer(BasicClient::new(), &config.token)?,
            gist_id: config.gist_id.clone(),
            file_name: config.file_name.clone(),
        })
    }
}

#[async_trait]
impl Publisher for GistPublisher {
    async fn publish(&self, document: &str) -> Result<()> {
        let url = format!("https://api.github.com/gists/{}", self.gist_id);

        let patch = GistPatch {
            files: HashMap::from([(self.file_name.as_str(), GistFile { content: document })]),
        };

        let mut req = Request::new(Method::PATCH, url.parse()?);
        let headers = req.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        // GitHub rejects requests without a User-Agent.
        headers.insert(USER_AGENT, HeaderValue::from_static("cricket_fantasy_pricer"));
        *req.body_mut() = Some(serde_json::to_vec(&patch)?.into());

        let resp = self
            .client
            .execute(req)
            .await
            .context("gist update request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("gist update rejected with status {status}: {body}");
        }

        info!(gist_id = %self.gist_id, file = %self.file_name, "Gist updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_body_shape() {
        let patch = GistPatch {
            files: HashMap::from([("PlayerFullStats.json", GistFile { content: "[]" })]),
        };

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["files"]["PlayerFullStats.json"]["content"], "[]");
    }
}
