//! Minimal HTTP transport shared by the stat source and the publisher.
//!
//! [`HttpClient`] is the seam: wrappers such as [`auth::ApiKey`] decorate a
//! prepared request before it is sent, without knowing what it is for.

pub mod auth;

pub use auth::ApiKey;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, Request, Response};

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Plain pass-through client with no credentials attached.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}

/// Fetches a URL and returns the response body as text.
///
/// Non-2xx statuses are errors; callers treat them as the source being
/// unavailable rather than retrying.
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let req = Request::new(Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    Ok(resp.error_for_status()?.text().await?)
}
