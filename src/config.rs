//! Runtime configuration, assembled once from the environment.
//!
//! Everything the pipeline needs is read here and passed to constructors
//! explicitly; no module holds credential globals.

use anyhow::{Context, Result};
use std::env;

const DEFAULT_BASE_URL: &str = "https://toft.play-cricket.com";
const DEFAULT_LOGIN_URL: &str = "https://myaccount.play-cricket.com/idp-signin";
const DEFAULT_ARTIFACT_NAME: &str = "PlayerFullStats.json";

/// Credentials and endpoints for the club statistics site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub email: String,
    pub password: String,
    pub base_url: String,
    pub login_url: String,
}

impl SiteConfig {
    /// Reads the site credentials from the environment (after `dotenvy`
    /// has loaded any `.env` file). Missing credentials are an error; the
    /// URLs fall back to the club defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            email: env::var("PLAYCRICKET_EMAIL").context("PLAYCRICKET_EMAIL must be set")?,
            password: env::var("PLAYCRICKET_PASSWORD")
                .context("PLAYCRICKET_PASSWORD must be set")?,
            base_url: env::var("PLAYCRICKET_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            login_url: env::var("PLAYCRICKET_LOGIN_URL")
                .unwrap_or_else(|_| DEFAULT_LOGIN_URL.to_string()),
        })
    }
}

/// Target gist for the published artifact.
#[derive(Debug, Clone)]
pub struct GistConfig {
    pub gist_id: String,
    pub token: String,
    pub file_name: String,
}

impl GistConfig {
    /// Returns `None` when `GIST_ID`/`GIST_TOKEN` are not both set, in
    /// which case publishing is skipped.
    pub fn from_env() -> Option<Self> {
        match (env::var("GIST_ID"), env::var("GIST_TOKEN")) {
            (Ok(gist_id), Ok(token)) => Some(Self {
                gist_id,
                token,
                file_name: env::var("GIST_FILE_NAME")
                    .unwrap_or_else(|_| DEFAULT_ARTIFACT_NAME.to_string()),
            }),
            _ => None,
        }
    }
}
