use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

use cricket_fantasy_pricer::config::SiteConfig;
use cricket_fantasy_pricer::parser::parse_stats_page;
use cricket_fantasy_pricer::source::{Category, RawRow, Season, StatSource};

/// Upper bound on table pages walked per category and season. The site
/// paginates at 25 rows; hitting this means the paginator never reported
/// a last page.
const MAX_PAGES: usize = 50;

/// Live [`StatSource`] backed by the club site on play-cricket.com.
///
/// Construction signs in and keeps the session cookies; each `fetch` walks
/// the statistics table pages for one category and season until the parser
/// reports no next page.
pub struct PlayCricketSource {
    client: reqwest::Client,
    base_url: String,
}

impl PlayCricketSource {
    /// Signs into the site and returns a source holding the session.
    pub async fn sign_in(config: &SiteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let response = client
            .post(&config.login_url)
            .form(&[
                ("email", config.email.as_str()),
                ("password", config.password.as_str()),
            ])
            .send()
            .await
            .context("sign-in request failed; statistics site unreachable")?;

        if !response.status().is_success() {
            bail!("sign-in rejected with status {}", response.status());
        }

        info!(base_url = %config.base_url, "Signed into statistics site");

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Statistics page URL for one category, season and page number.
    ///
    /// `atleast=0` clears the site's minimum-innings filter so every player
    /// appears. The previous season is addressed by calendar year.
    fn stats_url(&self, category: Category, season: Season, page: usize) -> String {
        let mut url = format!(
            "{}/Statistics?sub_tab=Standard&tab={}&atleast=0&page={page}",
            self.base_url,
            category.tab_name(),
        );

        if let Season::Previous = season {
            url.push_str(&format!("&season={}", Utc::now().year() - 1));
        }

        url
    }
}

#[async_trait]
impl StatSource for PlayCricketSource {
    async fn fetch(&self, category: Category, season: Season) -> Result<Vec<RawRow>> {
        let mut rows = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = self.stats_url(category, season, page);
            debug!(%url, "Fetching statistics page");

            let html = self
                .client
                .get(&url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .with_context(|| format!("failed to fetch {category} page {page}"))?
                .text()
                .await
                .context("failed to read statistics page body")?;

            let page_data = parse_stats_page(&html)
                .with_context(|| format!("{category} page {page} had no statistics table"))?;

            debug!(page, rows = page_data.rows.len(), "Page parsed");
            rows.extend(page_data.rows);

            if !page_data.has_next {
                return Ok(rows);
            }
        }

        warn!(
            %category,
            %season,
            max_pages = MAX_PAGES,
            "Paginator never reported a last page; returning what was collected"
        );
        Ok(rows)
    }
}
