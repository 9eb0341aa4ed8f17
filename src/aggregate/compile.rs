//! Pipeline orchestration: fetch all six tables, score, merge, price.

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::normalize::normalize;
use crate::scoring::score;
use crate::source::{Category, Season, StatSource};

use super::merge::{merge_season, merge_seasons};
use super::price::apply_prices;
use super::types::{PlayerAggregate, ScoredRecord};

/// Runs the full aggregation pipeline against `source`.
///
/// The six category/season fetches run concurrently and must all succeed:
/// the first failure aborts the run before anything is merged, so the
/// pipeline never proceeds on partial data. An entirely empty player set
/// is also fatal, since the caller expects a publishable artifact.
pub async fn compile_player_stats<S: StatSource + ?Sized>(
    source: &S,
) -> Result<Vec<PlayerAggregate>> {
    let (cur_bat, cur_bowl, cur_field, prev_bat, prev_bowl, prev_field) = tokio::try_join!(
        fetch_scored(source, Category::Batting, Season::Current),
        fetch_scored(source, Category::Bowling, Season::Current),
        fetch_scored(source, Category::Fielding, Season::Current),
        fetch_scored(source, Category::Batting, Season::Previous),
        fetch_scored(source, Category::Bowling, Season::Previous),
        fetch_scored(source, Category::Fielding, Season::Previous),
    )?;

    info!("Merging per-category stats");
    let current = merge_season(Season::Current, cur_bat, cur_bowl, cur_field);
    let previous = merge_season(Season::Previous, prev_bat, prev_bowl, prev_field);

    let mut players = merge_seasons(current, previous);
    if players.is_empty() {
        bail!("stat source returned no players for either season");
    }

    info!(players = players.len(), "Calculating prices");
    apply_prices(&mut players);

    Ok(players)
}

/// One category/season chain: fetch raw rows, normalize, score.
async fn fetch_scored<S: StatSource + ?Sized>(
    source: &S,
    category: Category,
    season: Season,
) -> Result<Vec<ScoredRecord>> {
    let rows = source
        .fetch(category, season)
        .await
        .with_context(|| format!("failed to fetch {category} stats for the {season} season"))?;

    info!(%category, %season, rows = rows.len(), "Table fetched");

    Ok(normalize(category, season, rows)
        .into_iter()
        .map(score)
        .collect())
}
