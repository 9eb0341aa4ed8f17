//! Full outer joins of scored category records into per-player aggregates.
//!
//! One season's three category sets are joined pairwise (batting with
//! bowling, then with fielding), the resulting columns get a season prefix,
//! and finally the two season partials are joined into one row per player.
//! A player absent from a side gets that side's columns zero-filled.

use std::collections::HashMap;

use crate::source::{Category, Season};

use super::types::{PlayerAggregate, ScoredRecord};

/// Intermediate join row: one player and a set of numeric columns.
#[derive(Debug, Clone)]
pub(crate) struct PlayerColumns {
    pub(crate) player: String,
    pub(crate) values: HashMap<String, f64>,
}

/// Columns a category contributes: its required fields plus its points.
fn category_columns(category: Category) -> Vec<String> {
    let mut cols: Vec<String> = category
        .required_fields()
        .iter()
        .map(|f| f.to_string())
        .collect();
    cols.push(category.points_column().to_string());
    cols
}

fn to_columns(scored: ScoredRecord) -> PlayerColumns {
    let mut values = scored.record.fields;
    values.insert(
        scored.record.category.points_column().to_string(),
        scored.points,
    );
    PlayerColumns {
        player: scored.record.player,
        values,
    }
}

/// Full outer join on player name.
///
/// Left-side row order is preserved and right-only players are appended in
/// their own order, so downstream sorting stays stable. Column names are
/// assumed disjoint between the sides; a shared name would be overwritten
/// with the right side's value.
fn outer_join(
    left: Vec<PlayerColumns>,
    left_columns: &[String],
    right: Vec<PlayerColumns>,
    right_columns: &[String],
) -> Vec<PlayerColumns> {
    let mut merged = left;
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, row)| (row.player.clone(), i))
        .collect();

    for row in &mut merged {
        for col in right_columns {
            row.values.entry(col.clone()).or_insert(0.0);
        }
    }

    for row in right {
        match index.get(&row.player) {
            Some(&i) => merged[i].values.extend(row.values),
            None => {
                let mut values = row.values;
                for col in left_columns {
                    values.entry(col.clone()).or_insert(0.0);
                }
                index.insert(row.player.clone(), merged.len());
                merged.push(PlayerColumns {
                    player: row.player,
                    values,
                });
            }
        }
    }

    merged
}

/// Joins one season's three category record sets and prefixes every column
/// with the season name.
pub(crate) fn merge_season(
    season: Season,
    batting: Vec<ScoredRecord>,
    bowling: Vec<ScoredRecord>,
    fielding: Vec<ScoredRecord>,
) -> Vec<PlayerColumns> {
    let bat_cols = category_columns(Category::Batting);
    let bowl_cols = category_columns(Category::Bowling);
    let field_cols = category_columns(Category::Fielding);

    let bat: Vec<_> = batting.into_iter().map(to_columns).collect();
    let bowl: Vec<_> = bowling.into_iter().map(to_columns).collect();
    let field: Vec<_> = fielding.into_iter().map(to_columns).collect();

    let joined = outer_join(bat, &bat_cols, bowl, &bowl_cols);
    let mut left_cols = bat_cols;
    left_cols.extend(bowl_cols);
    let joined = outer_join(joined, &left_cols, field, &field_cols);

    joined
        .into_iter()
        .map(|row| PlayerColumns {
            player: row.player,
            values: row
                .values
                .into_iter()
                .map(|(col, v)| (format!("{}_{col}", season.prefix()), v))
                .collect(),
        })
        .collect()
}

/// Every season-prefixed column a full row carries for `season`.
fn season_columns(season: Season) -> Vec<String> {
    Category::ALL
        .iter()
        .flat_map(|&c| category_columns(c))
        .map(|col| format!("{}_{col}", season.prefix()))
        .collect()
}

/// Outer-joins the two season partials and computes the season totals.
pub(crate) fn merge_seasons(
    current: Vec<PlayerColumns>,
    previous: Vec<PlayerColumns>,
) -> Vec<PlayerAggregate> {
    let current_cols = season_columns(Season::Current);
    let previous_cols = season_columns(Season::Previous);

    outer_join(current, &current_cols, previous, &previous_cols)
        .into_iter()
        .map(|row| {
            let total = |season: Season| -> f64 {
                Category::ALL
                    .iter()
                    .map(|c| {
                        let col = format!("{}_{}", season.prefix(), c.points_column());
                        row.values.get(&col).copied().unwrap_or(0.0)
                    })
                    .sum()
            };

            let current_total = total(Season::Current);
            let previous_total = total(Season::Previous);

            PlayerAggregate {
                player: row.player,
                values: row.values,
                current_total,
                previous_total,
                weighted_points: 0.0,
                price: 0,
            }
        })
        .collect()
}
