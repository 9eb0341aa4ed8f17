//! Data types flowing through the aggregation pipeline.

use serde::Serialize;
use std::collections::HashMap;

use crate::source::{Category, Season};

/// Typed row for one player in one category and season.
///
/// Produced by the normalizer: every required field of the category is
/// present and numeric. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecord {
    pub player: String,
    pub category: Category,
    pub season: Season,
    pub fields: HashMap<String, f64>,
}

/// A [`CategoryRecord`] with its derived fantasy points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CategoryRecord,
    pub points: f64,
}

/// One player's merged stats across all categories and both seasons.
///
/// `values` holds every season-prefixed stat column, zero-filled where the
/// player did not appear. `weighted_points` and `price` stay at their
/// defaults until the pricing stage runs over the finished collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAggregate {
    pub player: String,
    pub values: HashMap<String, f64>,
    pub current_total: f64,
    pub previous_total: f64,
    pub weighted_points: f64,
    pub price: u64,
}
