//! Category normalizer: raw table rows into typed per-category records.

use serde_json::Value;
use tracing::warn;

use crate::aggregate::types::CategoryRecord;
use crate::source::{Category, PLAYER_COLUMN, RawRow, Season};

/// Converts raw rows for one category into typed records.
///
/// Every required field of the category is present in the result, coerced
/// to a number; absent or unparseable cells become 0 without complaint.
/// Rows without a usable player name are dropped with a warning. Row order
/// is preserved, and the operation is idempotent: already-numeric rows
/// come through unchanged.
pub fn normalize(category: Category, season: Season, rows: Vec<RawRow>) -> Vec<CategoryRecord> {
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(player) = player_name(&row) else {
            warn!(%category, %season, "Dropping row without a player name");
            continue;
        };

        let fields = category
            .required_fields()
            .iter()
            .map(|&name| (name.to_string(), coerce_numeric(row.get(name))))
            .collect();

        records.push(CategoryRecord {
            player,
            category,
            season,
            fields,
        });
    }

    records
}

fn player_name(row: &RawRow) -> Option<String> {
    match row.get(PLAYER_COLUMN) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Numbers pass through, numeric strings parse, anything else (missing,
/// null, text like `-`) becomes 0.
fn coerce_numeric(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
