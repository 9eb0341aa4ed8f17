//! The exported artifact: sanitized, sorted, priced player records.
//!
//! Supports pretty JSON (written atomically), a CSV copy, and a debug
//! pretty-printer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tracing::{debug, info};

use crate::aggregate::types::PlayerAggregate;

/// One exported row. Field names match the published document; the
/// remaining stat columns ride in `stats` and serialize inline, sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "PLAYER")]
    pub player: String,
    #[serde(flatten)]
    pub stats: BTreeMap<String, f64>,
    #[serde(rename = "current_TOTAL_POINTS")]
    pub current_total_points: f64,
    #[serde(rename = "previous_TOTAL_POINTS")]
    pub previous_total_points: f64,
    pub weighted_points: f64,
    pub price: u64,
    pub id: usize,
}

/// Replaces spaces, slashes and hyphens with underscores and strips
/// anything else that isn't alphanumeric or an underscore.
pub fn sanitize_column(col: &str) -> String {
    col.chars()
        .map(|c| match c {
            ' ' | '/' | '-' => '_',
            other => other,
        })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Orders the aggregates by descending current-season total (stable on
/// ties, so merge order breaks them) and assigns each record its zero-based
/// position as `id`.
pub fn to_records(mut players: Vec<PlayerAggregate>) -> Vec<PlayerRecord> {
    players.sort_by(|a, b| b.current_total.total_cmp(&a.current_total));

    players
        .into_iter()
        .enumerate()
        .map(|(id, p)| PlayerRecord {
            player: p.player,
            stats: p
                .values
                .into_iter()
                .map(|(col, v)| (sanitize_column(&col), v))
                .collect(),
            current_total_points: p.current_total,
            previous_total_points: p.previous_total,
            weighted_points: p.weighted_points,
            price: p.price,
            id,
        })
        .collect()
}

/// Writes the records as pretty-printed JSON and returns the document.
///
/// The document is staged to a sibling temp file and renamed into place,
/// so a failed run leaves any previous artifact untouched.
pub fn write_json(path: &str, records: &[PlayerRecord]) -> Result<String> {
    let document = serde_json::to_string_pretty(records)?;

    let tmp = format!("{path}.tmp");
    fs::write(&tmp, &document).with_context(|| format!("failed to write {tmp}"))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to move artifact into place at {path}"))?;

    info!(path, records = records.len(), "Artifact written");
    Ok(document)
}

/// Writes the records as CSV, one column per exported field.
pub fn write_csv(path: &str, records: &[PlayerRecord]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("failed to create {path}"))?;

    let stat_columns: Vec<&String> = records
        .first()
        .map(|r| r.stats.keys().collect())
        .unwrap_or_default();

    let mut header = vec!["PLAYER".to_string()];
    header.extend(stat_columns.iter().map(|c| (*c).clone()));
    header.extend(
        [
            "current_TOTAL_POINTS",
            "previous_TOTAL_POINTS",
            "weighted_points",
            "price",
            "id",
        ]
        .map(String::from),
    );
    writer.write_record(&header)?;

    for r in records {
        let mut row = vec![r.player.clone()];
        row.extend(
            stat_columns
                .iter()
                .map(|c| r.stats.get(*c).copied().unwrap_or(0.0).to_string()),
        );
        row.push(r.current_total_points.to_string());
        row.push(r.previous_total_points.to_string());
        row.push(r.weighted_points.to_string());
        row.push(r.price.to_string());
        row.push(r.id.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!(path, "CSV copy written");
    Ok(())
}

/// Logs the records as pretty-printed JSON.
pub fn print_json(records: &[PlayerRecord]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::Path;

    fn aggregate(name: &str, current: f64) -> PlayerAggregate {
        PlayerAggregate {
            player: name.into(),
            values: [("current_5 WICKET HAUL".to_string(), 1.0)].into(),
            current_total: current,
            previous_total: 0.0,
            weighted_points: 0.7 * current,
            price: 3_000_000,
        }
    }

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_sanitize_column() {
        assert_eq!(sanitize_column("5 WICKET HAUL"), "5_WICKET_HAUL");
        assert_eq!(sanitize_column("WICKET KEEPING CATCHES"), "WICKET_KEEPING_CATCHES");
        assert_eq!(sanitize_column("RUNS"), "RUNS");
        assert_eq!(sanitize_column("a/b-c d!"), "a_b_c_d");
    }

    #[test]
    fn test_records_are_sorted_and_numbered() {
        let records = to_records(vec![
            aggregate("mid", 50.0),
            aggregate("top", 100.0),
            aggregate("bottom", 0.0),
        ]);

        let order: Vec<_> = records.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(order, ["top", "mid", "bottom"]);
        assert_eq!(
            records.iter().map(|r| r.id).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn test_ties_keep_merge_order() {
        let records = to_records(vec![
            aggregate("first", 10.0),
            aggregate("second", 10.0),
        ]);
        assert_eq!(records[0].player, "first");
        assert_eq!(records[1].player, "second");
    }

    #[test]
    fn test_stat_columns_are_sanitized() {
        let records = to_records(vec![aggregate("A", 1.0)]);
        assert_eq!(records[0].stats["current_5_WICKET_HAUL"], 1.0);
    }

    #[test]
    fn test_serialized_record_uses_published_field_names() {
        let records = to_records(vec![aggregate("A", 1.0)]);
        let json = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(json["PLAYER"], "A");
        assert_eq!(json["current_TOTAL_POINTS"], 1.0);
        assert_eq!(json["current_5_WICKET_HAUL"], 1.0);
        assert_eq!(json["price"], 3_000_000);
        assert_eq!(json["id"], 0);
    }

    #[test]
    fn test_write_json_creates_artifact_and_cleans_temp() {
        let path = temp_path("cricket_fantasy_pricer_test_artifact.json");
        let _ = fs::remove_file(&path);

        let records = to_records(vec![aggregate("A", 1.0)]);
        let document = write_json(&path, &records).unwrap();

        assert!(Path::new(&path).exists());
        assert!(!Path::new(&format!("{path}.tmp")).exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), document);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_has_header_and_rows() {
        let path = temp_path("cricket_fantasy_pricer_test_artifact.csv");
        let _ = fs::remove_file(&path);

        let records = to_records(vec![aggregate("A", 1.0), aggregate("B", 0.0)]);
        write_csv(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("PLAYER,current_5_WICKET_HAUL"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&to_records(vec![aggregate("A", 1.0)])).unwrap();
    }
}
