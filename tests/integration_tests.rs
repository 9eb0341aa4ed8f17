use anyhow::{Result, bail};
use async_trait::async_trait;
use cricket_fantasy_pricer::aggregate::compile::compile_player_stats;
use cricket_fantasy_pricer::output::to_records;
use cricket_fantasy_pricer::source::{Category, RawRow, Season, StatSource};
use serde_json::{Value, json};
use std::collections::HashMap;

struct StaticSource {
    tables: HashMap<(Category, Season), Vec<RawRow>>,
}

#[async_trait]
impl StatSource for StaticSource {
    async fn fetch(&self, category: Category, season: Season) -> Result<Vec<RawRow>> {
        Ok(self
            .tables
            .get(&(category, season))
            .cloned()
            .unwrap_or_default())
    }
}

struct FailingSource;

#[async_trait]
impl StatSource for FailingSource {
    async fn fetch(&self, category: Category, _season: Season) -> Result<Vec<RawRow>> {
        match category {
            Category::Bowling => bail!("connection reset"),
            _ => Ok(vec![row(&[("PLAYER", json!("A")), ("RUNS", json!("1"))])]),
        }
    }
}

fn row(pairs: &[(&str, Value)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Two players: A scores 100 current / 50 previous, B never scores.
/// Weighted points 85 vs 0, so A prices at the ceiling and B at the floor.
#[tokio::test]
async fn test_full_pipeline_two_player_scenario() {
    let source = StaticSource {
        tables: HashMap::from([
            (
                (Category::Batting, Season::Current),
                vec![row(&[("PLAYER", json!("A")), ("RUNS", json!("100"))])],
            ),
            (
                (Category::Batting, Season::Previous),
                vec![row(&[("PLAYER", json!("A")), ("RUNS", json!("50"))])],
            ),
            (
                (Category::Fielding, Season::Current),
                vec![row(&[("PLAYER", json!("B"))])],
            ),
        ]),
    };

    let players = compile_player_stats(&source).await.unwrap();
    assert_eq!(players.len(), 2);

    let a = players.iter().find(|p| p.player == "A").unwrap();
    assert_eq!(a.current_total, 100.0);
    assert_eq!(a.previous_total, 50.0);
    assert_eq!(a.weighted_points, 85.0);
    assert_eq!(a.price, 15_000_000);

    let b = players.iter().find(|p| p.player == "B").unwrap();
    assert_eq!(b.current_total, 0.0);
    assert_eq!(b.weighted_points, 0.0);
    assert_eq!(b.price, 3_000_000);

    // Categories the players never appeared in are zero-filled, not null.
    assert_eq!(a.values["current_FIELDING_POINTS"], 0.0);
    assert_eq!(b.values["previous_BATTING_POINTS"], 0.0);

    let records = to_records(players);
    assert_eq!(records[0].player, "A");
    assert_eq!(records[0].id, 0);
    assert_eq!(records[1].player, "B");
    assert_eq!(records[1].id, 1);
}

#[tokio::test]
async fn test_malformed_and_repeat_data_is_tolerated() {
    let source = StaticSource {
        tables: HashMap::from([(
            (Category::Bowling, Season::Current),
            vec![
                row(&[("PLAYER", json!("Spinner")), ("WICKETS", json!("3")), ("MAIDENS", json!("n/a"))]),
                row(&[("WICKETS", json!("9"))]), // no player name, dropped
            ],
        )]),
    };

    let players = compile_player_stats(&source).await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].player, "Spinner");
    assert_eq!(players[0].current_total, 30.0);
}

#[tokio::test]
async fn test_empty_source_is_fatal() {
    let source = StaticSource {
        tables: HashMap::new(),
    };
    assert!(compile_player_stats(&source).await.is_err());
}

#[tokio::test]
async fn test_single_table_failure_aborts_the_run() {
    let err = compile_player_stats(&FailingSource).await.unwrap_err();
    assert!(err.to_string().contains("bowling"));
}

#[tokio::test]
async fn test_exported_document_field_names() {
    let source = StaticSource {
        tables: HashMap::from([(
            (Category::Bowling, Season::Current),
            vec![row(&[
                ("PLAYER", json!("Spinner")),
                ("WICKETS", json!("2")),
                ("5 WICKET HAUL", json!("0")),
            ])],
        )]),
    };

    let players = compile_player_stats(&source).await.unwrap();
    let records = to_records(players);
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["PLAYER"], "Spinner");
    assert_eq!(json[0]["current_5_WICKET_HAUL"], 0.0);
    assert_eq!(json[0]["current_TOTAL_POINTS"], 20.0);
    assert_eq!(json[0]["previous_TOTAL_POINTS"], 0.0);
    assert_eq!(json[0]["price"], 3_000_000);
    assert_eq!(json[0]["id"], 0);
}
