//! Contract for the raw statistics source.
//!
//! The live implementation signs into the club site and walks its paginated
//! statistics tables; tests substitute an in-memory source. The pipeline
//! depends only on this trait.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// One scraped table row: column name to raw cell value.
///
/// Cells come off the page as strings; test fixtures may use numbers or
/// nulls. The normalizer owns all coercion.
pub type RawRow = HashMap<String, Value>;

/// Column holding the player's display name, the join key everywhere.
pub const PLAYER_COLUMN: &str = "PLAYER";

/// A statistical discipline with its own scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Batting,
    Bowling,
    Fielding,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Batting, Category::Bowling, Category::Fielding];

    /// Numeric columns the scoring formula reads. Absent or unparseable
    /// cells are coerced to zero by the normalizer.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Category::Batting => &["RUNS", "50s", "100s"],
            Category::Bowling => &["WICKETS", "MAIDENS", "5 WICKET HAUL"],
            Category::Fielding => &[
                "WICKET KEEPING CATCHES",
                "STUMPINGS",
                "FIELDING CATCHES",
                "RUN OUTS",
            ],
        }
    }

    /// Name of the derived points column this category contributes.
    pub fn points_column(self) -> &'static str {
        match self {
            Category::Batting => "BATTING_POINTS",
            Category::Bowling => "BOWLING_POINTS",
            Category::Fielding => "FIELDING_POINTS",
        }
    }

    /// Tab name as the site spells it in its statistics URLs.
    pub fn tab_name(self) -> &'static str {
        match self {
            Category::Batting => "Batting",
            Category::Bowling => "Bowling",
            Category::Fielding => "Fielding",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Batting => write!(f, "batting"),
            Category::Bowling => write!(f, "bowling"),
            Category::Fielding => write!(f, "fielding"),
        }
    }
}

/// Which of the two tracked seasons a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Current,
    Previous,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::Current, Season::Previous];

    /// Prefix applied to this season's columns after the merge.
    pub fn prefix(self) -> &'static str {
        match self {
            Season::Current => "current",
            Season::Previous => "previous",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Yields the raw rows of one statistics table.
///
/// A failed fetch means the source is unavailable for that table; the
/// pipeline treats any single failure as fatal for the whole run.
#[async_trait::async_trait]
pub trait StatSource: Send + Sync {
    async fn fetch(&self, category: Category, season: Season) -> Result<Vec<RawRow>>;
}
