//! Fantasy points formulas.
//!
//! The coefficients are fixed business constants. Each formula reads only
//! its own category's normalized fields, treats an absent field as 0, and
//! never divides.

use crate::aggregate::types::{CategoryRecord, ScoredRecord};
use crate::source::Category;

/// Points per run scored.
pub const RUN_POINTS: f64 = 1.0;
/// Bonus per fifty.
pub const FIFTY_POINTS: f64 = 10.0;
/// Bonus per hundred.
pub const HUNDRED_POINTS: f64 = 20.0;

/// Points per wicket taken.
pub const WICKET_POINTS: f64 = 10.0;
/// Points per maiden over bowled.
pub const MAIDEN_POINTS: f64 = 3.0;
/// Bonus per five-wicket haul.
pub const FIVE_WICKET_HAUL_POINTS: f64 = 10.0;

/// Points per catch taken while keeping wicket.
pub const KEEPING_CATCH_POINTS: f64 = 2.0;
/// Points per stumping.
pub const STUMPING_POINTS: f64 = 5.0;
/// Points per catch taken in the field.
pub const FIELDING_CATCH_POINTS: f64 = 3.0;
/// Points per run out.
pub const RUN_OUT_POINTS: f64 = 5.0;

/// Applies the category's scoring formula to one normalized record.
pub fn score(record: CategoryRecord) -> ScoredRecord {
    let get = |name: &str| record.fields.get(name).copied().unwrap_or(0.0);

    let points = match record.category {
        Category::Batting => {
            get("RUNS") * RUN_POINTS
                + get("50s") * FIFTY_POINTS
                + get("100s") * HUNDRED_POINTS
        }
        Category::Bowling => {
            get("WICKETS") * WICKET_POINTS
                + get("MAIDENS") * MAIDEN_POINTS
                + get("5 WICKET HAUL") * FIVE_WICKET_HAUL_POINTS
        }
        Category::Fielding => {
            get("WICKET KEEPING CATCHES") * KEEPING_CATCH_POINTS
                + get("STUMPINGS") * STUMPING_POINTS
                + get("FIELDING CATCHES") * FIELDING_CATCH_POINTS
                + get("RUN OUTS") * RUN_OUT_POINTS
        }
    };

    ScoredRecord { points, record }
}
