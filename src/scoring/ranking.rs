use crate::error::Result;
use crate::store::Store;
use crate::types::{Grade, Medal, RankedScript, RankingRow};

use super::calculator::round1;

pub const DEFAULT_RANKING_LIMIT: u32 = 50;

#[must_use]
pub fn grade_for(score: f64) -> Grade {
    match score {
        s if s >= 90.0 => Grade::S,
        s if s >= 80.0 => Grade::A,
        s if s >= 70.0 => Grade::BPlus,
        s if s >= 60.0 => Grade::B,
        s if s >= 50.0 => Grade::CPlus,
        _ => Grade::C,
    }
}

#[must_use]
pub fn medal_for(rank: u32) -> Option<Medal> {
    match rank {
        1 => Some(Medal::Gold),
        2 => Some(Medal::Silver),
        3 => Some(Medal::Bronze),
        _ => None,
    }
}

/// Assigns 1-based positions to rows already ordered best-first.
#[must_use]
pub fn assign_ranks(rows: Vec<RankingRow>) -> Vec<RankedScript> {
    rows.into_iter()
        .zip(1u32..)
        .map(|(row, rank)| RankedScript {
            rank,
            medal: medal_for(rank),
            grade: grade_for(row.script.avg_score),
            script: row.script,
            rater_count: row.rater_count,
            avg_content_score: row.avg_content_score.map(round1),
            avg_market_score: row.avg_market_score.map(round1),
            avg_compliance_score: row.avg_compliance_score.map(round1),
            avg_commercial_score: row.avg_commercial_score.map(round1),
        })
        .collect()
}

/// Best-scored scripts with positions, medals and grades attached. Unrated
/// scripts never appear.
pub fn top_ranked(store: &dyn Store, limit: u32) -> Result<Vec<RankedScript>> {
    Ok(assign_ranks(store.top_scripts(limit)?))
}
