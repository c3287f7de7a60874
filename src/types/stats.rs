use serde::Serialize;

use crate::error::{Error, Result};

use super::Script;

#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    pub total_submissions: i64,
    pub project_count: i64,
    pub rated_count: i64,
    pub pending_count: i64,
    pub avg_score: f64,
}

/// Count of scripts sharing one value of a grouping column.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub label: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamBucket {
    pub team: String,
    pub count: i64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub avg_score: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl TrendPeriod {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(Error::Validation(format!(
                "period must be day, week or month, got '{other}'"
            ))),
        }
    }

    /// `strftime` pattern used to bucket rating dates.
    #[must_use]
    pub const fn strftime(self) -> &'static str {
        match self {
            Self::Day => "%Y-%m-%d",
            Self::Week => "%Y-W%W",
            Self::Month => "%Y-%m",
        }
    }
}

/// Distinct values offered in filter dropdowns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOptions {
    pub teams: Vec<String>,
    pub statuses: Vec<String>,
    pub source_types: Vec<String>,
    pub genres: Vec<String>,
    pub content_teams: Vec<String>,
    pub producer_teams: Vec<String>,
}

/// A ranking candidate as read from storage, before positions are assigned.
#[derive(Debug, Clone)]
pub struct RankingRow {
    pub script: Script,
    pub rater_count: i64,
    pub avg_content_score: Option<f64>,
    pub avg_market_score: Option<f64>,
    pub avg_compliance_score: Option<f64>,
    pub avg_commercial_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    S,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedScript {
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
    pub grade: Grade,
    #[serde(flatten)]
    pub script: Script,
    pub rater_count: i64,
    pub avg_content_score: Option<f64>,
    pub avg_market_score: Option<f64>,
    pub avg_compliance_score: Option<f64>,
    pub avg_commercial_score: Option<f64>,
}

/// Script columns the dashboard can group counts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptGrouping {
    Status,
    SourceType,
}

impl ScriptGrouping {
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::SourceType => "source_type",
        }
    }
}
