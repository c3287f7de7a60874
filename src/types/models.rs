use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AssignStatus, ScriptStatus, SourceType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub status: ScriptStatus,
    pub source_type: SourceType,
    pub assign_status: AssignStatus,
    pub is_project: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_owner: Option<String>,
    pub genre: String,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_date: Option<NaiveDate>,
    /// Cached mean of this script's rating totals. Maintained by the aggregate refresh only.
    pub avg_score: f64,
    /// Number of ratings with a non-null total.
    pub rating_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when registering a new script. Unset labels fall back to
/// their defaults; the code and aggregates are never caller-supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewScript {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<ScriptStatus>,
    #[serde(default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub assign_status: Option<AssignStatus>,
    #[serde(default)]
    pub is_project: bool,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_owner: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub writer: Option<String>,
    #[serde(default)]
    pub producer: Option<String>,
    #[serde(default)]
    pub content_team: Option<String>,
    #[serde(default)]
    pub producer_team: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub doc_url: Option<String>,
    #[serde(default)]
    pub submit_user: Option<String>,
    #[serde(default)]
    pub submit_date: Option<NaiveDate>,
}

/// Partial update of a script. Only the fields below can be written; anything
/// else in a request body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<ScriptStatus>,
    #[serde(default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub assign_status: Option<AssignStatus>,
    #[serde(default)]
    pub is_project: Option<bool>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_owner: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub writer: Option<String>,
    #[serde(default)]
    pub producer: Option<String>,
    #[serde(default)]
    pub content_team: Option<String>,
    #[serde(default)]
    pub producer_team: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub doc_url: Option<String>,
    #[serde(default)]
    pub submit_user: Option<String>,
    #[serde(default)]
    pub submit_date: Option<NaiveDate>,
}

/// The four scoring dimensions of a rating. Each is an integer in 0..=100 when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub content_score: Option<i64>,
    pub market_score: Option<i64>,
    pub compliance_score: Option<i64>,
    pub commercial_score: Option<i64>,
}

impl Dimensions {
    pub const MIN_SCORE: i64 = 0;
    pub const MAX_SCORE: i64 = 100;

    #[must_use]
    pub fn new(
        content: Option<i64>,
        market: Option<i64>,
        compliance: Option<i64>,
        commercial: Option<i64>,
    ) -> Self {
        Self {
            content_score: content,
            market_score: market,
            compliance_score: compliance,
            commercial_score: commercial,
        }
    }

    /// Named values in a fixed order, for validation messages and averaging.
    #[must_use]
    pub fn named(&self) -> [(&'static str, Option<i64>); 4] {
        [
            ("content_score", self.content_score),
            ("market_score", self.market_score),
            ("compliance_score", self.compliance_score),
            ("commercial_score", self.commercial_score),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub script_code: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    #[serde(flatten)]
    pub dimensions: Dimensions,
    /// Mean of the present dimensions; null when none are present.
    pub total_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub rating_date: NaiveDate,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rating joined with the name and status of the script it scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingView {
    #[serde(flatten)]
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_status: Option<ScriptStatus>,
}

/// Everything the store needs to insert a rating. The total is not part of it:
/// the store derives it from `dimensions`.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub script_code: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    pub dimensions: Dimensions,
    pub comments: Option<String>,
    pub rating_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct RatingUpdate {
    pub dimensions: Dimensions,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptDetail {
    #[serde(flatten)]
    pub script: Script,
    pub ratings: Vec<Rating>,
}
