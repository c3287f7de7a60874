mod filter;
mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// Scripts are addressed by `code_or_id`: the human-readable code is tried
/// first, then the numeric row id.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // User operations
    fn create_user(&self, user: &User) -> Result<()>;
    fn get_user(&self, id: &str) -> Result<Option<User>>;
    fn list_users(&self) -> Result<Vec<User>>;

    // Script operations
    fn create_script(&self, script: &NewScript) -> Result<Script>;
    fn get_script(&self, code_or_id: &str) -> Result<Option<Script>>;
    fn list_scripts(&self, query: &ScriptQuery) -> Result<Page<Script>>;
    fn list_script_codes(&self) -> Result<Vec<String>>;
    fn update_script(&self, code_or_id: &str, patch: &ScriptPatch) -> Result<()>;
    /// Removes the script and all of its ratings in one transaction.
    fn delete_script(&self, code_or_id: &str) -> Result<bool>;

    // Aggregate bookkeeping
    fn list_rating_totals(&self, script_code: &str) -> Result<Vec<Option<f64>>>;
    fn set_script_aggregate(
        &self,
        script_code: &str,
        avg_score: f64,
        rating_count: i64,
    ) -> Result<bool>;

    // Rating operations. The store derives `total_score` from the dimensions
    // on every write.
    fn create_rating(&self, rating: &NewRating) -> Result<Rating>;
    fn get_rating(&self, id: i64) -> Result<Option<RatingView>>;
    fn list_ratings(&self, query: &RatingQuery) -> Result<Page<RatingView>>;
    fn list_script_ratings(&self, script_code: &str) -> Result<Vec<Rating>>;
    /// Fails with `Locked` without writing when the rating is locked.
    fn update_rating(&self, id: i64, update: &RatingUpdate) -> Result<Rating>;
    fn lock_rating(&self, id: i64) -> Result<Rating>;

    // Rankings and dashboard analytics
    fn top_scripts(&self, limit: u32) -> Result<Vec<RankingRow>>;
    fn kpi(&self) -> Result<Kpi>;
    fn count_scripts_by(&self, grouping: ScriptGrouping) -> Result<Vec<Bucket>>;
    fn team_distribution(&self) -> Result<Vec<TeamBucket>>;
    fn score_trend(&self, period: TrendPeriod) -> Result<Vec<TrendPoint>>;
    fn filter_options(&self) -> Result<FilterOptions>;
}
