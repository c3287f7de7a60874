use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ListingConfig;
use crate::scoring::RatingSubmission;
use crate::server::response::ApiError;
use crate::server::validation::{parse_flag, parse_optional_date, split_list, validate_range};
use crate::types::{
    Dimensions, RatingQuery, RatingUpdate, Script, ScriptQuery, ScriptSortField, ScriptStatus,
    ScriptTab, SortOrder, non_blank,
};

/// Flat query string accepted by `GET /scripts`.
#[derive(Debug, Default, Deserialize)]
pub struct ListScriptsParams {
    /// Comma-separated status labels.
    pub status: Option<String>,
    pub source_type: Option<String>,
    pub team: Option<String>,
    pub content_team: Option<String>,
    pub producer_team: Option<String>,
    pub genre: Option<String>,
    pub assign_status: Option<String>,
    pub is_project: Option<String>,
    pub unrated: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub keyword: Option<String>,
    pub tab: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListScriptsParams {
    pub fn into_query(self, listing: &ListingConfig) -> Result<ScriptQuery, ApiError> {
        validate_range("score", self.min_score, self.max_score)?;
        let start_date = parse_optional_date("start_date", self.start_date)?;
        let end_date = parse_optional_date("end_date", self.end_date)?;
        validate_range("submit_date", start_date, end_date)?;

        Ok(ScriptQuery {
            statuses: self
                .status
                .as_deref()
                .map(split_list)
                .unwrap_or_default()
                .iter()
                .map(|s| ScriptStatus::parse(s))
                .collect(),
            source_type: non_blank(self.source_type),
            team: non_blank(self.team),
            content_team: non_blank(self.content_team),
            producer_team: non_blank(self.producer_team),
            genre: non_blank(self.genre),
            assign_status: non_blank(self.assign_status),
            is_project: non_blank(self.is_project)
                .map(|v| parse_flag("is_project", &v))
                .transpose()?,
            unrated: non_blank(self.unrated)
                .map(|v| parse_flag("unrated", &v))
                .transpose()?
                .unwrap_or(false),
            min_score: self.min_score,
            max_score: self.max_score,
            start_date,
            end_date,
            keyword: non_blank(self.keyword),
            tab: non_blank(self.tab)
                .map(|t| ScriptTab::parse(&t))
                .transpose()?,
            sort_by: non_blank(self.sort_by)
                .map(|s| ScriptSortField::parse(&s))
                .transpose()?
                .unwrap_or_default(),
            sort_order: non_blank(self.sort_order)
                .map(|s| SortOrder::parse(&s))
                .transpose()?
                .unwrap_or_default(),
            page: listing.page(self.page, self.limit),
        })
    }
}

/// Flat query string accepted by `GET /ratings`.
#[derive(Debug, Default, Deserialize)]
pub struct ListRatingsParams {
    pub script_code: Option<String>,
    pub user_id: Option<String>,
    pub user_role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListRatingsParams {
    pub fn into_query(self, listing: &ListingConfig) -> Result<RatingQuery, ApiError> {
        validate_range("score", self.min_score, self.max_score)?;
        let start_date = parse_optional_date("start_date", self.start_date)?;
        let end_date = parse_optional_date("end_date", self.end_date)?;
        validate_range("rating_date", start_date, end_date)?;

        Ok(RatingQuery {
            script_code: non_blank(self.script_code),
            user_id: non_blank(self.user_id),
            user_role: non_blank(self.user_role),
            start_date,
            end_date,
            min_score: self.min_score,
            max_score: self.max_score,
            page: listing.page(self.page, self.limit),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    #[serde(alias = "script_id")]
    pub script_code: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(flatten)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub rating_date: Option<NaiveDate>,
}

impl From<CreateRatingRequest> for RatingSubmission {
    fn from(req: CreateRatingRequest) -> Self {
        Self {
            script: req.script_code,
            user_id: req.user_id,
            user_name: req.user_name,
            user_role: req.user_role,
            dimensions: req.dimensions,
            comments: req.comments,
            rating_date: req.rating_date,
        }
    }
}

/// Replacement values for a rating. Omitted dimensions are cleared.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRatingRequest {
    #[serde(flatten)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub comments: Option<String>,
}

impl From<UpdateRatingRequest> for RatingUpdate {
    fn from(req: UpdateRatingRequest) -> Self {
        Self {
            dimensions: req.dimensions,
            comments: req.comments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateScriptResponse {
    pub code: String,
    pub script: Script,
}

#[derive(Debug, Default, Deserialize)]
pub struct RankingParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    pub period: Option<String>,
}
