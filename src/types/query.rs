use chrono::NaiveDate;
use serde::Serialize;

use super::ScriptStatus;
use crate::error::{Error, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// One-based page request. Out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.max(1);
        let limit = match limit {
            Some(0) | None => default_limit,
            Some(n) => n,
        };
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            limit: limit.clamp(1, max_limit),
        }
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// A page of results together with the size of the whole filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit.max(1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::Validation(format!(
                "sort order must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }

    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Columns a script listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptSortField {
    #[default]
    AvgScore,
    SubmitDate,
    RatingCount,
    Name,
    CreatedAt,
}

impl ScriptSortField {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "avg_score" => Ok(Self::AvgScore),
            "submit_date" => Ok(Self::SubmitDate),
            "rating_count" => Ok(Self::RatingCount),
            "name" => Ok(Self::Name),
            "created_at" => Ok(Self::CreatedAt),
            other => Err(Error::Validation(format!(
                "cannot sort by '{other}'; expected one of avg_score, submit_date, rating_count, name, created_at"
            ))),
        }
    }

    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::AvgScore => "avg_score",
            Self::SubmitDate => "submit_date",
            Self::RatingCount => "rating_count",
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Shortcut views offered as tabs on the script list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptTab {
    Unassigned,
    Unrated,
    Project,
    Abandoned,
}

impl ScriptTab {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "unassigned" | "claimed" => Ok(Self::Unassigned),
            "unrated" | "pending" => Ok(Self::Unrated),
            "project" => Ok(Self::Project),
            "abandoned" => Ok(Self::Abandoned),
            other => Err(Error::Validation(format!("unknown tab '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptQuery {
    pub statuses: Vec<ScriptStatus>,
    pub source_type: Option<String>,
    pub team: Option<String>,
    pub content_team: Option<String>,
    pub producer_team: Option<String>,
    pub genre: Option<String>,
    pub assign_status: Option<String>,
    pub is_project: Option<bool>,
    pub unrated: bool,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub keyword: Option<String>,
    pub tab: Option<ScriptTab>,
    pub sort_by: ScriptSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Default)]
pub struct RatingQuery {
    pub script_code: Option<String>,
    pub user_id: Option<String>,
    pub user_role: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_and_clamping() {
        let page = PageRequest::new(None, None, 20, 100);
        assert_eq!((page.page, page.limit), (1, 20));
        assert_eq!(page.offset(), 0);

        let page = PageRequest::new(Some(0), Some(500), 20, 100);
        assert_eq!((page.page, page.limit), (1, 100));

        let page = PageRequest::new(Some(2), Some(10), 20, 100);
        assert_eq!(page.offset(), 10);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<()> = Page {
            items: Vec::new(),
            total: 21,
            page: 1,
            limit: 10,
        };
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!(
            ScriptSortField::parse("rating_count").unwrap(),
            ScriptSortField::RatingCount
        );
        assert!(matches!(
            ScriptSortField::parse("avg_score; DROP TABLE scripts"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_tab_aliases() {
        assert_eq!(ScriptTab::parse("pending").unwrap(), ScriptTab::Unrated);
        assert_eq!(ScriptTab::parse("claimed").unwrap(), ScriptTab::Unassigned);
        assert!(ScriptTab::parse("archived").is_err());
    }
}
