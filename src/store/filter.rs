//! Translation of listing queries into parameterized SQL.
//!
//! Column names only ever come from `&'static str` constants; every
//! caller-supplied value travels as a bound parameter.

use rusqlite::types::Value;

use crate::types::{
    AssignStatus, PageRequest, RatingQuery, ScriptQuery, ScriptStatus, ScriptTab,
};

/// AND-combined WHERE clauses with positional `?` parameters.
#[derive(Debug, Default)]
pub(crate) struct SqlFilter {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(&mut self, column: &'static str, value: impl Into<Value>) -> &mut Self {
        self.clauses.push(format!("{column} = ?"));
        self.params.push(value.into());
        self
    }

    pub fn eq_opt<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: Into<Value>,
    {
        if let Some(value) = value {
            self.eq(column, value);
        }
        self
    }

    /// `column IN (...)`; an empty set adds nothing.
    pub fn any_of<I, T>(&mut self, column: &'static str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let before = self.params.len();
        self.params.extend(values.into_iter().map(Into::into));
        let added = self.params.len() - before;
        if added > 0 {
            let placeholders = vec!["?"; added].join(", ");
            self.clauses.push(format!("{column} IN ({placeholders})"));
        }
        self
    }

    pub fn at_least<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: Into<Value>,
    {
        if let Some(value) = value {
            self.clauses.push(format!("{column} >= ?"));
            self.params.push(value.into());
        }
        self
    }

    pub fn at_most<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: Into<Value>,
    {
        if let Some(value) = value {
            self.clauses.push(format!("{column} <= ?"));
            self.params.push(value.into());
        }
        self
    }

    /// Case-insensitive substring match on any of `columns`.
    pub fn contains_any(&mut self, columns: &[&'static str], needle: Option<&str>) -> &mut Self {
        let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(needle));
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("{c} LIKE ? ESCAPE '\\'"))
            .collect();
        self.clauses.push(format!("({})", ors.join(" OR ")));
        self.params
            .extend(columns.iter().map(|_| Value::Text(pattern.clone())));
        self
    }

    pub fn raw(&mut self, clause: &'static str) -> &mut Self {
        self.clauses.push(clause.to_string());
        self
    }

    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Filter parameters followed by LIMIT and OFFSET values.
    pub fn paged_params(&self, page: &PageRequest) -> Vec<Value> {
        let mut params = self.params.clone();
        params.push(Value::Integer(i64::from(page.limit)));
        params.push(Value::Integer(
            i64::try_from(page.offset()).unwrap_or(i64::MAX),
        ));
        params
    }
}

fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn non_empty(s: &Option<String>) -> Option<Value> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(text)
}

pub(crate) fn script_filter(query: &ScriptQuery) -> SqlFilter {
    let mut filter = SqlFilter::new();

    filter
        .any_of("status", query.statuses.iter().map(|s| text(s.as_str())))
        .eq_opt("source_type", non_empty(&query.source_type))
        .eq_opt("team", non_empty(&query.team))
        .eq_opt("content_team", non_empty(&query.content_team))
        .eq_opt("producer_team", non_empty(&query.producer_team))
        .eq_opt("genre", non_empty(&query.genre))
        .eq_opt("assign_status", non_empty(&query.assign_status))
        .eq_opt("is_project", query.is_project)
        .at_least("avg_score", query.min_score)
        .at_most("avg_score", query.max_score)
        .at_least("submit_date", query.start_date.map(|d| d.to_string()))
        .at_most("submit_date", query.end_date.map(|d| d.to_string()))
        .contains_any(&["name", "code", "writer"], query.keyword.as_deref());

    if query.unrated {
        filter.raw("rating_count = 0");
    }

    match query.tab {
        Some(ScriptTab::Unassigned) => {
            filter.eq("assign_status", text(AssignStatus::UNASSIGNED));
        }
        Some(ScriptTab::Unrated) => {
            filter.raw("rating_count = 0");
        }
        Some(ScriptTab::Project) => {
            filter.raw("is_project = 1");
        }
        Some(ScriptTab::Abandoned) => {
            filter.eq("status", text(ScriptStatus::ABANDONED));
        }
        None => {}
    }

    filter
}

pub(crate) fn script_order_by(query: &ScriptQuery) -> String {
    format!(
        "ORDER BY {} {}, created_at DESC, id DESC",
        query.sort_by.column(),
        query.sort_order.sql()
    )
}

/// Filter over `ratings r`; every column is qualified so the clause can be
/// reused in a join with `scripts`.
pub(crate) fn rating_filter(query: &RatingQuery) -> SqlFilter {
    let mut filter = SqlFilter::new();

    filter
        .eq_opt("r.script_code", non_empty(&query.script_code))
        .eq_opt("r.user_id", non_empty(&query.user_id))
        .eq_opt("r.user_role", non_empty(&query.user_role))
        .at_least("r.rating_date", query.start_date.map(|d| d.to_string()))
        .at_most("r.rating_date", query.end_date.map(|d| d.to_string()))
        .at_least("r.total_score", query.min_score)
        .at_most("r.total_score", query.max_score);

    filter
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::{ScriptSortField, SortOrder};

    #[test]
    fn test_empty_query_has_no_where_clause() {
        let filter = script_filter(&ScriptQuery::default());
        assert_eq!(filter.where_clause(), "");
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_multi_status_becomes_in_clause() {
        let query = ScriptQuery {
            statuses: vec![ScriptStatus::Revision, ScriptStatus::Final],
            ..Default::default()
        };
        let filter = script_filter(&query);
        assert_eq!(filter.where_clause(), "WHERE status IN (?, ?)");
        assert_eq!(
            filter.params(),
            &[Value::Text("改稿中".into()), Value::Text("终稿".into())]
        );
    }

    #[test]
    fn test_filters_are_and_combined() {
        let query = ScriptQuery {
            team: Some("A组".into()),
            is_project: Some(true),
            min_score: Some(60.0),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            tab: Some(ScriptTab::Unrated),
            ..Default::default()
        };
        let filter = script_filter(&query);
        assert_eq!(
            filter.where_clause(),
            "WHERE team = ? AND is_project = ? AND avg_score >= ? AND submit_date >= ? AND rating_count = 0"
        );
        assert_eq!(filter.params().len(), 4);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let query = ScriptQuery {
            team: Some("  ".into()),
            keyword: Some("".into()),
            ..Default::default()
        };
        assert_eq!(script_filter(&query).where_clause(), "");
    }

    #[test]
    fn test_keyword_escapes_wildcards() {
        let query = ScriptQuery {
            keyword: Some("100%_".into()),
            ..Default::default()
        };
        let filter = script_filter(&query);
        assert_eq!(
            filter.where_clause(),
            "WHERE (name LIKE ? ESCAPE '\\' OR code LIKE ? ESCAPE '\\' OR writer LIKE ? ESCAPE '\\')"
        );
        assert_eq!(filter.params()[0], Value::Text("%100\\%\\_%".into()));
        assert_eq!(filter.params().len(), 3);
    }

    #[test]
    fn test_order_by_uses_allow_listed_column() {
        let query = ScriptQuery {
            sort_by: ScriptSortField::Name,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(
            script_order_by(&query),
            "ORDER BY name ASC, created_at DESC, id DESC"
        );
        assert_eq!(
            script_order_by(&ScriptQuery::default()),
            "ORDER BY avg_score DESC, created_at DESC, id DESC"
        );
    }

    #[test]
    fn test_paged_params_append_limit_and_offset() {
        let query = RatingQuery {
            user_id: Some("u1".into()),
            ..Default::default()
        };
        let filter = rating_filter(&query);
        let page = PageRequest::new(Some(3), Some(10), 20, 100);
        assert_eq!(
            filter.paged_params(&page),
            vec![
                Value::Text("u1".into()),
                Value::Integer(10),
                Value::Integer(20)
            ]
        );
    }
}
