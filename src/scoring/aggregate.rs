use serde::Serialize;

use crate::error::Result;
use crate::store::Store;

use super::calculator::compute_total;

/// Cached per-script aggregate derived from its ratings' totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub avg_score: f64,
    pub rating_count: i64,
}

/// Folds rating totals into an aggregate. Unscored ratings are skipped.
#[must_use]
pub fn aggregate_of(totals: &[Option<f64>]) -> Aggregate {
    let rating_count = totals.iter().flatten().count();
    Aggregate {
        avg_score: compute_total(totals.iter().copied()).unwrap_or(0.0),
        rating_count: i64::try_from(rating_count).unwrap_or(i64::MAX),
    }
}

/// Recomputes a script's `avg_score` and `rating_count` from scratch.
///
/// Returns `None` without writing anything when no script has this code.
/// Running it twice in a row leaves the row as the first run wrote it.
pub fn refresh_aggregate(store: &dyn Store, script_code: &str) -> Result<Option<Aggregate>> {
    let totals = store.list_rating_totals(script_code)?;
    let aggregate = aggregate_of(&totals);

    if !store.set_script_aggregate(script_code, aggregate.avg_score, aggregate.rating_count)? {
        tracing::debug!(script = %script_code, "Skipped aggregate refresh for unknown script");
        return Ok(None);
    }

    tracing::debug!(
        script = %script_code,
        avg_score = aggregate.avg_score,
        rating_count = aggregate.rating_count,
        "Refreshed script aggregate"
    );
    Ok(Some(aggregate))
}

/// Refreshes every script. Returns how many scripts were refreshed.
pub fn refresh_all(store: &dyn Store) -> Result<usize> {
    let mut refreshed = 0;
    for code in store.list_script_codes()? {
        if refresh_aggregate(store, &code)?.is_some() {
            refreshed += 1;
        }
    }

    tracing::info!(scripts = refreshed, "Recomputed script aggregates");
    Ok(refreshed)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::store::SqliteStore;
    use crate::types::{DEFAULT_RATER_ROLE, Dimensions, NewRating, NewScript};

    fn store_with_script() -> SqliteStore {
        let store = SqliteStore::in_memory().unwrap();
        store.initialize().unwrap();
        store
            .create_script(&NewScript {
                name: "a".to_string(),
                ..Default::default()
            })
            .unwrap();
        store
    }

    fn rate(store: &SqliteStore, content: Option<i64>) {
        store
            .create_rating(&NewRating {
                script_code: "SP001".to_string(),
                user_id: "u1".to_string(),
                user_name: "u1".to_string(),
                user_role: DEFAULT_RATER_ROLE.to_string(),
                dimensions: Dimensions::new(content, None, None, None),
                comments: None,
                rating_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            })
            .unwrap();
    }

    #[test]
    fn test_aggregate_of_skips_unscored() {
        let aggregate = aggregate_of(&[Some(80.0), Some(90.0), None]);
        assert_eq!(aggregate.rating_count, 2);
        assert_eq!(aggregate.avg_score, 85.0);

        let empty = aggregate_of(&[None, None]);
        assert_eq!(empty.rating_count, 0);
        assert_eq!(empty.avg_score, 0.0);
    }

    #[test]
    fn test_refresh_writes_aggregate() {
        let store = store_with_script();
        rate(&store, Some(80));
        rate(&store, Some(90));
        rate(&store, None);

        let aggregate = refresh_aggregate(&store, "SP001").unwrap().unwrap();
        assert_eq!(aggregate.rating_count, 2);
        assert_eq!(aggregate.avg_score, 85.0);

        let script = store.get_script("SP001").unwrap().unwrap();
        assert_eq!(script.rating_count, 2);
        assert_eq!(script.avg_score, 85.0);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let store = store_with_script();
        rate(&store, Some(77));

        let first = refresh_aggregate(&store, "SP001").unwrap();
        let second = refresh_aggregate(&store, "SP001").unwrap();
        assert_eq!(first, second);

        let script = store.get_script("SP001").unwrap().unwrap();
        assert_eq!(script.avg_score, 77.0);
        assert_eq!(script.rating_count, 1);
    }

    #[test]
    fn test_refresh_unknown_script_is_noop() {
        let store = store_with_script();
        assert_eq!(refresh_aggregate(&store, "SP404").unwrap(), None);
        assert!(store.get_script("SP404").unwrap().is_none());
    }

    #[test]
    fn test_refresh_all_repairs_stale_aggregates() {
        let store = store_with_script();
        rate(&store, Some(60));
        store.set_script_aggregate("SP001", 12.0, 9).unwrap();

        assert_eq!(refresh_all(&store).unwrap(), 1);

        let script = store.get_script("SP001").unwrap().unwrap();
        assert_eq!(script.avg_score, 60.0);
        assert_eq!(script.rating_count, 1);
    }
}
