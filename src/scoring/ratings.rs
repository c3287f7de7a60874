use chrono::{NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{DEFAULT_RATER_ROLE, Dimensions, NewRating, Rating, RatingUpdate, non_blank};

use super::aggregate::refresh_aggregate;
use super::calculator::validate_dimensions;

/// A rating as submitted by a rater, before name and role are resolved.
#[derive(Debug, Clone, Default)]
pub struct RatingSubmission {
    /// Script code or numeric row id.
    pub script: String,
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_role: Option<String>,
    pub dimensions: Dimensions,
    pub comments: Option<String>,
    pub rating_date: Option<NaiveDate>,
}

/// Stores a new rating and refreshes the rated script's aggregate.
///
/// The rater's name and role come from the user registry when the id is
/// registered, otherwise from the submission, otherwise from the id and the
/// default reviewer role.
pub fn create_rating(store: &dyn Store, submission: RatingSubmission) -> Result<Rating> {
    validate_dimensions(&submission.dimensions).map_err(Error::Validation)?;

    let user_id = submission.user_id.trim().to_string();
    if user_id.is_empty() {
        return Err(Error::Validation("user_id is required".to_string()));
    }

    let script = store
        .get_script(submission.script.trim())?
        .ok_or(Error::NotFound("script"))?;

    let registered = store.get_user(&user_id)?;
    let (registered_name, registered_role) = match registered {
        Some(user) => (Some(user.name), Some(user.role)),
        None => (None, None),
    };

    let user_name = registered_name
        .or_else(|| non_blank(submission.user_name))
        .unwrap_or_else(|| user_id.clone());
    let user_role = registered_role
        .or_else(|| non_blank(submission.user_role))
        .unwrap_or_else(|| DEFAULT_RATER_ROLE.to_string());

    let rating = store.create_rating(&NewRating {
        script_code: script.code.clone(),
        user_id,
        user_name,
        user_role,
        dimensions: submission.dimensions,
        comments: submission.comments,
        rating_date: submission
            .rating_date
            .unwrap_or_else(|| Utc::now().date_naive()),
    })?;

    refresh_aggregate(store, &script.code)?;

    tracing::info!(
        rating_id = rating.id,
        script = %rating.script_code,
        user = %rating.user_id,
        total_score = ?rating.total_score,
        "Created rating"
    );
    Ok(rating)
}

/// Overwrites a rating's dimensions and comments, then refreshes the script.
///
/// Fails with `Locked` when the rating is locked; nothing is written then.
pub fn update_rating(store: &dyn Store, id: i64, update: &RatingUpdate) -> Result<Rating> {
    validate_dimensions(&update.dimensions).map_err(Error::Validation)?;

    let rating = store.update_rating(id, update).inspect_err(|e| {
        if matches!(e, Error::Locked) {
            tracing::warn!(rating_id = id, "Rejected update of locked rating");
        }
    })?;

    refresh_aggregate(store, &rating.script_code)?;

    tracing::info!(
        rating_id = rating.id,
        script = %rating.script_code,
        total_score = ?rating.total_score,
        "Updated rating"
    );
    Ok(rating)
}

/// Locks a rating against further edits. Locking an already locked rating
/// succeeds.
pub fn lock_rating(store: &dyn Store, id: i64) -> Result<Rating> {
    let rating = store.lock_rating(id)?;
    tracing::info!(rating_id = rating.id, script = %rating.script_code, "Locked rating");
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::store::SqliteStore;
    use crate::types::{NewScript, User};

    fn setup() -> SqliteStore {
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

    fn submission(user: &str, dims: Dimensions) -> RatingSubmission {
        RatingSubmission {
            script: "SP001".to_string(),
            user_id: user.to_string(),
            dimensions: dims,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_refreshes_aggregate() {
        let store = setup();
        create_rating(&store, submission("u1", Dimensions::new(Some(80), None, None, None)))
            .unwrap();
        create_rating(&store, submission("u2", Dimensions::new(Some(90), None, None, None)))
            .unwrap();
        create_rating(&store, submission("u3", Dimensions::default())).unwrap();

        let script = store.get_script("SP001").unwrap().unwrap();
        assert_eq!(script.rating_count, 2);
        assert_eq!(script.avg_score, 85.0);
    }

    #[test]
    fn test_rater_resolution() {
        let store = setup();
        store
            .create_user(&User {
                id: "editor".to_string(),
                name: "王主编".to_string(),
                role: "主编".to_string(),
                role_type: None,
                department: None,
                created_at: Utc::now(),
            })
            .unwrap();

        let mut registered = submission("editor", Dimensions::default());
        registered.user_name = Some("ignored".to_string());
        let rating = create_rating(&store, registered).unwrap();
        assert_eq!(rating.user_name, "王主编");
        assert_eq!(rating.user_role, "主编");

        let mut supplied = submission("guest", Dimensions::default());
        supplied.user_name = Some("访客".to_string());
        let rating = create_rating(&store, supplied).unwrap();
        assert_eq!(rating.user_name, "访客");
        assert_eq!(rating.user_role, DEFAULT_RATER_ROLE);

        let rating = create_rating(&store, submission("anon", Dimensions::default())).unwrap();
        assert_eq!(rating.user_name, "anon");
        assert_eq!(rating.rating_date, Utc::now().date_naive());
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let store = setup();
        let result = create_rating(
            &store,
            submission("u1", Dimensions::new(None, None, Some(120), None)),
        );
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(store.list_script_ratings("SP001").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_script_is_not_found() {
        let store = setup();
        let mut orphan = submission("u1", Dimensions::default());
        orphan.script = "SP404".to_string();
        assert!(matches!(
            create_rating(&store, orphan),
            Err(Error::NotFound("script"))
        ));
    }

    #[test]
    fn test_update_recomputes_total_and_aggregate() {
        let store = setup();
        let rating = create_rating(
            &store,
            submission("u1", Dimensions::new(Some(60), None, None, None)),
        )
        .unwrap();

        let updated = update_rating(
            &store,
            rating.id,
            &RatingUpdate {
                dimensions: Dimensions::new(Some(70), None, None, Some(90)),
                comments: Some("better".to_string()),
            },
        )
        .unwrap();
        assert_eq!(updated.total_score, Some(80.0));

        let script = store.get_script("SP001").unwrap().unwrap();
        assert_eq!(script.avg_score, 80.0);
    }

    #[test]
    fn test_locked_rating_keeps_aggregate() {
        let store = setup();
        let rating = create_rating(
            &store,
            submission("u1", Dimensions::new(Some(60), None, None, None)),
        )
        .unwrap();
        lock_rating(&store, rating.id).unwrap();
        lock_rating(&store, rating.id).unwrap();

        let result = update_rating(
            &store,
            rating.id,
            &RatingUpdate {
                dimensions: Dimensions::new(Some(100), None, None, None),
                comments: None,
            },
        );
        assert!(matches!(result, Err(Error::Locked)));

        let script = store.get_script("SP001").unwrap().unwrap();
        assert_eq!(script.avg_score, 60.0);
        assert_eq!(script.rating_count, 1);
    }
}
