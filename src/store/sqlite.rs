use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use super::Store;
use super::filter::{rating_filter, script_filter, script_order_by};
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::scoring::calculator::{rating_total, round1};
use crate::scoring::scripts::next_script_code;
use crate::types::*;

/// Column list for `scripts` SELECT queries; see [`script_from_row`].
const SCRIPT_COLUMNS: &str = "\
    id, code, name, status, source_type, assign_status, is_project, \
    project_name, project_owner, genre, content_type, team, writer, producer, \
    content_team, producer_team, remarks, doc_url, submit_user, submit_date, \
    avg_score, rating_count, created_at, updated_at";

/// Column list for `ratings r` SELECT queries; see [`rating_from_row`].
const RATING_COLUMNS: &str = "\
    r.id, r.script_code, r.user_id, r.user_name, r.user_role, \
    r.content_score, r.market_score, r.compliance_score, r.commercial_score, \
    r.total_score, r.comments, r.rating_date, r.is_locked, r.created_at, r.updated_at";

const RATING_VIEW_FROM: &str = "FROM ratings r LEFT JOIN scripts s ON s.code = r.script_code";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests and one-off tooling.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| tracing::warn!("Invalid date in database: '{}' - {}", s, e))
        .ok()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn script_from_row(row: &Row<'_>) -> rusqlite::Result<Script> {
    Ok(Script {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        status: ScriptStatus::parse(&row.get::<_, String>(3)?),
        source_type: SourceType::parse(&row.get::<_, String>(4)?),
        assign_status: AssignStatus::parse(&row.get::<_, String>(5)?),
        is_project: row.get(6)?,
        project_name: row.get(7)?,
        project_owner: row.get(8)?,
        genre: row.get(9)?,
        content_type: row.get(10)?,
        team: row.get(11)?,
        writer: row.get(12)?,
        producer: row.get(13)?,
        content_team: row.get(14)?,
        producer_team: row.get(15)?,
        remarks: row.get(16)?,
        doc_url: row.get(17)?,
        submit_user: row.get(18)?,
        submit_date: row
            .get::<_, Option<String>>(19)?
            .and_then(|s| parse_date(&s)),
        avg_score: row.get(20)?,
        rating_count: row.get(21)?,
        created_at: parse_datetime(&row.get::<_, String>(22)?),
        updated_at: parse_datetime(&row.get::<_, String>(23)?),
    })
}

fn rating_from_row(row: &Row<'_>) -> rusqlite::Result<Rating> {
    Ok(Rating {
        id: row.get(0)?,
        script_code: row.get(1)?,
        user_id: row.get(2)?,
        user_name: row.get(3)?,
        user_role: row.get(4)?,
        dimensions: Dimensions::new(row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?),
        total_score: row.get(9)?,
        comments: row.get(10)?,
        rating_date: parse_date(&row.get::<_, String>(11)?).unwrap_or_else(today),
        is_locked: row.get(12)?,
        created_at: parse_datetime(&row.get::<_, String>(13)?),
        updated_at: parse_datetime(&row.get::<_, String>(14)?),
    })
}

fn rating_view_from_row(row: &Row<'_>) -> rusqlite::Result<RatingView> {
    Ok(RatingView {
        rating: rating_from_row(row)?,
        script_name: row.get(15)?,
        script_status: row
            .get::<_, Option<String>>(16)?
            .map(|s| ScriptStatus::parse(&s)),
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        role_type: row.get(3)?,
        department: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn query_script(conn: &Connection, code_or_id: &str) -> Result<Option<Script>> {
    let by_code = conn
        .query_row(
            &format!("SELECT {SCRIPT_COLUMNS} FROM scripts WHERE code = ?1"),
            params![code_or_id],
            script_from_row,
        )
        .optional()?;
    if by_code.is_some() {
        return Ok(by_code);
    }

    let Ok(id) = code_or_id.trim().parse::<i64>() else {
        return Ok(None);
    };
    conn.query_row(
        &format!("SELECT {SCRIPT_COLUMNS} FROM scripts WHERE id = ?1"),
        params![id],
        script_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn resolve_script_code(conn: &Connection, code_or_id: &str) -> Result<Option<String>> {
    Ok(query_script(conn, code_or_id)?.map(|s| s.code))
}

fn query_rating(conn: &Connection, id: i64) -> Result<Option<Rating>> {
    conn.query_row(
        &format!("SELECT {RATING_COLUMNS} FROM ratings r WHERE r.id = ?1"),
        params![id],
        rating_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn distinct_script_values(conn: &Connection, column: &'static str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT {column} FROM scripts
         WHERE {column} IS NOT NULL AND {column} != ''
         ORDER BY {column}"
    ))?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Whitelisted `SET` assignments for a script patch, in column order.
fn patch_assignments(patch: &ScriptPatch) -> Vec<(&'static str, Value)> {
    let text = |v: &Option<String>| v.clone().map(Value::Text);
    let label = |v: Option<&str>| v.map(|s| Value::Text(s.to_string()));

    let candidates: [(&'static str, Option<Value>); 18] = [
        ("name", text(&patch.name)),
        ("status", label(patch.status.as_ref().map(ScriptStatus::as_str))),
        (
            "source_type",
            label(patch.source_type.as_ref().map(SourceType::as_str)),
        ),
        (
            "assign_status",
            label(patch.assign_status.as_ref().map(AssignStatus::as_str)),
        ),
        ("is_project", patch.is_project.map(Value::from)),
        ("project_name", text(&patch.project_name)),
        ("project_owner", text(&patch.project_owner)),
        ("genre", text(&patch.genre)),
        ("content_type", text(&patch.content_type)),
        ("team", text(&patch.team)),
        ("writer", text(&patch.writer)),
        ("producer", text(&patch.producer)),
        ("content_team", text(&patch.content_team)),
        ("producer_team", text(&patch.producer_team)),
        ("remarks", text(&patch.remarks)),
        ("doc_url", text(&patch.doc_url)),
        ("submit_user", text(&patch.submit_user)),
        (
            "submit_date",
            patch.submit_date.map(|d| Value::Text(d.to_string())),
        ),
    ];

    candidates
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
}

fn to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // User operations

    fn create_user(&self, user: &User) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO users (id, name, role, role_type, department, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                user.name,
                user.role,
                user.role_type,
                user.department,
                format_datetime(&user.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => {
                Err(Error::Conflict(format!("user '{}' already exists", user.id)))
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, role, role_type, department, created_at FROM users WHERE id = ?1",
            params![id],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, role, role_type, department, created_at
             FROM users ORDER BY name, id",
        )?;

        let rows = stmt.query_map([], user_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Script operations

    fn create_script(&self, script: &NewScript) -> Result<Script> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let last_code: Option<String> = tx
            .query_row(
                "SELECT code FROM scripts WHERE code GLOB 'SP[0-9]*'
                 ORDER BY CAST(SUBSTR(code, 3) AS INTEGER) DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let code = next_script_code(last_code.as_deref());

        let now = format_datetime(&Utc::now());
        let status = script.status.clone().unwrap_or_default();
        let source_type = script.source_type.clone().unwrap_or_default();
        let assign_status = script.assign_status.clone().unwrap_or_default();

        tx.execute(
            "INSERT INTO scripts (code, name, status, source_type, assign_status, is_project,
                project_name, project_owner, genre, content_type, team, writer, producer,
                content_team, producer_team, remarks, doc_url, submit_user, submit_date,
                avg_score, rating_count, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                ?17, ?18, ?19, 0, 0, ?20, ?20)",
            params![
                code,
                script.name,
                status.as_str(),
                source_type.as_str(),
                assign_status.as_str(),
                script.is_project,
                script.project_name,
                script.project_owner,
                script.genre.as_deref().unwrap_or(DEFAULT_GENRE),
                script.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE),
                script.team,
                script.writer,
                script.producer,
                script.content_team,
                script.producer_team,
                script.remarks,
                script.doc_url,
                script.submit_user,
                script.submit_date.unwrap_or_else(today).to_string(),
                now,
            ],
        )?;

        let created = query_script(&tx, &code)?.ok_or(Error::NotFound("script"))?;
        tx.commit()?;
        Ok(created)
    }

    fn get_script(&self, code_or_id: &str) -> Result<Option<Script>> {
        query_script(&self.conn(), code_or_id)
    }

    fn list_scripts(&self, query: &ScriptQuery) -> Result<Page<Script>> {
        let filter = script_filter(query);
        let where_clause = filter.where_clause();
        let conn = self.conn();

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM scripts {where_clause}"),
            params_from_iter(filter.params()),
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {SCRIPT_COLUMNS} FROM scripts {where_clause} {} LIMIT ? OFFSET ?",
            script_order_by(query)
        ))?;
        let rows = stmt.query_map(
            params_from_iter(filter.paged_params(&query.page)),
            script_from_row,
        )?;
        let items = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total: to_total(total),
            page: query.page.page,
            limit: query.page.limit,
        })
    }

    fn list_script_codes(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT code FROM scripts ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_script(&self, code_or_id: &str, patch: &ScriptPatch) -> Result<()> {
        let assignments = patch_assignments(patch);
        if assignments.is_empty() {
            return Err(Error::NoFields);
        }

        let conn = self.conn();
        let code = resolve_script_code(&conn, code_or_id)?.ok_or(Error::NotFound("script"))?;

        let mut sets: Vec<String> = assignments
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect();
        sets.push("updated_at = ?".to_string());

        let mut values: Vec<Value> = assignments.into_iter().map(|(_, v)| v).collect();
        values.push(Value::Text(format_datetime(&Utc::now())));
        values.push(Value::Text(code));

        conn.execute(
            &format!("UPDATE scripts SET {} WHERE code = ?", sets.join(", ")),
            params_from_iter(values),
        )?;
        Ok(())
    }

    fn delete_script(&self, code_or_id: &str) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let Some(code) = resolve_script_code(&tx, code_or_id)? else {
            return Ok(false);
        };

        tx.execute("DELETE FROM ratings WHERE script_code = ?1", params![code])?;
        let rows = tx.execute("DELETE FROM scripts WHERE code = ?1", params![code])?;

        tx.commit()?;
        Ok(rows > 0)
    }

    // Aggregate bookkeeping

    fn list_rating_totals(&self, script_code: &str) -> Result<Vec<Option<f64>>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT total_score FROM ratings WHERE script_code = ?1")?;
        let rows = stmt.query_map(params![script_code], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn set_script_aggregate(
        &self,
        script_code: &str,
        avg_score: f64,
        rating_count: i64,
    ) -> Result<bool> {
        let rows = self.conn().execute(
            "UPDATE scripts SET avg_score = ?1, rating_count = ?2, updated_at = ?3 WHERE code = ?4",
            params![
                avg_score,
                rating_count,
                format_datetime(&Utc::now()),
                script_code
            ],
        )?;
        Ok(rows > 0)
    }

    // Rating operations

    fn create_rating(&self, rating: &NewRating) -> Result<Rating> {
        let conn = self.conn();
        let now = format_datetime(&Utc::now());
        let dims = &rating.dimensions;

        let result = conn.execute(
            "INSERT INTO ratings (script_code, user_id, user_name, user_role,
                content_score, market_score, compliance_score, commercial_score,
                total_score, comments, rating_date, is_locked, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?12, ?12)",
            params![
                rating.script_code,
                rating.user_id,
                rating.user_name,
                rating.user_role,
                dims.content_score,
                dims.market_score,
                dims.compliance_score,
                dims.commercial_score,
                rating_total(dims),
                rating.comments,
                rating.rating_date.to_string(),
                now,
            ],
        );

        match result {
            Ok(_) => {}
            Err(e) if is_constraint_violation(&e) => return Err(Error::NotFound("script")),
            Err(e) => return Err(Error::from(e)),
        }

        let id = conn.last_insert_rowid();
        query_rating(&conn, id)?.ok_or(Error::NotFound("rating"))
    }

    fn get_rating(&self, id: i64) -> Result<Option<RatingView>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {RATING_COLUMNS}, s.name, s.status {RATING_VIEW_FROM} WHERE r.id = ?1"),
            params![id],
            rating_view_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_ratings(&self, query: &RatingQuery) -> Result<Page<RatingView>> {
        let filter = rating_filter(query);
        let where_clause = filter.where_clause();
        let conn = self.conn();

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM ratings r {where_clause}"),
            params_from_iter(filter.params()),
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {RATING_COLUMNS}, s.name, s.status {RATING_VIEW_FROM} {where_clause}
             ORDER BY r.rating_date DESC, r.id DESC LIMIT ? OFFSET ?"
        ))?;
        let rows = stmt.query_map(
            params_from_iter(filter.paged_params(&query.page)),
            rating_view_from_row,
        )?;
        let items = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total: to_total(total),
            page: query.page.page,
            limit: query.page.limit,
        })
    }

    fn list_script_ratings(&self, script_code: &str) -> Result<Vec<Rating>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {RATING_COLUMNS} FROM ratings r WHERE r.script_code = ?1
             ORDER BY r.rating_date DESC, r.id DESC"
        ))?;
        let rows = stmt.query_map(params![script_code], rating_from_row)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_rating(&self, id: i64, update: &RatingUpdate) -> Result<Rating> {
        let conn = self.conn();
        let dims = &update.dimensions;

        let rows = conn.execute(
            "UPDATE ratings
             SET content_score = ?1, market_score = ?2, compliance_score = ?3,
                 commercial_score = ?4, total_score = ?5, comments = ?6, updated_at = ?7
             WHERE id = ?8 AND is_locked = 0",
            params![
                dims.content_score,
                dims.market_score,
                dims.compliance_score,
                dims.commercial_score,
                rating_total(dims),
                update.comments,
                format_datetime(&Utc::now()),
                id,
            ],
        )?;

        if rows == 0 {
            let locked: Option<bool> = conn
                .query_row(
                    "SELECT is_locked FROM ratings WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()?;
            return Err(match locked {
                Some(true) => Error::Locked,
                _ => Error::NotFound("rating"),
            });
        }

        query_rating(&conn, id)?.ok_or(Error::NotFound("rating"))
    }

    fn lock_rating(&self, id: i64) -> Result<Rating> {
        let conn = self.conn();
        let rows = conn.execute(
            "UPDATE ratings SET is_locked = 1, updated_at = ?1 WHERE id = ?2 AND is_locked = 0",
            params![format_datetime(&Utc::now()), id],
        )?;

        let rating = query_rating(&conn, id)?.ok_or(Error::NotFound("rating"))?;
        if rows == 0 {
            tracing::debug!(rating_id = id, "rating was already locked");
        }
        Ok(rating)
    }

    // Rankings and dashboard analytics

    fn top_scripts(&self, limit: u32) -> Result<Vec<RankingRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SCRIPT_COLUMNS},
                (SELECT COUNT(*) FROM ratings r WHERE r.script_code = scripts.code),
                (SELECT AVG(r.content_score) FROM ratings r WHERE r.script_code = scripts.code),
                (SELECT AVG(r.market_score) FROM ratings r WHERE r.script_code = scripts.code),
                (SELECT AVG(r.compliance_score) FROM ratings r WHERE r.script_code = scripts.code),
                (SELECT AVG(r.commercial_score) FROM ratings r WHERE r.script_code = scripts.code)
             FROM scripts
             WHERE avg_score > 0
             ORDER BY avg_score DESC, created_at DESC, id DESC
             LIMIT ?1"
        ))?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok(RankingRow {
                script: script_from_row(row)?,
                rater_count: row.get(24)?,
                avg_content_score: row.get(25)?,
                avg_market_score: row.get(26)?,
                avg_compliance_score: row.get(27)?,
                avg_commercial_score: row.get(28)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn kpi(&self) -> Result<Kpi> {
        let conn = self.conn();
        let count = |sql: &str| -> Result<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

        let total_submissions = count("SELECT COUNT(*) FROM scripts")?;
        let project_count = count("SELECT COUNT(*) FROM scripts WHERE is_project = 1")?;
        let rated_count = count("SELECT COUNT(DISTINCT script_code) FROM ratings")?;
        let avg_score: Option<f64> = conn.query_row(
            "SELECT AVG(avg_score) FROM scripts WHERE avg_score > 0",
            [],
            |row| row.get(0),
        )?;

        Ok(Kpi {
            total_submissions,
            project_count,
            rated_count,
            pending_count: (total_submissions - rated_count).max(0),
            avg_score: avg_score.map(round1).unwrap_or(0.0),
        })
    }

    fn count_scripts_by(&self, grouping: ScriptGrouping) -> Result<Vec<Bucket>> {
        let column = grouping.column();
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {column}, COUNT(*) FROM scripts GROUP BY {column} ORDER BY COUNT(*) DESC, {column}"
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(Bucket {
                label: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn team_distribution(&self) -> Result<Vec<TeamBucket>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT team, COUNT(*), AVG(avg_score) FROM scripts
             WHERE team IS NOT NULL AND team != ''
             GROUP BY team
             ORDER BY COUNT(*) DESC, team",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(TeamBucket {
                team: row.get(0)?,
                count: row.get(1)?,
                avg_score: round1(row.get::<_, Option<f64>>(2)?.unwrap_or(0.0)),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn score_trend(&self, period: TrendPeriod) -> Result<Vec<TrendPoint>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT strftime(?1, rating_date) AS period, AVG(total_score), COUNT(*)
             FROM ratings
             WHERE total_score IS NOT NULL
             GROUP BY period
             ORDER BY period",
        )?;

        let rows = stmt.query_map(params![period.strftime()], |row| {
            Ok(TrendPoint {
                period: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                avg_score: round1(row.get::<_, Option<f64>>(1)?.unwrap_or(0.0)),
                count: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn filter_options(&self) -> Result<FilterOptions> {
        let conn = self.conn();
        Ok(FilterOptions {
            teams: distinct_script_values(&conn, "team")?,
            statuses: distinct_script_values(&conn, "status")?,
            source_types: distinct_script_values(&conn, "source_type")?,
            genres: distinct_script_values(&conn, "genre")?,
            content_teams: distinct_script_values(&conn, "content_team")?,
            producer_teams: distinct_script_values(&conn, "producer_team")?,
        })
    }
}
