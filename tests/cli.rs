//! CLI integration tests for dramascore commands.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use chrono::NaiveDate;
use dramascore::store::{SqliteStore, Store};
use dramascore::types::{DEFAULT_RATER_ROLE, Dimensions, NewRating, NewScript};
use predicates::prelude::*;
use serde_json::Value;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["init", "--data-dir", &self.data_dir_str()])
            .assert()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dramascore").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn store(&self) -> SqliteStore {
        SqliteStore::new(self.data_dir().join("dramascore.db")).expect("failed to open store")
    }

    fn add_user(&self, id: &str, name: &str, role: Option<&str>) -> assert_cmd::assert::Assert {
        let data_dir = self.data_dir_str();
        let mut args = vec![
            "user",
            "add",
            "--data-dir",
            &data_dir,
            "--id",
            id,
            "--name",
            name,
        ];
        if let Some(role) = role {
            args.extend(["--role", role]);
        }
        self.cmd().args(args).assert()
    }

    fn list_users_json(&self) -> Value {
        let output = self
            .cmd()
            .args(["user", "list", "--data-dir", &self.data_dir_str(), "--json"])
            .output()
            .expect("failed to run command");

        serde_json::from_slice(&output.stdout).expect("failed to parse JSON")
    }
}

#[test]
fn test_init_creates_database() {
    let ctx = TestContext::new();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("Initialized database"));

    ctx.temp_dir
        .child("dramascore.db")
        .assert(predicate::path::exists());
}

#[test]
fn test_init_is_repeatable() {
    let ctx = TestContext::new();
    ctx.init().success();
    ctx.init().success();
}

#[test]
fn test_commands_require_init() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["user", "list", "--data-dir", &ctx.data_dir_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dramascore init"));
}

#[test]
fn test_user_add_and_list() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.add_user("editor", "王主编", Some("主编"))
        .success()
        .stdout(predicate::str::contains("王主编"));
    ctx.add_user("reviewer", "李评审", None).success();

    let users = ctx.list_users_json();
    let users = users.as_array().expect("users not an array");
    assert_eq!(users.len(), 2);

    let reviewer = users
        .iter()
        .find(|u| u["id"] == "reviewer")
        .expect("reviewer missing");
    assert_eq!(reviewer["role"], DEFAULT_RATER_ROLE);

    ctx.cmd()
        .args(["user", "list", "--data-dir", &ctx.data_dir_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor"))
        .stdout(predicate::str::contains("主编"));
}

#[test]
fn test_duplicate_user_is_rejected() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.add_user("editor", "王主编", None).success();
    ctx.add_user("editor", "someone else", None)
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_user_add_rejects_blank_id() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.add_user("two words", "name", None).failure();
}

#[test]
fn test_recompute_repairs_aggregates() {
    let ctx = TestContext::new();
    ctx.init().success();

    {
        let store = ctx.store();
        store
            .create_script(&NewScript {
                name: "重生".to_string(),
                ..Default::default()
            })
            .expect("create script");
        for score in [Some(80), Some(90), None] {
            store
                .create_rating(&NewRating {
                    script_code: "SP001".to_string(),
                    user_id: "u1".to_string(),
                    user_name: "u1".to_string(),
                    user_role: DEFAULT_RATER_ROLE.to_string(),
                    dimensions: Dimensions::new(score, None, None, None),
                    comments: None,
                    rating_date: NaiveDate::from_ymd_opt(2025, 4, 1).expect("date"),
                })
                .expect("create rating");
        }
    }

    ctx.cmd()
        .args(["recompute", "--data-dir", &ctx.data_dir_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 scripts"));

    let script = ctx
        .store()
        .get_script("SP001")
        .expect("get script")
        .expect("script missing");
    assert_eq!(script.rating_count, 2);
    assert_eq!(script.avg_score, 85.0);

    ctx.cmd()
        .args([
            "recompute",
            "--data-dir",
            &ctx.data_dir_str(),
            "--script",
            "SP001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("avg_score 85.0 from 2 ratings"));
}

#[test]
fn test_recompute_unknown_script_fails() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.cmd()
        .args([
            "recompute",
            "--data-dir",
            &ctx.data_dir_str(),
            "--script",
            "SP404",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_info_json() {
    let ctx = TestContext::new();
    ctx.init().success();
    ctx.add_user("editor", "王主编", None).success();

    let output = ctx
        .cmd()
        .args(["info", "--data-dir", &ctx.data_dir_str(), "--json"])
        .output()
        .expect("failed to run command");
    let info: Value = serde_json::from_slice(&output.stdout).expect("failed to parse JSON");

    assert_eq!(info["total_submissions"], 0);
    assert_eq!(info["ratings"], 0);
    assert_eq!(info["users"], 1);
}

#[test]
fn test_serve_requires_database() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["serve", "--data-dir", &ctx.data_dir_str(), "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));
}
