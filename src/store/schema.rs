pub const SCHEMA: &str = r#"
-- Raters. Reference data; ratings keep a denormalized copy of name and role.
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    role_type TEXT,
    department TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Scripts under review
CREATE TABLE IF NOT EXISTS scripts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,         -- SP001, SP002, ...
    name TEXT NOT NULL,

    -- Workflow
    status TEXT NOT NULL DEFAULT '一卡初稿',
    source_type TEXT NOT NULL DEFAULT '内部团队',
    assign_status TEXT NOT NULL DEFAULT '待认领',
    is_project INTEGER NOT NULL DEFAULT 0,
    project_name TEXT,
    project_owner TEXT,

    -- Descriptive metadata
    genre TEXT NOT NULL DEFAULT '皆可',
    content_type TEXT NOT NULL DEFAULT '付费',
    team TEXT,
    writer TEXT,
    producer TEXT,
    content_team TEXT,
    producer_team TEXT,
    remarks TEXT,
    doc_url TEXT,
    submit_user TEXT,
    submit_date TEXT,                  -- YYYY-MM-DD

    -- Cached aggregates, written only by the aggregate refresh
    avg_score REAL NOT NULL DEFAULT 0,
    rating_count INTEGER NOT NULL DEFAULT 0,

    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- One rater's evaluation of one script
CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    script_code TEXT NOT NULL REFERENCES scripts(code) ON DELETE CASCADE,
    user_id TEXT NOT NULL,
    user_name TEXT NOT NULL,
    user_role TEXT NOT NULL,

    -- Dimension scores, 0-100 each, NULL = not scored
    content_score INTEGER,
    market_score INTEGER,
    compliance_score INTEGER,
    commercial_score INTEGER,
    total_score REAL,                  -- mean of the non-NULL dimensions

    comments TEXT,
    rating_date TEXT NOT NULL,         -- YYYY-MM-DD
    is_locked INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_scripts_status ON scripts(status);
CREATE INDEX IF NOT EXISTS idx_scripts_avg_score ON scripts(avg_score);
CREATE INDEX IF NOT EXISTS idx_scripts_team ON scripts(team);
CREATE INDEX IF NOT EXISTS idx_ratings_script ON ratings(script_code);
CREATE INDEX IF NOT EXISTS idx_ratings_user ON ratings(user_id);
CREATE INDEX IF NOT EXISTS idx_ratings_date ON ratings(rating_date);
"#;
