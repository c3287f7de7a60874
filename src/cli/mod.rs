mod commands;
mod info;
mod recompute;
mod user;

pub use commands::UserCommands;
pub use info::run_info;
pub use recompute::run_recompute;
pub use user::{run_user_add, run_user_list};

use crate::config::DB_FILE_NAME;
use crate::store::SqliteStore;

/// Initialize store from data directory, checking it exists
pub fn init_store(data_dir: &str) -> anyhow::Result<SqliteStore> {
    let data_path: std::path::PathBuf = data_dir.into();
    let db_path = data_path.join(DB_FILE_NAME);

    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'dramascore init' first.",
            db_path.display()
        );
    }

    SqliteStore::new(&db_path).map_err(Into::into)
}
