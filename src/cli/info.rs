use serde::Serialize;

use crate::store::Store;
use crate::types::{Kpi, RatingQuery};

use super::init_store;

#[derive(Serialize)]
struct ServerInfo {
    #[serde(flatten)]
    kpi: Kpi,
    ratings: u64,
    users: usize,
}

pub fn run_info(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let info = ServerInfo {
        kpi: store.kpi()?,
        ratings: store.list_ratings(&RatingQuery::default())?.total,
        users: store.list_users()?.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!();
    println!("Dramascore Status");
    println!("{}", "─".repeat(20));
    println!(
        "Scripts:     {} ({} projects)",
        info.kpi.total_submissions, info.kpi.project_count
    );
    println!(
        "Rated:       {} ({} pending)",
        info.kpi.rated_count, info.kpi.pending_count
    );
    println!("Avg score:   {:.1}", info.kpi.avg_score);
    println!("Ratings:     {}", info.ratings);
    println!("Users:       {}", info.users);
    println!();

    Ok(())
}
