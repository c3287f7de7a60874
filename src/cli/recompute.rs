use crate::scoring::{refresh_aggregate, refresh_all};
use crate::store::Store;

use super::init_store;

/// Rebuilds cached script aggregates from the ratings table.
pub fn run_recompute(data_dir: String, script: Option<String>) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let Some(code_or_id) = script else {
        let refreshed = refresh_all(&store)?;
        println!("Recomputed aggregates for {refreshed} scripts");
        return Ok(());
    };

    let script = store
        .get_script(&code_or_id)?
        .ok_or_else(|| anyhow::anyhow!("Script '{}' not found", code_or_id))?;

    match refresh_aggregate(&store, &script.code)? {
        Some(aggregate) => println!(
            "{}: avg_score {:.1} from {} ratings",
            script.code, aggregate.avg_score, aggregate.rating_count
        ),
        None => anyhow::bail!("Script '{}' disappeared during recompute", script.code),
    }

    Ok(())
}
