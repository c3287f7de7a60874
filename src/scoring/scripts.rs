use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{NewScript, Script, ScriptDetail, ScriptPatch, non_blank};

use super::aggregate::refresh_aggregate;

pub const CODE_PREFIX: &str = "SP";

/// Code following `last`, the highest code currently in use.
#[must_use]
pub fn next_script_code(last: Option<&str>) -> String {
    let next = last
        .and_then(|code| code.strip_prefix(CODE_PREFIX))
        .and_then(|digits| digits.parse::<u64>().ok())
        .map_or(1, |n| n.saturating_add(1));
    format!("{CODE_PREFIX}{next:03}")
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

/// Registers a script. Blank labels count as unset and take their defaults.
pub fn create_script(store: &dyn Store, mut script: NewScript) -> Result<Script> {
    validate_name(&script.name)?;
    script.name = script.name.trim().to_string();

    script.status = script.status.filter(|s| !s.as_str().trim().is_empty());
    script.source_type = script.source_type.filter(|s| !s.as_str().trim().is_empty());
    script.assign_status = script.assign_status.filter(|s| !s.as_str().trim().is_empty());
    script.genre = non_blank(script.genre.take());
    script.content_type = non_blank(script.content_type.take());

    let created = store.create_script(&script)?;
    tracing::info!(code = %created.code, name = %created.name, "Created script");
    Ok(created)
}

pub fn get_script_detail(store: &dyn Store, code_or_id: &str) -> Result<ScriptDetail> {
    let script = store
        .get_script(code_or_id)?
        .ok_or(Error::NotFound("script"))?;
    let ratings = store.list_script_ratings(&script.code)?;
    Ok(ScriptDetail { script, ratings })
}

pub fn update_script(store: &dyn Store, code_or_id: &str, patch: &ScriptPatch) -> Result<Script> {
    let mut patch = patch.clone();
    if let Some(name) = patch.name.as_mut() {
        validate_name(name)?;
        *name = name.trim().to_string();
    }

    store.update_script(code_or_id, &patch)?;
    let script = store
        .get_script(code_or_id)?
        .ok_or(Error::NotFound("script"))?;

    tracing::debug!(code = %script.code, "Updated script");
    Ok(script)
}

/// Deletes a script together with all of its ratings.
pub fn delete_script(store: &dyn Store, code_or_id: &str) -> Result<()> {
    if !store.delete_script(code_or_id)? {
        return Err(Error::NotFound("script"));
    }
    tracing::info!(script = %code_or_id, "Deleted script");
    Ok(())
}

/// Recomputes one script's cached aggregate and returns the refreshed script.
pub fn refresh_script(store: &dyn Store, code_or_id: &str) -> Result<Script> {
    let script = store
        .get_script(code_or_id)?
        .ok_or(Error::NotFound("script"))?;
    refresh_aggregate(store, &script.code)?;
    store
        .get_script(&script.code)?
        .ok_or(Error::NotFound("script"))
}
