use chrono::Utc;

use crate::store::Store;
use crate::types::{DEFAULT_RATER_ROLE, User};

use super::init_store;

pub fn run_user_add(
    data_dir: String,
    id: String,
    name: String,
    role: Option<String>,
    role_type: Option<String>,
    department: Option<String>,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let id = id.trim().to_string();
    let name = name.trim().to_string();
    if id.is_empty() || id.contains(char::is_whitespace) {
        anyhow::bail!("User id cannot be empty or contain whitespace");
    }
    if name.is_empty() {
        anyhow::bail!("User name cannot be empty");
    }

    let user = User {
        id,
        name,
        role: role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_RATER_ROLE.to_string()),
        role_type,
        department,
        created_at: Utc::now(),
    };

    store.create_user(&user)?;

    println!(
        "Created user \"{}\" ({}) with role \"{}\"",
        user.name, user.id, user.role
    );

    Ok(())
}

pub fn run_user_list(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    let users = store.list_users()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("{:<16} {:<16} ROLE", "ID", "NAME");
    for user in &users {
        println!("{:<16} {:<16} {}", user.id, user.name, user.role);
    }

    Ok(())
}
