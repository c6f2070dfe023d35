//! API key command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_api_key(config: &Config, username: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.get_account_by_username(username).await?.is_none() {
        println!("No account named '{username}'.");
        return Ok(());
    }

    let api_key = store.regenerate_account_api_key(username).await?;
    println!("New API key for {username}:");
    println!("{api_key}");
    Ok(())
}
