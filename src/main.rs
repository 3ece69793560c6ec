#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use parkour_bot::{
    bot,
    config::{database, settings},
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load channel, role and timeout settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Critical error loading settings: {}", e))?;
    info!("Successfully loaded bot settings.");

    // 4. Connect to the database and create missing tables
    let database = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&database)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in Settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, Arc::new(settings), database).await?;

    Ok(())
}
