use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

use crate::config::Config;

/// Connects to MongoDB and confirms the server answers a `ping`. Called once
/// at startup; an error here should stop the process.
pub async fn init_db(config: &Config) -> Result<Database> {
    let mut options = ClientOptions::parse(&config.database_url)
        .await
        .context("DATABASE_URL is not a valid MongoDB connection string")?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.connect_timeout = Some(config.store_timeout);
    options.server_selection_timeout = Some(config.store_timeout);

    let client = Client::with_options(options).context("Failed to build MongoDB client")?;
    let database = client.database(&config.database_name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .context("Failed to connect to MongoDB")?;

    info!(database = %config.database_name, "MongoDB connected successfully");

    Ok(database)
}
