//! Subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod settings;
pub mod user;

use sqlx::PgPool;

use champ_storefront::{config, db};

/// Load the database URL from the environment and connect.
async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let database_url = config::database_url_from_env()?;

    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&database_url).await?)
}
