//! Create the companies table without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use companies_server::{create_pool, init_schema, CompanyRepo};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (default: sqlite://companies.db)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let store = super::store_config(args.database_url, None);

    let pool = create_pool(&store)
        .await
        .with_context(|| format!("Failed to open database {}", store.database_url))?;

    init_schema(&pool)
        .await
        .context("Failed to initialise schema")?;

    let count = CompanyRepo::new(&pool).count().await?;
    println!("✅ Schema ready at {} ({} companies)", store.database_url, count);

    pool.close().await;
    Ok(())
}
