//! Migrate command - creates the database schema and exits

use risk_register::db::Database;
use risk_register::ServiceConfig;
use std::path::{Path, PathBuf};

pub async fn run(config_path: Option<&Path>, db: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = ServiceConfig::load(config_path)?;
    config.apply_overrides(None, db);

    let db_path = config.resolve_db_path();
    Database::open(&db_path)?;

    println!("✅ Schema ready at {}", db_path.display());

    Ok(())
}
