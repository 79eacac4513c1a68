//! Serve command - runs the HTTP API server

use risk_register::web;
use risk_register::ServiceConfig;
use std::path::{Path, PathBuf};
use tracing::info;

pub async fn run(
    config_path: Option<&Path>,
    listen: Option<String>,
    db: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = ServiceConfig::load(config_path)?;
    config.apply_overrides(listen, db);

    let db_path = config.resolve_db_path();
    info!("Using database at {}", db_path.display());

    web::start_server(&config.listen, db_path).await
}
