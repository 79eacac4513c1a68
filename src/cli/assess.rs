//! Assess command - scores a risk from the command line

use risk_register::classifier::{calculate_risk, compliance_hint};
use risk_register::db::Database;
use risk_register::{RiskSubmission, ServiceConfig};
use std::path::{Path, PathBuf};

pub async fn run(
    config_path: Option<&Path>,
    asset: String,
    threat: String,
    likelihood: u32,
    impact: u32,
    save: bool,
    db: Option<PathBuf>,
) -> anyhow::Result<()> {
    let submission = RiskSubmission {
        asset,
        threat,
        likelihood,
        impact,
    };

    if let Err(errors) = submission.validate() {
        eprintln!("Invalid submission:");
        for err in &errors {
            eprintln!("  - {}: {}", err.field, err.message);
        }
        std::process::exit(1);
    }

    let (score, level) = calculate_risk(submission.likelihood, submission.impact);

    println!("Risk assessment");
    println!("───────────────");
    println!("Asset:  {}", submission.asset);
    println!("Threat: {}", submission.threat);
    println!(
        "Score:  {} ({} x {})",
        score, submission.likelihood, submission.impact
    );
    println!("Level:  {}", level);
    if let Some(hint) = compliance_hint(level) {
        println!("Hint:   {}", hint);
    }

    if save {
        let mut config = ServiceConfig::load(config_path)?;
        config.apply_overrides(None, db);

        let db_path = config.resolve_db_path();
        let database = Database::open(&db_path)?;
        let record = database.insert_risk(&submission, score, level)?;

        println!("\n💾 Saved as record {} in {}", record.id, db_path.display());
    }

    Ok(())
}
