//! SQLite store for risk assessment records
//!
//! Records are append-only: they are inserted once and never updated or
//! deleted. Compliance hints are never written here; callers recompute
//! them from the stored level on every read.

use super::{RiskAssessment, RiskLevel, RiskSubmission};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database, creating parent directories as needed
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Connect without touching the schema. Request handlers use this;
    /// the schema itself is created once at startup or by `migrate`.
    pub fn connect(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Initialize database schema. Safe to run on every open.
    fn initialize(&self) -> anyhow::Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS risks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asset TEXT NOT NULL,
                threat TEXT NOT NULL,
                likelihood INTEGER NOT NULL,
                impact INTEGER NOT NULL,
                score INTEGER NOT NULL,
                level TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_risks_level ON risks(level);
            "#,
        )?;

        info!("Database initialized");
        Ok(())
    }

    /// Insert a scored risk and return the stored record with its new id
    pub fn insert_risk(
        &self,
        submission: &RiskSubmission,
        score: u32,
        level: RiskLevel,
    ) -> anyhow::Result<RiskAssessment> {
        self.conn.execute(
            r#"
            INSERT INTO risks (asset, threat, likelihood, impact, score, level)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                submission.asset,
                submission.threat,
                submission.likelihood,
                submission.impact,
                score,
                level.as_str(),
            ],
        )?;

        Ok(RiskAssessment {
            id: self.conn.last_insert_rowid(),
            asset: submission.asset.clone(),
            threat: submission.threat.clone(),
            likelihood: submission.likelihood,
            impact: submission.impact,
            score,
            level,
        })
    }

    /// List records in insertion order, optionally restricted to an exact
    /// level string. Matching is case-sensitive; an unmatched filter yields
    /// an empty list, not an error.
    pub fn list_risks(&self, level: Option<&str>) -> anyhow::Result<Vec<RiskAssessment>> {
        match level {
            Some(level) => {
                let mut stmt = self.conn.prepare(
                    r#"
                    SELECT id, asset, threat, likelihood, impact, score, level
                    FROM risks
                    WHERE level = ?1
                    ORDER BY id
                    "#,
                )?;
                let rows = stmt.query_map([level], map_risk_row)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
            None => {
                let mut stmt = self.conn.prepare(
                    r#"
                    SELECT id, asset, threat, likelihood, impact, score, level
                    FROM risks
                    ORDER BY id
                    "#,
                )?;
                let rows = stmt.query_map([], map_risk_row)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
        }
    }

    /// Aggregate counts across the register
    pub fn summary(&self) -> anyhow::Result<RiskSummary> {
        let (total, average_score): (i64, f64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(AVG(score), 0.0) FROM risks",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut summary = RiskSummary {
            total,
            low: 0,
            medium: 0,
            high: 0,
            critical: 0,
            high_or_critical: 0,
            average_score,
        };

        let mut stmt = self
            .conn
            .prepare("SELECT level, COUNT(*) FROM risks GROUP BY level")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        for row in rows {
            let (level, count) = row?;
            match RiskLevel::parse(&level) {
                RiskLevel::Low => summary.low = count,
                RiskLevel::Medium => summary.medium = count,
                RiskLevel::High => summary.high = count,
                RiskLevel::Critical => summary.critical = count,
                RiskLevel::Unknown => {}
            }
        }
        summary.high_or_critical = summary.high + summary.critical;

        Ok(summary)
    }

    /// Count stored risks per likelihood/impact cell.
    ///
    /// Indexed as `counts[likelihood - 1][impact - 1]`.
    pub fn matrix_counts(&self) -> anyhow::Result<[[i64; 5]; 5]> {
        let mut counts = [[0i64; 5]; 5];
        let mut stmt = self
            .conn
            .prepare("SELECT likelihood, impact, COUNT(*) FROM risks GROUP BY likelihood, impact")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        for row in rows {
            let (likelihood, impact, count) = row?;
            if (1..=5).contains(&likelihood) && (1..=5).contains(&impact) {
                counts[likelihood as usize - 1][impact as usize - 1] = count;
            }
        }

        Ok(counts)
    }
}

fn map_risk_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RiskAssessment> {
    Ok(RiskAssessment {
        id: row.get(0)?,
        asset: row.get(1)?,
        threat: row.get(2)?,
        likelihood: row.get(3)?,
        impact: row.get(4)?,
        score: row.get(5)?,
        level: RiskLevel::parse(&row.get::<_, String>(6)?),
    })
}

/// Aggregate view over the whole register
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RiskSummary {
    pub total: i64,
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub critical: i64,
    pub high_or_critical: i64,
    pub average_score: f64,
}
