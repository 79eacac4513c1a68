//! Risk Register Library
//!
//! Core components for lightweight GRC risk assessment.

pub mod classifier;
pub mod db;
pub mod web;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum length (in characters) for the asset and threat fields
pub const TEXT_MAX_CHARS: usize = 200;

/// Lowest accepted likelihood/impact rating
pub const RATING_MIN: u32 = 1;

/// Highest accepted likelihood/impact rating
pub const RATING_MAX: u32 = 5;

/// Severity bucket assigned to a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Fallback for scores outside every band and for unrecognized stored text
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
            RiskLevel::Unknown => "Unknown",
        }
    }

    /// Parse a stored level string. Matching is case-sensitive and
    /// unrecognized values map to `Unknown` rather than an error.
    pub fn parse(s: &str) -> RiskLevel {
        match s {
            "Low" => RiskLevel::Low,
            "Medium" => RiskLevel::Medium,
            "High" => RiskLevel::High,
            "Critical" => RiskLevel::Critical,
            _ => RiskLevel::Unknown,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted risk assessment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Store-assigned identifier, strictly increasing across inserts
    pub id: i64,
    /// Asset under evaluation
    pub asset: String,
    /// Threat scenario against the asset
    pub threat: String,
    /// Likelihood rating, 1-5
    pub likelihood: u32,
    /// Impact rating, 1-5
    pub impact: u32,
    /// likelihood * impact, computed once at creation
    pub score: u32,
    /// Severity bucket for the score, computed once at creation
    pub level: RiskLevel,
}

/// A risk submitted for assessment, before scoring and persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSubmission {
    pub asset: String,
    pub threat: String,
    pub likelihood: u32,
    pub impact: u32,
}

impl RiskSubmission {
    /// Check all field constraints, collecting every violation rather than
    /// stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_text("asset", &self.asset, &mut errors);
        check_text("threat", &self.threat, &mut errors);
        check_rating("likelihood", self.likelihood, &mut errors);
        check_rating("impact", self.impact, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn check_text(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    let chars = value.chars().count();
    if chars == 0 {
        errors.push(FieldError::new(field, "must not be empty"));
    } else if chars > TEXT_MAX_CHARS {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", TEXT_MAX_CHARS),
        ));
    }
}

fn check_rating(field: &'static str, value: u32, errors: &mut Vec<FieldError>) {
    if value < RATING_MIN || value > RATING_MAX {
        errors.push(FieldError::new(
            field,
            format!("must be between {} and {}", RATING_MIN, RATING_MAX),
        ));
    }
}

/// Service configuration, loadable from YAML with environment overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Path to the SQLite database file (defaults to ~/.risk-register/risks.db)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

fn default_listen() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            db_path: None,
        }
    }
}

impl ServiceConfig {
    /// Well-known config location checked when no --config flag is given
    pub const DEFAULT_PATH: &'static str = "config/risk-register.yaml";

    /// Load configuration: defaults, then the YAML file if one exists,
    /// then `RISK_REGISTER_*` environment variables on top.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config file {}", p.display()))?;
                serde_yaml::from_str(&content)
                    .with_context(|| format!("failed to parse config file {}", p.display()))?
            }
            None => {
                let default = Path::new(Self::DEFAULT_PATH);
                if default.exists() {
                    let content = std::fs::read_to_string(default)?;
                    serde_yaml::from_str(&content)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(listen) = std::env::var("RISK_REGISTER_LISTEN") {
            if !listen.is_empty() {
                self.listen = listen;
            }
        }
        if let Ok(db) = std::env::var("RISK_REGISTER_DB") {
            if !db.is_empty() {
                self.db_path = Some(PathBuf::from(db));
            }
        }
    }

    /// Apply command-line flags on top of whatever `load` resolved.
    /// Flags win over both the config file and the environment.
    pub fn apply_overrides(&mut self, listen: Option<String>, db: Option<PathBuf>) {
        if let Some(listen) = listen {
            self.listen = listen;
        }
        if let Some(db) = db {
            self.db_path = Some(db);
        }
    }

    /// Resolve the database path, falling back to the per-user default.
    pub fn resolve_db_path(&self) -> PathBuf {
        match &self.db_path {
            Some(path) => path.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".risk-register")
                .join("risks.db"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(asset: &str, threat: &str, likelihood: u32, impact: u32) -> RiskSubmission {
        RiskSubmission {
            asset: asset.to_string(),
            threat: threat.to_string(),
            likelihood,
            impact,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        let sub = submission("Server A", "Malware", 3, 5);
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn test_empty_asset_rejected() {
        let sub = submission("", "Malware", 3, 5);
        let errors = sub.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "asset");
    }

    #[test]
    fn test_overlong_asset_rejected() {
        let long = "a".repeat(201);
        let sub = submission(&long, "Malware", 3, 5);
        let errors = sub.validate().unwrap_err();
        assert_eq!(errors[0].field, "asset");

        let max = "a".repeat(200);
        assert!(submission(&max, "Malware", 3, 5).validate().is_ok());
    }

    #[test]
    fn test_length_counted_in_characters_not_bytes() {
        // 200 two-byte characters is 400 bytes but still within the limit
        let wide = "é".repeat(200);
        assert!(submission(&wide, "Malware", 3, 5).validate().is_ok());
    }

    #[test]
    fn test_rating_bounds_rejected() {
        for (likelihood, impact) in [(0, 3), (6, 3), (3, 0), (3, 6)] {
            let sub = submission("Server A", "Malware", likelihood, impact);
            assert!(
                sub.validate().is_err(),
                "{}x{} should fail",
                likelihood,
                impact
            );
        }
        for rating in 1..=5 {
            let sub = submission("Server A", "Malware", rating, rating);
            assert!(sub.validate().is_ok());
        }
    }

    #[test]
    fn test_all_violations_collected() {
        let sub = submission("", "", 0, 6);
        let errors = sub.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["asset", "threat", "likelihood", "impact"]);
    }

    #[test]
    fn test_level_round_trip() {
        for level in [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Critical,
            RiskLevel::Unknown,
        ] {
            assert_eq!(RiskLevel::parse(level.as_str()), level);
        }
    }

    #[test]
    fn test_level_parse_is_case_sensitive() {
        assert_eq!(RiskLevel::parse("low"), RiskLevel::Unknown);
        assert_eq!(RiskLevel::parse("HIGH"), RiskLevel::Unknown);
        assert_eq!(RiskLevel::parse("bogus"), RiskLevel::Unknown);
    }

    #[test]
    fn test_level_serializes_as_plain_string() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"High\"");
    }

    #[test]
    fn test_config_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen, "0.0.0.0:8000");
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = "listen: 127.0.0.1:9000\ndb_path: /tmp/risks.db\n";
        let config: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen, "127.0.0.1:9000");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/risks.db")));
    }

    #[test]
    fn test_config_partial_yaml_uses_defaults() {
        let yaml = "db_path: /tmp/risks.db\n";
        let config: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen, "0.0.0.0:8000");
    }

    // The only test that touches RISK_REGISTER_* variables; keeping the
    // whole precedence chain in one test avoids races between parallel
    // tests mutating process environment.
    #[test]
    fn test_config_env_beats_yaml_and_flags_beat_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk-register.yaml");
        std::fs::write(&path, "listen: 10.0.0.1:7000\ndb_path: /tmp/from-yaml.db\n").unwrap();

        std::env::set_var("RISK_REGISTER_LISTEN", "127.0.0.1:9999");
        std::env::set_var("RISK_REGISTER_DB", "/tmp/from-env.db");
        let loaded = ServiceConfig::load(Some(&path));
        std::env::remove_var("RISK_REGISTER_LISTEN");
        std::env::remove_var("RISK_REGISTER_DB");

        let mut config = loaded.unwrap();
        assert_eq!(config.listen, "127.0.0.1:9999");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/from-env.db")));

        config.apply_overrides(
            Some("0.0.0.0:8080".to_string()),
            Some(PathBuf::from("/tmp/from-cli.db")),
        );
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/from-cli.db")));

        // Flags passed as None leave the resolved values alone
        config.apply_overrides(None, None);
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/from-cli.db")));
    }
}
