//! Risk classification
//!
//! Pure scoring over a static band table. Likelihood and impact multiply
//! into a score, the score maps onto a severity level, and elevated levels
//! carry a compliance hint. Nothing here touches storage.

use crate::RiskLevel;

/// Inclusive score bands, scanned in order; first match wins
const RISK_BANDS: &[(u32, u32, RiskLevel)] = &[
    (1, 5, RiskLevel::Low),
    (6, 12, RiskLevel::Medium),
    (13, 18, RiskLevel::High),
    (19, 25, RiskLevel::Critical),
];

/// Guidance attached to levels that demand follow-up
const COMPLIANCE_HINTS: &[(RiskLevel, &str)] = &[
    (RiskLevel::High, "Prioritize per NIST SP 800-30"),
    (RiskLevel::Critical, "Immediate executive action required"),
];

/// Score a risk as likelihood * impact and bucket the score into a
/// severity level.
///
/// A score outside every band maps to `RiskLevel::Unknown` rather than
/// an error, so the function is total over its inputs.
pub fn calculate_risk(likelihood: u32, impact: u32) -> (u32, RiskLevel) {
    let score = likelihood.saturating_mul(impact);
    let level = RISK_BANDS
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&score))
        .map(|(_, _, level)| *level)
        .unwrap_or(RiskLevel::Unknown);
    (score, level)
}

/// Compliance guidance for a level, if any. Only High and Critical carry
/// a hint; absence for the other levels is expected, not an error.
pub fn compliance_hint(level: RiskLevel) -> Option<&'static str> {
    COMPLIANCE_HINTS
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, hint)| *hint)
}
