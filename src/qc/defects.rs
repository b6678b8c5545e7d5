//! Defect aggregation and accept/reject judgement
//!
//! Defect rows carry per-severity counts; the judgement compares the totals
//! against configured maximums. The derivation is an explicit callable so
//! the layer that owns the edit sequence decides when it runs.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// One defect row on an inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub critical: u32,
    #[serde(default)]
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
}

impl DefectRecord {
    pub fn new(description: &str, critical: u32, major: u32, minor: u32) -> Self {
        Self {
            id: format!("d-{}", Ulid::new().to_string().to_lowercase()),
            description: description.to_string(),
            critical,
            major,
            minor,
        }
    }
}

/// Maximum allowed defect counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectThresholds {
    #[serde(default)]
    pub critical_max_allowed: u32,
    /// Major maximum (the source calls this plainly "max allowed")
    #[serde(default)]
    pub max_allowed: u32,
    #[serde(default)]
    pub minor_max_allowed: u32,
}

/// Summed defect counts across all records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefectTotals {
    pub critical: u32,
    pub major: u32,
    pub minor: u32,
}

/// Overall inspection verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallResult {
    Accepted,
    Rejected,
    #[default]
    Pending,
}

impl std::fmt::Display for OverallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallResult::Accepted => write!(f, "ACCEPTED"),
            OverallResult::Rejected => write!(f, "REJECTED"),
            OverallResult::Pending => write!(f, "PENDING"),
        }
    }
}

/// Sum defect counts by severity over all records
pub fn defect_totals(defects: &[DefectRecord]) -> DefectTotals {
    defects.iter().fold(DefectTotals::default(), |acc, d| {
        DefectTotals {
            critical: acc.critical + d.critical,
            major: acc.major + d.major,
            minor: acc.minor + d.minor,
        }
    })
}

/// Derive the verdict: REJECTED when any severity total exceeds its maximum,
/// ACCEPTED otherwise
pub fn judge(defects: &[DefectRecord], thresholds: &DefectThresholds) -> OverallResult {
    let totals = defect_totals(defects);

    let over_critical = totals.critical > thresholds.critical_max_allowed;
    let over_major = totals.major > thresholds.max_allowed;
    let over_minor = totals.minor > thresholds.minor_max_allowed;

    if over_critical || over_major || over_minor {
        OverallResult::Rejected
    } else {
        OverallResult::Accepted
    }
}
