//! Tolerance evaluation for measured values
//!
//! Measurement cells arrive as free-form strings from data entry. A cell is
//! judged against its row's (+)/(-) tolerance band; an empty or unparsable
//! per-row tolerance falls back to the table's master tolerance. A per-row
//! tolerance of exactly "0" is a valid zero band, not a missing value.

use serde::{Deserialize, Serialize};

/// Result of evaluating one measurement cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CellCheck {
    /// Actual or standard value missing/unparsable: the cell is unevaluated
    NoData,
    /// Both values parsed; deviation = actual - standard
    Measured {
        deviation: f64,
        out_of_tolerance: bool,
    },
}

impl CellCheck {
    /// True only for an evaluated cell outside its band
    pub fn is_out_of_tolerance(&self) -> bool {
        matches!(
            self,
            CellCheck::Measured {
                out_of_tolerance: true,
                ..
            }
        )
    }

    /// Numeric deviation, when the cell could be evaluated
    pub fn deviation(&self) -> Option<f64> {
        match self {
            CellCheck::NoData => None,
            CellCheck::Measured { deviation, .. } => Some(*deviation),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Resolve one side of a tolerance band: the row's own value when it parses
/// (including exactly zero), otherwise the global default, otherwise 0.
pub fn resolve_tolerance(raw: &str, global_default: &str) -> f64 {
    parse_number(raw)
        .or_else(|| parse_number(global_default))
        .unwrap_or(0.0)
}

/// Evaluate one cell: actual vs. standard against the (+)/(-) band.
///
/// Out of tolerance iff `diff > tol_plus || diff < -tol_minus` where
/// `diff = actual - standard`.
pub fn check_tolerance(
    actual: &str,
    standard: &str,
    tol_plus: &str,
    tol_minus: &str,
    global_default: &str,
) -> CellCheck {
    let (Some(act), Some(std)) = (parse_number(actual), parse_number(standard)) else {
        return CellCheck::NoData;
    };

    let tp = resolve_tolerance(tol_plus, global_default);
    let tm = resolve_tolerance(tol_minus, global_default);

    let deviation = act - std;
    CellCheck::Measured {
        deviation,
        out_of_tolerance: deviation > tp || deviation < -tm,
    }
}

/// Format a deviation for display, rounded to 2 decimal places with an
/// explicit sign
pub fn format_deviation(deviation: f64) -> String {
    format!("{:+.2}", deviation)
}
