//! QC module - tolerance evaluation, measurement tables, defect judgement

pub mod defects;
pub mod table;
pub mod tolerance;

pub use defects::{defect_totals, judge, DefectRecord, DefectThresholds, DefectTotals, OverallResult};
pub use table::{
    CellReport, ColorColumn, MeasurementRow, MeasurementTable, RowGroupCell, SizeGroup,
    StructuralInvariantViolation, SubColumn, TableError,
};
pub use tolerance::{check_tolerance, format_deviation, resolve_tolerance, CellCheck};
