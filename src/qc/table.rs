//! QC measurement table model
//!
//! A grid of size groups (each with color subcolumns) by measurement-point
//! rows. Every structural edit is a whole-table transform returning a new
//! snapshot; groups and rows are never updated independently, so a row
//! always carries exactly one cell per group and each cell exactly one
//! subcolumn per color column, in column order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use ulid::Ulid;

use crate::qc::tolerance::{check_tolerance, CellCheck};

/// One color column within a size group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorColumn {
    pub id: String,
    pub color: String,
}

/// A size group spanning one or more color columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeGroup {
    pub id: String,
    pub size: String,
    pub color_cols: Vec<ColorColumn>,
}

/// Standard value slot for one color column of a row's group cell,
/// positionally aligned with the parent group's color columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubColumn {
    pub id: String,
    pub color: String,
    #[serde(default)]
    pub standard_value: String,
}

/// A row's data for one size group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowGroupCell {
    #[serde(default)]
    pub actual_value: String,
    pub sub_columns: Vec<SubColumn>,
}

/// A measurement-point row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub id: String,
    /// Sequence label within the table ("1", "2", ...)
    pub point: String,
    pub name: String,
    #[serde(default)]
    pub tolerance_plus: String,
    #[serde(default)]
    pub tolerance_minus: String,
    #[serde(default)]
    pub remarks: String,
    /// One entry per table-level group, keyed by group id
    pub groups: BTreeMap<String, RowGroupCell>,
}

/// The whole measurement grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementTable {
    #[serde(default)]
    pub groups: Vec<SizeGroup>,
    #[serde(default)]
    pub rows: Vec<MeasurementRow>,
}

/// One evaluated cell, for tolerance reports and exports
#[derive(Debug, Clone, PartialEq)]
pub struct CellReport {
    pub row_id: String,
    pub row_name: String,
    pub size: String,
    pub color: String,
    pub standard_value: String,
    pub actual_value: String,
    pub check: CellCheck,
}

/// Errors from table edit operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("unknown size group: {0}")]
    UnknownGroup(String),

    #[error("unknown measurement row: {0}")]
    UnknownRow(String),

    #[error("group {group} has no color column at index {index}")]
    UnknownColumn { group: String, index: usize },

    #[error("a size group must keep at least one color column")]
    LastColorColumn,
}

/// A groups/rows desynchronization. This is a programming error: the edit
/// operations keep the table consistent, so it can only appear if a snapshot
/// was constructed or mutated outside them.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("measurement table inconsistent: {0}")]
pub struct StructuralInvariantViolation(pub String);

fn new_id(kind: &str) -> String {
    format!("{}-{}", kind, Ulid::new().to_string().to_lowercase())
}

impl MeasurementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.rows.is_empty()
    }

    fn group_index(&self, group_id: &str) -> Result<usize, TableError> {
        self.groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| TableError::UnknownGroup(group_id.to_string()))
    }

    fn row_index(&self, row_id: &str) -> Result<usize, TableError> {
        self.rows
            .iter()
            .position(|r| r.id == row_id)
            .ok_or_else(|| TableError::UnknownRow(row_id.to_string()))
    }

    /// Append a size group with a single default "Standard" color column,
    /// giving every existing row a matching empty cell
    pub fn add_group(&self, size: &str) -> Self {
        let mut next = self.clone();
        let group_id = new_id("g");
        let color = "Standard".to_string();

        next.groups.push(SizeGroup {
            id: group_id.clone(),
            size: size.to_string(),
            color_cols: vec![ColorColumn {
                id: new_id("c"),
                color: color.clone(),
            }],
        });

        for row in &mut next.rows {
            row.groups.insert(
                group_id.clone(),
                RowGroupCell {
                    actual_value: String::new(),
                    sub_columns: vec![SubColumn {
                        id: new_id("sc"),
                        color: color.clone(),
                        standard_value: String::new(),
                    }],
                },
            );
        }

        debug_assert!(next.check_invariants().is_ok());
        next
    }

    /// Remove a size group and its key from every row
    pub fn remove_group(&self, group_id: &str) -> Result<Self, TableError> {
        let index = self.group_index(group_id)?;

        let mut next = self.clone();
        next.groups.remove(index);
        for row in &mut next.rows {
            row.groups.remove(group_id);
        }

        debug_assert!(next.check_invariants().is_ok());
        Ok(next)
    }

    /// Append a color column to a group, giving every row's matching cell a
    /// positionally-aligned empty subcolumn
    pub fn add_color_column(&self, group_id: &str, color: &str) -> Result<Self, TableError> {
        let index = self.group_index(group_id)?;

        let mut next = self.clone();
        next.groups[index].color_cols.push(ColorColumn {
            id: new_id("c"),
            color: color.to_string(),
        });

        for row in &mut next.rows {
            if let Some(cell) = row.groups.get_mut(group_id) {
                cell.sub_columns.push(SubColumn {
                    id: new_id("sc"),
                    color: color.to_string(),
                    standard_value: String::new(),
                });
            }
        }

        debug_assert!(next.check_invariants().is_ok());
        Ok(next)
    }

    /// Remove the color column at `column_index` from a group and the
    /// positionally-matching subcolumn from every row. Refuses to remove a
    /// group's last remaining column.
    pub fn remove_color_column(
        &self,
        group_id: &str,
        column_index: usize,
    ) -> Result<Self, TableError> {
        let index = self.group_index(group_id)?;
        let group = &self.groups[index];

        if column_index >= group.color_cols.len() {
            return Err(TableError::UnknownColumn {
                group: group_id.to_string(),
                index: column_index,
            });
        }
        if group.color_cols.len() <= 1 {
            return Err(TableError::LastColorColumn);
        }

        let mut next = self.clone();
        next.groups[index].color_cols.remove(column_index);
        for row in &mut next.rows {
            if let Some(cell) = row.groups.get_mut(group_id) {
                if column_index < cell.sub_columns.len() {
                    cell.sub_columns.remove(column_index);
                }
            }
        }

        debug_assert!(next.check_invariants().is_ok());
        Ok(next)
    }

    /// Append a measurement-point row with one empty cell per group, each
    /// carrying one subcolumn per color column. Tolerances default to the
    /// master tolerance when not given.
    pub fn add_row(
        &self,
        name: &str,
        tolerance_plus: Option<&str>,
        tolerance_minus: Option<&str>,
        default_tolerance: &str,
    ) -> Self {
        let mut next = self.clone();

        let mut groups = BTreeMap::new();
        for group in &next.groups {
            groups.insert(
                group.id.clone(),
                RowGroupCell {
                    actual_value: String::new(),
                    sub_columns: group
                        .color_cols
                        .iter()
                        .map(|c| SubColumn {
                            id: new_id("sc"),
                            color: c.color.clone(),
                            standard_value: String::new(),
                        })
                        .collect(),
                },
            );
        }

        next.rows.push(MeasurementRow {
            id: new_id("r"),
            point: (next.rows.len() + 1).to_string(),
            name: name.to_string(),
            tolerance_plus: tolerance_plus.unwrap_or(default_tolerance).to_string(),
            tolerance_minus: tolerance_minus.unwrap_or(default_tolerance).to_string(),
            remarks: String::new(),
            groups,
        });

        debug_assert!(next.check_invariants().is_ok());
        next
    }

    /// Delete a row
    pub fn remove_row(&self, row_id: &str) -> Result<Self, TableError> {
        let index = self.row_index(row_id)?;
        let mut next = self.clone();
        next.rows.remove(index);
        Ok(next)
    }

    /// Set the measured (actual) value of one row's group cell
    pub fn set_actual(
        &self,
        row_id: &str,
        group_id: &str,
        value: &str,
    ) -> Result<Self, TableError> {
        self.group_index(group_id)?;
        let row_index = self.row_index(row_id)?;

        let mut next = self.clone();
        let cell = next.rows[row_index]
            .groups
            .get_mut(group_id)
            .ok_or_else(|| TableError::UnknownGroup(group_id.to_string()))?;
        cell.actual_value = value.to_string();
        Ok(next)
    }

    /// Set the standard value of one subcolumn in a row's group cell
    pub fn set_standard(
        &self,
        row_id: &str,
        group_id: &str,
        column_index: usize,
        value: &str,
    ) -> Result<Self, TableError> {
        self.group_index(group_id)?;
        let row_index = self.row_index(row_id)?;

        let mut next = self.clone();
        let cell = next.rows[row_index]
            .groups
            .get_mut(group_id)
            .ok_or_else(|| TableError::UnknownGroup(group_id.to_string()))?;
        let sub = cell
            .sub_columns
            .get_mut(column_index)
            .ok_or(TableError::UnknownColumn {
                group: group_id.to_string(),
                index: column_index,
            })?;
        sub.standard_value = value.to_string();
        Ok(next)
    }

    /// Set a row's tolerance band
    pub fn set_tolerance(
        &self,
        row_id: &str,
        tolerance_plus: &str,
        tolerance_minus: &str,
    ) -> Result<Self, TableError> {
        let row_index = self.row_index(row_id)?;
        let mut next = self.clone();
        next.rows[row_index].tolerance_plus = tolerance_plus.to_string();
        next.rows[row_index].tolerance_minus = tolerance_minus.to_string();
        Ok(next)
    }

    /// Evaluate every cell of the table against the master tolerance
    pub fn evaluate(&self, default_tolerance: &str) -> Vec<CellReport> {
        let mut reports = Vec::new();
        for row in &self.rows {
            for group in &self.groups {
                let Some(cell) = row.groups.get(&group.id) else {
                    continue;
                };
                for (sub, col) in cell.sub_columns.iter().zip(&group.color_cols) {
                    reports.push(CellReport {
                        row_id: row.id.clone(),
                        row_name: row.name.clone(),
                        size: group.size.clone(),
                        color: col.color.clone(),
                        standard_value: sub.standard_value.clone(),
                        actual_value: cell.actual_value.clone(),
                        check: check_tolerance(
                            &cell.actual_value,
                            &sub.standard_value,
                            &row.tolerance_plus,
                            &row.tolerance_minus,
                            default_tolerance,
                        ),
                    });
                }
            }
        }
        reports
    }

    /// Count of evaluated cells currently outside their band
    pub fn out_of_tolerance_count(&self, default_tolerance: &str) -> usize {
        self.evaluate(default_tolerance)
            .iter()
            .filter(|r| r.check.is_out_of_tolerance())
            .count()
    }

    /// Verify the groups/rows consistency invariant
    pub fn check_invariants(&self) -> Result<(), StructuralInvariantViolation> {
        for row in &self.rows {
            if row.groups.len() != self.groups.len() {
                return Err(StructuralInvariantViolation(format!(
                    "row {} has {} group cells, table has {} groups",
                    row.id,
                    row.groups.len(),
                    self.groups.len()
                )));
            }
            for group in &self.groups {
                let Some(cell) = row.groups.get(&group.id) else {
                    return Err(StructuralInvariantViolation(format!(
                        "row {} is missing a cell for group {}",
                        row.id, group.id
                    )));
                };
                if cell.sub_columns.len() != group.color_cols.len() {
                    return Err(StructuralInvariantViolation(format!(
                        "row {} group {} has {} subcolumns, group has {} color columns",
                        row.id,
                        group.id,
                        cell.sub_columns.len(),
                        group.color_cols.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> MeasurementTable {
        MeasurementTable::new()
            .add_group("S")
            .add_group("M")
            .add_row("Chest Width", Some("0.5"), Some("0.5"), "1.0")
            .add_row("Body Length", None, None, "1.0")
    }

    #[test]
    fn test_add_group_extends_every_row() {
        let table = sample_table();
        let next = table.add_group("L");

        assert_eq!(next.groups.len(), 3);
        for row in &next.rows {
            assert_eq!(row.groups.len(), 3);
        }
        next.check_invariants().unwrap();
        // The source snapshot is untouched
        assert_eq!(table.groups.len(), 2);
    }

    #[test]
    fn test_new_group_has_standard_column() {
        let table = MeasurementTable::new().add_group("S");
        assert_eq!(table.groups[0].color_cols.len(), 1);
        assert_eq!(table.groups[0].color_cols[0].color, "Standard");
    }

    #[test]
    fn test_add_remove_group_roundtrip() {
        let table = sample_table();
        let with_extra = table.add_group("XL");
        let group_id = with_extra.groups.last().unwrap().id.clone();
        let restored = with_extra.remove_group(&group_id).unwrap();

        assert_eq!(restored.rows.len(), table.rows.len());
        assert_eq!(restored, table);
    }

    #[test]
    fn test_remove_unknown_group() {
        let table = sample_table();
        let err = table.remove_group("g-missing").unwrap_err();
        assert_eq!(err, TableError::UnknownGroup("g-missing".to_string()));
    }

    #[test]
    fn test_add_color_column_aligns_rows() {
        let table = sample_table();
        let group_id = table.groups[0].id.clone();
        let next = table.add_color_column(&group_id, "Navy").unwrap();

        assert_eq!(next.groups[0].color_cols.len(), 2);
        assert_eq!(next.groups[0].color_cols[1].color, "Navy");
        for row in &next.rows {
            let cell = &row.groups[&group_id];
            assert_eq!(cell.sub_columns.len(), 2);
            assert_eq!(cell.sub_columns[1].color, "Navy");
            assert_eq!(cell.sub_columns[1].standard_value, "");
        }
        next.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_color_column_is_positional() {
        let table = sample_table();
        let group_id = table.groups[0].id.clone();
        let table = table.add_color_column(&group_id, "Navy").unwrap();
        let table = table.add_color_column(&group_id, "Red").unwrap();
        let row_id = table.rows[0].id.clone();
        let table = table.set_standard(&row_id, &group_id, 1, "55").unwrap();
        let table = table.set_standard(&row_id, &group_id, 2, "56").unwrap();

        let next = table.remove_color_column(&group_id, 1).unwrap();
        assert_eq!(next.groups[0].color_cols.len(), 2);
        assert_eq!(next.groups[0].color_cols[1].color, "Red");
        let cell = &next.rows[0].groups[&group_id];
        assert_eq!(cell.sub_columns.len(), 2);
        // The Navy value is gone, the Red value kept its alignment
        assert_eq!(cell.sub_columns[1].standard_value, "56");
        next.check_invariants().unwrap();
    }

    #[test]
    fn test_last_color_column_is_protected() {
        let table = sample_table();
        let group_id = table.groups[0].id.clone();
        let err = table.remove_color_column(&group_id, 0).unwrap_err();
        assert_eq!(err, TableError::LastColorColumn);
    }

    #[test]
    fn test_remove_color_column_bad_index() {
        let table = sample_table();
        let group_id = table.groups[0].id.clone();
        let err = table.remove_color_column(&group_id, 5).unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn { .. }));
    }

    #[test]
    fn test_add_row_spans_all_groups() {
        let table = sample_table();
        let row = table.rows.last().unwrap();
        assert_eq!(row.groups.len(), 2);
        assert_eq!(row.point, "2");
        // Default tolerance applied when none given
        assert_eq!(row.tolerance_plus, "1.0");
        assert_eq!(row.tolerance_minus, "1.0");
        // Explicit tolerance kept
        assert_eq!(table.rows[0].tolerance_plus, "0.5");
    }

    #[test]
    fn test_remove_row() {
        let table = sample_table();
        let row_id = table.rows[0].id.clone();
        let next = table.remove_row(&row_id).unwrap();
        assert_eq!(next.rows.len(), 1);
        assert_eq!(next.rows[0].name, "Body Length");

        let err = next.remove_row(&row_id).unwrap_err();
        assert!(matches!(err, TableError::UnknownRow(_)));
    }

    #[test]
    fn test_set_values_and_evaluate() {
        let table = sample_table();
        let group_id = table.groups[0].id.clone();
        let row_id = table.rows[0].id.clone();

        let table = table.set_standard(&row_id, &group_id, 0, "50").unwrap();
        let table = table.set_actual(&row_id, &group_id, "51").unwrap();

        let reports = table.evaluate("1.0");
        let report = reports
            .iter()
            .find(|r| r.row_id == row_id && r.size == "S")
            .unwrap();
        // Row tolerance is 0.5, deviation 1.0 -> out of spec
        assert!(report.check.is_out_of_tolerance());
        assert_eq!(table.out_of_tolerance_count("1.0"), 1);
    }

    #[test]
    fn test_unfilled_cells_are_no_data() {
        let table = sample_table();
        let reports = table.evaluate("1.0");
        assert!(reports.iter().all(|r| r.check == CellCheck::NoData));
        assert_eq!(table.out_of_tolerance_count("1.0"), 0);
    }

    #[test]
    fn test_invariant_detects_desync() {
        let mut table = sample_table();
        // Simulate an out-of-band mutation breaking the alignment
        let group_id = table.groups[0].id.clone();
        table.rows[0].groups.remove(&group_id);
        assert!(table.check_invariants().is_err());
    }

    #[test]
    fn test_snapshot_clone_shares_nothing() {
        let table = sample_table();
        let group_id = table.groups[0].id.clone();
        let row_id = table.rows[0].id.clone();

        let copy = table.clone();
        let edited = copy.set_actual(&row_id, &group_id, "99").unwrap();

        assert_eq!(table.rows[0].groups[&group_id].actual_value, "");
        assert_eq!(edited.rows[0].groups[&group_id].actual_value, "99");
    }

    #[test]
    fn test_table_roundtrip() {
        let table = sample_table();
        let yaml = serde_yml::to_string(&table).unwrap();
        let parsed: MeasurementTable = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(table, parsed);
        parsed.check_invariants().unwrap();

        let json = serde_json::to_string(&table).unwrap();
        let parsed: MeasurementTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, parsed);
    }
}
