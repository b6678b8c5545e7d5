//! Inspection entity - a QC inspection record for one style
//!
//! An inspection carries its own approval workflow (the qc_inspect section)
//! plus the measured data: the measurement grid, defect rows, thresholds,
//! and the derived overall judgement. Content edits are refused while the
//! workflow is locked, and so is judgement recomputation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{DocId, DocPrefix};
use crate::core::workflow::{WorkflowError, WorkflowState};
use crate::entities::Document;
use crate::qc::defects::{judge, DefectRecord, DefectThresholds, OverallResult};
use crate::qc::table::MeasurementTable;

/// Measured data of one inspection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionData {
    /// Supplier under inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,

    /// Inspector conducting the visit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector_name: Option<String>,

    /// Date of the inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<NaiveDate>,

    /// Purchase order under inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Total order quantity in pieces
    #[serde(default)]
    pub total_order_quantity: u32,

    /// Pieces measured
    #[serde(default)]
    pub measurement_qty: u32,

    /// Pieces visually controlled
    #[serde(default)]
    pub controlled_qty: u32,

    /// Defect rows found during the visit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defects: Vec<DefectRecord>,

    /// Maximum allowed defect counts per severity
    #[serde(default)]
    pub thresholds: DefectThresholds,

    /// Derived verdict (PENDING until defect data exists)
    #[serde(default)]
    pub overall_result: OverallResult,

    /// Inspector's judgement commentary
    #[serde(default)]
    pub judgement_comments: String,

    /// The QC measurement grid
    #[serde(default)]
    pub measurement_table: MeasurementTable,

    /// Master tolerance applied when a measurement row has none
    #[serde(default = "default_master_tolerance")]
    pub master_tolerance: String,

    /// Free-form remarks
    #[serde(default)]
    pub remarks: String,
}

fn default_master_tolerance() -> String {
    "1.0".to_string()
}

/// A QC inspection document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    /// Unique identifier
    pub id: DocId,

    /// The style this inspection belongs to
    pub style_id: DocId,

    /// Inspection phase name (e.g., "Inline Inspection", "Final Inspection")
    pub inspection_type: String,

    /// Approval workflow governing this inspection
    #[serde(default)]
    pub workflow: WorkflowState,

    /// Measured data
    #[serde(default)]
    pub data: InspectionData,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this inspection)
    pub author: String,
}

impl Document for Inspection {
    const PREFIX: &'static str = "INSP";

    fn id(&self) -> &DocId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.inspection_type
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Inspection {
    /// Create a new inspection with the given parameters
    pub fn new(
        style_id: DocId,
        inspection_type: String,
        author: String,
        master_tolerance: String,
    ) -> Self {
        Self {
            id: DocId::new(DocPrefix::Insp),
            style_id,
            inspection_type,
            workflow: WorkflowState::new(),
            data: InspectionData {
                inspection_date: Some(chrono::Local::now().date_naive()),
                master_tolerance,
                ..InspectionData::default()
            },
            created: Utc::now(),
            author,
        }
    }

    /// Whether content edits are currently refused
    pub fn is_locked(&self) -> bool {
        self.workflow.is_locked()
    }

    /// Refuse a content edit while the workflow is submitted or approved
    pub fn ensure_unlocked(&self) -> Result<(), WorkflowError> {
        if self.is_locked() {
            return Err(WorkflowError::SectionLocked {
                status: self.workflow.status,
            });
        }
        Ok(())
    }

    /// Recompute the overall judgement from defect data.
    ///
    /// Does nothing while the workflow is locked (a judged record must not
    /// silently flip its verdict) or while no defect row exists (the verdict
    /// stays PENDING until there is data to judge). Once defect rows exist
    /// the derivation overwrites whatever was stored before.
    pub fn refresh_judgement(&mut self) -> OverallResult {
        if !self.is_locked() && !self.data.defects.is_empty() {
            self.data.overall_result = judge(&self.data.defects, &self.data.thresholds);
        }
        self.data.overall_result
    }

    /// Start a new inspection phase carrying over all data from this one.
    ///
    /// The copy is a value copy: every nested structure is freshly owned, so
    /// later edits never alias the source phase. The new phase gets a fresh
    /// id and workflow, today's date, and a PENDING verdict for re-review.
    pub fn new_phase(&self, phase_name: &str, author: String) -> Self {
        let mut data = self.data.clone();
        data.overall_result = OverallResult::Pending;
        data.inspection_date = Some(chrono::Local::now().date_naive());

        Self {
            id: DocId::new(DocPrefix::Insp),
            style_id: self.style_id.clone(),
            inspection_type: phase_name.to_string(),
            workflow: WorkflowState::new(),
            data,
            created: Utc::now(),
            author,
        }
    }

    /// Copy another inspection's measurement table and master tolerance into
    /// this one, but only while this table is still empty. Returns whether
    /// anything was copied.
    pub fn seed_measurements_from(&mut self, source: &Inspection) -> bool {
        if !self.data.measurement_table.is_empty() {
            return false;
        }
        if source.data.measurement_table.is_empty() {
            return false;
        }
        self.data.measurement_table = source.data.measurement_table.clone();
        self.data.master_tolerance = source.data.master_tolerance.clone();
        true
    }
}
