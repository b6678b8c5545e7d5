//! Style entity - the owning production document
//!
//! A style carries the garment-level header data and one approval workflow
//! per content section. Section workflows are created lazily in DRAFT the
//! first time a section is acted on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::access::SectionId;
use crate::core::identity::{DocId, DocPrefix};
use crate::core::workflow::WorkflowState;
use crate::entities::Document;

/// A style document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    /// Unique identifier
    pub id: DocId,

    /// Style title (e.g., "Crew Neck Sweater FW26")
    pub title: String,

    /// Buyer style number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_number: Option<String>,

    /// Season code (e.g., "FW26")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// Per-section approval workflows, created on first use
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<SectionId, WorkflowState>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this style)
    pub author: String,
}

impl Document for Style {
    const PREFIX: &'static str = "STYLE";

    fn id(&self) -> &DocId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Style {
    /// Create a new style with the given parameters
    pub fn new(title: String, author: String) -> Self {
        Self {
            id: DocId::new(DocPrefix::Style),
            title,
            style_number: None,
            season: None,
            sections: BTreeMap::new(),
            created: Utc::now(),
            author,
        }
    }

    /// The workflow of a section, defaulting to a fresh DRAFT when the
    /// section has never been acted on
    pub fn section_workflow(&self, section: SectionId) -> WorkflowState {
        self.sections.get(&section).cloned().unwrap_or_default()
    }

    /// Store the new workflow snapshot for a section
    pub fn set_section_workflow(&mut self, section: SectionId, workflow: WorkflowState) {
        self.sections.insert(section, workflow);
    }

    /// Whether content edits to a section are currently refused
    pub fn section_locked(&self, section: SectionId) -> bool {
        self.section_workflow(section).is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workflow::ApprovalStatus;

    #[test]
    fn test_style_creation() {
        let style = Style::new("Crew Neck Sweater".to_string(), "test".to_string());
        assert!(style.id.to_string().starts_with("STYLE-"));
        assert_eq!(style.title, "Crew Neck Sweater");
        assert!(style.sections.is_empty());
    }

    #[test]
    fn test_untouched_section_defaults_to_draft() {
        let style = Style::new("Cardigan".to_string(), "test".to_string());
        let workflow = style.section_workflow(SectionId::TechPack);
        assert_eq!(workflow.status, ApprovalStatus::Draft);
        assert!(workflow.history.is_empty());
        assert!(!style.section_locked(SectionId::TechPack));
    }

    #[test]
    fn test_set_section_workflow() {
        let mut style = Style::new("Polo".to_string(), "test".to_string());
        let mut workflow = WorkflowState::new();
        workflow.status = ApprovalStatus::Submitted;
        style.set_section_workflow(SectionId::OrderSheet, workflow);

        assert!(style.section_locked(SectionId::OrderSheet));
        assert!(!style.section_locked(SectionId::TechPack));
    }

    #[test]
    fn test_style_roundtrip() {
        let mut style = Style::new("Hoodie".to_string(), "test".to_string());
        style.style_number = Some("ZR-2231".to_string());
        style.set_section_workflow(SectionId::TechPack, WorkflowState::new());

        let yaml = serde_yml::to_string(&style).unwrap();
        let parsed: Style = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(style.id, parsed.id);
        assert_eq!(style.style_number, parsed.style_number);
        assert!(parsed.sections.contains_key(&SectionId::TechPack));
    }
}
