//! Approval workflow engine for document sections
//!
//! A finite state machine over DRAFT/SUBMITTED/APPROVED/REJECTED with an
//! append-only audit trail. Every transition is a pure transform: it takes a
//! workflow snapshot and returns a new one, or an error with no side effects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

use crate::core::access::{AccessLevel, AccessMap, SectionId, UserRole};
use crate::core::actor::Actor;

/// Approval status of a document section
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Locked statuses refuse all content edits until a transition releases them
    pub fn is_locked(&self) -> bool {
        matches!(self, ApprovalStatus::Submitted | ApprovalStatus::Approved)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Draft => write!(f, "DRAFT"),
            ApprovalStatus::Submitted => write!(f, "SUBMITTED"),
            ApprovalStatus::Approved => write!(f, "APPROVED"),
            ApprovalStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(ApprovalStatus::Draft),
            "SUBMITTED" => Ok(ApprovalStatus::Submitted),
            "APPROVED" => Ok(ApprovalStatus::Approved),
            "REJECTED" => Ok(ApprovalStatus::Rejected),
            _ => Err(format!("Unknown approval status: {}", s)),
        }
    }
}

/// Workflow transition actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalAction {
    Submit,
    Recall,
    Approve,
    Reject,
    RequestRevision,
}

impl std::fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalAction::Submit => write!(f, "SUBMIT"),
            ApprovalAction::Recall => write!(f, "RECALL"),
            ApprovalAction::Approve => write!(f, "APPROVE"),
            ApprovalAction::Reject => write!(f, "REJECT"),
            ApprovalAction::RequestRevision => write!(f, "REQUEST_REVISION"),
        }
    }
}

impl std::str::FromStr for ApprovalAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUBMIT" => Ok(ApprovalAction::Submit),
            "RECALL" => Ok(ApprovalAction::Recall),
            "APPROVE" => Ok(ApprovalAction::Approve),
            "REJECT" => Ok(ApprovalAction::Reject),
            "REQUEST_REVISION" => Ok(ApprovalAction::RequestRevision),
            _ => Err(format!("Unknown approval action: {}", s)),
        }
    }
}

/// One entry in a section's immutable audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowAction {
    pub id: String,
    pub action: ApprovalAction,
    pub user_id: String,
    pub user_name: String,
    pub user_role: UserRole,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Approval workflow state of one document section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    #[serde(default)]
    pub status: ApprovalStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_comment: Option<String>,

    /// Append-only history of every transition, oldest first
    #[serde(default)]
    pub history: Vec<WorkflowAction>,
}

impl WorkflowState {
    /// A fresh section workflow: DRAFT with an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Content edits are refused while the section is submitted or approved
    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }
}

/// Errors that can occur during workflow operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("action {action:?} is not valid from status {status}")]
    IllegalTransition {
        status: ApprovalStatus,
        action: ApprovalAction,
    },

    #[error("role {role} is not permitted to perform {action:?}")]
    Forbidden {
        role: UserRole,
        action: ApprovalAction,
    },

    #[error("a non-empty rejection comment is required")]
    MissingRequiredComment,

    #[error("section is locked for editing (status: {status})")]
    SectionLocked { status: ApprovalStatus },
}

/// Roles that may submit, recall, and request revision
pub fn submitter_roles() -> &'static [UserRole] {
    &[
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Director,
        UserRole::Merchandiser,
        UserRole::Qc,
    ]
}

/// Roles that may approve and reject
pub fn approver_roles() -> &'static [UserRole] {
    &[UserRole::SuperAdmin, UserRole::Admin, UserRole::Director]
}

/// Whether `action` is legal from `status`, ignoring authorization
pub fn is_valid_transition(status: ApprovalStatus, action: ApprovalAction) -> bool {
    matches!(
        (status, action),
        (ApprovalStatus::Draft, ApprovalAction::Submit)
            | (ApprovalStatus::Rejected, ApprovalAction::Submit)
            | (ApprovalStatus::Submitted, ApprovalAction::Recall)
            | (ApprovalStatus::Submitted, ApprovalAction::Approve)
            | (ApprovalStatus::Submitted, ApprovalAction::Reject)
            | (ApprovalStatus::Approved, ApprovalAction::RequestRevision)
    )
}

/// Actions legal from the given status, ignoring authorization
pub fn allowed_actions(status: ApprovalStatus) -> Vec<ApprovalAction> {
    match status {
        ApprovalStatus::Draft => vec![ApprovalAction::Submit],
        ApprovalStatus::Submitted => vec![
            ApprovalAction::Recall,
            ApprovalAction::Approve,
            ApprovalAction::Reject,
        ],
        ApprovalStatus::Approved => vec![ApprovalAction::RequestRevision],
        ApprovalStatus::Rejected => vec![ApprovalAction::Submit],
    }
}

/// Whether `role` is in the role set required for `action`.
///
/// RECALL is open to submitters and approvers; the remaining actions split
/// between the two sets.
pub fn role_may(role: UserRole, action: ApprovalAction) -> bool {
    match action {
        ApprovalAction::Submit | ApprovalAction::RequestRevision => {
            submitter_roles().contains(&role)
        }
        ApprovalAction::Recall => {
            submitter_roles().contains(&role) || approver_roles().contains(&role)
        }
        ApprovalAction::Approve | ApprovalAction::Reject => approver_roles().contains(&role),
    }
}

/// Glue between the state machine and the access model: holds the acting
/// user and their resolved section access, and exposes the transition
/// operations gated on both.
pub struct ApprovalEngine<'a> {
    actor: &'a Actor,
    access: &'a AccessMap,
}

impl<'a> ApprovalEngine<'a> {
    pub fn new(actor: &'a Actor, access: &'a AccessMap) -> Self {
        Self { actor, access }
    }

    /// Actions currently legal for this actor on the given workflow/section
    pub fn available_actions(
        &self,
        workflow: &WorkflowState,
        section: SectionId,
    ) -> Vec<ApprovalAction> {
        if !self.access.has_access(section, AccessLevel::Full) {
            return Vec::new();
        }
        allowed_actions(workflow.status)
            .into_iter()
            .filter(|a| role_may(self.actor.role, *a))
            .collect()
    }

    /// Attempt a transition on behalf of the engine's actor.
    ///
    /// Validation order: transition legality, then authorization (role set
    /// and full section access), then the rejection-comment requirement.
    /// Nothing is recorded on a rejected attempt.
    pub fn attempt(
        &self,
        workflow: &WorkflowState,
        action: ApprovalAction,
        section: SectionId,
        comment: Option<&str>,
    ) -> Result<WorkflowState, WorkflowError> {
        if !is_valid_transition(workflow.status, action) {
            return Err(WorkflowError::IllegalTransition {
                status: workflow.status,
                action,
            });
        }

        if !role_may(self.actor.role, action)
            || !self.access.has_access(section, AccessLevel::Full)
        {
            return Err(WorkflowError::Forbidden {
                role: self.actor.role,
                action,
            });
        }

        let comment = comment.map(str::trim).filter(|c| !c.is_empty());
        if action == ApprovalAction::Reject && comment.is_none() {
            return Err(WorkflowError::MissingRequiredComment);
        }

        Ok(apply_transition(workflow, action, self.actor, comment, Utc::now()))
    }
}

/// Apply a validated transition, producing the successor snapshot with one
/// appended history entry. Callers must have validated legality, role, and
/// comment beforehand (`ApprovalEngine::attempt` does).
pub fn apply_transition(
    workflow: &WorkflowState,
    action: ApprovalAction,
    actor: &Actor,
    comment: Option<&str>,
    now: DateTime<Utc>,
) -> WorkflowState {
    let mut next = workflow.clone();

    match action {
        ApprovalAction::Submit => {
            next.status = ApprovalStatus::Submitted;
            next.submitted_by = Some(actor.display_name.clone());
            next.submitted_at = Some(now);
            next.rejected_by = None;
            next.rejected_at = None;
            next.rejection_comment = None;
        }
        ApprovalAction::Recall => {
            next.status = ApprovalStatus::Draft;
            next.submitted_by = None;
            next.submitted_at = None;
        }
        ApprovalAction::Approve => {
            next.status = ApprovalStatus::Approved;
            next.approved_by = Some(actor.display_name.clone());
            next.approved_at = Some(now);
        }
        ApprovalAction::Reject => {
            next.status = ApprovalStatus::Rejected;
            next.rejected_by = Some(actor.display_name.clone());
            next.rejected_at = Some(now);
            next.rejection_comment = comment.map(str::to_string);
            next.approved_by = None;
            next.approved_at = None;
        }
        ApprovalAction::RequestRevision => {
            next.status = ApprovalStatus::Draft;
            next.approved_by = None;
            next.approved_at = None;
        }
    }

    next.history.push(WorkflowAction {
        id: Ulid::new().to_string(),
        action,
        user_id: actor.id.clone(),
        user_name: actor.display_name.clone(),
        user_role: actor.role,
        timestamp: now,
        comments: comment.map(str::to_string),
    });

    next
}
