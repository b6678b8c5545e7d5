//! Core module - identity, access control, workflow, and persistence

pub mod access;
pub mod actor;
pub mod config;
pub mod identity;
pub mod project;
pub mod store;
pub mod workflow;

pub use access::{
    can_manage_roles, can_manage_users, effective_access, role_defaults, AccessLevel, AccessMap,
    SectionId, UserRole,
};
pub use actor::Actor;
pub use config::Config;
pub use identity::{DocId, DocPrefix, IdParseError};
pub use project::{Project, ProjectError};
pub use store::{DocStore, StoreError};
pub use workflow::{
    allowed_actions, apply_transition, approver_roles, is_valid_transition, role_may,
    submitter_roles, ApprovalAction, ApprovalEngine, ApprovalStatus, WorkflowAction,
    WorkflowError, WorkflowState,
};
