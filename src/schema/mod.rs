//! Schema system - embedded JSON schemas and document validation

pub mod registry;
pub mod validator;

pub use registry::SchemaRegistry;
pub use validator::{ValidationIssue, ValidationResult, Validator, ValidatorError};
