//! Schema validation for document YAML files

use jsonschema::{validator_for, Validator as JsonValidator};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::identity::DocPrefix;
use crate::schema::registry::SchemaRegistry;

/// A single validation issue with its location in the document
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// JSON-pointer-style path into the document ("/data/defects/0")
    pub path: String,
    pub message: String,
}

/// Result of validating one document
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    pub fn failure(issues: Vec<ValidationIssue>) -> Self {
        Self {
            valid: false,
            issues,
        }
    }
}

/// Errors preventing validation from running at all
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("failed to parse YAML: {0}")]
    InvalidYaml(String),

    #[error("embedded schema for {0} is invalid: {1}")]
    BadSchema(DocPrefix, String),
}

/// Schema validator with compiled schemas
pub struct Validator {
    compiled: HashMap<DocPrefix, JsonValidator>,
}

impl Validator {
    /// Compile the embedded schemas
    pub fn new() -> Result<Self, ValidatorError> {
        let mut compiled = HashMap::new();

        for prefix in DocPrefix::all() {
            if let Some(schema_str) = SchemaRegistry::get(*prefix) {
                let schema_json: JsonValue = serde_json::from_str(&schema_str)
                    .map_err(|e| ValidatorError::BadSchema(*prefix, e.to_string()))?;
                let schema = validator_for(&schema_json)
                    .map_err(|e| ValidatorError::BadSchema(*prefix, e.to_string()))?;
                compiled.insert(*prefix, schema);
            }
        }

        Ok(Self { compiled })
    }

    /// Validate YAML content against the schema for the given document type
    pub fn validate(
        &self,
        content: &str,
        prefix: DocPrefix,
    ) -> Result<ValidationResult, ValidatorError> {
        let yaml_value: serde_yml::Value =
            serde_yml::from_str(content).map_err(|e| ValidatorError::InvalidYaml(e.to_string()))?;
        let json_value: JsonValue = serde_json::to_value(&yaml_value)
            .map_err(|e| ValidatorError::InvalidYaml(e.to_string()))?;

        let Some(schema) = self.compiled.get(&prefix) else {
            // No schema available means validation passes
            return Ok(ValidationResult::success());
        };

        let issues: Vec<ValidationIssue> = schema
            .iter_errors(&json_value)
            .map(|error| ValidationIssue {
                path: if error.instance_path.as_str().is_empty() {
                    "/".to_string()
                } else {
                    error.instance_path.to_string()
                },
                message: error.to_string(),
            })
            .collect();

        if issues.is_empty() {
            Ok(ValidationResult::success())
        } else {
            Ok(ValidationResult::failure(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{DocId, DocPrefix};
    use crate::entities::{Inspection, Style};

    #[test]
    fn test_valid_style_passes() {
        let style = Style::new("Crew Neck Sweater".to_string(), "test".to_string());
        let yaml = serde_yml::to_string(&style).unwrap();

        let validator = Validator::new().unwrap();
        let result = validator.validate(&yaml, DocPrefix::Style).unwrap();
        assert!(result.valid, "issues: {:?}", result.issues);
    }

    #[test]
    fn test_valid_inspection_passes() {
        let mut inspection = Inspection::new(
            DocId::new(DocPrefix::Style),
            "Final Inspection".to_string(),
            "test".to_string(),
            "1.0".to_string(),
        );
        inspection.data.measurement_table = inspection
            .data
            .measurement_table
            .add_group("M")
            .add_row("Chest Width", None, None, "1.0");
        let yaml = serde_yml::to_string(&inspection).unwrap();

        let validator = Validator::new().unwrap();
        let result = validator.validate(&yaml, DocPrefix::Insp).unwrap();
        assert!(result.valid, "issues: {:?}", result.issues);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let yaml = "title: No id here\nauthor: test\n";
        let validator = Validator::new().unwrap();
        let result = validator.validate(yaml, DocPrefix::Style).unwrap();
        assert!(!result.valid);
        assert!(!result.issues.is_empty());
    }

    #[test]
    fn test_bad_status_enum_fails() {
        let style = Style::new("Polo".to_string(), "test".to_string());
        let yaml = serde_yml::to_string(&style).unwrap();
        let yaml = format!("{yaml}\nsections:\n  tech_pack:\n    status: SHIPPED\n");

        let validator = Validator::new().unwrap();
        let result = validator.validate(&yaml, DocPrefix::Style).unwrap();
        assert!(!result.valid);
    }

    #[test]
    fn test_unparsable_yaml_is_an_error() {
        let validator = Validator::new().unwrap();
        let err = validator.validate("id: [unclosed", DocPrefix::Style);
        assert!(matches!(err, Err(ValidatorError::InvalidYaml(_))));
    }
}
