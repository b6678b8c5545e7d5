//! Embedded JSON schemas for document validation

use rust_embed::Embed;

use crate::core::identity::DocPrefix;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Registry of JSON schemas, one per document type
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Get the schema source for a document type
    pub fn get(prefix: DocPrefix) -> Option<String> {
        let name = match prefix {
            DocPrefix::Style => "style.schema.json",
            DocPrefix::Insp => "inspection.schema.json",
        };
        EmbeddedSchemas::get(name)
            .map(|file| String::from_utf8_lossy(file.data.as_ref()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_prefix_has_a_schema() {
        for prefix in DocPrefix::all() {
            let schema = SchemaRegistry::get(*prefix);
            assert!(schema.is_some(), "missing schema for {}", prefix);
            // Every embedded schema must be valid JSON
            let parsed: serde_json::Value =
                serde_json::from_str(&schema.unwrap()).expect("schema is not valid JSON");
            assert!(parsed.get("type").is_some());
        }
    }
}
