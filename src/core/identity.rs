//! Document identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Document type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocPrefix {
    /// Style (the owning production document with its approvable sections)
    Style,
    /// QC inspection record
    Insp,
}

impl DocPrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            DocPrefix::Style => "STYLE",
            DocPrefix::Insp => "INSP",
        }
    }

    /// Get all valid prefixes
    pub fn all() -> &'static [DocPrefix] {
        &[DocPrefix::Style, DocPrefix::Insp]
    }

    /// Directory under the workspace root where documents of this type live
    pub fn dir_name(&self) -> &'static str {
        match self {
            DocPrefix::Style => "styles",
            DocPrefix::Insp => "inspections",
        }
    }
}

impl fmt::Display for DocPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STYLE" => Ok(DocPrefix::Style),
            "INSP" => Ok(DocPrefix::Insp),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A unique document identifier combining a type prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocId {
    prefix: DocPrefix,
    ulid: Ulid,
}

impl DocId {
    /// Create a new DocId with the given prefix
    pub fn new(prefix: DocPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Create a DocId from a prefix and existing ULID
    pub fn from_parts(prefix: DocPrefix, ulid: Ulid) -> Self {
        Self { prefix, ulid }
    }

    /// Get the document prefix
    pub fn prefix(&self) -> DocPrefix {
        self.prefix
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse a DocId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for DocId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for DocId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DocId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing document IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid document prefix: '{0}' (valid: STYLE, INSP)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in document ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_generation() {
        let id = DocId::new(DocPrefix::Style);
        assert!(id.to_string().starts_with("STYLE-"));
        assert_eq!(id.to_string().len(), 32); // STYLE- (6) + ULID (26) = 32
    }

    #[test]
    fn test_doc_id_parsing() {
        let original = DocId::new(DocPrefix::Insp);
        let parsed = DocId::parse(&original.to_string()).unwrap();
        assert_eq!(parsed.prefix(), DocPrefix::Insp);
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_doc_id_invalid_prefix() {
        let err = DocId::parse("XXX-01HQ3K4N5M6P7R8S9T0UVWXY").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_doc_id_missing_delimiter() {
        let err = DocId::parse("STYLE01HQ3K4N5M6P7R8S9T0UVWXY").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_doc_id_invalid_ulid() {
        let err = DocId::parse("INSP-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_all_prefixes_roundtrip() {
        for prefix in DocPrefix::all() {
            let id = DocId::new(*prefix);
            let parsed = DocId::parse(&id.to_string()).unwrap();
            assert_eq!(parsed.prefix(), *prefix);
        }
    }
}
