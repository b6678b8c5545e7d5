//! Document entity types

pub mod inspection;
pub mod style;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::DocId;

/// Common trait for all seamline documents
pub trait Document: Serialize + DeserializeOwned {
    /// The document type prefix (e.g., "STYLE", "INSP")
    const PREFIX: &'static str;

    /// Get the document's unique ID
    fn id(&self) -> &DocId;

    /// Get the document's title
    fn title(&self) -> &str;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author
    fn author(&self) -> &str;
}

pub use inspection::{Inspection, InspectionData};
pub use style::Style;
