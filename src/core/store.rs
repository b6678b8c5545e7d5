//! Document persistence over plain YAML files
//!
//! One file per document under the workspace root, named by its full id.
//! The store is constructed explicitly from a discovered workspace and
//! passed to whatever needs it; core logic never reaches for ambient state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::identity::{DocId, DocPrefix};
use crate::core::project::Project;

/// File-backed document store rooted at a workspace
pub struct DocStore<'a> {
    project: &'a Project,
}

impl<'a> DocStore<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Path where the document with this id lives
    pub fn path_for(&self, id: &DocId) -> PathBuf {
        self.project
            .doc_dir(id.prefix())
            .join(format!("{}.yaml", id))
    }

    /// Load a document by id
    pub fn load<T: DeserializeOwned + 'static>(&self, id: &DocId) -> Result<T, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let contents =
            std::fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        serde_yml::from_str(&contents).map_err(|e| StoreError::Parse {
            id: id.to_string(),
            message: e.to_string(),
        })
    }

    /// Save a document, replacing any previous version as a whole
    pub fn save<T: Serialize>(&self, id: &DocId, doc: &T) -> Result<(), StoreError> {
        let path = self.path_for(id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let contents =
            serde_yml::to_string(doc).map_err(|e| StoreError::Serialize(e.to_string()))?;
        std::fs::write(&path, contents).map_err(|e| StoreError::Io(e.to_string()))
    }

    /// Delete a document by id
    pub fn delete(&self, id: &DocId) -> Result<(), StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        std::fs::remove_file(&path).map_err(|e| StoreError::Io(e.to_string()))
    }

    /// Load all documents of one type. Files that fail to parse are skipped.
    pub fn list<T: DeserializeOwned + 'static>(&self, prefix: DocPrefix) -> Result<Vec<T>, StoreError> {
        let dir = self.project.doc_dir(prefix);
        let mut docs = Vec::new();

        if !dir.exists() {
            return Ok(docs);
        }

        for entry in std::fs::read_dir(&dir).map_err(|e| StoreError::Io(e.to_string()))? {
            let entry = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "yaml") {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    if let Ok(doc) = serde_yml::from_str::<T>(&content) {
                        docs.push(doc);
                    }
                }
            }
        }

        Ok(docs)
    }

    /// Resolve a possibly-partial id to the full id of an existing document.
    ///
    /// Accepts a full id, or any unique filename prefix such as
    /// `INSP-01HQ3K` or just the first characters of the ULID portion.
    pub fn resolve_id(&self, partial: &str) -> Result<DocId, StoreError> {
        if let Ok(id) = DocId::parse(partial) {
            if self.path_for(&id).exists() {
                return Ok(id);
            }
        }

        let needle = partial.to_uppercase();
        let mut matches = Vec::new();

        for entry in WalkDir::new(self.project.root())
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(stem) = name.strip_suffix(".yaml") {
                if stem.to_uppercase().starts_with(&needle) {
                    if let Ok(id) = DocId::parse(stem) {
                        matches.push(id);
                    }
                }
            }
        }

        match matches.len() {
            0 => Err(StoreError::NotFound(partial.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(StoreError::Ambiguous {
                partial: partial.to_string(),
                count: matches.len(),
            }),
        }
    }
}

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("id '{partial}' matches {count} documents; use more characters")]
    Ambiguous { partial: String, count: usize },

    #[error("failed to parse {id}: {message}")]
    Parse { id: String, message: String },

    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("IO error: {0}")]
    Io(String),
}
