//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::DocPrefix;

/// Represents a seamline workspace
#[derive(Debug)]
pub struct Project {
    /// Root directory of the workspace (parent of .seamline/)
    root: PathBuf,
}

impl Project {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            let marker = current.join(".seamline");
            if marker.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let marker = root.join(".seamline");
        if marker.exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        std::fs::create_dir_all(&marker).map_err(|e| ProjectError::IoError(e.to_string()))?;

        let config_path = marker.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        for prefix in DocPrefix::all() {
            std::fs::create_dir_all(root.join(prefix.dir_name()))
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Seamline Workspace Configuration

# Acting user recorded on workflow actions (falls back to git user.name)
# author: ""
# user_id: ""

# Role used for workflow and section authorization
# One of: super_admin, admin, director, merchandiser, qc, viewer
# role: viewer

# Per-user section access overrides layered on the role defaults
# section_access:
#   qc_inspect: full
#   commercial: none

# Default master tolerance applied when a measurement row has none
# default_tolerance: "1.0"
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .seamline directory
    pub fn seamline_dir(&self) -> PathBuf {
        self.root.join(".seamline")
    }

    /// Get the directory for documents of the given type
    pub fn doc_dir(&self, prefix: DocPrefix) -> PathBuf {
        self.root.join(prefix.dir_name())
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no seamline workspace found (searched from {searched_from} upward). Run 'seamline init' first")]
    NotFound { searched_from: PathBuf },

    #[error("workspace already initialized at {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
