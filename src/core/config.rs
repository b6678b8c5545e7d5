//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::access::{AccessLevel, SectionId, UserRole};
use crate::core::project::Project;

/// Seamline configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name recorded on new documents and workflow actions
    pub author: Option<String>,

    /// Stable user identifier (defaults to the author name)
    pub user_id: Option<String>,

    /// Role of the acting user (defaults to viewer)
    pub role: Option<UserRole>,

    /// Per-user section access overrides layered on the role defaults
    pub section_access: Option<BTreeMap<SectionId, AccessLevel>>,

    /// Default master tolerance applied when a measurement row has none
    pub default_tolerance: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: &Project) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/seamline/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_from_file(&global_path);
        }

        // 3. Workspace config (.seamline/config.yaml)
        config.merge_from_file(&project.seamline_dir().join("config.yaml"));

        // 4. Environment variables
        if let Ok(author) = std::env::var("SEAMLINE_AUTHOR") {
            config.author = Some(author);
        }
        if let Ok(user_id) = std::env::var("SEAMLINE_USER_ID") {
            config.user_id = Some(user_id);
        }
        if let Ok(role) = std::env::var("SEAMLINE_ROLE") {
            if let Ok(role) = role.parse() {
                config.role = Some(role);
            }
        }
        if let Ok(tolerance) = std::env::var("SEAMLINE_TOLERANCE") {
            config.default_tolerance = Some(tolerance);
        }

        config
    }

    fn merge_from_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        if let Ok(contents) = std::fs::read_to_string(path) {
            if let Ok(layer) = serde_yml::from_str::<Config>(&contents) {
                self.merge(layer);
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "seamline")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.user_id.is_some() {
            self.user_id = other.user_id;
        }
        if other.role.is_some() {
            self.role = other.role;
        }
        if other.section_access.is_some() {
            self.section_access = other.section_access;
        }
        if other.default_tolerance.is_some() {
            self.default_tolerance = other.default_tolerance;
        }
    }

    /// Get the author name, falling back to git config or username
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }

        // Try git config
        if let Ok(output) = std::process::Command::new("git")
            .args(["config", "user.name"])
            .output()
        {
            if output.status.success() {
                let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !name.is_empty() {
                    return name;
                }
            }
        }

        // Fall back to username
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Get the default master tolerance string
    pub fn default_tolerance(&self) -> String {
        self.default_tolerance
            .clone()
            .unwrap_or_else(|| "1.0".to_string())
    }
}
