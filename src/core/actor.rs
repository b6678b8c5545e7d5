//! Acting-user identity consumed by the workflow engine
//!
//! Authentication itself lives outside this tool; only the resulting
//! identity and role are consumed here. The actor is resolved from layered
//! configuration with git/user fallbacks.

use serde::{Deserialize, Serialize};

use crate::core::access::UserRole;
use crate::core::config::Config;

/// The identity performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier (username or email)
    pub id: String,
    /// Display name recorded in audit trails
    pub display_name: String,
    /// Role used for workflow and section authorization
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Resolve the current actor from configuration.
    ///
    /// The display name falls back through git config and $USER (see
    /// `Config::author`); the id falls back to the display name. A missing
    /// role resolves to `viewer` so an unconfigured user fails closed.
    pub fn resolve(config: &Config) -> Self {
        let display_name = config.author();
        let id = config.user_id.clone().unwrap_or_else(|| display_name.clone());
        let role = config.role.unwrap_or(UserRole::Viewer);
        Self {
            id,
            display_name,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_to_viewer() {
        let config = Config {
            author: Some("Mina Rahman".to_string()),
            ..Config::default()
        };
        let actor = Actor::resolve(&config);
        assert_eq!(actor.display_name, "Mina Rahman");
        assert_eq!(actor.id, "Mina Rahman");
        assert_eq!(actor.role, UserRole::Viewer);
    }

    #[test]
    fn test_resolve_uses_configured_identity() {
        let config = Config {
            author: Some("Mina Rahman".to_string()),
            user_id: Some("mrahman".to_string()),
            role: Some(UserRole::Merchandiser),
            ..Config::default()
        };
        let actor = Actor::resolve(&config);
        assert_eq!(actor.id, "mrahman");
        assert_eq!(actor.role, UserRole::Merchandiser);
    }
}
