//! Shared utilities for CLI commands

use miette::{bail, Result};

use crate::cli::GlobalOpts;
use crate::core::access::{effective_access, AccessLevel, AccessMap, SectionId};
use crate::core::actor::Actor;
use crate::core::config::Config;
use crate::core::project::Project;

/// Everything a command needs about the workspace and the acting user
pub struct CommandContext {
    pub project: Project,
    pub config: Config,
    pub actor: Actor,
    pub access: AccessMap,
}

/// Discover the workspace, load layered config, and resolve the actor with
/// their effective section access. Global CLI flags override config.
pub fn load_context(global: &GlobalOpts) -> Result<CommandContext> {
    let project = match &global.project {
        Some(path) => Project::discover_from(path),
        None => Project::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    let mut config = Config::load(&project);
    if let Some(role) = global.role {
        config.role = Some(role);
    }
    if let Some(ref author) = global.author {
        config.author = Some(author.clone());
    }

    let actor = Actor::resolve(&config);
    let access = effective_access(actor.role, config.section_access.as_ref());

    Ok(CommandContext {
        project,
        config,
        actor,
        access,
    })
}

impl CommandContext {
    /// Refuse the command unless the actor has full access to the section
    pub fn require_full_access(&self, section: SectionId) -> Result<()> {
        if !self.access.has_access(section, AccessLevel::Full) {
            bail!(
                "role {} has {} access to {}; full access is required",
                self.actor.role,
                self.access.level(section),
                section
            );
        }
        Ok(())
    }
}
