//! Approve command - approve a submitted section

use clap::Args;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::cli::commands::workflow::perform_transition;
use crate::core::access::SectionId;
use crate::core::workflow::ApprovalAction;

/// Approve a submitted section (keeps its content locked)
#[derive(Debug, Args)]
pub struct ApproveArgs {
    /// Document ID (STYLE-… or INSP-…, full or unique prefix)
    pub id: String,

    /// Section to approve (required for styles)
    #[arg(long, short = 's')]
    pub section: Option<SectionId>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl ApproveArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        perform_transition(
            global,
            &self.id,
            self.section,
            ApprovalAction::Approve,
            None,
            Some("Approve"),
            self.yes,
        )
    }
}
