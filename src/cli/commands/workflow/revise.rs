//! Revise command - reopen an approved section for revision

use clap::Args;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::cli::commands::workflow::perform_transition;
use crate::core::access::SectionId;
use crate::core::workflow::ApprovalAction;

/// Request revision of an approved section (unlocks it back to draft)
#[derive(Debug, Args)]
pub struct ReviseArgs {
    /// Document ID (STYLE-… or INSP-…, full or unique prefix)
    pub id: String,

    /// Section to reopen (required for styles)
    #[arg(long, short = 's')]
    pub section: Option<SectionId>,
}

impl ReviseArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        perform_transition(
            global,
            &self.id,
            self.section,
            ApprovalAction::RequestRevision,
            None,
            None,
            true,
        )
    }
}
