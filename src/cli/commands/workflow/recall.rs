//! Recall command - pull a submitted section back to draft

use clap::Args;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::cli::commands::workflow::perform_transition;
use crate::core::access::SectionId;
use crate::core::workflow::ApprovalAction;

/// Recall a submitted section back to draft
#[derive(Debug, Args)]
pub struct RecallArgs {
    /// Document ID (STYLE-… or INSP-…, full or unique prefix)
    pub id: String,

    /// Section to recall (required for styles)
    #[arg(long, short = 's')]
    pub section: Option<SectionId>,
}

impl RecallArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        perform_transition(
            global,
            &self.id,
            self.section,
            ApprovalAction::Recall,
            None,
            None,
            true,
        )
    }
}
