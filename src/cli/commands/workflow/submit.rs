//! Submit command - send a document section for approval

use clap::Args;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::cli::commands::workflow::perform_transition;
use crate::core::access::SectionId;
use crate::core::workflow::ApprovalAction;

/// Submit a document section for approval (locks its content)
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Document ID (STYLE-… or INSP-…, full or unique prefix)
    pub id: String,

    /// Section to submit (required for styles)
    #[arg(long, short = 's')]
    pub section: Option<SectionId>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl SubmitArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        perform_transition(
            global,
            &self.id,
            self.section,
            ApprovalAction::Submit,
            None,
            Some("Submit"),
            self.yes,
        )
    }
}
