//! Reject command - reject a submitted section with a required comment

use clap::Args;
use dialoguer::Input;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::cli::commands::workflow::perform_transition;
use crate::core::access::SectionId;
use crate::core::workflow::ApprovalAction;

/// Reject a submitted section back for rework (comment required)
#[derive(Debug, Args)]
pub struct RejectArgs {
    /// Document ID (STYLE-… or INSP-…, full or unique prefix)
    pub id: String,

    /// Section to reject (required for styles)
    #[arg(long, short = 's')]
    pub section: Option<SectionId>,

    /// Rejection comment (prompted for when omitted)
    #[arg(long, short = 'r')]
    pub reason: Option<String>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl RejectArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let reason = match &self.reason {
            Some(reason) => reason.clone(),
            None => Input::new()
                .with_prompt("Rejection comment")
                .interact_text()
                .map_err(|e| miette::miette!("{}", e))?,
        };

        perform_transition(
            global,
            &self.id,
            self.section,
            ApprovalAction::Reject,
            Some(&reason),
            Some("Reject"),
            self.yes,
        )
    }
}
