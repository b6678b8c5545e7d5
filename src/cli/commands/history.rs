//! `seamline history` command - section audit trail

use chrono::Local;
use clap::Args;
use console::style as paint;
use miette::Result;
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::cli::commands::utils::load_context;
use crate::cli::commands::workflow::resolve_target;
use crate::cli::GlobalOpts;
use crate::core::access::SectionId;
use crate::core::store::DocStore;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Document ID (STYLE-… or INSP-…, full or unique prefix)
    pub id: String,

    /// Section to show (required for styles)
    #[arg(long, short = 's')]
    pub section: Option<SectionId>,
}

pub fn run(args: HistoryArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let store = DocStore::new(&ctx.project);

    let target = resolve_target(&store, &args.id, args.section)?;
    let workflow = target.workflow();

    println!(
        "{}  [{}]",
        paint(target.label()).bold(),
        workflow.status
    );
    if let (Some(by), Some(at)) = (&workflow.submitted_by, &workflow.submitted_at) {
        println!(
            "Submitted by {} on {}",
            by,
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
    }
    if let (Some(by), Some(at)) = (&workflow.approved_by, &workflow.approved_at) {
        println!(
            "Approved by {} on {}",
            by,
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
    }
    if let Some(ref comment) = workflow.rejection_comment {
        println!(
            "Rejected by {}: \"{}\"",
            workflow.rejected_by.as_deref().unwrap_or("unknown"),
            comment
        );
    }

    if workflow.history.is_empty() {
        println!("\nNo workflow actions recorded.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["When", "Action", "User", "Role", "Comments"]);
    for action in &workflow.history {
        builder.push_record([
            action
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            action.action.to_string(),
            action.user_name.clone(),
            action.user_role.to_string(),
            action.comments.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("\n{}", builder.build().with(TableStyle::sharp()));
    println!("{} action(s)", workflow.history.len());

    Ok(())
}
