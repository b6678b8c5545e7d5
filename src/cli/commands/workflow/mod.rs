//! Approval workflow commands - submit, recall, approve, reject, revise
//!
//! Each command resolves the governed document section, gates the transition
//! through the approval engine, and writes the new snapshot back as a whole.

pub mod approve;
pub mod recall;
pub mod reject;
pub mod revise;
pub mod submit;

pub use approve::ApproveArgs;
pub use recall::RecallArgs;
pub use reject::RejectArgs;
pub use revise::ReviseArgs;
pub use submit::SubmitArgs;

use console::style;
use miette::{bail, Result};

use crate::cli::commands::utils::{load_context, CommandContext};
use crate::cli::GlobalOpts;
use crate::core::access::SectionId;
use crate::core::identity::{DocId, DocPrefix};
use crate::core::store::DocStore;
use crate::core::workflow::{ApprovalAction, ApprovalEngine, WorkflowState};
use crate::entities::{Inspection, Style};

/// A resolved transition target: the document and the governed section
pub enum Target {
    Style {
        style: Style,
        section: SectionId,
    },
    Inspection(Inspection),
}

impl Target {
    pub fn section(&self) -> SectionId {
        match self {
            Target::Style { section, .. } => *section,
            Target::Inspection(_) => SectionId::QcInspect,
        }
    }

    pub fn workflow(&self) -> WorkflowState {
        match self {
            Target::Style { style, section } => style.section_workflow(*section),
            Target::Inspection(inspection) => inspection.workflow.clone(),
        }
    }

    pub fn doc_id(&self) -> &DocId {
        match self {
            Target::Style { style, .. } => &style.id,
            Target::Inspection(inspection) => &inspection.id,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Target::Style { style, section } => {
                format!("{} / {}", style.title, section.label())
            }
            Target::Inspection(inspection) => inspection.inspection_type.clone(),
        }
    }
}

/// Resolve an id (possibly partial) and section flag into a transition target
pub fn resolve_target(
    store: &DocStore,
    raw_id: &str,
    section: Option<SectionId>,
) -> Result<Target> {
    let doc_id = store.resolve_id(raw_id).map_err(|e| miette::miette!("{}", e))?;

    match doc_id.prefix() {
        DocPrefix::Style => {
            let Some(section) = section else {
                let sections: Vec<_> = SectionId::approvable()
                    .iter()
                    .map(|s| s.as_str())
                    .collect();
                bail!(
                    "style documents need --section (one of: {})",
                    sections.join(", ")
                );
            };
            if !SectionId::approvable().contains(&section) {
                bail!("section {} does not carry an approval workflow", section);
            }
            let style: Style = store.load(&doc_id).map_err(|e| miette::miette!("{}", e))?;
            Ok(Target::Style { style, section })
        }
        DocPrefix::Insp => {
            if let Some(section) = section {
                if section != SectionId::QcInspect {
                    bail!("inspections are governed by the qc_inspect section, not {}", section);
                }
            }
            let inspection: Inspection =
                store.load(&doc_id).map_err(|e| miette::miette!("{}", e))?;
            Ok(Target::Inspection(inspection))
        }
    }
}

/// Confirm with the user unless --yes was given
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    std::io::Write::flush(&mut std::io::stdout()).map_err(|e| miette::miette!("{}", e))?;
    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| miette::miette!("{}", e))?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Run one transition end to end: resolve, gate, apply, save, report
pub fn perform_transition(
    global: &GlobalOpts,
    raw_id: &str,
    section: Option<SectionId>,
    action: ApprovalAction,
    comment: Option<&str>,
    confirm_prompt: Option<&str>,
    yes: bool,
) -> Result<()> {
    let ctx: CommandContext = load_context(global)?;
    let store = DocStore::new(&ctx.project);

    let target = resolve_target(&store, raw_id, section)?;
    let workflow = target.workflow();
    let from_status = workflow.status;

    if let Some(prompt) = confirm_prompt {
        let prompt = format!("{} {}?", prompt, target.label());
        if !confirm(&prompt, yes)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let engine = ApprovalEngine::new(&ctx.actor, &ctx.access);
    let next = engine
        .attempt(&workflow, action, target.section(), comment)
        .map_err(|e| miette::miette!("{}", e))?;

    let to_status = next.status;
    match target {
        Target::Style { mut style, section } => {
            style.set_section_workflow(section, next);
            store
                .save(&style.id.clone(), &style)
                .map_err(|e| miette::miette!("{}", e))?;
        }
        Target::Inspection(mut inspection) => {
            inspection.workflow = next;
            store
                .save(&inspection.id.clone(), &inspection)
                .map_err(|e| miette::miette!("{}", e))?;
        }
    }

    if !global.quiet {
        println!(
            "{} {}: {} {} {}",
            style("✓").green().bold(),
            action,
            from_status,
            style("→").dim(),
            to_status
        );
        if let Some(comment) = comment {
            let comment = comment.trim();
            if !comment.is_empty() {
                println!("  Comment: {}", comment);
            }
        }
        if to_status.is_locked() {
            println!("  Section content is now locked.");
        }
    }

    Ok(())
}
