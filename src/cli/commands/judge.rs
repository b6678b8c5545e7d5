//! `seamline judge` command - recompute and show an inspection's judgement

use clap::Args;
use console::style as paint;
use miette::{bail, Result};

use crate::cli::commands::utils::load_context;
use crate::cli::GlobalOpts;
use crate::core::access::SectionId;
use crate::core::identity::DocPrefix;
use crate::core::store::DocStore;
use crate::entities::Inspection;
use crate::qc::defects::{defect_totals, OverallResult};

#[derive(Debug, Args)]
pub struct JudgeArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
}

pub fn run(args: JudgeArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;
    let store = DocStore::new(&ctx.project);

    let id = store
        .resolve_id(&args.id)
        .map_err(|e| miette::miette!("{}", e))?;
    if id.prefix() != DocPrefix::Insp {
        bail!("{} is not an inspection document", id);
    }
    let mut inspection: Inspection = store.load(&id).map_err(|e| miette::miette!("{}", e))?;

    let before = inspection.data.overall_result;
    let result = inspection.refresh_judgement();
    if inspection.is_locked() {
        println!(
            "Workflow is {}; judgement stays {}",
            inspection.workflow.status, result
        );
    } else if result != before {
        store
            .save(&id, &inspection)
            .map_err(|e| miette::miette!("{}", e))?;
    }

    let totals = defect_totals(&inspection.data.defects);
    let thresholds = &inspection.data.thresholds;
    println!(
        "Critical: {}/{}  Major: {}/{}  Minor: {}/{}",
        totals.critical,
        thresholds.critical_max_allowed,
        totals.major,
        thresholds.max_allowed,
        totals.minor,
        thresholds.minor_max_allowed
    );

    let badge = match result {
        OverallResult::Accepted => paint("ACCEPTED").green().bold(),
        OverallResult::Rejected => paint("REJECTED").red().bold(),
        OverallResult::Pending => paint("PENDING").yellow().bold(),
    };
    println!("Overall result: {}", badge);

    Ok(())
}
