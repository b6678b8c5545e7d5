//! `seamline defect` command - defect rows and thresholds on an inspection

use clap::Subcommand;
use console::style as paint;
use miette::{bail, Result};
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::cli::commands::utils::load_context;
use crate::cli::GlobalOpts;
use crate::core::access::SectionId;
use crate::core::identity::DocPrefix;
use crate::core::store::DocStore;
use crate::entities::Inspection;
use crate::qc::defects::{defect_totals, DefectRecord};

#[derive(Subcommand, Debug)]
pub enum DefectCommands {
    /// Record a defect row
    Add(AddArgs),

    /// Remove a defect row
    Remove(RemoveArgs),

    /// List defect rows with totals
    List(ListArgs),

    /// Set the maximum allowed counts per severity
    SetThresholds(SetThresholdsArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,

    /// Defect description
    #[arg(long, short = 'd')]
    pub description: String,

    /// Critical count
    #[arg(long, default_value_t = 0)]
    pub critical: u32,

    /// Major count
    #[arg(long, default_value_t = 0)]
    pub major: u32,

    /// Minor count
    #[arg(long, default_value_t = 0)]
    pub minor: u32,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,

    /// Defect row id (as shown by `defect list`)
    pub defect_id: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct SetThresholdsArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,

    /// Critical max allowed
    #[arg(long)]
    pub critical: Option<u32>,

    /// Major max allowed
    #[arg(long)]
    pub major: Option<u32>,

    /// Minor max allowed
    #[arg(long)]
    pub minor: Option<u32>,
}

pub fn run(cmd: DefectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DefectCommands::Add(args) => run_add(args, global),
        DefectCommands::Remove(args) => run_remove(args, global),
        DefectCommands::List(args) => run_list(args, global),
        DefectCommands::SetThresholds(args) => run_set_thresholds(args, global),
    }
}

fn load_inspection<'a>(
    ctx: &'a crate::cli::commands::utils::CommandContext,
    raw_id: &str,
) -> Result<(DocStore<'a>, Inspection)> {
    let store = DocStore::new(&ctx.project);
    let id = store
        .resolve_id(raw_id)
        .map_err(|e| miette::miette!("{}", e))?;
    if id.prefix() != DocPrefix::Insp {
        bail!("{} is not an inspection document", id);
    }
    let inspection: Inspection = store.load(&id).map_err(|e| miette::miette!("{}", e))?;
    Ok((store, inspection))
}

fn save_and_report(
    store: &DocStore,
    inspection: &mut Inspection,
    quiet: bool,
) -> Result<()> {
    let result = inspection.refresh_judgement();
    store
        .save(&inspection.id.clone(), inspection)
        .map_err(|e| miette::miette!("{}", e))?;

    if !quiet {
        let totals = defect_totals(&inspection.data.defects);
        println!(
            "{} Defects: {} critical / {} major / {} minor — overall {}",
            paint("✓").green().bold(),
            totals.critical,
            totals.major,
            totals.minor,
            result
        );
    }
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;

    let (store, mut inspection) = load_inspection(&ctx, &args.id)?;
    inspection
        .ensure_unlocked()
        .map_err(|e| miette::miette!("{}", e))?;

    inspection.data.defects.push(DefectRecord::new(
        &args.description,
        args.critical,
        args.major,
        args.minor,
    ));

    save_and_report(&store, &mut inspection, global.quiet)
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;

    let (store, mut inspection) = load_inspection(&ctx, &args.id)?;
    inspection
        .ensure_unlocked()
        .map_err(|e| miette::miette!("{}", e))?;

    let before = inspection.data.defects.len();
    inspection.data.defects.retain(|d| d.id != args.defect_id);
    if inspection.data.defects.len() == before {
        bail!("no defect row with id {}", args.defect_id);
    }

    save_and_report(&store, &mut inspection, global.quiet)
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let (_, inspection) = load_inspection(&ctx, &args.id)?;

    if inspection.data.defects.is_empty() {
        println!("No defects recorded.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Description", "Critical", "Major", "Minor"]);
    for defect in &inspection.data.defects {
        builder.push_record([
            defect.id.clone(),
            defect.description.clone(),
            defect.critical.to_string(),
            defect.major.to_string(),
            defect.minor.to_string(),
        ]);
    }
    let totals = defect_totals(&inspection.data.defects);
    builder.push_record([
        "".to_string(),
        "Total".to_string(),
        totals.critical.to_string(),
        totals.major.to_string(),
        totals.minor.to_string(),
    ]);
    println!("{}", builder.build().with(TableStyle::sharp()));

    let thresholds = &inspection.data.thresholds;
    println!(
        "Allowed: {} critical / {} major / {} minor — overall {}",
        thresholds.critical_max_allowed,
        thresholds.max_allowed,
        thresholds.minor_max_allowed,
        inspection.data.overall_result
    );

    Ok(())
}

fn run_set_thresholds(args: SetThresholdsArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;

    let (store, mut inspection) = load_inspection(&ctx, &args.id)?;
    inspection
        .ensure_unlocked()
        .map_err(|e| miette::miette!("{}", e))?;

    if let Some(critical) = args.critical {
        inspection.data.thresholds.critical_max_allowed = critical;
    }
    if let Some(major) = args.major {
        inspection.data.thresholds.max_allowed = major;
    }
    if let Some(minor) = args.minor {
        inspection.data.thresholds.minor_max_allowed = minor;
    }

    save_and_report(&store, &mut inspection, global.quiet)
}
