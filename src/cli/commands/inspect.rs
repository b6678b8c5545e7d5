//! `seamline inspect` command - QC inspection management

use clap::Subcommand;
use console::style as paint;
use miette::{bail, Result};

use crate::cli::commands::utils::load_context;
use crate::cli::helpers::format_short_id;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::SectionId;
use crate::core::identity::DocPrefix;
use crate::core::store::DocStore;
use crate::entities::{Inspection, Style};

#[derive(Subcommand, Debug)]
pub enum InspectCommands {
    /// Create a new inspection for a style
    New(NewArgs),

    /// List inspections
    List(ListArgs),

    /// Show an inspection's details
    Show(ShowArgs),

    /// Start a new inspection phase copying all data from an existing one
    Phase(PhaseArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Style the inspection belongs to (ID, full or unique prefix)
    #[arg(long)]
    pub style: String,

    /// Inspection type (e.g. "Inline Inspection", "Final Inspection")
    #[arg(long, short = 't', default_value = "Final Inspection")]
    pub r#type: String,

    /// Seed the measurement table from an existing inspection
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only inspections of this style (ID, full or unique prefix)
    #[arg(long)]
    pub style: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct PhaseArgs {
    /// Source inspection ID (full or unique prefix)
    pub id: String,

    /// Name of the new phase (e.g. "Pre-Final Inspection")
    #[arg(long, short = 'n')]
    pub name: String,
}

pub fn run(cmd: InspectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InspectCommands::New(args) => run_new(args, global),
        InspectCommands::List(args) => run_list(args, global),
        InspectCommands::Show(args) => run_show(args, global),
        InspectCommands::Phase(args) => run_phase(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;
    let store = DocStore::new(&ctx.project);

    let style_id = store
        .resolve_id(&args.style)
        .map_err(|e| miette::miette!("{}", e))?;
    if style_id.prefix() != DocPrefix::Style {
        bail!("{} is not a style document", style_id);
    }
    // Make sure the style actually exists before linking to it
    let _style: Style = store
        .load(&style_id)
        .map_err(|e| miette::miette!("{}", e))?;

    let mut inspection = Inspection::new(
        style_id,
        args.r#type,
        ctx.actor.display_name.clone(),
        ctx.config.default_tolerance(),
    );

    if let Some(ref from) = args.from {
        let from_id = store
            .resolve_id(from)
            .map_err(|e| miette::miette!("{}", e))?;
        let source: Inspection = store
            .load(&from_id)
            .map_err(|e| miette::miette!("{}", e))?;
        if inspection.seed_measurements_from(&source) {
            println!(
                "  Seeded measurement table from {} ({} rows)",
                format_short_id(&from_id),
                source.data.measurement_table.rows.len()
            );
        }
    }

    store
        .save(&inspection.id, &inspection)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created inspection {}",
        paint("✓").green().bold(),
        inspection.id
    );
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let store = DocStore::new(&ctx.project);

    let style_filter = match &args.style {
        Some(raw) => Some(
            store
                .resolve_id(raw)
                .map_err(|e| miette::miette!("{}", e))?,
        ),
        None => None,
    };

    let mut inspections: Vec<Inspection> = store
        .list(DocPrefix::Insp)
        .map_err(|e| miette::miette!("{}", e))?;
    if let Some(ref style_id) = style_filter {
        inspections.retain(|i| &i.style_id == style_id);
    }
    inspections.sort_by(|a, b| a.created.cmp(&b.created));

    if inspections.is_empty() {
        println!("No inspections found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&inspections)
                    .map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Yaml => {
            print!(
                "{}",
                serde_yml::to_string(&inspections).map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Id => {
            for inspection in &inspections {
                println!("{}", inspection.id);
            }
        }
        OutputFormat::Auto | OutputFormat::Tsv => {
            for inspection in &inspections {
                println!(
                    "{}\t{}\t{}\t{}",
                    format_short_id(&inspection.id),
                    inspection.inspection_type,
                    inspection.workflow.status,
                    inspection.data.overall_result
                );
            }
            println!("\n{} inspection(s) found", inspections.len());
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let store = DocStore::new(&ctx.project);

    let id = store
        .resolve_id(&args.id)
        .map_err(|e| miette::miette!("{}", e))?;
    let inspection: Inspection = store.load(&id).map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&inspection)
                    .map_err(|e| miette::miette!("{}", e))?
            );
            return Ok(());
        }
        _ => {
            // YAML is the full-fidelity default for show
            print!(
                "{}",
                serde_yml::to_string(&inspection).map_err(|e| miette::miette!("{}", e))?
            );
        }
    }

    Ok(())
}

fn run_phase(args: PhaseArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;
    let store = DocStore::new(&ctx.project);

    let id = store
        .resolve_id(&args.id)
        .map_err(|e| miette::miette!("{}", e))?;
    let source: Inspection = store.load(&id).map_err(|e| miette::miette!("{}", e))?;

    let phase = source.new_phase(&args.name, ctx.actor.display_name.clone());
    store
        .save(&phase.id, &phase)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created phase {} from {}",
        paint("✓").green().bold(),
        phase.id,
        format_short_id(&source.id)
    );
    println!("  Copied all data; overall result reset to PENDING");
    Ok(())
}
