//! `seamline measure` command - measurement table edits and tolerance report

use clap::Subcommand;
use console::style as paint;
use miette::{bail, Result};
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::cli::commands::utils::{load_context, CommandContext};
use crate::cli::GlobalOpts;
use crate::core::access::SectionId;
use crate::core::identity::DocPrefix;
use crate::core::store::DocStore;
use crate::entities::Inspection;
use crate::qc::table::MeasurementTable;
use crate::qc::tolerance::format_deviation;

#[derive(Subcommand, Debug)]
pub enum MeasureCommands {
    /// Add a size group (with a default "Standard" color column)
    AddSize(AddSizeArgs),

    /// Remove a size group and all its data
    RemoveSize(RemoveSizeArgs),

    /// Add a color column to a size group
    AddColor(AddColorArgs),

    /// Remove a color column (by position) from a size group
    RemoveColor(RemoveColorArgs),

    /// Add a measurement point row
    AddPoint(AddPointArgs),

    /// Remove a measurement point row
    RemovePoint(RemovePointArgs),

    /// Set a standard value for a point in a size group
    SetStandard(SetStandardArgs),

    /// Set the measured (actual) value for a point in a size group
    SetActual(SetActualArgs),

    /// Set a point's tolerance band
    SetTolerance(SetToleranceArgs),

    /// Set the master tolerance applied when a row has none
    SetMaster(SetMasterArgs),

    /// Show the measurement grid with tolerance evaluation
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddSizeArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Size label (e.g. S, M, 38)
    pub size: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveSizeArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Size label or group id
    pub size: String,
}

#[derive(clap::Args, Debug)]
pub struct AddColorArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Size label or group id
    pub size: String,
    /// Color name (e.g. Navy)
    pub color: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveColorArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Size label or group id
    pub size: String,
    /// Zero-based column position within the group
    #[arg(long, short = 'i')]
    pub index: usize,
}

#[derive(clap::Args, Debug)]
pub struct AddPointArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Point of measurement (e.g. "Chest Width")
    pub name: String,
    /// Plus tolerance (defaults to the master tolerance)
    #[arg(long)]
    pub plus: Option<String>,
    /// Minus tolerance (defaults to the master tolerance)
    #[arg(long)]
    pub minus: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RemovePointArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Point name, sequence number, or row id
    pub point: String,
}

#[derive(clap::Args, Debug)]
pub struct SetStandardArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Point name, sequence number, or row id
    pub point: String,
    /// Size label or group id
    pub size: String,
    /// Standard value
    pub value: String,
    /// Zero-based color column position within the group
    #[arg(long, short = 'i', default_value_t = 0)]
    pub index: usize,
}

#[derive(clap::Args, Debug)]
pub struct SetActualArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Point name, sequence number, or row id
    pub point: String,
    /// Size label or group id
    pub size: String,
    /// Measured value
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct SetToleranceArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Point name, sequence number, or row id
    pub point: String,
    /// Plus tolerance
    #[arg(long)]
    pub plus: String,
    /// Minus tolerance
    #[arg(long)]
    pub minus: String,
}

#[derive(clap::Args, Debug)]
pub struct SetMasterArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,
    /// Master tolerance value (e.g. "1.0")
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,

    /// Only show cells that are out of tolerance
    #[arg(long)]
    pub out_only: bool,
}

pub fn run(cmd: MeasureCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MeasureCommands::AddSize(args) => edit(global, &args.id, |table, _| {
            Ok(table.add_group(&args.size))
        }),
        MeasureCommands::RemoveSize(args) => edit(global, &args.id, |table, _| {
            let group_id = find_group(table, &args.size)?;
            table
                .remove_group(&group_id)
                .map_err(|e| miette::miette!("{}", e))
        }),
        MeasureCommands::AddColor(args) => edit(global, &args.id, |table, _| {
            let group_id = find_group(table, &args.size)?;
            table
                .add_color_column(&group_id, &args.color)
                .map_err(|e| miette::miette!("{}", e))
        }),
        MeasureCommands::RemoveColor(args) => edit(global, &args.id, |table, _| {
            let group_id = find_group(table, &args.size)?;
            table
                .remove_color_column(&group_id, args.index)
                .map_err(|e| miette::miette!("{}", e))
        }),
        MeasureCommands::AddPoint(args) => edit(global, &args.id, |table, master| {
            Ok(table.add_row(
                &args.name,
                args.plus.as_deref(),
                args.minus.as_deref(),
                master,
            ))
        }),
        MeasureCommands::RemovePoint(args) => edit(global, &args.id, |table, _| {
            let row_id = find_row(table, &args.point)?;
            table
                .remove_row(&row_id)
                .map_err(|e| miette::miette!("{}", e))
        }),
        MeasureCommands::SetStandard(args) => edit(global, &args.id, |table, _| {
            let row_id = find_row(table, &args.point)?;
            let group_id = find_group(table, &args.size)?;
            table
                .set_standard(&row_id, &group_id, args.index, &args.value)
                .map_err(|e| miette::miette!("{}", e))
        }),
        MeasureCommands::SetActual(args) => edit(global, &args.id, |table, _| {
            let row_id = find_row(table, &args.point)?;
            let group_id = find_group(table, &args.size)?;
            table
                .set_actual(&row_id, &group_id, &args.value)
                .map_err(|e| miette::miette!("{}", e))
        }),
        MeasureCommands::SetTolerance(args) => edit(global, &args.id, |table, _| {
            let row_id = find_row(table, &args.point)?;
            table
                .set_tolerance(&row_id, &args.plus, &args.minus)
                .map_err(|e| miette::miette!("{}", e))
        }),
        MeasureCommands::SetMaster(args) => run_set_master(args, global),
        MeasureCommands::Show(args) => run_show(args, global),
    }
}

fn load_inspection<'a>(
    ctx: &'a CommandContext,
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

/// Resolve a size-group argument (size label or group id) to a group id
fn find_group(table: &MeasurementTable, key: &str) -> Result<String> {
    let matches: Vec<_> = table
        .groups
        .iter()
        .filter(|g| g.id == key || g.size.eq_ignore_ascii_case(key))
        .collect();
    match matches.len() {
        0 => bail!("no size group matches '{}'", key),
        1 => Ok(matches[0].id.clone()),
        n => bail!("'{}' matches {} size groups; use the group id", key, n),
    }
}

/// Resolve a point argument (name, sequence number, or row id) to a row id
fn find_row(table: &MeasurementTable, key: &str) -> Result<String> {
    let matches: Vec<_> = table
        .rows
        .iter()
        .filter(|r| r.id == key || r.point == key || r.name.eq_ignore_ascii_case(key))
        .collect();
    match matches.len() {
        0 => bail!("no measurement point matches '{}'", key),
        1 => Ok(matches[0].id.clone()),
        n => bail!("'{}' matches {} measurement points; use the row id", key, n),
    }
}

/// Apply one table transform to an unlocked inspection and save it back
fn edit(
    global: &GlobalOpts,
    raw_id: &str,
    transform: impl FnOnce(&MeasurementTable, &str) -> Result<MeasurementTable>,
) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;

    let (store, mut inspection) = load_inspection(&ctx, raw_id)?;
    inspection
        .ensure_unlocked()
        .map_err(|e| miette::miette!("{}", e))?;

    let master = inspection.data.master_tolerance.clone();
    inspection.data.measurement_table =
        transform(&inspection.data.measurement_table, &master)?;

    store
        .save(&inspection.id.clone(), &inspection)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        let table = &inspection.data.measurement_table;
        println!(
            "{} Table updated: {} group(s), {} point(s)",
            paint("✓").green().bold(),
            table.groups.len(),
            table.rows.len()
        );
    }
    Ok(())
}

fn run_set_master(args: SetMasterArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    ctx.require_full_access(SectionId::QcInspect)?;

    let (store, mut inspection) = load_inspection(&ctx, &args.id)?;
    inspection
        .ensure_unlocked()
        .map_err(|e| miette::miette!("{}", e))?;

    inspection.data.master_tolerance = args.value.clone();
    store
        .save(&inspection.id.clone(), &inspection)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Master tolerance set to {}",
        paint("✓").green().bold(),
        args.value
    );
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let (_, inspection) = load_inspection(&ctx, &args.id)?;

    let table = &inspection.data.measurement_table;
    if table.is_empty() {
        println!("Measurement table is empty.");
        return Ok(());
    }

    let reports = table.evaluate(&inspection.data.master_tolerance);
    let out_count = reports.iter().filter(|r| r.check.is_out_of_tolerance()).count();

    let mut builder = Builder::default();
    builder.push_record(["Point", "Size", "Color", "Standard", "Actual", "Dev", "Status"]);
    for report in &reports {
        if args.out_only && !report.check.is_out_of_tolerance() {
            continue;
        }
        let (dev, status) = match report.check.deviation() {
            Some(deviation) => (
                format_deviation(deviation),
                if report.check.is_out_of_tolerance() {
                    "OUT".to_string()
                } else {
                    "ok".to_string()
                },
            ),
            None => ("-".to_string(), "no data".to_string()),
        };
        builder.push_record([
            report.row_name.clone(),
            report.size.clone(),
            report.color.clone(),
            report.standard_value.clone(),
            report.actual_value.clone(),
            dev,
            status,
        ]);
    }
    println!("{}", builder.build().with(TableStyle::sharp()));

    println!(
        "Master tolerance: {} | {} cell(s) out of tolerance",
        inspection.data.master_tolerance, out_count
    );

    Ok(())
}
