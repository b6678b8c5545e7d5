//! `seamline export` command - CSV export of measurements and defects

use clap::Args;
use console::style as paint;
use miette::{bail, IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::utils::load_context;
use crate::cli::GlobalOpts;
use crate::core::identity::DocPrefix;
use crate::core::store::DocStore;
use crate::entities::Inspection;
use crate::qc::defects::defect_totals;
use crate::qc::tolerance::format_deviation;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Inspection ID (full or unique prefix)
    pub id: String,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let store = DocStore::new(&ctx.project);

    let id = store
        .resolve_id(&args.id)
        .map_err(|e| miette::miette!("{}", e))?;
    if id.prefix() != DocPrefix::Insp {
        bail!("{} is not an inspection document", id);
    }
    let inspection: Inspection = store.load(&id).map_err(|e| miette::miette!("{}", e))?;

    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).into_diagnostic()?;
            csv::Writer::from_writer(Box::new(file))
        }
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };

    // Measurement cells
    writer
        .write_record([
            "record", "point", "size", "color", "standard", "actual", "deviation", "status",
        ])
        .into_diagnostic()?;
    for report in inspection
        .data
        .measurement_table
        .evaluate(&inspection.data.master_tolerance)
    {
        let (deviation, status) = match report.check.deviation() {
            Some(d) => (
                format_deviation(d),
                if report.check.is_out_of_tolerance() {
                    "out_of_tolerance".to_string()
                } else {
                    "in_tolerance".to_string()
                },
            ),
            None => (String::new(), "no_data".to_string()),
        };
        writer
            .write_record([
                "measurement".to_string(),
                report.row_name.clone(),
                report.size.clone(),
                report.color.clone(),
                report.standard_value.clone(),
                report.actual_value.clone(),
                deviation,
                status,
            ])
            .into_diagnostic()?;
    }

    // Defect rows
    for defect in &inspection.data.defects {
        writer
            .write_record([
                "defect".to_string(),
                defect.description.clone(),
                String::new(),
                String::new(),
                defect.critical.to_string(),
                defect.major.to_string(),
                defect.minor.to_string(),
                String::new(),
            ])
            .into_diagnostic()?;
    }

    // Summary line
    let totals = defect_totals(&inspection.data.defects);
    writer
        .write_record([
            "summary".to_string(),
            inspection.inspection_type.clone(),
            String::new(),
            String::new(),
            totals.critical.to_string(),
            totals.major.to_string(),
            totals.minor.to_string(),
            inspection.data.overall_result.to_string(),
        ])
        .into_diagnostic()?;

    writer.flush().into_diagnostic()?;

    if let Some(path) = &args.output {
        if !global.quiet {
            eprintln!(
                "{} Exported {} to {}",
                paint("✓").green().bold(),
                id,
                path.display()
            );
        }
    }

    Ok(())
}
