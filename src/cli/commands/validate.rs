//! `seamline validate` command - schema validation of document files

use clap::Args;
use console::style as paint;
use miette::{bail, Result};
use walkdir::WalkDir;

use crate::cli::commands::utils::load_context;
use crate::cli::GlobalOpts;
use crate::core::identity::{DocId, DocPrefix};
use crate::core::store::DocStore;
use crate::entities::Inspection;
use crate::schema::Validator;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Document IDs to validate (default: every document in the workspace)
    pub ids: Vec<String>,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let store = DocStore::new(&ctx.project);
    let validator = Validator::new().map_err(|e| miette::miette!("{}", e))?;

    let ids: Vec<DocId> = if args.ids.is_empty() {
        collect_all_ids(ctx.project.root())
    } else {
        let mut ids = Vec::new();
        for raw in &args.ids {
            ids.push(
                store
                    .resolve_id(raw)
                    .map_err(|e| miette::miette!("{}", e))?,
            );
        }
        ids
    };

    if ids.is_empty() {
        println!("No documents to validate.");
        return Ok(());
    }

    let mut failures = 0usize;
    for id in &ids {
        let path = store.path_for(id);
        let content =
            std::fs::read_to_string(&path).map_err(|e| miette::miette!("{}", e))?;

        match validator.validate(&content, id.prefix()) {
            Ok(result) if result.valid => {
                // Schema-valid inspections also get their grid consistency checked
                if id.prefix() == DocPrefix::Insp {
                    let inspection: Inspection =
                        serde_yml::from_str(&content).map_err(|e| miette::miette!("{}", e))?;
                    if let Err(e) = inspection.data.measurement_table.check_invariants() {
                        failures += 1;
                        println!("{} {}: {}", paint("✗").red().bold(), id, e);
                        continue;
                    }
                }
                if global.verbose {
                    println!("{} {}", paint("✓").green(), id);
                }
            }
            Ok(result) => {
                failures += 1;
                println!("{} {}", paint("✗").red().bold(), id);
                for issue in &result.issues {
                    println!("    {}: {}", issue.path, issue.message);
                }
            }
            Err(e) => {
                failures += 1;
                println!("{} {}: {}", paint("✗").red().bold(), id, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} document(s) failed validation", failures, ids.len());
    }
    println!(
        "{} {} document(s) valid",
        paint("✓").green().bold(),
        ids.len()
    );
    Ok(())
}

fn collect_all_ids(root: &std::path::Path) -> Vec<DocId> {
    let mut ids = Vec::new();
    for entry in WalkDir::new(root)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(stem) = name.strip_suffix(".yaml") {
            if let Ok(id) = DocId::parse(stem) {
                ids.push(id);
            }
        }
    }
    ids.sort_by_key(|id| id.to_string());
    ids
}
