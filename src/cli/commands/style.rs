//! `seamline style` command - style document management

use clap::Subcommand;
use console::style as paint;
use miette::Result;
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::cli::commands::utils::load_context;
use crate::cli::helpers::format_short_id;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::SectionId;
use crate::core::identity::DocPrefix;
use crate::core::store::DocStore;
use crate::entities::Style;

#[derive(Subcommand, Debug)]
pub enum StyleCommands {
    /// Create a new style
    New(NewArgs),

    /// List styles
    List(ListArgs),

    /// Show a style's details and section statuses
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Style title (required)
    #[arg(long, short = 't')]
    pub title: String,

    /// Buyer style number
    #[arg(long, short = 'n')]
    pub number: Option<String>,

    /// Season code (e.g. FW26)
    #[arg(long, short = 's')]
    pub season: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Style ID (full or unique prefix)
    pub id: String,
}

pub fn run(cmd: StyleCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        StyleCommands::New(args) => run_new(args, global),
        StyleCommands::List(args) => run_list(args, global),
        StyleCommands::Show(args) => run_show(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let store = DocStore::new(&ctx.project);

    let mut style = Style::new(args.title, ctx.actor.display_name.clone());
    style.style_number = args.number;
    style.season = args.season;

    store
        .save(&style.id, &style)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created style {}",
        paint("✓").green().bold(),
        style.id
    );
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let store = DocStore::new(&ctx.project);

    let mut styles: Vec<Style> = store
        .list(DocPrefix::Style)
        .map_err(|e| miette::miette!("{}", e))?;
    styles.sort_by(|a, b| a.created.cmp(&b.created));

    if let Some(limit) = args.limit {
        styles.truncate(limit);
    }

    if styles.is_empty() {
        println!("No styles found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&styles).map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Yaml => {
            print!(
                "{}",
                serde_yml::to_string(&styles).map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Id => {
            for style in &styles {
                println!("{}", style.id);
            }
        }
        OutputFormat::Auto | OutputFormat::Tsv => {
            for style in &styles {
                println!(
                    "{}\t{}\t{}\t{}",
                    format_short_id(&style.id),
                    style.title,
                    style.season.as_deref().unwrap_or("-"),
                    style.author
                );
            }
            println!("\n{} style(s) found", styles.len());
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
    let style: Style = store.load(&id).map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&style).map_err(|e| miette::miette!("{}", e))?
            );
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!(
                "{}",
                serde_yml::to_string(&style).map_err(|e| miette::miette!("{}", e))?
            );
            return Ok(());
        }
        _ => {}
    }

    println!("{}  {}", paint(&style.title).bold(), style.id);
    if let Some(ref number) = style.style_number {
        println!("Style number: {}", number);
    }
    if let Some(ref season) = style.season {
        println!("Season: {}", season);
    }
    println!("Author: {}", style.author);

    let mut builder = Builder::default();
    builder.push_record(["Section", "Status", "Submitted By", "Approved By"]);
    for section in SectionId::approvable() {
        let workflow = style.section_workflow(*section);
        builder.push_record([
            section.label().to_string(),
            workflow.status.to_string(),
            workflow.submitted_by.clone().unwrap_or_else(|| "-".to_string()),
            workflow.approved_by.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("\n{}", builder.build().with(TableStyle::sharp()));

    Ok(())
}
