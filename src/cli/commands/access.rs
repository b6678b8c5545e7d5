//! `seamline access` command - access policy inspection

use clap::Subcommand;
use console::style as paint;
use miette::Result;
use tabled::{builder::Builder, settings::Style as TableStyle};

use crate::cli::commands::utils::load_context;
use crate::cli::GlobalOpts;
use crate::core::access::{
    effective_access, role_defaults, AccessLevel, SectionId, UserRole,
};

#[derive(Subcommand, Debug)]
pub enum AccessCommands {
    /// Print the full role/section defaults matrix
    Matrix,

    /// Check whether a role satisfies an access requirement
    Check(CheckArgs),

    /// Show the acting user's effective access (config overrides applied)
    Effective,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Role to check
    pub role: UserRole,

    /// Section to check
    pub section: SectionId,

    /// Required level
    #[arg(long, short = 'l', default_value = "view")]
    pub level: AccessLevel,
}

pub fn run(cmd: AccessCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AccessCommands::Matrix => run_matrix(),
        AccessCommands::Check(args) => run_check(args),
        AccessCommands::Effective => run_effective(global),
    }
}

fn level_cell(level: AccessLevel) -> &'static str {
    match level {
        AccessLevel::Full => "full",
        AccessLevel::View => "view",
        AccessLevel::None => "-",
    }
}

fn run_matrix() -> Result<()> {
    let mut builder = Builder::default();

    let mut header = vec!["Section".to_string()];
    header.extend(UserRole::all().iter().map(|r| r.label().to_string()));
    builder.push_record(header);

    for section in SectionId::all() {
        let mut row = vec![section.label().to_string()];
        for role in UserRole::all() {
            row.push(level_cell(role_defaults(*role).level(*section)).to_string());
        }
        builder.push_record(row);
    }

    println!("{}", builder.build().with(TableStyle::sharp()));
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let access = role_defaults(args.role);
    let granted = access.has_access(args.section, args.level);

    println!(
        "{} {} needs {} on {}: {} (has {})",
        if granted {
            paint("✓").green().bold()
        } else {
            paint("✗").red().bold()
        },
        args.role,
        args.level,
        args.section,
        if granted { "allowed" } else { "denied" },
        access.level(args.section),
    );

    if !granted {
        std::process::exit(1);
    }
    Ok(())
}

fn run_effective(global: &GlobalOpts) -> Result<()> {
    let ctx = load_context(global)?;
    let defaults = effective_access(ctx.actor.role, None);

    println!(
        "{} ({}, role {})",
        paint(&ctx.actor.display_name).bold(),
        ctx.actor.id,
        ctx.actor.role
    );

    let mut builder = Builder::default();
    builder.push_record(["Section", "Effective", "Role Default"]);
    for section in SectionId::all() {
        let effective = ctx.access.level(*section);
        let default = defaults.level(*section);
        let marker = if effective != default { " *" } else { "" };
        builder.push_record([
            section.label().to_string(),
            format!("{}{}", level_cell(effective), marker),
            level_cell(default).to_string(),
        ]);
    }
    println!("{}", builder.build().with(TableStyle::sharp()));
    println!("* overridden in config");

    Ok(())
}
