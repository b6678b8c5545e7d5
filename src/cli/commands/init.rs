//! `seamline init` command - workspace initialization

use clap::Args;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::core::project::Project;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    pub path: Option<PathBuf>,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let project = Project::init(&path).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized seamline workspace at {}",
        style("✓").green().bold(),
        project.root().display()
    );
    println!("  Created .seamline/config.yaml");
    println!("  Created styles/ and inspections/");
    println!("\nNext steps:");
    println!("  1. Set your name and role in .seamline/config.yaml");
    println!("  2. Create a style:  seamline style new --title \"Crew Neck Sweater\"");

    Ok(())
}
