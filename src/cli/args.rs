//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    access::AccessCommands,
    completions::CompletionsArgs,
    defect::DefectCommands,
    export::ExportArgs,
    history::HistoryArgs,
    init::InitArgs,
    inspect::InspectCommands,
    judge::JudgeArgs,
    measure::MeasureCommands,
    style::StyleCommands,
    validate::ValidateArgs,
    workflow::{ApproveArgs, RecallArgs, RejectArgs, ReviseArgs, SubmitArgs},
};
use crate::core::access::UserRole;

#[derive(Parser)]
#[command(name = "seamline")]
#[command(author, version, about = "Seamline Garment Production Toolkit")]
#[command(
    long_about = "A Unix-style toolkit for managing garment production documents as plain text files with a role-based approval workflow."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .seamline/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    /// Act with this role (overrides config)
    #[arg(long, global = true, env = "SEAMLINE_ROLE")]
    pub role: Option<UserRole>,

    /// Act as this user (overrides config)
    #[arg(long, global = true, env = "SEAMLINE_AUTHOR")]
    pub author: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new seamline workspace
    Init(InitArgs),

    /// Style document management
    #[command(subcommand)]
    Style(StyleCommands),

    /// QC inspection management
    #[command(subcommand)]
    Inspect(InspectCommands),

    /// Submit a document section for approval
    Submit(SubmitArgs),

    /// Recall a submitted section back to draft
    Recall(RecallArgs),

    /// Approve a submitted section
    Approve(ApproveArgs),

    /// Reject a submitted section (comment required)
    Reject(RejectArgs),

    /// Request revision of an approved section
    Revise(ReviseArgs),

    /// Show the approval history of a document section
    History(HistoryArgs),

    /// Inspect the role/section access policy
    #[command(subcommand)]
    Access(AccessCommands),

    /// Edit and report on an inspection's measurement table
    #[command(subcommand)]
    Measure(MeasureCommands),

    /// Manage defect rows on an inspection
    #[command(subcommand)]
    Defect(DefectCommands),

    /// Recompute and show an inspection's overall judgement
    Judge(JudgeArgs),

    /// Validate documents against their schemas
    Validate(ValidateArgs),

    /// Export an inspection's measurements and defects as CSV
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
    /// Just IDs, one per line
    Id,
}
