use clap::Parser;
use miette::Result;
use seamline::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => seamline::cli::commands::init::run(args),
        Commands::Style(cmd) => seamline::cli::commands::style::run(cmd, &global),
        Commands::Inspect(cmd) => seamline::cli::commands::inspect::run(cmd, &global),
        Commands::Submit(args) => args.run(&global),
        Commands::Recall(args) => args.run(&global),
        Commands::Approve(args) => args.run(&global),
        Commands::Reject(args) => args.run(&global),
        Commands::Revise(args) => args.run(&global),
        Commands::History(args) => seamline::cli::commands::history::run(args, &global),
        Commands::Access(cmd) => seamline::cli::commands::access::run(cmd, &global),
        Commands::Measure(cmd) => seamline::cli::commands::measure::run(cmd, &global),
        Commands::Defect(cmd) => seamline::cli::commands::defect::run(cmd, &global),
        Commands::Judge(args) => seamline::cli::commands::judge::run(args, &global),
        Commands::Validate(args) => seamline::cli::commands::validate::run(args, &global),
        Commands::Export(args) => seamline::cli::commands::export::run(args, &global),
        Commands::Completions(args) => seamline::cli::commands::completions::run(args),
    }
}
