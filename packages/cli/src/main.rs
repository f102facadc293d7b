mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, check, init, outline, pages, ApplyArgs, CheckArgs, InitArgs, OutlineArgs, PagesArgs,
};
use tracing_subscriber::EnvFilter;

/// Sitebuilder CLI - inspect and edit saved site documents
#[derive(Parser, Debug)]
#[command(name = "sitebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log structural edits and storage access
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file, the data directory and an empty site
    Init(InitArgs),

    /// Validate a saved page document
    Check(CheckArgs),

    /// Print the element tree of a page
    Outline(OutlineArgs),

    /// Replay a list of editor intents against a page and save
    Apply(ApplyArgs),

    /// List the pages of a site, or add one
    Pages(PagesArgs),
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Check(args) => check(args),
        Command::Outline(args) => outline(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Pages(args) => pages(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
