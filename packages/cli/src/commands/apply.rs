use super::open_site;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sitebuilder_editor::Intent;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Site id
    pub site: String,

    /// JSON array of intents, e.g. [{"type": "UNDO"}]
    pub intents: PathBuf,

    /// Page slug (defaults to the home page)
    #[arg(short, long)]
    pub page: Option<String>,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let source = fs::read_to_string(&args.intents)
        .with_context(|| format!("Cannot read {}", args.intents.display()))?;
    let intents: Vec<Intent> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid intent list in {}", args.intents.display()))?;

    let mut session = open_site(cwd, &args.site, args.page.as_deref())?;

    println!(
        "⚙️  {} {} intents to {}",
        "Applying".green().bold(),
        intents.len(),
        args.site.bright_white()
    );
    for intent in intents {
        info!(intent = intent.name(), "applying");
        println!("   {} {}", "•".cyan(), intent.name());
        session.dispatch(intent);
    }

    session.save()?;

    let history = session.state().history();
    println!();
    println!("✨ {} Site saved", "Done".green().bold());
    println!(
        "   History: {} snapshots, at {}",
        history.len(),
        history.current_index()
    );

    Ok(())
}
