use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitebuilder_common::{read_tree, RealFileSystem, TreeStats};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Saved page document (JSON)
    pub file: PathBuf,
}

pub fn check(args: CheckArgs) -> Result<()> {
    println!("🔍 {} {}", "Checking".green().bold(), args.file.display());

    let elements = read_tree(&RealFileSystem, &args.file)?;
    let stats = TreeStats::of(&elements);

    println!("  {} Document is valid", "✓".green());
    println!("   Elements:   {}", stats.elements);
    println!("   Containers: {}", stats.containers);
    println!("   Leaves:     {}", stats.leaves);
    println!("   Max depth:  {}", stats.max_depth);

    Ok(())
}
