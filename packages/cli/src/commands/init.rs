use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitebuilder_editor::{FilePersistence, Persistence, SiteSession};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Id of the site to create
    #[arg(short, long, default_value = "my-site")]
    pub site: String,

    /// Force overwrite existing config and site
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    println!("{}", "📝 Initializing site...".bright_blue().bold());

    let config = if config_path.exists() && !args.force {
        println!(
            "  {} {} already exists, keeping it",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        Config::load(cwd)?
    } else {
        let config = Config::default();
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
        config
    };

    let data_dir = config.get_data_dir(cwd);
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
        println!("  {} Created {}/", "✓".green(), config.data_dir);
    }

    let persistence = FilePersistence::new(&data_dir);
    if persistence.load_document(&args.site)?.is_some() && !args.force {
        println!(
            "  {} Site {} already exists",
            "⚠️".yellow(),
            args.site.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut session = SiteSession::create(persistence, &args.site, &config.editor_config());
    session.save()?;
    println!("  {} Created site {}", "✓".green(), args.site.bright_white());

    println!();
    println!("{}", "✨ Site initialized!".green().bold());
    println!("   Next: sitebuilder outline {}", args.site);

    Ok(())
}
