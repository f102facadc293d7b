use super::open_site;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct PagesArgs {
    /// Site id
    pub site: String,

    /// Create a page with this title
    #[arg(short, long)]
    pub add: Option<String>,
}

pub fn pages(args: PagesArgs, cwd: &Path) -> Result<()> {
    let mut session = open_site(cwd, &args.site, None)?;

    if let Some(title) = args.add.as_deref() {
        let id = session.add_page(title)?;
        session.save()?;
        println!("  {} Added page {} ({})", "✓".green(), title.bright_white(), id);
        println!();
    }

    let store = session.store();
    for page in store.pages() {
        let marker = if page.id == store.current_page_id() { "*" } else { " " };
        println!("{} {:<24} /{:<20} {}", marker, page.title, page.slug, page.id.dimmed());
    }

    Ok(())
}
