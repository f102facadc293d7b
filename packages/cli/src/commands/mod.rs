pub mod apply;
pub mod check;
pub mod init;
pub mod outline;
pub mod pages;

pub use apply::{apply, ApplyArgs};
pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use outline::{outline, OutlineArgs};
pub use pages::{pages, PagesArgs};

use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use sitebuilder_editor::{FilePersistence, SiteSession};
use std::path::Path;

type FileSession = SiteSession<FilePersistence>;

/// Open a site from the configured data directory, optionally on a page slug
fn open_site(cwd: &Path, site: &str, page: Option<&str>) -> Result<FileSession> {
    let config = Config::load(cwd)?;
    let persistence = FilePersistence::new(config.get_data_dir(cwd));
    let mut session = SiteSession::open(persistence, site, &config.editor_config())?;

    for failed in session.load_errors() {
        println!(
            "  {} page {} could not be read: {}",
            "⚠️".yellow(),
            failed.page_id.bright_white(),
            failed.error
        );
    }

    if let Some(slug) = page {
        session.switch_to_slug(slug)?;
    }
    Ok(session)
}
