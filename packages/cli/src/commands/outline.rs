use super::open_site;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitebuilder_model::Element;
use std::fmt::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Site id
    pub site: String,

    /// Page slug (defaults to the home page)
    #[arg(short, long)]
    pub page: Option<String>,
}

pub fn outline(args: OutlineArgs, cwd: &Path) -> Result<()> {
    let session = open_site(cwd, &args.site, args.page.as_deref())?;

    if let Some(page) = session.store().current_page() {
        println!("📄 {} /{}", page.title.bright_white().bold(), page.slug);
    }
    print!("{}", render_outline(session.view().elements));

    Ok(())
}

/// Indented `name (type) #id` listing of a tree
pub fn render_outline(elements: &[Element]) -> String {
    let mut out = String::new();
    write_level(&mut out, elements, 0);
    out
}

fn write_level(out: &mut String, elements: &[Element], depth: usize) {
    for element in elements {
        let kind = element.kind.map(|kind| kind.as_str()).unwrap_or("-");
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}{} ({}) #{}", "  ".repeat(depth), element.name, kind, element.id);
        if let Some(children) = element.children() {
            write_level(out, children, depth + 1);
        }
    }
}
