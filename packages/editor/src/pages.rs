//! # Multi-page Document Store
//!
//! Keeps every page of a site as serialized content and drives the reducer
//! state for the one page being edited. Switching pages writes the working
//! tree back into its page and boots the destination with a fresh one-entry
//! history, so undo never crosses a page boundary.

use crate::editor::EditorConfig;
use crate::errors::{EditorError, EditorResult};
use crate::intents::Intent;
use crate::reducer::EditorState;
use serde::{Deserialize, Serialize};
use sitebuilder_model::{deserialize_tree, root_only_tree, serialize_tree, serialize_tree_pretty, Element};
use tracing::{info, warn};

pub const HOME_PAGE_ID: &str = "home";

/// One page of a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePage {
    pub id: String,
    pub title: String,
    pub slug: String,

    /// Serialized tree; `None` until the page is first saved
    #[serde(default)]
    pub content: Option<String>,
}

impl SitePage {
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            content: None,
        }
    }

    pub fn home() -> Self {
        Self::new(HOME_PAGE_ID, "Home", "home")
    }
}

#[derive(Debug, Clone)]
pub struct PageStore {
    pages: Vec<SitePage>,
    current_page_id: String,
    state: EditorState,
    pretty_json: bool,
    /// Current page when it was opened from malformed content and has not
    /// been edited since; its stored content is left alone
    untouched_fallback: Option<String>,
}

impl PageStore {
    /// Single-page site with an empty home page
    pub fn new(site_id: &str, config: &EditorConfig) -> Self {
        Self::from_pages(site_id, config, vec![SitePage::home()])
    }

    /// Build a store over existing pages and open the first one
    ///
    /// A first page with malformed content opens as an empty page; use
    /// [`PageStore::load`] to observe the error.
    pub fn from_pages(site_id: &str, config: &EditorConfig, pages: Vec<SitePage>) -> Self {
        let pages = if pages.is_empty() { vec![SitePage::home()] } else { pages };
        let first = pages[0].id.clone();

        let mut store = Self {
            pages,
            current_page_id: first.clone(),
            state: EditorState::with_config(site_id, config),
            pretty_json: config.pretty_json,
            untouched_fallback: None,
        };
        if let Err(err) = store.load(&first) {
            warn!(page_id = %first, error = %err, "opening first page failed");
        }
        store
    }

    /// Open `page_id` from its stored content
    ///
    /// Missing content opens a root-only tree. Malformed content also opens a
    /// root-only tree, and the parse error is returned; the page keeps its
    /// stored content until a structural edit or `LoadData` replaces the
    /// working tree.
    pub fn load(&mut self, page_id: &str) -> EditorResult<()> {
        let page = self
            .page(page_id)
            .ok_or_else(|| EditorError::PageNotFound(page_id.to_string()))?;
        let parsed = match page.content.as_deref() {
            Some(content) => deserialize_tree(content),
            None => Ok(root_only_tree()),
        };

        self.current_page_id = page_id.to_string();
        match parsed {
            Ok(elements) => {
                self.untouched_fallback = None;
                self.state.open_page(page_id, elements);
                info!(page_id, "page opened");
                Ok(())
            }
            Err(err) => {
                warn!(page_id, error = %err, "page content is malformed, opening an empty page");
                self.state.open_page(page_id, root_only_tree());
                self.untouched_fallback = Some(page_id.to_string());
                Err(err.into())
            }
        }
    }

    /// Store the working tree in the current page, then open `page_id`
    pub fn switch(&mut self, page_id: &str) -> EditorResult<()> {
        if self.page(page_id).is_none() {
            return Err(EditorError::PageNotFound(page_id.to_string()));
        }
        self.sync_current()?;
        self.load(page_id)
    }

    /// Create a page holding an empty tree and make it current; returns its id
    pub fn add_page(&mut self, title: &str) -> EditorResult<String> {
        self.sync_current()?;

        let id = self.state.next_id();
        let slug = self.unique_slug(title);
        let content = self.serialize(&root_only_tree())?;
        self.pages.push(SitePage {
            id: id.clone(),
            title: title.to_string(),
            slug,
            content: Some(content),
        });

        self.load(&id)?;
        Ok(id)
    }

    /// Write the working tree into the current page's content
    pub fn sync_current(&mut self) -> EditorResult<()> {
        if self.is_untouched_fallback() {
            return Ok(());
        }
        let content = self.serialize(self.state.elements())?;
        let current = self.current_page_id.clone();
        if let Some(page) = self.pages.iter_mut().find(|page| page.id == current) {
            page.content = Some(content);
        }
        Ok(())
    }

    /// All pages with the current one's content taken from the working tree
    pub fn pages_with_current(&self) -> EditorResult<Vec<SitePage>> {
        if self.is_untouched_fallback() {
            return Ok(self.pages.clone());
        }
        let content = self.serialize(self.state.elements())?;
        Ok(self
            .pages
            .iter()
            .map(|page| {
                let mut page = page.clone();
                if page.id == self.current_page_id {
                    page.content = Some(content.clone());
                }
                page
            })
            .collect())
    }

    pub fn dispatch(&mut self, intent: Intent) {
        if intent.records_history() || matches!(intent, Intent::LoadData { .. }) {
            self.untouched_fallback = None;
        }
        self.state.dispatch(intent);
    }

    /// Whether the current page still shows the empty stand-in for content
    /// that failed to parse
    pub fn is_untouched_fallback(&self) -> bool {
        self.untouched_fallback.as_deref() == Some(self.current_page_id.as_str())
    }

    pub fn pages(&self) -> &[SitePage] {
        &self.pages
    }

    pub fn page(&self, page_id: &str) -> Option<&SitePage> {
        self.pages.iter().find(|page| page.id == page_id)
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&SitePage> {
        self.pages.iter().find(|page| page.slug == slug)
    }

    pub fn current_page_id(&self) -> &str {
        &self.current_page_id
    }

    pub fn current_page(&self) -> Option<&SitePage> {
        self.page(&self.current_page_id)
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    fn serialize(&self, elements: &[Element]) -> EditorResult<String> {
        let content = if self.pretty_json {
            serialize_tree_pretty(elements)?
        } else {
            serialize_tree(elements)?
        };
        Ok(content)
    }

    fn unique_slug(&self, title: &str) -> String {
        let base = slugify(title);
        if self.page_by_slug(&base).is_none() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.page_by_slug(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Lowercase `[a-z0-9-]` form of a title, `page` when nothing usable remains
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "page".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::find_by_id;
    use sitebuilder_model::{ElementType, ROOT_ID};

    fn store() -> PageStore {
        PageStore::new("site", &EditorConfig::default())
    }

    fn add_paragraph(store: &mut PageStore) -> String {
        store.dispatch(Intent::AddNewElement {
            container_id: ROOT_ID.into(),
            element_type: ElementType::Paragraph,
        });
        store.state().elements()[0].children().unwrap()[0].id.clone()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About Us"), "about-us");
        assert_eq!(slugify("  Pricing & Plans!  "), "pricing-plans");
        assert_eq!(slugify("***"), "page");
        assert_eq!(slugify("Café 2024"), "caf-2024");
    }

    #[test]
    fn test_new_store_opens_home() {
        let store = store();
        assert_eq!(store.current_page_id(), HOME_PAGE_ID);
        assert_eq!(store.state().elements(), root_only_tree().as_slice());
        assert_eq!(store.state().editor().page_id.as_deref(), Some(HOME_PAGE_ID));
    }

    #[test]
    fn test_add_page_makes_it_current_with_unique_slug() {
        let mut store = store();
        let first = store.add_page("About").unwrap();
        let second = store.add_page("About").unwrap();

        assert_ne!(first, second);
        assert_eq!(store.current_page_id(), second);
        assert_eq!(store.page(&first).unwrap().slug, "about");
        assert_eq!(store.page(&second).unwrap().slug, "about-2");
        assert_eq!(store.pages().len(), 3);
    }

    #[test]
    fn test_switch_round_trips_the_working_tree() {
        let mut store = store();
        let id = add_paragraph(&mut store);

        let about = store.add_page("About").unwrap();
        assert!(find_by_id(store.state().elements(), &id).is_none());

        store.switch(HOME_PAGE_ID).unwrap();
        assert!(find_by_id(store.state().elements(), &id).is_some());
        assert_eq!(store.state().history().len(), 1);
        assert!(!store.state().can_undo());

        store.switch(&about).unwrap();
        assert_eq!(store.state().elements(), root_only_tree().as_slice());
    }

    #[test]
    fn test_switch_to_unknown_page_changes_nothing() {
        let mut store = store();
        add_paragraph(&mut store);
        let before = store.state().clone();

        let err = store.switch("nope").unwrap_err();
        assert!(matches!(err, EditorError::PageNotFound(_)));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_load_malformed_content_falls_back_and_reports() {
        let mut broken = SitePage::new("broken", "Broken", "broken");
        broken.content = Some("{ not json".into());
        let mut store = PageStore::from_pages("site", &EditorConfig::default(), vec![SitePage::home(), broken]);

        let err = store.load("broken").unwrap_err();
        assert!(matches!(err, EditorError::Document(_)));
        assert_eq!(store.current_page_id(), "broken");
        assert_eq!(store.state().elements(), root_only_tree().as_slice());
        assert!(store.is_untouched_fallback());
    }

    #[test]
    fn test_malformed_page_content_is_kept_until_edited() {
        let mut broken = SitePage::new("broken", "Broken", "broken");
        broken.content = Some("{ not json".into());
        let mut store = PageStore::from_pages("site", &EditorConfig::default(), vec![broken, SitePage::home()]);

        // Selection and view changes are not edits
        store.dispatch(Intent::TogglePreviewMode);
        store.switch(HOME_PAGE_ID).unwrap();
        assert_eq!(store.page("broken").unwrap().content.as_deref(), Some("{ not json"));

        assert!(store.switch("broken").is_err());
        assert_eq!(store.pages_with_current().unwrap()[0].content.as_deref(), Some("{ not json"));

        add_paragraph(&mut store);
        assert!(!store.is_untouched_fallback());
        let pages = store.pages_with_current().unwrap();
        assert!(deserialize_tree(pages[0].content.as_deref().unwrap()).is_ok());
    }

    #[test]
    fn test_pages_with_current_does_not_mutate() {
        let mut store = store();
        add_paragraph(&mut store);

        let pages = store.pages_with_current().unwrap();
        assert!(pages[0].content.is_some());
        assert!(store.pages()[0].content.is_none());
    }
}
