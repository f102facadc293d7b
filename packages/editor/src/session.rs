//! # Site Session
//!
//! Everything needed to edit one site, passed around explicitly: the page
//! store (and through it the reducer state) plus the persistence handle.
//!
//! ## Storage layout
//!
//! ```text
//! {site_id}               home page tree (first page)
//! {site_id}.pages         manifest: [{id, title, slug}, ...]
//! {site_id}.page.{slug}   tree of every other page
//! ```
//!
//! Persistence is only touched by [`SiteSession::open`] and
//! [`SiteSession::save`]. A failed save leaves the in-memory pages as they
//! were.

use crate::editor::{EditorConfig, RenderView};
use crate::errors::{EditorError, EditorResult};
use crate::intents::Intent;
use crate::pages::{PageStore, SitePage};
use crate::persistence::Persistence;
use crate::reducer::EditorState;
use serde::{Deserialize, Serialize};
use sitebuilder_model::{deserialize_tree, DocumentError};
use tracing::{info, warn};

/// Key of the page manifest for `site_id`
pub fn manifest_key(site_id: &str) -> String {
    format!("{}.pages", site_id)
}

/// Key of a non-home page
pub fn page_key(site_id: &str, slug: &str) -> String {
    format!("{}.page.{}", site_id, slug)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManifestEntry {
    id: String,
    title: String,
    slug: String,
}

/// A stored page whose content did not parse when the site was opened
#[derive(Debug)]
pub struct PageLoadError {
    pub page_id: String,
    pub error: DocumentError,
}

pub struct SiteSession<P: Persistence> {
    site_id: String,
    persistence: P,
    store: PageStore,
    load_errors: Vec<PageLoadError>,
}

impl<P: Persistence> SiteSession<P> {
    /// Start a new site with an empty home page, ignoring anything stored
    pub fn create(persistence: P, site_id: &str, config: &EditorConfig) -> Self {
        Self {
            site_id: site_id.to_string(),
            persistence,
            store: PageStore::new(site_id, config),
            load_errors: Vec::new(),
        }
    }

    /// Open a site, loading the home page and every page in the manifest
    ///
    /// Pages with malformed content open as empty pages and are listed in
    /// [`SiteSession::load_errors`]; their stored content is kept until they
    /// are edited and saved.
    pub fn open(persistence: P, site_id: &str, config: &EditorConfig) -> EditorResult<Self> {
        let entries = match persistence.load_document(&manifest_key(site_id))? {
            Some(manifest) => {
                serde_json::from_str::<Vec<ManifestEntry>>(&manifest).map_err(EditorError::Manifest)?
            }
            None => Vec::new(),
        };
        let entries = if entries.is_empty() {
            let home = SitePage::home();
            vec![ManifestEntry {
                id: home.id,
                title: home.title,
                slug: home.slug,
            }]
        } else {
            entries
        };

        let mut pages = Vec::with_capacity(entries.len());
        let mut load_errors = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let key = if index == 0 {
                site_id.to_string()
            } else {
                page_key(site_id, &entry.slug)
            };
            let content = persistence.load_document(&key)?;

            if let Some(source) = content.as_deref() {
                if let Err(error) = deserialize_tree(source) {
                    warn!(page_id = %entry.id, error = %error, "stored page is malformed");
                    load_errors.push(PageLoadError {
                        page_id: entry.id.clone(),
                        error,
                    });
                }
            }

            pages.push(SitePage {
                id: entry.id,
                title: entry.title,
                slug: entry.slug,
                content,
            });
        }

        info!(site_id, pages = pages.len(), "site opened");
        Ok(Self {
            site_id: site_id.to_string(),
            persistence,
            store: PageStore::from_pages(site_id, config, pages),
            load_errors,
        })
    }

    /// Write every page and the manifest
    pub fn save(&mut self) -> EditorResult<()> {
        let pages = self.store.pages_with_current()?;
        let manifest: Vec<ManifestEntry> = pages
            .iter()
            .map(|page| ManifestEntry {
                id: page.id.clone(),
                title: page.title.clone(),
                slug: page.slug.clone(),
            })
            .collect();
        let manifest = serde_json::to_string(&manifest).map_err(EditorError::Manifest)?;

        for (index, page) in pages.iter().enumerate() {
            let Some(content) = page.content.as_deref() else {
                continue;
            };
            let key = if index == 0 {
                self.site_id.clone()
            } else {
                page_key(&self.site_id, &page.slug)
            };
            self.persistence.save_document(&key, content)?;
        }
        self.persistence.save_document(&manifest_key(&self.site_id), &manifest)?;

        self.store.sync_current()?;
        info!(site_id = %self.site_id, pages = pages.len(), "site saved");
        Ok(())
    }

    pub fn dispatch(&mut self, intent: Intent) {
        self.store.dispatch(intent);
    }

    pub fn switch_page(&mut self, page_id: &str) -> EditorResult<()> {
        self.store.switch(page_id)
    }

    /// Switch by slug instead of id
    pub fn switch_to_slug(&mut self, slug: &str) -> EditorResult<()> {
        let page_id = self
            .store
            .page_by_slug(slug)
            .map(|page| page.id.clone())
            .ok_or_else(|| EditorError::PageNotFound(slug.to_string()))?;
        self.store.switch(&page_id)
    }

    pub fn add_page(&mut self, title: &str) -> EditorResult<String> {
        self.store.add_page(title)
    }

    pub fn view(&self) -> RenderView<'_> {
        self.store.state().view()
    }

    pub fn state(&self) -> &EditorState {
        self.store.state()
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn load_errors(&self) -> &[PageLoadError] {
        &self.load_errors
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn into_persistence(self) -> P {
        self.persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use sitebuilder_model::{root_only_tree, serialize_tree, ElementType, ROOT_ID};

    fn open(persistence: MemoryPersistence) -> SiteSession<MemoryPersistence> {
        SiteSession::open(persistence, "site", &EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_open_empty_site() {
        let session = open(MemoryPersistence::new());
        assert_eq!(session.store().pages().len(), 1);
        assert_eq!(session.view().elements, root_only_tree().as_slice());
        assert!(session.load_errors().is_empty());
    }

    #[test]
    fn test_save_writes_home_and_manifest() {
        let mut session = open(MemoryPersistence::new());
        session.dispatch(Intent::AddNewElement {
            container_id: ROOT_ID.into(),
            element_type: ElementType::Paragraph,
        });
        session.save().unwrap();

        let stored = session.persistence();
        let home = stored.get("site").unwrap();
        assert_eq!(home, serialize_tree(session.view().elements).unwrap());
        assert!(stored.get("site.pages").unwrap().contains("\"slug\":\"home\""));
    }

    #[test]
    fn test_create_ignores_stored_pages() {
        let stored = MemoryPersistence::new().with_document("site", "not json");
        let mut session = SiteSession::create(stored, "site", &EditorConfig::default());
        session.save().unwrap();

        let home = session.persistence().get("site").unwrap();
        assert_eq!(home, serialize_tree(&root_only_tree()).unwrap());
    }

    #[test]
    fn test_malformed_home_is_reported() {
        let session = open(MemoryPersistence::new().with_document("site", "not json"));
        assert_eq!(session.load_errors().len(), 1);
        assert_eq!(session.load_errors()[0].page_id, "home");
        assert_eq!(session.view().elements, root_only_tree().as_slice());
    }

    #[test]
    fn test_malformed_manifest_fails_open() {
        let persistence = MemoryPersistence::new().with_document("site.pages", "{}");
        let result = SiteSession::open(persistence, "site", &EditorConfig::default());
        assert!(matches!(result, Err(EditorError::Manifest(_))));
    }

    #[test]
    fn test_key_helpers() {
        assert_eq!(manifest_key("s1"), "s1.pages");
        assert_eq!(page_key("s1", "about"), "s1.page.about");
    }
}
