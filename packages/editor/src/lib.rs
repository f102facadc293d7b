//! # Sitebuilder Editor
//!
//! Editing engine for site pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Element tree, catalog, ids, JSON     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - tree: pure structural edits              │
//! │  - reducer: intents → new editor snapshot   │
//! │  - history: linear undo/redo over snapshots │
//! │  - pages: one working page out of many      │
//! │  - session: pages + persistence             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: reads RenderView                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sitebuilder_editor::{EditorConfig, Intent, MemoryPersistence, SiteSession};
//! use sitebuilder_model::{ElementType, ROOT_ID};
//!
//! let mut session =
//!     SiteSession::open(MemoryPersistence::new(), "site-1", &EditorConfig::default()).unwrap();
//!
//! session.dispatch(Intent::AddNewElement {
//!     container_id: ROOT_ID.to_string(),
//!     element_type: ElementType::Paragraph,
//! });
//! session.dispatch(Intent::Undo);
//! session.save().unwrap();
//! ```

mod editor;
mod errors;
mod history;
mod intents;
mod pages;
mod persistence;
mod reducer;
mod session;

pub mod tree;

pub use editor::{Device, Editor, EditorConfig, RenderView};
pub use errors::{EditorError, EditorResult};
pub use history::History;
pub use intents::Intent;
pub use pages::{slugify, PageStore, SitePage, HOME_PAGE_ID};
pub use persistence::{FilePersistence, MemoryPersistence, Persistence};
pub use reducer::{reduce, EditorState};
pub use session::{manifest_key, page_key, PageLoadError, SiteSession};
