//! Per-page working state and the read-only view handed to renderers.

use serde::{Deserialize, Serialize};
use sitebuilder_model::{root_only_tree, Element};

/// Preview device (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// Working state of the page being edited; also the unit stored in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    pub site_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,

    pub live_mode: bool,
    pub preview_mode: bool,

    /// Publish flag
    pub visible: bool,

    pub elements: Vec<Element>,
    pub selected_element: Element,
    pub device: Device,

    /// Data widget whose external fetch has been requested but not yet answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_fetch: Option<String>,
}

impl Editor {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }

    /// Same view state with a different tree and selection
    pub(crate) fn with_tree(&self, elements: Vec<Element>, selected_element: Element) -> Self {
        Self {
            site_id: self.site_id.clone(),
            page_id: self.page_id.clone(),
            live_mode: self.live_mode,
            preview_mode: self.preview_mode,
            visible: self.visible,
            elements,
            selected_element,
            device: self.device,
            pending_fetch: self.pending_fetch.clone(),
        }
    }

    /// Copy everything except tree and selection from `other`
    pub(crate) fn adopt_view_state(&mut self, other: ViewState) {
        self.site_id = other.site_id;
        self.page_id = other.page_id;
        self.live_mode = other.live_mode;
        self.preview_mode = other.preview_mode;
        self.visible = other.visible;
        self.device = other.device;
        self.pending_fetch = other.pending_fetch;
    }

    pub(crate) fn view_state(&self) -> ViewState {
        ViewState {
            site_id: self.site_id.clone(),
            page_id: self.page_id.clone(),
            live_mode: self.live_mode,
            preview_mode: self.preview_mode,
            visible: self.visible,
            device: self.device,
            pending_fetch: self.pending_fetch.clone(),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            site_id: String::new(),
            page_id: None,
            live_mode: false,
            preview_mode: false,
            visible: false,
            elements: root_only_tree(),
            selected_element: Element::empty(),
            device: Device::Desktop,
            pending_fetch: None,
        }
    }
}

/// Transient editor flags that undo/redo leave alone
#[derive(Debug, Clone)]
pub(crate) struct ViewState {
    site_id: String,
    page_id: Option<String>,
    live_mode: bool,
    preview_mode: bool,
    visible: bool,
    device: Device,
    pending_fetch: Option<String>,
}

/// Read-only snapshot for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderView<'a> {
    pub elements: &'a [Element],
    pub selected_element: &'a Element,
    pub device: Device,
    pub preview_mode: bool,
    pub live_mode: bool,
}

impl<'a> From<&'a Editor> for RenderView<'a> {
    fn from(editor: &'a Editor) -> Self {
        Self {
            elements: &editor.elements,
            selected_element: &editor.selected_element,
            device: editor.device,
            preview_mode: editor.preview_mode,
            live_mode: editor.live_mode,
        }
    }
}

impl RenderView<'_> {
    /// Whether drag handles, selection outlines and other editing affordances show
    pub fn is_interactive(&self) -> bool {
        !self.preview_mode && !self.live_mode
    }
}

/// Library-side editor settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum history snapshots kept (0 = unlimited)
    pub history_limit: usize,

    /// Indent saved page documents
    pub pretty_json: bool,
}
