//! # Editor Intents
//!
//! Discrete requests to change editor state, consumed by the reducer.
//!
//! Wire shape is `{"type": "ADD_ELEMENT", "payload": {...}}`; payload fields
//! are camelCase. Intents without data (`UNDO`, `REDO`,
//! `TOGGLE_PREVIEW_MODE`) carry no payload.

use crate::editor::Device;
use serde::{Deserialize, Serialize};
use sitebuilder_model::{Element, ElementType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Intent {
    /// Append a fully built element to a container
    AddElement {
        container_id: String,
        element_details: Element,
    },

    /// Build an element of `element_type` from the catalog and append it
    AddNewElement {
        container_id: String,
        element_type: ElementType,
    },

    /// Full replace of the node with the same id
    UpdateElement { element_details: Element },

    DeleteElement { element_id: String },

    DuplicateElement { element_id: String },

    MoveElement {
        element_id: String,
        target_container_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        insert_index: Option<usize>,
    },

    /// Select a node, or clear the selection with `None`
    ChangeSelectedElement {
        #[serde(default)]
        element_details: Option<Element>,
    },

    ChangeDevice { device: Device },

    TogglePreviewMode,

    /// Set live mode to `value`, or flip it
    ToggleLiveMode {
        #[serde(default)]
        value: Option<bool>,
    },

    /// Set the publish flag to `value`, or flip it
    ToggleVisibilityStatus {
        #[serde(default)]
        value: Option<bool>,
    },

    SetSiteId { site_id: String },

    /// Mark a data widget as waiting on its external fetch (`None` clears)
    SetPendingFetch {
        #[serde(default)]
        element_id: Option<String>,
    },

    Undo,

    Redo,

    /// Replace the whole working state; history restarts from one snapshot
    LoadData {
        #[serde(default)]
        elements: Option<Vec<Element>>,
        #[serde(default)]
        with_live: bool,
    },
}

impl Intent {
    /// Wire tag of the intent
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddElement { .. } => "ADD_ELEMENT",
            Intent::AddNewElement { .. } => "ADD_NEW_ELEMENT",
            Intent::UpdateElement { .. } => "UPDATE_ELEMENT",
            Intent::DeleteElement { .. } => "DELETE_ELEMENT",
            Intent::DuplicateElement { .. } => "DUPLICATE_ELEMENT",
            Intent::MoveElement { .. } => "MOVE_ELEMENT",
            Intent::ChangeSelectedElement { .. } => "CHANGE_SELECTED_ELEMENT",
            Intent::ChangeDevice { .. } => "CHANGE_DEVICE",
            Intent::TogglePreviewMode => "TOGGLE_PREVIEW_MODE",
            Intent::ToggleLiveMode { .. } => "TOGGLE_LIVE_MODE",
            Intent::ToggleVisibilityStatus { .. } => "TOGGLE_VISIBILITY_STATUS",
            Intent::SetSiteId { .. } => "SET_SITE_ID",
            Intent::SetPendingFetch { .. } => "SET_PENDING_FETCH",
            Intent::Undo => "UNDO",
            Intent::Redo => "REDO",
            Intent::LoadData { .. } => "LOAD_DATA",
        }
    }

    /// Whether an accepted intent of this kind records a history snapshot
    pub fn records_history(&self) -> bool {
        matches!(
            self,
            Intent::AddElement { .. }
                | Intent::AddNewElement { .. }
                | Intent::UpdateElement { .. }
                | Intent::DeleteElement { .. }
                | Intent::DuplicateElement { .. }
                | Intent::MoveElement { .. }
        )
    }
}
