//! # Undo/Redo History
//!
//! Linear history of whole-editor snapshots with a cursor.
//!
//! ## Design
//!
//! - The snapshot under the cursor is always the live editor state
//! - Recording a new snapshot drops every snapshot after the cursor
//! - Undo/redo only move the cursor
//! - An optional level limit drops the oldest snapshots first
//!
//! ## Example
//!
//! ```rust
//! use sitebuilder_editor::{Editor, History};
//!
//! let mut history = History::new(Editor::default());
//! let mut next = history.current().clone();
//! next.visible = true;
//! history.push(next);
//!
//! assert!(history.undo());
//! assert!(!history.current().visible);
//! assert!(history.redo());
//! assert!(history.current().visible);
//! ```

use crate::editor::Editor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    history: Vec<Editor>,
    current_index: usize,

    /// Maximum number of snapshots (0 = unlimited)
    #[serde(skip)]
    max_levels: usize,
}

impl History {
    /// Start a history holding a single snapshot
    pub fn new(initial: Editor) -> Self {
        Self::with_max_levels(initial, 0)
    }

    pub fn with_max_levels(initial: Editor, max_levels: usize) -> Self {
        Self {
            history: vec![initial],
            current_index: 0,
            max_levels,
        }
    }

    /// Record a new snapshot after the cursor, discarding any redo branch
    pub fn push(&mut self, snapshot: Editor) {
        self.history.truncate(self.current_index + 1);
        self.history.push(snapshot);
        self.current_index = self.history.len() - 1;

        if self.max_levels > 0 && self.history.len() > self.max_levels {
            let excess = self.history.len() - self.max_levels;
            self.history.drain(..excess);
            self.current_index -= excess;
        }
    }

    /// Step the cursor back; false at the first snapshot
    pub fn undo(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Step the cursor forward; false at the last snapshot
    pub fn redo(&mut self) -> bool {
        if self.current_index + 1 >= self.history.len() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Drop everything and start over from `initial`
    pub fn reset(&mut self, initial: Editor) {
        self.history.clear();
        self.history.push(initial);
        self.current_index = 0;
    }

    pub fn current(&self) -> &Editor {
        &self.history[self.current_index]
    }

    /// In-place edit of the snapshot under the cursor (view state changes)
    pub(crate) fn current_mut(&mut self) -> &mut Editor {
        &mut self.history[self.current_index]
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.history.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn snapshots(&self) -> &[Editor] {
        &self.history
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Editor::default())
    }
}
