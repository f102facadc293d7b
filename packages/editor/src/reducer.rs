//! # Document State Machine
//!
//! Applies [`Intent`]s to the editor state. The editor being worked on is
//! always the history snapshot under the cursor:
//!
//! - tree intents build a new snapshot from the current one and push it
//! - view intents (selection, device, preview/live/visibility, site id,
//!   pending fetch) edit the current snapshot in place and never grow history
//! - undo/redo move the cursor, restoring tree and selection while the view
//!   flags stay as they were
//!
//! Reduction is total: intents that reference missing ids degrade to
//! unchanged trees, and nothing here returns an error.

use crate::editor::{Editor, EditorConfig, RenderView};
use crate::history::History;
use crate::intents::Intent;
use crate::tree;
use sitebuilder_model::{
    create_element, root_only_tree, validate_tree, Element, ElementType, IdGenerator,
};
use tracing::{debug, warn};

/// Reducer state: the history of editor snapshots plus the id source for new nodes
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    history: History,
    ids: IdGenerator,
}

impl EditorState {
    pub fn new(site_id: &str) -> Self {
        Self::with_config(site_id, &EditorConfig::default())
    }

    pub fn with_config(site_id: &str, config: &EditorConfig) -> Self {
        Self {
            history: History::with_max_levels(Editor::new(site_id), config.history_limit),
            ids: IdGenerator::new(site_id),
        }
    }

    /// Replace the id generator (deterministic ids in tests and replays)
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn editor(&self) -> &Editor {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Read-only snapshot for rendering
    pub fn view(&self) -> RenderView<'_> {
        RenderView::from(self.editor())
    }

    pub fn elements(&self) -> &[Element] {
        &self.editor().elements
    }

    pub fn selected_element(&self) -> &Element {
        &self.editor().selected_element
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Allocate an id from this state's generator
    pub fn next_id(&mut self) -> String {
        self.ids.new_id()
    }

    /// Build a catalog element with ids from this state's generator
    pub fn create_element(&mut self, kind: ElementType) -> Element {
        create_element(kind, &mut self.ids)
    }

    /// Apply one intent
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(intent = intent.name(), "dispatch");

        match intent {
            Intent::AddElement {
                container_id,
                element_details,
            } => {
                let elements = tree::insert(self.elements(), &container_id, element_details);
                let selected = self.selected_element().clone();
                self.commit(elements, selected);
            }

            Intent::AddNewElement {
                container_id,
                element_type,
            } => self.add_new_element(&container_id, element_type),

            Intent::UpdateElement { element_details } => {
                // Only a refresh of the selected node keeps a selection
                let keeps_selection = self.selected_element().id == element_details.id;
                let id = element_details.id.clone();
                let elements = tree::try_update(self.elements(), element_details)
                    .unwrap_or_else(|| self.elements().to_vec());
                let selected = if keeps_selection {
                    tree::find_by_id(&elements, &id)
                        .cloned()
                        .unwrap_or_else(Element::empty)
                } else {
                    Element::empty()
                };
                self.commit(elements, selected);
            }

            Intent::DeleteElement { element_id } => {
                let elements = tree::delete(self.elements(), &element_id);
                self.commit(elements, Element::empty());
            }

            Intent::DuplicateElement { element_id } => {
                let current = self.history.current();
                let elements = tree::duplicate(&current.elements, &element_id, &mut self.ids);
                let selected = current.selected_element.clone();
                self.commit(elements, selected);
            }

            Intent::MoveElement {
                element_id,
                target_container_id,
                insert_index,
            } => self.move_element(&element_id, &target_container_id, insert_index),

            Intent::ChangeSelectedElement { element_details } => {
                self.history.current_mut().selected_element =
                    element_details.unwrap_or_else(Element::empty);
            }

            Intent::ChangeDevice { device } => {
                self.history.current_mut().device = device;
            }

            Intent::TogglePreviewMode => {
                let editor = self.history.current_mut();
                editor.preview_mode = !editor.preview_mode;
            }

            Intent::ToggleLiveMode { value } => {
                let editor = self.history.current_mut();
                editor.live_mode = value.unwrap_or(!editor.live_mode);
            }

            Intent::ToggleVisibilityStatus { value } => {
                let editor = self.history.current_mut();
                editor.visible = value.unwrap_or(!editor.visible);
            }

            Intent::SetSiteId { site_id } => {
                self.history.current_mut().site_id = site_id;
            }

            Intent::SetPendingFetch { element_id } => {
                self.history.current_mut().pending_fetch = element_id;
            }

            Intent::Undo => {
                let view = self.editor().view_state();
                if self.history.undo() {
                    self.history.current_mut().adopt_view_state(view);
                } else {
                    debug!("undo ignored: at oldest snapshot");
                }
            }

            Intent::Redo => {
                let view = self.editor().view_state();
                if self.history.redo() {
                    self.history.current_mut().adopt_view_state(view);
                } else {
                    debug!("redo ignored: at newest snapshot");
                }
            }

            Intent::LoadData {
                elements,
                with_live,
            } => self.load(elements, with_live),
        }
    }

    fn add_new_element(&mut self, container_id: &str, element_type: ElementType) {
        let element = create_element(element_type, &mut self.ids);
        let current = self.history.current();

        match tree::try_insert(&current.elements, container_id, element.clone()) {
            // Data widgets open selected, with their first fetch queued
            Some(elements) if element_type == ElementType::Etl => {
                let pending = element.id.clone();
                let mut next = current.with_tree(elements, element);
                next.pending_fetch = Some(pending);
                self.history.push(next);
            }
            Some(elements) => {
                let selected = current.selected_element.clone();
                self.commit(elements, selected);
            }
            None => {
                let unchanged = current.elements.clone();
                let selected = current.selected_element.clone();
                self.commit(unchanged, selected);
            }
        }
    }

    fn move_element(&mut self, element_id: &str, target_container_id: &str, insert_index: Option<usize>) {
        let current = self.history.current();
        if element_id == target_container_id {
            debug!(element_id, "move ignored: dropped onto itself");
            return;
        }
        if tree::is_descendant_of(&current.elements, target_container_id, element_id) {
            debug!(element_id, target_container_id, "move ignored: target is inside the moved element");
            return;
        }

        let elements = tree::move_element(&current.elements, element_id, target_container_id, insert_index);
        let selected = if current.selected_element.id == element_id {
            tree::find_by_id(&elements, element_id)
                .cloned()
                .unwrap_or_else(|| current.selected_element.clone())
        } else {
            current.selected_element.clone()
        };
        self.commit(elements, selected);
    }

    fn load(&mut self, elements: Option<Vec<Element>>, with_live: bool) {
        let elements = match elements {
            Some(elements) => match validate_tree(&elements) {
                Ok(()) => elements,
                Err(err) => {
                    warn!(error = %err, "loaded tree is malformed, starting from an empty page");
                    root_only_tree()
                }
            },
            None => root_only_tree(),
        };

        let current = self.editor();
        let editor = Editor {
            site_id: current.site_id.clone(),
            page_id: current.page_id.clone(),
            live_mode: with_live,
            elements,
            ..Editor::default()
        };
        self.history.reset(editor);
    }

    /// Start the working state over on another page
    pub(crate) fn open_page(&mut self, page_id: &str, elements: Vec<Element>) {
        self.history.current_mut().page_id = Some(page_id.to_string());
        self.load(Some(elements), false);
    }

    fn commit(&mut self, elements: Vec<Element>, selected_element: Element) {
        let next = self.editor().with_tree(elements, selected_element);
        self.history.push(next);
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new("")
    }
}

/// Functional form of [`EditorState::dispatch`]
pub fn reduce(mut state: EditorState, intent: Intent) -> EditorState {
    state.dispatch(intent);
    state
}
