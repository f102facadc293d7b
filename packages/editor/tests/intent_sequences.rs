//! Intent sequences through the reducer
//!
//! This tests:
//! - Tree invariants after mixed edit chains
//! - Undo/redo as an exact inverse of structural intents
//! - History truncation and boundaries
//! - Save/load round trips of edited trees

use sitebuilder_editor::tree::{
    collect_ids, find_by_id, find_parent_and_siblings, has_unique_ids, is_descendant_of, move_element,
};
use sitebuilder_editor::{EditorState, Intent};
use sitebuilder_model::{
    create_element, deserialize_tree, root_only_tree, serialize_tree, Content, Element, ElementType,
    IdGenerator, ROOT_ID,
};

fn state() -> EditorState {
    EditorState::new("site").with_ids(IdGenerator::from_seed("seq"))
}

fn add_new(state: &mut EditorState, container_id: &str, kind: ElementType) -> String {
    state.dispatch(Intent::AddNewElement {
        container_id: container_id.to_string(),
        element_type: kind,
    });
    let parent = find_by_id(state.elements(), container_id).unwrap();
    parent.children().unwrap().last().unwrap().id.clone()
}

fn children_of(state: &EditorState, id: &str) -> Vec<String> {
    find_by_id(state.elements(), id)
        .and_then(Element::children)
        .map(|children| children.iter().map(|c| c.id.clone()).collect())
        .unwrap_or_default()
}

/// Same subtree with every id blanked
fn without_ids(element: &Element) -> Element {
    let mut element = element.clone();
    element.id.clear();
    if let Content::Children(children) = &element.content {
        element.content = Content::Children(children.iter().map(without_ids).collect());
    }
    element
}

#[test]
fn test_insert_select_delete_scenario() {
    let mut state = state();

    let paragraph = add_new(&mut state, ROOT_ID, ElementType::Paragraph);
    let selected = find_by_id(state.elements(), &paragraph).cloned();
    state.dispatch(Intent::ChangeSelectedElement {
        element_details: selected,
    });
    assert_eq!(state.selected_element().id, paragraph);

    state.dispatch(Intent::DeleteElement {
        element_id: paragraph.clone(),
    });

    assert_eq!(state.elements(), root_only_tree().as_slice());
    assert!(state.selected_element().is_empty_sentinel());
    assert_eq!(state.history().len(), 3);
    assert_eq!(state.history().current_index(), 2);
}

#[test]
fn test_move_into_own_descendant_is_rejected() {
    let mut state = state();
    let a = add_new(&mut state, ROOT_ID, ElementType::Container);
    let b = add_new(&mut state, &a, ElementType::Container);
    let before = state.elements().to_vec();
    let history_len = state.history().len();

    state.dispatch(Intent::MoveElement {
        element_id: a.clone(),
        target_container_id: b.clone(),
        insert_index: None,
    });

    assert_eq!(state.elements(), before.as_slice());
    assert_eq!(state.history().len(), history_len);
    assert!(is_descendant_of(state.elements(), &b, &a));
    assert!(!is_descendant_of(state.elements(), &a, &b));
}

#[test]
fn test_duplicate_nested_container_scenario() {
    let mut state = state();
    let col = add_new(&mut state, ROOT_ID, ElementType::Container);
    add_new(&mut state, &col, ElementType::Paragraph);
    add_new(&mut state, &col, ElementType::Button);
    let original_ids = collect_ids(state.elements());

    state.dispatch(Intent::DuplicateElement {
        element_id: col.clone(),
    });

    let root_children = children_of(&state, ROOT_ID);
    assert_eq!(root_children.len(), 2);
    assert_eq!(root_children[0], col);

    let copy = find_by_id(state.elements(), &root_children[1]).unwrap();
    let copy_ids = collect_ids(std::slice::from_ref(copy));
    assert_eq!(copy_ids.len(), 3);
    assert!(copy_ids.iter().all(|id| !original_ids.contains(id)));

    let original = find_by_id(state.elements(), &col).unwrap();
    assert_eq!(without_ids(original), without_ids(copy));
    assert!(has_unique_ids(state.elements()));
}

#[test]
fn test_ids_stay_unique_through_mixed_edits() {
    let mut state = state();
    let section = add_new(&mut state, ROOT_ID, ElementType::Section);
    let columns = add_new(&mut state, &section, ElementType::TwoCol);
    let heading = add_new(&mut state, ROOT_ID, ElementType::H1);

    state.dispatch(Intent::DuplicateElement {
        element_id: columns.clone(),
    });
    state.dispatch(Intent::MoveElement {
        element_id: heading.clone(),
        target_container_id: columns.clone(),
        insert_index: Some(0),
    });
    state.dispatch(Intent::DuplicateElement {
        element_id: section.clone(),
    });
    state.dispatch(Intent::DeleteElement {
        element_id: columns.clone(),
    });
    // Re-adding an element whose id is still in the tree is ignored
    let existing = find_by_id(state.elements(), &section).cloned().unwrap();
    state.dispatch(Intent::AddElement {
        container_id: ROOT_ID.to_string(),
        element_details: existing,
    });

    assert!(has_unique_ids(state.elements()));
    for id in collect_ids(state.elements()) {
        assert!(!is_descendant_of(state.elements(), &id, &id));
    }
}

#[test]
fn test_move_to_current_position_is_identity() {
    let mut state = state();
    let first = add_new(&mut state, ROOT_ID, ElementType::Paragraph);
    add_new(&mut state, ROOT_ID, ElementType::Image);
    let last = add_new(&mut state, ROOT_ID, ElementType::Button);

    let elements = state.elements();
    let position = find_parent_and_siblings(elements, &first).unwrap().index;
    assert_eq!(move_element(elements, &first, ROOT_ID, Some(position)), elements);
    assert_eq!(move_element(elements, &last, ROOT_ID, None), elements);
}

#[test]
fn test_undo_redo_inverts_each_structural_intent() {
    let mut base = state();
    let container = add_new(&mut base, ROOT_ID, ElementType::Container);
    let text = add_new(&mut base, ROOT_ID, ElementType::Paragraph);

    let mut renamed = find_by_id(base.elements(), &text).cloned().unwrap();
    renamed.name = "Lead".to_string();

    let intents = vec![
        Intent::AddNewElement {
            container_id: container.clone(),
            element_type: ElementType::Video,
        },
        Intent::UpdateElement {
            element_details: renamed,
        },
        Intent::DeleteElement {
            element_id: container.clone(),
        },
        Intent::DuplicateElement {
            element_id: container.clone(),
        },
        Intent::MoveElement {
            element_id: text.clone(),
            target_container_id: container.clone(),
            insert_index: None,
        },
    ];

    for intent in intents {
        let name = intent.name();
        let mut applied = base.clone();
        applied.dispatch(intent);
        let after = applied.editor().clone();

        applied.dispatch(Intent::Undo);
        assert_eq!(applied.editor(), base.editor(), "undo of {name}");

        applied.dispatch(Intent::Redo);
        assert_eq!(applied.editor(), &after, "redo of {name}");
    }
}

#[test]
fn test_new_edit_after_undo_discards_redo_branch() {
    let mut state = state();
    add_new(&mut state, ROOT_ID, ElementType::Paragraph);
    add_new(&mut state, ROOT_ID, ElementType::Paragraph);

    state.dispatch(Intent::Undo);
    state.dispatch(Intent::Undo);
    let branch = add_new(&mut state, ROOT_ID, ElementType::Button);
    let after_branch = state.editor().clone();

    assert!(!state.can_redo());
    state.dispatch(Intent::Redo);
    assert_eq!(state.editor(), &after_branch);
    assert_eq!(children_of(&state, ROOT_ID), vec![branch]);
}

#[test]
fn test_history_limit_keeps_most_recent_edits() {
    let config = sitebuilder_editor::EditorConfig {
        history_limit: 3,
        ..Default::default()
    };
    let mut state = EditorState::with_config("site", &config).with_ids(IdGenerator::from_seed("h"));
    for _ in 0..5 {
        add_new(&mut state, ROOT_ID, ElementType::Paragraph);
    }

    assert_eq!(state.history().len(), 3);
    state.dispatch(Intent::Undo);
    state.dispatch(Intent::Undo);
    state.dispatch(Intent::Undo);
    assert_eq!(children_of(&state, ROOT_ID).len(), 3);
}

#[test]
fn test_edited_tree_round_trips_through_json() {
    let mut state = state();
    let form = add_new(&mut state, ROOT_ID, ElementType::Form);
    add_new(&mut state, &form, ElementType::Input);
    add_new(&mut state, ROOT_ID, ElementType::Layout3);
    add_new(&mut state, ROOT_ID, ElementType::Etl);

    let saved = serialize_tree(state.elements()).unwrap();
    let loaded = deserialize_tree(&saved).unwrap();
    assert_eq!(loaded, state.elements());

    let mut reopened = EditorState::new("site");
    reopened.dispatch(Intent::LoadData {
        elements: Some(loaded),
        with_live: false,
    });
    assert_eq!(reopened.elements(), state.elements());
    assert_eq!(reopened.history().len(), 1);
}

#[test]
fn test_stale_ids_degrade_to_unchanged_trees() {
    let mut state = state();
    let stale = create_element(ElementType::Paragraph, &mut IdGenerator::from_seed("gone"));

    state.dispatch(Intent::UpdateElement {
        element_details: stale.clone(),
    });
    state.dispatch(Intent::DeleteElement {
        element_id: stale.id.clone(),
    });
    state.dispatch(Intent::DuplicateElement {
        element_id: stale.id.clone(),
    });
    state.dispatch(Intent::DeleteElement {
        element_id: ROOT_ID.to_string(),
    });

    assert_eq!(state.elements(), root_only_tree().as_slice());
}
