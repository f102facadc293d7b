//! # Tree Operations
//!
//! Pure functions over a page tree. Every operation takes the current
//! top-level element sequence and returns a new one; the input is never
//! mutated, so history snapshots stay independent of each other.
//!
//! ## No-op policy
//!
//! Structural edits come from user gestures (a drop, a menu click). When a
//! precondition fails (unknown id, leaf target, self-drop, cycle, root as
//! subject, id collision) the public operations return the input unchanged.
//! The `try_*` variants report the same outcome as `None` for callers that
//! need to tell the two apart.

use sitebuilder_common::{IdCollector, VisitorMut, walk_element_mut};
use sitebuilder_model::{Content, Element, IdGenerator, ROOT_ID};
use std::collections::HashSet;
use std::slice;
use tracing::debug;

/// Where a node sits in the tree
#[derive(Debug, Clone, Copy)]
pub struct ParentAndSiblings<'a> {
    /// `None` for top-level nodes
    pub parent: Option<&'a Element>,
    pub siblings: &'a [Element],
    pub index: usize,
}

/// Depth-first lookup
pub fn find_by_id<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    for element in elements {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = element.children().and_then(|children| find_by_id(children, id)) {
            return Some(found);
        }
    }
    None
}

/// True iff `candidate_id` is somewhere below `ancestor_id` (never the ancestor itself)
pub fn is_descendant_of(elements: &[Element], candidate_id: &str, ancestor_id: &str) -> bool {
    find_by_id(elements, ancestor_id)
        .and_then(Element::children)
        .map(|children| find_by_id(children, candidate_id).is_some())
        .unwrap_or(false)
}

/// Parent, sibling list and position of a node
pub fn find_parent_and_siblings<'a>(elements: &'a [Element], id: &str) -> Option<ParentAndSiblings<'a>> {
    locate(elements, None, id)
}

fn locate<'a>(
    elements: &'a [Element],
    parent: Option<&'a Element>,
    id: &str,
) -> Option<ParentAndSiblings<'a>> {
    if let Some(index) = elements.iter().position(|e| e.id == id) {
        return Some(ParentAndSiblings {
            parent,
            siblings: elements,
            index,
        });
    }

    elements.iter().find_map(|element| {
        element
            .children()
            .and_then(|children| locate(children, Some(element), id))
    })
}

/// Every id in depth-first preorder
pub fn collect_ids(elements: &[Element]) -> Vec<String> {
    IdCollector::collect(elements)
}

pub fn has_unique_ids(elements: &[Element]) -> bool {
    let ids = collect_ids(elements);
    let unique: HashSet<&str> = ids.iter().map(String::as_str).collect();
    unique.len() == ids.len()
}

/// Append `element` to the children of `container_id`
pub fn insert(elements: &[Element], container_id: &str, element: Element) -> Vec<Element> {
    try_insert(elements, container_id, element).unwrap_or_else(|| elements.to_vec())
}

pub fn try_insert(elements: &[Element], container_id: &str, element: Element) -> Option<Vec<Element>> {
    let incoming = collect_ids(slice::from_ref(&element));
    let existing: HashSet<String> = collect_ids(elements).into_iter().collect();
    if !ids_fit(&incoming, &existing) {
        debug!(element_id = %element.id, "insert rejected: id collision");
        return None;
    }

    let result = insert_at(elements, container_id, element, None);
    if result.is_none() {
        debug!(container_id, "insert rejected: container not found or not a container");
    }
    result
}

/// Replace the node with `element.id` by `element` (full replace, not a patch)
pub fn update(elements: &[Element], element: Element) -> Vec<Element> {
    try_update(elements, element).unwrap_or_else(|| elements.to_vec())
}

pub fn try_update(elements: &[Element], element: Element) -> Option<Vec<Element>> {
    let current = match find_by_id(elements, &element.id) {
        Some(current) => current,
        None => {
            debug!(element_id = %element.id, "update rejected: element not found");
            return None;
        }
    };

    // The root stays a body container, and nothing else may become one
    if element.id == ROOT_ID && !(element.is_root() && element.is_container()) {
        debug!("update rejected: root must remain a body container");
        return None;
    }
    if element.id != ROOT_ID && element.is_root() {
        debug!(element_id = %element.id, "update rejected: only the root may be a body");
        return None;
    }

    // Ids that stay in the tree once the old subtree is gone
    let replaced: HashSet<String> = collect_ids(slice::from_ref(current)).into_iter().collect();
    let remaining: HashSet<String> = collect_ids(elements)
        .into_iter()
        .filter(|id| !replaced.contains(id))
        .collect();
    let incoming = collect_ids(slice::from_ref(&element));
    if !ids_fit(&incoming, &remaining) {
        debug!(element_id = %element.id, "update rejected: id collision");
        return None;
    }

    let target = element.id.clone();
    let mut replacement = Some(element);
    splice(elements, &target, &mut |_| replacement.take().into_iter().collect())
}

/// Remove a node and its whole subtree
pub fn delete(elements: &[Element], element_id: &str) -> Vec<Element> {
    try_delete(elements, element_id).unwrap_or_else(|| elements.to_vec())
}

pub fn try_delete(elements: &[Element], element_id: &str) -> Option<Vec<Element>> {
    if element_id == ROOT_ID {
        debug!("delete rejected: root element");
        return None;
    }
    let result = splice(elements, element_id, &mut |_| Vec::new());
    if result.is_none() {
        debug!(element_id, "delete rejected: element not found");
    }
    result
}

/// Clone a subtree with fresh ids and insert it right after the original
pub fn duplicate(elements: &[Element], element_id: &str, ids: &mut IdGenerator) -> Vec<Element> {
    try_duplicate(elements, element_id, ids).unwrap_or_else(|| elements.to_vec())
}

pub fn try_duplicate(elements: &[Element], element_id: &str, ids: &mut IdGenerator) -> Option<Vec<Element>> {
    if element_id == ROOT_ID {
        debug!("duplicate rejected: root element");
        return None;
    }

    // Top-level nodes have no parent container to duplicate into
    let located = find_parent_and_siblings(elements, element_id)?;
    if located.parent.is_none() {
        debug!(element_id, "duplicate rejected: top-level element");
        return None;
    }

    splice(elements, element_id, &mut |original| {
        let mut clone = original.clone();
        FreshIds { ids: &mut *ids }.visit_element_mut(&mut clone);
        vec![original.clone(), clone]
    })
}

/// Re-parent `element_id` under `target_container_id` at `insert_index` (append when `None`)
pub fn move_element(
    elements: &[Element],
    element_id: &str,
    target_container_id: &str,
    insert_index: Option<usize>,
) -> Vec<Element> {
    try_move(elements, element_id, target_container_id, insert_index).unwrap_or_else(|| elements.to_vec())
}

pub fn try_move(
    elements: &[Element],
    element_id: &str,
    target_container_id: &str,
    insert_index: Option<usize>,
) -> Option<Vec<Element>> {
    if element_id == target_container_id {
        debug!(element_id, "move rejected: dropped onto itself");
        return None;
    }
    if element_id == ROOT_ID {
        debug!("move rejected: root element");
        return None;
    }
    if is_descendant_of(elements, target_container_id, element_id) {
        debug!(element_id, target_container_id, "move rejected: target is a descendant");
        return None;
    }
    if !find_by_id(elements, target_container_id).is_some_and(Element::is_container) {
        debug!(target_container_id, "move rejected: target is not a container");
        return None;
    }

    let mut detached = None;
    let without = splice(elements, element_id, &mut |original| {
        detached = Some(original.clone());
        Vec::new()
    });
    let (without, detached) = match (without, detached) {
        (Some(without), Some(detached)) => (without, detached),
        _ => {
            debug!(element_id, "move rejected: element not found");
            return None;
        }
    };

    insert_at(&without, target_container_id, detached, insert_index)
}

/// Rebuild `elements` with node `target_id` replaced by whatever `f` returns
fn splice<F>(elements: &[Element], target_id: &str, f: &mut F) -> Option<Vec<Element>>
where
    F: FnMut(&Element) -> Vec<Element>,
{
    for (index, element) in elements.iter().enumerate() {
        if element.id == target_id {
            return Some(replace_at(elements, index, f(element)));
        }
        if let Some(children) = element.children() {
            if let Some(children) = splice(children, target_id, f) {
                return Some(replace_at(elements, index, vec![with_children(element, children)]));
            }
        }
    }
    None
}

fn insert_at(
    elements: &[Element],
    container_id: &str,
    element: Element,
    index: Option<usize>,
) -> Option<Vec<Element>> {
    let mut element = Some(element);
    let mut inserted = false;
    let result = splice(elements, container_id, &mut |container| match (container.children(), element.take()) {
        (Some(children), Some(element)) => {
            let mut children = children.to_vec();
            let at = index.unwrap_or(children.len()).min(children.len());
            children.insert(at, element);
            inserted = true;
            vec![with_children(container, children)]
        }
        _ => vec![container.clone()],
    });
    result.filter(|_| inserted)
}

fn replace_at(elements: &[Element], index: usize, replacement: Vec<Element>) -> Vec<Element> {
    let mut out = Vec::with_capacity(elements.len() + replacement.len());
    out.extend_from_slice(&elements[..index]);
    out.extend(replacement);
    out.extend_from_slice(&elements[index + 1..]);
    out
}

fn with_children(element: &Element, children: Vec<Element>) -> Element {
    Element {
        id: element.id.clone(),
        styles: element.styles.clone(),
        name: element.name.clone(),
        kind: element.kind,
        category: element.category,
        content: Content::Children(children),
        extra: element.extra.clone(),
    }
}

/// `incoming` has no internal duplicates and none of its ids are taken
fn ids_fit(incoming: &[String], taken: &HashSet<String>) -> bool {
    let mut seen = HashSet::new();
    incoming.iter().all(|id| !taken.contains(id) && seen.insert(id.as_str()))
}

struct FreshIds<'a> {
    ids: &'a mut IdGenerator,
}

impl VisitorMut for FreshIds<'_> {
    fn visit_element_mut(&mut self, element: &mut Element) {
        element.id = self.ids.new_id();
        walk_element_mut(self, element);
    }
}
