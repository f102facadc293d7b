//! Save/load contract for page trees.
//!
//! A saved page is the JSON array of the page's top-level elements, which in
//! a well-formed document is exactly one `__body` root holding everything
//! else. Loading validates that shape and id uniqueness before handing the
//! tree to the editor.

use crate::element::{Element, ElementType};
use crate::error::{DocumentError, DocumentResult};
use std::collections::HashSet;

/// Tree holding only an empty root
pub fn root_only_tree() -> Vec<Element> {
    vec![Element::root()]
}

/// Serialize a page tree to compact JSON
pub fn serialize_tree(elements: &[Element]) -> DocumentResult<String> {
    Ok(serde_json::to_string(elements)?)
}

/// Serialize a page tree to indented JSON
pub fn serialize_tree_pretty(elements: &[Element]) -> DocumentResult<String> {
    Ok(serde_json::to_string_pretty(elements)?)
}

/// Parse and validate a saved page tree
///
/// Blank input and a JSON `null` load as the root-only tree.
pub fn deserialize_tree(source: &str) -> DocumentResult<Vec<Element>> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Ok(root_only_tree());
    }

    let elements: Option<Vec<Element>> = serde_json::from_str(trimmed)?;
    let elements = match elements {
        Some(elements) => elements,
        None => return Ok(root_only_tree()),
    };

    validate_tree(&elements)?;
    Ok(elements)
}

/// Check the structural invariants of a page tree
pub fn validate_tree(elements: &[Element]) -> DocumentResult<()> {
    let root = match elements {
        [] => return Err(DocumentError::MissingRoot),
        [root] => root,
        _ => return Err(DocumentError::UnexpectedTopLevel(elements.len())),
    };

    if root.kind != Some(ElementType::Body) {
        return Err(DocumentError::MissingRoot);
    }
    if !root.is_container() {
        return Err(DocumentError::RootNotContainer);
    }

    let mut seen = HashSet::new();
    check_unique(elements, &mut seen)
}

fn check_unique<'a>(elements: &'a [Element], seen: &mut HashSet<&'a str>) -> DocumentResult<()> {
    for element in elements {
        if !seen.insert(element.id.as_str()) {
            return Err(DocumentError::duplicate_id(element.id.as_str()));
        }
        if let Some(children) = element.children() {
            check_unique(children, seen)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_element;
    use crate::element::Content;
    use crate::id_generator::IdGenerator;

    fn sample_tree() -> Vec<Element> {
        let mut ids = IdGenerator::from_seed("ser");
        let mut root = Element::root();
        let columns = create_element(ElementType::TwoCol, &mut ids);
        let heading = create_element(ElementType::H1, &mut ids);
        let etl = create_element(ElementType::Etl, &mut ids);
        if let Some(children) = root.children_mut() {
            children.push(columns);
            children.push(heading);
            children.push(etl);
        }
        vec![root]
    }

    #[test]
    fn test_round_trip() {
        let tree = sample_tree();
        let json = serialize_tree(&tree).unwrap();
        let back = deserialize_tree(&json).unwrap();
        assert_eq!(back, tree);

        let pretty = serialize_tree_pretty(&tree).unwrap();
        assert_eq!(deserialize_tree(&pretty).unwrap(), tree);
    }

    #[test]
    fn test_blank_and_null_load_root_only() {
        assert_eq!(deserialize_tree("").unwrap(), root_only_tree());
        assert_eq!(deserialize_tree("  null ").unwrap(), root_only_tree());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(deserialize_tree("[{"), Err(DocumentError::Json(_))));
        assert!(matches!(deserialize_tree("{}"), Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_shape_validation() {
        assert!(matches!(deserialize_tree("[]"), Err(DocumentError::MissingRoot)));

        let two_roots = serialize_tree(&[Element::root(), Element::root()]).unwrap();
        assert!(matches!(
            deserialize_tree(&two_roots),
            Err(DocumentError::UnexpectedTopLevel(2))
        ));

        let mut leaf_root = Element::root();
        leaf_root.content = Content::Fields(Default::default());
        let json = serialize_tree(&[leaf_root]).unwrap();
        assert!(matches!(deserialize_tree(&json), Err(DocumentError::RootNotContainer)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut ids = IdGenerator::from_seed("dup");
        let paragraph = create_element(ElementType::Paragraph, &mut ids);
        let mut root = Element::root();
        if let Some(children) = root.children_mut() {
            children.push(paragraph.clone());
            children.push(paragraph);
        }

        let json = serialize_tree(&[root]).unwrap();
        match deserialize_tree(&json) {
            Err(DocumentError::DuplicateId(id)) => assert_eq!(id, "dup-1"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }
}
