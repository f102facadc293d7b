use sitebuilder_model::{Content, Element, Fields};

/// Visitor pattern for traversing element trees immutably
///
/// This trait provides default implementations that walk the entire tree
/// depth-first, parents before children. Override specific visit_* methods
/// to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, elements: &[Element]) {
        walk_tree(self, elements);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_fields(&mut self, _fields: &Fields) {
        // Leaf content, nothing to walk
    }
}

/// Mutable visitor pattern for transforming element trees
pub trait VisitorMut: Sized {
    fn visit_tree_mut(&mut self, elements: &mut [Element]) {
        walk_tree_mut(self, elements);
    }

    fn visit_element_mut(&mut self, element: &mut Element) {
        walk_element_mut(self, element);
    }

    fn visit_fields_mut(&mut self, _fields: &mut Fields) {
        // Leaf content, nothing to walk
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, elements: &[Element]) {
    for element in elements {
        visitor.visit_element(element);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    match &element.content {
        Content::Children(children) => visitor.visit_tree(children),
        Content::Fields(fields) => visitor.visit_fields(fields),
    }
}

pub fn walk_tree_mut<V: VisitorMut>(visitor: &mut V, elements: &mut [Element]) {
    for element in elements {
        visitor.visit_element_mut(element);
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut Element) {
    match &mut element.content {
        Content::Children(children) => visitor.visit_tree_mut(children),
        Content::Fields(fields) => visitor.visit_fields_mut(fields),
    }
}

/// Collects every id in visiting order
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: Vec<String>,
}

impl IdCollector {
    pub fn collect(elements: &[Element]) -> Vec<String> {
        let mut collector = Self::default();
        collector.visit_tree(elements);
        collector.ids
    }
}

impl Visitor for IdCollector {
    fn visit_element(&mut self, element: &Element) {
        self.ids.push(element.id.clone());
        walk_element(self, element);
    }
}

/// Shape summary of a tree
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub elements: usize,
    pub containers: usize,
    pub leaves: usize,
    pub max_depth: usize,
    depth: usize,
}

impl TreeStats {
    pub fn of(elements: &[Element]) -> Self {
        let mut stats = Self::default();
        stats.visit_tree(elements);
        stats
    }
}

impl Visitor for TreeStats {
    fn visit_element(&mut self, element: &Element) {
        self.elements += 1;
        if element.is_container() {
            self.containers += 1;
        } else {
            self.leaves += 1;
        }

        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        walk_element(self, element);
        self.depth -= 1;
    }
}
