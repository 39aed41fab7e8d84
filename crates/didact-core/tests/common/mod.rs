//! Shared helpers for the render integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::time::Duration;

use didact_core::{Element, ElementKind};
use didact_dom::{DomTree, HostDocument, HostError, NodeId, Value};

/// A `DomTree` that records every host call the renderer makes.
#[derive(Debug, Default)]
pub struct RecordingDoc {
    pub tree: DomTree,
    /// Nodes in creation order.
    pub created: Vec<NodeId>,
    /// `(parent, child)` pairs in append order.
    pub appends: Vec<(NodeId, NodeId)>,
    /// `(node, name, value)` assignments in order.
    pub assignments: Vec<(NodeId, String, Value)>,
    /// The next assignment of this property name fails once.
    pub fail_next_property: Option<String>,
}

impl RecordingDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `<div id="root">` under the document and return it.
    pub fn container(&mut self) -> NodeId {
        let root = self.tree.create_element("div").unwrap();
        self.tree.set_property(root, "id", &Value::from("root")).unwrap();
        self.tree.append_child(NodeId::ROOT, root).unwrap();
        root
    }

    /// A short label per node: the tag name, or `#text` for text nodes.
    pub fn label(&self, id: NodeId) -> String {
        match self.tree.as_element(id) {
            Some(data) => data.tag_name.clone(),
            None => "#text".to_string(),
        }
    }
}

impl HostDocument for RecordingDoc {
    type Node = NodeId;
    type Error = HostError;

    fn create_text_node(&mut self, data: &str) -> Result<NodeId, HostError> {
        let id = self.tree.create_text_node(data)?;
        self.created.push(id);
        Ok(id)
    }

    fn create_element(&mut self, kind: &str) -> Result<NodeId, HostError> {
        let id = self.tree.create_element(kind)?;
        self.created.push(id);
        Ok(id)
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: &Value) -> Result<(), HostError> {
        if self.fail_next_property.as_deref() == Some(name) {
            self.fail_next_property = None;
            return Err(HostError::NotFound(node));
        }
        self.tree.set_property(node, name, value)?;
        self.assignments.push((node, name.to_string(), value.clone()));
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        self.tree.append_child(parent, child)?;
        self.appends.push((parent, child));
        Ok(())
    }
}

/// Element labels in pre-order, matching [`RecordingDoc::label`].
pub fn preorder_labels(element: &Element) -> Vec<String> {
    let mut labels = Vec::new();
    collect_labels(element, &mut labels);
    labels
}

fn collect_labels(element: &Element, labels: &mut Vec<String>) {
    labels.push(match element.kind() {
        ElementKind::Text => "#text".to_string(),
        ElementKind::Tag(tag) => tag.to_ascii_lowercase(),
    });
    for child in element.children() {
        collect_labels(child, labels);
    }
}

/// A deadline granting time for exactly `units` checks, then none.
pub fn unit_budget(units: usize) -> impl Fn() -> Duration {
    let checks = Cell::new(0_usize);
    move || {
        checks.set(checks.get() + 1);
        if checks.get() <= units {
            Duration::from_secs(1)
        } else {
            Duration::ZERO
        }
    }
}
