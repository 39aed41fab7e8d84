//! Host document boundary for the Didact renderer.
//!
//! This crate provides:
//! - [`Value`] - the primitive values element properties carry
//! - [`HostDocument`] - the node creation / assignment / insertion interface
//!   the renderer drives
//! - [`DomTree`] - an arena-based in-memory document implementing it,
//!   following the [DOM Living Standard](https://dom.spec.whatwg.org/)
//! - [`serialize`] - debug listings, HTML and JSON snapshots of a tree
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.

mod host;
pub mod serialize;
mod value;

use std::collections::BTreeMap;

use didact_common::warning::warn_once;
use thiserror::Error;

pub use host::HostDocument;
pub use value::Value;

/// Map of property names to values for an element.
pub type PropertyMap = BTreeMap<String, Value>;

/// A type-safe index into the DOM tree.
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
}

/// Element-specific data.
///
/// Rendered elements receive their properties as direct field assignments
/// rather than parsed attributes, so values keep their primitive type.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// Fields assigned through [`HostDocument::set_property`].
    pub properties: PropertyMap,
}

impl ElementData {
    /// Returns the element's id as a string if one was assigned.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.properties
            .get("id")
            .filter(|v| !v.is_absent())
            .map(ToString::to_string)
    }
}

/// Errors raised by [`DomTree`] when used as a [`HostDocument`].
///
/// Named after the `DOMException` the equivalent browser call would throw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    /// "If localName does not match the Name production, throw an
    /// `InvalidCharacterError` `DOMException`."
    #[error("InvalidCharacterError: {0:?} is not a valid element name")]
    InvalidCharacter(String),

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    #[error("HierarchyRequestError: cannot append {child:?} to {parent:?}")]
    HierarchyRequest {
        /// Node that would have received the child.
        parent: NodeId,
        /// Node that would have been appended.
        child: NodeId,
    },

    /// [§ 4.2.3](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    #[error("NotFoundError: no node {0:?} in this document")]
    NotFound(NodeId),
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by NodeId
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by NodeId.
    /// The Document node is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree, detached nodes included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    /// Allocate a detached element with no properties.
    pub fn alloc_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData {
            tag_name: tag_name.to_string(),
            properties: PropertyMap::new(),
        }))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, updating all
    /// relationships. A child that already has a parent is moved.
    ///
    /// # Errors
    ///
    /// [§ 4.2.3 ensure pre-insertion validity](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity):
    /// `NotFound` if either id is unknown; `HierarchyRequest` if `parent` is a
    /// text node, `child` is the document, or `child` is an inclusive ancestor
    /// of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        let parent_node = self.get(parent).ok_or(HostError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(HostError::NotFound(child))?;

        // STEP 1: "If parent is not a Document, DocumentFragment, or Element
        //          node, then throw a HierarchyRequestError."
        // STEP 2: "If node is a host-including inclusive ancestor of parent,
        //          then throw a HierarchyRequestError."
        if matches!(parent_node.node_type, NodeType::Text(_))
            || matches!(child_node.node_type, NodeType::Document)
            || child == parent
            || self.is_descendant_of(parent, child)
        {
            return Err(HostError::HierarchyRequest { parent, child });
        }

        if self.nodes[child.0].parent.is_some() {
            self.detach(child);
        }

        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
        Ok(())
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Unlinks `child` from its parent and siblings.
    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent.take() else {
            return;
        };
        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }
        self.nodes[parent.0].children.retain(|&id| id != child);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and its descendants in tree order (pre-order).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: if self.get(id).is_some() { vec![id] } else { Vec::new() },
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of a node is the concatenation of the
    /// data of all the Text node descendants of node, in tree order."
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.as_text(node))
            .collect()
    }

    /// [§ 5.1 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// STEP 1: "If elementId is the empty string, return null."
    /// STEP 2: "Return the first element in tree order within node's descendants
    ///          whose ID is elementId; otherwise, return null."
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        self.descendants(NodeId::ROOT).find(|&id| {
            self.as_element(id)
                .and_then(ElementData::id)
                .is_some_and(|found| found == element_id)
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// [§ 2.2 Valid element names](https://dom.spec.whatwg.org/#valid-element-local-name)
///
/// Accepts the ASCII subset of the Name production.
fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

impl HostDocument for DomTree {
    type Node = NodeId;
    type Error = HostError;

    fn create_text_node(&mut self, data: &str) -> Result<NodeId, HostError> {
        Ok(self.alloc(NodeType::Text(data.to_string())))
    }

    /// STEP 1: "If localName does not match the Name production, throw an
    ///          `InvalidCharacterError` `DOMException`."
    /// STEP 2: "If this is an HTML document, then set localName to localName
    ///          in ASCII lowercase."
    fn create_element(&mut self, kind: &str) -> Result<NodeId, HostError> {
        if !is_valid_element_name(kind) {
            return Err(HostError::InvalidCharacter(kind.to_string()));
        }
        Ok(self.alloc_element(&kind.to_ascii_lowercase()))
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: &Value) -> Result<(), HostError> {
        let target = self.get_mut(node).ok_or(HostError::NotFound(node))?;
        match &mut target.node_type {
            NodeType::Element(data) => {
                let _ = data.properties.insert(name.to_string(), value.clone());
            }
            NodeType::Text(text) => match name {
                "nodeValue" | "data" | "textContent" => *text = value.to_text_data(),
                _ => warn_once("DOM", &format!("ignoring property '{name}' on text node")),
            },
            NodeType::Document => {
                warn_once("DOM", &format!("ignoring property '{name}' on document"));
            }
        }
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        Self::append_child(self, parent, child)
    }
}

/// Iterator over ancestors of a node.
#[derive(Debug)]
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a node and its descendants.
#[derive(Debug)]
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
