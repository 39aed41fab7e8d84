//! The fiber tree: work units linked by parent / first-child / next-sibling.
//!
//! Fibers live in an arena owned by [`FiberTree`] and refer to each other by
//! [`FiberId`]. The three links encode the traversal stack explicitly, so a
//! traversal interrupted between two units resumes from a single id instead
//! of re-walking from the root.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use crate::element::{Element, ElementKind, Props};

/// A type-safe index into a [`FiberTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiberId(pub usize);

impl FiberId {
    /// The synthetic root fiber is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// What a fiber stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FiberKind {
    /// The synthetic root wrapping the render container.
    HostRoot,
    /// A fiber spawned from an element.
    Host(ElementKind),
}

/// One tree position's materialization and traversal state.
#[derive(Debug, Clone)]
pub struct Fiber<N> {
    /// Root marker or the spawning element's kind.
    pub kind: FiberKind,
    /// Props shared with the spawning element.
    pub props: Rc<Props>,
    /// Host node, set once when the fiber is materialized.
    pub node: Option<N>,
    /// Structural parent; `None` only for the root.
    pub parent: Option<FiberId>,
    /// First child fiber, set when this fiber is expanded.
    pub child: Option<FiberId>,
    /// Next fiber among the parent's children.
    pub sibling: Option<FiberId>,
    pub(crate) properties_set: bool,
    expanded: bool,
}

impl<N> Fiber<N> {
    /// Whether this fiber's children have been enumerated.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether every declared property has been assigned on the host node.
    #[must_use]
    pub const fn has_properties_set(&self) -> bool {
        self.properties_set
    }

    /// Child elements declared by this fiber's props.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.props.children
    }
}

/// Arena of fibers for one render.
#[derive(Debug, Clone)]
pub struct FiberTree<N> {
    fibers: Vec<Fiber<N>>,
}

impl<N: Copy> FiberTree<N> {
    /// Seed a tree with the synthetic root: its node is `container` and its
    /// only child element is `element`.
    #[must_use]
    pub fn new(container: N, element: Element) -> Self {
        let root = Fiber {
            kind: FiberKind::HostRoot,
            props: Rc::new(Props {
                properties: BTreeMap::new(),
                children: vec![element],
            }),
            node: Some(container),
            parent: None,
            child: None,
            sibling: None,
            properties_set: true,
            expanded: false,
        };
        Self { fibers: vec![root] }
    }

    /// Number of fibers created so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fibers.len()
    }

    /// A tree always holds at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }

    /// Get a fiber by its ID.
    #[must_use]
    pub fn get(&self, id: FiberId) -> Option<&Fiber<N>> {
        self.fibers.get(id.0)
    }

    /// The container node the root wraps.
    #[must_use]
    pub fn container(&self) -> Option<N> {
        self.fibers.first().and_then(|root| root.node)
    }

    /// The node of `id`'s parent, if the parent is materialized.
    #[must_use]
    pub fn parent_node(&self, id: FiberId) -> Option<N> {
        self.get(id)?.parent.and_then(|parent| self[parent].node)
    }

    /// Create one child fiber per element of `parent`'s props, linked in
    /// declared order. Runs at most once per fiber; returns `false` if the
    /// fiber was already expanded.
    pub fn expand(&mut self, parent: FiberId) -> bool {
        if self[parent].expanded {
            return false;
        }
        self[parent].expanded = true;

        let props = Rc::clone(&self[parent].props);
        let mut prev_sibling: Option<FiberId> = None;
        for element in &props.children {
            let id = FiberId(self.fibers.len());
            self.fibers.push(Fiber {
                kind: FiberKind::Host(element.kind().clone()),
                props: element.shared_props(),
                node: None,
                parent: Some(parent),
                child: None,
                sibling: None,
                properties_set: false,
                expanded: false,
            });
            match prev_sibling {
                None => self[parent].child = Some(id),
                Some(prev) => self[prev].sibling = Some(id),
            }
            prev_sibling = Some(id);
        }
        true
    }

    /// The fiber to visit after `id` in depth-first, children-before-siblings
    /// order: the first child if any, otherwise the next sibling of the
    /// closest inclusive ancestor that has one.
    #[must_use]
    pub fn next_unit(&self, id: FiberId) -> Option<FiberId> {
        if let Some(child) = self.get(id)?.child {
            return Some(child);
        }
        let mut current = Some(id);
        while let Some(fiber) = current {
            if let Some(sibling) = self[fiber].sibling {
                return Some(sibling);
            }
            current = self[fiber].parent;
        }
        None
    }

    /// Iterate over fiber ids in traversal order, following the links.
    #[must_use]
    pub fn iter(&self) -> Traversal<'_, N> {
        Traversal {
            tree: self,
            next: self.get(FiberId::ROOT).map(|_| FiberId::ROOT),
        }
    }
}

impl<N> Index<FiberId> for FiberTree<N> {
    type Output = Fiber<N>;

    fn index(&self, id: FiberId) -> &Fiber<N> {
        &self.fibers[id.0]
    }
}

impl<N> IndexMut<FiberId> for FiberTree<N> {
    fn index_mut(&mut self, id: FiberId) -> &mut Fiber<N> {
        &mut self.fibers[id.0]
    }
}

/// Pre-order walk over the linked fibers of a [`FiberTree`].
#[derive(Debug)]
pub struct Traversal<'a, N> {
    tree: &'a FiberTree<N>,
    next: Option<FiberId>,
}

impl<N: Copy> Iterator for Traversal<'_, N> {
    type Item = FiberId;

    fn next(&mut self) -> Option<FiberId> {
        let id = self.next?;
        self.next = self.tree.next_unit(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::create_element;
    use crate::props;

    fn nested() -> Element {
        // div > (p > "a", span)
        create_element(
            "div",
            props! {},
            [
                create_element("p", props! {}, ["a"]),
                create_element("span", props! {}, Vec::<Element>::new()),
            ],
        )
    }

    #[test]
    fn test_expand_links_children_in_declared_order() {
        let mut tree = FiberTree::new(0_u32, nested());
        assert!(tree.expand(FiberId::ROOT));
        let div = tree[FiberId::ROOT].child.unwrap();
        assert!(tree.expand(div));
        assert!(!tree.expand(div), "a fiber expands once");

        let p = tree[div].child.unwrap();
        let span = tree[p].sibling.unwrap();
        assert_eq!(tree[p].kind, FiberKind::Host(ElementKind::Tag("p".into())));
        assert_eq!(tree[span].kind, FiberKind::Host(ElementKind::Tag("span".into())));
        assert_eq!(tree[span].sibling, None);
        assert_eq!(tree[span].parent, Some(div));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_next_unit_climbs_to_ancestor_sibling() {
        let mut tree = FiberTree::new(0_u32, nested());
        let _ = tree.expand(FiberId::ROOT);
        let div = tree[FiberId::ROOT].child.unwrap();
        let _ = tree.expand(div);
        let p = tree[div].child.unwrap();
        let _ = tree.expand(p);
        let text = tree[p].child.unwrap();
        let span = tree[p].sibling.unwrap();

        assert_eq!(tree.next_unit(FiberId::ROOT), Some(div));
        assert_eq!(tree.next_unit(p), Some(text));
        // The text fiber has no sibling; its parent `p` does.
        assert_eq!(tree.next_unit(text), Some(span));
        assert_eq!(tree.next_unit(span), None);
    }

    #[test]
    fn test_root_wraps_container() {
        let tree = FiberTree::new(7_u32, nested());
        assert_eq!(tree.container(), Some(7));
        assert_eq!(tree[FiberId::ROOT].kind, FiberKind::HostRoot);
        assert_eq!(tree[FiberId::ROOT].elements().len(), 1);
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![FiberId::ROOT]);
    }
}
