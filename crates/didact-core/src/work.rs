//! Host-node materialization and the unit of work.

use didact_dom::HostDocument;

use crate::element::{CHILDREN, ElementKind, Props};
use crate::error::RenderError;
use crate::fiber::{FiberId, FiberKind, FiberTree};

/// Create the host node for one element and copy its properties onto it.
///
/// Text kinds become text nodes, everything else an element node named by
/// the kind. Children are not touched.
///
/// # Errors
///
/// Propagates the host's failure to create the node or assign a property.
pub fn create_node<D: HostDocument>(
    doc: &mut D,
    kind: &ElementKind,
    props: &Props,
) -> Result<D::Node, D::Error> {
    let node = create_bare_node(doc, kind)?;
    set_properties(doc, node, props)?;
    Ok(node)
}

fn create_bare_node<D: HostDocument>(doc: &mut D, kind: &ElementKind) -> Result<D::Node, D::Error> {
    match kind {
        ElementKind::Text => doc.create_text_node(""),
        ElementKind::Tag(tag) => doc.create_element(tag),
    }
}

fn set_properties<D: HostDocument>(doc: &mut D, node: D::Node, props: &Props) -> Result<(), D::Error> {
    for (name, value) in props.properties.iter().filter(|(name, _)| *name != CHILDREN) {
        doc.set_property(node, name, value)?;
    }
    Ok(())
}

/// Process one fiber and return the next one to visit.
///
/// 1. Materialize the fiber's node unless it already has one. The node is
///    stored before its properties are assigned, so a retry after a failed
///    assignment reassigns them on the same node.
/// 2. Append it under the parent's node.
/// 3. Expand the declared children into linked child fibers (once).
/// 4. Pick the next fiber depth-first, children before siblings.
///
/// # Errors
///
/// Returns [`RenderError::Host`] if the host rejects node creation, a
/// property assignment or the append. The fiber may then be materialized
/// but unattached, and is left unexpanded.
pub fn perform_unit_of_work<D: HostDocument>(
    tree: &mut FiberTree<D::Node>,
    doc: &mut D,
    id: FiberId,
) -> Result<Option<FiberId>, RenderError<D::Error>> {
    let host_error = |source| RenderError::Host { fiber: id, source };

    if tree[id].node.is_none()
        && let FiberKind::Host(kind) = &tree[id].kind
    {
        let node = create_bare_node(doc, kind).map_err(host_error)?;
        tree[id].node = Some(node);
    }
    if !tree[id].properties_set
        && let Some(node) = tree[id].node
    {
        set_properties(doc, node, &tree[id].props).map_err(host_error)?;
        tree[id].properties_set = true;
    }

    if let (Some(parent), Some(node)) = (tree.parent_node(id), tree[id].node) {
        doc.append_child(parent, node).map_err(host_error)?;
    }

    let _ = tree.expand(id);

    Ok(tree.next_unit(id))
}
