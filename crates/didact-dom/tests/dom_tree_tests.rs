//! Tests for the DOM tree as a host document: node creation, property
//! assignment, append semantics and serialization.

use didact_dom::serialize::{print_tree, snapshot, to_html};
use didact_dom::{DomTree, HostDocument, HostError, NodeId, Value};

/// Helper to create an element through the host interface.
fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(tag).unwrap()
}

// ========== append_child ==========

#[test]
fn test_append_child_links_siblings_in_order() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent).unwrap();

    let a = element(&mut tree, "a");
    let b = element(&mut tree, "b");
    let c = element(&mut tree, "c");
    tree.append_child(parent, a).unwrap();
    tree.append_child(parent, b).unwrap();
    tree.append_child(parent, c).unwrap();

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(c));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.parent(b), Some(parent));
}

#[test]
fn test_append_child_moves_attached_node() {
    let mut tree = DomTree::new();
    let first = element(&mut tree, "section");
    let second = element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, first).unwrap();
    tree.append_child(NodeId::ROOT, second).unwrap();

    let a = element(&mut tree, "a");
    let b = element(&mut tree, "b");
    tree.append_child(first, a).unwrap();
    tree.append_child(first, b).unwrap();

    tree.append_child(second, a).unwrap();

    assert_eq!(tree.children(first), &[b]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.children(second), &[a]);
    assert_eq!(tree.parent(a), Some(second));
    assert_eq!(tree.next_sibling(a), None);
}

#[test]
fn test_append_child_rejects_text_parent() {
    let mut tree = DomTree::new();
    let text = tree.create_text_node("hi").unwrap();
    let span = element(&mut tree, "span");

    assert_eq!(
        tree.append_child(text, span),
        Err(HostError::HierarchyRequest {
            parent: text,
            child: span
        })
    );
}

#[test]
fn test_append_child_rejects_cycles() {
    let mut tree = DomTree::new();
    let outer = element(&mut tree, "div");
    let inner = element(&mut tree, "p");
    tree.append_child(outer, inner).unwrap();

    assert!(matches!(
        tree.append_child(inner, outer),
        Err(HostError::HierarchyRequest { .. })
    ));
    assert!(matches!(
        tree.append_child(outer, outer),
        Err(HostError::HierarchyRequest { .. })
    ));
    assert!(matches!(
        tree.append_child(outer, NodeId::ROOT),
        Err(HostError::HierarchyRequest { .. })
    ));
}

#[test]
fn test_append_child_unknown_node() {
    let mut tree = DomTree::new();
    assert_eq!(
        tree.append_child(NodeId::ROOT, NodeId(99)),
        Err(HostError::NotFound(NodeId(99)))
    );
}

// ========== create_element ==========

#[test]
fn test_create_element_lowercases_name() {
    let mut tree = DomTree::new();
    let id = element(&mut tree, "H1");
    assert_eq!(tree.as_element(id).unwrap().tag_name, "h1");
}

#[test]
fn test_create_element_rejects_invalid_names() {
    let mut tree = DomTree::new();
    for name in ["", "1div", "a b", "<p>", "TEXT ELEMENT"] {
        assert_eq!(
            tree.create_element(name),
            Err(HostError::InvalidCharacter(name.to_string())),
            "{name:?} should be rejected"
        );
    }
    assert!(tree.create_element("my-widget").is_ok());
    assert!(tree.create_element("svg:rect").is_ok());
}

// ========== set_property ==========

#[test]
fn test_set_property_on_element() {
    let mut tree = DomTree::new();
    let id = element(&mut tree, "input");
    tree.set_property(id, "value", &Value::from("abc")).unwrap();
    tree.set_property(id, "disabled", &Value::from(true)).unwrap();

    let data = tree.as_element(id).unwrap();
    assert_eq!(data.properties.get("value"), Some(&Value::from("abc")));
    assert_eq!(data.properties.get("disabled"), Some(&Value::Bool(true)));
}

#[test]
fn test_set_node_value_on_text() {
    let mut tree = DomTree::new();
    let id = tree.create_text_node("").unwrap();

    tree.set_property(id, "nodeValue", &Value::from(0)).unwrap();
    assert_eq!(tree.as_text(id), Some("0"));

    tree.set_property(id, "nodeValue", &Value::Null).unwrap();
    assert_eq!(tree.as_text(id), Some(""));

    tree.set_property(id, "nodeValue", &Value::from("kept")).unwrap();
    tree.set_property(id, "nodeValue", &Value::Undefined).unwrap();
    assert_eq!(tree.as_text(id), Some(""));

    // Unknown fields on text nodes are ignored.
    tree.set_property(id, "data", &Value::from("y")).unwrap();
    tree.set_property(id, "title", &Value::from("x")).unwrap();
    assert_eq!(tree.as_text(id), Some("y"));
}

#[test]
fn test_set_property_unknown_node() {
    let mut tree = DomTree::new();
    assert_eq!(
        tree.set_property(NodeId(7), "id", &Value::from("x")),
        Err(HostError::NotFound(NodeId(7)))
    );
}

// ========== queries ==========

#[test]
fn test_get_element_by_id_and_text_content() {
    let mut tree = DomTree::new();
    let root = element(&mut tree, "div");
    tree.set_property(root, "id", &Value::from("root")).unwrap();
    tree.append_child(NodeId::ROOT, root).unwrap();
    let p = element(&mut tree, "p");
    tree.append_child(root, p).unwrap();
    let hello = tree.create_text_node("Hello ").unwrap();
    let world = tree.create_text_node("World").unwrap();
    tree.append_child(p, hello).unwrap();
    tree.append_child(root, world).unwrap();

    assert_eq!(tree.get_element_by_id("root"), Some(root));
    assert_eq!(tree.get_element_by_id(""), None);
    assert_eq!(tree.get_element_by_id("missing"), None);
    assert_eq!(tree.text_content(root), "Hello World");
    assert_eq!(
        tree.descendants(root).collect::<Vec<_>>(),
        vec![root, p, hello, world]
    );
    assert_eq!(tree.ancestors(hello).collect::<Vec<_>>(), vec![p, root, NodeId::ROOT]);
}

// ========== serialization ==========

fn sample_tree() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let div = element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div).unwrap();
    tree.set_property(div, "title", &Value::from("a \"quote\"")).unwrap();
    tree.set_property(div, "hidden", &Value::from(true)).unwrap();
    tree.set_property(div, "lang", &Value::Null).unwrap();
    let text = tree.create_text_node("1 < 2 & 3").unwrap();
    tree.append_child(div, text).unwrap();
    (tree, div)
}

#[test]
fn test_to_html_escapes_and_skips_absent_properties() {
    let (tree, div) = sample_tree();
    assert_eq!(
        to_html(&tree, div),
        "<div hidden title=\"a &quot;quote&quot;\">1 &lt; 2 &amp; 3</div>"
    );
    assert_eq!(to_html(&tree, NodeId::ROOT), to_html(&tree, div));
}

#[test]
fn test_print_tree_lists_nodes_with_indentation() {
    let (tree, _) = sample_tree();
    let listing = print_tree(&tree, NodeId::ROOT);
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "Document");
    assert!(lines[1].starts_with("  <div "));
    assert_eq!(lines[2], "    \"1\u{00B7}<\u{00B7}2\u{00B7}&\u{00B7}3\"");
}

#[test]
fn test_snapshot_serializes_to_json() {
    let (tree, div) = sample_tree();
    let json = serde_json::to_value(snapshot(&tree, div).unwrap()).unwrap();
    assert_eq!(json["type"], "element");
    assert_eq!(json["tagName"], "div");
    assert_eq!(json["properties"]["hidden"], true);
    assert!(json["properties"]["lang"].is_null());
    assert_eq!(json["children"][0]["type"], "text");
    assert_eq!(json["children"][0]["data"], "1 < 2 & 3");
    assert!(snapshot(&tree, NodeId(500)).is_none());
}
