//! Text, HTML and JSON views of a [`DomTree`].

use std::fmt::Write;

use serde::Serialize;

use crate::{DomTree, NodeId, NodeType, PropertyMap, Value};

/// Render an indented debug listing of the subtree rooted at `id`.
///
/// One node per line, two spaces per level. Element properties are listed
/// in name order; text nodes are quoted with spaces shown as `·`.
#[must_use]
pub fn print_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    print_node(tree, id, 0, &mut out);
    out
}

fn print_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            let _ = writeln!(out, "{prefix}Document");
        }
        NodeType::Element(data) => {
            if data.properties.is_empty() {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            } else {
                let props: Vec<String> = data
                    .properties
                    .iter()
                    .map(|(k, v)| format!("{k}=\"{v}\""))
                    .collect();
                let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, props.join(" "));
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            let _ = writeln!(out, "{prefix}\"{display}\"");
        }
    }
    for &child in &node.children {
        print_node(tree, child, indent + 1, out);
    }
}

/// [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
///
/// Serialize the subtree rooted at `id` as outer HTML. Properties become
/// attributes: absent values (`null`, `undefined`, `false`) are skipped and
/// `true` is written as a bare attribute.
#[must_use]
pub fn to_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_html(tree, id, &mut out);
    out
}

fn write_html(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            for &child in &node.children {
                write_html(tree, child, out);
            }
        }
        NodeType::Text(data) => out.push_str(&escape(data, false)),
        NodeType::Element(data) => {
            let _ = write!(out, "<{}", data.tag_name);
            write_attributes(&data.properties, out);
            out.push('>');
            for &child in &node.children {
                write_html(tree, child, out);
            }
            let _ = write!(out, "</{}>", data.tag_name);
        }
    }
}

fn write_attributes(properties: &PropertyMap, out: &mut String) {
    for (name, value) in properties.iter().filter(|(_, v)| !v.is_absent()) {
        let _ = write!(out, " {name}");
        if *value != Value::Bool(true) {
            let _ = write!(out, "=\"{}\"", escape(&value.to_string(), true));
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
fn escape(s: &str, attribute_mode: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// A serializable copy of a node and its subtree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    /// The document node.
    Document {
        /// Child snapshots in tree order.
        children: Vec<Self>,
    },
    /// An element node.
    Element {
        /// Local name.
        #[serde(rename = "tagName")]
        tag_name: String,
        /// Assigned properties.
        properties: PropertyMap,
        /// Child snapshots in tree order.
        children: Vec<Self>,
    },
    /// A text node.
    Text {
        /// Character data.
        data: String,
    },
}

/// Capture the subtree rooted at `id`, or `None` if no such node exists.
#[must_use]
pub fn snapshot(tree: &DomTree, id: NodeId) -> Option<NodeSnapshot> {
    let node = tree.get(id)?;
    let children = || -> Vec<NodeSnapshot> {
        node.children
            .iter()
            .filter_map(|&child| snapshot(tree, child))
            .collect()
    };
    Some(match &node.node_type {
        NodeType::Document => NodeSnapshot::Document {
            children: children(),
        },
        NodeType::Element(data) => NodeSnapshot::Element {
            tag_name: data.tag_name.clone(),
            properties: data.properties.clone(),
            children: children(),
        },
        NodeType::Text(data) => NodeSnapshot::Text { data: data.clone() },
    })
}
