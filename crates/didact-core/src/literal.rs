//! Reading element literals from JSON.
//!
//! Two shapes are accepted. The object shape is what the element-literal
//! constructor itself produces:
//!
//! ```json
//! { "type": "div", "props": { "id": "app", "children": [ "hi", { "type": "b", "props": {} } ] } }
//! ```
//!
//! The array shape is a terser hand-written form, `[kind, props?, ...children]`:
//!
//! ```json
//! ["div", { "id": "app" }, "hi", ["b"]]
//! ```
//!
//! A `null` in the props slot means no props, as in `createElement("p", null)`.
//!
//! Children in either shape may be elements or JSON primitives; primitives
//! become text elements.

use std::collections::BTreeMap;

use didact_common::warning::warn_once;
use didact_dom::Value;
use serde_json::Value as Json;
use thiserror::Error;

use crate::element::{CHILDREN, Child, Element, create_element};

/// Failure to read an element literal.
#[derive(Debug, Error)]
pub enum LiteralError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON does not describe an element.
    #[error("{path}: {reason}")]
    Shape {
        /// JSON-pointer-like location of the offending value.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
}

fn shape_error(path: &str, reason: impl Into<String>) -> LiteralError {
    LiteralError::Shape {
        path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        reason: reason.into(),
    }
}

/// Parse `source` as JSON and read the element it describes.
///
/// # Errors
///
/// [`LiteralError::Json`] for malformed JSON, [`LiteralError::Shape`] when
/// the document is not an element literal.
pub fn parse_element(source: &str) -> Result<Element, LiteralError> {
    let json: Json = serde_json::from_str(source)?;
    element_from_json(&json)
}

/// Read an element from an already-parsed JSON value.
///
/// # Errors
///
/// [`LiteralError::Shape`] when the value is not an element literal.
pub fn element_from_json(json: &Json) -> Result<Element, LiteralError> {
    read_element(json, "")
}

fn read_element(json: &Json, path: &str) -> Result<Element, LiteralError> {
    match json {
        Json::Object(object) => {
            let kind = object
                .get("type")
                .and_then(Json::as_str)
                .ok_or_else(|| shape_error(path, "element object needs a string \"type\""))?;
            for key in object.keys().filter(|k| !matches!(k.as_str(), "type" | "props")) {
                warn_once("Literal", &format!("ignoring unknown element field '{key}'"));
            }
            let props_path = format!("{path}/props");
            let (properties, children) = match object.get("props") {
                None | Some(Json::Null) => (BTreeMap::new(), Vec::new()),
                Some(Json::Object(props)) => {
                    let children = match props.get(CHILDREN) {
                        None | Some(Json::Null) => Vec::new(),
                        Some(Json::Array(items)) => {
                            read_children(items, &format!("{props_path}/{CHILDREN}"))?
                        }
                        Some(_) => {
                            return Err(shape_error(
                                &format!("{props_path}/{CHILDREN}"),
                                "children must be an array",
                            ));
                        }
                    };
                    (read_properties(props, &props_path)?, children)
                }
                Some(_) => return Err(shape_error(&props_path, "props must be an object")),
            };
            Ok(create_element(kind, properties, children))
        }
        Json::Array(items) => {
            let kind = items
                .first()
                .and_then(Json::as_str)
                .ok_or_else(|| shape_error(path, "element array must start with its kind"))?;
            let (properties, rest) = match items.get(1) {
                Some(Json::Object(props)) => {
                    if props.contains_key(CHILDREN) {
                        return Err(shape_error(
                            &format!("{path}/1"),
                            "pass children after the props object, not inside it",
                        ));
                    }
                    (read_properties(props, &format!("{path}/1"))?, 2)
                }
                Some(Json::Null) => (BTreeMap::new(), 2),
                _ => (BTreeMap::new(), 1),
            };
            let children = items
                .iter()
                .enumerate()
                .skip(rest)
                .map(|(i, item)| read_child(item, &format!("{path}/{i}")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(create_element(kind, properties, children))
        }
        _ => Err(shape_error(path, "expected an element object or array")),
    }
}

fn read_children(items: &[Json], path: &str) -> Result<Vec<Child>, LiteralError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| read_child(item, &format!("{path}/{i}")))
        .collect()
}

fn read_child(json: &Json, path: &str) -> Result<Child, LiteralError> {
    match json {
        Json::Object(_) | Json::Array(_) => read_element(json, path).map(Child::Element),
        primitive => read_primitive(primitive, path).map(Child::Primitive),
    }
}

fn read_properties(
    props: &serde_json::Map<String, Json>,
    path: &str,
) -> Result<BTreeMap<String, Value>, LiteralError> {
    props
        .iter()
        .filter(|(name, _)| *name != CHILDREN)
        .map(|(name, value)| {
            read_primitive(value, &format!("{path}/{name}")).map(|value| (name.clone(), value))
        })
        .collect()
}

fn read_primitive(json: &Json, path: &str) -> Result<Value, LiteralError> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| shape_error(path, "number out of range")),
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(_) | Json::Object(_) => {
            Err(shape_error(path, "property values must be primitives"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, NODE_VALUE};

    #[test]
    fn test_object_shape() {
        let el = parse_element(
            r#"{"type": "div", "props": {"id": "app", "children": ["hi", 0, null, {"type": "b", "props": {}}]}}"#,
        )
        .unwrap();
        assert_eq!(el.kind(), &ElementKind::Tag("div".into()));
        assert_eq!(el.property("id"), Some(&Value::from("app")));
        assert_eq!(el.children().len(), 4);
        assert_eq!(el.children()[1].property(NODE_VALUE), Some(&Value::from(0)));
        assert_eq!(el.children()[2].property(NODE_VALUE), Some(&Value::Null));
        assert_eq!(el.children()[3].kind(), &ElementKind::Tag("b".into()));
    }

    #[test]
    fn test_array_shape() {
        let el = parse_element(r#"["ul", {"class": "list"}, ["li", "one"], ["li", "two"], true]"#)
            .unwrap();
        assert_eq!(el.property("class"), Some(&Value::from("list")));
        assert_eq!(el.children().len(), 3);
        assert_eq!(el.children()[0].children()[0].property(NODE_VALUE), Some(&Value::from("one")));
        assert_eq!(el.children()[2].kind(), &ElementKind::Text);

        let no_props = parse_element(r#"["p", null, "hi"]"#).unwrap();
        assert!(no_props.props().properties.is_empty());
        assert_eq!(no_props.children().len(), 1);
        assert_eq!(no_props.children()[0].property(NODE_VALUE), Some(&Value::from("hi")));

        let bare = parse_element(r#"["br"]"#).unwrap();
        assert!(bare.children().is_empty());
        assert!(bare.props().properties.is_empty());
    }

    #[test]
    fn test_shape_errors_carry_path() {
        let err = parse_element(r#"{"type": "div", "props": {"style": {"color": "red"}}}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "/props/style: property values must be primitives");

        let err = parse_element(r"[1, 2]").unwrap_err();
        assert!(matches!(err, LiteralError::Shape { ref path, .. } if path == "/"));

        assert!(matches!(parse_element("{"), Err(LiteralError::Json(_))));
    }
}
