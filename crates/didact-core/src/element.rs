//! Immutable element descriptions.
//!
//! An [`Element`] names a node kind and carries its properties plus an
//! ordered list of child elements. Primitive children never survive
//! construction: [`create_element`] wraps each one in a text element, so a
//! tree of elements contains only elements.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use didact_common::warning::warn_once;
use didact_dom::Value;

/// Name of the reserved text kind.
pub const TEXT_ELEMENT: &str = "TEXT_ELEMENT";

/// Property carrying a text element's value.
pub const NODE_VALUE: &str = "nodeValue";

/// Reserved property name for the child list.
pub const CHILDREN: &str = "children";

/// What kind of host node an element becomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A text node; the element's `nodeValue` property holds its value.
    Text,
    /// A host element with the given tag name.
    Tag(String),
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str(TEXT_ELEMENT),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(kind: &str) -> Self {
        if kind == TEXT_ELEMENT {
            Self::Text
        } else {
            Self::Tag(kind.to_string())
        }
    }
}

/// An element's properties: named values plus the ordered child list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    /// Every property except `children`.
    pub properties: BTreeMap<String, Value>,
    /// Child elements in declared order.
    pub children: Vec<Element>,
}

/// An immutable description of one node and its subtree.
///
/// Cloning is cheap: clones share the same [`Props`].
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    kind: ElementKind,
    props: Rc<Props>,
}

impl Element {
    /// Build an element from already-normalized props.
    #[must_use]
    pub fn new(kind: ElementKind, props: Props) -> Self {
        Self {
            kind,
            props: Rc::new(props),
        }
    }

    /// The element's kind.
    #[must_use]
    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The element's properties and children.
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Shared handle to the props, as stored by fibers.
    #[must_use]
    pub fn shared_props(&self) -> Rc<Props> {
        Rc::clone(&self.props)
    }

    /// Child elements in declared order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.props.children
    }

    /// Look up a non-child property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.props.properties.get(name)
    }

    /// Number of elements in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Self::count).sum::<usize>()
    }
}

/// A child passed to [`create_element`]: an element or a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// An element, kept as is.
    Element(Element),
    /// A primitive, wrapped in a text element.
    Primitive(Value),
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Value> for Child {
    fn from(value: Value) -> Self {
        Self::Primitive(value)
    }
}

macro_rules! primitive_child {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Child {
                fn from(value: $ty) -> Self {
                    Self::Primitive(Value::from(value))
                }
            }
        )*
    };
}

primitive_child!(&str, String, bool, f64, i32, i64);

impl<T: Into<Value>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        Self::Primitive(Value::from(value))
    }
}

/// Build an element of `kind` from a property map and a child list.
///
/// Primitive children become text elements; `null` and `undefined` are kept
/// as text elements carrying that value. A `children` entry in `properties`
/// is dropped because children are passed separately.
pub fn create_element<K, C>(
    kind: K,
    mut properties: BTreeMap<String, Value>,
    children: impl IntoIterator<Item = C>,
) -> Element
where
    K: Into<ElementKind>,
    C: Into<Child>,
{
    let kind = kind.into();
    if properties.remove(CHILDREN).is_some() {
        warn_once(
            "Element",
            &format!("ignoring '{CHILDREN}' in the property map of <{kind}>"),
        );
    }
    let children = children
        .into_iter()
        .map(|child| match child.into() {
            Child::Element(element) => element,
            Child::Primitive(value) => create_text_element(value),
        })
        .collect();
    Element::new(
        kind,
        Props {
            properties,
            children,
        },
    )
}

/// Build a text element carrying `value` as its `nodeValue`.
pub fn create_text_element(value: impl Into<Value>) -> Element {
    let mut properties = BTreeMap::new();
    let _ = properties.insert(NODE_VALUE.to_string(), value.into());
    Element::new(
        ElementKind::Text,
        Props {
            properties,
            children: Vec::new(),
        },
    )
}

/// Property-map literal for [`create_element`].
///
/// ```ignore
/// let el = create_element("a", props! { "href" => "/", "tabIndex" => 0 }, ["home"]);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        ::std::collections::BTreeMap::<::std::string::String, $crate::Value>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut map = ::std::collections::BTreeMap::<::std::string::String, $crate::Value>::new();
        $(
            let _ = map.insert(::std::string::String::from($name), $crate::Value::from($value));
        )+
        map
    }};
}
