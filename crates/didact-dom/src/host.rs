//! The host document interface the renderer drives.
//!
//! The renderer never owns a document. It creates nodes, assigns properties
//! and appends children through this trait, once per node, and never removes
//! or reorders existing children. [`DomTree`](crate::DomTree) is the
//! in-memory implementation; a browser binding would implement it over
//! `web_sys::Document`.

use std::error::Error;
use std::fmt::Debug;

use crate::Value;

/// Node creation, property assignment and child insertion on a host tree.
pub trait HostDocument {
    /// Opaque handle to a node owned by the host.
    type Node: Copy + Eq + Debug;

    /// Failure raised by the host, e.g. an invalid element name.
    type Error: Error + 'static;

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    ///
    /// Creates a detached text node holding `data`.
    ///
    /// # Errors
    ///
    /// Returns the host's error if the node cannot be created.
    fn create_text_node(&mut self, data: &str) -> Result<Self::Node, Self::Error>;

    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// Creates a detached element node named `kind`.
    ///
    /// # Errors
    ///
    /// Returns the host's error for names the host rejects.
    fn create_element(&mut self, kind: &str) -> Result<Self::Node, Self::Error>;

    /// Assigns `value` to the named field of `node`.
    ///
    /// # Errors
    ///
    /// Returns the host's error if `node` does not exist or rejects the
    /// assignment.
    fn set_property(
        &mut self,
        node: Self::Node,
        name: &str,
        value: &Value,
    ) -> Result<(), Self::Error>;

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns the host's error if the insertion is not allowed.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<(), Self::Error>;
}
