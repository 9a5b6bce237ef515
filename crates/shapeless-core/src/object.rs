//! [`Object`]: a navigable handle over a possibly-absent [`Node`].
//!
//! Navigation never fails out-of-band. Every call returns a new `Object`,
//! which either wraps the selected node or carries the [`ObjectError`] that
//! explains why there is nothing there. Calls on an Object that carries an
//! error yield another non-existent Object, so speculative chains such as
//! `obj.get("a").index(3).get("b")` are always safe to write.

use std::borrow::Cow;

use crate::error::ObjectError;
use crate::node::{Kind, Node};

/// A handle over one node of a tree, or over nothing.
///
/// Objects built from owned data are `Object<'static>`. Objects returned by
/// navigation borrow from the receiver and cannot outlive it.
#[derive(Debug, Clone, PartialEq)]
pub struct Object<'a> {
    node: Option<Cow<'a, Node>>,
    error: Option<ObjectError>,
}

/// A key/value pair produced by [`Object::entries`].
///
/// For sequences the key is the decimal position (`"0"`, `"1"`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    pub key: String,
    pub value: Object<'a>,
}

impl Object<'static> {
    /// Wrap an owned value.
    ///
    /// ```
    /// use shapeless_core::Object;
    ///
    /// let obj = Object::new(vec![3, 2, 1]);
    /// assert_eq!(obj.index(1).as_i64(), Some(2));
    /// ```
    pub fn new(value: impl Into<Node>) -> Self {
        Self {
            node: Some(Cow::Owned(value.into())),
            error: None,
        }
    }
}

impl<'a> Object<'a> {
    /// Wrap an existing tree without copying it.
    pub fn from_node(node: &'a Node) -> Self {
        Self {
            node: Some(Cow::Borrowed(node)),
            error: None,
        }
    }

    /// A non-existent Object carrying `error`.
    pub(crate) fn absent(error: ObjectError) -> Self {
        Self {
            node: None,
            error: Some(error),
        }
    }

    /// The error left by the call that produced this Object, if any.
    pub fn error(&self) -> Option<ObjectError> {
        self.error
    }

    /// The wrapped node, or `None` when the Object does not exist.
    pub fn node(&self) -> Option<&Node> {
        self.node.as_deref()
    }

    /// The wrapped node as a `Result`, surfacing the carried error.
    pub fn to_result(&self) -> Result<&Node, ObjectError> {
        self.node()
            .ok_or(self.error.unwrap_or(ObjectError::ObjectNotExists))
    }

    /// An owned copy of the wrapped node.
    pub fn into_node(self) -> Option<Node> {
        self.node.map(Cow::into_owned)
    }

    pub fn kind(&self) -> Option<Kind> {
        self.node().map(Node::kind)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.node().and_then(Node::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.node().and_then(Node::as_bool)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.node().and_then(Node::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.node().and_then(Node::as_u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.node().and_then(Node::as_f64)
    }

    /// Look up a child by key.
    ///
    /// On a mapping this is a byte-exact key match. On a sequence the key is
    /// parsed as a base-10 `i64` and the call behaves like [`Object::index`].
    /// Any other kind yields `TypeNotSupport`.
    pub fn get(&self, key: &str) -> Object<'_> {
        let Some(node) = self.node() else {
            return Object::absent(ObjectError::ObjectNotExists);
        };
        match node {
            Node::Mapping(map) => match map.get(key) {
                Some(child) => Object::from_node(child),
                None => Object::absent(ObjectError::FieldNotFound),
            },
            Node::Sequence(_) => match key.parse::<i64>() {
                Ok(index) => self.index(index),
                Err(_) => Object::absent(ObjectError::IndexParse),
            },
            _ => Object::absent(ObjectError::TypeNotSupport),
        }
    }

    /// Look up a sequence element by position.
    ///
    /// Mappings do not support positional access; use [`Object::get`].
    pub fn index(&self, index: i64) -> Object<'_> {
        let Some(node) = self.node() else {
            return Object::absent(ObjectError::ObjectNotExists);
        };
        match node {
            Node::Sequence(items) => usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i))
                .map_or(Object::absent(ObjectError::IndexRange), Object::from_node),
            _ => Object::absent(ObjectError::TypeNotSupport),
        }
    }

    /// Mapping keys, or sequence positions as decimal strings.
    ///
    /// Empty for every other kind and for a non-existent Object.
    /// Mapping order is not guaranteed to match the source document.
    pub fn keys(&self) -> Vec<String> {
        match self.node() {
            Some(Node::Mapping(map)) => map.keys().map(str::to_owned).collect(),
            Some(Node::Sequence(items)) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Child Objects, positionally consistent with [`Object::keys`].
    pub fn values(&self) -> Vec<Object<'_>> {
        match self.node() {
            Some(Node::Mapping(map)) => map.values().map(Object::from_node).collect(),
            Some(Node::Sequence(items)) => items.iter().map(Object::from_node).collect(),
            _ => Vec::new(),
        }
    }

    /// `keys()` zipped with `values()`.
    pub fn entries(&self) -> Vec<Entry<'_>> {
        match self.node() {
            Some(Node::Mapping(map)) => map
                .iter()
                .map(|(key, value)| Entry {
                    key: key.to_owned(),
                    value: Object::from_node(value),
                })
                .collect(),
            Some(Node::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(i, value)| Entry {
                    key: i.to_string(),
                    value: Object::from_node(value),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for Object<'_> {
    fn default() -> Self {
        Object::absent(ObjectError::ObjectNotExists)
    }
}

impl From<Node> for Object<'static> {
    fn from(node: Node) -> Self {
        Object::new(node)
    }
}

impl<'a> From<&'a Node> for Object<'a> {
    fn from(node: &'a Node) -> Self {
        Object::from_node(node)
    }
}
