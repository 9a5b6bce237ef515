//! The tagged tree that every [`Object`](crate::Object) navigates.
//!
//! A [`Node`] is built once, either by a serde decoder (through its `Deserialize` impl) or
//! from native Rust values through the `From` impls below. Indirections such as
//! `&T`, `Option`, `Box`, `Rc` and `Arc` are resolved while converting, so a node
//! never has to be unwrapped again before its kind is inspected.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// The shape of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Mapping,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// An integer scalar in the width it was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Integer {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl Integer {
    /// The value as `i64`, if it fits.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Integer::I8(v) => Some(v.into()),
            Integer::I16(v) => Some(v.into()),
            Integer::I32(v) => Some(v.into()),
            Integer::I64(v) => Some(v),
            Integer::U8(v) => Some(v.into()),
            Integer::U16(v) => Some(v.into()),
            Integer::U32(v) => Some(v.into()),
            Integer::U64(v) => i64::try_from(v).ok(),
        }
    }

    /// The value as `u64`, if it is non-negative.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Integer::I8(v) => u64::try_from(v).ok(),
            Integer::I16(v) => u64::try_from(v).ok(),
            Integer::I32(v) => u64::try_from(v).ok(),
            Integer::I64(v) => u64::try_from(v).ok(),
            Integer::U8(v) => Some(v.into()),
            Integer::U16(v) => Some(v.into()),
            Integer::U32(v) => Some(v.into()),
            Integer::U64(v) => Some(v),
        }
    }

    /// The value as `f64`; large 64-bit values round to the nearest float.
    pub fn as_f64(self) -> f64 {
        match self {
            Integer::I8(v) => v.into(),
            Integer::I16(v) => v.into(),
            Integer::I32(v) => v.into(),
            Integer::I64(v) => v as f64,
            Integer::U8(v) => v.into(),
            Integer::U16(v) => v.into(),
            Integer::U32(v) => v.into(),
            Integer::U64(v) => v as f64,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_i64() == Some(0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Integer::I8(v) => write!(f, "{v}"),
            Integer::I16(v) => write!(f, "{v}"),
            Integer::I32(v) => write!(f, "{v}"),
            Integer::I64(v) => write!(f, "{v}"),
            Integer::U8(v) => write!(f, "{v}"),
            Integer::U16(v) => write!(f, "{v}"),
            Integer::U32(v) => write!(f, "{v}"),
            Integer::U64(v) => write!(f, "{v}"),
        }
    }
}

/// A floating-point scalar in the width it was produced with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    /// Widen to `f64`. Widening an `f32` is exact.
    pub fn as_f64(self) -> f64 {
        match self {
            Float::F32(v) => f64::from(v),
            Float::F64(v) => v,
        }
    }

    /// True only for positive zero; `-0.0` has a non-zero bit pattern.
    pub fn is_zero(self) -> bool {
        match self {
            Float::F32(v) => v.to_bits() == 0,
            Float::F64(v) => v.to_bits() == 0,
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the trailing `.0` on integral values.
        match *self {
            Float::F32(v) => write!(f, "{v:?}"),
            Float::F64(v) => write!(f, "{v:?}"),
        }
    }
}

/// String-keyed collection of nodes.
///
/// Keys are unique. Entries keep the order they were inserted in, which for
/// decoded data is usually source order. Callers should still treat the order
/// as unspecified: not every decoder reports keys in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a key, replacing (in place) and returning any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Byte-exact key lookup.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut mapping = Mapping::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// One decoded or wrapped value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(Integer),
    Float(Float),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Null => Kind::Null,
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::Float(_) => Kind::Float,
            Node::String(_) => Kind::String,
            Node::Sequence(_) => Kind::Sequence,
            Node::Mapping(_) => Kind::Mapping,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Native integers only; no coercion from floats or strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => i.as_i64(),
            _ => None,
        }
    }

    /// Native integers only; no coercion from floats or strings.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::Int(i) => i.as_u64(),
            _ => None,
        }
    }

    /// Any native number, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(i) => Some(i.as_f64()),
            Node::Float(f) => Some(f.as_f64()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Compact JSON-like rendering, used for display only.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Bool(b) => write!(f, "{b}"),
            Node::Int(i) => write!(f, "{i}"),
            Node::Float(x) => write!(f, "{x}"),
            Node::String(s) => write_quoted(f, s),
            Node::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Node::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions from native values
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! from_integer {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Integer {
                fn from(v: $ty) -> Self {
                    Integer::$variant(v)
                }
            }

            impl From<$ty> for Node {
                fn from(v: $ty) -> Self {
                    Node::Int(Integer::$variant(v))
                }
            }
        )*
    };
}

from_integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl From<isize> for Node {
    fn from(v: isize) -> Self {
        Node::Int(Integer::I64(v as i64))
    }
}

impl From<usize> for Node {
    fn from(v: usize) -> Self {
        Node::Int(Integer::U64(v as u64))
    }
}

impl From<f32> for Node {
    fn from(v: f32) -> Self {
        Node::Float(Float::F32(v))
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Float(Float::F64(v))
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Node::Bool(v)
    }
}

impl From<char> for Node {
    fn from(v: char) -> Self {
        Node::String(v.to_string())
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::String(v.to_owned())
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Node::String(v)
    }
}

impl From<()> for Node {
    fn from(_: ()) -> Self {
        Node::Null
    }
}

impl From<Integer> for Node {
    fn from(v: Integer) -> Self {
        Node::Int(v)
    }
}

impl From<Float> for Node {
    fn from(v: Float) -> Self {
        Node::Float(v)
    }
}

impl From<Mapping> for Node {
    fn from(v: Mapping) -> Self {
        Node::Mapping(v)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(v: Option<T>) -> Self {
        v.map_or(Node::Null, Into::into)
    }
}

impl<T: Into<Node>> From<Box<T>> for Node {
    fn from(v: Box<T>) -> Self {
        (*v).into()
    }
}

impl<T: Clone + Into<Node>> From<&T> for Node {
    fn from(v: &T) -> Self {
        v.clone().into()
    }
}

impl<T: Clone + Into<Node>> From<Rc<T>> for Node {
    fn from(v: Rc<T>) -> Self {
        Rc::unwrap_or_clone(v).into()
    }
}

impl<T: Clone + Into<Node>> From<Arc<T>> for Node {
    fn from(v: Arc<T>) -> Self {
        Arc::unwrap_or_clone(v).into()
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(v: Vec<T>) -> Self {
        Node::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Node>> From<&[T]> for Node {
    fn from(v: &[T]) -> Self {
        Node::Sequence(v.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Node>, const N: usize> From<[T; N]> for Node {
    fn from(v: [T; N]) -> Self {
        Node::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Node>, S: BuildHasher> From<HashMap<K, V, S>> for Node {
    fn from(v: HashMap<K, V, S>) -> Self {
        Node::Mapping(v.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Node>> From<BTreeMap<K, V>> for Node {
    fn from(v: BTreeMap<K, V>) -> Self {
        Node::Mapping(v.into_iter().collect())
    }
}

impl<T: Into<Node>> FromIterator<T> for Node {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Node::Sequence(iter.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Node {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Node::from(u)
                } else if let Some(i) = n.as_i64() {
                    Node::from(i)
                } else {
                    // Without arbitrary_precision every number fits one of the three.
                    Node::from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(map.into_iter().collect()),
        }
    }
}

impl From<toml::Value> for Node {
    fn from(v: toml::Value) -> Self {
        use toml::Value;
        match v {
            Value::String(s) => Node::String(s),
            Value::Integer(i) => Node::from(i),
            Value::Float(f) => Node::from(f),
            Value::Boolean(b) => Node::Bool(b),
            // Datetimes are scalars; keep their RFC 3339 text.
            Value::Datetime(dt) => Node::String(dt.to_string()),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Table(table) => Node::Mapping(table.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut map = Mapping::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 3), Some(Node::from(1)));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map.get("a"), Some(&Node::from(3)));
    }

    #[test]
    fn indirections_resolve_to_pointee() {
        let boxed: Node = Box::new(Some(Rc::new(7u16))).into();
        assert_eq!(boxed, Node::Int(Integer::U16(7)));
        let none: Node = Option::<i32>::None.into();
        assert_eq!(none, Node::Null);
        let ports = vec![8080u16, 8081];
        let borrowed: Node = (&ports).into();
        assert_eq!(borrowed, Node::from(ports.clone()));
        let nested: Node = Some(&Arc::new(1.5f32)).into();
        assert_eq!(nested, Node::Float(Float::F32(1.5)));
    }

    #[test]
    fn negative_zero_is_not_zero() {
        assert!(Float::F64(0.0).is_zero());
        assert!(!Float::F64(-0.0).is_zero());
    }

    #[test]
    fn display_is_json_like() {
        let node: Node = vec![
            Node::from("a\"b"),
            Node::from(1.0f64),
            Node::from(-3i32),
            Node::Null,
        ]
        .into();
        assert_eq!(node.to_string(), r#"["a\"b",1.0,-3,null]"#);
    }

    #[test]
    fn integer_narrowing() {
        assert_eq!(Integer::U64(u64::MAX).as_i64(), None);
        assert_eq!(Integer::I8(-1).as_u64(), None);
        assert_eq!(Integer::I32(-1).as_i64(), Some(-1));
    }
}
