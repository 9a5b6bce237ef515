//! Existence, shape and type predicates on [`Object`].
//!
//! Each family has a strict tier (type identity) and a loose tier (strict, or
//! losslessly coercible from a neighbouring representation). Every predicate
//! is false on a non-existent Object and none of them report errors.

use crate::node::{Float, Node};
use crate::object::Object;

impl Object<'_> {
    /// True iff the Object wraps a node, even a null one.
    pub fn exists(&self) -> bool {
        self.node().is_some()
    }

    /// True iff the wrapped node is an explicit null.
    ///
    /// Scalars, sequences and mappings are owned values here and are never
    /// null references.
    pub fn is_nil(&self) -> bool {
        matches!(self.node(), Some(Node::Null))
    }

    /// True iff the node equals its kind's default value.
    ///
    /// Sequences and mappings are empty when they have no elements; scalars
    /// when they are `0`, `""` or `false`; null is always empty. A float is
    /// empty only when it is positive zero.
    ///
    /// A decoded `{}` is empty too: a mapping node always holds a (possibly
    /// empty) table, so there is no separate "present but unallocated" state.
    pub fn is_empty(&self) -> bool {
        match self.node() {
            None => false,
            Some(Node::Null) => true,
            Some(Node::Bool(b)) => !b,
            Some(Node::Int(i)) => i.is_zero(),
            Some(Node::Float(f)) => f.is_zero(),
            Some(Node::String(s)) => s.is_empty(),
            Some(Node::Sequence(items)) => items.is_empty(),
            Some(Node::Mapping(map)) => map.is_empty(),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self.node(), Some(Node::Mapping(_)))
    }

    #[doc(alias = "is_slice")]
    pub fn is_sequence(&self) -> bool {
        matches!(self.node(), Some(Node::Sequence(_)))
    }

    /// Same as [`Object::is_sequence`].
    pub fn is_slice(&self) -> bool {
        self.is_sequence()
    }

    /// True iff the node is a native integer of any width.
    pub fn is_int_strict(&self) -> bool {
        matches!(self.node(), Some(Node::Int(_)))
    }

    /// True for native integers, integral floats, and strings that parse as
    /// an integral `f64`.
    ///
    /// ```
    /// use shapeless_core::Object;
    ///
    /// assert!(Object::new(5.0f32).is_int());
    /// assert!(Object::new("5").is_int());
    /// assert!(!Object::new("5.1").is_int());
    /// ```
    pub fn is_int(&self) -> bool {
        match self.node() {
            Some(Node::Int(_)) => true,
            Some(Node::Float(f)) => f.is_integral(),
            Some(Node::String(s)) => parse_float(s).is_some_and(is_integral),
            _ => false,
        }
    }

    /// True iff the node is a native float of any width.
    pub fn is_float_strict(&self) -> bool {
        matches!(self.node(), Some(Node::Float(_)))
    }

    /// True for native floats, anything [`Object::is_int`] accepts, and
    /// strings that parse as a decimal `f64` literal.
    pub fn is_float(&self) -> bool {
        if self.is_float_strict() || self.is_int() {
            return true;
        }
        matches!(self.node(), Some(Node::String(s)) if parse_float(s).is_some())
    }

    pub fn is_number_strict(&self) -> bool {
        self.is_int_strict() || self.is_float_strict()
    }

    pub fn is_number(&self) -> bool {
        self.is_int() || self.is_float()
    }

    /// Reserved tier: currently satisfied by mapping nodes only, not by
    /// string nodes. Use [`Object::kind`] to test for a native string.
    pub fn is_string_strict(&self) -> bool {
        self.is_map()
    }

    /// True when [`Object::is_string_strict`] holds or the node is a native
    /// float.
    pub fn is_string(&self) -> bool {
        self.is_string_strict() || self.is_float_strict()
    }

    pub fn is_bool_strict(&self) -> bool {
        matches!(self.node(), Some(Node::Bool(_)))
    }

    /// True for native booleans, and for floats or numeric strings that are
    /// integral by the [`Object::is_int`] rule.
    ///
    /// Truthy literals such as `"true"`, `"yes"` or `"on"` are not parsed.
    pub fn is_bool(&self) -> bool {
        match self.node() {
            Some(Node::Bool(_)) => true,
            Some(Node::Float(f)) => f.is_integral(),
            Some(Node::String(s)) => parse_float(s).is_some_and(is_integral),
            _ => false,
        }
    }
}

/// True iff truncating to `i64` and widening back reproduces `f`.
///
/// `as` saturates, so the range is checked first: `2^63` would otherwise
/// clamp to `i64::MAX` and round back up to itself. NaN fails every
/// comparison and the infinities are out of range.
pub(crate) fn is_integral(f: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (-LIMIT..LIMIT).contains(&f) && f.trunc() == f
}

/// 64-bit float parsing with range checking.
///
/// Rust's parser turns an out-of-range literal such as `"1e400"` into an
/// infinity; that is treated as a parse failure. Explicit `inf`/`infinity`
/// literals are accepted. Hexadecimal literals (`"0x1p4"`) and digit
/// separators (`"1_000"`) are not numbers here.
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    let f = s.parse::<f64>().ok()?;
    if f.is_infinite() {
        let digits = s.trim_start_matches(['+', '-']);
        if !digits.get(..3)?.eq_ignore_ascii_case("inf") {
            return None;
        }
    }
    Some(f)
}

impl Float {
    /// True iff the value survives a round-trip through `i64`.
    pub fn is_integral(self) -> bool {
        is_integral(self.as_f64())
    }
}
