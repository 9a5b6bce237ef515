//! # shapeless-core
//!
//! Schema-less navigation over decoded tree data.
//!
//! Data decoded from JSON, YAML, TOML or BSON (or built from native Rust
//! values) becomes a [`Node`] tree. An [`Object`] wraps one node of that tree,
//! or nothing, and lets callers walk it by key or index without knowing its
//! shape, ask what kind of value sits at a position, and check whether a
//! scalar can be read as an integer, float, string or boolean without loss.
//!
//! ## Quick start
//!
//! ```rust
//! use shapeless_core::{Object, ObjectError};
//!
//! let obj = Object::from_json(br#"{"a":"value","b":{"c":-500.5},"d":[3,2,1]}"#);
//!
//! assert_eq!(obj.get("a").as_str(), Some("value"));
//!
//! let b = obj.get("b");
//! assert_eq!(b.get("c").as_f64(), Some(-500.5));
//!
//! let d = obj.get("d");
//! assert_eq!(d.get("1").as_i64(), Some(2));
//! assert_eq!(d.index(3).error(), Some(ObjectError::IndexRange));
//! ```
//!
//! ## Modules
//!
//! - [`node`] — `Node` tagged tree, scalar widths, conversions from native values
//! - [`object`] — `Object` handle: navigation and enumeration
//! - [`predicates`] — existence, shape and coercion checks on `Object`
//! - [`ingest`] — JSON/YAML/TOML/BSON decoding and format auto-detection
//! - [`error`] — `ObjectError` taxonomy

mod de;
pub mod error;
pub mod ingest;
pub mod node;
pub mod object;
pub mod predicates;

pub use error::{ObjectError, Result};
pub use ingest::{detect, Format};
pub use node::{Float, Integer, Kind, Mapping, Node};
pub use object::{Entry, Object};
