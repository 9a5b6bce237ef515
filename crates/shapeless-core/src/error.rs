//! Error types for object navigation and data ingestion.

use thiserror::Error;

/// Errors carried by an [`Object`](crate::Object) after a navigation or
/// ingestion call.
///
/// The variants carry no payload: callers compare kinds with `==`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectError {
    /// The operation was applied to an Object that holds no value.
    #[error("object isn't exists")]
    ObjectNotExists,

    /// The value's kind does not support the attempted navigation
    /// (e.g. indexing a mapping, keying a scalar).
    #[error("type isn't supporting")]
    TypeNotSupport,

    /// A mapping lookup found no matching key.
    #[error("field name not found")]
    FieldNotFound,

    /// A key used on a sequence is not a base-10 integer.
    #[error("index can't be parsed")]
    IndexParse,

    /// An index is outside `[0, len)`.
    #[error("index out of range")]
    IndexRange,

    /// Raw bytes could not be decoded by the requested (or any) format.
    #[error("data can't be parsed")]
    DataParse,
}

/// Convenience alias used throughout shapeless-core.
pub type Result<T> = std::result::Result<T, ObjectError>;
