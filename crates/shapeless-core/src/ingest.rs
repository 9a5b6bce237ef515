//! Format ingestion: raw bytes → [`Node`] → [`Object`].
//!
//! Each supported format delegates entirely to its serde decoder. JSON, YAML
//! and BSON build the tree through `Node`'s `Deserialize` impl; TOML goes
//! through `toml::Table` first, because the toml decoder encodes datetimes as
//! an internal single-entry map that only its own `Value` type understands. Decoder diagnostics are logged at
//! `debug` level and collapsed into [`ObjectError::DataParse`].
//!
//! Auto-detection tries [`Format::DETECTION_ORDER`] and keeps the first
//! successful decode. YAML accepts most plain text as a scalar, so TOML and
//! BSON input is only reached when YAML rejects it.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{ObjectError, Result};
use crate::node::Node;
use crate::object::Object;

/// A supported input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Bson,
}

impl Format {
    /// The order in which [`detect`] tries decoders.
    pub const DETECTION_ORDER: [Format; 4] = [Format::Json, Format::Yaml, Format::Toml, Format::Bson];

    /// Decode `data` in this format.
    pub fn decode(self, data: &[u8]) -> Result<Node> {
        let decoded = match self {
            Format::Json => serde_json::from_slice::<Node>(data).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_slice::<Node>(data).map_err(|e| e.to_string()),
            Format::Toml => std::str::from_utf8(data)
                .map_err(|e| e.to_string())
                .and_then(|text| toml::from_str::<toml::Table>(text).map_err(|e| e.to_string()))
                .map(|table| Node::from(toml::Value::Table(table))),
            Format::Bson => bson::from_slice::<Node>(data).map_err(|e| e.to_string()),
        };
        decoded.map_err(|message| {
            debug!(format = %self, %message, "decoder rejected input");
            ObjectError::DataParse
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Bson => "bson",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "bson" => Ok(Format::Bson),
            other => Err(format!(
                "unknown format '{other}', expected one of: json, yaml, toml, bson"
            )),
        }
    }
}

/// Try every format in [`Format::DETECTION_ORDER`]; return the first that
/// decodes, together with the format that won.
pub fn detect(data: &[u8]) -> Result<(Format, Node)> {
    for format in Format::DETECTION_ORDER {
        if let Ok(node) = format.decode(data) {
            trace!(%format, "format detected");
            return Ok((format, node));
        }
    }
    debug!(len = data.len(), "no decoder accepted input");
    Err(ObjectError::DataParse)
}

impl Object<'static> {
    /// Decode `data` in the given format. A failed decode yields a
    /// non-existent Object carrying `DataParse`.
    pub fn from_format(format: Format, data: &[u8]) -> Self {
        format
            .decode(data)
            .map_or_else(Object::absent, Object::new)
    }

    /// Detect the format of `data` and decode it.
    ///
    /// ```
    /// use shapeless_core::Object;
    ///
    /// let obj = Object::from_data(br#"{"a": [1, 2]}"#);
    /// assert_eq!(obj.get("a").keys(), ["0", "1"]);
    /// ```
    pub fn from_data(data: &[u8]) -> Self {
        detect(data).map_or_else(Object::absent, |(_, node)| Object::new(node))
    }

    pub fn from_json(data: &[u8]) -> Self {
        Self::from_format(Format::Json, data)
    }

    pub fn from_yaml(data: &[u8]) -> Self {
        Self::from_format(Format::Yaml, data)
    }

    pub fn from_toml(data: &[u8]) -> Self {
        Self::from_format(Format::Toml, data)
    }

    pub fn from_bson(data: &[u8]) -> Self {
        Self::from_format(Format::Bson, data)
    }
}
