//! `Deserialize` for [`Node`], so any serde decoder can build the tree directly.
//!
//! The visitor keeps the width each decoder reports (`visit_i32` stays an
//! `Integer::I32`, `visit_f32` stays a `Float::F32`), which is what lets the
//! strict predicates tell a native integer from an integral float.
//!
//! Mapping keys do not have to be strings in every format (YAML allows
//! `1: one`), so keys go through [`MapKey`], which renders scalar keys to text.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};

use crate::node::{Float, Integer, Mapping, Node};

// Caps the up-front allocation a hostile size hint can request.
const MAX_PREALLOCATE: usize = 4096;

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any decodable value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i8<E: de::Error>(self, v: i8) -> Result<Node, E> {
        Ok(Node::Int(Integer::I8(v)))
    }

    fn visit_i16<E: de::Error>(self, v: i16) -> Result<Node, E> {
        Ok(Node::Int(Integer::I16(v)))
    }

    fn visit_i32<E: de::Error>(self, v: i32) -> Result<Node, E> {
        Ok(Node::Int(Integer::I32(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Int(Integer::I64(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Node, E> {
        if let Ok(v) = i64::try_from(v) {
            return Ok(Node::Int(Integer::I64(v)));
        }
        u64::try_from(v)
            .map(|v| Node::Int(Integer::U64(v)))
            .map_err(|_| E::custom(format!("integer {v} does not fit in 64 bits")))
    }

    fn visit_u8<E: de::Error>(self, v: u8) -> Result<Node, E> {
        Ok(Node::Int(Integer::U8(v)))
    }

    fn visit_u16<E: de::Error>(self, v: u16) -> Result<Node, E> {
        Ok(Node::Int(Integer::U16(v)))
    }

    fn visit_u32<E: de::Error>(self, v: u32) -> Result<Node, E> {
        Ok(Node::Int(Integer::U32(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Int(Integer::U64(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Node, E> {
        u64::try_from(v)
            .map(|v| Node::Int(Integer::U64(v)))
            .map_err(|_| E::custom(format!("integer {v} does not fit in 64 bits")))
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> Result<Node, E> {
        Ok(Node::Float(Float::F32(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Float(Float::F64(v)))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    // Raw bytes are a sequence of u8, like any other byte slice.
    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Node, E> {
        Ok(Node::Sequence(v.iter().map(|&b| Node::Int(Integer::U8(b))).collect()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut mapping = Mapping::with_capacity(map.size_hint().unwrap_or(0).min(MAX_PREALLOCATE));
        while let Some(MapKey(key)) = map.next_key::<MapKey>()? {
            let value = map.next_value::<Node>()?;
            mapping.insert(key, value);
        }
        Ok(Node::Mapping(mapping))
    }

    // Tagged values (e.g. YAML `!tag value`) become `{tag: value}`.
    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Node, A::Error> {
        let (MapKey(tag), variant) = data.variant::<MapKey>()?;
        let value = variant.newtype_variant::<Node>()?;
        let mut mapping = Mapping::with_capacity(1);
        mapping.insert(tag, value);
        Ok(Node::Mapping(mapping))
    }
}

/// A mapping key rendered to text.
struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

struct MapKeyVisitor;

impl Visitor<'_> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or scalar mapping key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MapKey, E> {
        Ok(MapKey(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MapKey, E> {
        Ok(MapKey(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MapKey, E> {
        Ok(MapKey("null".to_owned()))
    }
}
