//! Format ingestion and auto-detection tests.

use shapeless_core::{detect, Float, Format, Integer, Kind, Node, Object, ObjectError};

/// Helper: a small BSON document `{hello: "world", n: 5, x: 1.5, list: [1, 2]}`.
fn bson_bytes() -> Vec<u8> {
    let doc = bson::doc! {
        "hello": "world",
        "n": 5_i32,
        "x": 1.5_f64,
        "list": [1_i32, 2_i32],
    };
    bson::to_vec(&doc).unwrap()
}

// ============================================================================
// Per-format decoding
// ============================================================================

#[test]
fn json_document() {
    let obj = Object::from_json(br#"{"a":"value","b":{"c":-500.5},"d":[3,2,1]}"#);
    assert!(obj.exists());
    assert_eq!(obj.error(), None);
    assert_eq!(obj.get("a").as_str(), Some("value"));
    let b = obj.get("b");
    assert_eq!(b.get("c").as_f64(), Some(-500.5));
}

#[test]
fn json_invalid() {
    let obj = Object::from_json(b"{not json");
    assert!(!obj.exists());
    assert_eq!(obj.error(), Some(ObjectError::DataParse));
}

#[test]
fn yaml_document() {
    let yaml = b"name: Alice\nscores:\n  - 95\n  - 87\nratio: 0.5\nactive: true\nnothing: ~\n";
    let obj = Object::from_yaml(yaml);
    assert_eq!(obj.get("name").as_str(), Some("Alice"));
    let scores = obj.get("scores");
    assert_eq!(scores.keys(), ["0", "1"]);
    assert_eq!(scores.index(1).as_i64(), Some(87));
    assert!(obj.get("ratio").is_float_strict());
    assert!(obj.get("active").is_bool_strict());
    assert!(obj.get("nothing").is_nil());
}

#[test]
fn yaml_invalid() {
    let obj = Object::from_yaml(b"key: [unclosed\n");
    assert_eq!(obj.error(), Some(ObjectError::DataParse));
}

#[test]
fn toml_document() {
    let toml = b"title = \"demo\"\n\n[server]\nport = 8080\nratio = 2.0\nhosts = [\"a\", \"b\"]\n";
    let obj = Object::from_toml(toml);
    assert_eq!(obj.get("title").as_str(), Some("demo"));
    let server = obj.get("server");
    assert!(server.is_map());
    assert!(server.get("port").is_int_strict());
    assert_eq!(server.get("port").as_i64(), Some(8080));
    let ratio = server.get("ratio");
    assert!(ratio.is_float_strict());
    assert!(ratio.is_int());
    let hosts = server.get("hosts");
    assert_eq!(hosts.index(1).as_str(), Some("b"));
}

#[test]
fn toml_datetimes_are_strings() {
    let toml = b"d = 1979-05-27T07:32:00Z\nday = 1979-05-27\n[when]\nat = 07:32:00\n";
    let obj = Object::from_toml(toml);
    let d = obj.get("d");
    assert_eq!(d.kind(), Some(Kind::String));
    assert_eq!(d.as_str(), Some("1979-05-27T07:32:00Z"));
    assert!(d.keys().is_empty());
    assert_eq!(obj.get("day").as_str(), Some("1979-05-27"));
    let when = obj.get("when");
    assert_eq!(when.get("at").as_str(), Some("07:32:00"));
    assert_eq!(obj.keys().len(), 3);
}

#[test]
fn toml_rejects_non_utf8() {
    let obj = Object::from_toml(&[0xff, 0xfe, b'a']);
    assert_eq!(obj.error(), Some(ObjectError::DataParse));
}

#[test]
fn bson_document() {
    let obj = Object::from_bson(&bson_bytes());
    assert_eq!(obj.get("hello").as_str(), Some("world"));
    assert_eq!(obj.get("n").node(), Some(&Node::Int(Integer::I32(5))));
    assert_eq!(obj.get("x").node(), Some(&Node::Float(Float::F64(1.5))));
    let list = obj.get("list");
    assert_eq!(list.index(0).as_i64(), Some(1));
}

#[test]
fn bson_invalid() {
    let obj = Object::from_bson(b"\x05\x00");
    assert_eq!(obj.error(), Some(ObjectError::DataParse));
}

// ============================================================================
// Auto-detection
// ============================================================================

#[test]
fn detect_prefers_json() {
    let (format, node) = detect(br#"{"a": 1}"#).unwrap();
    assert_eq!(format, Format::Json);
    assert_eq!(node.kind(), Kind::Mapping);
}

#[test]
fn detect_falls_back_to_yaml() {
    let (format, node) = detect(b"a: 1\nb: [x, y]\n").unwrap();
    assert_eq!(format, Format::Yaml);
    let obj = Object::from_node(&node);
    let b = obj.get("b");
    assert_eq!(b.index(0).as_str(), Some("x"));
}

#[test]
fn detect_reaches_bson() {
    let (format, node) = detect(&bson_bytes()).unwrap();
    assert_eq!(format, Format::Bson);
    assert_eq!(Object::from_node(&node).get("hello").as_str(), Some("world"));
}

#[test]
fn from_data_matches_detect() {
    let obj = Object::from_data(b"[3, 2, 1]");
    assert!(obj.is_sequence());
    assert_eq!(obj.index(2).as_i64(), Some(1));
}

#[test]
fn from_data_all_formats_fail() {
    // Invalid UTF-8 and no valid BSON length prefix.
    let obj = Object::from_data(&[0xff, 0x00, 0xfe]);
    assert!(!obj.exists());
    assert_eq!(obj.error(), Some(ObjectError::DataParse));
}

#[test]
fn from_format_uses_named_decoder_only() {
    // Valid YAML, but not JSON.
    let obj = Object::from_format(Format::Json, b"a: 1\n");
    assert_eq!(obj.error(), Some(ObjectError::DataParse));
    let obj = Object::from_format(Format::Yaml, b"a: 1\n");
    assert_eq!(obj.get("a").as_i64(), Some(1));
}

// ============================================================================
// Format names
// ============================================================================

#[test]
fn format_from_str() {
    assert_eq!("json".parse::<Format>(), Ok(Format::Json));
    assert_eq!("YAML".parse::<Format>(), Ok(Format::Yaml));
    assert_eq!("yml".parse::<Format>(), Ok(Format::Yaml));
    assert_eq!("toml".parse::<Format>(), Ok(Format::Toml));
    assert_eq!("bson".parse::<Format>(), Ok(Format::Bson));
    assert!("xml".parse::<Format>().is_err());
}

#[test]
fn format_display_round_trips() {
    for format in Format::DETECTION_ORDER {
        assert_eq!(format.to_string().parse::<Format>(), Ok(format));
    }
}
