use bindom::dom::{ArrayWidth, CodecOptions, Endianness, NumberKind, Value};

use super::Layout;
use crate::error::CliError;

fn layout(json: &str) -> Layout {
	serde_json::from_str(json).expect("layout json deserializes")
}

#[test]
fn codec_options_follow_declared_defaults() {
	let item = layout(r#"{ "endian": "little", "overrides": { "ushort": "big" }, "fields": [] }"#);
	let options = item.codec_options().expect("options resolve");
	assert_eq!(options.endian, Endianness::Little);
	assert_eq!(options.resolve(NumberKind::UShort, None), Endianness::Big);
	assert_eq!(options.resolve(NumberKind::Int, None), Endianness::Little);
}

#[test]
fn missing_endian_defaults_to_big() {
	let item = layout(r#"{ "fields": [] }"#);
	assert_eq!(item.codec_options().expect("options resolve").endian, Endianness::Big);
}

#[test]
fn unknown_override_kind_is_rejected() {
	let item = layout(r#"{ "overrides": { "quad": "big" }, "fields": [] }"#);
	assert!(matches!(item.codec_options(), Err(CliError::Layout { .. })));
}

#[test]
fn root_builds_nested_tree() {
	let item = layout(
		r#"{
			"fields": [
				{ "name": "n", "type": "uchar" },
				{ "name": "vals", "type": "array", "count": "n", "element": { "type": "short", "endian": "little" } },
				{ "name": "fixed", "type": "array", "count": 2, "element": { "type": "string" } },
				{ "name": "tail", "type": "struct", "fields": [ { "name": "w", "type": "wstring" } ] }
			]
		}"#,
	);
	let mut root = item.root().expect("root builds");
	let root_struct = root.as_struct().expect("struct root");
	assert_eq!(root_struct.len(), 4);
	assert_eq!(root_struct["vals"].as_array().expect("array").width(), &ArrayWidth::Member("n".to_owned()));
	assert_eq!(root_struct["fixed"].as_array().expect("array").width(), &ArrayWidth::Count(2));

	let bytes = [2, 1, 0, 2, 0, b'a', 0, b'b', 0, b'Z', 0, 0, 0];
	let consumed = root.parse(&mut &bytes[..], &CodecOptions::default()).expect("data parses");
	assert_eq!(consumed, bytes.len());

	let vals = root.as_struct().expect("struct root")["vals"].value();
	assert_eq!(vals, Value::Array(vec![Value::Int(1), Value::Int(2)]));
}

#[test]
fn invalid_declarations_are_reported() {
	let cases = [
		r#"{ "fields": [ { "type": "int" } ] }"#,
		r#"{ "fields": [ { "name": "x", "type": "quad" } ] }"#,
		r#"{ "fields": [ { "name": "x", "type": "array", "element": { "type": "int" } } ] }"#,
		r#"{ "fields": [ { "name": "x", "type": "array", "count": 1 } ] }"#,
		r#"{ "fields": [ { "name": "x", "type": "string", "endian": "big" } ] }"#,
	];
	for json in cases {
		assert!(matches!(layout(json).root(), Err(CliError::Layout { .. })), "{json}");
	}
}

#[test]
fn unknown_keys_fail_deserialization() {
	let result = serde_json::from_str::<Layout>(r#"{ "fields": [ { "name": "x", "type": "int", "size": 4 } ] }"#);
	assert!(result.is_err());
}
