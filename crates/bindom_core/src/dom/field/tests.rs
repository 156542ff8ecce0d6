use crate::dom::{Array, BindomError, CodecOptions, Field, FieldKind, FieldPath, Number, NumberKind, Str, Struct, Value, WStr};

#[test]
fn detached_field_has_no_name() {
	let field = Field::from(Number::int());
	assert_eq!(field.name(), None);
	assert_eq!(field.kind_name(), "int");

	let item = Struct::new().with_child("n", field);
	assert_eq!(item["n"].name(), Some("n"));
}

#[test]
fn from_reader_constructs_and_parses() {
	let mut reader: &[u8] = &[0x00, 0x2A, 0xFF];
	let field = Field::from_reader(Number::ushort(), &mut reader, &CodecOptions::default()).expect("field parses");
	assert_eq!(field.value(), Value::UInt(42));
	assert_eq!(reader, [0xFF]);
}

#[test]
fn from_reader_propagates_short_input() {
	let mut reader: &[u8] = &[0x01];
	let err = Field::from_reader(Number::int64(), &mut reader, &CodecOptions::default()).expect_err("short input");
	assert!(matches!(err, BindomError::PrematureEndOfInput { need: 8, got: 1 }));
}

#[test]
fn void_rejects_codec_and_value_operations() {
	let mut field = Field::void();
	assert_eq!(field.value(), Value::Void);
	assert!(matches!(field.parse(&mut &[0_u8][..], &CodecOptions::default()), Err(BindomError::UnsupportedOperation { op: "parse", kind: "void" })));
	assert!(matches!(field.build(&CodecOptions::default()), Err(BindomError::UnsupportedOperation { op: "build", kind: "void" })));
	assert!(matches!(field.set_value(1), Err(BindomError::UnsupportedOperation { op: "set_value", .. })));
}

#[test]
fn void_inside_struct_fails_build() {
	let item = Struct::new().with_child("a", Number::uchar()).with_child("ret", Field::void());
	assert!(matches!(item.build(&CodecOptions::default()), Err(BindomError::UnsupportedOperation { .. })));
}

#[test]
fn unparsed_fields_report_zero_values() {
	assert_eq!(Field::from(Number::double()).value(), Value::Float(0.0));
	assert_eq!(Field::from(Number::char()).value(), Value::Int(0));
	assert_eq!(Field::from(Str::new()).value(), Value::Bytes(Vec::new()));
	assert_eq!(Field::from(WStr::new()).value(), Value::Text(String::new()));
	assert_eq!(Field::from(Array::new(4, Number::int())).value(), Value::Array(Vec::new()));
}

#[test]
fn set_value_coerces_to_kind() {
	let mut number = Field::from(Number::ushort());
	number.set_value(2.75).expect("float into ushort");
	assert_eq!(number.value(), Value::UInt(2));

	let mut narrow = Field::from(Str::new());
	narrow.set_value("text").expect("text into string");
	assert_eq!(narrow.build(&CodecOptions::default()).expect("string builds"), b"text\0");

	let mut wide = Field::from(WStr::new());
	wide.set_value(b"ok".as_slice()).expect("utf-8 bytes into wstring");
	assert_eq!(wide.value(), Value::Text("ok".to_owned()));
}

#[test]
fn set_value_rejects_mismatched_values() {
	let mut number = Field::from(Number::int().with_value(3));
	assert!(matches!(number.set_value("three"), Err(BindomError::TypeMismatch { expected: "number", got: "text" })));
	assert_eq!(number.value(), Value::Int(3));

	let mut wide = Field::from(WStr::new().with_value("keep"));
	assert!(matches!(wide.set_value(vec![0xFF_u8]), Err(BindomError::TypeMismatch { expected: "text", .. })));
	assert_eq!(wide.value(), Value::Text("keep".to_owned()));

	let mut array = Field::from(Array::new(0, Number::int()));
	assert!(matches!(array.set_value(5), Err(BindomError::TypeMismatch { expected: "array", .. })));
}

#[test]
fn set_value_from_copies_semantic_value() {
	let source = Field::from(Number::uint64().with_value(70_000_u32));
	let mut target = Field::from(Number::ushort());
	target.set_value_from(&source).expect("number into number");
	assert_eq!(target.value(), Value::UInt(70_000 % 65_536));

	let text = Field::from(Str::new().with_value("hey"));
	assert!(matches!(target.set_value_from(&text), Err(BindomError::TypeMismatch { .. })));
}

#[test]
fn kind_mut_swaps_number_width() {
	let mut field = Field::from(Number::uchar().with_value(7));
	if let FieldKind::Number(number) = field.kind_mut() {
		*number = Number::new(NumberKind::UShort).with_value(number.scalar());
	}
	assert_eq!(field.build(&CodecOptions::default()).expect("number builds"), [0, 7]);
}

#[test]
fn field_paths_walk_from_root() {
	let mut root = Field::from(Struct::new().with_child("hdr", Struct::new().with_child("id", Number::uint())).with_child("tags", Array::new(2, Str::new())));
	root.parse(&mut &[0_u8, 0, 0, 9, b'a', 0, b'b', 0][..], &CodecOptions::default()).expect("root parses");

	let id = FieldPath::parse("hdr.id").expect("path parses");
	assert_eq!(root.at(&id).expect("hdr.id").value(), Value::UInt(9));

	let tag = FieldPath::parse("tags[1]").expect("path parses");
	root.at_mut(&tag).expect("tags[1]").set_value("zz").expect("assign");
	assert_eq!(root.at(&tag).expect("tags[1]").name(), Some("tags[1]"));
	assert_eq!(root.build(&CodecOptions::default()).expect("root builds"), [0, 0, 0, 9, b'a', 0, b'z', b'z', 0]);
}

#[test]
fn field_paths_report_wrong_kind() {
	let root = Field::from(Struct::new().with_child("n", Number::int()).with_child("list", Array::new(0, Number::int())));

	let into_number = FieldPath::parse("n.x").expect("path parses");
	assert!(matches!(root.at(&into_number), Err(BindomError::TypeMismatch { expected: "struct", got: "int" })));

	let index_struct = FieldPath::parse("n[0]").expect("path parses");
	assert!(matches!(root.at(&index_struct), Err(BindomError::TypeMismatch { expected: "array", got: "int" })));

	let out_of_range = FieldPath::parse("list[0]").expect("path parses");
	assert!(matches!(root.at(&out_of_range), Err(BindomError::IndexOutOfRange { index: 0, len: 0 })));
}
