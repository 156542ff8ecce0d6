use crate::dom::{BindomError, Str, WStr};

#[test]
fn string_parse_strips_terminator() {
	let mut text = Str::new();
	let mut reader: &[u8] = b"hi\0";
	let consumed = text.parse(&mut reader).expect("string parses");
	assert_eq!(consumed, 3);
	assert_eq!(text, "hi");
	assert_eq!(text.encode(), b"hi\0");
}

#[test]
fn string_parse_stops_at_first_terminator() {
	let mut text = Str::new();
	let mut reader: &[u8] = b"one\0two\0";
	assert_eq!(text.parse(&mut reader).expect("string parses"), 4);
	assert_eq!(text, "one");
	assert_eq!(reader, b"two\0");
}

#[test]
fn empty_string_is_just_terminator() {
	let mut text = Str::new().with_value("stale");
	let mut reader: &[u8] = &[0];
	assert_eq!(text.parse(&mut reader).expect("empty string parses"), 1);
	assert!(text.bytes().is_empty());
	assert_eq!(Str::new().encode(), [0]);
}

#[test]
fn string_keeps_non_utf8_bytes() {
	let mut text = Str::new();
	let mut reader: &[u8] = &[0xFF, 0x80, 0x00];
	text.parse(&mut reader).expect("string parses");
	assert_eq!(text.bytes(), [0xFF, 0x80]);
	assert_eq!(text.encode(), [0xFF, 0x80, 0x00]);
}

#[test]
fn unterminated_string_fails_and_keeps_value() {
	let mut text = Str::new().with_value("keep");
	let mut reader: &[u8] = b"abc";
	let err = text.parse(&mut reader).expect_err("unterminated input should fail");
	assert!(matches!(err, BindomError::PrematureEndOfInput { need: 4, got: 3 }));
	assert_eq!(text, "keep");
}

#[test]
fn embedded_terminator_does_not_round_trip() {
	let text = Str::new().with_value(b"a\0b".to_vec());
	let bytes = text.encode();
	let mut parsed = Str::new();
	parsed.parse(&mut bytes.as_slice()).expect("string parses");
	assert_eq!(parsed, "a");
}

#[test]
fn wide_string_decodes_utf16le() {
	let mut text = WStr::new();
	let mut reader: &[u8] = &[0x41, 0x00, 0x00, 0x00];
	let consumed = text.parse(&mut reader).expect("wide string parses");
	assert_eq!(consumed, 4);
	assert_eq!(text, "A");
}

#[test]
fn wide_string_round_trips_surrogate_pairs() {
	let text = WStr::new().with_value("h\u{e9}llo \u{1F600}");
	let bytes = text.encode();
	assert_eq!(&bytes[bytes.len() - 2..], [0, 0]);

	let mut parsed = WStr::new();
	let consumed = parsed.parse(&mut bytes.as_slice()).expect("wide string parses");
	assert_eq!(consumed, bytes.len());
	assert_eq!(parsed, text);
}

#[test]
fn wide_string_rejects_lone_surrogate() {
	let mut text = WStr::new().with_value("keep");
	let mut reader: &[u8] = &[0x00, 0xD8, 0x00, 0x00];
	assert!(matches!(text.parse(&mut reader), Err(BindomError::InvalidUtf16)));
	assert_eq!(text, "keep");
}

#[test]
fn wide_string_short_unit_fails() {
	let mut text = WStr::new();
	let mut reader: &[u8] = &[0x41, 0x00, 0x00];
	let err = text.parse(&mut reader).expect_err("half unit should fail");
	assert!(matches!(err, BindomError::PrematureEndOfInput { need: 4, got: 3 }));
}
