use bindom_testkit::scratch_path;

use super::first_mismatch;
use crate::cmd::test_support::{fixture_path, run_bindom, run_bindom_json};

#[test]
fn sample_rebuilds_byte_for_byte() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");
	let json = run_bindom_json(&["roundtrip", &layout, &data, "--json"]);

	assert_eq!(json["consumed"], 32);
	assert_eq!(json["built"], 32);
	assert_eq!(json["trailing"], 0);
	assert_eq!(json["matches"], true);
	assert!(json.get("mismatch_offset").is_none());
}

#[test]
fn trailing_bytes_are_reported_not_compared() {
	let mut bytes = std::fs::read(fixture_path("sample.bin")).expect("fixture readable");
	bytes.extend_from_slice(&[0xAA, 0xBB]);
	let data = scratch_path("trailing.bin");
	std::fs::write(&data, &bytes).expect("scratch writable");

	let layout = fixture_path("sample.layout.json");
	let data = data.to_string_lossy().into_owned();
	let output = run_bindom(&["roundtrip", &layout, &data]);

	assert!(output.status.success(), "roundtrip should succeed");
	let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
	assert!(stdout.contains("trailing: 2"));
	assert!(stdout.contains("matches: true"));
}

#[test]
fn first_mismatch_finds_offset_or_length_difference() {
	assert_eq!(first_mismatch(&[1, 2, 3], &[1, 2, 3]), None);
	assert_eq!(first_mismatch(&[1, 2, 3], &[1, 9, 3]), Some(1));
	assert_eq!(first_mismatch(&[1, 2, 3], &[1, 2]), Some(2));
}
