use crate::cmd::test_support::{fixture_path, run_bindom, run_bindom_json};

#[test]
fn parse_json_reports_tree() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");
	let json = run_bindom_json(&["parse", &layout, &data, "--json"]);

	assert_eq!(json["size"], 32);
	assert_eq!(json["consumed"], 32);
	assert_eq!(json["endian"], "big");

	let members = json["root"]["children"].as_array().expect("root members");
	let names: Vec<_> = members.iter().map(|item| item["name"].as_str().unwrap_or_default()).collect();
	assert_eq!(names, ["magic", "version", "count", "values", "title", "label", "trailer"]);

	assert_eq!(members[0]["value"], 0x4244_4F4D_u32);
	assert_eq!(members[1]["value"], 2);
	assert_eq!(members[3]["children"][1]["name"], "values[1]");
	assert_eq!(members[3]["children"][1]["value"], -2);
	assert_eq!(members[3]["children"][2]["value"], 300);
	assert_eq!(members[4]["value"], "hi");
	assert_eq!(members[5]["value"], "A");
	assert_eq!(members[6]["children"][0]["value"], 0x0102);
	assert_eq!(members[6]["children"][1]["value"], 1.5);
}

#[test]
fn parse_text_lists_members() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");
	let output = run_bindom(&["parse", &layout, &data]);

	assert!(output.status.success(), "parse command should succeed");
	let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
	assert!(stdout.contains("consumed: 32 of 32 bytes"));
	assert!(stdout.contains("  values: array[3]"));
	assert!(stdout.contains("    values[2]: int = 300"));
	assert!(stdout.contains("  title: string = \"hi\""));
}

#[test]
fn little_flag_changes_global_default() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");
	let json = run_bindom_json(&["parse", &layout, &data, "--json", "--little"]);

	assert_eq!(json["endian"], "little");
	let members = json["root"]["children"].as_array().expect("root members");
	assert_eq!(members[0]["value"], 0x4D4F_4442_u32);
	assert_eq!(members[1]["value"], 2);
}

#[test]
fn parse_fails_without_string_terminator() {
	let layout = fixture_path("sample.layout.json");
	let output = run_bindom(&["parse", &layout, &layout]);

	assert!(!output.status.success(), "layout text has no NUL byte to end the title");
	let stderr = String::from_utf8(output.stderr).expect("stderr is utf8");
	assert!(stderr.starts_with("error: "), "unexpected stderr: {stderr}");
}

#[test]
fn max_array_limits_parsed_counts() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");

	let output = run_bindom(&["parse", &layout, &data, "--max-array", "2"]);
	assert!(!output.status.success(), "three values exceed a limit of two");
	let stderr = String::from_utf8(output.stderr).expect("stderr is utf8");
	assert!(stderr.contains("invalid array count for values"), "unexpected stderr: {stderr}");

	let json = run_bindom_json(&["parse", &layout, &data, "--json", "--max-array", "3"]);
	assert_eq!(json["consumed"], 32);
}
