use crate::cmd::test_support::{fixture_path, run_bindom, run_bindom_json};

#[test]
fn get_resolves_nested_paths() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");

	let json = run_bindom_json(&["get", &layout, &data, "--path", "values[2]", "--json"]);
	assert_eq!(json["path"], "values[2]");
	assert_eq!(json["node"]["name"], "values[2]");
	assert_eq!(json["node"]["kind"], "int");
	assert_eq!(json["node"]["value"], 300);

	let json = run_bindom_json(&["get", &layout, &data, "--path", "trailer.ratio", "--json"]);
	assert_eq!(json["node"]["kind"], "float");
	assert_eq!(json["node"]["value"], 1.5);
}

#[test]
fn get_prints_subtree_as_text() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");
	let output = run_bindom(&["get", &layout, &data, "--path", "trailer"]);

	assert!(output.status.success(), "get command should succeed");
	let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
	assert_eq!(stdout, "trailer: struct\n  flags: ushort = 258\n  ratio: float = 1.5\n");
}

#[test]
fn get_rejects_unknown_members() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");
	let output = run_bindom(&["get", &layout, &data, "--path", "trailer.missing"]);

	assert!(!output.status.success());
	let stderr = String::from_utf8(output.stderr).expect("stderr is utf8");
	assert!(stderr.contains("missing"), "unexpected stderr: {stderr}");
}

#[test]
fn get_rejects_malformed_paths() {
	let layout = fixture_path("sample.layout.json");
	let data = fixture_path("sample.bin");
	let output = run_bindom(&["get", &layout, &data, "--path", "values["]);
	assert!(!output.status.success());
}
