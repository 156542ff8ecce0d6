use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use bindom_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static BINDOM_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_path(name: &str) -> String {
	shared_fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_bindom(args: &[&str]) -> Output {
	Command::new(bindom_bin()).args(args).output().expect("bindom command executes")
}

pub(crate) fn run_bindom_json(args: &[&str]) -> serde_json::Value {
	let output = run_bindom(args);
	assert!(
		output.status.success(),
		"bindom command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn bindom_bin() -> &'static PathBuf {
	BINDOM_BIN.get_or_init(resolve_bindom_bin)
}

fn resolve_bindom_bin() -> PathBuf {
	if let Some(path) = option_env!("CARGO_BIN_EXE_bindom") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let mut bin = workspace_target_dir().join("debug");
	bin.push(if cfg!(windows) { "bindom.exe" } else { "bindom" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "bindom"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build bindom binary at {}", bin.display());

	bin
}
