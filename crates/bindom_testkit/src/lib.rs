//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static SCRATCH_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Fresh file path under `<target>/scratch` for tests that write output.
///
/// Each call yields a distinct path so tests can run in parallel.
pub fn scratch_path(name: &str) -> PathBuf {
	let dir = target_dir().join("scratch");
	std::fs::create_dir_all(&dir).unwrap_or_else(|err| panic!("create scratch dir {}: {err}", dir.display()));
	let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
	dir.join(format!("{}-{seq}-{name}", std::process::id()))
}
