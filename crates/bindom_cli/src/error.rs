use std::path::PathBuf;

use bindom::dom::BindomError;
use thiserror::Error;

/// Errors surfaced by the `bindom` command-line driver.
#[derive(Debug, Error)]
pub enum CliError {
	/// Parse, build, or tree access failed in the document model.
	#[error(transparent)]
	Dom(#[from] BindomError),
	/// Reading or writing a file failed.
	#[error("failed to access {}: {source}", .path.display())]
	Io {
		/// File being accessed.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},
	/// JSON input or output failed.
	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
	/// Layout declaration is well-formed JSON but describes an invalid tree.
	#[error("invalid layout: {reason}")]
	Layout {
		/// Human-readable validation failure.
		reason: String,
	},
	/// `--set` argument could not be applied.
	#[error("invalid assignment {input:?}: {reason}")]
	InvalidAssignment {
		/// Raw `path=value` argument.
		input: String,
		/// Human-readable failure.
		reason: String,
	},
	/// Rebuilt bytes differ from the consumed input.
	#[error("rebuilt bytes differ from input at offset {offset}")]
	RoundTripMismatch {
		/// First differing byte offset.
		offset: usize,
	},
}
