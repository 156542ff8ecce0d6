use std::path::PathBuf;

use bindom::dom::FieldPath;

use crate::cmd::util::{InputArgs, emit_json, load, parse_literal, write_file};
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long = "set", value_name = "PATH=VALUE", required = true)]
	pub assignments: Vec<String>,
	#[arg(short = 'o', long = "out")]
	pub out: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Assign values by field path, rebuild, and write the result.
///
/// Assignments apply in order. Trailing bytes past the parsed prefix are
/// copied through unchanged. Array counts are not recomputed from patched
/// members.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args {
		input,
		assignments,
		out,
		json,
	} = args;
	let mut loaded = load(&input)?;

	for assignment in &assignments {
		let (path_expr, literal) = assignment.split_once('=').ok_or_else(|| CliError::InvalidAssignment {
			input: assignment.clone(),
			reason: "expected PATH=VALUE".to_owned(),
		})?;
		let path = FieldPath::parse(path_expr)?;
		let node = loaded.root.at_mut(&path)?;
		let value = parse_literal(node, literal)?;
		node.set_value(value)?;
		tracing::debug!(path = %path, "applied assignment");
	}

	let mut bytes = loaded.root.build(&loaded.options)?;
	let built = bytes.len();
	bytes.extend_from_slice(&loaded.data[loaded.consumed..]);
	write_file(&out, &bytes)?;

	if json {
		return emit_json(&PatchJson {
			out: out.display().to_string(),
			assignments: assignments.len(),
			built,
			written: bytes.len(),
		});
	}

	println!("applied {} assignment(s)", assignments.len());
	println!("wrote {} bytes to {}", bytes.len(), out.display());
	Ok(())
}

#[derive(serde::Serialize)]
struct PatchJson {
	out: String,
	assignments: usize,
	built: usize,
	written: usize,
}
