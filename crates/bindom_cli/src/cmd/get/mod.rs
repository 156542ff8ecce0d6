use bindom::dom::FieldPath;

use crate::cmd::util::{FieldJson, InputArgs, emit_json, load, print_field};
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long = "path")]
	pub path_expr: String,
	#[arg(long)]
	pub json: bool,
}

/// Parse a data file and print the node at one field path.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args { input, path_expr, json } = args;
	let path = FieldPath::parse(&path_expr)?;
	let loaded = load(&input)?;
	let node = loaded.root.at(&path)?;

	if json {
		return emit_json(&GetJson {
			path: path.to_string(),
			node: FieldJson::from_field(node),
		});
	}

	print_field(node, 0);
	Ok(())
}

#[derive(serde::Serialize)]
struct GetJson {
	path: String,
	node: FieldJson,
}

#[cfg(test)]
mod tests;
