use crate::cmd::util::{FieldJson, InputArgs, emit_json, load, print_field};
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long)]
	pub json: bool,
}

/// Parse a data file against a layout and print the resulting tree.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args { input, json } = args;
	let loaded = load(&input)?;

	if json {
		let payload = ParseJson {
			layout: input.layout.display().to_string(),
			data: input.data.display().to_string(),
			endian: loaded.options.endian.as_str(),
			size: loaded.data.len(),
			consumed: loaded.consumed,
			root: FieldJson::from_field(&loaded.root),
		};
		return emit_json(&payload);
	}

	println!("layout: {}", input.layout.display());
	println!("data: {}", input.data.display());
	println!("endian: {}", loaded.options.endian.as_str());
	println!("consumed: {} of {} bytes", loaded.consumed, loaded.data.len());
	print_field(&loaded.root, 0);
	Ok(())
}

#[derive(serde::Serialize)]
struct ParseJson {
	layout: String,
	data: String,
	endian: &'static str,
	size: usize,
	consumed: usize,
	root: FieldJson,
}

#[cfg(test)]
mod tests;
