use crate::cmd::util::{InputArgs, emit_json, load};
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long)]
	pub json: bool,
}

/// Parse a data file, rebuild it, and compare against the consumed prefix.
///
/// Bytes after the parsed prefix are reported as trailing and not compared.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args { input, json } = args;
	let loaded = load(&input)?;
	let built = loaded.root.build(&loaded.options)?;

	let original = &loaded.data[..loaded.consumed];
	let mismatch = first_mismatch(original, &built);
	let trailing = loaded.data.len() - loaded.consumed;

	if json {
		emit_json(&RoundtripJson {
			data: input.data.display().to_string(),
			consumed: loaded.consumed,
			built: built.len(),
			trailing,
			matches: mismatch.is_none(),
			mismatch_offset: mismatch,
		})?;
	} else {
		println!("data: {}", input.data.display());
		println!("consumed: {}", loaded.consumed);
		println!("built: {}", built.len());
		println!("trailing: {trailing}");
		println!("matches: {}", mismatch.is_none());
	}

	match mismatch {
		Some(offset) => Err(CliError::RoundTripMismatch { offset }),
		None => Ok(()),
	}
}

fn first_mismatch(original: &[u8], built: &[u8]) -> Option<usize> {
	original
		.iter()
		.zip(built)
		.position(|(a, b)| a != b)
		.or_else(|| (original.len() != built.len()).then(|| original.len().min(built.len())))
}

#[derive(serde::Serialize)]
struct RoundtripJson {
	data: String,
	consumed: usize,
	built: usize,
	trailing: usize,
	matches: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	mismatch_offset: Option<usize>,
}

#[cfg(test)]
mod tests;
