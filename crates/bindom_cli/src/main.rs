#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod error;
mod layout;

use error::CliError;

#[derive(Parser)]
#[command(name = "bindom", about = "Parse, inspect, and rebuild binary files from declarative layouts")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Parse(cmd::parse::Args),
	Roundtrip(cmd::roundtrip::Args),
	Get(cmd::get::Args),
	Patch(cmd::patch::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.with_ansi(false)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), CliError> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Parse(args) => cmd::parse::run(args),
		Commands::Roundtrip(args) => cmd::roundtrip::run(args),
		Commands::Get(args) => cmd::get::run(args),
		Commands::Patch(args) => cmd::patch::run(args),
	}
}
