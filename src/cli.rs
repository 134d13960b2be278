use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(
	name = "zcore",
	after_long_help = "Interpreter for Core, a small imperative teaching language. Set RUST_LOG to trace a run."
)]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Check and run a program, reading `input` values from a data file
	Run { program: PathBuf, data: PathBuf },
	/// Check a program without running it
	Check { program: PathBuf },
}
