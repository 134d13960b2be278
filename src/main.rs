use std::process::ExitCode;

use palc::Parser;
use zcore::cli::*;

/// Install a stderr subscriber, only when `RUST_LOG` asks for one, so program
/// output on stdout stays clean.
fn init_tracing() {
	use tracing_subscriber::{EnvFilter, fmt, prelude::*};

	if std::env::var("RUST_LOG").is_ok() {
		tracing_subscriber::registry()
			.with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
			.with(EnvFilter::from_default_env())
			.init();
	}
}

fn main() -> ExitCode {
	init_tracing();
	let corer = zcore::Corer;

	let result = match Cli::parse().mode {
		Mode::Run { program, data } => corer.run_file(&program, &data),
		Mode::Check { program } => corer.check_file(&program),
	};
	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{e}");
			ExitCode::FAILURE
		}
	}
}
