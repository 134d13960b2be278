use std::{
	fs::read_to_string,
	io::{BufWriter, Write, stdout},
	path::Path,
};

use anyhow::Context;

use crate::{
	CoreError,
	checker::Checker,
	interpreter::{
		Interpreter,
		input::{DataFile, InputSource},
	},
	parser::Parser,
	scanner::Scanner,
	statement::Program,
};

/// Corer drives a Core program through scanning, parsing, checking and
/// execution.
pub struct Corer;

impl Corer {
	/// Run the program at `program`, feeding `input` statements from the data
	/// file at `data` and printing to stdout.
	///
	/// The program is fully checked before the data file is looked at, so a
	/// broken program is reported ahead of a broken data file.
	pub fn run_file<P: AsRef<Path>, D: AsRef<Path>>(&self, program: P, data: D) -> Result<(), CoreError> {
		let source = read_to_string(program).context("Failed open program file")?;
		let program = self.analyse(&source)?;
		let data = read_to_string(data).context("Failed open data file")?;
		let input = DataFile::parse(&data)?;
		self.execute(&program, input, BufWriter::new(stdout().lock()))
	}

	/// Scan, parse and check the program at `program` without running it.
	pub fn check_file<P: AsRef<Path>>(&self, program: P) -> Result<(), CoreError> {
		let source = read_to_string(program).context("Failed open program file")?;
		self.check(&source)
	}

	/// Run `source` in-process against any input source and output sink.
	pub fn run(&self, source: &str, input: impl InputSource, output: impl Write) -> Result<(), CoreError> {
		let program = self.analyse(source)?;
		self.execute(&program, input, output)
	}

	/// Scan, parse and check `source`.
	pub fn check(&self, source: &str) -> Result<(), CoreError> { self.analyse(source).map(|_| ()) }
}

impl Corer {
	fn analyse<'a>(&self, source: &'a str) -> Result<Program<'a>, CoreError> {
		let tokens = Scanner::new(source).scan_tokens()?;
		tracing::debug!(tokens = tokens.len(), "scanned program");
		let program = Parser::new(tokens).parse()?;
		tracing::debug!(
			globals = program.declarations.len(),
			functions = program.functions.len(),
			statements = program.body.len(),
			"parsed program"
		);
		Checker::new().check(&program)?;
		Ok(program)
	}

	fn execute<'a>(
		&self,
		program: &'a Program<'a>,
		input: impl InputSource,
		output: impl Write,
	) -> Result<(), CoreError> {
		let mut interpreter = Interpreter::new(input, output);
		interpreter.interpret(program)?;
		Ok(())
	}
}
