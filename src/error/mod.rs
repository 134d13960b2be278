pub mod checker;
pub mod data;
pub mod interpreter;
pub mod parser;
pub mod scanner;

/// CoreError is the top-level error type for the Core interpreter.
///
/// Every variant renders as a single line, which is the only diagnostic a
/// failed run produces.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
	/// Internal interpreter error: unreadable files, failed output writes.
	#[error("Internal error: {0:#}")]
	InternalError(#[from] anyhow::Error),
	/// Malformed token in the program source.
	#[error("Syntax error: {0}")]
	ScanError(#[from] scanner::ScanError),
	/// The token stream does not match the grammar.
	#[error("Syntax error: {0}")]
	ParseError(#[from] parser::ParseError),
	/// The program parsed but failed static checking.
	#[error("Semantic error: {0}")]
	SemanticError(#[from] checker::SemanticError),
	/// The data file holds something other than constants.
	#[error("Data file error: {0}")]
	DataError(#[from] data::DataError),
	/// Runtime errors encountered during execution
	#[error("Runtime error: {0}")]
	RuntimeError(#[from] interpreter::InterpreterError),
}
