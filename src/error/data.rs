use super::scanner::ScanError;

/// Errors found while loading the data file that feeds `input` statements.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
	/// The data file contains a malformed token.
	#[error(transparent)]
	ScanError(#[from] ScanError),
	/// The data file contains a well formed token that is not a constant.
	#[error("line {line}: expected a constant, found '{lexeme}'")]
	NotAConstant { line: usize, lexeme: String },
}
