/// Scanner related errors
#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
	/// Internal compiler error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered during scanning
	#[error(transparent)]
	ScanError(#[from] ScanError),
}

/// A specific scanning error with line number and type.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct ScanError {
	/// The line number where the error occurred.
	line:   usize,
	/// The type of scanning error.
	r#type: ScanErrorType,
}

impl ScanError {
	pub fn new(line: usize, r#type: ScanErrorType) -> Self { Self { line, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn r#type(&self) -> &ScanErrorType { &self.r#type }
}

/// Types of scanning errors.
#[derive(Debug, PartialEq)]
pub enum ScanErrorType {
	/// A constant written with more than four digits.
	ConstantTooLong(String),
	/// A constant outside `0..=1023`.
	ConstantOutOfRange(i32),
	/// Error for unexpected characters.
	UnexpectedCharacter(char),
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			ConstantTooLong(digits) => {
				write!(f, "Constants can have a maximum of 4 digits, found '{digits}'")
			}
			ConstantOutOfRange(value) => {
				write!(f, "Constants must be in the range 0-1023, found {value}")
			}
			UnexpectedCharacter(c) => {
				write!(f, "invalid token '{c}'")
			}
		}
	}
}
