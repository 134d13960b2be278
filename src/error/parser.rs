#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct ParseError {
	line:   usize,
	r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(line: usize, r#type: ParseErrorType) -> Self { Self { line, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn r#type(&self) -> &ParseErrorType { &self.r#type }
}

#[derive(Debug, PartialEq)]
pub enum ParseErrorType {
	/// A specific token was required here.
	Expected { expected: &'static str, found: String },
	/// Nothing that can start a statement.
	InvalidStatement(String),
	/// Not an identifier, constant or parenthesised expression.
	InvalidFactor(String),
	/// Not one of `==`, `<`, `<=`.
	InvalidComparison(String),
	UnterminatedParenthesis,
	/// Tokens after the closing `end`.
	TrailingTokens(String),
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			Expected { expected, found } => {
				write!(f, "Expected {expected}, found {found}")
			}
			InvalidStatement(found) => {
				write!(f, "Invalid statement starting with {found}")
			}
			InvalidFactor(found) => {
				write!(f, "Factor must be an identifier, a constant, or a parenthesised expression, found {found}")
			}
			InvalidComparison(found) => {
				write!(f, "Invalid comparison operator {found}")
			}
			UnterminatedParenthesis => {
				write!(f, "Unterminated parenthesis")
			}
			TrailingTokens(found) => {
				write!(f, "Invalid tokens after program end, found {found}")
			}
		}
	}
}
