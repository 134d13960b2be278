/// A static error found before the program runs.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct SemanticError {
	line:   usize,
	r#type: SemanticErrorType,
}

impl SemanticError {
	pub fn new(line: usize, r#type: SemanticErrorType) -> Self { Self { line, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn r#type(&self) -> &SemanticErrorType { &self.r#type }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SemanticErrorType {
	DuplicateDeclaration(String),
	DuplicateFunction(String),
	DuplicateParameter { function: String, name: String },
	UndeclaredVariable(String),
	UndefinedFunction(String),
	ArityMismatch { function: String, expected: usize, found: usize },
	/// `x = new` where `x` is an `int`.
	NewOnInt(String),
	/// `x = ref y` where `x` is an `int`.
	RefIntoInt(String),
	/// `x = ref y` where `y` is an `int`.
	RefOfInt(String),
}

impl std::fmt::Display for SemanticErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SemanticErrorType::*;
		match self {
			DuplicateDeclaration(name) => write!(f, "Variable with name '{name}' can't be declared twice"),
			DuplicateFunction(name) => write!(f, "Function with name '{name}' can't be defined twice"),
			DuplicateParameter { function, name } => {
				write!(f, "Parameter '{name}' appears twice in function '{function}'")
			}
			UndeclaredVariable(name) => write!(f, "Attempting to use undeclared variable '{name}'"),
			UndefinedFunction(name) => write!(f, "Attempting to call undefined function '{name}'"),
			ArityMismatch { function, expected, found } => {
				write!(f, "Function '{function}' takes {expected} arguments but was called with {found}")
			}
			NewOnInt(name) => write!(f, "Attempting to new an int variable '{name}'"),
			RefIntoInt(name) => write!(f, "Attempting to store a reference in int variable '{name}'"),
			RefOfInt(name) => write!(f, "Attempting to store a reference to int variable '{name}'"),
		}
	}
}
