#[derive(thiserror::Error, Debug)]
/// Errors that can occur during interpretation. All of them end the run.
pub enum InterpreterError {
	/// Internal failures such as a broken output stream.
	#[error("{0:#}")]
	InternalError(#[from] anyhow::Error),
	/// An `input` statement ran after the data file was used up.
	#[error("line {line}: No more input values available in data file for '{name}'")]
	InputExhausted { name: String, line: usize },
	/// Write through a reference that points nowhere, or comparison with a
	/// variable that reads as `null`.
	#[error("line {line}: Can't use null reference '{name}' here")]
	DanglingReference { name: String, line: usize },
	/// Name lookup failed; the checker rules this out for valid programs.
	#[error("Internal error: unbound name '{0}'")]
	UnboundName(String),
}
