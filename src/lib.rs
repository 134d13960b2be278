//! # Core, a small imperative teaching language
//!
//! A Core program declares global `int` and `ref` variables and functions,
//! then runs a body of statements:
//!
//! ``` text
//! program
//!     int n;
//!     ref total;
//!     define add(acc, k) begin
//!         acc = acc + k;
//!     endfunc
//! begin
//!     total = new;
//!     input n;
//!     while 0 < n begin
//!         add(total, n);
//!         n = n - 1;
//!     endwhile
//!     output total;
//! end
//! ```
//!
//! `int` variables hold a value. `ref` variables hold a handle to a heap cell
//! (or nothing, until `new` or `ref x` gives them one) and read and write
//! through it. Assigning one `ref` to another with `ref` makes them aliases.

//! ## Pipeline
//!
//! - `scanner`: characters to tokens. Whitespace is skipped; constants are
//!   limited to four digits and `0..=1023`.
//! - `parser`: recursive descent from tokens to a `Program`.
//! - `checker`: static checks over the same scope chain the interpreter uses,
//!   so a checked program never fails name resolution at run time.
//! - `interpreter`: walks the tree with an `Environment` of
//!   bindings, a heap, and an [`InputSource`] feeding `input` statements.
//!
//! Every stage reports its first error as a [`CoreError`] that renders as a
//! single line.

pub mod cli;
mod checker;
mod corer;
mod environment;
mod error;
mod interpreter;
mod parser;
mod scanner;
mod statement;

pub use corer::Corer;
pub use error::{
	CoreError,
	checker::{SemanticError, SemanticErrorType},
	data::DataError,
	interpreter::InterpreterError,
	parser::{ParseError, ParseErrorType},
	scanner::{ScanError, ScanErrorType},
};
pub use interpreter::input::{DataFile, InputSource};
