//! A Core program is three ordered lists: global declarations, function
//! declarations and the statements between `begin` and `end`. Statement
//! sequences nest inside `if`, `while` and function bodies, each of which
//! gets a fresh scope at run time.

use std::fmt::Display;

use crate::parser::expression::{Condition, Expression};

/// An identifier together with the line it appeared on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ident<'a> {
	pub name: &'a str,
	pub line: usize,
}

impl<'a> Ident<'a> {
	pub fn new(name: &'a str, line: usize) -> Self { Self { name, line } }
}

impl Display for Ident<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name) }
}

/// The two kinds of variable. A variable's kind is fixed at declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum VarKind {
	/// Holds a 32-bit integer directly.
	Int,
	/// Holds a handle into the heap, or nothing.
	Ref,
}

impl Display for VarKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VarKind::Int => write!(f, "int"),
			VarKind::Ref => write!(f, "ref"),
		}
	}
}

#[derive(Debug)]
pub(crate) struct Program<'a> {
	pub declarations: Vec<Declaration<'a>>,
	pub functions:    Vec<Function<'a>>,
	pub body:         Vec<Statement<'a>>,
}

/// `int a, b;` or `ref r;`
#[derive(Debug)]
pub(crate) struct Declaration<'a> {
	pub kind:  VarKind,
	pub names: Vec<Ident<'a>>,
}

#[derive(Debug)]
pub(crate) struct Function<'a> {
	pub name:       Ident<'a>,
	pub parameters: Vec<Ident<'a>>,
	pub body:       Vec<Statement<'a>>,
}

/// A statement in the programming language.
#[derive(Debug)]
pub(crate) enum Statement<'a> {
	Assign {
		target: Ident<'a>,
		value:  AssignValue<'a>,
	},
	If {
		condition:   Condition<'a>,
		then_branch: Vec<Statement<'a>>,
		else_branch: Option<Vec<Statement<'a>>>,
	},
	While {
		condition: Condition<'a>,
		body:      Vec<Statement<'a>>,
	},
	/// Pull the next value from the data file into a variable.
	Input(Ident<'a>),
	/// Print an expression on its own line.
	Output(Expression<'a>),
	/// A block-local declaration.
	VarDeclaration(Declaration<'a>),
	Call {
		name:      Ident<'a>,
		arguments: Vec<Ident<'a>>,
	},
}

/// The right-hand side of `id = ...`.
#[derive(Debug)]
pub(crate) enum AssignValue<'a> {
	/// `id = new;`
	New,
	/// `id = ref other;`
	Ref(Ident<'a>),
	/// `id = expr;`
	Expression(Expression<'a>),
}
