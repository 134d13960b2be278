//! Expression AST nodes
//!
//! The three levels mirror the grammar exactly. Both `expr` and `term` recurse
//! on their right operand, so `9 - 4 - 2` is `9 - (4 - 2)`.

use crate::statement::Ident;

/// `cond := cmpr ('or' cond)? | '!' '(' cond ')'`
#[derive(Debug)]
pub(crate) enum Condition<'a> {
	Comparison(Comparison<'a>),
	/// The right side is only evaluated when the comparison is false.
	Or(Comparison<'a>, Box<Condition<'a>>),
	Not(Box<Condition<'a>>),
}

#[derive(Debug)]
pub(crate) struct Comparison<'a> {
	pub left:     Expression<'a>,
	pub operator: CompareOp,
	pub right:    Expression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CompareOp {
	Equal,
	Less,
	LessEqual,
}

/// `expr := term (('+' | '-') expr)?`
#[derive(Debug)]
pub(crate) enum Expression<'a> {
	Term(Term<'a>),
	Binary { left: Term<'a>, operator: AddOp, right: Box<Expression<'a>> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AddOp {
	Plus,
	Minus,
}

/// `term := factor ('*' term)?`
#[derive(Debug)]
pub(crate) enum Term<'a> {
	Factor(Factor<'a>),
	Product { left: Factor<'a>, right: Box<Term<'a>> },
}

/// `factor := id | const | '(' expr ')'`
#[derive(Debug)]
pub(crate) enum Factor<'a> {
	Variable(Ident<'a>),
	Constant(i32),
	Grouping(Box<Expression<'a>>),
}

impl std::fmt::Display for Condition<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Condition::Comparison(comparison) => write!(f, "{comparison}"),
			Condition::Or(comparison, rest) => write!(f, "(or {comparison} {rest})"),
			Condition::Not(inner) => write!(f, "(! {inner})"),
		}
	}
}

impl std::fmt::Display for Comparison<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let operator = match self.operator {
			CompareOp::Equal => "==",
			CompareOp::Less => "<",
			CompareOp::LessEqual => "<=",
		};
		write!(f, "({operator} {} {})", self.left, self.right)
	}
}

impl std::fmt::Display for Expression<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Expression::Term(term) => write!(f, "{term}"),
			Expression::Binary { left, operator: AddOp::Plus, right } => write!(f, "(+ {left} {right})"),
			Expression::Binary { left, operator: AddOp::Minus, right } => write!(f, "(- {left} {right})"),
		}
	}
}

impl std::fmt::Display for Term<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Term::Factor(factor) => write!(f, "{factor}"),
			Term::Product { left, right } => write!(f, "(* {left} {right})"),
		}
	}
}

impl std::fmt::Display for Factor<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Factor::Variable(ident) => write!(f, "{ident}"),
			Factor::Constant(value) => write!(f, "{value}"),
			Factor::Grouping(expression) => write!(f, "(group {expression})"),
		}
	}
}
