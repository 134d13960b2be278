use std::fmt::Display;

use super::heap::Handle;
use crate::{parser::expression::CompareOp, statement::VarKind};

/// What a name is bound to at run time. The variant never changes after
/// declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Binding {
	/// May hold `Null` once a read through an unset reference is stored.
	Int(Value),
	/// `None` until the variable is pointed at a heap cell.
	Ref(Option<Handle>),
}

impl Binding {
	/// The value a fresh declaration starts with.
	pub fn declare(kind: VarKind) -> Self {
		match kind {
			VarKind::Int => Binding::Int(Value::Int(0)),
			VarKind::Ref => Binding::Ref(None),
		}
	}

	pub fn kind(&self) -> VarKind {
		match self {
			Binding::Int(_) => VarKind::Int,
			Binding::Ref(_) => VarKind::Ref,
		}
	}
}

/// Value represents the result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Value {
	Int(i32),
	/// Read through a reference that was never pointed at a cell.
	Null,
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Int(n) => write!(f, "{n}"),
			Value::Null => write!(f, "null"),
		}
	}
}

impl Value {
	/// Adds two values, wrapping on overflow. `Null` absorbs.
	pub fn plus(self, other: Self) -> Value { self.arithmetic(other, i32::wrapping_add) }

	/// Subtracts two values, wrapping on overflow. `Null` absorbs.
	pub fn minus(self, other: Self) -> Value { self.arithmetic(other, i32::wrapping_sub) }

	/// Multiplies two values, wrapping on overflow. `Null` absorbs.
	pub fn star(self, other: Self) -> Value { self.arithmetic(other, i32::wrapping_mul) }

	/// Compares two values, `None` if either side is `Null`.
	pub fn compare(self, operator: CompareOp, other: Self) -> Option<bool> {
		match (self, other) {
			(Value::Int(l), Value::Int(r)) => Some(match operator {
				CompareOp::Equal => l == r,
				CompareOp::Less => l < r,
				CompareOp::LessEqual => l <= r,
			}),
			_ => None,
		}
	}

	fn arithmetic(self, other: Self, op: fn(i32, i32) -> i32) -> Value {
		match (self, other) {
			(Value::Int(l), Value::Int(r)) => Value::Int(op(l, r)),
			_ => Value::Null,
		}
	}
}
