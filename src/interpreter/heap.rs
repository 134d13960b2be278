//! The process-wide store behind `ref` variables.
//!
//! Cells are appended by `new` and live until the run ends; nothing is ever
//! freed or reused, so a handle stays valid forever once issued. Any number of
//! `ref` variables may hold the same handle. A cell holds `Null` after being
//! assigned a read through an unset reference.

use std::fmt::Display;

use super::value::Value;

/// Index of a heap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle(usize);

impl Display for Handle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

#[derive(Debug, Default)]
pub(crate) struct Heap {
	cells: Vec<Value>,
}

impl Heap {
	pub fn new() -> Self { Self::default() }

	/// Append a zeroed cell and hand out its index.
	pub fn allocate(&mut self) -> Handle {
		self.cells.push(Value::Int(0));
		let handle = Handle(self.cells.len() - 1);
		tracing::trace!(%handle, cells = self.len(), "allocated heap cell");
		handle
	}

	pub fn read(&self, handle: Handle) -> Value { self.cells[handle.0] }

	pub fn write(&mut self, handle: Handle, value: Value) { self.cells[handle.0] = value; }

	pub fn len(&self) -> usize { self.cells.len() }
}
