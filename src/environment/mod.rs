//! Scopes and call frames, shared by the checker and the interpreter.
//!
//! Scopes live in one arena and point at their parent by index. Scopes are
//! created and destroyed in strict stack order, so leaving a block is a
//! `Vec::pop`. Index 0 is the global scope and is never popped.
//!
//! A frame is one function activation. Its root is a parameter scope whose
//! parent is always the global scope, never the caller's current scope: a
//! function body sees globals, its parameters and its own locals only. The
//! top-level program runs in the global frame.

mod frame;

use std::collections::HashMap;

use frame::Frame;

use crate::error::interpreter::InterpreterError;

/// Index of a scope in the arena.
type ScopeId = usize;

const GLOBAL_SCOPE: ScopeId = 0;

#[derive(Debug)]
struct Scope<'a, T> {
	variables: HashMap<&'a str, T>,
	outer:     Option<ScopeId>,
}

impl<T> Scope<'_, T> {
	fn new(outer: Option<ScopeId>) -> Self { Self { variables: HashMap::new(), outer } }
}

/// Scope chain plus call stack, generic over what a name is bound to.
#[derive(Debug)]
pub(crate) struct Environment<'a, T> {
	scopes: Vec<Scope<'a, T>>,
	/// The top-level activation, alive for the whole run.
	global: Frame,
	/// Active function calls, innermost last.
	calls:  Vec<Frame>,
}

impl<'a, T> Environment<'a, T> {
	pub fn new() -> Self {
		Self { scopes: vec![Scope::new(None)], global: Frame::new(GLOBAL_SCOPE), calls: Vec::new() }
	}

	/// Bind `name` in the innermost scope, shadowing any outer binding and
	/// overwriting one already in this scope.
	pub fn declare(&mut self, name: &'a str, value: T) {
		let current = self.current();
		self.scopes[current].variables.insert(name, value);
	}

	/// Whether `name` is bound in the innermost scope itself.
	pub fn declared_here(&self, name: &str) -> bool { self.scopes[self.current()].variables.contains_key(name) }

	/// Look `name` up from the innermost scope outwards.
	pub fn get(&self, name: &str) -> Option<&T> {
		let mut scope = Some(self.current());
		while let Some(id) = scope {
			if let Some(value) = self.scopes[id].variables.get(name) {
				return Some(value);
			}
			scope = self.scopes[id].outer;
		}
		None
	}

	/// Rebind `name` in the nearest scope that already declares it.
	pub fn assign(&mut self, name: &str, value: T) -> Result<(), InterpreterError> {
		let mut scope = Some(self.current());
		while let Some(id) = scope {
			if let Some(slot) = self.scopes[id].variables.get_mut(name) {
				*slot = value;
				return Ok(());
			}
			scope = self.scopes[id].outer;
		}
		Err(InterpreterError::UnboundName(name.to_string()))
	}

	/// Enter a block.
	pub fn push_scope(&mut self) {
		let outer = self.current();
		self.scopes.push(Scope::new(Some(outer)));
		self.frame_mut().current = self.scopes.len() - 1;
	}

	/// Leave a block; its bindings become unreachable.
	pub fn pop_scope(&mut self) {
		let frame = self.frame();
		if frame.current == frame.root {
			tracing::error!("attempted to pop the root scope of a frame");
			return;
		}
		let outer = self.scopes.pop().and_then(|scope| scope.outer).unwrap_or(GLOBAL_SCOPE);
		self.frame_mut().current = outer;
	}

	/// Push a frame for a function call. `parameters` are bound, in order, in
	/// a fresh parameter scope whose parent is the global scope.
	pub fn enter_frame(&mut self, parameters: impl IntoIterator<Item = (&'a str, T)>) {
		let mut scope = Scope::new(Some(GLOBAL_SCOPE));
		scope.variables.extend(parameters);
		self.scopes.push(scope);
		self.calls.push(Frame::new(self.scopes.len() - 1));
		tracing::trace!(depth = self.depth(), "entered frame");
	}

	/// Pop the current frame and every scope it still owns, returning to the
	/// caller's frame.
	pub fn leave_frame(&mut self) {
		let Some(frame) = self.calls.pop() else {
			tracing::error!("attempted to leave the global frame");
			return;
		};
		self.scopes.truncate(frame.root);
		tracing::trace!(depth = self.depth(), "left frame");
	}

	/// Number of live frames, the global frame included.
	pub fn depth(&self) -> usize { self.calls.len() + 1 }

	fn current(&self) -> ScopeId { self.frame().current }

	fn frame(&self) -> &Frame { self.calls.last().unwrap_or(&self.global) }

	fn frame_mut(&mut self) -> &mut Frame { self.calls.last_mut().unwrap_or(&mut self.global) }
}
