use super::ScopeId;

/// One activation: the scope it was entered with and the block it is in now.
///
/// There is no caller link; frames sit on a stack and returning pops it.
#[derive(Debug)]
pub(super) struct Frame {
	/// The global scope for the top-level frame, the parameter scope otherwise.
	pub root:    ScopeId,
	pub current: ScopeId,
}

impl Frame {
	pub fn new(root: ScopeId) -> Self { Self { root, current: root } }
}
