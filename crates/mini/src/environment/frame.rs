//! Scope frames stored in the environment arena

use indexmap::IndexMap;

use super::Binding;

/// Index of a frame in the environment arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    /// Arena index of this frame.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One lexical scope: its own bindings plus a link to the enclosing scope.
///
/// The parent link is only followed for lookup and assignment; a frame
/// never changes its parent's set of names.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Bindings in declaration order
    pub(crate) bindings: IndexMap<String, Binding>,

    /// Enclosing frame, `None` only for the prelude
    pub(crate) parent: Option<FrameId>,

    /// Set when a closure (or a closure in a descendant) holds this frame
    pub(crate) captured: bool,
}

impl Frame {
    pub(crate) fn new(parent: Option<FrameId>) -> Self {
        Self {
            bindings: IndexMap::new(),
            parent,
            captured: false,
        }
    }

    /// Number of bindings in this frame.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the frame has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
