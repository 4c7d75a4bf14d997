//! Runtime environment managing variable and function bindings

mod frame;
mod prelude;

pub use frame::{Frame, FrameId};

use crate::error::EnvironmentError;
use crate::span::Span;
use crate::value::{BuiltinFn, Value};

/// How a binding was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `let x = ...`
    Let,

    /// `const x = ...`: write-once
    Const,

    /// `func x(...) { ... }`
    Function,

    /// Native function from the prelude
    Builtin,
}

impl BindingKind {
    /// Whether `assign` may replace the value.
    pub fn is_assignable(&self) -> bool {
        matches!(self, BindingKind::Let)
    }
}

/// A single variable or function binding.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound value
    pub value: Value,

    /// How the binding was declared
    pub kind: BindingKind,

    /// Where this binding was declared (for error messages)
    pub declared_at: Span,
}

/// The runtime environment managing variable and function bindings.
///
/// Scopes form a chain through parent links. Frames live in an arena and
/// are addressed by [`FrameId`], so closures hold a frame index instead
/// of a reference. Frame 0 is the prelude; frame 1 is the global scope.
///
/// # Example
///
/// ```
/// use mini_lang::{BindingKind, Environment, Span, Value};
///
/// let mut env = Environment::new();
/// let at = Span::default();
///
/// env.define("x", Value::from(1), BindingKind::Let, at).unwrap();
///
/// // Enter a new scope
/// env.push_frame();
/// env.define("y", Value::from(2), BindingKind::Let, at).unwrap();
/// env.define("x", Value::from(10), BindingKind::Let, at).unwrap(); // Shadows outer x
///
/// assert_eq!(env.get("x"), Some(&Value::from(10)));
/// assert_eq!(env.get("y"), Some(&Value::from(2)));
///
/// // Exit scope
/// env.pop_frame();
///
/// assert_eq!(env.get("x"), Some(&Value::from(1)));
/// assert_eq!(env.get("y"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    /// Frame arena
    frames: Vec<Frame>,

    /// Innermost active frame
    current: FrameId,

    /// Released slots available for reuse
    free: Vec<FrameId>,

    /// Current call depth (for recursion limiting)
    call_depth: usize,

    /// Maximum allowed call depth
    max_call_depth: usize,
}

const PRELUDE: FrameId = FrameId(0);
const GLOBAL: FrameId = FrameId(1);

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an environment with an empty prelude and global scope.
    pub fn new() -> Self {
        Self::with_max_call_depth(1000)
    }

    /// Create an environment with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            frames: vec![Frame::new(None), Frame::new(Some(PRELUDE))],
            current: GLOBAL,
            free: Vec::new(),
            call_depth: 0,
            max_call_depth: max_depth,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management (Scope Entry/Exit)
    // ═══════════════════════════════════════════════════════════════════

    /// The global (program top-level) frame.
    pub fn global(&self) -> FrameId {
        GLOBAL
    }

    /// The innermost active frame.
    pub fn current(&self) -> FrameId {
        self.current
    }

    /// Create a new frame whose parent is `parent`, without entering it.
    pub fn child_scope(&mut self, parent: FrameId) -> FrameId {
        let frame = Frame::new(Some(parent));
        match self.free.pop() {
            Some(id) => {
                self.frames[id.0] = frame;
                id
            }
            None => {
                self.frames.push(frame);
                FrameId(self.frames.len() - 1)
            }
        }
    }

    /// Enter a new scope nested in the current one.
    pub fn push_frame(&mut self) -> FrameId {
        let id = self.child_scope(self.current);
        self.current = id;
        id
    }

    /// Exit the current scope.
    ///
    /// Does nothing at global scope.
    pub fn pop_frame(&mut self) {
        if self.current == GLOBAL || self.current == PRELUDE {
            return;
        }
        let popped = self.current;
        if let Some(parent) = self.frames[popped.0].parent {
            self.current = parent;
        }
        self.release(popped);
    }

    /// Make `frame` the active frame, returning the previously active one.
    ///
    /// Used for function calls, whose scope hangs off the closure's frame
    /// rather than the caller's.
    pub fn enter_frame(&mut self, frame: FrameId) -> FrameId {
        std::mem::replace(&mut self.current, frame)
    }

    /// Leave the active frame and reactivate `saved`.
    pub fn restore_frame(&mut self, saved: FrameId) {
        let left = std::mem::replace(&mut self.current, saved);
        if left != saved {
            self.release(left);
        }
    }

    /// Keep `frame` and all its ancestors alive for a closure.
    pub fn mark_captured(&mut self, frame: FrameId) {
        let mut next = Some(frame);
        while let Some(id) = next {
            let frame = &mut self.frames[id.0];
            if frame.captured {
                break;
            }
            frame.captured = true;
            next = frame.parent;
        }
    }

    /// Reclaim a frame that was just exited.
    ///
    /// An uncaptured frame has no captured descendants, and scopes exit
    /// innermost first, so nothing refers to it any more. Its slot is
    /// reused by the next [`child_scope`](Self::child_scope).
    ///
    /// Captured frames are kept for the rest of the session, even after
    /// every closure over them has been dropped.
    fn release(&mut self, frame: FrameId) {
        if frame.0 <= GLOBAL.0 || self.frames[frame.0].captured {
            return;
        }
        if frame.0 + 1 == self.frames.len() {
            self.frames.pop();
        } else {
            self.frames[frame.0] = Frame::default();
            self.free.push(frame);
        }
    }

    /// Borrow a live frame.
    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        if self.free.contains(&id) {
            return None;
        }
        self.frames.get(id.0)
    }

    /// Number of live frames in the arena.
    pub fn frame_count(&self) -> usize {
        self.frames.len() - self.free.len()
    }

    /// Number of frames in the active scope chain, excluding the prelude.
    pub fn depth(&self) -> usize {
        self.chain(self.current).count() - 1
    }

    /// Check if we're at global scope.
    pub fn is_global_scope(&self) -> bool {
        self.current == GLOBAL
    }

    fn chain(&self, start: FrameId) -> impl Iterator<Item = FrameId> + '_ {
        std::iter::successors(Some(start), move |id| self.frames[id.0].parent)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call Depth Tracking (Stack Overflow Protection)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a function call. Returns error if max depth exceeded.
    pub fn enter_call(&mut self) -> Result<(), EnvironmentError> {
        if self.call_depth >= self.max_call_depth {
            return Err(EnvironmentError::StackOverflow {
                depth: self.call_depth,
                max: self.max_call_depth,
            });
        }
        self.call_depth += 1;
        Ok(())
    }

    /// Exit a function call.
    pub fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// Get current call depth.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Define a new binding in the current scope.
    ///
    /// # Errors
    ///
    /// `AlreadyDeclared` if the name is already bound in this same frame.
    /// Names in enclosing frames are shadowed, not rejected.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        value: Value,
        kind: BindingKind,
        span: Span,
    ) -> Result<(), EnvironmentError> {
        self.define_in(self.current, name, value, kind, span)
    }

    /// Define a new binding in a specific frame.
    pub fn define_in(
        &mut self,
        frame: FrameId,
        name: impl Into<String>,
        value: Value,
        kind: BindingKind,
        span: Span,
    ) -> Result<(), EnvironmentError> {
        let name = name.into();
        let bindings = &mut self.frames[frame.0].bindings;
        if let Some(existing) = bindings.get(&name) {
            return Err(EnvironmentError::AlreadyDeclared {
                name,
                span,
                previous: existing.declared_at,
            });
        }
        bindings.insert(
            name,
            Binding {
                value,
                kind,
                declared_at: span,
            },
        );
        Ok(())
    }

    /// Register a built-in function in the prelude frame.
    pub fn define_builtin(&mut self, builtin: BuiltinFn) {
        let name = builtin.name.clone();
        self.frames[PRELUDE.0].bindings.insert(
            name,
            Binding {
                value: Value::Builtin(builtin),
                kind: BindingKind::Builtin,
                declared_at: Span::default(),
            },
        );
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Find the innermost frame owning `name`.
    fn resolve(&self, name: &str) -> Option<FrameId> {
        self.chain(self.current)
            .find(|id| self.frames[id.0].bindings.contains_key(name))
    }

    /// Look up a binding's value by name, walking outwards from the
    /// current frame.
    ///
    /// # Errors
    ///
    /// `Undeclared` if no frame in the chain owns the name.
    pub fn lookup(&self, name: &str, span: Span) -> Result<&Value, EnvironmentError> {
        self.get(name).ok_or_else(|| EnvironmentError::Undeclared {
            name: name.to_string(),
            span,
        })
    }

    /// Look up a binding's value, or `None` if not found.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.get_binding(name).map(|b| &b.value)
    }

    /// Look up a binding and return the full Binding struct.
    pub fn get_binding(&self, name: &str) -> Option<&Binding> {
        let id = self.resolve(name)?;
        self.frames[id.0].bindings.get(name)
    }

    /// Check if a binding exists anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Check if a binding exists in the current (innermost) scope only.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        self.frames[self.current.0].bindings.contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Assignment (Mutation)
    // ═══════════════════════════════════════════════════════════════════

    /// Assign a new value to the nearest binding of `name`.
    ///
    /// # Errors
    ///
    /// - `Undeclared` if the binding doesn't exist
    /// - `ConstReassignment` if the binding is not a `let`
    pub fn assign(&mut self, name: &str, value: Value, span: Span) -> Result<(), EnvironmentError> {
        let id = self.resolve(name).ok_or_else(|| EnvironmentError::Undeclared {
            name: name.to_string(),
            span,
        })?;

        let binding = self.frames[id.0]
            .bindings
            .get_mut(name)
            .ok_or_else(|| EnvironmentError::Undeclared {
                name: name.to_string(),
                span,
            })?;

        if !binding.kind.is_assignable() {
            return Err(EnvironmentError::ConstReassignment {
                name: name.to_string(),
                span,
                declared: binding.declared_at,
            });
        }
        binding.value = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: u32) -> Span {
        Span::new(line, 1)
    }

    #[test]
    fn test_define_and_lookup() {
        let mut env = Environment::new();
        env.define("x", Value::from(1), BindingKind::Let, at(1)).unwrap();
        assert_eq!(env.lookup("x", at(2)).unwrap(), &Value::from(1));
    }

    #[test]
    fn test_duplicate_in_same_frame_fails() {
        let mut env = Environment::new();
        env.define("x", Value::from(1), BindingKind::Let, at(1)).unwrap();
        let err = env
            .define("x", Value::from(2), BindingKind::Let, at(3))
            .unwrap_err();
        assert_eq!(
            err,
            EnvironmentError::AlreadyDeclared {
                name: "x".into(),
                span: at(3),
                previous: at(1),
            }
        );
    }

    #[test]
    fn test_shadowing_in_child_frame() {
        let mut env = Environment::new();
        env.define("x", Value::from(1), BindingKind::Const, at(1)).unwrap();
        env.push_frame();
        env.define("x", Value::from(2), BindingKind::Let, at(2)).unwrap();
        assert_eq!(env.get("x"), Some(&Value::from(2)));
        env.pop_frame();
        assert_eq!(env.get("x"), Some(&Value::from(1)));
    }

    #[test]
    fn test_assign_walks_chain() {
        let mut env = Environment::new();
        env.define("x", Value::from(1), BindingKind::Let, at(1)).unwrap();
        env.push_frame();
        env.assign("x", Value::from(5), at(2)).unwrap();
        env.pop_frame();
        assert_eq!(env.get("x"), Some(&Value::from(5)));
    }

    #[test]
    fn test_assign_undeclared() {
        let mut env = Environment::new();
        let err = env.assign("nope", Value::Null, at(4)).unwrap_err();
        assert_eq!(
            err,
            EnvironmentError::Undeclared {
                name: "nope".into(),
                span: at(4),
            }
        );
    }

    #[test]
    fn test_assign_const_reports_declaration_site() {
        let mut env = Environment::new();
        env.define("x", Value::from(1), BindingKind::Const, at(1)).unwrap();
        let err = env.assign("x", Value::from(2), at(2)).unwrap_err();
        assert_eq!(
            err,
            EnvironmentError::ConstReassignment {
                name: "x".into(),
                span: at(2),
                declared: at(1),
            }
        );
    }

    #[test]
    fn test_pop_frame_never_pops_global() {
        let mut env = Environment::new();
        env.pop_frame();
        assert!(env.is_global_scope());
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn test_uncaptured_frames_are_reclaimed() {
        let mut env = Environment::new();
        let base = env.frame_count();
        env.push_frame();
        env.push_frame();
        assert_eq!(env.frame_count(), base + 2);
        env.pop_frame();
        env.pop_frame();
        assert_eq!(env.frame_count(), base);
    }

    #[test]
    fn test_captured_frames_survive_pop() {
        let mut env = Environment::new();
        let base = env.frame_count();
        let frame = env.push_frame();
        env.define("kept", Value::from(1), BindingKind::Let, at(1)).unwrap();
        env.mark_captured(frame);
        env.pop_frame();
        assert_eq!(env.frame_count(), base + 1);
        assert_eq!(env.frame(frame).map(Frame::len), Some(1));
    }

    #[test]
    fn test_frame_below_captured_frame_is_reused() {
        let mut env = Environment::new();
        let base = env.frame_count();
        let global = env.global();

        let block = env.push_frame();
        let call = env.child_scope(global);
        let saved = env.enter_frame(call);
        env.mark_captured(call);
        env.restore_frame(saved);
        env.pop_frame();

        assert_eq!(env.frame_count(), base + 1);
        assert!(env.frame(block).is_none());
        assert_eq!(env.push_frame(), block);
        assert_eq!(env.frame(block).map(Frame::is_empty), Some(true));
    }

    #[test]
    fn test_enter_and_restore_frame() {
        let mut env = Environment::new();
        env.define("outer", Value::from(1), BindingKind::Let, at(1)).unwrap();
        let closure = env.global();

        env.push_frame();
        env.define("local", Value::from(2), BindingKind::Let, at(2)).unwrap();

        let call = env.child_scope(closure);
        let saved = env.enter_frame(call);
        assert!(env.contains("outer"));
        assert!(!env.contains("local"));
        env.restore_frame(saved);

        assert!(env.contains("local"));
    }

    #[test]
    fn test_stack_overflow() {
        let mut env = Environment::with_max_call_depth(2);
        env.enter_call().unwrap();
        env.enter_call().unwrap();
        assert_eq!(
            env.enter_call(),
            Err(EnvironmentError::StackOverflow { depth: 2, max: 2 })
        );
        env.exit_call();
        assert_eq!(env.call_depth(), 1);
    }
}
