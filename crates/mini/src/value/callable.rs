//! Callable value types: user functions and builtins

use std::rc::Rc;

use crate::ast::Block;
use crate::environment::FrameId;

use super::Value;

/// Type alias for builtin function pointers.
///
/// Builtins receive their arguments and the run's output buffer.
pub type BuiltinFnPtr = fn(&[Value], &mut Vec<String>) -> Result<Value, String>;

/// A user-defined function.
///
/// The body is shared with the AST; the captured frame is referenced by
/// index so later writes to outer bindings stay visible to the closure.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    /// Function name
    pub name: String,

    /// Parameter names
    pub params: Vec<String>,

    /// The function body
    pub body: Rc<Block>,

    /// Frame the function was declared in
    pub closure: FrameId,
}

impl FunctionValue {
    /// Create a new function value
    pub fn new(name: String, params: Vec<String>, body: Rc<Block>, closure: FrameId) -> Self {
        Self {
            name,
            params,
            body,
            closure,
        }
    }
}

/// A built-in native function.
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The native implementation
    pub func: BuiltinFnPtr,
}

impl std::fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}
