//! How control leaves a statement

use crate::span::Span;
use crate::Value;

/// Completion of a statement.
///
/// Every statement reports one of these instead of using the error path
/// for jumps. Loops consume `Break` and `Continue`; function calls consume
/// `Return`. Anything else propagates outwards unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Fell off the end; continue with the next statement.
    Normal,

    /// `break;`
    Break {
        /// Location of the `break` keyword
        span: Span,
    },

    /// `continue;`
    Continue {
        /// Location of the `continue` keyword
        span: Span,
    },

    /// `return expr;`
    Return {
        /// Value to return from the function
        value: Value,
    },
}

impl ControlFlow {
    /// Create a return.
    pub fn return_value(value: Value) -> Self {
        ControlFlow::Return { value }
    }

    /// Whether execution should continue with the next statement.
    pub fn is_normal(&self) -> bool {
        matches!(self, ControlFlow::Normal)
    }

    /// The returned value, if this is a `Return`.
    pub fn into_return_value(self) -> Option<Value> {
        match self {
            ControlFlow::Return { value } => Some(value),
            _ => None,
        }
    }
}
