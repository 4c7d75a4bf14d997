//! Runtime values

mod callable;
mod display;
mod impls;

pub use callable::{BuiltinFn, BuiltinFnPtr, FunctionValue};

use std::rc::Rc;

/// Runtime value representation for the Mini interpreter.
///
/// Scalars are inline; strings and callables are reference counted so
/// cloning a value never copies its payload.
#[derive(Clone)]
pub enum Value {
    /// `null`, also the result of functions without `return`
    Null,

    /// `true` or `false`
    Bool(bool),

    /// All numbers are double precision
    Number(f64),

    /// Immutable string
    String(Rc<str>),

    /// User-defined function closing over its defining frame
    Function(Rc<FunctionValue>),

    /// Native function from the prelude
    Builtin(BuiltinFn),
}
