//! Function declaration

use std::rc::Rc;

use log::debug;

use super::Interpreter;
use crate::ast::FunctionDecl;
use crate::{BindingKind, EvalError, FunctionValue, Value};

/// Build a function value closing over the current frame.
pub fn function_from_decl(decl: &FunctionDecl, rt: &mut Interpreter) -> FunctionValue {
    let closure = rt.env.current();
    rt.env.mark_captured(closure);
    FunctionValue::new(
        decl.name.clone(),
        decl.params.clone(),
        Rc::clone(&decl.body),
        closure,
    )
}

/// Define a function in the current scope.
///
/// The closure captures the declaring frame by index, so the function can
/// see itself (for recursion) and any later writes to outer bindings.
///
/// # Errors
///
/// `AlreadyDeclared` if the name is taken in this scope.
pub fn exec_function(decl: &FunctionDecl, rt: &mut Interpreter) -> Result<(), EvalError> {
    let func = function_from_decl(decl, rt);
    debug!(
        "defining function `{}`/{} in frame {}",
        func.name,
        func.params.len(),
        func.closure.index()
    );
    rt.env.define(
        decl.name.as_str(),
        Value::Function(Rc::new(func)),
        BindingKind::Function,
        decl.span,
    )?;
    Ok(())
}
