//! Unary operation evaluation

use super::{Evaluate, Interpreter};
use crate::ast::{Expr, UnaryOp};
use crate::error::type_name;
use crate::span::Span;
use crate::{EvalError, Value};

/// Evaluate a prefix operator applied to `operand`.
pub fn eval_unary(
    op: UnaryOp,
    operand: &Expr,
    span: Span,
    rt: &mut Interpreter,
) -> Result<Value, EvalError> {
    let operand = operand.eval(rt)?;

    match op {
        UnaryOp::Neg => eval_neg(operand, span),
        UnaryOp::Not => Ok(eval_not(&operand)),
    }
}

/// Evaluate unary negation (`-x`).
pub(crate) fn eval_neg(operand: Value, span: Span) -> Result<Value, EvalError> {
    match operand {
        Value::Number(n) => Ok(Value::Number(-n)),
        other => Err(EvalError::TypeError {
            message: format!("cannot negate `{}`", type_name(&other)),
            span,
        }),
    }
}

/// Evaluate logical not (`!x`) on the operand's truthiness.
pub(crate) fn eval_not(operand: &Value) -> Value {
    Value::Bool(!operand.is_truthy())
}
