//! Binary operation evaluation

use std::cmp::Ordering;

use super::{Evaluate, Interpreter};
use crate::ast::{BinaryOp, Expr};
use crate::error::type_name;
use crate::span::Span;
use crate::{EvalError, Value};

/// Evaluate `left op right`.
///
/// `&&` and `||` evaluate the right operand only when the left one does
/// not already decide the result.
pub fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    span: Span,
    rt: &mut Interpreter,
) -> Result<Value, EvalError> {
    // Short-circuit evaluation for && and ||
    match op {
        BinaryOp::And => return eval_and(left, right, rt),
        BinaryOp::Or => return eval_or(left, right, rt),
        _ => {}
    }

    // Evaluate both operands
    let left = left.eval(rt)?;
    let right = right.eval(rt)?;

    match op {
        // Arithmetic
        BinaryOp::Add => eval_add(left, right, span),
        BinaryOp::Sub => arithmetic(op, left, right, span, |a, b| a - b),
        BinaryOp::Mul => arithmetic(op, left, right, span, |a, b| a * b),
        BinaryOp::Div => eval_div(left, right, span),
        BinaryOp::Rem => eval_rem(left, right, span),

        // Comparison
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Ne => Ok(Value::Bool(left != right)),
        BinaryOp::Lt => compare(op, &left, &right, span, |o| o == Ordering::Less),
        BinaryOp::Gt => compare(op, &left, &right, span, |o| o == Ordering::Greater),
        BinaryOp::Le => compare(op, &left, &right, span, |o| o != Ordering::Greater),
        BinaryOp::Ge => compare(op, &left, &right, span, |o| o != Ordering::Less),

        // Logical (already handled above with short-circuit)
        BinaryOp::And | BinaryOp::Or => unreachable!(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Logical Operators (Short-Circuit)
// ═══════════════════════════════════════════════════════════════════════

fn eval_and(left: &Expr, right: &Expr, rt: &mut Interpreter) -> Result<Value, EvalError> {
    if !left.eval(rt)?.is_truthy() {
        return Ok(Value::Bool(false));
    }
    Ok(Value::Bool(right.eval(rt)?.is_truthy()))
}

fn eval_or(left: &Expr, right: &Expr, rt: &mut Interpreter) -> Result<Value, EvalError> {
    if left.eval(rt)?.is_truthy() {
        return Ok(Value::Bool(true));
    }
    Ok(Value::Bool(right.eval(rt)?.is_truthy()))
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic Operators
// ═══════════════════════════════════════════════════════════════════════

fn type_mismatch(op: BinaryOp, left: &Value, right: &Value, span: Span) -> EvalError {
    EvalError::TypeError {
        message: format!(
            "cannot apply `{}` to `{}` and `{}`",
            op.symbol(),
            type_name(left),
            type_name(right)
        ),
        span,
    }
}

/// `+` adds numbers, and concatenates when either side is a string.
pub(crate) fn eval_add(left: Value, right: Value, span: Span) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(_), _) | (_, Value::String(_)) => {
            Ok(Value::string(format!("{}{}", left, right)))
        }
        _ => Err(type_mismatch(BinaryOp::Add, &left, &right, span)),
    }
}

fn arithmetic(
    op: BinaryOp,
    left: Value,
    right: Value,
    span: Span,
    f: impl FnOnce(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok(Value::Number(f(a, b))),
        _ => Err(type_mismatch(op, &left, &right, span)),
    }
}

fn eval_div(left: Value, right: Value, span: Span) -> Result<Value, EvalError> {
    if right.as_number() == Some(0.0) && left.as_number().is_some() {
        return Err(EvalError::DivisionByZero { span });
    }
    arithmetic(BinaryOp::Div, left, right, span, |a, b| a / b)
}

fn eval_rem(left: Value, right: Value, span: Span) -> Result<Value, EvalError> {
    if right.as_number() == Some(0.0) && left.as_number().is_some() {
        return Err(EvalError::DivisionByZero { span });
    }
    arithmetic(BinaryOp::Rem, left, right, span, |a, b| a % b)
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison Operators
// ═══════════════════════════════════════════════════════════════════════

/// Order two numbers or two strings; anything else is a type error.
fn compare(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    span: Span,
    test: impl FnOnce(Ordering) -> bool,
) -> Result<Value, EvalError> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => return Err(type_mismatch(op, left, right, span)),
    };

    // NaN compares false in every direction
    Ok(Value::Bool(ordering.is_some_and(test)))
}
