//! Function call evaluation

use log::trace;

use super::{exec_stmts, Evaluate, Interpreter};
use crate::ast::CallExpr;
use crate::error::type_name;
use crate::span::Span;
use crate::{BindingKind, BuiltinFn, EvalError, FunctionValue, Value};

/// Remaining native stack below which a call switches to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

impl Evaluate for CallExpr {
    fn eval(&self, rt: &mut Interpreter) -> Result<Value, EvalError> {
        // Resolve the callee
        let callee = rt.env.lookup(&self.callee, self.span)?.clone();

        // Evaluate arguments left to right
        let args: Vec<Value> = self
            .args
            .iter()
            .map(|arg| arg.eval(rt))
            .collect::<Result<Vec<_>, _>>()?;

        call_value(&self.callee, callee, args, self.span, rt)
    }
}

/// Call a Value as a function.
///
/// # Errors
///
/// Returns `NotCallable` if the value is not a function.
/// Returns `ArityMismatch` if the argument count doesn't match.
pub fn call_value(
    name: &str,
    func: Value,
    args: Vec<Value>,
    span: Span,
    rt: &mut Interpreter,
) -> Result<Value, EvalError> {
    match func {
        Value::Function(f) => call_function(&f, args, span, rt),
        Value::Builtin(f) => call_builtin(&f, args, span, rt),
        other => Err(EvalError::NotCallable {
            name: name.to_string(),
            found: type_name(&other).to_string(),
            span,
        }),
    }
}

/// Call a user-defined function.
fn call_function(
    func: &FunctionValue,
    args: Vec<Value>,
    span: Span,
    rt: &mut Interpreter,
) -> Result<Value, EvalError> {
    // Check arity
    if args.len() != func.params.len() {
        return Err(EvalError::ArityMismatch {
            name: func.name.clone(),
            expected: func.params.len(),
            got: args.len(),
            span,
        });
    }

    // Track call depth (stack overflow protection)
    rt.env.enter_call()?;
    trace!("call `{}` at depth {}", func.name, rt.env.call_depth());

    // The call scope hangs off the closure's frame, not the caller's
    let frame = rt.env.child_scope(func.closure);
    let saved = rt.env.enter_frame(frame);

    // Recursion is bounded by the call depth limit, not the host stack
    let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
        bind_and_run(func, args, rt)
    });

    // Clean up
    rt.env.restore_frame(saved);
    rt.env.exit_call();

    let flow = result?;
    if let Some(err) = EvalError::stray(&flow) {
        return Err(err);
    }
    Ok(flow.into_return_value().unwrap_or(Value::Null))
}

fn bind_and_run(
    func: &FunctionValue,
    args: Vec<Value>,
    rt: &mut Interpreter,
) -> Result<super::ControlFlow, EvalError> {
    // Bind parameters to arguments
    for (param, arg) in func.params.iter().zip(args) {
        rt.env
            .define(param.as_str(), arg, BindingKind::Let, func.body.span)?;
    }

    exec_stmts(&func.body.body, rt)
}

/// Call a built-in function.
fn call_builtin(
    func: &BuiltinFn,
    args: Vec<Value>,
    span: Span,
    rt: &mut Interpreter,
) -> Result<Value, EvalError> {
    // Check arity (if not variadic)
    if func.arity >= 0 && args.len() != func.arity as usize {
        return Err(EvalError::ArityMismatch {
            name: func.name.clone(),
            expected: func.arity as usize,
            got: args.len(),
            span,
        });
    }

    // Call the native function
    (func.func)(&args, &mut rt.output).map_err(|message| EvalError::BuiltinError {
        name: func.name.clone(),
        message,
        span,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::EnvironmentError;
    use crate::eval::Interpreter;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::span::Span;
    use crate::{EvalContext, EvalError, Value};

    fn run(src: &str) -> Result<Value, EvalError> {
        let program = parse(&tokenize(src).unwrap()).unwrap();
        Interpreter::new().execute(&program)
    }

    #[test]
    fn test_add_returns_sum() {
        assert_eq!(
            run("func add(a, b) { return a + b; } return add(2, 3);"),
            Ok(Value::from(5))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let err = run("func add(a, b) { return a + b; }\nadd(2);").unwrap_err();
        assert_eq!(
            err,
            EvalError::ArityMismatch {
                name: "add".into(),
                expected: 2,
                got: 1,
                span: Span::new(2, 1),
            }
        );
    }

    #[test]
    fn test_missing_return_yields_null() {
        assert_eq!(run("func f() { let x = 1; } return f();"), Ok(Value::Null));
    }

    #[test]
    fn test_not_callable() {
        let err = run("let x = 5; x();").unwrap_err();
        assert_eq!(
            err,
            EvalError::NotCallable {
                name: "x".into(),
                found: "number".into(),
                span: Span::new(1, 12),
            }
        );
    }

    #[test]
    fn test_recursion() {
        let src = r#"
            func fact(n) {
                if (n <= 1) { return 1; }
                return n * fact(n - 1);
            }
            return fact(5);
        "#;
        assert_eq!(run(src), Ok(Value::from(120)));
    }

    #[test]
    fn test_return_unwinds_loops_inside_call() {
        let src = r#"
            func first_over(limit) {
                for (let i = 0; i < 100; i = i + 1) {
                    while (true) {
                        if (i > limit) { return i; }
                        break;
                    }
                }
                return -1;
            }
            return first_over(3);
        "#;
        assert_eq!(run(src), Ok(Value::from(4)));
    }

    #[test]
    fn test_break_does_not_cross_function_boundary() {
        let src = "func f() { break; } while (true) { f(); }";
        assert!(matches!(
            run(src),
            Err(EvalError::BreakOutsideLoop { .. })
        ));
    }

    #[test]
    fn test_caller_locals_are_invisible() {
        let src = r#"
            func peek() { return hidden; }
            func outer() { let hidden = 1; return peek(); }
            outer();
        "#;
        assert!(matches!(
            run(src),
            Err(EvalError::Environment(EnvironmentError::Undeclared { .. }))
        ));
    }

    #[test]
    fn test_duplicate_parameter_names_fail_on_call() {
        assert!(matches!(
            run("func f(a, a) { return a; } f(1, 2);"),
            Err(EvalError::Environment(EnvironmentError::AlreadyDeclared { .. }))
        ));
    }

    #[test]
    fn test_stack_overflow() {
        let program = parse(&tokenize("func f() { return f(); } f();").unwrap()).unwrap();
        let mut rt = Interpreter::with_context(EvalContext::with_max_call_depth(16));
        let err = rt.execute(&program).unwrap_err();
        assert_eq!(
            err,
            EvalError::Environment(EnvironmentError::StackOverflow { depth: 16, max: 16 })
        );
        assert_eq!(rt.env().call_depth(), 0);
    }

    #[test]
    fn test_builtin_error_carries_name() {
        assert!(matches!(
            run("len(1);"),
            Err(EvalError::BuiltinError { name, .. }) if name == "len"
        ));
    }
}
