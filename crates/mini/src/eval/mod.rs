//! Tree-walking evaluation

pub mod binary;
pub mod call;
pub mod control;
pub mod domain;
pub mod function;
pub mod if_stmt;
pub mod loops;
pub mod stmt;
pub mod unary;

use log::{debug, info};

use crate::app::{AppDescription, BodyContent, BodySection};
use crate::ast::{Expr, Program};
use crate::{Environment, EvalContext, EvalError, Value};

pub use control::ControlFlow;
pub use stmt::{exec_block, exec_stmts};

/// Trait for evaluating expression nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter.
/// Each expression node type implements this trait.
pub trait Evaluate {
    /// Evaluate this node against the interpreter's current scope.
    fn eval(&self, rt: &mut Interpreter) -> Result<Value, EvalError>;
}

/// Trait for executing statement nodes.
///
/// Statements report how control leaves them instead of producing a
/// value; loops and calls inspect the returned [`ControlFlow`].
pub trait Execute {
    /// Execute this statement against the interpreter's current scope.
    fn exec(&self, rt: &mut Interpreter) -> Result<ControlFlow, EvalError>;
}

/// A body section whose content is still being collected.
#[derive(Debug)]
pub(crate) struct ActiveBody {
    pub(crate) section: BodySection,

    /// Call depth at which the section was entered; statements inside
    /// called functions do not emit content.
    pub(crate) call_depth: usize,
}

/// Interpreter state for one program (or one REPL session).
///
/// Owns the environment, the application description being emitted and
/// the output buffer filled by `print`.
#[derive(Debug)]
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) app: AppDescription,
    pub(crate) body: Option<ActiveBody>,
    pub(crate) output: Vec<String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with default settings and the prelude loaded.
    pub fn new() -> Self {
        Self::with_context(EvalContext::default())
    }

    /// Create an interpreter with the given configuration.
    pub fn with_context(ctx: EvalContext) -> Self {
        debug!("initializing interpreter (max call depth {})", ctx.max_call_depth);
        let mut env = Environment::with_max_call_depth(ctx.max_call_depth);
        env.load_prelude();
        Self {
            env,
            app: AppDescription::new(),
            body: None,
            output: Vec::new(),
        }
    }

    /// Execute a program's statements in order against the global scope.
    ///
    /// Returns the value of a top-level `return`, or null when the program
    /// runs to completion. State persists between calls.
    pub fn execute(&mut self, program: &Program) -> Result<Value, EvalError> {
        debug!("executing {} statements", program.body.len());
        let flow = exec_stmts(&program.body, self);

        // A failed statement may leave a body section half collected
        self.body = None;

        let flow = flow?;
        if let Some(err) = EvalError::stray(&flow) {
            return Err(err);
        }

        let value = flow.into_return_value().unwrap_or(Value::Null);
        info!("program completed with {:?}", value);
        Ok(value)
    }

    /// Evaluate a single expression in the current scope.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        expr.eval(self)
    }

    /// The application description emitted so far.
    pub fn app(&self) -> &AppDescription {
        &self.app
    }

    /// The environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Output lines produced by `print` so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Drain the output buffer.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Consume the interpreter, keeping the description and output.
    pub fn into_parts(self) -> (AppDescription, Vec<String>) {
        (self.app, self.output)
    }

    /// Append an item to the active body section, if one is collecting at
    /// the current call depth.
    pub(crate) fn emit(&mut self, item: BodyContent) {
        let depth = self.env.call_depth();
        if let Some(active) = self.body.as_mut() {
            if active.call_depth == depth {
                active.section.content.push(item);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, rt: &mut Interpreter) -> Result<Value, EvalError> {
        match self {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::String { value, .. } => Ok(Value::string(value)),
            Expr::Boolean { value, .. } => Ok(Value::Bool(*value)),
            Expr::Null { .. } => Ok(Value::Null),
            Expr::Identifier { name, span } => Ok(rt.env.lookup(name, *span)?.clone()),
            Expr::Binary {
                op,
                left,
                right,
                span,
            } => binary::eval_binary(*op, left, right, *span, rt),
            Expr::Unary { op, operand, span } => unary::eval_unary(*op, operand, *span, rt),
            Expr::Assign {
                target,
                value,
                span,
            } => {
                let value = value.eval(rt)?;
                rt.env.assign(target, value.clone(), *span)?;
                Ok(value)
            }
            Expr::Call(call) => call.eval(rt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::lexer::tokenize;

    fn program(src: &str) -> Program {
        parse(&tokenize(src).unwrap()).unwrap()
    }

    #[test]
    fn test_state_persists_between_executions() {
        let mut rt = Interpreter::new();
        rt.execute(&program("let x = 41;")).unwrap();
        rt.execute(&program("x = x + 1;")).unwrap();
        assert_eq!(rt.env().get("x"), Some(&Value::from(42)));
    }

    #[test]
    fn test_top_level_return_stops_program() {
        let mut rt = Interpreter::new();
        let value = rt
            .execute(&program("print(1); return 7; print(2);"))
            .unwrap();
        assert_eq!(value, Value::from(7));
        assert_eq!(rt.take_output(), vec!["1".to_string()]);
    }

    #[test]
    fn test_failed_call_restores_scope() {
        let mut rt = Interpreter::new();
        let err = rt
            .execute(&program("func f() { let y = 1; return missing; } f();"))
            .unwrap_err();
        assert!(matches!(err, EvalError::Environment(_)));
        assert!(rt.env().is_global_scope());
        assert_eq!(rt.env().call_depth(), 0);
    }
}
