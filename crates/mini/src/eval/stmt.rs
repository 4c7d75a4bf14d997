//! Statement execution

use log::trace;

use super::{domain, function, ControlFlow, Evaluate, Execute, Interpreter};
use crate::app::BodyContent;
use crate::ast::{Block, DeclKind, Expr, Stmt, VarDecl};
use crate::{BindingKind, EvalError, Value};

impl Execute for Stmt {
    fn exec(&self, rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
        trace!("exec {} at {}", self.kind_name(), self.span());

        match self {
            Stmt::Block(block) => exec_block(block, rt),
            Stmt::VarDecl(decl) => {
                exec_var_decl(decl, rt)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::Function(decl) => {
                function::exec_function(decl, rt)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::Property(decl) => {
                domain::exec_property(decl, rt)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::Body(decl) => domain::exec_body(decl, rt),
            Stmt::Call(call) => {
                let value = call.eval(rt)?;
                rt.emit(BodyContent::Call {
                    target: call.callee.clone(),
                    output: value.to_string(),
                });
                Ok(ControlFlow::Normal)
            }
            Stmt::If(stmt) => stmt.exec(rt),
            Stmt::While(stmt) => stmt.exec(rt),
            Stmt::For(stmt) => stmt.exec(rt),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => expr.eval(rt)?,
                    None => Value::Null,
                };
                Ok(ControlFlow::Return { value })
            }
            Stmt::Break { span } => Ok(ControlFlow::Break { span: *span }),
            Stmt::Continue { span } => Ok(ControlFlow::Continue { span: *span }),
            Stmt::Expression { expression, .. } => {
                let value = expression.eval(rt)?;
                if let Expr::String { value: text, .. } = expression {
                    rt.emit(BodyContent::Text { text: text.clone() });
                }
                trace!("expression statement produced {:?}", value);
                Ok(ControlFlow::Normal)
            }
        }
    }
}

/// Execute a block in a fresh child scope.
///
/// The scope is popped whether or not a statement fails.
pub fn exec_block(block: &Block, rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
    rt.env.push_frame();
    let result = exec_stmts(&block.body, rt);
    rt.env.pop_frame();
    result
}

/// Execute statements in order in the current scope (without managing
/// scope), stopping at the first one that does not complete normally.
pub fn exec_stmts(stmts: &[Stmt], rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
    for stmt in stmts {
        let flow = stmt.exec(rt)?;
        if !flow.is_normal() {
            return Ok(flow);
        }
    }
    Ok(ControlFlow::Normal)
}

fn exec_var_decl(decl: &VarDecl, rt: &mut Interpreter) -> Result<(), EvalError> {
    let value = match &decl.init {
        Some(expr) => expr.eval(rt)?,
        None => Value::Null,
    };
    let kind = match decl.kind {
        DeclKind::Let => BindingKind::Let,
        DeclKind::Const => BindingKind::Const,
    };
    rt.env.define(decl.name.as_str(), value, kind, decl.span)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvironmentError;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::span::Span;

    fn run(src: &str) -> (Interpreter, Result<Value, EvalError>) {
        let program = parse(&tokenize(src).unwrap()).unwrap();
        let mut rt = Interpreter::new();
        let result = rt.execute(&program);
        (rt, result)
    }

    #[test]
    fn test_let_without_initializer_is_null() {
        let (rt, result) = run("let x;");
        result.unwrap();
        assert_eq!(rt.env().get("x"), Some(&Value::Null));
    }

    #[test]
    fn test_block_scope_is_discarded() {
        let (rt, result) = run("let x = 1; { let x = 2; let y = 3; }");
        result.unwrap();
        assert_eq!(rt.env().get("x"), Some(&Value::from(1)));
        assert_eq!(rt.env().get("y"), None);
    }

    #[test]
    fn test_block_assigns_outer_binding() {
        let (rt, result) = run("let x = 1; { x = 2; }");
        result.unwrap();
        assert_eq!(rt.env().get("x"), Some(&Value::from(2)));
    }

    #[test]
    fn test_redeclare_in_same_scope() {
        let (_, result) = run("let x = 1;\nlet x = 2;");
        assert_eq!(
            result.unwrap_err(),
            EvalError::Environment(EnvironmentError::AlreadyDeclared {
                name: "x".into(),
                span: Span::new(2, 1),
                previous: Span::new(1, 1),
            })
        );
    }

    #[test]
    fn test_stray_break_at_top_level() {
        let (_, result) = run("break;");
        assert_eq!(
            result.unwrap_err(),
            EvalError::BreakOutsideLoop {
                span: Span::new(1, 1)
            }
        );
    }

    #[test]
    fn test_block_scope_popped_after_error() {
        let (rt, result) = run("{ let a = 1; missing; }");
        assert!(result.is_err());
        assert!(rt.env().is_global_scope());
    }
}
