//! Statement parsing

use std::rc::Rc;

use crate::ast::{
    Block, DeclKind, Expr, ForStmt, FunctionDecl, IfStmt, Stmt, VarDecl, WhileStmt,
};
use crate::token::TokenKind;

use super::domain::{body_declaration, property_declaration};
use super::expr::expression;
use super::{unexpected, ParseResult, TokenCursor};

pub(crate) type StmtResult = ParseResult<Stmt>;

/// Parse one statement, dispatching on its leading keyword.
pub(crate) fn statement(cursor: &mut TokenCursor) -> StmtResult {
    match cursor.peek().kind {
        TokenKind::AppName
        | TokenKind::WebPackage
        | TokenKind::WebVersion
        | TokenKind::MiniVersion
        | TokenKind::AppIcon => property_declaration(cursor),
        TokenKind::Body => body_declaration(cursor),
        TokenKind::Func => function_declaration(cursor),
        TokenKind::Let | TokenKind::Const => var_declaration(cursor),
        TokenKind::If => if_statement(cursor),
        TokenKind::While => while_statement(cursor),
        TokenKind::For => for_statement(cursor),
        TokenKind::LeftBrace => block(cursor).map(Stmt::Block),
        TokenKind::Return => return_statement(cursor),
        TokenKind::Break => {
            let span = cursor.advance().span;
            cursor.expect(TokenKind::Semicolon)?;
            Ok(Stmt::Break { span })
        }
        TokenKind::Continue => {
            let span = cursor.advance().span;
            cursor.expect(TokenKind::Semicolon)?;
            Ok(Stmt::Continue { span })
        }
        TokenKind::Call => call_statement(cursor),
        _ => expression_statement(cursor),
    }
}

/// Parse `{ statement* }`.
pub(crate) fn block(cursor: &mut TokenCursor) -> ParseResult<Block> {
    let open = cursor.expect(TokenKind::LeftBrace)?;
    let mut body = Vec::new();

    while cursor.advance_if_match(TokenKind::RightBrace).is_none() {
        if cursor.at_end() {
            return Err(unexpected(TokenKind::RightBrace.describe(), cursor.peek()));
        }
        body.push(statement(cursor)?);
    }

    Ok(Block {
        body,
        span: open.span,
    })
}

fn var_declaration(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.advance();
    let kind = if keyword.kind == TokenKind::Const {
        DeclKind::Const
    } else {
        DeclKind::Let
    };
    let name = cursor.expect_identifier("variable name")?;

    let init = if cursor.advance_if_match(TokenKind::Assign).is_some() {
        Some(expression(cursor)?)
    } else {
        // uninitialized variables default to null
        None
    };

    cursor.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDecl {
        kind,
        name,
        init,
        span: keyword.span,
    }))
}

fn function_declaration(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.expect(TokenKind::Func)?;
    let name = cursor.expect_identifier("function name")?;
    cursor.expect(TokenKind::LeftParen)?;

    let mut params = Vec::new();
    if cursor.advance_if_match(TokenKind::RightParen).is_none() {
        loop {
            params.push(cursor.expect_identifier("parameter name")?);
            if cursor.advance_if_match(TokenKind::Comma).is_none() {
                break;
            }
        }
        cursor.expect(TokenKind::RightParen)?;
    }

    let body = block(cursor)?;

    Ok(Stmt::Function(FunctionDecl {
        name,
        params,
        body: Rc::new(body),
        span: keyword.span,
    }))
}

fn if_statement(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.expect(TokenKind::If)?;
    cursor.expect(TokenKind::LeftParen)?;
    let test = expression(cursor)?;
    cursor.expect(TokenKind::RightParen)?;
    let consequent = block(cursor)?;

    let alternate = if cursor.advance_if_match(TokenKind::Else).is_some() {
        let stmt = if cursor.check(TokenKind::If) {
            if_statement(cursor)?
        } else {
            Stmt::Block(block(cursor)?)
        };
        Some(Box::new(stmt))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        test,
        consequent,
        alternate,
        span: keyword.span,
    }))
}

fn while_statement(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.expect(TokenKind::While)?;
    cursor.expect(TokenKind::LeftParen)?;
    let test = expression(cursor)?;
    cursor.expect(TokenKind::RightParen)?;
    let body = block(cursor)?;

    Ok(Stmt::While(WhileStmt {
        test,
        body,
        span: keyword.span,
    }))
}

fn for_statement(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.expect(TokenKind::For)?;
    cursor.expect(TokenKind::LeftParen)?;

    let init = if cursor.advance_if_match(TokenKind::Semicolon).is_some() {
        None
    } else if cursor.check(TokenKind::Let) || cursor.check(TokenKind::Const) {
        Some(Box::new(var_declaration(cursor)?))
    } else {
        Some(Box::new(expression_statement(cursor)?))
    };

    let test = if cursor.check(TokenKind::Semicolon) {
        None
    } else {
        Some(expression(cursor)?)
    };
    cursor.expect(TokenKind::Semicolon)?;

    let update = if cursor.check(TokenKind::RightParen) {
        None
    } else {
        Some(expression(cursor)?)
    };
    cursor.expect(TokenKind::RightParen)?;

    let body = block(cursor)?;

    Ok(Stmt::For(ForStmt {
        init,
        test,
        update,
        body,
        span: keyword.span,
    }))
}

fn return_statement(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.expect(TokenKind::Return)?;
    let value = if cursor.check(TokenKind::Semicolon) {
        None
    } else {
        Some(expression(cursor)?)
    };
    cursor.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return {
        value,
        span: keyword.span,
    })
}

/// `call target(args);` on its own is a call statement. When an operator
/// follows the call, the line is an ordinary expression statement.
fn call_statement(cursor: &mut TokenCursor) -> StmtResult {
    let span = cursor.span();
    let expression = expression(cursor)?;
    cursor.expect(TokenKind::Semicolon)?;
    match expression {
        Expr::Call(call) => Ok(Stmt::Call(call)),
        expression => Ok(Stmt::Expression { expression, span }),
    }
}

fn expression_statement(cursor: &mut TokenCursor) -> StmtResult {
    let span = cursor.span();
    let expression = expression(cursor)?;
    cursor.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Expression { expression, span })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Program};
    use crate::error::ParseError;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::span::Span;

    fn parse_src(src: &str) -> ParseResult<Program> {
        parse(&tokenize(src).expect("lex failed"))
    }

    #[test]
    fn test_var_declarations() {
        let program = parse_src("let a = 1; const b; let c = a;").unwrap();
        assert_eq!(program.body.len(), 3);
        match &program.body[1] {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.kind, DeclKind::Const);
                assert_eq!(decl.name, "b");
                assert!(decl.init.is_none());
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_function_declaration() {
        let program = parse_src("func add(a, b) { return a + b; }").unwrap();
        match &program.body[0] {
            Stmt::Function(func) => {
                assert_eq!(func.name, "add");
                assert_eq!(func.params, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(func.body.body.len(), 1);
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_else_if_chain() {
        let program =
            parse_src("if (a) { x = 1; } else if (b) { x = 2; } else { x = 3; }").unwrap();
        match &program.body[0] {
            Stmt::If(stmt) => match stmt.alternate.as_deref() {
                Some(Stmt::If(inner)) => {
                    assert!(matches!(inner.alternate.as_deref(), Some(Stmt::Block(_))))
                }
                other => panic!("expected nested if, got {:?}", other),
            },
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_all_clauses_empty() {
        let program = parse_src("for (;;) { break; }").unwrap();
        match &program.body[0] {
            Stmt::For(stmt) => {
                assert!(stmt.init.is_none());
                assert!(stmt.test.is_none());
                assert!(stmt.update.is_none());
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_expression_init() {
        let program = parse_src("for (i = 0; i < 3; i = i + 1) { }").unwrap();
        match &program.body[0] {
            Stmt::For(stmt) => {
                assert!(matches!(
                    stmt.init.as_deref(),
                    Some(Stmt::Expression {
                        expression: Expr::Assign { .. },
                        ..
                    })
                ));
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_return_without_value() {
        let program = parse_src("func f() { return; }").unwrap();
        match &program.body[0] {
            Stmt::Function(func) => {
                assert!(matches!(func.body.body[0], Stmt::Return { value: None, .. }))
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_call_statement() {
        let program = parse_src("call greet(\"x\");").unwrap();
        assert!(matches!(&program.body[0], Stmt::Call(call) if call.callee == "greet"));
    }

    #[test]
    fn test_keyword_call_inside_larger_expression() {
        let program = parse_src("call f(1) + 2;").unwrap();
        match &program.body[0] {
            Stmt::Expression { expression, span } => {
                assert_eq!(*span, Span::new(1, 1));
                assert_eq!(expression.to_string(), "(f(1) + 2)");
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
        assert!(matches!(
            parse_src("call f(1) = 2;"),
            Err(ParseError::InvalidAssignTarget { .. })
        ));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_src("while (true) { x = 1;").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "`}`".into(),
                found: "end of input".into(),
                span: Span::new(1, 22),
            }
        );
    }

    #[test]
    fn test_if_requires_parenthesised_test() {
        let err = parse_src("if true { }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, span, .. }
                if expected == "`(`" && span == Span::new(1, 4)
        ));
    }
}
