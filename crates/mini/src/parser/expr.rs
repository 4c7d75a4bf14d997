//! Expression parsing, one function per precedence tier
//!
//! Lowest to highest: assignment, `||`, `&&`, equality, relational,
//! additive, multiplicative, unary, call/primary.

use crate::ast::{BinaryOp, CallExpr, Expr, UnaryOp};
use crate::error::ParseError;
use crate::token::TokenKind;

use super::{unexpected, ParseResult, TokenCursor};

pub(crate) type ExprResult = ParseResult<Expr>;

/// Parse a full expression.
pub(crate) fn expression(cursor: &mut TokenCursor) -> ExprResult {
    assignment(cursor)
}

fn assignment(cursor: &mut TokenCursor) -> ExprResult {
    let expr = logical_or(cursor)?;

    if cursor.advance_if_match(TokenKind::Assign).is_some() {
        let value = assignment(cursor)?;
        return match expr {
            Expr::Identifier { name, span } => Ok(Expr::Assign {
                target: name,
                value: Box::new(value),
                span,
            }),
            other => Err(ParseError::InvalidAssignTarget { span: other.span() }),
        };
    }

    Ok(expr)
}

fn logical_or(cursor: &mut TokenCursor) -> ExprResult {
    binary_left_associative(cursor, logical_and, &[(TokenKind::OrOr, BinaryOp::Or)])
}

fn logical_and(cursor: &mut TokenCursor) -> ExprResult {
    binary_left_associative(cursor, equality, &[(TokenKind::AndAnd, BinaryOp::And)])
}

fn equality(cursor: &mut TokenCursor) -> ExprResult {
    binary_left_associative(
        cursor,
        relational,
        &[
            (TokenKind::EqualEqual, BinaryOp::Eq),
            (TokenKind::BangEqual, BinaryOp::Ne),
        ],
    )
}

fn relational(cursor: &mut TokenCursor) -> ExprResult {
    binary_left_associative(
        cursor,
        additive,
        &[
            (TokenKind::Less, BinaryOp::Lt),
            (TokenKind::Greater, BinaryOp::Gt),
            (TokenKind::LessEqual, BinaryOp::Le),
            (TokenKind::GreaterEqual, BinaryOp::Ge),
        ],
    )
}

fn additive(cursor: &mut TokenCursor) -> ExprResult {
    binary_left_associative(
        cursor,
        multiplicative,
        &[
            (TokenKind::Plus, BinaryOp::Add),
            (TokenKind::Minus, BinaryOp::Sub),
        ],
    )
}

fn multiplicative(cursor: &mut TokenCursor) -> ExprResult {
    binary_left_associative(
        cursor,
        unary,
        &[
            (TokenKind::Star, BinaryOp::Mul),
            (TokenKind::Slash, BinaryOp::Div),
            (TokenKind::Percent, BinaryOp::Rem),
        ],
    )
}

// Parse a left-associative tier as long as the current token is one of its operators
fn binary_left_associative(
    cursor: &mut TokenCursor,
    higher_precedence: fn(&mut TokenCursor) -> ExprResult,
    operators: &[(TokenKind, BinaryOp)],
) -> ExprResult {
    let mut expr = higher_precedence(cursor)?;

    while let Some(&(_, op)) = operators.iter().find(|(kind, _)| cursor.check(*kind)) {
        cursor.advance();
        let right = higher_precedence(cursor)?;
        let span = expr.span();
        expr = Expr::Binary {
            op,
            left: Box::new(expr),
            right: Box::new(right),
            span,
        };
    }

    Ok(expr)
}

fn unary(cursor: &mut TokenCursor) -> ExprResult {
    if let Some(token) = cursor.advance_if_any_match(&[TokenKind::Bang, TokenKind::Minus]) {
        let op = if token.kind == TokenKind::Bang {
            UnaryOp::Not
        } else {
            UnaryOp::Neg
        };
        let operand = unary(cursor)?;
        return Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            span: token.span,
        });
    }

    primary(cursor)
}

fn primary(cursor: &mut TokenCursor) -> ExprResult {
    let token = cursor.peek().clone();

    match token.kind {
        TokenKind::Number => {
            cursor.advance();
            let value = token
                .lexeme
                .parse::<f64>()
                .map_err(|_| unexpected("number", &token))?;
            Ok(Expr::Number {
                value,
                span: token.span,
            })
        }
        TokenKind::String => {
            cursor.advance();
            Ok(Expr::String {
                value: token.lexeme,
                span: token.span,
            })
        }
        TokenKind::Boolean => {
            cursor.advance();
            Ok(Expr::Boolean {
                value: token.lexeme == "true",
                span: token.span,
            })
        }
        TokenKind::Null => {
            cursor.advance();
            Ok(Expr::Null { span: token.span })
        }
        TokenKind::Identifier => {
            cursor.advance();
            if cursor.advance_if_match(TokenKind::LeftParen).is_some() {
                let args = arguments(cursor)?;
                Ok(Expr::Call(CallExpr {
                    callee: token.lexeme,
                    args,
                    span: token.span,
                }))
            } else {
                Ok(Expr::Identifier {
                    name: token.lexeme,
                    span: token.span,
                })
            }
        }
        TokenKind::Call => call_form(cursor).map(Expr::Call),
        TokenKind::LeftParen => {
            cursor.advance();
            let expr = expression(cursor)?;
            cursor.expect(TokenKind::RightParen)?;
            Ok(expr)
        }
        _ => Err(unexpected("expression", &token)),
    }
}

/// Parse `call target(args)`, spanning from the `call` keyword.
pub(crate) fn call_form(cursor: &mut TokenCursor) -> ParseResult<CallExpr> {
    let keyword = cursor.expect(TokenKind::Call)?;
    let callee = cursor.expect_identifier("call target name")?;
    cursor.expect(TokenKind::LeftParen)?;
    let args = arguments(cursor)?;
    Ok(CallExpr {
        callee,
        args,
        span: keyword.span,
    })
}

/// Parse a comma-separated argument list after its opening parenthesis,
/// consuming the closing one.
pub(crate) fn arguments(cursor: &mut TokenCursor) -> ParseResult<Vec<Expr>> {
    let mut args = Vec::new();
    if cursor.advance_if_match(TokenKind::RightParen).is_some() {
        return Ok(args);
    }

    loop {
        args.push(expression(cursor)?);
        if cursor.advance_if_match(TokenKind::Comma).is_none() {
            break;
        }
    }
    cursor.expect(TokenKind::RightParen)?;
    Ok(args)
}
