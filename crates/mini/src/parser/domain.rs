//! Application-specific declarations: property keywords and body sections

use crate::ast::{BodyDecl, PropertyDecl, PropertyKind, Stmt, StyleRef};
use crate::error::ParseError;
use crate::token::TokenKind;

use super::expr::arguments;
use super::stmt::{statement, StmtResult};
use super::{unexpected, TokenCursor};

/// Parse `keyword(argument?);` and check the keyword's arity.
pub(crate) fn property_declaration(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.advance();
    let kind = match keyword.kind {
        TokenKind::AppName => PropertyKind::AppName,
        TokenKind::WebPackage => PropertyKind::WebPackage,
        TokenKind::WebVersion => PropertyKind::WebVersion,
        TokenKind::MiniVersion => PropertyKind::MiniVersion,
        TokenKind::AppIcon => PropertyKind::AppIcon,
        _ => return Err(unexpected("property keyword", &keyword)),
    };

    cursor.expect(TokenKind::LeftParen)?;
    let mut args = arguments(cursor)?;
    cursor.expect(TokenKind::Semicolon)?;

    if args.len() != kind.arity() {
        return Err(ParseError::PropertyArity {
            keyword: keyword.lexeme,
            expected: kind.arity(),
            found: args.len(),
            span: keyword.span,
        });
    }

    Ok(Stmt::Property(PropertyDecl {
        kind,
        argument: args.pop(),
        span: keyword.span,
    }))
}

/// Parse `body@ (style: ref)? statement* /body ;?`.
pub(crate) fn body_declaration(cursor: &mut TokenCursor) -> StmtResult {
    let keyword = cursor.expect(TokenKind::Body)?;
    cursor.expect(TokenKind::At)?;

    // `(` only opens the header when `style` follows; otherwise it starts content
    let style = if cursor.check(TokenKind::LeftParen) && cursor.peek_at(1).kind == TokenKind::Style
    {
        cursor.advance();
        cursor.advance();
        cursor.expect(TokenKind::Colon)?;
        let reference = cursor.advance();
        let style = match reference.kind {
            TokenKind::String => StyleRef::Literal(reference.lexeme),
            TokenKind::Identifier => StyleRef::Name(reference.lexeme),
            _ => return Err(unexpected("style string or identifier", &reference)),
        };
        cursor.expect(TokenKind::RightParen)?;
        Some(style)
    } else {
        None
    };

    let mut content = Vec::new();
    while !at_body_terminator(cursor) {
        if cursor.at_end() {
            return Err(unexpected("`/body`", cursor.peek()));
        }
        content.push(statement(cursor)?);
    }
    cursor.advance(); // /
    cursor.advance(); // body
    cursor.advance_if_match(TokenKind::Semicolon);

    Ok(Stmt::Body(BodyDecl {
        style,
        content,
        span: keyword.span,
    }))
}

fn at_body_terminator(cursor: &TokenCursor) -> bool {
    cursor.check(TokenKind::Slash) && cursor.peek_at(1).kind == TokenKind::Body
}
