//! Lexer for Mini source text.
//!
//! Scans left to right tracking 1-based line/column positions. At each
//! position the rules are tried in a fixed order: comments, string
//! literals, numbers, identifiers/keywords, two-character operators and
//! finally single-character punctuation.

use std::str::Chars;

use log::debug;

use crate::error::LexError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Tokenize a complete source text.
///
/// The returned sequence always ends with exactly one `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).collect_tokens()?;
    debug!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

/// The lexer for Mini source text.
pub struct Lexer<'src> {
    /// Character iterator over the remaining input.
    chars: Chars<'src>,
    /// Current line (1-based).
    line: u32,
    /// Current column (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer over the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars(),
            line: 1,
            column: 1,
        }
    }

    /// Collects all tokens into a vector, stopping at the first error.
    pub fn collect_tokens(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let start = self.pos();
        let c = match self.peek() {
            None => return Ok(Token::new(TokenKind::Eof, "", start)),
            Some(c) => c,
        };

        if c == '"' {
            return self.scan_string(start);
        }
        if c.is_ascii_digit() {
            return Ok(self.scan_number(start));
        }
        if c.is_alphabetic() || c == '_' {
            return Ok(self.scan_identifier(start));
        }
        self.scan_operator(c, start)
    }

    /// Current position.
    fn pos(&self) -> Span {
        Span::new(self.line, self.column)
    }

    /// Peeks at the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Peeks at the character after the current one.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advances if the current character matches the expected one.
    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace, `// ...` line comments and `/* ... */` block comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Skips a block comment. Block comments do not nest.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let span = self.pos();
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedComment { span }),
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }

    /// Scans a double-quoted string. Contents are taken verbatim.
    fn scan_string(&mut self, start: Span) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedString { span: start }),
                Some('"') => return Ok(Token::new(TokenKind::String, text, start)),
                Some(c) => text.push(c),
            }
        }
    }

    /// Scans digits with an optional fractional part.
    fn scan_number(&mut self, start: Span) -> Token {
        let mut text = String::new();
        self.take_digits(&mut text);

        // Only treat `.` as a decimal point when a digit follows it
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            text.push('.');
            self.take_digits(&mut text);
        }

        Token::new(TokenKind::Number, text, start)
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.advance();
        }
    }

    /// Scans an identifier, then reclassifies keywords.
    fn scan_identifier(&mut self, start: Span) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_' || c == '-') {
                break;
            }
            text.push(c);
            self.advance();
        }
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, start)
    }

    /// Scans operators and punctuation, longest match first.
    fn scan_operator(&mut self, c: char, start: Span) -> Result<Token, LexError> {
        self.advance();
        let (kind, lexeme) = match c {
            '=' if self.advance_if('=') => (TokenKind::EqualEqual, "=="),
            '!' if self.advance_if('=') => (TokenKind::BangEqual, "!="),
            '<' if self.advance_if('=') => (TokenKind::LessEqual, "<="),
            '>' if self.advance_if('=') => (TokenKind::GreaterEqual, ">="),
            '&' if self.advance_if('&') => (TokenKind::AndAnd, "&&"),
            '|' if self.advance_if('|') => (TokenKind::OrOr, "||"),
            '=' => (TokenKind::Assign, "="),
            '!' => (TokenKind::Bang, "!"),
            '<' => (TokenKind::Less, "<"),
            '>' => (TokenKind::Greater, ">"),
            '+' => (TokenKind::Plus, "+"),
            '-' => (TokenKind::Minus, "-"),
            '*' => (TokenKind::Star, "*"),
            '/' => (TokenKind::Slash, "/"),
            '%' => (TokenKind::Percent, "%"),
            '(' => (TokenKind::LeftParen, "("),
            ')' => (TokenKind::RightParen, ")"),
            '{' => (TokenKind::LeftBrace, "{"),
            '}' => (TokenKind::RightBrace, "}"),
            '[' => (TokenKind::LeftBracket, "["),
            ']' => (TokenKind::RightBracket, "]"),
            ',' => (TokenKind::Comma, ","),
            ';' => (TokenKind::Semicolon, ";"),
            ':' => (TokenKind::Colon, ":"),
            '.' => (TokenKind::Dot, "."),
            '@' => (TokenKind::At, "@"),
            other => return Err(LexError::UnexpectedChar { ch: other, span: start }),
        };
        Ok(Token::new(kind, lexeme, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .expect("lex failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_source_is_single_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_two_char_operators_before_prefixes() {
        assert_eq!(
            kinds("== = != ! <= < >= > && ||"),
            vec![
                TokenKind::EqualEqual,
                TokenKind::Assign,
                TokenKind::BangEqual,
                TokenKind::Bang,
                TokenKind::LessEqual,
                TokenKind::Less,
                TokenKind::GreaterEqual,
                TokenKind::Greater,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("42 3.14 7.").unwrap();
        assert_eq!(tokens[0].lexeme, "42");
        assert_eq!(tokens[1].lexeme, "3.14");
        assert_eq!(tokens[2].lexeme, "7");
        assert_eq!(tokens[3].kind, TokenKind::Dot);
    }

    #[test]
    fn test_identifier_allows_dash() {
        let tokens = tokenize("main-color a - b").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "main-color");
        assert_eq!(tokens[2].kind, TokenKind::Minus);
    }

    #[test]
    fn test_keywords_reclassified() {
        assert_eq!(
            kinds("name_app_mini body style Call let true null"),
            vec![
                TokenKind::AppName,
                TokenKind::Body,
                TokenKind::Style,
                TokenKind::Call,
                TokenKind::Let,
                TokenKind::Boolean,
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_verbatim() {
        let tokens = tokenize("\"a // not a comment \\n\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "a // not a comment \\n");
    }

    #[test]
    fn test_comments_skipped_and_positions_tracked() {
        let tokens = tokenize("// line\n/* block\n spans */ x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].span, Span::new(3, 11));
    }

    #[test]
    fn test_body_terminator_tokens() {
        assert_eq!(
            kinds("/body"),
            vec![TokenKind::Slash, TokenKind::Body, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let err = tokenize("x /* never closed").unwrap_err();
        assert_eq!(err, LexError::UnterminatedComment { span: Span::new(1, 3) });
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("let s = \"abc").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { span: Span::new(1, 9) });
    }

    #[test]
    fn test_lone_ampersand_and_pipe() {
        assert!(matches!(
            tokenize("a & b"),
            Err(LexError::UnexpectedChar { ch: '&', .. })
        ));
        assert!(matches!(
            tokenize("a | b"),
            Err(LexError::UnexpectedChar { ch: '|', .. })
        ));
        assert!(matches!(
            tokenize("#"),
            Err(LexError::UnexpectedChar { ch: '#', span }) if span == Span::new(1, 1)
        ));
    }
}
