//! Token model produced by the lexer

use std::fmt;

use crate::span::Span;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input, always the last token
    Eof,

    // Literals and names
    /// Identifier
    Identifier,
    /// Numeric literal
    Number,
    /// String literal (lexeme excludes the quotes)
    String,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,

    // Domain keywords
    /// `name_app_mini`
    AppName,
    /// `web_package_mini`
    WebPackage,
    /// `web_mini_version`
    WebVersion,
    /// `mini_version`
    MiniVersion,
    /// `app_icon_mini`
    AppIcon,
    /// `body`
    Body,
    /// `style`
    Style,
    /// `call` / `Call`
    Call,

    // General keywords
    /// `func`
    Func,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `while`
    While,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `let`
    Let,
    /// `const`
    Const,

    // Operators
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `@`
    At,
}

impl TokenKind {
    /// Reclassify an identifier spelling as a keyword, boolean or null.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "name_app_mini" => TokenKind::AppName,
            "web_package_mini" => TokenKind::WebPackage,
            "web_mini_version" => TokenKind::WebVersion,
            "mini_version" => TokenKind::MiniVersion,
            "app_icon_mini" => TokenKind::AppIcon,
            "body" => TokenKind::Body,
            "style" => TokenKind::Style,
            "call" | "Call" => TokenKind::Call,
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "true" | "false" => TokenKind::Boolean,
            "null" => TokenKind::Null,
            _ => return None,
        };
        Some(kind)
    }

    /// Human-readable description used in syntax errors.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "`null`",
            TokenKind::AppName => "`name_app_mini`",
            TokenKind::WebPackage => "`web_package_mini`",
            TokenKind::WebVersion => "`web_mini_version`",
            TokenKind::MiniVersion => "`mini_version`",
            TokenKind::AppIcon => "`app_icon_mini`",
            TokenKind::Body => "`body`",
            TokenKind::Style => "`style`",
            TokenKind::Call => "`call`",
            TokenKind::Func => "`func`",
            TokenKind::Return => "`return`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::For => "`for`",
            TokenKind::While => "`while`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::Let => "`let`",
            TokenKind::Const => "`const`",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::EqualEqual => "`==`",
            TokenKind::BangEqual => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::Greater => "`>`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::AndAnd => "`&&`",
            TokenKind::OrOr => "`||`",
            TokenKind::Bang => "`!`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::At => "`@`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single lexed token. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,

    /// Source text of the token (string contents without quotes)
    pub lexeme: String,

    /// Position of the token's first character
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Describe the token for error messages, e.g. identifier `foo`.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => self.kind.describe().to_string(),
            TokenKind::Identifier | TokenKind::Number | TokenKind::Boolean => {
                format!("{} `{}`", self.kind, self.lexeme)
            }
            TokenKind::String => format!("string \"{}\"", self.lexeme),
            _ => self.kind.describe().to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {:?}", self.span, self.kind, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("func"), Some(TokenKind::Func));
        assert_eq!(TokenKind::keyword("Call"), Some(TokenKind::Call));
        assert_eq!(TokenKind::keyword("false"), Some(TokenKind::Boolean));
        assert_eq!(TokenKind::keyword("web_mini_version"), Some(TokenKind::WebVersion));
        assert_eq!(TokenKind::keyword("funcs"), None);
    }

    #[test]
    fn test_describe_token() {
        let tok = Token::new(TokenKind::Identifier, "x", Span::new(1, 1));
        assert_eq!(tok.describe(), "identifier `x`");

        let eof = Token::new(TokenKind::Eof, "", Span::new(3, 1));
        assert_eq!(eof.describe(), "end of input");
    }
}
