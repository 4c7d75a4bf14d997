//! Abstract syntax tree for Mini programs
//!
//! The node set is closed: statements are [`Stmt`] variants and
//! expressions are [`Expr`] variants. Every node records the span of its
//! first token. Function bodies are held behind `Rc` so that closure
//! values can share them with the tree without copying.

mod display;

use std::rc::Rc;

use crate::span::Span;

/// A whole source unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order
    pub body: Vec<Stmt>,
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in source order
    pub body: Vec<Stmt>,

    /// Position of the opening brace
    pub span: Span,
}

/// `let` or `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// Reassignable binding
    Let,
    /// Write-once binding
    Const,
}

/// `let name = init;` / `const name = init;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// Binding kind
    pub kind: DeclKind,
    /// Bound name
    pub name: String,
    /// Optional initializer; absent means null
    pub init: Option<Expr>,
    /// Position of the `let`/`const` keyword
    pub span: Span,
}

/// `func name(params) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Function name
    pub name: String,
    /// Parameter names in order
    pub params: Vec<String>,
    /// Function body, shared with closure values
    pub body: Rc<Block>,
    /// Position of the `func` keyword
    pub span: Span,
}

/// The fields of the application description a property keyword sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// `name_app_mini(name)`
    AppName,
    /// `web_package_mini()`
    WebPackage,
    /// `web_mini_version(version)`
    WebVersion,
    /// `mini_version(version)`
    MiniVersion,
    /// `app_icon_mini(path)`
    AppIcon,
}

impl PropertyKind {
    /// Source spelling of the property keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            PropertyKind::AppName => "name_app_mini",
            PropertyKind::WebPackage => "web_package_mini",
            PropertyKind::WebVersion => "web_mini_version",
            PropertyKind::MiniVersion => "mini_version",
            PropertyKind::AppIcon => "app_icon_mini",
        }
    }

    /// Number of arguments the declaration takes.
    pub fn arity(&self) -> usize {
        match self {
            PropertyKind::WebPackage => 0,
            _ => 1,
        }
    }
}

/// `keyword(argument?);`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    /// Which property is set
    pub kind: PropertyKind,
    /// The argument, present exactly when the property's arity is 1
    pub argument: Option<Expr>,
    /// Position of the keyword
    pub span: Span,
}

/// Style reference in a body header.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleRef {
    /// `style: "name"`
    Literal(String),
    /// `style: name`, resolved in scope or used verbatim
    Name(String),
}

/// `body@ (style: ...) ... /body`
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDecl {
    /// Optional style reference
    pub style: Option<StyleRef>,
    /// Nested statements
    pub content: Vec<Stmt>,
    /// Position of the `body` keyword
    pub span: Span,
}

/// `target(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    /// Name of the called binding
    pub callee: String,
    /// Argument expressions
    pub args: Vec<Expr>,
    /// Position of the callee (or the `call` keyword)
    pub span: Span,
}

/// `if (test) { ... } else ...`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    /// Condition
    pub test: Expr,
    /// Taken when the condition is truthy
    pub consequent: Block,
    /// `else` block or nested `if`
    pub alternate: Option<Box<Stmt>>,
    /// Position of the `if` keyword
    pub span: Span,
}

/// `while (test) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    /// Condition
    pub test: Expr,
    /// Loop body
    pub body: Block,
    /// Position of the `while` keyword
    pub span: Span,
}

/// `for (init; test; update) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    /// Variable declaration or expression statement
    pub init: Option<Box<Stmt>>,
    /// Condition; absent means always true
    pub test: Option<Expr>,
    /// Evaluated after each iteration
    pub update: Option<Expr>,
    /// Loop body
    pub body: Block,
    /// Position of the `for` keyword
    pub span: Span,
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `{ ... }`
    Block(Block),
    /// `let` / `const`
    VarDecl(VarDecl),
    /// `func`
    Function(FunctionDecl),
    /// Domain property declaration
    Property(PropertyDecl),
    /// Body section
    Body(BodyDecl),
    /// `call target(args);`
    Call(CallExpr),
    /// `if`
    If(IfStmt),
    /// `while`
    While(WhileStmt),
    /// `for`
    For(ForStmt),
    /// `return value?;`
    Return {
        /// Returned value; absent means null
        value: Option<Expr>,
        /// Position of the keyword
        span: Span,
    },
    /// `break;`
    Break {
        /// Position of the keyword
        span: Span,
    },
    /// `continue;`
    Continue {
        /// Position of the keyword
        span: Span,
    },
    /// `expr;`
    Expression {
        /// The expression
        expression: Expr,
        /// Position of the expression's first token
        span: Span,
    },
}

impl Stmt {
    /// Position of the statement's first token.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(b) => b.span,
            Stmt::VarDecl(d) => d.span,
            Stmt::Function(f) => f.span,
            Stmt::Property(p) => p.span,
            Stmt::Body(b) => b.span,
            Stmt::Call(c) => c.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Return { span, .. }
            | Stmt::Break { span }
            | Stmt::Continue { span }
            | Stmt::Expression { span, .. } => *span,
        }
    }

    /// Human-readable node kind, used in trace logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Block(_) => "block",
            Stmt::VarDecl(_) => "variable declaration",
            Stmt::Function(_) => "function declaration",
            Stmt::Property(_) => "property declaration",
            Stmt::Body(_) => "body section",
            Stmt::Call(_) => "call statement",
            Stmt::If(_) => "if",
            Stmt::While(_) => "while",
            Stmt::For(_) => "for",
            Stmt::Return { .. } => "return",
            Stmt::Break { .. } => "break",
            Stmt::Continue { .. } => "continue",
            Stmt::Expression { .. } => "expression statement",
        }
    }
}

/// Binary operators, including the short-circuit logical ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl UnaryOp {
    /// Source spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Name reference
    Identifier {
        /// The name
        name: String,
        /// Position
        span: Span,
    },
    /// Numeric literal
    Number {
        /// Value
        value: f64,
        /// Position
        span: Span,
    },
    /// String literal
    String {
        /// Contents without quotes
        value: String,
        /// Position
        span: Span,
    },
    /// `true` / `false`
    Boolean {
        /// Value
        value: bool,
        /// Position
        span: Span,
    },
    /// `null`
    Null {
        /// Position
        span: Span,
    },
    /// `left op right`
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
        /// Position of the left operand
        span: Span,
    },
    /// `op operand`
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
        /// Position of the operator
        span: Span,
    },
    /// `target = value`
    Assign {
        /// Assigned name
        target: String,
        /// New value
        value: Box<Expr>,
        /// Position of the target
        span: Span,
    },
    /// `target(args)`
    Call(CallExpr),
}

impl Expr {
    /// Position of the expression's first token.
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier { span, .. }
            | Expr::Number { span, .. }
            | Expr::String { span, .. }
            | Expr::Boolean { span, .. }
            | Expr::Null { span }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Assign { span, .. } => *span,
            Expr::Call(call) => call.span,
        }
    }
}
