//! Error types for lexing, parsing and evaluation

use thiserror::Error;

use crate::eval::ControlFlow;
use crate::span::Span;
use crate::value::Value;

/// Errors raised while turning source text into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A `/*` comment was never closed
    #[error("unterminated block comment starting at {span}")]
    UnterminatedComment {
        /// Position of the opening `/*`
        span: Span,
    },

    /// A string literal reached end of input before its closing quote
    #[error("unterminated string literal starting at {span}")]
    UnterminatedString {
        /// Position of the opening quote
        span: Span,
    },

    /// A character that matches no lexical rule
    #[error("unexpected character `{ch}` at {span}")]
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// Where it was found
        span: Span,
    },
}

impl LexError {
    /// Source position of the error.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedComment { span }
            | LexError::UnterminatedString { span }
            | LexError::UnexpectedChar { span, .. } => *span,
        }
    }
}

/// Errors raised by the parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A required token is missing
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        /// What the grammar required here
        expected: String,
        /// Description of the token actually present
        found: String,
        /// Position of the found token
        span: Span,
    },

    /// Left-hand side of `=` is not an identifier
    #[error("invalid assignment target at {span}: only identifiers can be assigned")]
    InvalidAssignTarget {
        /// Position of the target expression
        span: Span,
    },

    /// A domain property declaration with the wrong number of arguments
    #[error("`{keyword}` takes {expected} argument(s), found {found} at {span}")]
    PropertyArity {
        /// Keyword spelling
        keyword: String,
        /// Required argument count
        expected: usize,
        /// Supplied argument count
        found: usize,
        /// Position of the keyword
        span: Span,
    },
}

impl ParseError {
    /// Source position of the error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidAssignTarget { span }
            | ParseError::PropertyArity { span, .. } => *span,
        }
    }
}

/// Binding errors raised by the environment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    /// Name already bound in the same frame
    #[error("`{name}` is already declared in this scope (at {previous}), redeclared at {span}")]
    AlreadyDeclared {
        /// The name
        name: String,
        /// Where the redeclaration happened
        span: Span,
        /// Where the existing binding was declared
        previous: Span,
    },

    /// Name not found anywhere in the scope chain
    #[error("undeclared name `{name}` at {span}")]
    Undeclared {
        /// The name
        name: String,
        /// Where it was referenced
        span: Span,
    },

    /// Assignment to a `const` (or function) binding
    #[error("cannot assign to constant `{name}` at {span} (declared at {declared})")]
    ConstReassignment {
        /// The name
        name: String,
        /// Where the assignment happened
        span: Span,
        /// Where the binding was declared
        declared: Span,
    },

    /// Too many nested calls
    #[error("stack overflow: call depth {depth} exceeds maximum {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Errors raised while evaluating a program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Binding failure
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// Calling something that is not a function
    #[error("`{name}` is not callable: found `{found}` at {span}")]
    NotCallable {
        /// Call target name
        name: String,
        /// Type of the value found
        found: String,
        /// Position of the call
        span: Span,
    },

    /// Wrong number of arguments
    #[error("`{name}` expects {expected} argument(s), got {got} at {span}")]
    ArityMismatch {
        /// Function name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
        /// Position of the call
        span: Span,
    },

    /// Operand types not accepted by an operator
    #[error("type error at {span}: {message}")]
    TypeError {
        /// Description of the mismatch
        message: String,
        /// Position of the operation
        span: Span,
    },

    /// `/` or `%` with a zero right operand
    #[error("division by zero at {span}")]
    DivisionByZero {
        /// Position of the operation
        span: Span,
    },

    /// `break` with no enclosing loop
    #[error("`break` outside of a loop at {span}")]
    BreakOutsideLoop {
        /// Position of the statement
        span: Span,
    },

    /// `continue` with no enclosing loop
    #[error("`continue` outside of a loop at {span}")]
    ContinueOutsideLoop {
        /// Position of the statement
        span: Span,
    },

    /// Domain property (or body section) declared twice
    #[error("duplicate declaration of `{property}` at {span}")]
    DuplicateProperty {
        /// Property name
        property: String,
        /// Position of the second declaration
        span: Span,
    },

    /// A native function reported a failure
    #[error("error in builtin `{name}` at {span}: {message}")]
    BuiltinError {
        /// Builtin name
        name: String,
        /// Failure description
        message: String,
        /// Position of the call
        span: Span,
    },
}

impl EvalError {
    /// Source position of the error, if one is known.
    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::Environment(e) => match e {
                EnvironmentError::AlreadyDeclared { span, .. }
                | EnvironmentError::Undeclared { span, .. }
                | EnvironmentError::ConstReassignment { span, .. } => Some(*span),
                EnvironmentError::StackOverflow { .. } => None,
            },
            EvalError::NotCallable { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::TypeError { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::BreakOutsideLoop { span }
            | EvalError::ContinueOutsideLoop { span }
            | EvalError::DuplicateProperty { span, .. }
            | EvalError::BuiltinError { span, .. } => Some(*span),
        }
    }

    /// Convert a loop signal that escaped every loop into an error.
    pub(crate) fn stray(flow: &ControlFlow) -> Option<EvalError> {
        match flow {
            ControlFlow::Break { span } => Some(EvalError::BreakOutsideLoop { span: *span }),
            ControlFlow::Continue { span } => Some(EvalError::ContinueOutsideLoop { span: *span }),
            ControlFlow::Normal | ControlFlow::Return { .. } => None,
        }
    }
}

/// Main error type for the whole pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Lexing failed
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    /// Parsing failed
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    /// Evaluation failed
    #[error("runtime error: {0}")]
    Eval(#[from] EvalError),
}

impl Error {
    /// Stable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lexical",
            Error::Parse(_) => "syntax",
            Error::Eval(EvalError::Environment(EnvironmentError::StackOverflow { .. })) => {
                "runtime"
            }
            Error::Eval(EvalError::Environment(_)) => "binding",
            Error::Eval(_) => "runtime",
        }
    }

    /// Source position of the error, if one is known.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Lex(e) => Some(e.span()),
            Error::Parse(e) => Some(e.span()),
            Error::Eval(e) => e.span(),
        }
    }
}

impl From<EnvironmentError> for Error {
    fn from(err: EnvironmentError) -> Self {
        Error::Eval(EvalError::Environment(err))
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Get the user-facing type name of a value.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Function(_) => "function",
        Value::Builtin(_) => "builtin",
    }
}
