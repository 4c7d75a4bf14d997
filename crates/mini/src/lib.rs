//! # Mini
//!
//! Lexer, parser and tree-walking interpreter for the Mini application
//! language.
//!
//! A Mini program mixes declarations that describe an application (its
//! name, versions, icon and a `body@ ... /body` section) with a small
//! imperative core: variables, functions with closures, conditionals and
//! loops. Running a program produces an [`AppDescription`].
//!
//! ## Pipeline
//!
//! - **Lexer**: source text to [`Token`]s ([`tokenize`])
//! - **Parser**: tokens to a [`Program`] ([`parse`])
//! - **Interpreter**: executes the program against an [`Environment`]
//!   ([`run`], [`Interpreter`])
//!
//! ```
//! let out = mini_lang::run(r#"
//!     name_app_mini("Demo");
//!     func add(a, b) { return a + b; }
//!     return add(2, 3);
//! "#).unwrap();
//!
//! assert_eq!(out.app.name.as_deref(), Some("Demo"));
//! assert_eq!(out.value, mini_lang::Value::from(5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;
pub mod value;

use log::info;

// Re-export main types
pub use app::{AppDescription, BodyContent, BodySection};
pub use ast::{Block, Expr, Program, Stmt};
pub use context::EvalContext;
pub use environment::{Binding, BindingKind, Environment, FrameId};
pub use error::{EnvironmentError, Error, EvalError, LexError, ParseError, Result};
pub use eval::{ControlFlow, Evaluate, Execute, Interpreter};
pub use lexer::tokenize;
pub use parser::parse as parse_tokens;
pub use span::Span;
pub use token::{Token, TokenKind};
pub use value::{BuiltinFn, BuiltinFnPtr, FunctionValue, Value};

/// Mini version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// The emitted application description
    pub app: AppDescription,

    /// Value of a top-level `return`, or null
    pub value: Value,

    /// Lines written by `print`
    pub output: Vec<String>,
}

/// Lex and parse source text.
///
/// # Errors
///
/// The first lexical or syntax error. Parsing never starts if lexing
/// fails.
pub fn parse(source: &str) -> Result<Program> {
    let tokens = tokenize(source)?;
    Ok(parser::parse(&tokens)?)
}

/// Lex, parse and execute source text with default settings.
///
/// # Errors
///
/// The first lexical, syntax or runtime error.
pub fn run(source: &str) -> Result<RunOutput> {
    run_with_context(source, EvalContext::default())
}

/// Lex, parse and execute source text with the given configuration.
///
/// # Errors
///
/// The first lexical, syntax or runtime error.
pub fn run_with_context(source: &str, ctx: EvalContext) -> Result<RunOutput> {
    let program = parse(source)?;

    let mut interpreter = Interpreter::with_context(ctx);
    let value = interpreter.execute(&program)?;
    let (app, output) = interpreter.into_parts();

    info!(
        "run finished: {} statements, {} output lines",
        program.body.len(),
        output.len()
    );
    Ok(RunOutput { app, value, output })
}
