//! File-based commands: run, check and tokens

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use mini_lang::{AppDescription, BodyContent, EvalContext, Value};
use thiserror::Error;

/// Source files must carry this extension.
const EXTENSION: &str = "mini";

/// A problem with how the command was invoked rather than with the program.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(String);

/// Map a failure to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<UsageError>().is_some() {
        2
    } else {
        1
    }
}

fn read_source(file: &str) -> Result<String> {
    let path = Path::new(file);
    if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
        return Err(UsageError(format!("{} is not a .{} file", file, EXTENSION)).into());
    }
    if !path.is_file() {
        return Err(UsageError(format!("{} does not exist", file)).into());
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", file))?;
    debug!("read {} bytes from {}", source.len(), file);
    Ok(source)
}

/// Execute a program and report what it produced.
pub fn run(file: &str, json: bool, max_call_depth: usize) -> Result<()> {
    let source = read_source(file)?;
    let ctx = EvalContext::with_max_call_depth(max_call_depth);

    let out = mini_lang::run_with_context(&source, ctx).with_context(|| file.to_string())?;
    info!("{} ran to completion", file);

    for line in &out.output {
        println!("{}", line);
    }

    if json {
        println!("{}", out.app.to_json_pretty()?);
    } else {
        print_description(&out.app);
        if out.value != Value::Null {
            println!("=> {}", out.value);
        }
    }
    Ok(())
}

/// Lex and parse only.
pub fn check(file: &str) -> Result<()> {
    let source = read_source(file)?;
    let program = mini_lang::parse(&source).with_context(|| file.to_string())?;
    println!("{}: ok ({} statements)", file, program.body.len());
    Ok(())
}

/// Print one token per line as `line:column kind lexeme`.
pub fn tokens(file: &str) -> Result<()> {
    let source = read_source(file)?;
    let tokens = mini_lang::tokenize(&source)
        .map_err(mini_lang::Error::from)
        .with_context(|| file.to_string())?;

    for token in &tokens {
        let position = token.span.to_string();
        println!("{:<8} {:<16} {}", position, token.kind.describe(), token.lexeme);
    }
    Ok(())
}

fn print_description(app: &AppDescription) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("name:         {}", field(&app.name));
    println!("web package:  {}", app.is_web_package);
    println!("web version:  {}", field(&app.web_version));
    println!("mini version: {}", field(&app.mini_version));
    println!("icon:         {}", field(&app.icon_path));

    let Some(body) = &app.body else {
        return;
    };
    println!(
        "body (style: {}):",
        body.style_reference.as_deref().unwrap_or("-")
    );
    for item in &body.content {
        match item {
            BodyContent::Text { text } => println!("  {}", text),
            BodyContent::Call { target, output } => println!("  {}() -> {}", target, output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_extension_is_usage_error() {
        let err = read_source("program.txt").unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_missing_file_is_usage_error() {
        let err = read_source("definitely/not/here.mini").unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_program_errors_exit_one() {
        let err = anyhow::Error::new(mini_lang::run("1 / 0;").unwrap_err());
        assert_eq!(exit_code(&err), 1);
    }
}
