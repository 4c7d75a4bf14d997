//! Interactive session

use anyhow::Result;
use log::debug;
use mini_lang::{EvalContext, Interpreter, Program, Stmt, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "mini> ";

/// Run the read-eval-print loop until `:quit` or end of input.
pub fn run(max_call_depth: usize) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut interpreter =
        Interpreter::with_context(EvalContext::with_max_call_depth(max_call_depth));

    println!("Mini {} (type :quit to exit, :app to show the description)", mini_lang::VERSION);

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        editor.add_history_entry(input)?;

        match input {
            ":quit" | ":q" => break,
            ":app" => {
                println!("{}", interpreter.app().to_json_pretty()?);
                continue;
            }
            _ => {}
        }

        match eval_line(&mut interpreter, input) {
            Ok(value) => {
                for out in interpreter.take_output() {
                    println!("{}", out);
                }
                if value != Value::Null {
                    println!("{}", value);
                }
            }
            Err(err) => {
                // Output produced before the failure is still shown
                for out in interpreter.take_output() {
                    println!("{}", out);
                }
                eprintln!("error: {}", err);
            }
        }
    }

    Ok(())
}

/// Parse and execute one line, echoing the value of a lone expression.
fn eval_line(interpreter: &mut Interpreter, input: &str) -> mini_lang::Result<Value> {
    let program = parse_line(input)?;
    debug!("repl line parsed into {} statements", program.body.len());

    if let [Stmt::Expression { expression, .. }] = program.body.as_slice() {
        return Ok(interpreter.evaluate(expression)?);
    }
    Ok(interpreter.execute(&program)?)
}

/// A line without its final `;` is retried with one appended.
fn parse_line(input: &str) -> mini_lang::Result<Program> {
    match mini_lang::parse(input) {
        Ok(program) => Ok(program),
        Err(err) if !input.ends_with(';') && !input.ends_with('}') => {
            mini_lang::parse(&format!("{};", input)).map_err(|_| err)
        }
        Err(err) => Err(err),
    }
}
