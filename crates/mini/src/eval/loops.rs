//! Loop execution

use super::{exec_block, ControlFlow, Evaluate, Execute, Interpreter};
use crate::ast::{Block, ForStmt, WhileStmt};
use crate::EvalError;

/// What a loop does after running its body once.
enum Next {
    Iterate,
    Exit(ControlFlow),
}

/// Run one iteration of a loop body and decide how the loop continues.
///
/// `break` and `continue` are consumed here; `return` leaves the loop and
/// keeps propagating.
fn run_body(body: &Block, rt: &mut Interpreter) -> Result<Next, EvalError> {
    match exec_block(body, rt)? {
        ControlFlow::Normal | ControlFlow::Continue { .. } => Ok(Next::Iterate),
        ControlFlow::Break { .. } => Ok(Next::Exit(ControlFlow::Normal)),
        flow @ ControlFlow::Return { .. } => Ok(Next::Exit(flow)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// while statement
// ═══════════════════════════════════════════════════════════════════════

impl Execute for WhileStmt {
    fn exec(&self, rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
        while self.test.eval(rt)?.is_truthy() {
            if let Next::Exit(flow) = run_body(&self.body, rt)? {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// for statement
// ═══════════════════════════════════════════════════════════════════════

impl Execute for ForStmt {
    fn exec(&self, rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
        // The initializer gets its own scope so `let i` does not leak
        rt.env.push_frame();
        let result = exec_for(self, rt);
        rt.env.pop_frame();
        result
    }
}

fn exec_for(stmt: &ForStmt, rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
    if let Some(init) = &stmt.init {
        let flow = init.exec(rt)?;
        if !flow.is_normal() {
            return Ok(flow);
        }
    }

    loop {
        if let Some(test) = &stmt.test {
            if !test.eval(rt)?.is_truthy() {
                break;
            }
        }

        if let Next::Exit(flow) = run_body(&stmt.body, rt)? {
            return Ok(flow);
        }

        // Runs after `continue` too
        if let Some(update) = &stmt.update {
            update.eval(rt)?;
        }
    }

    Ok(ControlFlow::Normal)
}

#[cfg(test)]
mod tests {
    use crate::eval::Interpreter;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::{EvalError, Value};

    fn run(src: &str) -> (Interpreter, Result<Value, EvalError>) {
        let program = parse(&tokenize(src).unwrap()).unwrap();
        let mut rt = Interpreter::new();
        let result = rt.execute(&program);
        (rt, result)
    }

    #[test]
    fn test_while_counts() {
        let (rt, result) = run("let i = 0; while (i < 5) { i = i + 1; }");
        result.unwrap();
        assert_eq!(rt.env().get("i"), Some(&Value::from(5)));
    }

    #[test]
    fn test_loop_body_frames_are_reused() {
        let src = r#"
            func make_counter() {
                let n = 0;
                func inc() { n = n + 1; return n; }
                return inc;
            }
            let i = 0;
        "#;
        let (mut rt, result) = run(src);
        result.unwrap();
        let before = rt.env().frame_count();

        let src = "while (i < 10) { let c = make_counter(); c(); i = i + 1; }";
        let program = parse(&tokenize(src).unwrap()).unwrap();
        rt.execute(&program).unwrap();

        // Only the captured call frames stay behind
        assert_eq!(rt.env().frame_count(), before + 10);
    }

    #[test]
    fn test_for_runs_three_times() {
        let (mut rt, result) =
            run("for (let i = 0; i < 3; i = i + 1) { print(i); }");
        result.unwrap();
        assert_eq!(rt.take_output(), vec!["0", "1", "2"]);
    }

    #[test]
    fn test_break_on_second_iteration() {
        let src = r#"
            let runs = 0;
            for (let i = 0; i < 3; i = i + 1) {
                runs = runs + 1;
                if (i == 1) { break; }
            }
        "#;
        let (rt, result) = run(src);
        result.unwrap();
        assert_eq!(rt.env().get("runs"), Some(&Value::from(2)));
    }

    #[test]
    fn test_continue_still_runs_update() {
        let src = r#"
            for (let i = 0; i < 4; i = i + 1) {
                if (i % 2 == 0) { continue; }
                print(i);
            }
        "#;
        let (mut rt, result) = run(src);
        result.unwrap();
        assert_eq!(rt.take_output(), vec!["1", "3"]);
    }

    #[test]
    fn test_break_exits_only_inner_loop() {
        let src = r#"
            let total = 0;
            for (let i = 0; i < 3; i = i + 1) {
                while (true) { break; }
                total = total + 1;
            }
        "#;
        let (rt, result) = run(src);
        result.unwrap();
        assert_eq!(rt.env().get("total"), Some(&Value::from(3)));
    }

    #[test]
    fn test_for_initializer_does_not_leak() {
        let (rt, result) = run("for (let i = 0; i < 1; i = i + 1) { }");
        result.unwrap();
        assert_eq!(rt.env().get("i"), None);
    }

    #[test]
    fn test_for_without_test_needs_break() {
        let (rt, result) = run("let n = 0; for (;;) { n = n + 1; if (n == 4) { break; } }");
        result.unwrap();
        assert_eq!(rt.env().get("n"), Some(&Value::from(4)));
    }
}
