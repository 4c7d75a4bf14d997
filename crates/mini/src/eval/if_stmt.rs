//! If statement execution

use super::{exec_block, ControlFlow, Evaluate, Execute, Interpreter};
use crate::ast::IfStmt;
use crate::EvalError;

impl Execute for IfStmt {
    fn exec(&self, rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
        let test = self.test.eval(rt)?;

        if test.is_truthy() {
            exec_block(&self.consequent, rt)
        } else if let Some(alternate) = &self.alternate {
            // Either a block or a nested `if`
            alternate.exec(rt)
        } else {
            Ok(ControlFlow::Normal)
        }
    }
}
