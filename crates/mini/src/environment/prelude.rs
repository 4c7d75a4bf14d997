//! Standard prelude with built-in functions

use super::Environment;
use crate::error::type_name;
use crate::value::{BuiltinFn, Value};

impl Environment {
    /// Load the standard prelude into this environment.
    pub fn load_prelude(&mut self) {
        // Output
        self.define_builtin(BuiltinFn {
            name: "print".to_string(),
            arity: -1, // Variadic
            func: builtin_print,
        });

        // Strings
        self.define_builtin(BuiltinFn {
            name: "len".to_string(),
            arity: 1,
            func: builtin_len,
        });

        self.define_builtin(BuiltinFn {
            name: "str".to_string(),
            arity: 1,
            func: builtin_str,
        });

        // Type inspection
        self.define_builtin(BuiltinFn {
            name: "type_of".to_string(),
            arity: 1,
            func: builtin_type_of,
        });

        // Assertions
        self.define_builtin(BuiltinFn {
            name: "assert".to_string(),
            arity: 1,
            func: builtin_assert,
        });

        self.define_builtin(BuiltinFn {
            name: "assert_eq".to_string(),
            arity: 2,
            func: builtin_assert_eq,
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn builtin_print(args: &[Value], output: &mut Vec<String>) -> Result<Value, String> {
    let line = args
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    output.push(line);
    Ok(Value::Null)
}

fn builtin_len(args: &[Value], _output: &mut Vec<String>) -> Result<Value, String> {
    match &args[0] {
        Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
        other => Err(format!("len expects a string, got `{}`", type_name(other))),
    }
}

fn builtin_str(args: &[Value], _output: &mut Vec<String>) -> Result<Value, String> {
    Ok(Value::string(args[0].to_string()))
}

fn builtin_type_of(args: &[Value], _output: &mut Vec<String>) -> Result<Value, String> {
    Ok(Value::string(type_name(&args[0])))
}

fn builtin_assert(args: &[Value], _output: &mut Vec<String>) -> Result<Value, String> {
    if args[0].is_truthy() {
        Ok(Value::Null)
    } else {
        Err(format!("assertion failed: `{:?}` is not truthy", args[0]))
    }
}

fn builtin_assert_eq(args: &[Value], _output: &mut Vec<String>) -> Result<Value, String> {
    if args[0] == args[1] {
        Ok(Value::Null)
    } else {
        Err(format!(
            "assertion failed: `{:?}` != `{:?}`",
            args[0], args[1]
        ))
    }
}
