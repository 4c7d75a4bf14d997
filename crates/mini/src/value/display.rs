//! Display and Debug implementations for Value

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Function(func) => write!(f, "<func {}/{}>", func.name, func.params.len()),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Function(func) => write!(f, "<func {}>", func.name),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(-0.25).to_string(), "-0.25");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn test_debug_quotes_strings() {
        assert_eq!(format!("{:?}", Value::from("hi")), "\"hi\"");
        assert_eq!(format!("{:?}", Value::Number(1.5)), "1.5");
    }
}
