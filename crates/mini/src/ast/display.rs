//! Source-text rendering of the AST
//!
//! The output re-lexes and re-parses to a structurally equal tree.
//! Nested binary, unary and assignment expressions are parenthesised so
//! precedence never depends on the printer.

use std::fmt::{self, Display, Formatter};

use super::*;

const INDENT: &str = "    ";

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in &self.body {
            fmt_stmt(f, stmt, 0)?;
        }
        Ok(())
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_stmt(f, self, 0)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name, .. } => f.write_str(name),
            Expr::Number { value, .. } => write!(f, "{}", value),
            Expr::String { value, .. } => write!(f, "\"{}\"", value),
            Expr::Boolean { value, .. } => write!(f, "{}", value),
            Expr::Null { .. } => f.write_str("null"),
            Expr::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Unary { op, operand, .. } => write!(f, "({}{})", op.symbol(), operand),
            Expr::Assign { target, value, .. } => write!(f, "({} = {})", target, value),
            Expr::Call(call) => write!(f, "{}", call),
        }
    }
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.callee)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", TopLevel(arg))?;
        }
        write!(f, ")")
    }
}

/// An expression in a position where outer parentheses are redundant.
struct TopLevel<'a>(&'a Expr);

impl Display for TopLevel<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Binary {
                op, left, right, ..
            } => write!(f, "{} {} {}", left, op.symbol(), right),
            Expr::Assign { target, value, .. } => write!(f, "{} = {}", target, value),
            other => write!(f, "{}", other),
        }
    }
}

fn pad(f: &mut Formatter<'_>, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn fmt_block(f: &mut Formatter<'_>, block: &Block, indent: usize) -> fmt::Result {
    writeln!(f, "{{")?;
    for stmt in &block.body {
        fmt_stmt(f, stmt, indent + 1)?;
    }
    pad(f, indent)?;
    write!(f, "}}")
}

/// Write a statement without leading indentation or trailing newline.
fn fmt_inline(f: &mut Formatter<'_>, stmt: &Stmt, indent: usize) -> fmt::Result {
    match stmt {
        Stmt::Block(block) => fmt_block(f, block, indent),
        Stmt::VarDecl(decl) => {
            let keyword = match decl.kind {
                DeclKind::Let => "let",
                DeclKind::Const => "const",
            };
            match &decl.init {
                Some(init) => write!(f, "{} {} = {};", keyword, decl.name, TopLevel(init)),
                None => write!(f, "{} {};", keyword, decl.name),
            }
        }
        Stmt::Function(func) => {
            write!(f, "func {}({}) ", func.name, func.params.join(", "))?;
            fmt_block(f, &func.body, indent)
        }
        Stmt::Property(prop) => match &prop.argument {
            Some(arg) => write!(f, "{}({});", prop.kind.keyword(), TopLevel(arg)),
            None => write!(f, "{}();", prop.kind.keyword()),
        },
        Stmt::Body(body) => {
            write!(f, "body@")?;
            match &body.style {
                Some(StyleRef::Literal(s)) => write!(f, " (style: \"{}\")", s)?,
                Some(StyleRef::Name(n)) => write!(f, " (style: {})", n)?,
                None => {}
            }
            writeln!(f)?;
            for stmt in &body.content {
                fmt_stmt(f, stmt, indent + 1)?;
            }
            pad(f, indent)?;
            write!(f, "/body")
        }
        Stmt::Call(call) => write!(f, "call {};", call),
        Stmt::If(stmt) => {
            write!(f, "if ({}) ", TopLevel(&stmt.test))?;
            fmt_block(f, &stmt.consequent, indent)?;
            if let Some(alt) = &stmt.alternate {
                write!(f, " else ")?;
                fmt_inline(f, alt, indent)?;
            }
            Ok(())
        }
        Stmt::While(stmt) => {
            write!(f, "while ({}) ", TopLevel(&stmt.test))?;
            fmt_block(f, &stmt.body, indent)
        }
        Stmt::For(stmt) => {
            write!(f, "for (")?;
            match &stmt.init {
                Some(init) => fmt_inline(f, init, indent)?,
                None => write!(f, ";")?,
            }
            if let Some(test) = &stmt.test {
                write!(f, " {}", TopLevel(test))?;
            }
            write!(f, ";")?;
            if let Some(update) = &stmt.update {
                write!(f, " {}", TopLevel(update))?;
            }
            write!(f, ") ")?;
            fmt_block(f, &stmt.body, indent)
        }
        Stmt::Return { value, .. } => match value {
            Some(v) => write!(f, "return {};", TopLevel(v)),
            None => write!(f, "return;"),
        },
        Stmt::Break { .. } => write!(f, "break;"),
        Stmt::Continue { .. } => write!(f, "continue;"),
        Stmt::Expression { expression, .. } => write!(f, "{};", TopLevel(expression)),
    }
}

fn fmt_stmt(f: &mut Formatter<'_>, stmt: &Stmt, indent: usize) -> fmt::Result {
    pad(f, indent)?;
    fmt_inline(f, stmt, indent)?;
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> Expr {
        Expr::Number {
            value,
            span: Span::default(),
        }
    }

    #[test]
    fn test_binary_is_parenthesised_when_nested() {
        let expr = Expr::Binary {
            op: BinaryOp::Mul,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(num(1.0)),
                right: Box::new(num(2.0)),
                span: Span::default(),
            }),
            right: Box::new(num(3.0)),
            span: Span::default(),
        };
        assert_eq!(expr.to_string(), "((1 + 2) * 3)");
        assert_eq!(TopLevel(&expr).to_string(), "(1 + 2) * 3");
    }

    #[test]
    fn test_numbers_print_without_trailing_zero() {
        assert_eq!(num(3.0).to_string(), "3");
        assert_eq!(num(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_property_and_call_statements() {
        let stmt = Stmt::Property(PropertyDecl {
            kind: PropertyKind::WebPackage,
            argument: None,
            span: Span::default(),
        });
        assert_eq!(stmt.to_string(), "web_package_mini();\n");

        let call = Stmt::Call(CallExpr {
            callee: "greet".into(),
            args: vec![num(1.0)],
            span: Span::default(),
        });
        assert_eq!(call.to_string(), "call greet(1);\n");
    }
}
