//! Domain declarations: application properties and the body section

use log::debug;

use super::{exec_stmts, ActiveBody, ControlFlow, Evaluate, Interpreter};
use crate::app::BodySection;
use crate::ast::{BodyDecl, PropertyDecl, StyleRef};
use crate::EvalError;

/// Record a property declaration in the application description.
///
/// The argument, if any, is evaluated and stored in its display form.
///
/// # Errors
///
/// `DuplicateProperty` if the property was already declared.
pub fn exec_property(decl: &PropertyDecl, rt: &mut Interpreter) -> Result<(), EvalError> {
    let value = match &decl.argument {
        Some(expr) => Some(expr.eval(rt)?.to_string()),
        None => None,
    };

    debug!("property `{}` = {:?}", decl.kind.keyword(), value);
    rt.app.set_property(decl.kind, value, decl.span)
}

/// Execute a body section and attach it to the application description.
///
/// Content statements run in their own scope. String literal statements
/// and `call` statements executed directly in the section (not inside a
/// function it calls) become the section's content, in order.
///
/// # Errors
///
/// `DuplicateProperty` for a second or nested body section, plus any error
/// raised by the content statements.
pub fn exec_body(decl: &BodyDecl, rt: &mut Interpreter) -> Result<ControlFlow, EvalError> {
    if rt.body.is_some() || rt.app.body.is_some() {
        return Err(EvalError::DuplicateProperty {
            property: "body".to_string(),
            span: decl.span,
        });
    }

    let style_reference = decl.style.as_ref().map(|style| resolve_style(style, rt));
    debug!("entering body section (style {:?})", style_reference);

    rt.body = Some(ActiveBody {
        section: BodySection {
            style_reference,
            content: Vec::new(),
        },
        call_depth: rt.env.call_depth(),
    });

    rt.env.push_frame();
    let result = exec_stmts(&decl.content, rt);
    rt.env.pop_frame();

    let active = rt.body.take();
    let flow = result?;

    if let Some(ActiveBody { section, .. }) = active {
        debug!("body section emitted {} items", section.content.len());
        rt.app.set_body(section, decl.span)?;
    }
    Ok(flow)
}

/// A style name bound in scope resolves to its value; otherwise the
/// spelling itself is the reference.
fn resolve_style(style: &StyleRef, rt: &Interpreter) -> String {
    match style {
        StyleRef::Literal(text) => text.clone(),
        StyleRef::Name(name) => rt
            .env
            .get(name)
            .map(|value| value.to_string())
            .unwrap_or_else(|| name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::app::{AppDescription, BodyContent};
    use crate::eval::Interpreter;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::span::Span;
    use crate::EvalError;

    fn run(src: &str) -> (Interpreter, Result<crate::Value, EvalError>) {
        let program = parse(&tokenize(src).unwrap()).unwrap();
        let mut rt = Interpreter::new();
        let result = rt.execute(&program);
        (rt, result)
    }

    fn app(src: &str) -> AppDescription {
        let (rt, result) = run(src);
        result.unwrap();
        rt.app().clone()
    }

    #[test]
    fn test_properties_fill_description() {
        let app = app(r#"
            name_app_mini("Demo");
            web_package_mini();
            web_mini_version("1.2");
            mini_version(3);
            app_icon_mini("icon.png");
        "#);
        assert_eq!(app.name.as_deref(), Some("Demo"));
        assert!(app.is_web_package);
        assert_eq!(app.web_version.as_deref(), Some("1.2"));
        assert_eq!(app.mini_version.as_deref(), Some("3"));
        assert_eq!(app.icon_path.as_deref(), Some("icon.png"));
    }

    #[test]
    fn test_property_argument_is_evaluated() {
        let app = app(r#"let base = "Demo"; name_app_mini(base + " App");"#);
        assert_eq!(app.name.as_deref(), Some("Demo App"));
    }

    #[test]
    fn test_duplicate_property() {
        let (_, result) = run("name_app_mini(\"App\");\nname_app_mini(\"Other\");");
        assert_eq!(
            result.unwrap_err(),
            EvalError::DuplicateProperty {
                property: "name_app_mini".into(),
                span: Span::new(2, 1),
            }
        );
    }

    #[test]
    fn test_web_package_without_version_is_legal() {
        let app = app("web_package_mini();");
        assert!(app.is_web_package);
        assert_eq!(app.web_version, None);
    }

    #[test]
    fn test_body_content_in_order() {
        let app = app(r#"
            func greet(who) { return "hi " + who; }
            body@ (style: "main")
                "Welcome";
                call greet("you");
                let hidden = 1;
                "Bye";
            /body
        "#);
        let body = app.body.unwrap();
        assert_eq!(body.style_reference.as_deref(), Some("main"));
        assert_eq!(
            body.content,
            vec![
                BodyContent::Text {
                    text: "Welcome".into()
                },
                BodyContent::Call {
                    target: "greet".into(),
                    output: "hi you".into()
                },
                BodyContent::Text { text: "Bye".into() },
            ]
        );
    }

    #[test]
    fn test_style_name_resolves_in_scope() {
        let app_with_binding = app(r#"const theme = "dark"; body@ (style: theme) /body"#);
        assert_eq!(
            app_with_binding.body.unwrap().style_reference.as_deref(),
            Some("dark")
        );

        let app_without = app("body@ (style: plain) /body");
        assert_eq!(
            app_without.body.unwrap().style_reference.as_deref(),
            Some("plain")
        );
    }

    #[test]
    fn test_calls_inside_functions_do_not_emit() {
        let app = app(r#"
            func inner() { "not content"; return 1; }
            body@
                call inner();
            /body
        "#);
        assert_eq!(
            app.body.unwrap().content,
            vec![BodyContent::Call {
                target: "inner".into(),
                output: "1".into()
            }]
        );
    }

    #[test]
    fn test_body_scope_does_not_leak() {
        let (rt, result) = run("body@ let x = 1; /body");
        result.unwrap();
        assert_eq!(rt.env().get("x"), None);
    }

    #[test]
    fn test_second_body_fails() {
        let (_, result) = run("body@ /body\nbody@ /body");
        assert_eq!(
            result.unwrap_err(),
            EvalError::DuplicateProperty {
                property: "body".into(),
                span: Span::new(2, 1),
            }
        );
    }

    #[test]
    fn test_nested_body_fails() {
        let (rt, result) = run("body@ body@ /body /body");
        assert!(matches!(
            result,
            Err(EvalError::DuplicateProperty { .. })
        ));
        assert_eq!(rt.app().body, None);
    }
}
