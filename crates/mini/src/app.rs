//! The application description a program emits
//!
//! Property declarations fill single-assignment fields; the body section
//! contributes a style reference and an ordered content list. The record
//! serializes to JSON with camelCase field names.

use std::collections::HashSet;

use serde::Serialize;

use crate::ast::PropertyKind;
use crate::error::EvalError;
use crate::span::Span;

/// One item emitted inside a body section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BodyContent {
    /// A string literal statement
    Text {
        /// The literal text
        text: String,
    },

    /// A `call target(args);` statement
    Call {
        /// Called name
        target: String,
        /// Display text of the call's result
        output: String,
    },
}

/// The body section of the description.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySection {
    /// Style reference from the `body@ (style: ...)` header
    pub style_reference: Option<String>,

    /// Emitted content in execution order
    pub content: Vec<BodyContent>,
}

/// The emitted application description record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescription {
    /// `name_app_mini`
    pub name: Option<String>,

    /// `web_package_mini`
    pub is_web_package: bool,

    /// `web_mini_version`
    pub web_version: Option<String>,

    /// `mini_version`
    pub mini_version: Option<String>,

    /// `app_icon_mini`
    pub icon_path: Option<String>,

    /// The body section, if one was declared
    pub body: Option<BodySection>,

    #[serde(skip)]
    declared: HashSet<PropertyKind>,
}

impl AppDescription {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property once.
    ///
    /// # Errors
    ///
    /// `DuplicateProperty` if the property was already declared.
    pub fn set_property(
        &mut self,
        kind: PropertyKind,
        value: Option<String>,
        span: Span,
    ) -> Result<(), EvalError> {
        if !self.declared.insert(kind) {
            return Err(EvalError::DuplicateProperty {
                property: kind.keyword().to_string(),
                span,
            });
        }

        match kind {
            PropertyKind::AppName => self.name = value,
            PropertyKind::WebPackage => self.is_web_package = true,
            PropertyKind::WebVersion => self.web_version = value,
            PropertyKind::MiniVersion => self.mini_version = value,
            PropertyKind::AppIcon => self.icon_path = value,
        }
        Ok(())
    }

    /// Whether a property has been declared.
    pub fn is_declared(&self, kind: PropertyKind) -> bool {
        self.declared.contains(&kind)
    }

    /// Attach the finished body section.
    ///
    /// # Errors
    ///
    /// `DuplicateProperty` if a body section was already attached.
    pub fn set_body(&mut self, body: BodySection, span: Span) -> Result<(), EvalError> {
        if self.body.is_some() {
            return Err(EvalError::DuplicateProperty {
                property: "body".to_string(),
                span,
            });
        }
        self.body = Some(body);
        Ok(())
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
