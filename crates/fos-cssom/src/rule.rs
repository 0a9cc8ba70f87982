//! CSS Rules

use crate::CssStyleDeclaration;

/// A rule in a style sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule {
    /// Style rule (`selector { declarations }`)
    Style(CssStyleRule),
    /// Any at-rule, kept as serialized text
    Other { css_text: String },
}

impl CssRule {
    pub fn as_style(&self) -> Option<&CssStyleRule> {
        match self {
            Self::Style(rule) => Some(rule),
            Self::Other { .. } => None,
        }
    }

    pub fn css_text(&self) -> String {
        match self {
            Self::Style(rule) => rule.css_text(),
            Self::Other { css_text } => css_text.clone(),
        }
    }
}

/// Style rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssStyleRule {
    selector_text: String,
    style: CssStyleDeclaration,
}

impl CssStyleRule {
    pub fn new(selector_text: String, style: CssStyleDeclaration) -> Self {
        Self { selector_text, style }
    }

    pub fn selector_text(&self) -> &str {
        &self.selector_text
    }

    pub fn style(&self) -> &CssStyleDeclaration {
        &self.style
    }

    pub fn css_text(&self) -> String {
        if self.style.is_empty() {
            format!("{} {{ }}", self.selector_text)
        } else {
            format!("{} {{ {} }}", self.selector_text, self.style.css_text())
        }
    }
}
