//! CSS Parser using lightningcss
//!
//! Parses rule lists and declaration blocks into owned CSSOM values.

use lightningcss::declaration::DeclarationBlock;
use lightningcss::properties::Property;
use lightningcss::rules::CssRule as ParsedRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::{CssRule, CssStyleDeclaration, CssStyleRule, CssomError, Declaration, ParseOptions};

/// CSS Parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CssParser {
    options: ParseOptions,
}

impl CssParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse a rule list (style sheet contents)
    pub fn parse_rules(&self, css: &str) -> Result<Vec<CssRule>, CssomError> {
        let options = ParserOptions {
            error_recovery: self.options.error_recovery,
            ..ParserOptions::default()
        };
        let stylesheet = StyleSheet::parse(css, options)
            .map_err(|e| CssomError::ParseError {
                line: e.loc.as_ref().map(|loc| loc.line).unwrap_or(0),
                message: e.kind.to_string(),
            })?;

        Ok(stylesheet.rules.0.iter().map(|rule| self.convert_rule(rule)).collect())
    }

    /// Parse a declaration block without braces (inline style text)
    pub fn parse_declarations(&self, css: &str) -> Result<Vec<Declaration>, CssomError> {
        let options = ParserOptions {
            error_recovery: self.options.error_recovery,
            ..ParserOptions::default()
        };
        let block = DeclarationBlock::parse_string(css, options)
            .map_err(|e| CssomError::ParseError {
                line: e.location.line,
                message: format!("{:?}", e.kind),
            })?;

        Ok(self.convert_declarations(&block))
    }

    fn convert_rule(&self, rule: &ParsedRule<'_>) -> CssRule {
        match rule {
            ParsedRule::Style(style_rule) => {
                let selector_text = style_rule
                    .selectors
                    .to_css_string(PrinterOptions::default())
                    .unwrap_or_default();
                let declarations = self.convert_declarations(&style_rule.declarations);

                CssRule::Style(CssStyleRule::new(
                    selector_text,
                    CssStyleDeclaration::from_declarations(declarations),
                ))
            }
            // @media, @keyframes etc. are kept as serialized text only
            other => CssRule::Other {
                css_text: other.to_css_string(PrinterOptions::default()).unwrap_or_default(),
            },
        }
    }

    fn convert_declarations(&self, block: &DeclarationBlock<'_>) -> Vec<Declaration> {
        let normal = block.declarations.iter().map(|p| (p, false));
        let important = block.important_declarations.iter().map(|p| (p, true));

        normal
            .chain(important)
            .filter_map(|(property, important)| self.convert_declaration(property, important))
            .collect()
    }

    fn convert_declaration(&self, property: &Property<'_>, important: bool) -> Option<Declaration> {
        let value = property.value_to_css_string(PrinterOptions::default()).ok()?;
        Some(Declaration {
            property: property.property_id().name().to_string(),
            value,
            important,
        })
    }
}
