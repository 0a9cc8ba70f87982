//! CSS Style Sheet
//!
//! `replace_sync` is total: it never fails and never leaves rules from a
//! previous call behind. Malformed input yields whatever the parser could
//! recover, or an empty sheet.

use crate::{CssParser, CssRule, CssomError, ParseOptions};

/// Parsed style sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssStyleSheet {
    rules: Vec<CssRule>,
    parser: CssParser,
}

impl CssStyleSheet {
    /// Create an empty style sheet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            rules: Vec::new(),
            parser: CssParser::with_options(options),
        }
    }

    /// Replace all rules by parsing `text`
    pub fn replace_sync(&mut self, text: &str) {
        self.rules = match self.parser.parse_rules(text) {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!("Style sheet content absorbed as empty: {}", e);
                Vec::new()
            }
        };
        tracing::trace!("Style sheet replaced: {} rules", self.rules.len());
    }

    pub fn css_rules(&self) -> &[CssRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Insert a single rule at `index`, returning the index
    pub fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, CssomError> {
        if index > self.rules.len() {
            return Err(CssomError::IndexSize { index, length: self.rules.len() });
        }

        let mut parsed = self.parser.parse_rules(rule)?;
        if parsed.len() != 1 {
            return Err(CssomError::Syntax { found: parsed.len() });
        }

        self.rules.insert(index, parsed.remove(0));
        Ok(index)
    }

    /// Delete the rule at `index`
    pub fn delete_rule(&mut self, index: usize) -> Result<(), CssomError> {
        if index >= self.rules.len() {
            return Err(CssomError::IndexSize { index, length: self.rules.len() });
        }
        self.rules.remove(index);
        Ok(())
    }

    /// Serialized rules, one per line
    pub fn css_text(&self) -> String {
        self.rules
            .iter()
            .map(CssRule::css_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
