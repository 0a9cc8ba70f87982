//! fOS CSS Object Model
//!
//! Style sheets and style declarations for the headless DOM.
//! Parsing is delegated to lightningcss; everything exposed here is owned,
//! so a sheet can outlive the text it was built from.

mod parser;
mod declaration;
mod rule;
mod stylesheet;

pub use parser::CssParser;
pub use declaration::{CssStyleDeclaration, Declaration};
pub use rule::{CssRule, CssStyleRule};
pub use stylesheet::CssStyleSheet;

/// Parse a CSS stylesheet with default options
pub fn parse_stylesheet(css: &str) -> CssStyleSheet {
    let mut sheet = CssStyleSheet::new();
    sheet.replace_sync(css);
    sheet
}

/// Parser options shared by sheets and declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip invalid rules and declarations instead of failing the whole input
    pub error_recovery: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { error_recovery: true }
    }
}

/// CSSOM errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssomError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },

    #[error("Index {index} is out of range for a rule list of length {length}")]
    IndexSize { index: usize, length: usize },

    #[error("Syntax error: expected exactly one rule, found {found}")]
    Syntax { found: usize },
}
