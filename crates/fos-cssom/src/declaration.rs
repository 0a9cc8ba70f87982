//! CSS Style Declaration
//!
//! The object behind `element.style`. `css_text` is the serialized text as
//! last assigned; the parsed declarations are re-derived on every assignment.
//! Malformed text never fails: it leaves an empty declaration list.

use crate::{CssParser, ParseOptions};

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    fn to_css(&self) -> String {
        if self.important {
            format!("{}: {} !important;", self.property, self.value)
        } else {
            format!("{}: {};", self.property, self.value)
        }
    }
}

/// Inline style declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssStyleDeclaration {
    css_text: String,
    declarations: Vec<Declaration>,
    parser: CssParser,
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            parser: CssParser::with_options(options),
            ..Self::default()
        }
    }

    /// Create from serialized text with default options
    pub fn from_css_text(text: &str) -> Self {
        let mut declaration = Self::new();
        declaration.set_css_text(text);
        declaration
    }

    pub(crate) fn from_declarations(declarations: Vec<Declaration>) -> Self {
        Self {
            css_text: serialize(&declarations),
            declarations,
            parser: CssParser::new(),
        }
    }

    /// Serialized text
    pub fn css_text(&self) -> &str {
        &self.css_text
    }

    /// Replace the serialized text and re-derive the parsed declarations
    pub fn set_css_text(&mut self, text: &str) {
        self.css_text = text.to_string();
        self.declarations = match self.parser.parse_declarations(text) {
            Ok(declarations) => declarations,
            Err(e) => {
                tracing::warn!("Discarding malformed style text: {}", e);
                Vec::new()
            }
        };
    }

    /// Number of parsed declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Property name at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.declarations.get(index).map(|d| d.property.as_str())
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Value of a property, or "" when not declared
    pub fn get_property_value(&self, property: &str) -> &str {
        self.find(property).map(|d| d.value.as_str()).unwrap_or("")
    }

    /// "important" or ""
    pub fn get_property_priority(&self, property: &str) -> &str {
        match self.find(property) {
            Some(d) if d.important => "important",
            _ => "",
        }
    }

    /// Set a property. An empty value removes it; an invalid value is ignored.
    pub fn set_property(&mut self, property: &str, value: &str, important: bool) {
        if value.trim().is_empty() {
            self.remove_property(property);
            return;
        }

        let text = if important {
            format!("{property}: {value} !important")
        } else {
            format!("{property}: {value}")
        };

        let parsed = match self.parser.parse_declarations(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Ignoring invalid value for {}: {}", property, e);
                return;
            }
        };

        for declaration in parsed {
            match self.declarations.iter_mut().find(|d| d.property == declaration.property) {
                Some(existing) => *existing = declaration,
                None => self.declarations.push(declaration),
            }
        }
        self.css_text = serialize(&self.declarations);
    }

    /// Remove a property, returning its previous value ("" when absent)
    pub fn remove_property(&mut self, property: &str) -> String {
        let old = self.get_property_value(property).to_string();
        let before = self.declarations.len();
        self.declarations.retain(|d| !d.property.eq_ignore_ascii_case(property));
        if self.declarations.len() != before {
            self.css_text = serialize(&self.declarations);
        }
        old
    }

    fn find(&self, property: &str) -> Option<&Declaration> {
        // Later declarations win
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property.eq_ignore_ascii_case(property))
    }
}

fn serialize(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(Declaration::to_css)
        .collect::<Vec<_>>()
        .join(" ")
}
