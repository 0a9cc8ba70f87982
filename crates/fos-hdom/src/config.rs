//! Document configuration

use fos_cssom::ParseOptions;

/// Options for `Document::with_config`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Document URL
    pub url: String,
    /// Build the `<html><head><body>` skeleton
    pub scaffold: bool,
    /// Options for sheets and declarations created in this document
    pub css: ParseOptions,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            scaffold: true,
            css: ParseOptions::default(),
        }
    }
}

impl DocumentConfig {
    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }
}
