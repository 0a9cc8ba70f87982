//! Derived-State Synchronizers
//!
//! Keep objects derived from the tree current:
//! - `style_sheet`: `<style>` text content -> parsed style sheet
//! - `style_attribute`: `style` attribute <-> declaration block
//! - `dataset`: `data-*` attributes -> live `DOMStringMap`

pub mod dataset;
pub mod style_attribute;
pub mod style_sheet;

pub use style_sheet::{SheetState, StyleSheetSync};
