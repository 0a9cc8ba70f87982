//! Element Types
//!
//! Every element gets the style-attribute and dataset synchronizers; an
//! element kind adds its own behaviors on top. Kind-specific accessors live
//! in the submodules as `Document` methods.

mod style;
mod svg;

use crate::node::{ElementKind, Node};
use crate::sync::{StyleSheetSync, dataset, style_attribute};

/// Wire the behaviors and observers of a freshly created element
pub(crate) fn construct(node: &mut Node) {
    let Some(kind) = node.as_element().map(|e| e.kind) else {
        return;
    };

    style_attribute::install(node);
    dataset::install(node);

    match kind {
        ElementKind::Style => StyleSheetSync::install(node),
        ElementKind::Html | ElementKind::Svg => {}
    }
}
