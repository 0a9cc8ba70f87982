//! SVG elements

use crate::NodeId;
use crate::document::Document;
use crate::node::{ElementKind, Namespace};
use crate::operations::{DomError, DomResult};

const TAB_INDEX_ATTRIBUTE: &str = "tabindex";

impl Document {
    fn check_svg_element(&self, id: NodeId) -> DomResult<()> {
        match self.tree().node(id)?.as_element() {
            Some(e) if e.kind == ElementKind::Svg => Ok(()),
            _ => Err(DomError::InvalidNodeType),
        }
    }

    /// Parsed `tabindex`, or -1 when absent or not an integer
    pub fn tab_index(&self, id: NodeId) -> DomResult<i32> {
        self.check_svg_element(id)?;
        Ok(self
            .get_attribute(id, TAB_INDEX_ATTRIBUTE)?
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(-1))
    }

    /// Set `tabindex`; -1 removes the attribute
    pub fn set_tab_index(&mut self, id: NodeId, tab_index: i32) -> DomResult<()> {
        self.check_svg_element(id)?;
        if tab_index == -1 {
            self.remove_attribute(id, TAB_INDEX_ATTRIBUTE)?;
            Ok(())
        } else {
            self.set_attribute(id, TAB_INDEX_ATTRIBUTE, &tab_index.to_string())
        }
    }

    /// Nearest `<svg>` ancestor
    pub fn owner_svg_element(&self, id: NodeId) -> DomResult<Option<NodeId>> {
        self.check_svg_element(id)?;
        let tree = self.tree();
        Ok(tree.ancestors(id).find(|&a| {
            tree.get(a)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.namespace == Namespace::Svg && e.local_name == "svg")
        }))
    }

    /// Viewport element; never computed by the headless DOM
    pub fn viewport_element(&self, id: NodeId) -> DomResult<Option<NodeId>> {
        self.check_svg_element(id)?;
        Ok(None)
    }
}
