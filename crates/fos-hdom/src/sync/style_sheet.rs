//! Style sheet synchronizer
//!
//! A `<style>` element owns a sheet only while connected. Connecting parses
//! the current text content into a fresh sheet, any change to the text
//! below it re-parses the sheet in place, and disconnecting drops it.

use std::rc::Rc;

use fos_cssom::CssStyleSheet;
use tracing::debug;

use crate::NodeId;
use crate::behavior::NodeBehavior;
use crate::keys;
use crate::node::Node;
use crate::operations::DomResult;
use crate::tree::DomTree;

/// Sheet slot of a `<style>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetState {
    /// No sheet (element disconnected or never connected)
    #[default]
    Detached,
    /// Sheet parsed from the current text content
    Attached(CssStyleSheet),
}

impl SheetState {
    pub fn sheet(&self) -> Option<&CssStyleSheet> {
        match self {
            Self::Attached(sheet) => Some(sheet),
            Self::Detached => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(_))
    }
}

/// Behavior of `<style>` elements
#[derive(Debug, Default)]
pub struct StyleSheetSync;

impl StyleSheetSync {
    pub(crate) fn install(node: &mut Node) {
        node.slots.insert(keys::sheet(), SheetState::Detached);
        node.behaviors.push(Rc::new(StyleSheetSync));
    }

    /// Re-parse the attached sheet from the element's text content
    fn refresh(tree: &mut DomTree, node: NodeId) -> DomResult<()> {
        let attached = tree
            .node(node)?
            .slots
            .get(keys::sheet())
            .is_some_and(SheetState::is_attached);
        if !attached {
            return Ok(());
        }

        let text = tree.text_content(node)?;
        if let Some(SheetState::Attached(sheet)) = tree.node_mut(node)?.slots.get_mut(keys::sheet()) {
            sheet.replace_sync(&text);
            debug!("Re-parsed style sheet of {:?}: {} rules", node, sheet.len());
        }
        Ok(())
    }
}

impl NodeBehavior for StyleSheetSync {
    fn name(&self) -> &'static str {
        "style-sheet"
    }

    fn after_append(&self, tree: &mut DomTree, node: NodeId, _child: NodeId) -> DomResult<()> {
        Self::refresh(tree, node)
    }

    fn after_remove(&self, tree: &mut DomTree, node: NodeId, _child: NodeId) -> DomResult<()> {
        Self::refresh(tree, node)
    }

    fn after_insert(
        &self,
        tree: &mut DomTree,
        node: NodeId,
        _new_child: NodeId,
        _ref_child: Option<NodeId>,
    ) -> DomResult<()> {
        Self::refresh(tree, node)
    }

    fn after_text_change(&self, tree: &mut DomTree, node: NodeId, _changed: NodeId) -> DomResult<()> {
        Self::refresh(tree, node)
    }

    fn after_connect(&self, tree: &mut DomTree, node: NodeId, _parent: NodeId) -> DomResult<()> {
        if !tree.is_connected(node)? {
            return Ok(());
        }

        let mut sheet = CssStyleSheet::with_options(tree.css_options());
        sheet.replace_sync(&tree.text_content(node)?);
        debug!("Attached style sheet to {:?}: {} rules", node, sheet.len());
        tree.node_mut(node)?
            .slots
            .insert(keys::sheet(), SheetState::Attached(sheet));
        Ok(())
    }

    fn after_disconnect(&self, tree: &mut DomTree, node: NodeId, _parent: NodeId) -> DomResult<()> {
        tree.node_mut(node)?.slots.insert(keys::sheet(), SheetState::Detached);
        debug!("Detached style sheet from {:?}", node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::MutationProtocol;

    fn sheet_text(tree: &DomTree, id: NodeId) -> Option<String> {
        tree.get(id)?.slots.get(keys::sheet())?.sheet().map(|s| s.css_text())
    }

    #[test]
    fn test_sheet_follows_connection() {
        let mut tree = DomTree::new();
        let style = tree.create_element("style");
        let text = tree.create_text("a { color: red; }");
        tree.append_child(style, text).unwrap();
        assert_eq!(sheet_text(&tree, style), None);

        let root = tree.root();
        tree.append_child(root, style).unwrap();
        assert_eq!(sheet_text(&tree, style).as_deref(), Some("a { color: red; }"));

        tree.remove_child(root, style).unwrap();
        assert_eq!(sheet_text(&tree, style), None);
    }

    #[test]
    fn test_text_edit_reparses() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let style = tree.create_element("style");
        let text = tree.create_text("a { color: red; }");
        tree.append_child(style, text).unwrap();
        tree.append_child(root, style).unwrap();

        tree.set_text_content(text, "p { display: none; }").unwrap();
        assert_eq!(sheet_text(&tree, style).as_deref(), Some("p { display: none; }"));
    }

    #[test]
    fn test_nested_text_reparses() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let style = tree.create_element("style");
        let span = tree.create_element("span");
        tree.append_child(style, span).unwrap();
        tree.append_child(root, style).unwrap();

        let text = tree.create_text("a { color: red; }");
        tree.append_child(span, text).unwrap();
        assert_eq!(sheet_text(&tree, style).as_deref(), Some("a { color: red; }"));

        tree.set_text_content(text, "p { display: none; }").unwrap();
        assert_eq!(sheet_text(&tree, style).as_deref(), Some("p { display: none; }"));

        tree.remove_child(span, text).unwrap();
        assert_eq!(sheet_text(&tree, style).as_deref(), Some(""));
    }

    #[test]
    fn test_detached_mutation_keeps_no_sheet() {
        let mut tree = DomTree::new();
        let style = tree.create_element("style");
        let text = tree.create_text("a { color: red; }");
        tree.append_child(style, text).unwrap();
        tree.remove_child(style, text).unwrap();
        assert_eq!(
            tree.get(style).and_then(|n| n.slots.get(keys::sheet())),
            Some(&SheetState::Detached)
        );
    }
}
