//! HTML `<style>` element

use fos_cssom::CssStyleSheet;

use crate::NodeId;
use crate::document::Document;
use crate::keys;
use crate::node::ElementKind;
use crate::operations::{DomError, DomResult};
use crate::sync::SheetState;

impl Document {
    fn check_style_element(&self, id: NodeId) -> DomResult<()> {
        match self.tree().node(id)?.as_element() {
            Some(e) if e.kind == ElementKind::Style => Ok(()),
            _ => Err(DomError::InvalidNodeType),
        }
    }

    /// Current style sheet; `None` while the element is disconnected
    pub fn sheet(&self, id: NodeId) -> DomResult<Option<&CssStyleSheet>> {
        self.check_style_element(id)?;
        let state = self.tree().node(id)?.slots.get(keys::sheet());
        Ok(state.and_then(SheetState::sheet))
    }

    /// Insert a rule into the current sheet
    pub fn insert_rule(&mut self, id: NodeId, rule: &str, index: usize) -> DomResult<usize> {
        Ok(self.sheet_mut(id)?.insert_rule(rule, index)?)
    }

    /// Delete a rule from the current sheet
    pub fn delete_rule(&mut self, id: NodeId, index: usize) -> DomResult<()> {
        Ok(self.sheet_mut(id)?.delete_rule(index)?)
    }

    fn sheet_mut(&mut self, id: NodeId) -> DomResult<&mut CssStyleSheet> {
        self.check_style_element(id)?;
        match self.tree_mut().node_mut(id)?.slots.get_mut(keys::sheet()) {
            Some(SheetState::Attached(sheet)) => Ok(sheet),
            _ => Err(DomError::InvalidState),
        }
    }

    pub fn media(&self, id: NodeId) -> DomResult<&str> {
        self.check_style_element(id)?;
        Ok(self.get_attribute(id, "media")?.unwrap_or(""))
    }

    pub fn set_media(&mut self, id: NodeId, media: &str) -> DomResult<()> {
        self.check_style_element(id)?;
        self.set_attribute(id, "media", media)
    }

    /// The `type` attribute
    pub fn style_type(&self, id: NodeId) -> DomResult<&str> {
        self.check_style_element(id)?;
        Ok(self.get_attribute(id, "type")?.unwrap_or(""))
    }

    pub fn set_style_type(&mut self, id: NodeId, style_type: &str) -> DomResult<()> {
        self.check_style_element(id)?;
        self.set_attribute(id, "type", style_type)
    }

    pub fn disabled(&self, id: NodeId) -> DomResult<bool> {
        self.check_style_element(id)?;
        Ok(self.get_attribute(id, "disabled")?.is_some())
    }

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> DomResult<()> {
        self.check_style_element(id)?;
        self.toggle_attribute(id, "disabled", Some(disabled)).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use crate::Document;

    #[test]
    fn test_reflected_attributes() {
        let mut doc = Document::default();
        let style = doc.create_element("style");

        assert_eq!(doc.media(style).unwrap(), "");
        doc.set_media(style, "screen").unwrap();
        assert_eq!(doc.media(style).unwrap(), "screen");

        doc.set_style_type(style, "text/css").unwrap();
        assert_eq!(doc.style_type(style).unwrap(), "text/css");

        assert!(!doc.disabled(style).unwrap());
        doc.set_disabled(style, true).unwrap();
        assert_eq!(doc.get_attribute(style, "disabled").unwrap(), Some(""));
        doc.set_disabled(style, false).unwrap();
        assert!(!doc.disabled(style).unwrap());
    }

    #[test]
    fn test_rule_editing_needs_sheet() {
        let mut doc = Document::default();
        let style = doc.create_element("style");
        assert!(doc.insert_rule(style, "a { color: red; }", 0).is_err());

        let head = doc.head();
        doc.append_child(head, style).unwrap();
        assert_eq!(doc.insert_rule(style, "a { color: red; }", 0), Ok(0));
        assert_eq!(doc.sheet(style).unwrap().map(|s| s.len()), Some(1));
        doc.delete_rule(style, 0).unwrap();
        assert!(doc.delete_rule(style, 0).is_err());
    }

    #[test]
    fn test_non_style_element_rejected() {
        let mut doc = Document::default();
        let div = doc.create_element("div");
        assert!(doc.sheet(div).is_err());
        assert!(doc.set_media(div, "print").is_err());
    }
}
