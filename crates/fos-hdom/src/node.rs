//! DOM Node
//!
//! Arena node with sibling links (NodeId instead of pointers), the
//! connection flag, an internal-key slot table and the ordered list of
//! behaviors layered on the base mutation protocol.

use std::rc::Rc;

use crate::NodeId;
use crate::attributes::NamedNodeMap;
use crate::behavior::NodeBehavior;
use crate::keys::Slots;

/// DOM Node - Core structure
pub struct Node {
    /// Parent node (NONE if detached)
    pub(crate) parent: NodeId,
    /// First child
    pub(crate) first_child: NodeId,
    /// Last child (for O(1) append)
    pub(crate) last_child: NodeId,
    /// Previous sibling
    pub(crate) prev_sibling: NodeId,
    /// Next sibling
    pub(crate) next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
    pub(crate) connected: bool,
    pub(crate) released: bool,
    pub(crate) slots: Slots,
    pub(crate) behaviors: Vec<Rc<dyn NodeBehavior>>,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
            connected: false,
            released: false,
            slots: Slots::new(),
            behaviors: Vec::new(),
        }
    }

    /// Create a new element node
    pub fn element(id: NodeId, namespace: Namespace, local_name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(id, namespace, local_name)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(TextData { content }))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a document node (always connected)
    pub fn document() -> Self {
        let mut node = Self::with_data(NodeData::Document);
        node.connected = true;
        node
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Whether this node can hold children
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.data, NodeData::Document | NodeData::Element(_))
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }

    /// Slot table, addressed by internal keys
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Attributes and slots borrowed together, so attribute observers can
    /// reach the owner's slots
    pub(crate) fn attributes_and_slots(&mut self) -> Option<(&mut NamedNodeMap, &mut Slots)> {
        match &mut self.data {
            NodeData::Element(e) => Some((&mut e.attributes, &mut self.slots)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("parent", &self.parent)
            .field("first_child", &self.first_child)
            .field("next_sibling", &self.next_sibling)
            .field("data", &self.data)
            .field("connected", &self.connected)
            .field("behaviors", &self.behaviors.iter().map(|b| b.name()).collect::<Vec<_>>())
            .finish()
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Html,
    Svg,
}

/// Element type, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// HTML `<style>`: keeps a style sheet in sync with its text content
    Style,
    /// Any other HTML element
    Html,
    /// Any SVG element
    Svg,
}

impl ElementKind {
    pub fn classify(namespace: Namespace, local_name: &str) -> Self {
        match namespace {
            Namespace::Svg => Self::Svg,
            Namespace::Html if local_name.eq_ignore_ascii_case("style") => Self::Style,
            Namespace::Html => Self::Html,
        }
    }
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Local name (lowercase for HTML)
    pub local_name: String,
    pub namespace: Namespace,
    pub kind: ElementKind,
    /// Attributes (notifying)
    pub attributes: NamedNodeMap,
}

impl ElementData {
    pub fn new(id: NodeId, namespace: Namespace, local_name: &str) -> Self {
        let local_name = match namespace {
            Namespace::Html => local_name.to_ascii_lowercase(),
            Namespace::Svg => local_name.to_string(),
        };
        Self {
            kind: ElementKind::classify(namespace, &local_name),
            local_name,
            namespace,
            attributes: NamedNodeMap::new(id),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get_attribute(name)
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ElementKind::classify(Namespace::Html, "STYLE"), ElementKind::Style);
        assert_eq!(ElementKind::classify(Namespace::Html, "div"), ElementKind::Html);
        assert_eq!(ElementKind::classify(Namespace::Svg, "style"), ElementKind::Svg);
    }

    #[test]
    fn test_html_names_are_lowercased() {
        let node = Node::element(NodeId(1), Namespace::Html, "DIV");
        assert_eq!(node.as_element().map(|e| e.local_name.as_str()), Some("div"));

        let svg = Node::element(NodeId(2), Namespace::Svg, "clipPath");
        assert_eq!(svg.as_element().map(|e| e.local_name.as_str()), Some("clipPath"));
    }

    #[test]
    fn test_document_is_connected() {
        assert!(Node::document().is_connected());
        assert!(!Node::text("x".into()).is_connected());
        assert!(!Node::text("x".into()).is_container());
    }
}
