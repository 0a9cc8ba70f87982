//! Document - High-level document API
//!
//! Host-facing surface over `DomTree`. Child mutation goes through the
//! mutation protocol, but the connection transitions are not exposed here;
//! they only run as part of insertion and removal.

use std::rc::Rc;

use fos_cssom::CssStyleDeclaration;

use crate::attributes::{Attr, AttributeEvent, AttributeObserver};
use crate::behavior::NodeBehavior;
use crate::config::DocumentConfig;
use crate::dataset::DOMStringMap;
use crate::node::Namespace;
use crate::operations::{DomError, DomResult, MutationProtocol};
use crate::sync::{dataset, style_attribute};
use crate::tree::DomTree;
use crate::NodeId;

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with the basic structure
    pub fn new(url: &str) -> Self {
        Self::with_config(DocumentConfig::with_url(url))
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self::with_config(DocumentConfig {
            scaffold: false,
            ..DocumentConfig::with_url(url)
        })
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        let mut doc = Self {
            tree: DomTree::with_css_options(config.css),
            url: config.url,
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        };
        if config.scaffold {
            doc.scaffold();
        }
        doc
    }

    fn scaffold(&mut self) {
        let html = self.tree.create_element("html");
        let head = self.tree.create_element("head");
        let body = self.tree.create_element("body");

        // Fresh elements under a fresh root cannot violate the hierarchy
        let root = self.tree.root();
        let linked = self
            .tree
            .append_child(root, html)
            .and_then(|_| self.tree.append_child(html, head))
            .and_then(|_| self.tree.append_child(html, body));
        if let Err(e) = linked {
            tracing::warn!("Failed to build document skeleton: {}", e);
            return;
        }

        self.html_element = html;
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }

        for (id, node) in self.tree.children(self.head_element) {
            if node.as_element().is_some_and(|e| e.local_name == "title") {
                return self.tree.text_content(id).unwrap_or_default().trim().to_string();
            }
        }

        String::new()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element_with_id(self.tree.root(), id)
    }

    fn find_element_with_id(&self, start: NodeId, target_id: &str) -> Option<NodeId> {
        for (node_id, node) in self.tree.children(start) {
            if node.as_element().and_then(|e| e.get_attr("id")) == Some(target_id) {
                return Some(node_id);
            }
            // Recurse into children
            if let Some(found) = self.find_element_with_id(node_id, target_id) {
                return Some(found);
            }
        }
        None
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // Node creation

    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.tree.create_element(local_name)
    }

    pub fn create_element_ns(&mut self, namespace: Namespace, local_name: &str) -> NodeId {
        self.tree.create_element_ns(namespace, local_name)
    }

    pub fn create_text_node(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.tree.create_comment(content)
    }

    /// Layer an extra behavior on a node
    pub fn attach_behavior(&mut self, id: NodeId, behavior: Rc<dyn NodeBehavior>) -> DomResult<()> {
        self.tree.attach_behavior(id, behavior)
    }

    // Tree mutation

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.remove_child(parent, child)
    }

    pub fn insert_before(&mut self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId> {
        self.tree.insert_before(parent, new_child, ref_child)
    }

    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.child_ids(id)
    }

    pub fn is_connected(&self, id: NodeId) -> DomResult<bool> {
        self.tree.is_connected(id)
    }

    pub fn text_content(&self, id: NodeId) -> DomResult<String> {
        self.tree.text_content(id)
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.tree.set_text_content(id, text)
    }

    // Attributes

    pub fn get_attribute(&self, id: NodeId, name: &str) -> DomResult<Option<&str>> {
        self.tree.get_attribute(id, name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.tree.set_attribute(id, name, value)
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<Attr>> {
        self.tree.remove_attribute(id, name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.get_attribute(id, name)?.is_some())
    }

    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: Option<bool>) -> DomResult<bool> {
        self.tree.toggle_attribute(id, name, force)
    }

    /// Register an observer after the ones the element was constructed with
    pub fn add_attribute_observer(&mut self, id: NodeId, event: AttributeEvent, observer: AttributeObserver) -> DomResult<()> {
        let element = self.tree.node_mut(id)?.as_element_mut().ok_or(DomError::InvalidNodeType)?;
        element.attributes.add_observer(event, observer);
        Ok(())
    }

    // Lazy accessors

    /// Style declaration, created from the `style` attribute on first read
    pub fn style(&mut self, id: NodeId) -> DomResult<&CssStyleDeclaration> {
        style_attribute::materialize(&mut self.tree, id).map(|style| &*style)
    }

    /// Replace the inline style text
    pub fn set_style_text(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.tree.set_attribute(id, style_attribute::STYLE_ATTRIBUTE, text)
    }

    /// Set one inline style property and write the result back to the attribute
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str, important: bool) -> DomResult<()> {
        let text = {
            let style = style_attribute::materialize(&mut self.tree, id)?;
            style.set_property(property, value, important);
            style.css_text().to_string()
        };
        self.set_style_text(id, &text)
    }

    /// Remove one inline style property, returning its old value
    pub fn remove_style_property(&mut self, id: NodeId, property: &str) -> DomResult<String> {
        let (old, text) = {
            let style = style_attribute::materialize(&mut self.tree, id)?;
            let old = style.remove_property(property);
            (old, style.css_text().to_string())
        };
        if !old.is_empty() {
            self.set_style_text(id, &text)?;
        }
        Ok(old)
    }

    /// `data-*` view, created on first read and kept live afterwards
    pub fn dataset(&mut self, id: NodeId) -> DomResult<&DOMStringMap> {
        dataset::materialize(&mut self.tree, id).map(|map| &*map)
    }

    pub fn set_dataset_value(&mut self, id: NodeId, key: &str, value: &str) -> DomResult<()> {
        self.set_attribute(id, &DOMStringMap::to_attribute_name(key), value)
    }

    pub fn remove_dataset_value(&mut self, id: NodeId, key: &str) -> DomResult<bool> {
        Ok(self
            .remove_attribute(id, &DOMStringMap::to_attribute_name(key))?
            .is_some())
    }

    /// Tear down a node and its subtree
    pub fn release(&mut self, id: NodeId) -> DomResult<()> {
        if [self.html_element, self.head_element, self.body_element].contains(&id) {
            return Err(DomError::InvalidState);
        }
        self.tree.release(id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
