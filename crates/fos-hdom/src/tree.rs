//! DOM Tree (arena-based allocation)
//!
//! Owns every node and implements the base mutation protocol. Each protocol
//! operation finishes its structural step (linking, connection cascade)
//! before the behaviors of the affected node run.

use std::rc::Rc;

use fos_cssom::ParseOptions;

use crate::attributes::Attr;
use crate::behavior::NodeBehavior;
use crate::elements;
use crate::keys;
use crate::node::{Namespace, Node, NodeData};
use crate::operations::{ConnectionTransitions, DomError, DomResult, MutationProtocol};
use crate::sync::SheetState;
use crate::NodeId;

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    css_options: ParseOptions,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the (connected) document node
    pub fn new() -> Self {
        Self::with_css_options(ParseOptions::default())
    }

    pub fn with_css_options(css_options: ParseOptions) -> Self {
        Self {
            nodes: vec![Node::document()],
            css_options,
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Options for style sheets and declarations created by this tree
    pub fn css_options(&self) -> ParseOptions {
        self.css_options
    }

    /// Get a node by ID, released nodes included
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID, released nodes included
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Get a live node
    pub fn node(&self, id: NodeId) -> DomResult<&Node> {
        match self.get(id) {
            Some(node) if node.released => Err(DomError::Released),
            Some(node) => Ok(node),
            None => Err(DomError::NotFound),
        }
    }

    /// Get a live node mutably
    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        match self.get_mut(id) {
            Some(node) if node.released => Err(DomError::Released),
            Some(node) => Ok(node),
            None => Err(DomError::NotFound),
        }
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create an HTML element
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.create_element_ns(Namespace::Html, local_name)
    }

    /// Create an element in a namespace, wiring the behaviors of its kind
    pub fn create_element_ns(&mut self, namespace: Namespace, local_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut node = Node::element(id, namespace, local_name);
        elements::construct(&mut node);
        self.push(node)
    }

    /// Create a text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Attach a behavior after the ones the node was constructed with
    pub fn attach_behavior(&mut self, id: NodeId, behavior: Rc<dyn NodeBehavior>) -> DomResult<()> {
        self.node_mut(id)?.behaviors.push(behavior);
        Ok(())
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Child IDs, snapshotted so the tree can be mutated while walking them
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    pub fn is_connected(&self, id: NodeId) -> DomResult<bool> {
        Ok(self.node(id)?.connected)
    }

    /// Concatenated text of all descendant text nodes, in tree order
    pub fn text_content(&self, id: NodeId) -> DomResult<String> {
        let node = self.node(id)?;
        match &node.data {
            NodeData::Text(t) => Ok(t.content.clone()),
            NodeData::Comment(c) => Ok(c.clone()),
            NodeData::Document => Ok(String::new()),
            NodeData::Element(_) => {
                let mut out = String::new();
                self.collect_text(id, &mut out);
                Ok(out)
            }
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for (child, node) in self.children(id) {
            match &node.data {
                NodeData::Text(t) => out.push_str(&t.content),
                NodeData::Element(_) => self.collect_text(child, out),
                _ => {}
            }
        }
    }

    /// Replace text content.
    ///
    /// Elements lose every child through the protocol and gain a single text
    /// node; text and comment nodes have their data replaced, and the
    /// behaviors of every ancestor are told about it.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.node_mut(id)?;
        match &mut node.data {
            NodeData::Text(t) => {
                t.content = text.to_string();
                self.dispatch_content_change(self.parent(id), id)
            }
            NodeData::Comment(c) => {
                *c = text.to_string();
                Ok(())
            }
            NodeData::Document => Ok(()),
            NodeData::Element(_) => {
                for child in self.child_ids(id) {
                    self.remove_child(id, child)?;
                }
                if !text.is_empty() {
                    let text_node = self.create_text(text);
                    self.append_child(id, text_node)?;
                }
                Ok(())
            }
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> DomResult<Option<&str>> {
        let element = self.node(id)?.as_element().ok_or(DomError::InvalidNodeType)?;
        Ok(element.get_attr(name))
    }

    /// Set an attribute; observers run before this returns
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let (attributes, slots) = self
            .node_mut(id)?
            .attributes_and_slots()
            .ok_or(DomError::InvalidNodeType)?;
        attributes.set_attribute(name, value, slots)?;
        Ok(())
    }

    /// Remove an attribute; observers run before this returns
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<Attr>> {
        let (attributes, slots) = self
            .node_mut(id)?
            .attributes_and_slots()
            .ok_or(DomError::InvalidNodeType)?;
        Ok(attributes.remove_named_item(name, slots)?)
    }

    /// Toggle an attribute; observers run before this returns
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: Option<bool>) -> DomResult<bool> {
        let (attributes, slots) = self
            .node_mut(id)?
            .attributes_and_slots()
            .ok_or(DomError::InvalidNodeType)?;
        Ok(attributes.toggle_attribute(name, force, slots)?)
    }

    /// Tear down a node and its subtree.
    ///
    /// The node is removed from its parent through the protocol, cached
    /// derived objects are released and behaviors dropped. Any later access
    /// yields `DomError::Released`.
    pub fn release(&mut self, id: NodeId) -> DomResult<()> {
        if id == NodeId::ROOT {
            return Err(DomError::InvalidNodeType);
        }
        self.node(id)?;
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id)?;
        }
        self.release_subtree(id);
        tracing::debug!("Released node {:?}", id);
        Ok(())
    }

    fn release_subtree(&mut self, id: NodeId) {
        for child in self.child_ids(id) {
            self.release_subtree(child);
        }
        if let Some(node) = self.get_mut(id) {
            if let Some(style) = node.slots.get_mut(keys::style()) {
                style.release();
            }
            if let Some(dataset) = node.slots.get_mut(keys::dataset()) {
                dataset.release();
            }
            if node.slots.contains(keys::sheet()) {
                node.slots.insert(keys::sheet(), SheetState::Detached);
            }
            node.behaviors.clear();
            node.released = true;
        }
    }

    /// Run the behaviors of `node` in attachment order, stopping at the
    /// first failure
    fn dispatch<F>(&mut self, node: NodeId, hook: F) -> DomResult<()>
    where
        F: Fn(&dyn NodeBehavior, &mut DomTree) -> DomResult<()>,
    {
        let behaviors = match self.get(node) {
            Some(n) if !n.released => n.behaviors.clone(),
            _ => return Ok(()),
        };
        for behavior in &behaviors {
            tracing::trace!("Dispatching to {} on {:?}", behavior.name(), node);
            hook(behavior.as_ref(), self)?;
        }
        Ok(())
    }

    /// Tell `from` and each of its ancestors, nearest first, that text below
    /// them changed
    fn dispatch_content_change(&mut self, from: Option<NodeId>, changed: NodeId) -> DomResult<()> {
        let ancestors: Vec<NodeId> = std::iter::successors(from, |&p| self.parent(p)).collect();
        for ancestor in ancestors {
            self.dispatch(ancestor, |b, tree| b.after_text_change(tree, ancestor, changed))?;
        }
        Ok(())
    }

    /// Validate that `child` may be inserted into `parent`
    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        if matches!(self.node(child)?.data, NodeData::Document) {
            return Err(DomError::HierarchyRequest);
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Base insertion: detach from the old parent, link, connect
    fn insert_node(&mut self, parent: NodeId, child: NodeId, before: NodeId) -> DomResult<()> {
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child)?;
        }

        if before.is_valid() {
            self.link_before(parent, child, before);
        } else {
            self.link_append(parent, child);
        }

        if self.node(parent)?.connected {
            self.connected_to_document(child, parent)?;
        }
        Ok(())
    }

    fn link_append(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    fn link_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) {
        let prev = self.nodes[before.index()].prev_sibling;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = before;
        }
        self.nodes[before.index()].prev_sibling = child;
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
    }

    fn unlink(&mut self, child: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[child.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }
}

impl MutationProtocol for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        self.insert_node(parent, child, NodeId::NONE)?;
        self.dispatch(parent, |b, tree| b.after_append(tree, parent, child))?;
        self.dispatch_content_change(self.parent(parent), child)?;
        Ok(child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        let (child_parent, connected) = {
            let node = self.node(child)?;
            (node.parent, node.connected)
        };
        if child_parent != parent {
            return Err(DomError::NotAChild);
        }

        self.unlink(child);
        if connected {
            self.disconnected_from_document(child, parent)?;
        }
        self.dispatch(parent, |b, tree| b.after_remove(tree, parent, child))?;
        self.dispatch_content_change(self.parent(parent), child)?;
        Ok(child)
    }

    fn insert_before(&mut self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId> {
        self.check_insert(parent, new_child)?;

        let mut before = NodeId::NONE;
        if let Some(reference) = ref_child {
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild);
            }
            // Inserting a node before itself means before its next sibling
            before = if reference == new_child {
                self.nodes[reference.index()].next_sibling
            } else {
                reference
            };
        }

        self.insert_node(parent, new_child, before)?;
        self.dispatch(parent, |b, tree| b.after_insert(tree, parent, new_child, ref_child))?;
        self.dispatch_content_change(self.parent(parent), new_child)?;
        Ok(new_child)
    }
}

impl ConnectionTransitions for DomTree {
    fn connected_to_document(&mut self, node: NodeId, parent: NodeId) -> DomResult<()> {
        {
            let n = self.node_mut(node)?;
            if n.connected {
                return Ok(());
            }
            n.connected = true;
        }
        for child in self.child_ids(node) {
            self.connected_to_document(child, node)?;
        }
        self.dispatch(node, |b, tree| b.after_connect(tree, node, parent))
    }

    fn disconnected_from_document(&mut self, node: NodeId, parent: NodeId) -> DomResult<()> {
        {
            let n = self.node_mut(node)?;
            if !n.connected {
                return Ok(());
            }
            n.connected = false;
        }
        for child in self.child_ids(node) {
            self.disconnected_from_document(child, node)?;
        }
        self.dispatch(node, |b, tree| b.after_disconnect(tree, node, parent))
    }
}

/// Iterator over children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Counts connection hooks
    #[derive(Default)]
    struct Transitions {
        connects: Cell<usize>,
        disconnects: Cell<usize>,
    }

    impl NodeBehavior for Transitions {
        fn name(&self) -> &'static str {
            "transitions"
        }

        fn after_connect(&self, _tree: &mut DomTree, _node: NodeId, _parent: NodeId) -> DomResult<()> {
            self.connects.set(self.connects.get() + 1);
            Ok(())
        }

        fn after_disconnect(&self, _tree: &mut DomTree, _node: NodeId, _parent: NodeId) -> DomResult<()> {
            self.disconnects.set(self.disconnects.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_append_and_order() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        let c = tree.create_text("c");

        tree.append_child(div, a).unwrap();
        tree.append_child(div, c).unwrap();
        tree.insert_before(div, b, Some(c)).unwrap();

        assert_eq!(tree.child_ids(div), vec![a, b, c]);
        assert_eq!(tree.text_content(div).unwrap(), "abc");
    }

    #[test]
    fn test_remove_relinks_siblings() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        let c = tree.create_text("c");
        for n in [a, b, c] {
            tree.append_child(div, n).unwrap();
        }

        tree.remove_child(div, b).unwrap();
        assert_eq!(tree.child_ids(div), vec![a, c]);
        assert_eq!(tree.parent(b), None);

        tree.remove_child(div, a).unwrap();
        tree.remove_child(div, c).unwrap();
        assert!(tree.child_ids(div).is_empty());
        assert_eq!(tree.get(div).unwrap().last_child, NodeId::NONE);
    }

    #[test]
    fn test_remove_non_child() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        assert_eq!(tree.remove_child(div, span), Err(DomError::NotAChild));
    }

    #[test]
    fn test_hierarchy_errors() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        let text = tree.create_text("x");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(tree.append_child(inner, outer), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(outer, outer), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(text, inner), Err(DomError::HierarchyRequest));
        let root = tree.root();
        assert_eq!(tree.append_child(outer, root), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_connection_cascades() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();
        assert!(!tree.is_connected(span).unwrap());

        let root = tree.root();
        tree.append_child(root, div).unwrap();
        assert!(tree.is_connected(div).unwrap());
        assert!(tree.is_connected(span).unwrap());

        tree.remove_child(root, div).unwrap();
        assert!(!tree.is_connected(span).unwrap());
    }

    #[test]
    fn test_move_between_parents() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div");
        let second = tree.create_element("div");
        let text = tree.create_text("x");

        tree.append_child(first, text).unwrap();
        tree.append_child(second, text).unwrap();

        assert!(tree.child_ids(first).is_empty());
        assert_eq!(tree.child_ids(second), vec![text]);
    }

    #[test]
    fn test_insert_before_self() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();

        tree.insert_before(div, a, Some(a)).unwrap();
        assert_eq!(tree.child_ids(div), vec![a, b]);
    }

    #[test]
    fn test_release() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("x");
        tree.append_child(div, text).unwrap();

        tree.release(div).unwrap();
        assert_eq!(tree.node(div).err(), Some(DomError::Released));
        assert_eq!(tree.node(text).err(), Some(DomError::Released));
        assert_eq!(tree.release(tree.root()), Err(DomError::InvalidNodeType));
    }

    #[test]
    fn test_connection_hooks_are_idempotent() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let style = tree.create_element("style");
        let counter = Rc::new(Transitions::default());
        tree.attach_behavior(style, counter.clone()).unwrap();

        tree.append_child(root, style).unwrap();
        tree.connected_to_document(style, root).unwrap();
        tree.connected_to_document(style, root).unwrap();
        assert_eq!(counter.connects.get(), 1);

        tree.remove_child(root, style).unwrap();
        tree.disconnected_from_document(style, root).unwrap();
        assert_eq!(counter.disconnects.get(), 1);
    }

    #[test]
    fn test_removal_disconnects_what_insertion_connected() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let div = tree.create_element("div");
        let counter = Rc::new(Transitions::default());
        tree.attach_behavior(div, counter.clone()).unwrap();

        tree.append_child(root, div).unwrap();
        assert_eq!(tree.child_ids(root), vec![div]);
        tree.remove_child(root, div).unwrap();

        assert!(!tree.is_connected(div).unwrap());
        assert_eq!(tree.parent(div), None);
        assert_eq!((counter.connects.get(), counter.disconnects.get()), (1, 1));
    }

    #[test]
    fn test_content_change_reaches_ancestors() {
        #[derive(Default)]
        struct Changes(Cell<usize>);

        impl NodeBehavior for Changes {
            fn name(&self) -> &'static str {
                "changes"
            }

            fn after_text_change(&self, _tree: &mut DomTree, _node: NodeId, _text: NodeId) -> DomResult<()> {
                self.0.set(self.0.get() + 1);
                Ok(())
            }
        }

        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        let text = tree.create_text("a");
        tree.append_child(outer, inner).unwrap();
        let changes = Rc::new(Changes::default());
        tree.attach_behavior(outer, changes.clone()).unwrap();

        // Direct children go through the append hook instead
        tree.append_child(outer, text).unwrap();
        assert_eq!(changes.0.get(), 0);

        tree.append_child(inner, text).unwrap();
        tree.set_text_content(text, "b").unwrap();
        tree.remove_child(inner, text).unwrap();
        assert_eq!(changes.0.get(), 3);
    }
}
