//! Node Behaviors
//!
//! Element types add side effects to the mutation protocol by attaching
//! behaviors at construction instead of overriding a base class. A behavior
//! is stateless; whatever it derives lives in the node's slots under an
//! internal key. Hooks only run after the base step succeeded, and the
//! connection hooks only run on a real transition.

use crate::operations::DomResult;
use crate::tree::DomTree;
use crate::NodeId;

/// Side effects layered on the base mutation protocol
pub trait NodeBehavior {
    /// Name for logs
    fn name(&self) -> &'static str;

    /// `child` was appended to `node`
    fn after_append(&self, _tree: &mut DomTree, _node: NodeId, _child: NodeId) -> DomResult<()> {
        Ok(())
    }

    /// `child` was removed from `node`
    fn after_remove(&self, _tree: &mut DomTree, _node: NodeId, _child: NodeId) -> DomResult<()> {
        Ok(())
    }

    /// `new_child` was inserted into `node` before `ref_child`
    fn after_insert(
        &self,
        _tree: &mut DomTree,
        _node: NodeId,
        _new_child: NodeId,
        _ref_child: Option<NodeId>,
    ) -> DomResult<()> {
        Ok(())
    }

    /// Text below `node` changed: the data of a descendant text node was
    /// replaced, or a child list deeper than `node`'s own was mutated.
    /// `changed` is the text node or the inserted/removed child.
    fn after_text_change(&self, _tree: &mut DomTree, _node: NodeId, _changed: NodeId) -> DomResult<()> {
        Ok(())
    }

    /// `node` became connected
    fn after_connect(&self, _tree: &mut DomTree, _node: NodeId, _parent: NodeId) -> DomResult<()> {
        Ok(())
    }

    /// `node` became disconnected
    fn after_disconnect(&self, _tree: &mut DomTree, _node: NodeId, _parent: NodeId) -> DomResult<()> {
        Ok(())
    }
}
