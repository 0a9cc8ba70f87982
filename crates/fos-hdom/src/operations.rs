//! DOM Node Operations
//!
//! The base mutation protocol: appendChild, removeChild, insertBefore and the
//! two connection transitions. `DomTree` implements both traits; element
//! behaviors layer their side effects after the base step (see
//! `NodeBehavior`). The connection transitions are crate-private and only
//! run as part of insertion and removal.

use fos_cssom::CssomError;

use crate::NodeId;
use crate::attributes::ObserverError;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
    /// Operation not valid in the node's current state
    #[error("Invalid state")]
    InvalidState,
    /// Node was torn down
    #[error("Node has been released")]
    Released,
    /// An attribute observer failed
    #[error(transparent)]
    Observer(#[from] ObserverError),
    /// A style sheet edit was rejected
    #[error(transparent)]
    Css(#[from] CssomError),
}

/// Node mutation protocol
///
/// Each operation runs the base step, then the behaviors attached to the
/// affected node, in attachment order. Connecting and disconnecting are
/// not part of the public surface:
///
/// ```compile_fail
/// use fos_hdom::{DomTree, NodeId};
///
/// let mut tree = DomTree::new();
/// let style = tree.create_element("style");
/// tree.connected_to_document(style, NodeId::ROOT).unwrap();
/// ```
pub trait MutationProtocol {
    /// Append a child node
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Insert before a reference node (`None` appends)
    fn insert_before(&mut self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId>;
}

/// Connection transitions, driven by insertion and removal
pub(crate) trait ConnectionTransitions {
    /// Connection transition. A no-op when `node` is already connected.
    fn connected_to_document(&mut self, node: NodeId, parent: NodeId) -> DomResult<()>;

    /// Disconnection transition. A no-op when `node` is already disconnected.
    fn disconnected_from_document(&mut self, node: NodeId, parent: NodeId) -> DomResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_error_converts() {
        let err: DomError = ObserverError::new("style", "rejected").into();
        assert_eq!(err.to_string(), "observer of attribute `style` failed: rejected");
    }

    #[test]
    fn test_display() {
        assert_eq!(DomError::NotAChild.to_string(), "Node is not a child");
        assert_eq!(DomError::Released.to_string(), "Node has been released");
    }
}
