//! fOS Headless DOM
//!
//! Arena DOM whose elements keep derived state in step with primary state:
//! a `<style>` element's sheet follows its text content while connected, and
//! the inline style declaration follows the `style` attribute.
//!
//! Extension state lives in per-node slots addressed by internal keys, and
//! element types hook into the mutation protocol through behaviors attached
//! at construction.

mod attributes;
mod behavior;
mod config;
mod dataset;
mod document;
mod elements;
mod keys;
mod lazy;
mod node;
mod operations;
mod tree;

pub mod sync;

pub use attributes::{Attr, AttributeEvent, AttributeObserver, NamedNodeMap, ObserverError};
pub use behavior::NodeBehavior;
pub use config::DocumentConfig;
pub use dataset::DOMStringMap;
pub use document::Document;
pub use keys::{InternalKey, Slots};
pub use lazy::LazySlot;
pub use node::{ElementData, ElementKind, Namespace, Node, NodeData, TextData};
pub use operations::{DomError, DomResult, MutationProtocol};
pub use sync::SheetState;
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Invalid/null node
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}
