//! Dataset synchronizer
//!
//! Keeps a materialized `DOMStringMap` in step with the element's `data-*`
//! attributes. Before the first read nothing is tracked.

use tracing::trace;

use crate::NodeId;
use crate::attributes::{Attr, AttributeEvent, NamedNodeMap, ObserverError};
use crate::dataset::DOMStringMap;
use crate::keys::{self, Slots};
use crate::lazy::LazySlot;
use crate::node::Node;
use crate::operations::{DomError, DomResult};
use crate::tree::DomTree;

pub(crate) fn install(node: &mut Node) {
    node.slots.insert(keys::dataset(), LazySlot::Vacant);
    if let Some((attributes, _)) = node.attributes_and_slots() {
        attributes.add_observer(AttributeEvent::Set, Box::new(on_change));
        attributes.add_observer(AttributeEvent::Remove, Box::new(on_change));
    }
}

/// Re-derive the view from the committed attributes; several `data-*`
/// names can fold onto one key
fn on_change(attributes: &NamedNodeMap, attr: Option<&Attr>, slots: &mut Slots) -> Result<(), ObserverError> {
    let Some(attr) = attr.filter(|a| DOMStringMap::key_for_attribute(&a.name).is_some()) else {
        return Ok(());
    };
    if let Some(map) = slots.get_mut(keys::dataset()).and_then(LazySlot::get_mut) {
        trace!("Refreshing dataset of {:?} after {}", attr.owner_element, attr.name);
        *map = DOMStringMap::from_attributes(attributes.iter());
    }
    Ok(())
}

/// Dataset of `id`, materialized from the attributes on first access
pub(crate) fn materialize(tree: &mut DomTree, id: NodeId) -> DomResult<&mut DOMStringMap> {
    let node = tree.node_mut(id)?;
    let (attributes, slots) = node.attributes_and_slots().ok_or(DomError::InvalidNodeType)?;
    let slot = slots.get_mut(keys::dataset()).ok_or(DomError::InvalidNodeType)?;

    slot.get_or_init(|| DOMStringMap::from_attributes(attributes.iter()))
        .ok_or(DomError::Released)
}
