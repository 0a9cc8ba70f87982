//! Style attribute synchronizer
//!
//! The `style` attribute is the source of truth. The declaration object is
//! created on first read from the attribute's current value; after that,
//! attribute writes push into it through observers. Writes through the
//! declaration are serialized back into the attribute by the caller.

use fos_cssom::CssStyleDeclaration;
use tracing::trace;

use crate::NodeId;
use crate::attributes::{Attr, AttributeEvent, NamedNodeMap, ObserverError};
use crate::keys::{self, Slots};
use crate::lazy::LazySlot;
use crate::node::Node;
use crate::operations::{DomError, DomResult};
use crate::tree::DomTree;

/// Name of the synchronized attribute
pub const STYLE_ATTRIBUTE: &str = "style";

pub(crate) fn install(node: &mut Node) {
    node.slots.insert(keys::style(), LazySlot::Vacant);
    if let Some((attributes, _)) = node.attributes_and_slots() {
        attributes.add_observer(AttributeEvent::Set, Box::new(on_set));
        attributes.add_observer(AttributeEvent::Remove, Box::new(on_remove));
    }
}

fn on_set(_attributes: &NamedNodeMap, attr: Option<&Attr>, slots: &mut Slots) -> Result<(), ObserverError> {
    let Some(attr) = attr.filter(|a| a.name == STYLE_ATTRIBUTE) else {
        return Ok(());
    };
    if let Some(style) = slots.get_mut(keys::style()).and_then(LazySlot::get_mut) {
        trace!("Pushing style attribute of {:?} into declaration", attr.owner_element);
        style.set_css_text(&attr.value);
    }
    Ok(())
}

fn on_remove(_attributes: &NamedNodeMap, attr: Option<&Attr>, slots: &mut Slots) -> Result<(), ObserverError> {
    if !attr.is_some_and(|a| a.name == STYLE_ATTRIBUTE) {
        return Ok(());
    }
    if let Some(style) = slots.get_mut(keys::style()).and_then(LazySlot::get_mut) {
        style.set_css_text("");
    }
    Ok(())
}

/// Declaration of `id`, materialized from the attribute on first access
pub(crate) fn materialize(tree: &mut DomTree, id: NodeId) -> DomResult<&mut CssStyleDeclaration> {
    let options = tree.css_options();
    let node = tree.node_mut(id)?;
    let (attributes, slots) = node.attributes_and_slots().ok_or(DomError::InvalidNodeType)?;
    let current = attributes.get_attribute(STYLE_ATTRIBUTE);
    let slot = slots.get_mut(keys::style()).ok_or(DomError::InvalidNodeType)?;

    slot.get_or_init(|| {
        trace!("Materializing style declaration of {:?}", id);
        let mut style = CssStyleDeclaration::with_options(options);
        style.set_css_text(current.unwrap_or(""));
        style
    })
    .ok_or(DomError::Released)
}
