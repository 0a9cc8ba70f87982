//! Element Attributes
//!
//! Notifying attribute map. Every set/remove is committed first, then
//! published synchronously to the registered observers in registration
//! order. A failing observer stops the remaining observers and its error
//! reaches the caller; the committed change is not rolled back.

use std::collections::HashMap;
use std::fmt;

use crate::NodeId;
use crate::keys::Slots;

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
    pub owner_element: NodeId,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>, owner_element: NodeId) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            owner_element,
        }
    }
}

/// Kind of attribute notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeEvent {
    Set,
    Remove,
}

/// Error raised by an attribute observer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("observer of attribute `{attribute}` failed: {message}")]
pub struct ObserverError {
    pub attribute: String,
    pub message: String,
}

impl ObserverError {
    pub fn new(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

/// Observer callback.
///
/// Receives the map with the change already committed, the affected record
/// (`None` for the removal of an attribute that was never present) and the
/// owner's slot table.
pub type AttributeObserver =
    Box<dyn Fn(&NamedNodeMap, Option<&Attr>, &mut Slots) -> Result<(), ObserverError>>;

/// Named node map (attribute collection)
pub struct NamedNodeMap {
    owner: NodeId,
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
    observers: Vec<(AttributeEvent, AttributeObserver)>,
}

impl NamedNodeMap {
    pub fn new(owner: NodeId) -> Self {
        Self {
            owner,
            attributes: Vec::new(),
            by_name: HashMap::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for one kind of notification
    pub fn add_observer(&mut self, event: AttributeEvent, observer: AttributeObserver) {
        self.observers.push((event, observer));
    }

    /// Get number of attributes
    pub fn length(&self) -> usize {
        self.attributes.len()
    }

    /// Get attribute by index
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    /// Get attribute by name
    pub fn get_named_item(&self, name: &str) -> Option<&Attr> {
        self.by_name.get(name).and_then(|&i| self.attributes.get(i))
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.get_named_item(name).map(|a| a.value.as_str())
    }

    /// Set attribute, then notify `Set` observers
    pub fn set_attribute(&mut self, name: &str, value: &str, slots: &mut Slots) -> Result<(), ObserverError> {
        let index = match self.by_name.get(name) {
            Some(&index) => {
                self.attributes[index].value = value.to_string();
                index
            }
            None => {
                let index = self.attributes.len();
                self.by_name.insert(name.to_string(), index);
                self.attributes.push(Attr::new(name, value, self.owner));
                index
            }
        };

        self.notify(AttributeEvent::Set, self.attributes.get(index), slots)
    }

    /// Remove attribute by name, then notify `Remove` observers
    pub fn remove_named_item(&mut self, name: &str, slots: &mut Slots) -> Result<Option<Attr>, ObserverError> {
        let removed = match self.by_name.remove(name) {
            Some(index) => {
                // Update indices for items after removed
                for idx in self.by_name.values_mut() {
                    if *idx > index {
                        *idx -= 1;
                    }
                }
                Some(self.attributes.remove(index))
            }
            None => None,
        };

        self.notify(AttributeEvent::Remove, removed.as_ref(), slots)?;
        Ok(removed)
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Toggle attribute
    pub fn toggle_attribute(&mut self, name: &str, force: Option<bool>, slots: &mut Slots) -> Result<bool, ObserverError> {
        let present = self.has_attribute(name);
        match force {
            Some(true) | None if !present => {
                self.set_attribute(name, "", slots)?;
                Ok(true)
            }
            Some(false) | None if present => {
                self.remove_named_item(name, slots)?;
                Ok(false)
            }
            _ => Ok(present),
        }
    }

    /// Get attribute names
    pub fn get_attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Iterate over attributes
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }

    fn notify(&self, event: AttributeEvent, attr: Option<&Attr>, slots: &mut Slots) -> Result<(), ObserverError> {
        for (kind, observer) in &self.observers {
            if *kind == event {
                observer(self, attr, slots)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for NamedNodeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedNodeMap")
            .field("owner", &self.owner)
            .field("attributes", &self.attributes)
            .field("observers", &self.observers.len())
            .finish()
    }
}
