//! Internal Keys
//!
//! Opaque tokens addressing hidden per-node slots. A key is minted once per
//! concept and compared by identity: two keys minted with the same label are
//! different keys. Only code holding a key can reach the slot it names, and a
//! slot table cannot be enumerated.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use fos_cssom::CssStyleDeclaration;

use crate::dataset::DOMStringMap;
use crate::lazy::LazySlot;
use crate::sync::SheetState;

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Unforgeable key for a slot holding a `T`
pub struct InternalKey<T> {
    id: u64,
    label: &'static str,
    _slot: PhantomData<fn() -> T>,
}

impl<T: 'static> InternalKey<T> {
    /// Mint a new key. The label is for debugging only.
    pub fn mint(label: &'static str) -> Self {
        Self {
            id: NEXT_KEY.fetch_add(1, Ordering::Relaxed),
            label,
            _slot: PhantomData,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<T> PartialEq for InternalKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for InternalKey<T> {}

impl<T> Hash for InternalKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for InternalKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternalKey({})", self.label)
    }
}

// Process-wide registry. Each concept gets exactly one key.

/// Current style sheet of a `<style>` element
pub(crate) fn sheet() -> &'static InternalKey<SheetState> {
    static KEY: LazyLock<InternalKey<SheetState>> = LazyLock::new(|| InternalKey::mint("sheet"));
    &KEY
}

/// Lazily materialized `style` declaration
pub(crate) fn style() -> &'static InternalKey<LazySlot<CssStyleDeclaration>> {
    static KEY: LazyLock<InternalKey<LazySlot<CssStyleDeclaration>>> =
        LazyLock::new(|| InternalKey::mint("style"));
    &KEY
}

/// Lazily materialized `dataset` view
pub(crate) fn dataset() -> &'static InternalKey<LazySlot<DOMStringMap>> {
    static KEY: LazyLock<InternalKey<LazySlot<DOMStringMap>>> =
        LazyLock::new(|| InternalKey::mint("dataset"));
    &KEY
}

/// Per-node extension table addressed by internal keys
#[derive(Default)]
pub struct Slots {
    entries: HashMap<u64, Box<dyn Any>>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: 'static>(&self, key: &InternalKey<T>) -> Option<&T> {
        self.entries.get(&key.id)?.downcast_ref()
    }

    pub fn get_mut<T: 'static>(&mut self, key: &InternalKey<T>) -> Option<&mut T> {
        self.entries.get_mut(&key.id)?.downcast_mut()
    }

    /// Store a value, returning the previous one
    pub fn insert<T: 'static>(&mut self, key: &InternalKey<T>, value: T) -> Option<T> {
        let old = self.entries.insert(key.id, Box::new(value))?;
        old.downcast().ok().map(|boxed| *boxed)
    }

    pub fn remove<T: 'static>(&mut self, key: &InternalKey<T>) -> Option<T> {
        let old = self.entries.remove(&key.id)?;
        old.downcast().ok().map(|boxed| *boxed)
    }

    pub fn contains<T: 'static>(&self, key: &InternalKey<T>) -> bool {
        self.entries.contains_key(&key.id)
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots").field("len", &self.entries.len()).finish()
    }
}
