//! Lazy Accessor Slots
//!
//! Tagged slot for derived objects that are created on first read, cached on
//! the node and invalidated when the node is torn down. "Never read" and
//! "torn down" are distinct states, so a released slot is never silently
//! re-created.

/// Lazily materialized value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LazySlot<T> {
    /// Not materialized yet
    #[default]
    Vacant,
    /// Materialized and cached
    Ready(T),
    /// Owner was torn down
    Released,
}

impl<T> LazySlot<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Materialize on first access. Returns `None` once released.
    pub fn get_or_init(&mut self, init: impl FnOnce() -> T) -> Option<&mut T> {
        if matches!(self, Self::Vacant) {
            *self = Self::Ready(init());
        }
        self.get_mut()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }

    /// Invalidate, handing back the cached value if there was one
    pub fn release(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::Released) {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_once() {
        let mut slot = LazySlot::Vacant;
        let mut calls = 0;

        slot.get_or_init(|| {
            calls += 1;
            5
        });
        slot.get_or_init(|| {
            calls += 1;
            6
        });

        assert_eq!(calls, 1);
        assert_eq!(slot.get(), Some(&5));
    }

    #[test]
    fn test_released_stays_released() {
        let mut slot = LazySlot::Ready(1);
        assert_eq!(slot.release(), Some(1));
        assert!(slot.is_released());
        assert_eq!(slot.get_or_init(|| 2), None);
    }

    #[test]
    fn test_vacant_is_not_ready() {
        let slot: LazySlot<u8> = LazySlot::default();
        assert!(!slot.is_ready());
        assert_eq!(slot.get(), None);
    }
}
