// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small maps keyed by pointer id, for gesture recognizers.
//!
//! Only a handful of pointers are ever active at once, so these are linear
//! vectors rather than hash maps. Removal swaps the last entry into the hole;
//! iteration order is therefore not insertion order after a removal.
//!
//! ```
//! use understory_events::pointer_map::{PointerMap, PointerMapList};
//!
//! let mut down: PointerMap<(f64, f64)> = PointerMap::new();
//! down.set(1, (10.0, 20.0));
//! down.set(2, (0.0, 0.0));
//! assert_eq!(down.get(1), Some(&(10.0, 20.0)));
//! assert_eq!(down.remove(1), Some((10.0, 20.0)));
//!
//! let mut owners: PointerMapList<&str> = PointerMapList::new();
//! owners.push(7, "drag");
//! owners.push(7, "tap");
//! assert_eq!(owners.get(7), Some(&["drag", "tap"][..]));
//! ```

use alloc::vec;
use alloc::vec::Vec;

/// Identifier of an active pointer, as reported by the platform.
pub type PointerId = u32;

/// A map from pointer id to a value.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerMap<T> {
    entries: Vec<(PointerId, T)>,
}

impl<T> Default for PointerMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PointerMap<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the value for `id`, returning the previous one.
    pub fn set(&mut self, id: PointerId, value: T) -> Option<T> {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, v)) => Some(core::mem::replace(v, value)),
            None => {
                self.entries.push((id, value));
                None
            }
        }
    }

    /// Value for `id`.
    pub fn get(&self, id: PointerId) -> Option<&T> {
        self.entries.iter().find(|(k, _)| *k == id).map(|(_, v)| v)
    }

    /// Mutable value for `id`.
    pub fn get_mut(&mut self, id: PointerId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == id)
            .map(|(_, v)| v)
    }

    /// Remove the value for `id`.
    pub fn remove(&mut self, id: PointerId) -> Option<T> {
        let i = self.entries.iter().position(|(k, _)| *k == id)?;
        Some(self.entries.swap_remove(i).1)
    }

    /// Number of tracked pointers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pointer is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PointerId, &T)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

/// A map from pointer id to an ordered list of values.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerMapList<T> {
    map: PointerMap<Vec<T>>,
}

impl<T> Default for PointerMapList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PointerMapList<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            map: PointerMap::new(),
        }
    }

    /// Append `value` to the list for `id`.
    pub fn push(&mut self, id: PointerId, value: T) {
        match self.map.get_mut(id) {
            Some(values) => values.push(value),
            None => {
                self.map.set(id, vec![value]);
            }
        }
    }

    /// Values for `id` in push order (unless one was removed).
    pub fn get(&self, id: PointerId) -> Option<&[T]> {
        self.map.get(id).map(Vec::as_slice)
    }

    /// Remove the whole list for `id`.
    pub fn remove(&mut self, id: PointerId) -> Option<Vec<T>> {
        self.map.remove(id)
    }

    /// Number of tracked pointers.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no pointer is tracked.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T: PartialEq> PointerMapList<T> {
    /// Remove every value equal to `value` from the list for `id`.
    ///
    /// The entry is dropped once its list is empty. Returns true if anything was removed.
    pub fn remove_value(&mut self, id: PointerId, value: &T) -> bool {
        let Some(values) = self.map.get_mut(id) else {
            return false;
        };
        let before = values.len();
        let mut i = 0;
        while i < values.len() {
            if &values[i] == value {
                values.swap_remove(i);
            } else {
                i += 1;
            }
        }
        let removed = values.len() != before;
        if values.is_empty() {
            self.map.remove(id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_returns_previous() {
        let mut m: PointerMap<u32> = PointerMap::new();
        assert_eq!(m.set(1, 10), None);
        assert_eq!(m.set(1, 11), Some(10));
        assert_eq!(m.get(1), Some(&11));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn remove_swaps_last_into_place() {
        let mut m: PointerMap<u32> = PointerMap::new();
        m.set(1, 10);
        m.set(2, 20);
        m.set(3, 30);
        assert_eq!(m.remove(1), Some(10));
        assert_eq!(m.remove(1), None);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![(3, &30), (2, &20)]);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut m: PointerMap<u32> = PointerMap::new();
        m.set(4, 1);
        if let Some(v) = m.get_mut(4) {
            *v += 1;
        }
        assert_eq!(m.get(4), Some(&2));
        assert!(m.get_mut(5).is_none());
    }

    #[test]
    fn list_push_and_remove_value() {
        let mut m: PointerMapList<&str> = PointerMapList::new();
        m.push(1, "a");
        m.push(1, "b");
        m.push(1, "a");
        m.push(2, "c");
        assert!(m.remove_value(1, &"a"));
        assert_eq!(m.get(1), Some(&["b"][..]));
        assert!(!m.remove_value(1, &"zzz"));
        assert!(m.remove_value(1, &"b"));
        assert_eq!(m.get(1), None);
        assert_eq!(m.len(), 1);
        assert!(!m.remove_value(9, &"c"));
    }

    #[test]
    fn list_remove_drops_whole_entry() {
        let mut m: PointerMapList<u8> = PointerMapList::new();
        m.push(3, 1);
        m.push(3, 2);
        assert_eq!(m.remove(3), Some(vec![1, 2]));
        assert!(m.is_empty());
    }
}
