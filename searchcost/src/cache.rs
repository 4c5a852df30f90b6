// This file is part of Searchcost.
// Copyright © 2025 The Searchcost developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Thread-safe memoization with at most one computation per key.
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::HashMap;
use once_cell::sync::OnceCell;

/// A memoization table shared between threads.
///
/// The map lock is only held to find (or insert) the cell of a key, never while a value is
/// computed.
/// When several threads request the same missing key, one of them computes the value while the
/// others block until the value is available.
#[derive(Debug)]
pub struct SingleFlightCache<K, V> {
    cells: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> Default for SingleFlightCache<K, V> {
    fn default() -> Self {
        SingleFlightCache {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash, V: Clone> SingleFlightCache<K, V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: K) -> Arc<OnceCell<V>> {
        // Values are written at most once so a poisoned map is still consistent.
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(key).or_default())
    }

    /// Returns the value of `key`, calling `compute` if it was never computed before.
    ///
    /// `compute` can itself query the cache for other keys, as long as the dependencies between
    /// keys have no cycle.
    pub fn get_or_compute<F: FnOnce() -> V>(&self, key: K, compute: F) -> V {
        self.cell(key).get_or_init(compute).clone()
    }

    /// Returns the value of `key`, if it is already computed.
    pub fn get(&self, key: &K) -> Option<V> {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Returns the number of keys requested so far.
    pub fn len(&self) -> usize {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no key was requested yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
