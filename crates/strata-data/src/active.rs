// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ordered bookkeeping of the units currently containing the subject.

use std::collections::VecDeque;
use std::sync::Arc;

use strata_core::{UnitDescriptor, UnitId};

/// The units the subject currently occupies, most recently entered first.
///
/// Overlapping unit volumes mean the subject can be inside several units at
/// once; ordering by entry recency lets a single "current" unit be derived.
/// The stack never holds duplicates or persistent units.
#[derive(Debug, Default, Clone)]
pub struct ActiveUnitStack {
    units: VecDeque<Arc<UnitDescriptor>>,
}

impl ActiveUnitStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `unit` to the front.
    ///
    /// Returns `false` and leaves the stack untouched if the unit is already
    /// present or is persistent.
    pub fn push_front(&mut self, unit: Arc<UnitDescriptor>) -> bool {
        if unit.is_persistent() || self.contains(unit.id()) {
            return false;
        }
        self.units.push_front(unit);
        true
    }

    /// Removes the unit named `id`. Returns `true` if it was present.
    pub fn remove(&mut self, id: &UnitId) -> bool {
        match self.units.iter().position(|unit| unit.id() == id) {
            Some(index) => {
                self.units.remove(index);
                true
            }
            None => false,
        }
    }

    /// The active unit: the most recently entered one, if any.
    pub fn head(&self) -> Option<&Arc<UnitDescriptor>> {
        self.units.front()
    }

    /// Identifier of [`head`](Self::head).
    pub fn head_id(&self) -> Option<UnitId> {
        self.head().map(|unit| unit.id().clone())
    }

    /// Returns `true` if the unit named `id` is on the stack.
    pub fn contains(&self, id: &UnitId) -> bool {
        self.units.iter().any(|unit| unit.id() == id)
    }

    /// Returns `true` if some unit on the stack lists `id` as a neighbor.
    pub fn is_neighbor_of_any(&self, id: &UnitId) -> bool {
        self.units.iter().any(|unit| unit.has_neighbor(id))
    }

    /// Iterates from the most to the least recently entered unit.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<UnitDescriptor>> + '_ {
        self.units.iter()
    }

    /// Identifiers from the most to the least recently entered unit.
    pub fn ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|unit| unit.id().clone()).collect()
    }

    /// Number of active units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the subject is inside no unit.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
