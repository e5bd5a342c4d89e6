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

//! Identifiers and immutable descriptors for loadable world units.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// The unique name of a unit.
///
/// Matches the identifier the content system uses for the unit's data, so the
/// catalog and the world agree on names. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(Arc<str>);

impl UnitId {
    /// Creates a new identifier from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for UnitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UnitId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl PartialEq<str> for UnitId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for UnitId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Static description of a unit, built once from the catalog.
///
/// Descriptors never change during a session. Whether a unit is currently
/// loaded is tracked by the loader, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    id: UnitId,
    neighbors: Vec<UnitId>,
    persistent: bool,
    gameplay: bool,
}

impl UnitDescriptor {
    /// Creates a descriptor.
    ///
    /// No validation happens here; catalog invariants (known neighbors, no
    /// neighbors on persistent units) are enforced when the unit graph is built.
    pub fn new(id: UnitId, neighbors: Vec<UnitId>, persistent: bool, gameplay: bool) -> Self {
        Self {
            id,
            neighbors,
            persistent,
            gameplay,
        }
    }

    /// The unit's unique name.
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    /// The preload group, in declaration order.
    pub fn neighbors(&self) -> &[UnitId] {
        &self.neighbors
    }

    /// Returns `true` if `id` is part of this unit's preload group.
    pub fn has_neighbor(&self, id: &UnitId) -> bool {
        self.neighbors.iter().any(|neighbor| neighbor == id)
    }

    /// Persistent units stay resident for the lifetime of the process once
    /// loaded and never become the active unit.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Whether the subject can ever be inside this unit.
    ///
    /// Save systems use this to pick a checkpoint unit. Residency decisions
    /// ignore it.
    pub fn is_gameplay(&self) -> bool {
        self.gameplay
    }
}
