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

//! The immutable mapping from unit identifiers to their descriptors.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use strata_core::{StreamingError, UnitDescriptor, UnitId};

use crate::catalog::{Catalog, CatalogEntry, CatalogError};

/// Every unit the world can stream, keyed by identifier.
///
/// Built once at start-up and read-only afterwards. Construction validates the
/// whole catalog, so a dangling neighbor or a persistent unit with a preload
/// group fails here rather than on first use.
#[derive(Debug, Default)]
pub struct UnitGraph {
    units: HashMap<UnitId, Arc<UnitDescriptor>>,
    /// Catalog declaration order, for deterministic iteration.
    order: Vec<UnitId>,
}

impl UnitGraph {
    /// Builds and validates a graph from catalog entries.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CatalogEntry>,
    ) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = entries.into_iter().collect();

        let mut known = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !known.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateUnit(UnitId::new(&entry.id)));
            }
        }

        for entry in &entries {
            validate_entry(entry, &known)?;
        }

        let mut units = HashMap::with_capacity(entries.len());
        let mut order = Vec::with_capacity(entries.len());

        for entry in entries {
            let id = UnitId::from(entry.id);
            let neighbors = entry.neighbors.into_iter().map(UnitId::from).collect();
            let descriptor = UnitDescriptor::new(id.clone(), neighbors, entry.persistent, entry.gameplay);

            order.push(id.clone());
            units.insert(id, Arc::new(descriptor));
        }

        log::info!("Unit graph built with {} units.", order.len());

        Ok(Self { units, order })
    }

    /// Builds a graph from a parsed catalog document.
    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        Self::from_entries(catalog.units)
    }

    /// Parses and validates a RON catalog.
    pub fn from_ron_str(text: &str) -> Result<Self, CatalogError> {
        Self::from_catalog(Catalog::from_ron_str(text)?)
    }

    /// Parses and validates a JSON catalog.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        Self::from_catalog(Catalog::from_json_str(text)?)
    }

    /// Reads, parses and validates a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_catalog(Catalog::from_path(path)?)
    }

    /// Returns the descriptor for `id`, if the catalog has one.
    pub fn get(&self, id: &str) -> Option<&Arc<UnitDescriptor>> {
        self.units.get(id)
    }

    /// Returns the descriptor for `id`.
    ///
    /// A missing id means the world and the catalog disagree, which is
    /// reported loudly before the error is returned.
    pub fn lookup(&self, id: &str) -> Result<&Arc<UnitDescriptor>, StreamingError> {
        self.units.get(id).ok_or_else(|| {
            log::error!("No unit named \"{id}\" exists in the unit catalog (content/build mismatch).");
            StreamingError::CatalogLookup { id: UnitId::new(id) }
        })
    }

    /// Returns `true` if the catalog declares `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.units.contains_key(id)
    }

    /// Iterates over all descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<UnitDescriptor>> + '_ {
        self.order.iter().filter_map(|id| self.units.get(id))
    }

    /// Number of units in the catalog.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn validate_entry(entry: &CatalogEntry, known: &HashSet<&str>) -> Result<(), CatalogError> {
    if entry.persistent && !entry.neighbors.is_empty() {
        return Err(CatalogError::PersistentWithNeighbors(UnitId::new(&entry.id)));
    }

    let mut seen = HashSet::with_capacity(entry.neighbors.len());
    for neighbor in &entry.neighbors {
        if *neighbor == entry.id {
            return Err(CatalogError::SelfNeighbor(UnitId::new(&entry.id)));
        }
        if !known.contains(neighbor.as_str()) {
            return Err(CatalogError::DanglingNeighbor {
                unit: UnitId::new(&entry.id),
                neighbor: UnitId::new(neighbor),
            });
        }
        if !seen.insert(neighbor.as_str()) {
            return Err(CatalogError::DuplicateNeighbor {
                unit: UnitId::new(&entry.id),
                neighbor: UnitId::new(neighbor),
            });
        }
    }

    Ok(())
}
