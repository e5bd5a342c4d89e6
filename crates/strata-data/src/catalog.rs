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

//! The serializable unit catalog and its loading errors.
//!
//! A catalog is authored as RON (or JSON, for hosts exporting it from other
//! tooling):
//!
//! ```ron
//! (
//!     units: [
//!         (id: "Hud", persistent: true, gameplay: false),
//!         (id: "Start", neighbors: ["Hub"]),
//!         (id: "Hub", neighbors: ["Start", "Cave"]),
//!         (id: "Cave", neighbors: ["Hub"]),
//!     ],
//! )
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use strata_core::UnitId;

/// An error raised while reading or validating a catalog.
///
/// All variants are configuration errors: they are reported when the unit
/// graph is built, never during streaming.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two entries share the same identifier.
    #[error("unit '{0}' is declared more than once")]
    DuplicateUnit(UnitId),

    /// A neighbor entry names a unit the catalog does not contain.
    #[error("unit '{unit}' lists unknown neighbor '{neighbor}'")]
    DanglingNeighbor {
        /// The unit declaring the neighbor.
        unit: UnitId,
        /// The unresolved neighbor name.
        neighbor: UnitId,
    },

    /// A persistent unit declares a preload group.
    #[error("persistent unit '{0}' must not declare neighbors")]
    PersistentWithNeighbors(UnitId),

    /// The same neighbor appears twice in one preload group.
    #[error("unit '{unit}' lists neighbor '{neighbor}' more than once")]
    DuplicateNeighbor {
        /// The unit declaring the neighbor.
        unit: UnitId,
        /// The repeated neighbor.
        neighbor: UnitId,
    },

    /// A unit lists itself in its own preload group.
    #[error("unit '{0}' lists itself as a neighbor")]
    SelfNeighbor(UnitId),

    /// The catalog text is not a valid document.
    #[error("malformed catalog: {0}")]
    Parse(String),

    /// The catalog file could not be read.
    #[error("failed to read catalog '{}'", path.display())]
    Io {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn default_gameplay() -> bool {
    true
}

/// A single unit as authored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// The unit's name, matching its content identifier.
    pub id: String,
    /// Units loaded and unloaded alongside this one, in order.
    #[serde(default)]
    pub neighbors: Vec<String>,
    /// Keeps the unit resident for the process lifetime once loaded.
    #[serde(default)]
    pub persistent: bool,
    /// Whether the subject can ever be inside this unit.
    #[serde(default = "default_gameplay")]
    pub gameplay: bool,
}

impl CatalogEntry {
    /// Creates a non-persistent gameplay unit without neighbors.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            neighbors: Vec::new(),
            persistent: false,
            gameplay: true,
        }
    }

    /// Sets the preload group.
    pub fn with_neighbors<I, S>(mut self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.neighbors = neighbors.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the unit as persistent.
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Marks the unit as one the subject can never be inside (e.g. a HUD).
    pub fn non_gameplay(mut self) -> Self {
        self.gameplay = false;
        self
    }
}

/// The root document of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    /// Every unit the world can stream.
    pub units: Vec<CatalogEntry>,
}

impl Catalog {
    /// Parses a RON catalog.
    pub fn from_ron_str(text: &str) -> Result<Self, CatalogError> {
        ron::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Parses a JSON catalog.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Reads a catalog from disk. Files ending in `.json` are parsed as JSON,
    /// anything else as RON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_ron_str(&text)
        }
    }
}
