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

//! # Strata Data
//!
//! Data layouts for the streaming system: the catalog format, the immutable
//! [`UnitGraph`] built from it, and the [`ActiveUnitStack`] that orders the
//! units currently containing the subject.

#![warn(missing_docs)]

pub mod active;
pub mod catalog;
pub mod graph;

pub use active::ActiveUnitStack;
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use graph::UnitGraph;
