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

//! The contract for the content system that actually holds unit data.

use async_trait::async_trait;
use std::error::Error;

use crate::unit::UnitId;

/// Error type returned by content backends. Must be thread-safe.
pub type BackendError = Box<dyn Error + Send + Sync>;

/// A content system able to bring a unit's data in and out of memory.
///
/// This is pure mechanism: implementors do not track residency or coalesce
/// requests, the `UnitLoader` layered on top does. A completed `load` means
/// the unit's content is usable by the rest of the game; a completed `unload`
/// means all of it has been released.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Loads the content of unit `id`.
    async fn load(&self, id: &UnitId) -> Result<(), BackendError>;

    /// Releases the content of unit `id`.
    async fn unload(&self, id: &UnitId) -> Result<(), BackendError>;
}
