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

//! Runtime errors raised while streaming units in and out.

use std::fmt;

use crate::backend::BackendError;
use crate::unit::UnitId;

/// The content operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOp {
    /// Bringing a unit's content into memory.
    Load,
    /// Releasing a unit's content.
    Unload,
}

impl fmt::Display for TransportOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportOp::Load => f.write_str("load"),
            TransportOp::Unload => f.write_str("unload"),
        }
    }
}

/// An error surfaced by a load or unload request.
#[derive(Debug, thiserror::Error)]
pub enum StreamingError {
    /// The requested unit is not in the catalog.
    ///
    /// This is a content/build mismatch and is never retried.
    #[error("unit '{id}' is not present in the unit catalog")]
    CatalogLookup {
        /// The identifier that could not be resolved.
        id: UnitId,
    },

    /// The content backend failed to load or unload a unit.
    ///
    /// Callers may retry by issuing the same request again.
    #[error("failed to {op} unit '{id}'")]
    LoadTransport {
        /// The unit whose content operation failed.
        id: UnitId,
        /// Which operation failed.
        op: TransportOp,
        /// The backend's own error, unmodified.
        #[source]
        source: BackendError,
    },
}

impl StreamingError {
    /// Returns the unit the error refers to.
    pub fn unit_id(&self) -> &UnitId {
        match self {
            StreamingError::CatalogLookup { id } | StreamingError::LoadTransport { id, .. } => id,
        }
    }
}
