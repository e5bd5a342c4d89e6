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

//! Per-unit entry points for collaborators.

use std::sync::Arc;

use strata_core::{StreamingError, UnitDescriptor, UnitId};

use super::manager::StreamingManager;

/// A unit bound to the manager that streams it.
///
/// Trigger adapters keep one of these per unit boundary and call
/// [`load`](Self::load) on enter and [`unload`](Self::unload) on exit. Both
/// return once streaming has completed, so the caller can sequence follow-up
/// work (e.g. teleporting the subject once the destination is resident).
#[derive(Clone)]
pub struct Unit {
    descriptor: Arc<UnitDescriptor>,
    manager: Arc<StreamingManager>,
}

impl Unit {
    pub(crate) fn new(descriptor: Arc<UnitDescriptor>, manager: Arc<StreamingManager>) -> Self {
        Self {
            descriptor,
            manager,
        }
    }

    /// The unit's identifier.
    pub fn id(&self) -> &UnitId {
        self.descriptor.id()
    }

    /// The unit's catalog descriptor.
    pub fn descriptor(&self) -> &Arc<UnitDescriptor> {
        &self.descriptor
    }

    /// See [`StreamingManager::load_unit`].
    pub async fn load(&self) -> Result<(), StreamingError> {
        self.manager.load_unit(&self.descriptor).await
    }

    /// See [`StreamingManager::unload_unit`].
    pub async fn unload(&self) -> Result<(), StreamingError> {
        self.manager.unload_unit(&self.descriptor).await
    }
}
