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

//! An instrumented in-memory content backend.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use strata_core::{BackendError, ContentBackend, UnitId};

#[derive(Debug, Default)]
struct MemoryState {
    loaded: HashSet<UnitId>,
    loads: HashMap<UnitId, usize>,
    unloads: HashMap<UnitId, usize>,
    failing: HashSet<UnitId>,
}

/// A backend that keeps no real content but records every call it receives.
///
/// Useful for hosts whose units are generated procedurally, and for tests:
/// it counts loads and unloads per unit, can be told to fail for specific
/// units, and can simulate I/O latency so that requests overlap.
#[derive(Debug, Default)]
pub struct MemoryContentBackend {
    state: Mutex<MemoryState>,
    latency: Option<Duration>,
}

impl MemoryContentBackend {
    /// Creates a backend that completes every request immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every load and unload by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes every subsequent request for `id` fail.
    pub fn fail_on(&self, id: &str) {
        self.state().failing.insert(UnitId::new(id));
    }

    /// Undoes [`fail_on`](Self::fail_on).
    pub fn recover(&self, id: &str) {
        self.state().failing.remove(id);
    }

    /// Number of load calls received for `id`, failed ones included.
    pub fn load_count(&self, id: &str) -> usize {
        self.state().loads.get(id).copied().unwrap_or(0)
    }

    /// Number of unload calls received for `id`, failed ones included.
    pub fn unload_count(&self, id: &str) -> usize {
        self.state().unloads.get(id).copied().unwrap_or(0)
    }

    /// Total load calls across all units.
    pub fn total_loads(&self) -> usize {
        self.state().loads.values().sum()
    }

    /// Total unload calls across all units.
    pub fn total_unloads(&self) -> usize {
        self.state().unloads.values().sum()
    }

    /// Returns `true` if the backend currently holds `id`.
    pub fn is_loaded(&self, id: &str) -> bool {
        self.state().loaded.contains(id)
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ContentBackend for MemoryContentBackend {
    async fn load(&self, id: &UnitId) -> Result<(), BackendError> {
        *self.state().loads.entry(id.clone()).or_default() += 1;
        self.simulate_latency().await;

        let mut state = self.state();
        if state.failing.contains(id) {
            return Err(format!("simulated load failure for unit '{id}'").into());
        }
        state.loaded.insert(id.clone());
        Ok(())
    }

    async fn unload(&self, id: &UnitId) -> Result<(), BackendError> {
        *self.state().unloads.entry(id.clone()).or_default() += 1;
        self.simulate_latency().await;

        let mut state = self.state();
        if state.failing.contains(id) {
            return Err(format!("simulated unload failure for unit '{id}'").into());
        }
        state.loaded.remove(id);
        Ok(())
    }
}
