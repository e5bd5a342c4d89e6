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

//! Idempotent load/unload requests with per-unit coalescing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use strata_core::{ContentBackend, EventBus, StreamingError, StreamingEvent, TransportOp, UnitId};
use tokio::sync::Mutex as AsyncMutex;

/// Ensures units are loaded or unloaded, without policy.
///
/// Every request for a unit goes through that unit's gate, an async mutex.
/// A request arriving while another is in flight waits on the gate and then
/// observes the settled residency, so concurrent loads of the same unit issue
/// a single backend load. Requests that would not change residency complete
/// immediately.
pub struct UnitLoader {
    backend: Arc<dyn ContentBackend>,
    resident: Mutex<HashSet<UnitId>>,
    gates: Mutex<HashMap<UnitId, Arc<AsyncMutex<()>>>>,
    events: Option<EventBus<StreamingEvent>>,
}

impl UnitLoader {
    /// Creates a loader driving `backend`. Nothing is resident initially.
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self {
            backend,
            resident: Mutex::new(HashSet::new()),
            gates: Mutex::new(HashMap::new()),
            events: None,
        }
    }

    /// Publishes `UnitLoaded`/`UnitUnloaded` events on `events`.
    pub fn with_event_bus(mut self, events: EventBus<StreamingEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Returns `true` if the unit's content is currently loaded.
    pub fn is_resident(&self, id: &str) -> bool {
        lock(&self.resident).contains(id)
    }

    /// Records a unit the host already has in memory, e.g. the unit the game
    /// booted into. No backend call is made.
    pub fn mark_resident(&self, id: UnitId) {
        log::debug!("Unit '{id}' marked resident by the host.");
        lock(&self.resident).insert(id);
    }

    /// All resident units, sorted by identifier.
    pub fn resident_units(&self) -> Vec<UnitId> {
        let mut units: Vec<UnitId> = lock(&self.resident).iter().cloned().collect();
        units.sort();
        units
    }

    /// Loads the unit unless it is already resident.
    ///
    /// Completes once the content is usable. A failure leaves the unit
    /// non-resident and is returned as [`StreamingError::LoadTransport`].
    pub async fn load(&self, id: &UnitId) -> Result<(), StreamingError> {
        let gate = self.gate(id);
        let _guard = gate.lock().await;

        if self.is_resident(id.as_str()) {
            log::trace!("Unit '{id}' already resident, skipping load.");
            return Ok(());
        }

        log::debug!("Loading unit '{id}'...");
        if let Err(source) = self.backend.load(id).await {
            log::error!("Failed to load unit '{id}': {source}");
            return Err(StreamingError::LoadTransport {
                id: id.clone(),
                op: TransportOp::Load,
                source,
            });
        }

        lock(&self.resident).insert(id.clone());
        log::debug!("Unit '{id}' loaded.");
        self.publish(StreamingEvent::UnitLoaded(id.clone()));
        Ok(())
    }

    /// Unloads the unit if it is resident.
    ///
    /// On failure the unit stays resident and the error is returned as
    /// [`StreamingError::LoadTransport`].
    pub async fn unload(&self, id: &UnitId) -> Result<(), StreamingError> {
        let gate = self.gate(id);
        let _guard = gate.lock().await;

        if !self.is_resident(id.as_str()) {
            log::trace!("Unit '{id}' not resident, skipping unload.");
            return Ok(());
        }

        log::debug!("Unloading unit '{id}'...");
        if let Err(source) = self.backend.unload(id).await {
            log::error!("Failed to unload unit '{id}': {source}");
            return Err(StreamingError::LoadTransport {
                id: id.clone(),
                op: TransportOp::Unload,
                source,
            });
        }

        lock(&self.resident).remove(id);
        log::debug!("Unit '{id}' unloaded.");
        self.publish(StreamingEvent::UnitUnloaded(id.clone()));
        Ok(())
    }

    fn gate(&self, id: &UnitId) -> Arc<AsyncMutex<()>> {
        lock(&self.gates)
            .entry(id.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn publish(&self, event: StreamingEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
