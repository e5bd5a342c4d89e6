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

//! Residency decisions and load/unload sequencing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use strata_core::{EventBus, StreamingError, StreamingEvent, UnitDescriptor, UnitId};
use strata_data::{ActiveUnitStack, UnitGraph};
use strata_io::UnitLoader;

use super::debug::StreamingDebugState;
use super::unit::Unit;

/// Decides which units must be resident and sequences their streaming.
pub struct StreamingManager {
    graph: Arc<UnitGraph>,
    loader: UnitLoader,
    active: Mutex<ActiveUnitStack>,
    events: EventBus<StreamingEvent>,
}

impl StreamingManager {
    /// Creates a manager over `graph`, driving `loader`.
    ///
    /// The loader publishes its residency events on this manager's event bus.
    pub fn new(graph: impl Into<Arc<UnitGraph>>, loader: UnitLoader) -> Self {
        let events = EventBus::new();
        let loader = loader.with_event_bus(events.clone());

        Self {
            graph: graph.into(),
            loader,
            active: Mutex::new(ActiveUnitStack::new()),
            events,
        }
    }

    /// Seeds the manager with the unit the host booted into.
    ///
    /// The unit is recorded as resident without a load. If it is not
    /// persistent it becomes the initial active unit; its neighbors are not
    /// loaded. An unknown id is logged and ignored so the game still boots.
    pub fn with_startup_unit(self, id: &str) -> Self {
        match self.graph.lookup(id) {
            Ok(unit) => {
                let unit = unit.clone();
                self.loader.mark_resident(unit.id().clone());
                self.add_active(&unit);
            }
            Err(e) => log::error!("Ignoring startup unit: {e}"),
        }
        self
    }

    /// Makes `unit` resident, marks it active, then loads its neighbors.
    ///
    /// Steps run strictly in order: the unit itself becomes usable before any
    /// neighbor starts streaming. Neighbors never become active. If a step
    /// fails the error is returned and earlier steps are not rolled back.
    pub async fn load_unit(&self, unit: &Arc<UnitDescriptor>) -> Result<(), StreamingError> {
        log::debug!("Entering unit '{}'.", unit.id());

        self.loader.load(unit.id()).await?;

        if !unit.is_persistent() {
            self.add_active(unit);
        }

        for neighbor in unit.neighbors() {
            self.loader.load(neighbor).await?;
        }

        Ok(())
    }

    /// Leaves `unit`, unloading it and its neighbors where nothing else
    /// requires them.
    ///
    /// Residency of the unit itself is evaluated before it is removed from the
    /// active set, so leaving a unit the subject is still registered in keeps
    /// it resident until a later residency check releases it.
    pub async fn unload_unit(&self, unit: &Arc<UnitDescriptor>) -> Result<(), StreamingError> {
        log::debug!("Leaving unit '{}'.", unit.id());

        self.try_unload(unit).await?;

        self.remove_active(unit.id());

        for neighbor_id in unit.neighbors() {
            let neighbor = self.graph.lookup(neighbor_id.as_str())?.clone();
            self.try_unload(&neighbor).await?;
        }

        Ok(())
    }

    /// Looks up `id` and runs [`load_unit`](Self::load_unit).
    pub async fn load(&self, id: &str) -> Result<(), StreamingError> {
        let unit = self.graph.lookup(id)?.clone();
        self.load_unit(&unit).await
    }

    /// Looks up `id` and runs [`unload_unit`](Self::unload_unit).
    pub async fn unload(&self, id: &str) -> Result<(), StreamingError> {
        let unit = self.graph.lookup(id)?.clone();
        self.unload_unit(&unit).await
    }

    /// Returns `true` if `candidate` must stay loaded right now.
    ///
    /// Recomputed from the current active set on every call:
    /// - nothing is active (the world must never be left empty),
    /// - the candidate is persistent,
    /// - the candidate is active,
    /// - the candidate is a neighbor of an active unit.
    pub fn residency_required(&self, candidate: &UnitDescriptor) -> bool {
        let active = self.active();

        active.is_empty()
            || candidate.is_persistent()
            || active.contains(candidate.id())
            || active.is_neighbor_of_any(candidate.id())
    }

    /// The unit currently containing the subject, if any.
    pub fn active_unit(&self) -> Option<Arc<UnitDescriptor>> {
        self.active().head().cloned()
    }

    /// Active units, most recently entered first.
    pub fn active_units(&self) -> Vec<UnitId> {
        self.active().ids()
    }

    /// Returns `true` if the unit's content is loaded.
    pub fn is_resident(&self, id: &str) -> bool {
        self.loader.is_resident(id)
    }

    /// The unit catalog.
    pub fn graph(&self) -> &UnitGraph {
        &self.graph
    }

    /// The loader this manager drives.
    pub fn loader(&self) -> &UnitLoader {
        &self.loader
    }

    /// Opens a subscription to loaded/unloaded and active-unit-changed events.
    ///
    /// Each subscription receives its own copy of every event published after
    /// it was opened. Dropping the receiver ends the subscription.
    pub fn subscribe(&self) -> flume::Receiver<StreamingEvent> {
        self.events.subscribe()
    }

    /// Returns the facade for unit `id`.
    pub fn unit(self: &Arc<Self>, id: &str) -> Result<Unit, StreamingError> {
        let descriptor = self.graph.lookup(id)?.clone();
        Ok(Unit::new(descriptor, Arc::clone(self)))
    }

    /// Snapshot of the active stack and resident set, for diagnostics.
    pub fn debug_state(&self) -> StreamingDebugState {
        StreamingDebugState {
            active_units: self.active_units(),
            active_unit: self.active_unit().map(|unit| unit.id().clone()),
            resident_units: self.loader.resident_units(),
        }
    }

    async fn try_unload(&self, unit: &UnitDescriptor) -> Result<(), StreamingError> {
        if self.residency_required(unit) {
            log::trace!("Unit '{}' still required, keeping it resident.", unit.id());
            return Ok(());
        }
        self.loader.unload(unit.id()).await
    }

    fn add_active(&self, unit: &Arc<UnitDescriptor>) {
        let (previous, current) = {
            let mut active = self.active();
            let previous = active.head_id();
            if !active.push_front(unit.clone()) {
                return;
            }
            (previous, active.head_id())
        };
        self.announce(previous, current);
    }

    fn remove_active(&self, id: &UnitId) {
        let (previous, current) = {
            let mut active = self.active();
            let previous = active.head_id();
            if !active.remove(id) {
                return;
            }
            (previous, active.head_id())
        };
        self.announce(previous, current);
    }

    fn announce(&self, previous: Option<UnitId>, current: Option<UnitId>) {
        if previous == current {
            return;
        }

        match &current {
            Some(id) => log::info!("Active unit is now '{id}'."),
            None => log::info!("Subject is no longer inside any unit."),
        }

        self.events
            .publish(StreamingEvent::ActiveUnitChanged { previous, current });
    }

    fn active(&self) -> MutexGuard<'_, ActiveUnitStack> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
