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

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use strata_agents::StreamingManager;
use strata_core::{StreamingError, StreamingEvent, TransportOp, UnitId};
use strata_data::{CatalogEntry, UnitGraph};
use strata_io::{MemoryContentBackend, UnitLoader};

// --- Test Setup ---

fn manager_with(
    entries: Vec<CatalogEntry>,
    backend: MemoryContentBackend,
) -> (Arc<StreamingManager>, Arc<MemoryContentBackend>) {
    let graph = UnitGraph::from_entries(entries).expect("test catalog must be valid");
    let backend = Arc::new(backend);
    let loader = UnitLoader::new(backend.clone());
    (Arc::new(StreamingManager::new(graph, loader)), backend)
}

fn manager_for(entries: Vec<CatalogEntry>) -> (Arc<StreamingManager>, Arc<MemoryContentBackend>) {
    manager_with(entries, MemoryContentBackend::new())
}

fn overworld() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Start").with_neighbors(["Hub"]),
        CatalogEntry::new("Hub").with_neighbors(["Start", "Cave"]),
        CatalogEntry::new("Cave").with_neighbors(["Hub"]),
    ]
}

fn ids(names: &[&str]) -> Vec<UnitId> {
    names.iter().map(|name| UnitId::from(*name)).collect()
}

// ---

#[tokio::test]
async fn overworld_walkthrough_keeps_shared_neighbors() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());

    manager.load("Start").await?;
    assert_eq!(manager.loader().resident_units(), ids(&["Hub", "Start"]));
    assert_eq!(manager.active_units(), ids(&["Start"]));

    manager.load("Hub").await?;
    assert_eq!(manager.loader().resident_units(), ids(&["Cave", "Hub", "Start"]));
    assert_eq!(manager.active_units(), ids(&["Hub", "Start"]));

    manager.unload("Start").await?;
    assert_eq!(manager.active_units(), ids(&["Hub"]));
    assert_eq!(manager.loader().resident_units(), ids(&["Cave", "Hub", "Start"]));
    Ok(())
}

#[tokio::test]
async fn unloading_releases_only_unshared_neighbors() -> Result<()> {
    let (manager, backend) = manager_for(vec![
        CatalogEntry::new("A").with_neighbors(["B", "C"]),
        CatalogEntry::new("B"),
        CatalogEntry::new("C"),
        CatalogEntry::new("D").with_neighbors(["C"]),
    ]);

    manager.load("A").await?;
    manager.load("D").await?;
    manager.unload("A").await?;

    assert!(!manager.is_resident("B"));
    assert!(manager.is_resident("C"));
    assert_eq!(backend.unload_count("B"), 1);
    assert_eq!(backend.unload_count("C"), 0);
    assert_eq!(manager.active_units(), ids(&["D"]));
    Ok(())
}

#[tokio::test]
async fn left_unit_is_released_by_a_later_residency_check() -> Result<()> {
    let (manager, backend) = manager_for(overworld());

    manager.load("Start").await?;
    manager.load("Hub").await?;
    manager.unload("Start").await?;
    manager.load("Cave").await?;
    manager.unload("Hub").await?;

    assert_eq!(manager.active_units(), ids(&["Cave"]));
    assert!(!manager.is_resident("Start"));
    assert!(manager.is_resident("Hub"));
    assert!(manager.is_resident("Cave"));
    assert_eq!(backend.unload_count("Start"), 1);
    Ok(())
}

#[tokio::test]
async fn persistent_units_are_never_active_or_unloaded() -> Result<()> {
    let (manager, backend) = manager_for(vec![
        CatalogEntry::new("Hud").persistent().non_gameplay(),
        CatalogEntry::new("Start").with_neighbors(["Hud"]),
        CatalogEntry::new("Cave"),
    ]);

    manager.load("Hud").await?;
    assert!(manager.is_resident("Hud"));
    assert!(manager.active_unit().is_none());

    manager.load("Start").await?;
    manager.load("Cave").await?;
    manager.unload("Start").await?;
    manager.unload("Hud").await?;

    assert!(manager.is_resident("Hud"));
    assert_eq!(backend.unload_count("Hud"), 0);
    assert_eq!(manager.active_units(), ids(&["Cave"]));
    Ok(())
}

#[tokio::test]
async fn repeated_load_is_idempotent() -> Result<()> {
    let (manager, backend) = manager_for(overworld());

    manager.load("Start").await?;
    let resident = manager.loader().resident_units();
    let active = manager.active_units();

    manager.load("Start").await?;

    assert_eq!(backend.load_count("Start"), 1);
    assert_eq!(backend.load_count("Hub"), 1);
    assert_eq!(manager.loader().resident_units(), resident);
    assert_eq!(manager.active_units(), active);
    Ok(())
}

#[tokio::test]
async fn most_recent_entry_is_the_active_unit() -> Result<()> {
    let (manager, _backend) =
        manager_for(vec![CatalogEntry::new("X"), CatalogEntry::new("Y")]);

    manager.load("X").await?;
    manager.load("Y").await?;
    assert_eq!(manager.active_unit().map(|unit| unit.id().clone()), Some("Y".into()));

    manager.unload("Y").await?;
    assert_eq!(manager.active_unit().map(|unit| unit.id().clone()), Some("X".into()));
    Ok(())
}

#[tokio::test]
async fn leaving_the_last_unit_keeps_the_world_resident() -> Result<()> {
    let (manager, backend) = manager_for(vec![
        CatalogEntry::new("Solo").with_neighbors(["Next"]),
        CatalogEntry::new("Next"),
    ]);

    manager.load("Solo").await?;
    manager.unload("Solo").await?;

    assert!(manager.active_unit().is_none());
    assert!(manager.is_resident("Solo"));
    assert!(manager.is_resident("Next"));
    assert_eq!(backend.total_unloads(), 0);
    Ok(())
}

#[tokio::test]
async fn residency_rule_is_recomputed_from_the_active_set() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());
    let graph_unit = |id: &str| manager.graph().get(id).cloned().expect("unit exists");

    // Nothing active yet: everything must stay.
    assert!(manager.residency_required(&graph_unit("Cave")));

    manager.load("Start").await?;
    assert!(manager.residency_required(&graph_unit("Start")));
    assert!(manager.residency_required(&graph_unit("Hub")));
    assert!(!manager.residency_required(&graph_unit("Cave")));
    Ok(())
}

#[tokio::test]
async fn unknown_unit_is_a_catalog_error() {
    let (manager, backend) = manager_for(overworld());

    let err = manager.load("Ghost").await.unwrap_err();
    assert!(matches!(&err, StreamingError::CatalogLookup { id } if *id == "Ghost"));

    let err = manager.unload("Ghost").await.unwrap_err();
    assert!(matches!(err, StreamingError::CatalogLookup { .. }));

    assert!(manager.unit("Ghost").is_err());
    assert_eq!(backend.total_loads(), 0);
}

#[tokio::test]
async fn failed_load_is_reported_and_not_activated() -> Result<()> {
    let (manager, backend) = manager_for(overworld());
    backend.fail_on("Start");

    let err = manager.load("Start").await.unwrap_err();
    assert!(matches!(
        &err,
        StreamingError::LoadTransport { id, op: TransportOp::Load, .. } if *id == "Start"
    ));
    assert!(manager.active_unit().is_none());
    assert_eq!(backend.load_count("Hub"), 0);

    backend.recover("Start");
    manager.load("Start").await?;
    assert_eq!(manager.active_units(), ids(&["Start"]));
    assert!(manager.is_resident("Hub"));
    Ok(())
}

#[tokio::test]
async fn failed_neighbor_load_keeps_earlier_steps() {
    let (manager, backend) = manager_for(overworld());
    backend.fail_on("Cave");

    let err = manager.load("Hub").await.unwrap_err();

    assert_eq!(err.unit_id(), "Cave");
    assert!(manager.is_resident("Hub"));
    assert!(manager.is_resident("Start"));
    assert!(!manager.is_resident("Cave"));
    assert_eq!(manager.active_units(), ids(&["Hub"]));
}

#[tokio::test]
async fn failed_unload_is_propagated() -> Result<()> {
    let (manager, backend) = manager_for(vec![
        CatalogEntry::new("A").with_neighbors(["B"]),
        CatalogEntry::new("B"),
        CatalogEntry::new("D"),
    ]);

    manager.load("A").await?;
    manager.load("D").await?;
    backend.fail_on("B");

    let err = manager.unload("A").await.unwrap_err();
    assert!(matches!(
        err,
        StreamingError::LoadTransport { op: TransportOp::Unload, .. }
    ));
    assert!(manager.is_resident("B"));
    Ok(())
}

#[tokio::test]
async fn every_subscriber_observes_the_same_active_unit_change() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());
    let audio = manager.subscribe();
    let minimap = manager.subscribe();

    manager.load("Start").await?;

    let entered_start = StreamingEvent::ActiveUnitChanged {
        previous: None,
        current: Some("Start".into()),
    };
    let changes = |events: &flume::Receiver<StreamingEvent>| -> Vec<StreamingEvent> {
        events
            .try_iter()
            .filter(|event| matches!(event, StreamingEvent::ActiveUnitChanged { .. }))
            .collect()
    };
    assert_eq!(changes(&audio), vec![entered_start.clone()]);
    assert_eq!(changes(&minimap), vec![entered_start]);
    Ok(())
}

#[tokio::test]
async fn transitions_without_subscribers_are_not_kept() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());

    for _ in 0..500 {
        manager.load("Hub").await?;
        manager.unload("Hub").await?;
    }

    let late = manager.subscribe();
    assert!(late.try_recv().is_err());

    manager.load("Cave").await?;
    assert_eq!(
        late.try_iter().collect::<Vec<_>>(),
        vec![StreamingEvent::ActiveUnitChanged {
            previous: None,
            current: Some("Cave".into()),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn dropping_a_subscription_leaves_others_intact() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());
    let kept = manager.subscribe();
    drop(manager.subscribe());

    manager.load("Start").await?;

    assert_eq!(kept.try_iter().count(), 3);
    Ok(())
}

#[tokio::test]
async fn events_announce_transitions_in_order() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());
    let events = manager.subscribe();

    manager.load("Start").await?;
    manager.load("Hub").await?;
    manager.unload("Hub").await?;

    let received: Vec<_> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            StreamingEvent::UnitLoaded("Start".into()),
            StreamingEvent::ActiveUnitChanged {
                previous: None,
                current: Some("Start".into()),
            },
            StreamingEvent::UnitLoaded("Hub".into()),
            StreamingEvent::ActiveUnitChanged {
                previous: Some("Start".into()),
                current: Some("Hub".into()),
            },
            StreamingEvent::UnitLoaded("Cave".into()),
            StreamingEvent::ActiveUnitChanged {
                previous: Some("Hub".into()),
                current: Some("Start".into()),
            },
            StreamingEvent::UnitUnloaded("Cave".into()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn unit_facade_delegates_to_the_manager() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());
    let hub = manager.unit("Hub")?;
    assert_eq!(hub.id(), "Hub");
    assert_eq!(hub.descriptor().neighbors().len(), 2);

    let trigger = hub.clone();
    tokio::spawn(async move { trigger.load().await })
        .await
        .expect("trigger task panicked")?;

    assert_eq!(manager.active_units(), ids(&["Hub"]));
    assert!(manager.is_resident("Cave"));

    hub.unload().await?;
    assert!(manager.active_unit().is_none());
    Ok(())
}

#[tokio::test]
async fn overlapping_triggers_load_each_unit_once() -> Result<()> {
    let (manager, backend) = manager_with(
        overworld(),
        MemoryContentBackend::new().with_latency(Duration::from_millis(10)),
    );

    let (start, hub) = tokio::join!(manager.load("Start"), manager.load("Hub"));
    start?;
    hub?;

    assert_eq!(backend.load_count("Start"), 1);
    assert_eq!(backend.load_count("Hub"), 1);
    assert_eq!(backend.load_count("Cave"), 1);
    assert_eq!(manager.active_units().len(), 2);
    Ok(())
}

#[tokio::test]
async fn startup_unit_becomes_active_without_loading() -> Result<()> {
    let graph = UnitGraph::from_entries(overworld())?;
    let backend = Arc::new(MemoryContentBackend::new());
    let manager = StreamingManager::new(graph, UnitLoader::new(backend.clone()))
        .with_startup_unit("Start");

    assert_eq!(manager.active_units(), ids(&["Start"]));
    assert!(manager.is_resident("Start"));
    assert!(!manager.is_resident("Hub"));
    assert_eq!(backend.total_loads(), 0);

    manager.load("Start").await?;
    assert_eq!(backend.load_count("Start"), 0);
    assert_eq!(backend.load_count("Hub"), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_or_persistent_startup_unit_is_not_active() -> Result<()> {
    let entries = vec![CatalogEntry::new("Hud").persistent(), CatalogEntry::new("Start")];

    let graph = UnitGraph::from_entries(entries.clone())?;
    let manager = StreamingManager::new(
        graph,
        UnitLoader::new(Arc::new(MemoryContentBackend::new())),
    )
    .with_startup_unit("Missing");
    assert!(manager.active_unit().is_none());

    let graph = UnitGraph::from_entries(entries)?;
    let manager = StreamingManager::new(
        graph,
        UnitLoader::new(Arc::new(MemoryContentBackend::new())),
    )
    .with_startup_unit("Hud");
    assert!(manager.active_unit().is_none());
    assert!(manager.is_resident("Hud"));
    Ok(())
}

#[tokio::test]
async fn debug_state_reflects_streaming() -> Result<()> {
    let (manager, _backend) = manager_for(overworld());

    manager.load("Start").await?;
    manager.load("Hub").await?;
    let state = manager.debug_state();

    assert_eq!(state.active_units, ids(&["Hub", "Start"]));
    assert_eq!(state.active_unit, Some("Hub".into()));
    assert_eq!(state.resident_units, ids(&["Cave", "Hub", "Start"]));
    assert!(state.to_string().contains("Active Unit: Hub"));
    Ok(())
}
