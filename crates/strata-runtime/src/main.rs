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

//! Headless runtime: builds the unit graph, boots into the startup unit and
//! replays a route of boundary crossings, logging every transition.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use strata_agents::StreamingManager;
use strata_core::StreamingEvent;
use strata_data::UnitGraph;
use strata_io::{FsContentBackend, UnitLoader};

use crate::config::{RouteStep, RuntimeConfig};

const DEFAULT_CONFIG_PATH: &str = "strata.ron";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = RuntimeConfig::from_path(&config_path)?;
    run(&config).await?;
    Ok(())
}

/// Runs one session and returns the manager in its final state.
async fn run(config: &RuntimeConfig) -> Result<Arc<StreamingManager>> {
    let graph = UnitGraph::from_path(&config.catalog).with_context(|| {
        format!("Failed to build unit graph from '{}'", config.catalog.display())
    })?;

    let backend = Arc::new(FsContentBackend::new(&config.content_root));
    let mut manager = StreamingManager::new(graph, UnitLoader::new(backend));
    let events = manager.subscribe();

    match &config.startup_unit {
        Some(startup) if config.startup_resident => {
            log::info!("Booting into resident unit '{startup}'.");
            manager = manager.with_startup_unit(startup);
        }
        Some(startup) => {
            manager
                .load(startup)
                .await
                .with_context(|| format!("Failed to stream startup unit '{startup}'"))?;
        }
        None => {}
    }
    log_events(&events);

    let manager = Arc::new(manager);

    for step in &config.route {
        log::info!("Route: {step}");

        let outcome = match step {
            RouteStep::Enter(id) => manager.unit(id)?.load().await,
            RouteStep::Leave(id) => manager.unit(id)?.unload().await,
        };
        // A unit that fails to load must not be entered, so the route stops here.
        outcome.with_context(|| format!("Route step '{step}' failed"))?;

        log_events(&events);

        if config.show_debug_state {
            log::info!("{}", manager.debug_state());
        }
    }

    log::info!(
        "Route complete: {} units resident, active unit {}.",
        manager.loader().resident_units().len(),
        manager
            .active_unit()
            .map(|unit| format!("'{}'", unit.id()))
            .unwrap_or_else(|| "<none>".to_string())
    );

    Ok(manager)
}

fn log_events(events: &flume::Receiver<StreamingEvent>) {
    for event in events.try_iter() {
        match event {
            StreamingEvent::UnitLoaded(id) => log::info!("  + {id}"),
            StreamingEvent::UnitUnloaded(id) => log::info!("  - {id}"),
            StreamingEvent::ActiveUnitChanged { previous, current } => log::info!(
                "  active: {} -> {}",
                previous.as_ref().map_or("<none>", |id| id.as_str()),
                current.as_ref().map_or("<none>", |id| id.as_str()),
            ),
        }
    }
}
