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

//! Runtime configuration, read from a RON file.
//!
//! ```ron
//! (
//!     catalog: "catalog.ron",
//!     content_root: "content",
//!     startup_unit: Some("Start"),
//!     startup_resident: false,
//!     show_debug_state: true,
//!     route: [Enter("Hub"), Leave("Start"), Enter("Cave"), Leave("Hub")],
//! )
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One movement of the subject across a unit boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStep {
    /// The subject enters the unit.
    Enter(String),
    /// The subject leaves the unit.
    Leave(String),
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteStep::Enter(id) => write!(f, "enter '{id}'"),
            RouteStep::Leave(id) => write!(f, "leave '{id}'"),
        }
    }
}

/// Settings for a runtime session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Unit catalog file (`.ron` or `.json`).
    pub catalog: PathBuf,
    /// Directory holding `<id>.unit` content files.
    pub content_root: PathBuf,
    /// Unit the session boots into, before the route starts.
    #[serde(default)]
    pub startup_unit: Option<String>,
    /// The host already holds `startup_unit`: seed it as resident and active
    /// instead of streaming it in.
    #[serde(default)]
    pub startup_resident: bool,
    /// Log the streaming state after every route step.
    #[serde(default)]
    pub show_debug_state: bool,
    /// Boundary crossings to replay, in order.
    #[serde(default)]
    pub route: Vec<RouteStep>,
}

impl RuntimeConfig {
    /// Parses a configuration from RON text. Paths are left as written.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).context("Malformed runtime configuration")
    }

    /// Reads a configuration file, resolving relative paths against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read runtime configuration '{}'", path.display()))?;

        let config = Self::from_ron_str(&text)
            .with_context(|| format!("Invalid runtime configuration '{}'", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolved_against(base))
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        if self.catalog.is_relative() {
            self.catalog = base.join(&self.catalog);
        }
        if self.content_root.is_relative() {
            self.content_root = base.join(&self.content_root);
        }
        self
    }
}
