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

//! # Strata Agents
//!
//! The orchestration layer of the streaming system. The
//! [`StreamingManager`](streaming_agent::StreamingManager) decides which
//! units must be resident, drives the [`UnitLoader`](strata_io::UnitLoader)
//! through load and unload sequences, and tracks which unit currently
//! contains the subject.

#![warn(missing_docs)]

pub mod streaming_agent;

pub use streaming_agent::{StreamingDebugState, StreamingManager, Unit};
