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

//! Acts as the agent for world streaming.
//!
//! Collaborators (trigger adapters, UI, audio zones) hold a [`Unit`] handle or
//! an `Arc<StreamingManager>` handed out by the application root; there is no
//! global instance. All entry points take `&self` and are meant to be driven
//! from one logical task queue. Overlapping requests only interleave at the
//! loader's await points, where per-unit coalescing keeps them consistent.

mod debug;
mod manager;
mod unit;

pub use debug::StreamingDebugState;
pub use manager::StreamingManager;
pub use unit::Unit;
