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

//! # Strata Core
//!
//! Foundational crate containing the shared vocabulary of the streaming
//! system: unit identifiers and descriptors, the error taxonomy, the
//! [`ContentBackend`](backend::ContentBackend) contract and the event bus
//! used to announce residency and active-unit transitions.

#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod event;
pub mod unit;

pub use backend::{BackendError, ContentBackend};
pub use error::{StreamingError, TransportOp};
pub use event::{EventBus, StreamingEvent};
pub use unit::{UnitDescriptor, UnitId};
