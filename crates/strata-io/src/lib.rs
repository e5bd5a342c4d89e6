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

//! # Strata IO
//!
//! Loading services for world units. The [`UnitLoader`] turns a raw
//! [`ContentBackend`](strata_core::ContentBackend) into an idempotent,
//! request-coalescing "ensure unit X is loaded/unloaded" primitive. Two
//! backends ship with the crate: [`FsContentBackend`] for unit files on disk
//! and [`MemoryContentBackend`], an instrumented in-memory backend.

#![warn(missing_docs)]

pub mod backend;
mod loader;

pub use backend::{FsBackendError, FsContentBackend, MemoryContentBackend};
pub use loader::UnitLoader;
