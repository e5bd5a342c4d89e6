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

//! Event channel used to announce streaming transitions to collaborators.
//!
//! The [`EventBus`] hands each subscriber its own `flume` channel. Audio, minimap
//! or save-checkpoint systems each drain their own [`StreamingEvent`]s instead of
//! holding a reference to the streaming manager.

mod bus;

pub use self::bus::EventBus;

use crate::unit::UnitId;

/// A transition observed by the streaming system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamingEvent {
    /// A unit's content finished loading and is now usable.
    UnitLoaded(UnitId),
    /// A unit's content was released.
    UnitUnloaded(UnitId),
    /// The unit considered to contain the subject changed.
    ///
    /// `current` is `None` when the subject is no longer inside any unit.
    ActiveUnitChanged {
        /// The previous active unit, if any.
        previous: Option<UnitId>,
        /// The new active unit, if any.
        current: Option<UnitId>,
    },
}
