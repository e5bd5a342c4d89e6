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

//! Diagnostic snapshot of the streaming state.

use std::fmt;

use strata_core::UnitId;

/// A point-in-time view of the streaming state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingDebugState {
    /// Active units, most recently entered first.
    pub active_units: Vec<UnitId>,
    /// The head of `active_units`.
    pub active_unit: Option<UnitId>,
    /// Every resident unit, sorted by identifier.
    pub resident_units: Vec<UnitId>,
}

impl fmt::Display for StreamingDebugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Active Units: [{}]", join(&self.active_units))?;
        match &self.active_unit {
            Some(id) => writeln!(f, "Active Unit: {id}")?,
            None => writeln!(f, "Active Unit: <none>")?,
        }
        write!(f, "Resident Units: [{}]", join(&self.resident_units))
    }
}

fn join(ids: &[UnitId]) -> String {
    ids.iter().map(UnitId::as_str).collect::<Vec<_>>().join(", ")
}
