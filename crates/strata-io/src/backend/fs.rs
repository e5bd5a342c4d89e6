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

//! A content backend reading unit files from a directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use strata_core::{BackendError, ContentBackend, UnitId};

/// File extension of unit content files.
pub const UNIT_FILE_EXTENSION: &str = "unit";

/// Errors raised by [`FsContentBackend`].
#[derive(Debug, thiserror::Error)]
pub enum FsBackendError {
    /// The unit identifier cannot be mapped to a file inside the content root.
    #[error("unit id '{0}' is not a valid file name")]
    InvalidId(UnitId),

    /// The unit file could not be read.
    #[error("failed to read unit file '{}'", path.display())]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Loads `<root>/<id>.unit` into memory and drops it again on unload.
///
/// The backend does not interpret the bytes; decoding is left to whoever
/// consumes the unit once it is resident.
#[derive(Debug)]
pub struct FsContentBackend {
    root: PathBuf,
    content: Mutex<HashMap<UnitId, Vec<u8>>>,
}

impl FsContentBackend {
    /// Creates a backend rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            content: Mutex::new(HashMap::new()),
        }
    }

    /// The content directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding unit `id`.
    pub fn unit_path(&self, id: &UnitId) -> Result<PathBuf, FsBackendError> {
        let name = id.as_str();
        let is_plain_name = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);

        if !is_plain_name {
            return Err(FsBackendError::InvalidId(id.clone()));
        }

        Ok(self.root.join(format!("{name}.{UNIT_FILE_EXTENSION}")))
    }

    /// Size in bytes of the unit's content, if it is loaded.
    pub fn content_len(&self, id: &str) -> Option<usize> {
        self.content().get(id).map(Vec::len)
    }

    fn content(&self) -> MutexGuard<'_, HashMap<UnitId, Vec<u8>>> {
        self.content.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ContentBackend for FsContentBackend {
    async fn load(&self, id: &UnitId) -> Result<(), BackendError> {
        let path = self.unit_path(id)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| FsBackendError::Read {
                path: path.clone(),
                source,
            })?;

        log::trace!("Read {} bytes for unit '{id}' from {}", bytes.len(), path.display());
        self.content().insert(id.clone(), bytes);
        Ok(())
    }

    async fn unload(&self, id: &UnitId) -> Result<(), BackendError> {
        self.content().remove(id);
        Ok(())
    }
}
