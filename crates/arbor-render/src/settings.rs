// Copyright 2026 arbor-engine
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

//! Settings for the transfer subsystem.

use serde::{Deserialize, Serialize};

/// Configuration for a [`TransferScheduler`].
///
/// [`TransferScheduler`]: crate::TransferScheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSettings {
    /// Number of in-flight frames, i.e. staging blocks in the ring.
    /// Values below 1 are treated as 1.
    pub frames_in_flight: usize,
    /// Floor for staging buffer allocations. Growing to at least this size
    /// avoids a reallocation cascade during the first frames.
    pub minimum_staging_buffer_size: u64,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            frames_in_flight: 3,
            minimum_staging_buffer_size: 16 * 1024 * 1024,
        }
    }
}
