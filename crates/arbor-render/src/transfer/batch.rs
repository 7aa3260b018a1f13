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

//! The pending-upload set for one transfer stage.

use arbor_core::data::{BufferInfo, ImageInfo};
use arbor_core::gpu::BufferId;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Uploads accumulated between transfer cycles.
///
/// Buffer uploads are grouped by destination buffer and ordered by
/// destination offset, which yields one copy command per buffer with its
/// regions in a deterministic, cache-friendly order. Re-assigning a handle
/// for the same `(buffer, offset)` slot replaces the previous one.
#[derive(Debug, Default)]
pub(crate) struct TransferBatch {
    /// Destination buffer -> (destination offset -> upload handle).
    pub buffer_map: BTreeMap<BufferId, BTreeMap<u64, Arc<BufferInfo>>>,
    /// Pending image uploads; order carries no meaning.
    pub images: Vec<Arc<ImageInfo>>,
}

impl TransferBatch {
    /// Inserts buffer upload handles. Handles without a destination buffer
    /// are ignored.
    pub fn assign_buffer_infos(&mut self, infos: impl IntoIterator<Item = Arc<BufferInfo>>) {
        for info in infos {
            if let Some(buffer) = info.buffer {
                self.buffer_map
                    .entry(buffer)
                    .or_default()
                    .insert(info.offset, info);
            }
        }
    }

    /// Inserts image upload handles. Handles with an incomplete
    /// view/image/data chain are ignored; a handle already present is not
    /// duplicated.
    pub fn assign_image_infos(&mut self, infos: impl IntoIterator<Item = Arc<ImageInfo>>) {
        for info in infos {
            if info.is_complete() && !self.images.iter().any(|held| Arc::ptr_eq(held, &info)) {
                self.images.push(info);
            }
        }
    }

    /// Returns `true` if any upload is pending.
    pub fn has_data(&self) -> bool {
        !self.buffer_map.is_empty() || !self.images.is_empty()
    }
}
