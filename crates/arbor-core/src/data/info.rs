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

//! Upload handles: [`BufferInfo`] and [`ImageInfo`].

use super::{Data, SamplerInfo};
use crate::gpu::{BufferId, DeviceId, Format, ImageLayout, ImageViewId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Compares a payload's modification counter against a per-device last-seen
/// map, updating the map as a side effect. Returns `true` iff the payload
/// changed since this handle last uploaded it to `device`.
fn sync_counts(counts: &Mutex<HashMap<DeviceId, u64>>, data: &Data, device: DeviceId) -> bool {
    let current = data.modified_count();
    let mut counts = counts.lock().unwrap();
    let seen = counts.entry(device).or_insert(0);
    if *seen == current {
        false
    } else {
        *seen = current;
        true
    }
}

/// A shared handle scheduling a [`Data`] payload into a region of a GPU
/// buffer.
///
/// Producers and the transfer batch share the handle through an `Arc`; when
/// the batch observes itself as the only owner the upload is considered
/// abandoned and dropped.
#[derive(Debug)]
pub struct BufferInfo {
    /// The destination buffer. Handles without a destination are skipped on
    /// assignment.
    pub buffer: Option<BufferId>,
    /// Byte offset of the destination region.
    pub offset: u64,
    /// Byte size of the destination region.
    pub range: u64,
    /// The payload uploaded into the region.
    pub data: Arc<Data>,
    copied_counts: Mutex<HashMap<DeviceId, u64>>,
}

impl BufferInfo {
    /// Creates a handle covering `data`'s full size at `offset` in `buffer`.
    pub fn new(buffer: BufferId, offset: u64, data: Arc<Data>) -> Self {
        let range = data.data_size();
        Self {
            buffer: Some(buffer),
            offset,
            range,
            data,
            copied_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a handle with no destination buffer yet.
    pub fn unbound(offset: u64, data: Arc<Data>) -> Self {
        let range = data.data_size();
        Self {
            buffer: None,
            offset,
            range,
            data,
            copied_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` iff the payload was modified since this handle last
    /// uploaded it to `device`, updating the stored count as a side effect.
    pub fn sync_modified_counts(&self, device: DeviceId) -> bool {
        sync_counts(&self.copied_counts, &self.data, device)
    }
}

/// A shared handle scheduling a [`Data`] payload into an image.
#[derive(Debug)]
pub struct ImageInfo {
    /// The destination image view. Handles without a view are skipped on
    /// assignment.
    pub view: Option<ImageViewId>,
    /// The view's format; uploads convert the payload to it when it differs
    /// from the payload format.
    pub view_format: Format,
    /// The layout the image ends up in.
    pub layout: ImageLayout,
    /// The sampler parameters driving the mip level count.
    pub sampler: SamplerInfo,
    /// The payload. Handles without a payload are skipped on assignment.
    pub data: Option<Arc<Data>>,
    copied_counts: Mutex<HashMap<DeviceId, u64>>,
}

impl ImageInfo {
    /// Creates a complete image upload handle.
    pub fn new(
        view: ImageViewId,
        view_format: Format,
        layout: ImageLayout,
        sampler: SamplerInfo,
        data: Arc<Data>,
    ) -> Self {
        Self {
            view: Some(view),
            view_format,
            layout,
            sampler,
            data: Some(data),
            copied_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` if the view/image/data chain is complete, i.e. the
    /// handle describes an actual upload.
    pub fn is_complete(&self) -> bool {
        self.view.is_some() && self.data.is_some()
    }

    /// The number of mip levels the upload covers, derived from the data
    /// extents and the sampler.
    ///
    /// A sampler without mipmapping, or a payload limited to its base
    /// level, pins this to 1; otherwise the full chain for the largest
    /// extent, clamped by what the payload provides.
    pub fn mip_levels(&self) -> u32 {
        let Some(data) = &self.data else { return 1 };
        let properties = data.properties();
        if !self.sampler.mipmaps || properties.max_mipmaps <= 1 {
            return 1;
        }
        let max_extent = data.width().max(data.height()).max(data.depth()).max(1);
        let full_chain = 32 - max_extent.leading_zeros();
        full_chain.min(properties.max_mipmaps)
    }

    /// Returns `true` iff the payload was modified since this handle last
    /// uploaded it to `device`, updating the stored count as a side effect.
    pub fn sync_modified_counts(&self, device: DeviceId) -> bool {
        match &self.data {
            Some(data) => sync_counts(&self.copied_counts, data, device),
            None => false,
        }
    }
}
