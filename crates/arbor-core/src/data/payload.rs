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

//! The [`Data`] payload: CPU bytes plus a modification counter.

use super::DataProperties;
use bytemuck::Pod;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

/// A CPU-side payload destined for a GPU resource.
///
/// The payload owns its bytes behind a read-write lock so producers can
/// update them from any thread, and carries an atomic modification counter.
/// Creation counts as the first modification, so a freshly assigned payload
/// is uploaded on its first transfer cycle.
#[derive(Debug)]
pub struct Data {
    properties: DataProperties,
    width: u32,
    height: u32,
    depth: u32,
    bytes: RwLock<Vec<u8>>,
    modified: AtomicU64,
}

impl Data {
    /// Creates a payload from raw bytes.
    ///
    /// `width`, `height` and `depth` are value extents (1 for unused
    /// dimensions); linear buffer payloads use `(len, 1, 1)`.
    pub fn new(properties: DataProperties, width: u32, height: u32, depth: u32, bytes: Vec<u8>) -> Self {
        Self {
            properties,
            width,
            height,
            depth,
            bytes: RwLock::new(bytes),
            modified: AtomicU64::new(1),
        }
    }

    /// Creates a payload from a slice of plain-old-data values, setting the
    /// stride from the value type.
    pub fn from_slice<T: Pod>(
        mut properties: DataProperties,
        width: u32,
        height: u32,
        depth: u32,
        values: &[T],
    ) -> Self {
        properties.stride = std::mem::size_of::<T>() as u32;
        Self::new(
            properties,
            width,
            height,
            depth,
            bytemuck::cast_slice(values).to_vec(),
        )
    }

    /// The properties describing the payload's values.
    #[inline]
    pub fn properties(&self) -> DataProperties {
        self.properties
    }

    /// Width in values of the base level.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in values of the base level.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth in values of the base level.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total number of values in the base level.
    #[inline]
    pub fn value_count(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }

    /// Total payload size in bytes.
    pub fn data_size(&self) -> u64 {
        self.bytes.read().unwrap().len() as u64
    }

    /// Read access to the payload bytes.
    pub fn read(&self) -> RwLockReadGuard<'_, Vec<u8>> {
        self.bytes.read().unwrap()
    }

    /// Mutates the payload bytes and bumps the modification counter.
    pub fn modify(&self, f: impl FnOnce(&mut Vec<u8>)) {
        {
            let mut bytes = self.bytes.write().unwrap();
            f(&mut bytes);
        }
        self.dirty();
    }

    /// Marks the payload modified without touching the bytes.
    pub fn dirty(&self) {
        self.modified.fetch_add(1, Ordering::Release);
    }

    /// The current value of the modification counter.
    pub fn modified_count(&self) -> u64 {
        self.modified.load(Ordering::Acquire)
    }

    /// Byte offsets of each provided mip level, relative to the start of the
    /// payload. A payload without extra mip levels yields `[0]`.
    pub fn mipmap_offsets(&self) -> Vec<u64> {
        let levels = self.properties.max_mipmaps.max(1);
        let stride = self.properties.stride as u64;
        let (mut w, mut h, mut d) = (self.width as u64, self.height as u64, self.depth as u64);
        let mut offsets = Vec::with_capacity(levels as usize);
        let mut offset = 0u64;
        for _ in 0..levels {
            offsets.push(offset);
            offset += stride * w * h * d;
            w = (w / 2).max(1);
            h = (h / 2).max(1);
            d = (d / 2).max(1);
        }
        offsets
    }
}
