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

//! The host-side data model for GPU uploads.
//!
//! A [`Data`] payload owns CPU bytes and a monotonically increasing
//! modification counter. [`BufferInfo`] and [`ImageInfo`] are shared upload
//! handles pointing a payload at a destination resource; they remember, per
//! device, the last counter value they uploaded, which is how the transfer
//! scheduler skips unmodified data.

mod info;
mod payload;

pub use self::info::{BufferInfo, ImageInfo};
pub use self::payload::Data;

use crate::gpu::Format;
use std::sync::Arc;

/// How often a payload is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataVariance {
    /// Uploaded once; the upload handle is dropped after the first transfer.
    Static,
    /// Re-uploaded whenever the modification counter advances.
    #[default]
    Dynamic,
}

/// Describes the values held by a [`Data`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataProperties {
    /// The format of each value.
    pub format: Format,
    /// Bytes per value.
    pub stride: u32,
    /// Expected update frequency.
    pub variance: DataVariance,
    /// Upper bound on the number of mip levels this payload provides data
    /// for. 1 means base level only.
    pub max_mipmaps: u32,
}

impl Default for DataProperties {
    fn default() -> Self {
        Self {
            format: Format::Undefined,
            stride: 0,
            variance: DataVariance::Dynamic,
            max_mipmaps: 1,
        }
    }
}

/// The sampler parameters that influence how image data is uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerInfo {
    /// Whether the sampler reads mip levels beyond the base level.
    pub mipmaps: bool,
}

/// A batch of upload handles handed to the transfer scheduler in one call.
#[derive(Debug, Clone, Default)]
pub struct DynamicData {
    /// Buffer upload handles.
    pub buffer_infos: Vec<Arc<BufferInfo>>,
    /// Image upload handles.
    pub image_infos: Vec<Arc<ImageInfo>>,
}
