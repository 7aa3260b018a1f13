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

//! CPU-to-GPU transfer scheduling across a ring of in-flight frames.
//!
//! Producers register [`BufferInfo`]/[`ImageInfo`] upload handles with the
//! scheduler; each frame the frame-pacing loop calls
//! [`TransferScheduler::advance`] and then
//! [`TransferScheduler::transfer_data`], which copies every payload whose
//! modification counter advanced into the frame's staging block and submits
//! one transfer command buffer.
//!
//! [`BufferInfo`]: arbor_core::data::BufferInfo
//! [`ImageInfo`]: arbor_core::data::ImageInfo

mod batch;
mod scheduler;
mod staging;

pub use scheduler::{TransferScheduler, TransferStage};

/// Staging alignment between recorded entries.
const REGION_ALIGNMENT: u64 = 4;

/// Rounds `offset` up to the next [`REGION_ALIGNMENT`] boundary.
#[inline]
fn align_up(offset: u64) -> u64 {
    offset.div_ceil(REGION_ALIGNMENT) * REGION_ALIGNMENT
}
