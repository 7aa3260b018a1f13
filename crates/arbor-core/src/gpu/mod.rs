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

//! The graphics-API adapter interface.
//!
//! This module defines the abstract surface the Arbor subsystems consume
//! from an underlying explicit graphics API (queues, command buffers,
//! semaphores, staging memory). Resources are referenced through opaque ID
//! handles; a backend crate (or a test mock) implements [`DeviceAdapter`]
//! to provide the actual behaviour.

pub mod device;
pub mod error;
pub mod flags;
pub mod format;
pub mod handle;

pub use self::device::{
    BufferAllocationDescriptor, BufferCopy, DeviceAdapter, ImageLayout, ImageTransfer, Queue,
    Semaphore, SharingMode, SubmitInfo,
};
pub use self::error::GpuError;
pub use self::flags::{BufferUsage, MemoryFlags, PipelineStageFlags};
pub use self::format::{Format, FormatTraits};
pub use self::handle::{
    BufferId, CommandBufferId, CommandPoolId, DeviceId, ImageViewId, QueueId, SemaphoreId,
};
