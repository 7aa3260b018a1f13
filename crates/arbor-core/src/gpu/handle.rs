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

//! Opaque ID handles for GPU resources.
//!
//! The IDs are produced by a [`DeviceAdapter`] implementation and carry no
//! meaning outside of it.
//!
//! [`DeviceAdapter`]: crate::gpu::DeviceAdapter

/// Identifies a logical device. Per-device modification bookkeeping on the
/// host data model is keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u32);

/// An opaque handle to a device queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueId(pub usize);

/// An opaque handle to a GPU buffer with bound memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub usize);

/// An opaque handle to an image view (image + view format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageViewId(pub usize);

/// An opaque handle to a command pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandPoolId(pub usize);

/// An opaque handle to a primary command buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandBufferId(pub usize);

/// An opaque handle to a binary semaphore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemaphoreId(pub usize);
