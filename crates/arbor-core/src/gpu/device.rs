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

//! The [`DeviceAdapter`] trait and the value types its operations exchange.

use crate::data::DataProperties;
use crate::gpu::error::GpuError;
use crate::gpu::flags::{BufferUsage, MemoryFlags, PipelineStageFlags};
use crate::gpu::handle::{
    BufferId, CommandBufferId, CommandPoolId, DeviceId, ImageViewId, QueueId, SemaphoreId,
};
use std::borrow::Cow;
use std::fmt::Debug;

/// How a resource may be shared between queue families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharingMode {
    /// Owned by one queue family at a time.
    #[default]
    Exclusive,
    /// Usable from multiple queue families concurrently.
    Concurrent,
}

/// The layout an image ends up in after a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageLayout {
    /// No defined layout.
    #[default]
    Undefined,
    /// Optimal as the destination of transfer operations.
    TransferDstOptimal,
    /// Optimal for sampled reads from shaders.
    ShaderReadOnlyOptimal,
    /// Usable for any access, suboptimal everywhere.
    General,
}

/// A single buffer-to-buffer copy region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCopy {
    /// Byte offset into the source buffer.
    pub src_offset: u64,
    /// Byte offset into the destination buffer.
    pub dst_offset: u64,
    /// Number of bytes to copy.
    pub size: u64,
}

/// A descriptor used to create a buffer with bound memory.
#[derive(Debug, Clone)]
pub struct BufferAllocationDescriptor<'a> {
    /// An optional debug label for the buffer.
    pub label: Option<Cow<'a, str>>,
    /// The total size of the buffer in bytes.
    pub size: u64,
    /// A bitmask of [`BufferUsage`] flags.
    pub usage: BufferUsage,
    /// How the buffer is shared between queue families.
    pub sharing: SharingMode,
    /// The memory properties the backing allocation must have.
    pub memory: MemoryFlags,
}

/// A queue handle together with the family index it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Queue {
    /// The adapter handle for the queue.
    pub id: QueueId,
    /// The queue family index, used to create compatible command pools.
    pub family_index: u32,
}

/// A semaphore handle paired with the pipeline stages a wait on it blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semaphore {
    /// The adapter handle for the semaphore.
    pub id: SemaphoreId,
    /// The pipeline stages a wait on this semaphore applies to.
    pub stage_mask: PipelineStageFlags,
}

impl Semaphore {
    /// Creates a semaphore wrapper from a handle and its wait stages.
    pub const fn new(id: SemaphoreId, stage_mask: PipelineStageFlags) -> Self {
        Self { id, stage_mask }
    }
}

/// One batch of work for [`DeviceAdapter::submit`].
#[derive(Debug, Clone, Default)]
pub struct SubmitInfo<'a> {
    /// Semaphores to wait on, each at its own stage mask.
    pub wait_semaphores: &'a [Semaphore],
    /// The recorded command buffers to execute, in order.
    pub command_buffers: &'a [CommandBufferId],
    /// Semaphores signalled when the batch completes on the GPU.
    pub signal_semaphores: &'a [SemaphoreId],
}

/// Everything a layout-transitioning, mip-aware image upload needs.
///
/// The source bytes have already been written into `staging` at
/// `source_offset` by the caller; `properties` describes them as the
/// target image expects them (format and stride rewritten if the upload
/// path widened the values).
#[derive(Debug, Clone)]
pub struct ImageTransfer<'a> {
    /// The destination image view.
    pub view: ImageViewId,
    /// The layout the image is transitioned to after the copy.
    pub layout: ImageLayout,
    /// The properties of the staged data.
    pub properties: DataProperties,
    /// Width of mip level 0 in values.
    pub width: u32,
    /// Height of mip level 0 in values.
    pub height: u32,
    /// Depth of mip level 0 in values.
    pub depth: u32,
    /// Number of mip levels to copy.
    pub mip_levels: u32,
    /// Byte offset of each mip level relative to `source_offset`.
    pub mipmap_offsets: &'a [u64],
    /// The staging buffer holding the source bytes.
    pub staging: BufferId,
    /// Byte offset of the image data inside the staging buffer.
    pub source_offset: u64,
}

/// The abstract interface to an explicit graphics API.
///
/// This trait is the seam between the Arbor subsystems and the underlying
/// GPU API: a backend crate implements it over the real device, and tests
/// implement it with recording mocks. All methods take `&self`; an
/// implementation is expected to handle its own internal synchronisation.
///
/// # Persistent mapping
///
/// [`map_buffer`](Self::map_buffer) establishes a persistent mapping that
/// stays valid until [`unmap_buffer`](Self::unmap_buffer) or buffer
/// destruction. [`write_mapped`](Self::write_mapped) writes through that
/// mapping; calling it on an unmapped buffer is a contract violation the
/// implementation is free to ignore or log.
pub trait DeviceAdapter: Send + Sync + Debug {
    /// The ID of the logical device behind this adapter.
    fn device_id(&self) -> DeviceId;

    // --- Buffers & memory ---

    /// Creates a buffer with memory bound to it.
    fn create_buffer(&self, descriptor: &BufferAllocationDescriptor)
        -> Result<BufferId, GpuError>;

    /// Destroys a buffer and its memory, ending any mapping.
    fn destroy_buffer(&self, id: BufferId) -> Result<(), GpuError>;

    /// Establishes a persistent mapping over the buffer's whole range.
    fn map_buffer(&self, id: BufferId) -> Result<(), GpuError>;

    /// Removes the persistent mapping.
    fn unmap_buffer(&self, id: BufferId);

    /// Writes bytes through the persistent mapping.
    fn write_mapped(&self, id: BufferId, offset: u64, bytes: &[u8]);

    // --- Synchronisation ---

    /// Creates a binary semaphore.
    fn create_semaphore(&self) -> Result<SemaphoreId, GpuError>;

    // --- Command recording ---

    /// Creates a command pool for the given queue family.
    fn create_command_pool(&self, queue_family_index: u32) -> Result<CommandPoolId, GpuError>;

    /// Allocates a primary command buffer from a pool.
    fn allocate_command_buffer(&self, pool: CommandPoolId) -> Result<CommandBufferId, GpuError>;

    /// Resets a command buffer for re-recording.
    fn reset_command_buffer(&self, cmd: CommandBufferId) -> Result<(), GpuError>;

    /// Begins recording with one-time-submit semantics.
    fn begin_command_buffer(&self, cmd: CommandBufferId) -> Result<(), GpuError>;

    /// Ends recording.
    fn end_command_buffer(&self, cmd: CommandBufferId) -> Result<(), GpuError>;

    /// Records a multi-region copy between two buffers.
    fn cmd_copy_buffer(
        &self,
        cmd: CommandBufferId,
        src: BufferId,
        dst: BufferId,
        regions: &[BufferCopy],
    );

    /// Records a layout-transitioning, mip-aware image upload from staging
    /// memory.
    fn cmd_transfer_image_data(&self, cmd: CommandBufferId, transfer: &ImageTransfer);

    // --- Submission ---

    /// Submits recorded work to a queue. Returns when the submission is
    /// queued; GPU-side completion is observed through the signal
    /// semaphores.
    fn submit(&self, queue: QueueId, info: &SubmitInfo) -> Result<(), GpuError>;
}
