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

//! Per-frame staging state: host-visible buffer, command buffer, semaphore.

use crate::error::TransferError;
use arbor_core::gpu::{
    BufferAllocationDescriptor, BufferCopy, BufferId, BufferUsage, CommandBufferId, CommandPoolId,
    DeviceAdapter, MemoryFlags, PipelineStageFlags, Semaphore, SharingMode,
};
use std::borrow::Cow;

/// A host-visible staging buffer with a persistent mapping.
///
/// The mapping is established right after allocation and lives exactly as
/// long as the buffer, so holding a `StagingBuffer` implies the whole
/// `[0, size)` range is writable through the adapter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StagingBuffer {
    pub buffer: BufferId,
    pub size: u64,
}

/// The per-frame slot of the transfer ring.
///
/// The command buffer and semaphore are created lazily on the first cycle
/// that touches the slot; the staging buffer grows but never shrinks.
#[derive(Debug, Default)]
pub(crate) struct StagingBlock {
    pub staging: Option<StagingBuffer>,
    /// Reusable scratch for the cycle's copy regions.
    pub copy_regions: Vec<BufferCopy>,
    command_pool: Option<CommandPoolId>,
    command_buffer: Option<CommandBufferId>,
    semaphore: Option<Semaphore>,
}

impl StagingBlock {
    /// Returns the slot's command buffer, allocating pool and buffer on
    /// first use and resetting the buffer on later cycles.
    pub fn ensure_command_buffer(
        &mut self,
        adapter: &dyn DeviceAdapter,
        queue_family_index: u32,
    ) -> Result<CommandBufferId, TransferError> {
        match self.command_buffer {
            Some(cmd) => {
                adapter
                    .reset_command_buffer(cmd)
                    .map_err(TransferError::Adapter)?;
                Ok(cmd)
            }
            None => {
                let pool = adapter
                    .create_command_pool(queue_family_index)
                    .map_err(TransferError::Adapter)?;
                let cmd = adapter
                    .allocate_command_buffer(pool)
                    .map_err(TransferError::Adapter)?;
                self.command_pool = Some(pool);
                self.command_buffer = Some(cmd);
                Ok(cmd)
            }
        }
    }

    /// Returns the slot's completion semaphore, creating it on first use at
    /// the ALL_COMMANDS stage.
    pub fn ensure_semaphore(
        &mut self,
        adapter: &dyn DeviceAdapter,
    ) -> Result<Semaphore, TransferError> {
        if let Some(semaphore) = self.semaphore {
            return Ok(semaphore);
        }
        let id = adapter.create_semaphore().map_err(TransferError::Adapter)?;
        let semaphore = Semaphore::new(id, PipelineStageFlags::ALL_COMMANDS);
        log::debug!("StagingBlock: created completion semaphore {id:?}");
        self.semaphore = Some(semaphore);
        Ok(semaphore)
    }

    /// Returns a staging buffer of at least `required` bytes, reallocating
    /// (and re-mapping) when the current one is too small.
    ///
    /// New allocations are clamped up to `minimum_size`; staging is
    /// per-frame so it never shrinks.
    pub fn ensure_staging(
        &mut self,
        adapter: &dyn DeviceAdapter,
        required: u64,
        minimum_size: u64,
    ) -> Result<StagingBuffer, TransferError> {
        if let Some(staging) = self.staging {
            if staging.size >= required {
                return Ok(staging);
            }
        }

        let previous_size = self.staging.map_or(0, |s| s.size);
        self.release_staging(adapter);

        let size = required.max(minimum_size);
        let buffer = adapter
            .create_buffer(&BufferAllocationDescriptor {
                label: Some(Cow::Borrowed("transfer staging")),
                size,
                usage: BufferUsage::TRANSFER_SRC,
                sharing: SharingMode::Exclusive,
                memory: MemoryFlags::HOST_VISIBLE | MemoryFlags::HOST_COHERENT,
            })
            .map_err(TransferError::Adapter)?;

        if let Err(err) = adapter.map_buffer(buffer) {
            // Surface the mapping code; the unmapped buffer is useless.
            if let Err(destroy_err) = adapter.destroy_buffer(buffer) {
                log::warn!("StagingBlock: failed to destroy unmapped staging buffer: {destroy_err}");
            }
            return Err(TransferError::MapFailed(err));
        }

        log::info!(
            "StagingBlock: allocated staging buffer {buffer:?}, previous size = {previous_size}, size = {size}"
        );

        let staging = StagingBuffer { buffer, size };
        self.staging = Some(staging);
        Ok(staging)
    }

    /// Unmaps and destroys the staging buffer, if any.
    pub fn release_staging(&mut self, adapter: &dyn DeviceAdapter) {
        if let Some(staging) = self.staging.take() {
            adapter.unmap_buffer(staging.buffer);
            if let Err(err) = adapter.destroy_buffer(staging.buffer) {
                log::warn!("StagingBlock: failed to destroy staging buffer: {err}");
            }
        }
    }
}
