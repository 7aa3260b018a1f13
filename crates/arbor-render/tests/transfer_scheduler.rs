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

//! Integration tests driving the transfer scheduler through a recording
//! mock of the graphics-API adapter.

use arbor_core::data::{
    BufferInfo, Data, DataProperties, DataVariance, DynamicData, ImageInfo, SamplerInfo,
};
use arbor_core::gpu::{
    BufferAllocationDescriptor, BufferCopy, BufferId, CommandBufferId, CommandPoolId,
    DeviceAdapter, DeviceId, Format, GpuError, ImageLayout, ImageTransfer, ImageViewId,
    PipelineStageFlags, Queue, QueueId, Semaphore, SemaphoreId, SubmitInfo,
};
use arbor_render::{TransferError, TransferScheduler, TransferSettings, TransferStage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// --- Mock adapter ---

#[derive(Debug, Clone)]
struct MockBuffer {
    size: u64,
    mapped: bool,
    destroyed: bool,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
struct CopyRecord {
    src: BufferId,
    dst: BufferId,
    regions: Vec<BufferCopy>,
}

#[derive(Debug, Clone)]
struct ImageRecord {
    view: ImageViewId,
    layout: ImageLayout,
    format: Format,
    stride: u32,
    mip_levels: u32,
    mipmap_offsets: Vec<u64>,
    staging: BufferId,
    source_offset: u64,
}

#[derive(Debug, Clone)]
struct SubmitRecord {
    queue: QueueId,
    waits: Vec<Semaphore>,
    command_buffers: Vec<CommandBufferId>,
    signals: Vec<SemaphoreId>,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: usize,
    buffers: HashMap<usize, MockBuffer>,
    copies: Vec<CopyRecord>,
    image_transfers: Vec<ImageRecord>,
    submits: Vec<SubmitRecord>,
}

/// A [`DeviceAdapter`] that records every call and backs buffers with host
/// memory, so tests can inspect staging contents byte for byte.
#[derive(Debug, Default)]
struct MockAdapter {
    state: Mutex<MockState>,
    fail_map: AtomicBool,
    fail_submit: AtomicBool,
}

impl MockAdapter {
    fn next_id(state: &mut MockState) -> usize {
        state.next_id += 1;
        state.next_id
    }

    fn staging_bytes(&self, id: BufferId) -> Vec<u8> {
        self.state.lock().unwrap().buffers[&id.0].bytes.clone()
    }

    fn buffer(&self, id: BufferId) -> MockBuffer {
        self.state.lock().unwrap().buffers[&id.0].clone()
    }

    fn copies(&self) -> Vec<CopyRecord> {
        self.state.lock().unwrap().copies.clone()
    }

    fn image_transfers(&self) -> Vec<ImageRecord> {
        self.state.lock().unwrap().image_transfers.clone()
    }

    fn submits(&self) -> Vec<SubmitRecord> {
        self.state.lock().unwrap().submits.clone()
    }
}

impl DeviceAdapter for MockAdapter {
    fn device_id(&self) -> DeviceId {
        DeviceId(0)
    }

    fn create_buffer(
        &self,
        descriptor: &BufferAllocationDescriptor,
    ) -> Result<BufferId, GpuError> {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        state.buffers.insert(
            id,
            MockBuffer {
                size: descriptor.size,
                mapped: false,
                destroyed: false,
                bytes: vec![0; descriptor.size as usize],
            },
        );
        Ok(BufferId(id))
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), GpuError> {
        let mut state = self.state.lock().unwrap();
        let buffer = state.buffers.get_mut(&id.0).ok_or(GpuError::InvalidHandle)?;
        buffer.destroyed = true;
        buffer.mapped = false;
        Ok(())
    }

    fn map_buffer(&self, id: BufferId) -> Result<(), GpuError> {
        if self.fail_map.load(Ordering::Relaxed) {
            return Err(GpuError::MapFailed("VK_ERROR_MEMORY_MAP_FAILED".into()));
        }
        let mut state = self.state.lock().unwrap();
        let buffer = state.buffers.get_mut(&id.0).ok_or(GpuError::InvalidHandle)?;
        buffer.mapped = true;
        Ok(())
    }

    fn unmap_buffer(&self, id: BufferId) {
        if let Some(buffer) = self.state.lock().unwrap().buffers.get_mut(&id.0) {
            buffer.mapped = false;
        }
    }

    fn write_mapped(&self, id: BufferId, offset: u64, bytes: &[u8]) {
        let mut state = self.state.lock().unwrap();
        let buffer = state.buffers.get_mut(&id.0).expect("unknown buffer");
        assert!(buffer.mapped, "write through an unmapped buffer");
        let start = offset as usize;
        buffer.bytes[start..start + bytes.len()].copy_from_slice(bytes);
    }

    fn create_semaphore(&self) -> Result<SemaphoreId, GpuError> {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        Ok(SemaphoreId(id))
    }

    fn create_command_pool(&self, _queue_family_index: u32) -> Result<CommandPoolId, GpuError> {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        Ok(CommandPoolId(id))
    }

    fn allocate_command_buffer(&self, _pool: CommandPoolId) -> Result<CommandBufferId, GpuError> {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        Ok(CommandBufferId(id))
    }

    fn reset_command_buffer(&self, _cmd: CommandBufferId) -> Result<(), GpuError> {
        Ok(())
    }

    fn begin_command_buffer(&self, _cmd: CommandBufferId) -> Result<(), GpuError> {
        Ok(())
    }

    fn end_command_buffer(&self, _cmd: CommandBufferId) -> Result<(), GpuError> {
        Ok(())
    }

    fn cmd_copy_buffer(
        &self,
        _cmd: CommandBufferId,
        src: BufferId,
        dst: BufferId,
        regions: &[BufferCopy],
    ) {
        self.state.lock().unwrap().copies.push(CopyRecord {
            src,
            dst,
            regions: regions.to_vec(),
        });
    }

    fn cmd_transfer_image_data(&self, _cmd: CommandBufferId, transfer: &ImageTransfer) {
        self.state.lock().unwrap().image_transfers.push(ImageRecord {
            view: transfer.view,
            layout: transfer.layout,
            format: transfer.properties.format,
            stride: transfer.properties.stride,
            mip_levels: transfer.mip_levels,
            mipmap_offsets: transfer.mipmap_offsets.to_vec(),
            staging: transfer.staging,
            source_offset: transfer.source_offset,
        });
    }

    fn submit(&self, queue: QueueId, info: &SubmitInfo) -> Result<(), GpuError> {
        if self.fail_submit.load(Ordering::Relaxed) {
            return Err(GpuError::SubmitFailed("VK_ERROR_DEVICE_LOST".into()));
        }
        self.state.lock().unwrap().submits.push(SubmitRecord {
            queue,
            waits: info.wait_semaphores.to_vec(),
            command_buffers: info.command_buffers.to_vec(),
            signals: info.signal_semaphores.to_vec(),
        });
        Ok(())
    }
}

// --- Helpers ---

fn transfer_queue() -> Queue {
    Queue {
        id: QueueId(0),
        family_index: 1,
    }
}

fn scheduler_with(frames: usize) -> (Arc<MockAdapter>, TransferScheduler) {
    let adapter = Arc::new(MockAdapter::default());
    let scheduler = TransferScheduler::new(
        adapter.clone(),
        transfer_queue(),
        &TransferSettings {
            frames_in_flight: frames,
            minimum_staging_buffer_size: 0,
        },
    );
    (adapter, scheduler)
}

fn dynamic_payload(bytes: Vec<u8>) -> Arc<Data> {
    let len = bytes.len() as u32;
    Arc::new(Data::new(
        DataProperties {
            format: Format::R8Unorm,
            stride: 1,
            variance: DataVariance::Dynamic,
            max_mipmaps: 1,
        },
        len,
        1,
        1,
        bytes,
    ))
}

fn static_payload(bytes: Vec<u8>) -> Arc<Data> {
    let len = bytes.len() as u32;
    Arc::new(Data::new(
        DataProperties {
            format: Format::R8Unorm,
            stride: 1,
            variance: DataVariance::Static,
            max_mipmaps: 1,
        },
        len,
        1,
        1,
        bytes,
    ))
}

// --- Ring behaviour ---

#[test]
fn advance_tracks_current_index() {
    let (_, scheduler) = scheduler_with(3);

    // Unset sentinel before the first advance.
    assert_eq!(scheduler.index(0), 3);

    let mut seen = Vec::new();
    for _ in 0..4 {
        scheduler.advance();
        let current = scheduler.index(0);
        assert!(current < 3);
        seen.push(current);
    }
    assert_eq!(seen, vec![0, 1, 2, 0]);

    // After the fourth advance the previous frame used block 2.
    assert_eq!(scheduler.index(1), 2);
    assert_eq!(scheduler.index(2), 1);
    // Out-of-range lookups return the sentinel.
    assert_eq!(scheduler.index(3), 3);
    assert_eq!(scheduler.index(7), 3);
}

#[test]
fn advance_with_single_frame_stays_at_zero() {
    let (_, scheduler) = scheduler_with(1);
    scheduler.advance();
    assert_eq!(scheduler.index(0), 0);
    scheduler.advance();
    scheduler.advance();
    assert_eq!(scheduler.index(0), 0);
}

// --- End-to-end buffer scenarios ---

#[test]
fn single_dynamic_upload() {
    let (adapter, scheduler) = scheduler_with(2);
    let dst = BufferId(100);
    let payload = dynamic_payload((0..64).collect());
    let info = Arc::new(BufferInfo::new(dst, 16, payload));

    scheduler.assign(&DynamicData {
        buffer_infos: vec![info.clone()],
        image_infos: vec![],
    });
    assert!(scheduler.contains_data_to_transfer());

    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let copies = adapter.copies();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].dst, dst);
    assert_eq!(
        copies[0].regions,
        vec![BufferCopy {
            src_offset: 0,
            dst_offset: 16,
            size: 64
        }]
    );

    // The payload landed at the start of the staging buffer.
    let staging = adapter.staging_bytes(copies[0].src);
    assert_eq!(&staging[..64], (0..64).collect::<Vec<u8>>().as_slice());

    // One submission on the transfer queue, signalling the completion
    // semaphore, which is then published.
    let submits = adapter.submits();
    assert_eq!(submits.len(), 1);
    assert_eq!(submits[0].queue, transfer_queue().id);
    let completed = scheduler
        .current_transfer_completed_semaphore()
        .expect("a completed semaphore after a submitting cycle");
    assert_eq!(submits[0].signals, vec![completed.id]);
    assert_eq!(completed.stage_mask, PipelineStageFlags::ALL_COMMANDS);

    // Dynamic entries stay pending.
    assert!(scheduler.contains_data_to_transfer());
}

#[test]
fn static_entry_drops_after_upload() {
    let (adapter, scheduler) = scheduler_with(2);
    let info = Arc::new(BufferInfo::new(BufferId(100), 0, static_payload(vec![7; 32])));

    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    assert_eq!(adapter.submits().len(), 1);
    assert!(!scheduler.contains_data_to_transfer());

    // A second cycle finds nothing at all to do.
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    assert_eq!(adapter.submits().len(), 1);
}

#[test]
fn two_buffers_three_infos_group_and_order() {
    let (adapter, scheduler) = scheduler_with(2);
    let buffer_a = BufferId(100);
    let buffer_b = BufferId(200);

    // Assigned out of offset order on purpose.
    scheduler.assign_buffer_infos(
        TransferStage::Early,
        [
            Arc::new(BufferInfo::new(buffer_a, 32, dynamic_payload(vec![2; 16]))),
            Arc::new(BufferInfo::new(buffer_b, 0, dynamic_payload(vec![3; 16]))),
            Arc::new(BufferInfo::new(buffer_a, 0, dynamic_payload(vec![1; 16]))),
        ],
    );
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    // One copy command per destination buffer.
    let copies = adapter.copies();
    assert_eq!(copies.len(), 2);
    assert_eq!(copies[0].dst, buffer_a);
    assert_eq!(copies[1].dst, buffer_b);

    // Regions within a buffer are emitted in destination-offset order, and
    // the destinations are strictly increasing.
    assert_eq!(
        copies[0].regions,
        vec![
            BufferCopy {
                src_offset: 0,
                dst_offset: 0,
                size: 16
            },
            BufferCopy {
                src_offset: 16,
                dst_offset: 32,
                size: 16
            },
        ]
    );
    assert_eq!(
        copies[1].regions,
        vec![BufferCopy {
            src_offset: 32,
            dst_offset: 0,
            size: 16
        }]
    );

    let staging = adapter.staging_bytes(copies[0].src);
    assert_eq!(&staging[..16], &[1u8; 16]);
    assert_eq!(&staging[16..32], &[2u8; 16]);
    assert_eq!(&staging[32..48], &[3u8; 16]);
}

#[test]
fn assign_twice_uploads_once() {
    let (adapter, scheduler) = scheduler_with(2);
    let info = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![9; 16])));

    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);
    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let copies = adapter.copies();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].regions.len(), 1);
}

#[test]
fn unmodified_second_cycle_submits_nothing() {
    let (adapter, scheduler) = scheduler_with(2);
    let info = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![9; 16])));

    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    let completed = scheduler.current_transfer_completed_semaphore();
    assert_eq!(adapter.submits().len(), 1);

    // Nothing was modified in between: the entry stays pending, the cycle
    // records no copies and submits nothing, the published semaphore is
    // unchanged.
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    assert_eq!(adapter.copies().len(), 1);
    assert_eq!(adapter.submits().len(), 1);
    assert_eq!(scheduler.current_transfer_completed_semaphore(), completed);

    // Dirtying the payload re-uploads it.
    info.data.dirty();
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    assert_eq!(adapter.submits().len(), 2);
}

#[test]
fn transfer_without_advance_is_a_no_op() {
    let (adapter, scheduler) = scheduler_with(2);
    scheduler.assign_buffer_infos(
        TransferStage::Early,
        [Arc::new(BufferInfo::new(BufferId(1), 0, dynamic_payload(vec![1; 8])))],
    );

    scheduler.transfer_data().unwrap();
    assert!(adapter.submits().is_empty());
    assert!(adapter.copies().is_empty());
    assert!(scheduler.contains_data_to_transfer());
}

#[test]
fn abandoned_entries_are_drained() {
    let (adapter, scheduler) = scheduler_with(2);
    let info = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 16])));
    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);

    // The producer releases its reference; only the batch holds the handle.
    drop(info);

    scheduler.advance();
    scheduler.transfer_data().unwrap();
    assert!(adapter.submits().is_empty());
    assert!(!scheduler.contains_data_to_transfer());
}

#[test]
fn staging_grows_but_never_shrinks() {
    let (adapter, scheduler) = scheduler_with(1);
    let small = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 64])));
    scheduler.assign_buffer_infos(TransferStage::Early, [small.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let first_staging = adapter.copies()[0].src;
    assert_eq!(adapter.buffer(first_staging).size, 64);

    // A larger batch forces a reallocation; the old buffer is released.
    let large = Arc::new(BufferInfo::new(BufferId(100), 64, dynamic_payload(vec![2; 256])));
    scheduler.assign_buffer_infos(TransferStage::Early, [large.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let second_staging = adapter.copies().last().unwrap().src;
    assert_ne!(second_staging, first_staging);
    assert!(adapter.buffer(second_staging).size >= 64 + 256);
    assert!(adapter.buffer(first_staging).destroyed);

    // A smaller follow-up reuses the grown buffer.
    small.data.dirty();
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    assert_eq!(adapter.copies().last().unwrap().src, second_staging);
}

#[test]
fn minimum_staging_size_is_a_floor() {
    let adapter = Arc::new(MockAdapter::default());
    let scheduler = TransferScheduler::new(
        adapter.clone(),
        transfer_queue(),
        &TransferSettings {
            frames_in_flight: 1,
            minimum_staging_buffer_size: 1024,
        },
    );
    scheduler.assign_buffer_infos(
        TransferStage::Early,
        [Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 8])))],
    );
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let staging = adapter.copies()[0].src;
    assert_eq!(adapter.buffer(staging).size, 1024);
}

// --- Semaphores ---

#[test]
fn wait_and_signal_semaphores_flow_through_submission() {
    let (adapter, scheduler) = scheduler_with(2);
    let wait = Semaphore::new(SemaphoreId(9000), PipelineStageFlags::TRANSFER);
    let extra_signal = Semaphore::new(SemaphoreId(9001), PipelineStageFlags::ALL_COMMANDS);
    scheduler.add_wait_semaphore(wait);
    scheduler.add_signal_semaphore(extra_signal);

    let info = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 16])));
    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let submits = adapter.submits();
    assert_eq!(submits[0].waits, vec![wait]);
    let completed = scheduler.current_transfer_completed_semaphore().unwrap();
    assert_eq!(submits[0].signals, vec![completed.id, extra_signal.id]);

    // Wait semaphores are consumed by the cycle, signal semaphores persist.
    // The second cycle runs on the next block and signals that block's
    // completion semaphore.
    info.data.dirty();
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    let submits = adapter.submits();
    let completed = scheduler.current_transfer_completed_semaphore().unwrap();
    assert!(submits[1].waits.is_empty());
    assert_eq!(submits[1].signals, vec![completed.id, extra_signal.id]);
}

#[test]
fn empty_cycle_still_consumes_wait_semaphores() {
    let (adapter, scheduler) = scheduler_with(2);
    let info = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 16])));
    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    // All uploads filtered out this cycle; the wait list is still cleared.
    scheduler.add_wait_semaphore(Semaphore::new(SemaphoreId(9000), PipelineStageFlags::TRANSFER));
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    assert_eq!(adapter.submits().len(), 1);

    info.data.dirty();
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    let submits = adapter.submits();
    assert_eq!(submits.len(), 2);
    assert!(submits[1].waits.is_empty());
}

// --- Error paths ---

#[test]
fn map_failure_aborts_the_cycle() {
    let (adapter, scheduler) = scheduler_with(2);
    adapter.fail_map.store(true, Ordering::Relaxed);

    scheduler.assign_buffer_infos(
        TransferStage::Early,
        [Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 16])))],
    );
    scheduler.advance();

    let err = scheduler.transfer_data().unwrap_err();
    assert!(matches!(err, TransferError::MapFailed(_)));
    assert!(adapter.submits().is_empty());
    assert!(adapter.copies().is_empty());

    // The entry is still pending; a healthy cycle picks it up.
    adapter.fail_map.store(false, Ordering::Relaxed);
    scheduler.transfer_data().unwrap();
    assert_eq!(adapter.submits().len(), 1);
}

#[test]
fn submit_failure_surfaces_and_clears_waits() {
    let (adapter, scheduler) = scheduler_with(2);
    adapter.fail_submit.store(true, Ordering::Relaxed);
    scheduler.add_wait_semaphore(Semaphore::new(SemaphoreId(9000), PipelineStageFlags::TRANSFER));

    let info = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 16])));
    scheduler.assign_buffer_infos(TransferStage::Early, [info.clone()]);
    scheduler.advance();

    let err = scheduler.transfer_data().unwrap_err();
    assert!(matches!(err, TransferError::SubmitFailed(_)));
    assert!(scheduler.current_transfer_completed_semaphore().is_none());

    // The wait list was consumed before the failure surfaced.
    adapter.fail_submit.store(false, Ordering::Relaxed);
    info.data.dirty();
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    assert!(adapter.submits()[0].waits.is_empty());
}

// --- Image uploads ---

#[test]
fn format_expansion_pads_from_default_value() {
    let (adapter, scheduler) = scheduler_with(2);

    // Four RGB8 values widened to RGBA8 with opaque alpha.
    let data = Arc::new(Data::new(
        DataProperties {
            format: Format::R8g8b8Unorm,
            stride: 3,
            variance: DataVariance::Dynamic,
            max_mipmaps: 1,
        },
        4,
        1,
        1,
        (1..=12).collect(),
    ));
    let image = Arc::new(ImageInfo::new(
        ImageViewId(7),
        Format::R8g8b8a8Unorm,
        ImageLayout::ShaderReadOnlyOptimal,
        SamplerInfo { mipmaps: false },
        data,
    ));
    scheduler.assign_image_infos(TransferStage::Early, [image.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let transfers = adapter.image_transfers();
    assert_eq!(transfers.len(), 1);
    let record = &transfers[0];
    assert_eq!(record.view, ImageViewId(7));
    assert_eq!(record.layout, ImageLayout::ShaderReadOnlyOptimal);
    // The recorded properties describe the widened values.
    assert_eq!(record.format, Format::R8g8b8a8Unorm);
    assert_eq!(record.stride, 4);
    assert_eq!(record.mip_levels, 1);
    assert_eq!(record.mipmap_offsets, vec![0]);
    assert_eq!(record.source_offset, 0);

    let staging = adapter.staging_bytes(record.staging);
    assert_eq!(
        &staging[..16],
        &[1, 2, 3, 255, 4, 5, 6, 255, 7, 8, 9, 255, 10, 11, 12, 255]
    );
}

#[test]
fn matching_formats_copy_verbatim() {
    let (adapter, scheduler) = scheduler_with(2);
    let data = Arc::new(Data::new(
        DataProperties {
            format: Format::R8g8b8a8Unorm,
            stride: 4,
            variance: DataVariance::Static,
            max_mipmaps: 1,
        },
        2,
        2,
        1,
        (0..16).collect(),
    ));
    let image = Arc::new(ImageInfo::new(
        ImageViewId(3),
        Format::R8g8b8a8Unorm,
        ImageLayout::ShaderReadOnlyOptimal,
        SamplerInfo { mipmaps: false },
        data,
    ));
    scheduler.assign_image_infos(TransferStage::Early, [image.clone()]);
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    let record = &adapter.image_transfers()[0];
    assert_eq!(record.format, Format::R8g8b8a8Unorm);
    let staging = adapter.staging_bytes(record.staging);
    assert_eq!(&staging[..16], (0..16).collect::<Vec<u8>>().as_slice());

    // Static image uploads drop out of the batch.
    assert!(!scheduler.contains_data_to_transfer());
}

#[test]
fn buffer_copies_precede_image_transfers_in_staging() {
    let (adapter, scheduler) = scheduler_with(2);
    scheduler.assign_buffer_infos(
        TransferStage::Early,
        [Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![0xAA; 10])))],
    );
    let data = Arc::new(Data::new(
        DataProperties {
            format: Format::R8g8b8a8Unorm,
            stride: 4,
            variance: DataVariance::Dynamic,
            max_mipmaps: 1,
        },
        1,
        1,
        1,
        vec![0xBB; 4],
    ));
    scheduler.assign_image_infos(
        TransferStage::Early,
        [Arc::new(ImageInfo::new(
            ImageViewId(1),
            Format::R8g8b8a8Unorm,
            ImageLayout::General,
            SamplerInfo::default(),
            data,
        ))],
    );
    scheduler.advance();
    scheduler.transfer_data().unwrap();

    // The image lands after the 4-byte-aligned end of the buffer region.
    let record = &adapter.image_transfers()[0];
    assert_eq!(record.source_offset, 12);
    let staging = adapter.staging_bytes(record.staging);
    assert_eq!(&staging[..10], &[0xAA; 10]);
    assert_eq!(&staging[12..16], &[0xBB; 4]);
}

// --- Late stage ---

#[test]
fn late_stage_mirrors_early() {
    let (adapter, scheduler) = scheduler_with(2);
    let info = Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![5; 16])));
    scheduler.assign_buffer_infos(TransferStage::Late, [info.clone()]);
    scheduler.advance();

    // The early cycle does not touch the late batch.
    scheduler.transfer_data().unwrap();
    assert!(adapter.submits().is_empty());
    assert!(scheduler.contains_data_to_transfer());

    scheduler.transfer_late_data().unwrap();
    assert_eq!(adapter.submits().len(), 1);
    assert_eq!(
        adapter.copies()[0].regions,
        vec![BufferCopy {
            src_offset: 0,
            dst_offset: 0,
            size: 16
        }]
    );
}

// --- Shutdown ---

#[test]
fn destroy_releases_staging_buffers() {
    let (adapter, scheduler) = scheduler_with(2);
    scheduler.assign_buffer_infos(
        TransferStage::Early,
        [Arc::new(BufferInfo::new(BufferId(100), 0, dynamic_payload(vec![1; 16])))],
    );
    scheduler.advance();
    scheduler.transfer_data().unwrap();
    let staging = adapter.copies()[0].src;
    assert!(!adapter.buffer(staging).destroyed);

    scheduler.destroy();
    let buffer = adapter.buffer(staging);
    assert!(buffer.destroyed);
    assert!(!buffer.mapped);
}
