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

//! The [`TransferScheduler`]: one transfer submission per in-flight frame.

use super::align_up;
use super::batch::TransferBatch;
use super::staging::StagingBlock;
use crate::error::TransferError;
use crate::settings::TransferSettings;
use arbor_core::data::{BufferInfo, Data, DataVariance, DynamicData, ImageInfo};
use arbor_core::gpu::{
    BufferCopy, BufferId, CommandBufferId, DeviceAdapter, DeviceId, ImageTransfer, Queue,
    Semaphore, SemaphoreId, SubmitInfo,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Selects which pending batch an operation works on.
///
/// Early transfers run before the frame's render passes; late transfers are
/// recorded between passes. Both stages share one contract, the caller
/// picks the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferStage {
    /// Uploaded by [`TransferScheduler::transfer_data`].
    #[default]
    Early,
    /// Uploaded by [`TransferScheduler::transfer_late_data`].
    Late,
}

/// Orchestrates CPU-to-GPU uploads across a ring of in-flight frames.
///
/// Producers on any thread `assign` upload handles; once per frame the
/// pacing loop calls [`advance`](Self::advance) to rotate the ring and
/// [`transfer_data`](Self::transfer_data) to copy every modified payload
/// into the frame's staging block and submit a single transfer command
/// buffer. Downstream consumers order their work after the submission via
/// [`current_transfer_completed_semaphore`](Self::current_transfer_completed_semaphore).
///
/// A single mutex guards the batches, the index ring and the size totals;
/// no operation holds it across GPU waits.
#[derive(Debug)]
pub struct TransferScheduler {
    adapter: Arc<dyn DeviceAdapter>,
    /// The queue transfer command buffers are submitted to.
    pub transfer_queue: Queue,
    /// Floor for staging buffer allocations.
    pub minimum_staging_buffer_size: u64,
    /// Verbosity of the per-cycle trace messages.
    pub level: log::Level,
    state: Mutex<SchedulerState>,
}

#[derive(Debug)]
struct SchedulerState {
    /// One staging block per in-flight frame.
    frames: Vec<StagingBlock>,
    /// `indices[0]` is the current frame's block; `indices[k]` the block of
    /// the frame `k` ago. `frames.len()` is the "not yet populated" sentinel.
    indices: Vec<usize>,
    current_index: usize,
    early: TransferBatch,
    late: TransferBatch,
    data_total_size: u64,
    image_total_size: u64,
    data_total_regions: usize,
    wait_semaphores: Vec<Semaphore>,
    signal_semaphores: Vec<Semaphore>,
    transfer_completed: Option<Semaphore>,
}

impl SchedulerState {
    fn index(&self, relative: usize) -> usize {
        if relative < self.indices.len() {
            self.indices[relative]
        } else {
            self.indices.len()
        }
    }

    fn batch_mut(&mut self, stage: TransferStage) -> &mut TransferBatch {
        match stage {
            TransferStage::Early => &mut self.early,
            TransferStage::Late => &mut self.late,
        }
    }
}

impl TransferScheduler {
    /// Creates a scheduler with one staging block per in-flight frame.
    pub fn new(
        adapter: Arc<dyn DeviceAdapter>,
        transfer_queue: Queue,
        settings: &TransferSettings,
    ) -> Self {
        let frame_count = settings.frames_in_flight.max(1);
        Self {
            adapter,
            transfer_queue,
            minimum_staging_buffer_size: settings.minimum_staging_buffer_size,
            level: log::Level::Debug,
            state: Mutex::new(SchedulerState {
                frames: (0..frame_count).map(|_| StagingBlock::default()).collect(),
                indices: vec![frame_count; frame_count],
                current_index: frame_count,
                early: TransferBatch::default(),
                late: TransferBatch::default(),
                data_total_size: 0,
                image_total_size: 0,
                data_total_regions: 0,
                wait_semaphores: Vec::new(),
                signal_semaphores: Vec::new(),
                transfer_completed: None,
            }),
        }
    }

    /// Rotates frame tracking at a frame boundary.
    ///
    /// The first call selects block 0; later calls pick the next block
    /// modulo the ring length and shift the historic indices right by one.
    pub fn advance(&self) {
        let mut state = self.state.lock().unwrap();
        let count = state.indices.len();
        if state.current_index >= count {
            // first frame
            state.current_index = 0;
        } else {
            state.current_index = (state.current_index + 1) % count;
            for i in (1..count).rev() {
                state.indices[i] = state.indices[i - 1];
            }
        }
        let current = state.current_index;
        state.indices[0] = current;
    }

    /// The block index used by the frame `relative` frames ago, or the
    /// ring length when no such frame exists yet.
    pub fn index(&self, relative: usize) -> usize {
        self.state.lock().unwrap().index(relative)
    }

    /// Returns `true` if either stage has pending uploads.
    pub fn contains_data_to_transfer(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.early.has_data() || state.late.has_data()
    }

    /// Assigns a batch of upload handles to the early stage.
    pub fn assign(&self, dynamic_data: &DynamicData) {
        self.assign_buffer_infos(TransferStage::Early, dynamic_data.buffer_infos.iter().cloned());
        self.assign_image_infos(TransferStage::Early, dynamic_data.image_infos.iter().cloned());
    }

    /// Assigns buffer upload handles to a stage. Handles with no
    /// destination buffer are ignored.
    pub fn assign_buffer_infos(
        &self,
        stage: TransferStage,
        infos: impl IntoIterator<Item = Arc<BufferInfo>>,
    ) {
        let infos: Vec<_> = infos.into_iter().collect();
        log::log!(
            self.level,
            "TransferScheduler::assign_buffer_infos() stage = {stage:?}, count = {}",
            infos.len()
        );
        self.state.lock().unwrap().batch_mut(stage).assign_buffer_infos(infos);
    }

    /// Assigns image upload handles to a stage. Handles with an incomplete
    /// view/image/data chain are ignored.
    pub fn assign_image_infos(
        &self,
        stage: TransferStage,
        infos: impl IntoIterator<Item = Arc<ImageInfo>>,
    ) {
        let infos: Vec<_> = infos.into_iter().collect();
        log::log!(
            self.level,
            "TransferScheduler::assign_image_infos() stage = {stage:?}, count = {}",
            infos.len()
        );
        self.state.lock().unwrap().batch_mut(stage).assign_image_infos(infos);
    }

    /// Registers a semaphore the next submission waits on, at the
    /// semaphore's own stage mask. The list is consumed by the next cycle.
    pub fn add_wait_semaphore(&self, semaphore: Semaphore) {
        self.state.lock().unwrap().wait_semaphores.push(semaphore);
    }

    /// Registers a semaphore every submission signals in addition to the
    /// frame's completion semaphore.
    pub fn add_signal_semaphore(&self, semaphore: Semaphore) {
        self.state.lock().unwrap().signal_semaphores.push(semaphore);
    }

    /// The completion semaphore of the most recent submission, if any
    /// cycle has submitted yet.
    pub fn current_transfer_completed_semaphore(&self) -> Option<Semaphore> {
        self.state.lock().unwrap().transfer_completed
    }

    /// Uploads the early batch for the current frame.
    pub fn transfer_data(&self) -> Result<(), TransferError> {
        self.transfer(TransferStage::Early)
    }

    /// Uploads the late batch for the current frame. Mirror of
    /// [`transfer_data`](Self::transfer_data).
    pub fn transfer_late_data(&self) -> Result<(), TransferError> {
        self.transfer(TransferStage::Late)
    }

    /// Releases the staging buffers of every block. Call during shutdown,
    /// after the GPU finished the in-flight submissions.
    pub fn destroy(&self) {
        let mut state = self.state.lock().unwrap();
        for frame in &mut state.frames {
            frame.release_staging(self.adapter.as_ref());
        }
    }

    fn transfer(&self, stage: TransferStage) -> Result<(), TransferError> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;

        let frame_index = state.index(0);
        log::log!(
            self.level,
            "TransferScheduler::transfer() stage = {stage:?}, frame_index = {frame_index}"
        );
        if frame_index >= state.frames.len() {
            // The scheduler never advanced; nothing is in flight.
            return Ok(());
        }

        let adapter = self.adapter.as_ref();
        let device = adapter.device_id();

        let SchedulerState {
            frames,
            early,
            late,
            data_total_size,
            image_total_size,
            data_total_regions,
            wait_semaphores,
            signal_semaphores,
            transfer_completed,
            ..
        } = state;
        let batch = match stage {
            TransferStage::Early => early,
            TransferStage::Late => late,
        };

        // Size pass: one accumulation per cycle, aligned between entries.
        let mut size = 0u64;
        for info in &batch.images {
            if let Some(data) = &info.data {
                let image_total = info.view_format.traits().size as u64 * data.value_count();
                size = align_up(size + image_total);
            }
        }
        *image_total_size = size;

        size = 0;
        let mut regions = 0usize;
        for submap in batch.buffer_map.values() {
            for info in submap.values() {
                size = align_up(size + info.range);
                regions += 1;
            }
        }
        *data_total_size = size;
        *data_total_regions = regions;

        let total = *data_total_size + *image_total_size;
        log::log!(
            self.level,
            "  data_total_size = {data_total_size}, image_total_size = {image_total_size}, regions = {data_total_regions}"
        );
        if total == 0 {
            return Ok(());
        }

        let frame = &mut frames[frame_index];
        let cmd = frame.ensure_command_buffer(adapter, self.transfer_queue.family_index)?;
        let semaphore = frame.ensure_semaphore(adapter)?;
        let staging = frame.ensure_staging(adapter, total, self.minimum_staging_buffer_size)?;

        adapter
            .begin_command_buffer(cmd)
            .map_err(TransferError::Adapter)?;

        let mut offset = 0u64;
        record_buffer_transfers(
            adapter,
            self.level,
            device,
            staging.buffer,
            cmd,
            &mut batch.buffer_map,
            &mut frame.copy_regions,
            *data_total_regions,
            &mut offset,
        );
        record_image_transfers(
            adapter,
            self.level,
            device,
            staging.buffer,
            cmd,
            &mut batch.images,
            &mut offset,
        );

        adapter
            .end_command_buffer(cmd)
            .map_err(TransferError::Adapter)?;

        if offset > 0 {
            let signal_ids: Vec<SemaphoreId> = std::iter::once(semaphore.id)
                .chain(signal_semaphores.iter().map(|s| s.id))
                .collect();
            let result = adapter.submit(
                self.transfer_queue.id,
                &SubmitInfo {
                    wait_semaphores,
                    command_buffers: &[cmd],
                    signal_semaphores: &signal_ids,
                },
            );
            wait_semaphores.clear();
            result.map_err(TransferError::SubmitFailed)?;
            *transfer_completed = Some(semaphore);
        } else {
            // Every upload was filtered out by the modification counters;
            // the recorded command buffer is empty.
            log::log!(self.level, "  nothing to submit");
            wait_semaphores.clear();
        }

        Ok(())
    }
}

/// Copies every modified buffer payload into staging and records one copy
/// command per destination buffer, draining abandoned and static entries.
#[allow(clippy::too_many_arguments)]
fn record_buffer_transfers(
    adapter: &dyn DeviceAdapter,
    level: log::Level,
    device: DeviceId,
    staging: BufferId,
    cmd: CommandBufferId,
    buffer_map: &mut BTreeMap<BufferId, BTreeMap<u64, Arc<BufferInfo>>>,
    copy_regions: &mut Vec<BufferCopy>,
    expected_regions: usize,
    offset: &mut u64,
) {
    copy_regions.clear();
    copy_regions.reserve(expected_regions);

    buffer_map.retain(|buffer, infos| {
        let first_region = copy_regions.len();
        infos.retain(|_, info| {
            if Arc::strong_count(info) == 1 {
                log::log!(
                    level,
                    "  dropping abandoned buffer upload, dst offset = {}",
                    info.offset
                );
                return false;
            }
            if info.sync_modified_counts(device) {
                let bytes = info.data.read();
                let len = (info.range as usize).min(bytes.len());
                adapter.write_mapped(staging, *offset, &bytes[..len]);
                copy_regions.push(BufferCopy {
                    src_offset: *offset,
                    dst_offset: info.offset,
                    size: info.range,
                });
                *offset = align_up(*offset + info.range);
            } else {
                log::log!(level, "  no need to copy, dst offset = {}", info.offset);
            }
            // Static payloads leave the batch once uploaded.
            info.data.properties().variance != DataVariance::Static
        });

        if copy_regions.len() > first_region {
            adapter.cmd_copy_buffer(cmd, staging, *buffer, &copy_regions[first_region..]);
        }
        !infos.is_empty()
    });
}

/// Writes every modified image payload into staging (converting formats
/// where the view disagrees with the payload) and records its transfer.
fn record_image_transfers(
    adapter: &dyn DeviceAdapter,
    level: log::Level,
    device: DeviceId,
    staging: BufferId,
    cmd: CommandBufferId,
    images: &mut Vec<Arc<ImageInfo>>,
    offset: &mut u64,
) {
    images.retain(|info| {
        if Arc::strong_count(info) == 1 {
            log::log!(level, "  dropping abandoned image upload");
            return false;
        }
        let (Some(view), Some(data)) = (info.view, info.data.as_ref()) else {
            return false;
        };
        if info.sync_modified_counts(device) {
            record_image_transfer(adapter, staging, cmd, info, view, data, offset);
        } else {
            log::log!(level, "  no need to copy image upload");
        }
        data.properties().variance != DataVariance::Static
    });
}

fn record_image_transfer(
    adapter: &dyn DeviceAdapter,
    staging: BufferId,
    cmd: CommandBufferId,
    info: &ImageInfo,
    view: arbor_core::gpu::ImageViewId,
    data: &Data,
    offset: &mut u64,
) {
    let mut properties = data.properties();
    let source_traits = properties.format.traits();
    let target_format = info.view_format;
    let target_traits = target_format.traits();
    let source_offset = *offset;
    let bytes = data.read();

    if properties.format == target_format
        || source_traits.size == target_traits.size
        || target_traits.size == 0
    {
        // Identical layout (or a pure reinterpretation): copy as-is.
        adapter.write_mapped(staging, *offset, &bytes);
        *offset += bytes.len() as u64;
    } else {
        // Per-value expansion: source bytes first, the rest of each value
        // filled positionally from the target's default pattern.
        let from = source_traits.size as usize;
        let to = target_traits.size as usize;
        let value_count = data.value_count() as usize;
        let mut widened = vec![0u8; to * value_count];
        for (i, value) in widened.chunks_exact_mut(to).enumerate() {
            let start = (i * from).min(bytes.len());
            let source = &bytes[start..];
            let copied = from.min(to).min(source.len());
            value[..copied].copy_from_slice(&source[..copied]);
            for s in copied..to.min(target_traits.default_value.len()) {
                value[s] = target_traits.default_value[s];
            }
        }
        adapter.write_mapped(staging, *offset, &widened);
        properties.format = target_format;
        properties.stride = target_traits.size;
        *offset += (to * value_count) as u64;
    }
    drop(bytes);

    let mipmap_offsets = data.mipmap_offsets();
    adapter.cmd_transfer_image_data(
        cmd,
        &ImageTransfer {
            view,
            layout: info.layout,
            properties,
            width: data.width(),
            height: data.height(),
            depth: data.depth(),
            mip_levels: info.mip_levels(),
            mipmap_offsets: &mipmap_offsets,
            staging,
            source_offset,
        },
    );
}
