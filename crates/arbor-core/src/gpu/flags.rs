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

//! Flag sets describing buffer usage, memory properties and pipeline stages.

use crate::arbor_bitflags;

arbor_bitflags! {
    /// A set of flags describing the allowed usages of a buffer.
    pub struct BufferUsage: u32 {
        /// The buffer can be the source of a copy operation.
        const TRANSFER_SRC = 1 << 0;
        /// The buffer can be the destination of a copy operation.
        const TRANSFER_DST = 1 << 1;
        /// The buffer can be bound as a vertex buffer.
        const VERTEX = 1 << 2;
        /// The buffer can be bound as an index buffer.
        const INDEX = 1 << 3;
        /// The buffer can be bound as a uniform buffer.
        const UNIFORM = 1 << 4;
        /// The buffer can be bound as a storage buffer.
        const STORAGE = 1 << 5;
    }
}

arbor_bitflags! {
    /// A set of flags describing the memory type backing an allocation.
    pub struct MemoryFlags: u32 {
        /// Device-local memory, fastest for GPU access.
        const DEVICE_LOCAL = 1 << 0;
        /// The memory can be mapped for host access.
        const HOST_VISIBLE = 1 << 1;
        /// Host writes are visible to the device without explicit flushes.
        const HOST_COHERENT = 1 << 2;
    }
}

arbor_bitflags! {
    /// A set of pipeline stages, used to express where a semaphore wait
    /// takes effect.
    pub struct PipelineStageFlags: u32 {
        /// The start of the pipeline.
        const TOP_OF_PIPE = 1 << 0;
        /// Vertex attribute fetching.
        const VERTEX_INPUT = 1 << 1;
        /// Vertex shader execution.
        const VERTEX_SHADER = 1 << 2;
        /// Fragment shader execution.
        const FRAGMENT_SHADER = 1 << 3;
        /// Copy and blit operations.
        const TRANSFER = 1 << 4;
        /// The end of the pipeline.
        const BOTTOM_OF_PIPE = 1 << 5;
        /// Every stage of every command.
        const ALL_COMMANDS = 1 << 6;
    }
}
