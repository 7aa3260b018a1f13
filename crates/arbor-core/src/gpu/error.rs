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

//! Error type for graphics-API adapter operations.

use std::fmt;

/// An error returned by a [`DeviceAdapter`] operation.
///
/// Backend result codes are surfaced verbatim in the message strings; the
/// consuming subsystems decide whether a failure aborts a cycle.
///
/// [`DeviceAdapter`]: crate::gpu::DeviceAdapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// A resource allocation ran out of device or host memory.
    OutOfMemory,
    /// The handle or ID used to reference a resource is invalid.
    InvalidHandle,
    /// Mapping device memory for host access failed.
    MapFailed(String),
    /// A queue submission returned a non-success code.
    SubmitFailed(String),
    /// Any other backend-specific failure.
    Backend(String),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::OutOfMemory => write!(f, "Out of memory."),
            GpuError::InvalidHandle => write!(f, "Invalid resource handle or ID."),
            GpuError::MapFailed(msg) => write!(f, "Memory mapping failed: {msg}"),
            GpuError::SubmitFailed(msg) => write!(f, "Queue submission failed: {msg}"),
            GpuError::Backend(msg) => write!(f, "Backend error: {msg}"),
        }
    }
}

impl std::error::Error for GpuError {}
