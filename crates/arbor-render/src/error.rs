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

//! Error types for the transfer subsystem.

use arbor_core::gpu::GpuError;
use std::fmt;

/// An error aborting a transfer cycle.
///
/// Adapter result codes are surfaced verbatim; the scheduler never submits
/// partial work, so its state stays consistent across failed cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Mapping the staging buffer failed. The cycle is aborted before any
    /// commands are recorded.
    MapFailed(GpuError),
    /// The queue submission returned a non-success code. Wait semaphores
    /// have already been consumed.
    SubmitFailed(GpuError),
    /// Another adapter operation (resource creation, command recording)
    /// failed.
    Adapter(GpuError),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::MapFailed(err) => {
                write!(f, "Failed to map staging buffer: {err}")
            }
            TransferError::SubmitFailed(err) => {
                write!(f, "Failed to submit transfer commands: {err}")
            }
            TransferError::Adapter(err) => {
                write!(f, "Graphics adapter operation failed: {err}")
            }
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::MapFailed(err)
            | TransferError::SubmitFailed(err)
            | TransferError::Adapter(err) => Some(err),
        }
    }
}
