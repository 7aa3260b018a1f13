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

//! # Arbor Render
//!
//! Frame-pipelined CPU-to-GPU transfer scheduling. The
//! [`TransferScheduler`] batches heterogeneous uploads (linear buffers and
//! images with optional format conversion) into per-frame staging blocks
//! and submits one transfer command buffer per cycle with the
//! inter-queue synchronisation downstream consumers need.

mod error;
mod settings;
pub mod transfer;

pub use error::TransferError;
pub use settings::TransferSettings;
pub use transfer::{TransferScheduler, TransferStage};
