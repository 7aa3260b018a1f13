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

//! # Arbor Core
//!
//! Foundational crate for the Arbor toolkit: double-precision math for
//! spatial queries, the graphics-API adapter interface consumed by the
//! rendering subsystems, and the host-side data model for GPU uploads.

#![warn(missing_docs)]

pub mod data;
pub mod gpu;
pub mod math;
pub mod utils;
