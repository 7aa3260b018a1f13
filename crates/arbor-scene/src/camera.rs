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

//! Camera state consumed by screen-space queries.

use arbor_core::math::Mat4;
use serde::{Deserialize, Serialize};

/// The window-space rectangle and depth range a camera renders into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge in window coordinates.
    pub x: f64,
    /// Top edge in window coordinates.
    pub y: f64,
    /// Width in window coordinates. A non-positive width disables the
    /// window-to-NDC remap on the x axis.
    pub width: f64,
    /// Height in window coordinates. A non-positive height disables the
    /// window-to-NDC remap on the y axis.
    pub height: f64,
    /// Depth range minimum.
    pub min_depth: f64,
    /// Depth range maximum.
    pub max_depth: f64,
}

impl Viewport {
    /// A viewport covering `width` x `height` at the origin with the full
    /// [0, 1] depth range.
    pub fn with_extent(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::with_extent(0.0, 0.0)
    }
}

/// A camera: projection, view and the viewport they target.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye-to-clip transform.
    pub projection: Mat4,
    /// World-to-eye transform.
    pub view: Mat4,
    /// The render target rectangle.
    pub viewport: Viewport,
}

impl Camera {
    /// Creates a camera from its matrices and viewport.
    pub fn new(projection: Mat4, view: Mat4, viewport: Viewport) -> Self {
        Self {
            projection,
            view,
            viewport,
        }
    }
}
