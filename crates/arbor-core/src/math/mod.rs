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

//! Double-precision mathematics primitives.
//!
//! This module provides the vectors, matrices and geometric volumes used by
//! the spatial-query side of the toolkit. Everything is `f64`: polytopes are
//! carried through chains of inverted transforms where single-precision
//! drift becomes visible in the resulting half-space coefficients.

/// A small constant for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

pub mod geometry;
pub mod matrix;
pub mod vector;

pub use self::geometry::{Plane, Polytope, Sphere};
pub use self::matrix::Mat4;
pub use self::vector::{Vec3, Vec4};

/// Performs an approximate equality comparison between two floats with a custom tolerance.
#[inline]
pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
