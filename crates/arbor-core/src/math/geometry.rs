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

//! Geometric primitives for spatial queries: half-space planes, bounding
//! spheres and convex polytopes.

use super::{Mat4, Vec3, Vec4};

// --- Plane ---

/// A half-space `normal · p + d >= 0`.
///
/// Points with a non-negative signed distance are considered inside. The
/// plane coefficients are not required to be normalized; the polytope
/// predicates below only rely on the sign (and, for sphere rejection, on
/// the caller keeping plane scale and sphere radius in the same space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// The plane normal (the first three coefficients).
    pub normal: Vec3,
    /// The plane offset (the fourth coefficient).
    pub d: f64,
}

impl Plane {
    /// Creates a plane from its four coefficients.
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            normal: Vec3::new(a, b, c),
            d,
        }
    }

    /// Returns the coefficients as a homogeneous row vector.
    #[inline]
    pub const fn as_vec4(&self) -> Vec4 {
        Vec4::new(self.normal.x, self.normal.y, self.normal.z, self.d)
    }

    /// Signed distance from the plane to a point (positive inside).
    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f64 {
        self.normal.dot(point) + self.d
    }

    /// Transforms the plane by `matrix` using the row-vector product
    /// `p' = p · M`.
    ///
    /// This carries the half-space into the space whose points map through
    /// `M` to the plane's original space: if `x_world = M · x_local`, then
    /// `plane_world.transformed(&M)` is the same half-space expressed in
    /// local coordinates.
    #[inline]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let p = self.as_vec4();
        Self::new(
            p.dot(matrix.cols[0]),
            p.dot(matrix.cols[1]),
            p.dot(matrix.cols[2]),
            p.dot(matrix.cols[3]),
        )
    }
}

// --- Sphere ---

/// A bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// The sphere center.
    pub center: Vec3,
    /// The sphere radius. A negative radius marks the sphere invalid.
    pub radius: f64,
}

impl Sphere {
    /// Creates a sphere from a center and radius.
    #[inline]
    pub const fn new(center: Vec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// An invalid sphere, usable as the "no bounds known" placeholder.
    pub const INVALID: Self = Self::new(Vec3::ZERO, -1.0);

    /// Returns `true` if the sphere has a non-negative radius.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.radius >= 0.0
    }
}

// --- Polytope ---

/// A convex volume represented as an ordered list of half-spaces.
///
/// A point is inside the polytope iff it is inside every plane. An empty
/// polytope contains everything (the predicates are conjunctions).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polytope {
    planes: Vec<Plane>,
}

impl Polytope {
    /// Creates an empty polytope.
    #[inline]
    pub const fn new() -> Self {
        Self { planes: Vec::new() }
    }

    /// Creates a polytope from a list of planes, preserving order.
    #[inline]
    pub fn from_planes(planes: Vec<Plane>) -> Self {
        Self { planes }
    }

    /// Appends a plane, keeping it after all existing planes.
    #[inline]
    pub fn push(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    /// The planes in insertion order.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Returns `true` if the point is inside every plane.
    pub fn inside(&self, point: Vec3) -> bool {
        self.planes.iter().all(|pl| pl.distance_to(point) >= 0.0)
    }

    /// Sphere-plane rejection test.
    ///
    /// The sphere intersects the polytope unless some plane places the
    /// entire sphere in its negative half-space. An invalid sphere never
    /// intersects.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        if !sphere.is_valid() {
            return false;
        }
        self.planes
            .iter()
            .all(|pl| pl.distance_to(sphere.center) >= -sphere.radius)
    }

    /// Transforms every plane by `matrix` (see [`Plane::transformed`]),
    /// preserving plane order.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            planes: self
                .planes
                .iter()
                .map(|pl| pl.transformed(matrix))
                .collect(),
        }
    }
}

// --- Tests ---
