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

//! The [`PolytopeIntersector`]: collects the primitives of a scene graph
//! that intersect a convex polytope.

use crate::camera::Camera;
use crate::graph::{compute_transform, NodePath, TransformNode};
use crate::state::{ArrayState, PrimitiveTopology, VertexArray};
use arbor_core::math::{Mat4, Plane, Polytope, Sphere, Vec3};
use std::sync::Arc;

/// A primitive-stream index paired with the weight its vertex contributed
/// to an intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexRatio {
    /// The vertex index within the primitive stream.
    pub index: u32,
    /// The vertex's contribution to the intersection point.
    pub ratio: f64,
}

/// The per-vertex weights of one intersection.
pub type IndexRatios = Vec<IndexRatio>;

/// One primitive found inside the polytope.
#[derive(Debug, Clone)]
pub struct Intersection {
    /// The intersection point in the geometry's local space.
    pub local_point: Vec3,
    /// `local_to_world * local_point`.
    pub world_point: Vec3,
    /// Blend weight of the contributing vertices.
    pub ratio: f64,
    /// The accumulated transform at the intersected node.
    pub local_to_world: Mat4,
    /// Snapshot of the node path at the intersected node.
    pub node_path: NodePath,
    /// Snapshot of the arrays bound when the primitive was tested.
    pub arrays: Vec<VertexArray>,
    /// The contributing indices and their weights.
    pub index_ratios: IndexRatios,
    /// The instance the primitive belonged to.
    pub instance_index: u32,
}

/// Walks a scene graph under a transform stack, carrying a convex polytope
/// through coordinate spaces and collecting the primitives whose vertices
/// fall inside it.
///
/// The traversal framework drives the public entry points: it pushes and
/// pops transforms, maintains [`node_path`](Self::node_path) and
/// [`array_state_stack`](Self::array_state_stack), prunes subtrees through
/// [`intersects`](Self::intersects) and forwards draw commands to
/// [`intersect_draw`](Self::intersect_draw) /
/// [`intersect_draw_indexed`](Self::intersect_draw_indexed). Transform
/// pushes must be popped in reverse order.
///
/// The polytope is transported into local space once per transform push,
/// so per-vertex tests run without transforming any vertex.
///
/// The triangle predicate is conservative: a triangle counts as inside
/// when at least one of its vertices is, which misses triangles that
/// straddle the polytope with every vertex outside.
#[derive(Debug)]
pub struct PolytopeIntersector {
    /// `polytope_stack[0]` is world space; one entry per transform level.
    polytope_stack: Vec<Polytope>,
    local_to_world_stack: Vec<Mat4>,
    world_to_local_stack: Vec<Mat4>,
    /// The traversal's current node path, snapshotted into intersections.
    pub node_path: NodePath,
    /// The traversal's array-state stack; the top interprets the current
    /// primitive stream.
    pub array_state_stack: Vec<Arc<dyn ArrayState>>,
    /// 16-bit index array bound by the traversal, if any.
    pub ushort_indices: Option<Arc<Vec<u16>>>,
    /// 32-bit index array bound by the traversal, used when no 16-bit
    /// array is bound.
    pub uint_indices: Option<Arc<Vec<u32>>>,
    /// The collected intersections, in insertion order.
    pub intersections: Vec<Intersection>,
}

impl PolytopeIntersector {
    /// Creates an intersector for an explicit world-space polytope.
    pub fn new(polytope: Polytope) -> Self {
        Self {
            polytope_stack: vec![polytope],
            local_to_world_stack: Vec::new(),
            world_to_local_stack: Vec::new(),
            node_path: NodePath::new(),
            array_state_stack: Vec::new(),
            ushort_indices: None,
            uint_indices: None,
            intersections: Vec::new(),
        }
    }

    /// Creates an intersector for the world-space volume behind a screen
    /// rectangle.
    ///
    /// `(x_min, y_min, x_max, y_max)` is in window coordinates; the
    /// camera's viewport remaps it to NDC (axes with a non-positive
    /// viewport extent pass through unchanged). The depth slab follows the
    /// projection's convention: a reversed-Z projection
    /// (`projection[2][2] > 0`) reads its near depth from
    /// `viewport.max_depth`. The clip-space volume is carried to eye space
    /// by the projection matrix and on to world space by the view matrix,
    /// using the row-vector plane product.
    pub fn from_camera(camera: &Camera, x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        let viewport = camera.viewport;
        let reverse_z = camera.projection.cols[2].z > 0.0;

        let remap_x = |v: f64| {
            if viewport.width > 0.0 {
                2.0 * (v - viewport.x) / viewport.width - 1.0
            } else {
                v
            }
        };
        let remap_y = |v: f64| {
            if viewport.height > 0.0 {
                2.0 * (v - viewport.y) / viewport.height - 1.0
            } else {
                v
            }
        };

        let ndc_x_min = remap_x(x_min);
        let ndc_x_max = remap_x(x_max);
        let ndc_y_min = remap_y(y_min);
        let ndc_y_max = remap_y(y_max);
        let ndc_near = if reverse_z {
            viewport.max_depth
        } else {
            viewport.min_depth
        };
        let ndc_far = if reverse_z {
            viewport.min_depth
        } else {
            viewport.max_depth
        };

        log::debug!(
            "PolytopeIntersector::from_camera() ndc x = [{ndc_x_min}, {ndc_x_max}], \
             ndc y = [{ndc_y_min}, {ndc_y_max}], ndc z = [{ndc_near}, {ndc_far}]"
        );

        let mut clip_space = Polytope::new();
        clip_space.push(Plane::new(1.0, 0.0, 0.0, -ndc_x_min)); // left
        clip_space.push(Plane::new(-1.0, 0.0, 0.0, ndc_x_max)); // right
        clip_space.push(Plane::new(0.0, 1.0, 0.0, -ndc_y_min)); // bottom
        clip_space.push(Plane::new(0.0, -1.0, 0.0, ndc_y_max)); // top

        // The near plane faces the near boundary whichever way the depth
        // convention orders the slab.
        if ndc_near <= ndc_far {
            clip_space.push(Plane::new(0.0, 0.0, 1.0, -ndc_near)); // near
            clip_space.push(Plane::new(0.0, 0.0, -1.0, ndc_far)); // far
        } else {
            clip_space.push(Plane::new(0.0, 0.0, -1.0, ndc_near)); // near
            clip_space.push(Plane::new(0.0, 0.0, 1.0, -ndc_far)); // far
        }

        let eye_space = clip_space.transformed(&camera.projection);
        let world_space = eye_space.transformed(&camera.view);

        Self::new(world_space)
    }

    /// The polytope in world space.
    pub fn world_polytope(&self) -> Option<&Polytope> {
        self.polytope_stack.first()
    }

    /// The polytope in the current local space.
    pub fn polytope(&self) -> Option<&Polytope> {
        self.polytope_stack.last()
    }

    /// The accumulated local-to-world matrix, identity at the root.
    pub fn local_to_world(&self) -> Mat4 {
        self.local_to_world_stack
            .last()
            .copied()
            .unwrap_or(Mat4::IDENTITY)
    }

    /// The accumulated world-to-local matrix, identity at the root.
    pub fn world_to_local(&self) -> Mat4 {
        self.world_to_local_stack
            .last()
            .copied()
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Enters a transform: extends the matrix stacks and transports the
    /// world polytope into the new local space.
    ///
    /// A singular transform leaves the world-to-local entry at identity.
    pub fn push_transform(&mut self, transform: &TransformNode) {
        let local_to_world = match self.local_to_world_stack.last() {
            Some(top) => *top * transform.matrix,
            None => transform.matrix,
        };
        let world_to_local = local_to_world.inverse().unwrap_or(Mat4::IDENTITY);

        self.local_to_world_stack.push(local_to_world);
        self.world_to_local_stack.push(world_to_local);

        let local = self.polytope_stack[0].transformed(&local_to_world);
        self.polytope_stack.push(local);
    }

    /// Leaves a transform: pops one entry from each stack.
    pub fn pop_transform(&mut self) {
        self.polytope_stack.pop();
        self.local_to_world_stack.pop();
        self.world_to_local_stack.pop();
    }

    /// Tests a bounding sphere in the current local space, for subtree
    /// pruning. An invalid sphere does not intersect.
    pub fn intersects(&self, sphere: &Sphere) -> bool {
        self.polytope_stack
            .last()
            .is_some_and(|polytope| polytope.intersects_sphere(sphere))
    }

    /// Tests the triangles of a non-indexed draw.
    ///
    /// Requires a triangle-list topology and at least 3 vertices; a
    /// missing per-instance vertex array aborts the whole call. Returns
    /// `true` iff intersections were added.
    pub fn intersect_draw(
        &mut self,
        first_vertex: u32,
        vertex_count: u32,
        first_instance: u32,
        instance_count: u32,
    ) -> bool {
        let previous = self.intersections.len();
        let Some(state) = self.array_state_stack.last().cloned() else {
            return false;
        };
        if state.topology() != PrimitiveTopology::TriangleList || vertex_count < 3 {
            return false;
        }
        let Some(polytope) = self.polytope_stack.last().cloned() else {
            return false;
        };

        let mut hits = Vec::new();
        let last_instance = first_instance + instance_count.max(1);
        for instance_index in first_instance..last_instance {
            let Some(vertices) = state.vertex_array(instance_index) else {
                return false;
            };
            let tester = TriangleTester {
                polytope: &polytope,
                vertices: &vertices,
            };

            let end_vertex = (first_vertex + vertex_count) / 3 * 3;
            let mut i = first_vertex;
            while i < end_vertex {
                if let Some(hit) = tester.intersect(i, i + 1, i + 2) {
                    hits.push((hit, instance_index));
                }
                i += 3;
            }
        }

        for (hit, instance_index) in hits {
            self.add_hit(hit, instance_index);
        }
        self.intersections.len() != previous
    }

    /// Tests the triangles of an indexed draw.
    ///
    /// Requires a triangle-list topology and at least 3 indices. 16-bit
    /// indices are preferred over 32-bit ones; an instance without a
    /// vertex array or without any index array is skipped.
    pub fn intersect_draw_indexed(
        &mut self,
        first_index: u32,
        index_count: u32,
        first_instance: u32,
        instance_count: u32,
    ) -> bool {
        let previous = self.intersections.len();
        let Some(state) = self.array_state_stack.last().cloned() else {
            return false;
        };
        if state.topology() != PrimitiveTopology::TriangleList || index_count < 3 {
            return false;
        }
        let Some(polytope) = self.polytope_stack.last().cloned() else {
            return false;
        };
        let ushort_indices = self.ushort_indices.clone();
        let uint_indices = self.uint_indices.clone();

        let mut hits = Vec::new();
        let last_instance = first_instance + instance_count.max(1);
        for instance_index in first_instance..last_instance {
            let Some(vertices) = state.vertex_array(instance_index) else {
                continue;
            };
            let tester = TriangleTester {
                polytope: &polytope,
                vertices: &vertices,
            };

            let end_index = (first_index + index_count) / 3 * 3;
            let mut i = first_index;
            while i < end_index {
                let triangle = if let Some(indices) = &ushort_indices {
                    triangle_indices(indices.as_slice(), i)
                        .map(|[a, b, c]| [a as u32, b as u32, c as u32])
                } else if let Some(indices) = &uint_indices {
                    triangle_indices(indices.as_slice(), i)
                } else {
                    break;
                };
                if let Some([i0, i1, i2]) = triangle {
                    if let Some(hit) = tester.intersect(i0, i1, i2) {
                        hits.push((hit, instance_index));
                    }
                }
                i += 3;
            }
        }

        for (hit, instance_index) in hits {
            self.add_hit(hit, instance_index);
        }
        self.intersections.len() != previous
    }

    /// Appends an intersection for a point found in the current local
    /// space, deriving the world point from the node path's accumulated
    /// transform.
    pub fn add(
        &mut self,
        local_point: Vec3,
        ratio: f64,
        index_ratios: IndexRatios,
        instance_index: u32,
    ) {
        let local_to_world = compute_transform(&self.node_path);
        let arrays = self
            .array_state_stack
            .last()
            .map(|state| state.arrays())
            .unwrap_or_default();
        self.intersections.push(Intersection {
            local_point,
            world_point: local_to_world.transform_point(local_point),
            ratio,
            local_to_world,
            node_path: self.node_path.clone(),
            arrays,
            index_ratios,
            instance_index,
        });
    }

    fn add_hit(&mut self, hit: TriangleHit, instance_index: u32) {
        self.add(
            hit.point,
            1.0,
            vec![IndexRatio {
                index: hit.index,
                ratio: 1.0,
            }],
            instance_index,
        );
    }
}

/// The inside vertex a triangle test settled on.
struct TriangleHit {
    point: Vec3,
    index: u32,
}

/// Vertex-inside tester over one instance's vertex array.
struct TriangleTester<'a> {
    polytope: &'a Polytope,
    vertices: &'a [Vec3],
}

impl TriangleTester<'_> {
    /// Tests one triangle, returning the first vertex found inside the
    /// polytope. An out-of-range index counts as a miss.
    fn intersect(&self, i0: u32, i1: u32, i2: u32) -> Option<TriangleHit> {
        for index in [i0, i1, i2] {
            let point = *self.vertices.get(index as usize)?;
            if self.polytope.inside(point) {
                return Some(TriangleHit { point, index });
            }
        }
        None
    }
}

/// Reads three consecutive indices starting at `first`, or `None` past the
/// end of the array.
fn triangle_indices<T: Copy>(indices: &[T], first: u32) -> Option<[T; 3]> {
    let first = first as usize;
    let slice = indices.get(first..first + 3)?;
    Some([slice[0], slice[1], slice[2]])
}
