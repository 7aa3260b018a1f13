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

//! Array state: how the traversal interprets the current primitive stream.

use arbor_core::math::Vec3;
use std::fmt::Debug;
use std::sync::Arc;

/// A shared vertex position array.
pub type VertexArray = Arc<Vec<Vec3>>;

/// Primitive-assembly mode of the current draw state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Independent points.
    PointList,
    /// Independent line segments.
    LineList,
    /// Independent triangles.
    #[default]
    TriangleList,
    /// A strip of triangles sharing edges.
    TriangleStrip,
}

/// The array bindings pushed down by the traversal for the current
/// geometry.
///
/// Implementations with instanced attributes can hand out a different
/// vertex array per instance; returning `None` signals that no positions
/// are bound for that instance.
pub trait ArrayState: Debug + Send + Sync {
    /// The topology the vertices assemble into.
    fn topology(&self) -> PrimitiveTopology;

    /// The position array for an instance.
    fn vertex_array(&self, instance_index: u32) -> Option<VertexArray>;

    /// Every array bound by this state, snapshotted into intersection
    /// records.
    fn arrays(&self) -> Vec<VertexArray> {
        self.vertex_array(0).into_iter().collect()
    }
}

/// An array state with one vertex array shared by all instances.
#[derive(Debug, Clone, Default)]
pub struct FixedArrayState {
    /// The topology the vertices assemble into.
    pub topology: PrimitiveTopology,
    /// The position array, or `None` when no positions are bound.
    pub vertices: Option<VertexArray>,
}

impl FixedArrayState {
    /// Creates a triangle-list state over a vertex array.
    pub fn with_vertices(vertices: Vec<Vec3>) -> Self {
        Self {
            topology: PrimitiveTopology::TriangleList,
            vertices: Some(Arc::new(vertices)),
        }
    }
}

impl ArrayState for FixedArrayState {
    fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    fn vertex_array(&self, _instance_index: u32) -> Option<VertexArray> {
        self.vertices.clone()
    }
}
