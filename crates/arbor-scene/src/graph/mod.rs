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

//! Node handles and node paths.
//!
//! The traversal framework visiting a scene graph maintains a [`NodePath`]
//! of the nodes between the root and the current position. Visitors
//! snapshot the path into their results and derive the accumulated
//! local-to-world transform from it via [`compute_transform`]. Graphs must
//! be acyclic; the traversal assumes a DAG and performs no cycle
//! detection.

use arbor_core::math::Mat4;
use std::fmt::Debug;
use std::sync::Arc;

/// A node of the scene graph, as seen by visitors.
pub trait Node: Debug + Send + Sync {
    /// The node's transform, for nodes that contribute one.
    fn as_transform(&self) -> Option<&TransformNode> {
        None
    }
}

/// A node applying a matrix to everything below it.
#[derive(Debug, Clone, Default)]
pub struct TransformNode {
    /// The local-to-parent matrix.
    pub matrix: Mat4,
}

impl TransformNode {
    /// Creates a transform node from a matrix.
    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

impl Node for TransformNode {
    fn as_transform(&self) -> Option<&TransformNode> {
        Some(self)
    }
}

/// A grouping node with no behaviour of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupNode;

impl Node for GroupNode {}

/// The chain of nodes from the root to the current traversal position.
pub type NodePath = Vec<Arc<dyn Node>>;

/// Accumulates the local-to-world transform along a node path by
/// multiplying the matrices of its transform nodes in order.
pub fn compute_transform(node_path: &[Arc<dyn Node>]) -> Mat4 {
    node_path
        .iter()
        .fold(Mat4::IDENTITY, |acc, node| match node.as_transform() {
            Some(transform) => acc * transform.matrix,
            None => acc,
        })
}
