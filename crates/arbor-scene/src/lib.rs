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

//! # Arbor Scene
//!
//! Scene-traversal context and spatial queries. The central piece is the
//! [`PolytopeIntersector`], which carries a convex polytope through the
//! coordinate spaces of a scene graph traversal, prunes subtrees by
//! bounding-sphere rejection and tests primitive vertices against the
//! polytope in local space.
//!
//! [`PolytopeIntersector`]: intersect::PolytopeIntersector

pub mod camera;
pub mod graph;
pub mod intersect;
pub mod state;

pub use camera::{Camera, Viewport};
pub use intersect::{IndexRatio, Intersection, PolytopeIntersector};
