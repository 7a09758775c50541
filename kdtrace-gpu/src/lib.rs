//! Common structs and algorithms shared by kdtrace's reference tracer and
//! whatever compute kernel consumes the uploaded scene.
//!
//! Everything that crosses the host/device boundary is `#[repr(C)]` and
//! `Pod`, so it can be uploaded as-is; the field order and padding of those
//! structs is part of the layout the kernel reads.

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod axis;
mod bounding_box;
mod kd_node;
mod light;
mod material;
mod ray;
mod triangle;
mod utils;

pub use self::axis::*;
pub use self::bounding_box::*;
pub use self::kd_node::*;
pub use self::light::*;
pub use self::material::*;
pub use self::ray::*;
pub use self::triangle::*;
pub use self::utils::*;

/// Error threshold used by the intersection tests.
pub const EPSILON: f32 = 1e-5;

/// Below this much remaining energy, reflection rays are not cast anymore.
pub const MIN_ENERGY: f32 = 0.001;

/// Magnitude of primary rays; a ray is valid within `0.0 ..= 1.0` of its
/// direction vector.
pub const RAY_MAG: f32 = 500.0;

/// Maximum number of triangles a serialized kd-tree node can refer to.
pub const MAX_NODE_FACES: usize = 32;

/// Default maximum depth of the kd-tree.
pub const MAX_TREE_DEPTH: u32 = 64;
