//! Geometric primitives shared by the scene, camera and picking code.

/// Axis-aligned bounding boxes.
pub mod bounds;

pub use bounds::Aabb;
