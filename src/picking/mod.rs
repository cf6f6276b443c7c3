//! CPU raycasting against scene objects.
//!
//! Meshes are tested triangle by triangle unless their [`Geometry`] carries
//! a [`BoundsTree`], built on demand with
//! [`Geometry::compute_bounds_tree`].
//!
//! [`Geometry`]: crate::scene::Geometry
//! [`Geometry::compute_bounds_tree`]: crate::scene::Geometry::compute_bounds_tree

/// Bounding volume hierarchy for triangle meshes.
pub mod bvh;
/// Ray type and ray/triangle intersection.
pub mod ray;
/// Pick rays from the camera and object intersection queries.
pub mod raycaster;

pub use bvh::{BoundsTree, TriangleHit};
pub use ray::Ray;
pub use raycaster::{Intersection, Raycaster};
