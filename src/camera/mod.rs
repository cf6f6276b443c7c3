//! Camera system for orthographic scene viewing.
//!
//! Provides the orthographic camera, a trackball-style controller, frustum
//! culling, and the auto-fit routine that frames a set of objects.

/// Trackball controller: rotate, zoom and pan from pointer input.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Zoom-and-place framing of object sets.
pub mod fit;
/// View frustum extraction and intersection tests.
pub mod frustum;
