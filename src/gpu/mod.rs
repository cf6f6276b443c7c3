//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, render
//! targets, and uniform binding helpers.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Uniform bindings and shader loading helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Render-target textures.
pub mod texture;
