//! Frame output: renderer settings, the light-rig uniform, and the wgpu
//! scene renderer.

/// Light rig and tone mapping packed for the shaders.
pub mod lighting;
pub(crate) mod pipeline_util;
/// Forward renderer for meshes, axes and label markers.
pub mod scene_renderer;
/// Clear color, antialiasing, pixel ratio and tone mapping.
pub mod settings;

pub use lighting::LightingUniform;
pub use scene_renderer::{collect_meshes, MeshVertex, SceneRenderer};
pub use settings::RendererSettings;
