use glam::Vec3;

use crate::options::LightingOptions;

/// Convert a `0xRRGGBB` color to linear-ish RGB components in `[0, 1]`.
#[must_use]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    let [_, r, g, b] = hex.to_be_bytes();
    [f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0]
}

/// Light source in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Sky/ground gradient lighting, blended by how much a surface faces
    /// up (`+Y`).
    Hemisphere {
        /// Color received by upward-facing surfaces.
        sky: [f32; 3],
        /// Color received by downward-facing surfaces.
        ground: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Uniform lighting from all directions.
    Ambient {
        /// Light color.
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Parallel rays shining from `position` toward the origin.
    Directional {
        /// Light color.
        color: [f32; 3],
        /// Intensity multiplier.
        intensity: f32,
        /// Source position; only its direction matters.
        position: Vec3,
    },
}

impl Light {
    /// The hemisphere, ambient and directional rig described by `options`.
    #[must_use]
    pub fn default_rig(options: &LightingOptions) -> [Self; 3] {
        [
            Self::Hemisphere {
                sky: hex_to_rgb(options.hemisphere_sky),
                ground: hex_to_rgb(options.hemisphere_ground),
                intensity: options.hemisphere_intensity,
            },
            Self::Ambient {
                color: hex_to_rgb(options.ambient_color),
                intensity: options.ambient_intensity,
            },
            Self::Directional {
                color: hex_to_rgb(options.directional_color),
                intensity: options.directional_intensity,
                position: Vec3::from_array(options.directional_position),
            },
        ]
    }
}
