//! Light rig packed for the mesh shader.

use glam::Vec3;

use crate::{options::ToneMapping, renderer::settings::RendererSettings, scene::Light};

/// Directional lights beyond this count are ignored.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Lighting and tone-mapping parameters shared by the scene shaders.
/// NOTE: Must match the WGSL `Lighting` struct layout exactly (192 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Hemisphere sky color times intensity (`w` unused).
    pub sky: [f32; 4],
    /// Hemisphere ground color times intensity (`w` unused).
    pub ground: [f32; 4],
    /// Summed ambient color times intensity (`w` unused).
    pub ambient: [f32; 4],
    /// Directional light colors times intensity.
    pub directional_color: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// Unit directions pointing toward each directional light.
    pub directional_dir: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// Number of populated directional slots.
    pub directional_count: u32,
    /// 1 for linear tone mapping, 0 for none.
    pub tone_mapping: u32,
    /// Output multiplier (exposure for linear tone mapping).
    pub tone_scale: f32,
    /// Padding for GPU alignment.
    pub _pad: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from_lights(&[], &RendererSettings::default())
    }
}

impl LightingUniform {
    /// Pack `lights`. Hemisphere and ambient contributions are summed;
    /// directional lights fill slots in order.
    #[must_use]
    pub fn from_lights(lights: &[Light], settings: &RendererSettings) -> Self {
        let mut sky = Vec3::ZERO;
        let mut ground = Vec3::ZERO;
        let mut ambient = Vec3::ZERO;
        let mut directional_color = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
        let mut directional_dir = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
        let mut count = 0;

        for light in lights {
            match *light {
                Light::Hemisphere {
                    sky: s,
                    ground: g,
                    intensity,
                } => {
                    sky += Vec3::from_array(s) * intensity;
                    ground += Vec3::from_array(g) * intensity;
                }
                Light::Ambient { color, intensity } => {
                    ambient += Vec3::from_array(color) * intensity;
                }
                Light::Directional {
                    color,
                    intensity,
                    position,
                } => {
                    if count == MAX_DIRECTIONAL_LIGHTS {
                        log::warn!(
                            "ignoring directional light beyond the first {MAX_DIRECTIONAL_LIGHTS}"
                        );
                        continue;
                    }
                    directional_color[count] =
                        (Vec3::from_array(color) * intensity).extend(0.0).to_array();
                    directional_dir[count] =
                        position.normalize_or_zero().extend(0.0).to_array();
                    count += 1;
                }
            }
        }

        Self {
            sky: sky.extend(0.0).to_array(),
            ground: ground.extend(0.0).to_array(),
            ambient: ambient.extend(0.0).to_array(),
            directional_color,
            directional_dir,
            directional_count: u32::try_from(count).unwrap_or(0),
            tone_mapping: u32::from(settings.tone_mapping == ToneMapping::Linear),
            tone_scale: settings.tone_scale(),
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LightingOptions;

    #[test]
    fn uniform_is_192_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 192);
    }

    #[test]
    fn default_rig_packs_all_three_lights() {
        let rig = Light::default_rig(&LightingOptions::default());
        let u = LightingUniform::from_lights(&rig, &RendererSettings::default());
        assert_eq!(u.sky, [3.0, 3.0, 3.0, 0.0]);
        assert!((u.ground[0] - 3.0 * 141.0 / 255.0).abs() < 1e-5);
        assert_eq!(u.ambient, [1.0, 1.0, 1.0, 0.0]);
        assert_eq!(u.directional_count, 1);
        let dir = Vec3::from_slice(&u.directional_dir[0]);
        assert!((dir - Vec3::new(0.5, 0.0, 0.866).normalize()).length() < 1e-5);
        assert!((u.directional_color[0][0] - 2.0 * 244.0 / 255.0).abs() < 1e-5);
    }

    #[test]
    fn extra_directional_lights_are_dropped() {
        let light = Light::Directional {
            color: [1.0; 3],
            intensity: 1.0,
            position: Vec3::Y,
        };
        let lights = vec![light; MAX_DIRECTIONAL_LIGHTS + 2];
        let u = LightingUniform::from_lights(&lights, &RendererSettings::default());
        assert_eq!(u.directional_count, 4);
    }

    #[test]
    fn no_lights_is_black() {
        let u = LightingUniform::from_lights(&[], &RendererSettings::default());
        assert_eq!(u.ambient, [0.0; 4]);
        assert_eq!(u.directional_count, 0);
    }
}
