use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Colors (as `0xRRGGBB`) and intensities of the default light rig.
pub struct LightingOptions {
    #[schemars(skip)]
    /// Hemisphere light sky color.
    pub hemisphere_sky: u32,
    #[schemars(skip)]
    /// Hemisphere light ground color.
    pub hemisphere_ground: u32,
    /// Hemisphere light intensity.
    #[schemars(title = "Hemisphere", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub hemisphere_intensity: f32,
    #[schemars(skip)]
    /// Ambient light color.
    pub ambient_color: u32,
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    #[schemars(skip)]
    /// Directional light color.
    pub directional_color: u32,
    /// Directional light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Directional light position; it shines toward the origin.
    #[schemars(skip)]
    pub directional_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            hemisphere_sky: 0xff_ffff,
            hemisphere_ground: 0x8d_8d8d,
            hemisphere_intensity: 3.0,
            ambient_color: 0xff_ffff,
            ambient_intensity: 1.0,
            directional_color: 0xf4_f4f4,
            directional_intensity: 2.0,
            // ~60 degrees above the horizon
            directional_position: [0.5, 0.0, 0.866],
        }
    }
}
