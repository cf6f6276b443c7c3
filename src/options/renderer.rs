use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output tone mapping curve.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
pub enum ToneMapping {
    /// Pass colors through unchanged (clamped to `[0, 1]`).
    None,
    /// Scale by exposure, then clamp.
    #[default]
    Linear,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Renderer", inline)]
#[serde(default)]
/// Frame output parameters.
pub struct RendererOptions {
    /// Clear color as `0xRRGGBB`.
    #[schemars(skip)]
    pub clear_color: u32,
    /// Clear alpha.
    #[schemars(skip)]
    pub clear_alpha: f32,
    /// Enable 4x multisample antialiasing.
    #[schemars(title = "Antialias")]
    pub antialias: bool,
    /// Upper bound applied to the device pixel ratio.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 4.0), extend("step" = 0.5))]
    pub max_pixel_ratio: f32,
    /// Tone mapping curve.
    #[schemars(title = "Tone Mapping")]
    pub tone_mapping: ToneMapping,
    /// Exposure multiplier used by tone mapping.
    #[schemars(title = "Exposure", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub exposure: f32,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            clear_color: 0x00_0000,
            clear_alpha: 1.0,
            antialias: true,
            max_pixel_ratio: 2.0,
            tone_mapping: ToneMapping::Linear,
            exposure: 1.0,
        }
    }
}
