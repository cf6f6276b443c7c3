use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Trackball interaction parameters.
pub struct ControlOptions {
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 30.0), extend("step" = 0.1))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub pan_speed: f32,
    /// Apply input fully on each update instead of easing it out.
    #[schemars(title = "Static Moving")]
    pub static_moving: bool,
    /// Fraction of remaining motion consumed per update when not static.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub dynamic_damping_factor: f32,
    /// Lower bound for the orthographic zoom.
    #[schemars(skip)]
    pub min_zoom: f32,
    /// Upper bound for the orthographic zoom.
    #[schemars(skip)]
    pub max_zoom: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 15.0,
            zoom_speed: 2.0,
            pan_speed: 2.4,
            static_moving: true,
            dynamic_damping_factor: 0.2,
            min_zoom: 0.0,
            max_zoom: f32::INFINITY,
        }
    }
}
