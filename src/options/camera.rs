use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orthographic camera clipping and placement parameters.
pub struct CameraOptions {
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub near: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub far: f32,
    /// Eye position before any auto-fit. The camera looks at the origin.
    #[schemars(skip)]
    pub initial_position: [f32; 3],
    /// Distance along `+Z` used when the fit direction is degenerate.
    #[schemars(title = "Fallback Offset", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub fallback_offset: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100_000.0,
            initial_position: [30.0, 30.0, 30.0],
            fallback_offset: 30.0,
        }
    }
}
