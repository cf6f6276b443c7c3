use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Which default helpers are added to a freshly bootstrapped scene.
pub struct SceneOptions {
    /// Add the hemisphere, ambient and directional lights.
    #[schemars(title = "Add Lights")]
    pub add_light: bool,
    /// Add an axes helper at the origin.
    #[schemars(title = "Add Axes Helper")]
    pub add_axes_helper: bool,
    /// Length of each axes-helper arm in world units.
    #[schemars(title = "Axes Size", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub axes_size: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            add_light: true,
            add_axes_helper: true,
            axes_size: 100.0,
        }
    }
}
