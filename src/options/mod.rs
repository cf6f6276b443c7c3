//! Centralized scene/camera/renderer options with TOML preset support.
//!
//! Every tweakable setting used when bootstrapping a [`Stage`] lives here.
//! Options serialize to/from TOML so a viewer can be configured from a file.
//!
//! [`Stage`]: crate::stage::Stage

mod camera;
mod controls;
mod lighting;
mod renderer;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use lighting::LightingOptions;
pub use renderer::{RendererOptions, ToneMapping};
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrthoviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Default scene contents.
    pub scene: SceneOptions,
    /// Camera clipping and placement.
    pub camera: CameraOptions,
    /// Trackball interaction parameters.
    pub controls: ControlOptions,
    /// Default light rig.
    pub lighting: LightingOptions,
    /// Frame output parameters.
    pub renderer: RendererOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// [`json_schema`](Self::json_schema) rendered as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OrthoviewError::OptionsParse`] if serialization fails.
    pub fn json_schema_string() -> Result<String, OrthoviewError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| OrthoviewError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrthoviewError::Io`] if the file cannot be read and
    /// [`OrthoviewError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, OrthoviewError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrthoviewError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, OrthoviewError> {
        toml::from_str(content)
            .map_err(|e| OrthoviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrthoviewError::OptionsParse`] if serialization fails and
    /// [`OrthoviewError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrthoviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrthoviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn scene_defaults_add_light_and_axes() {
        let opts = Options::default();
        assert!(opts.scene.add_light);
        assert!(opts.scene.add_axes_helper);
        assert_eq!(opts.controls.rotate_speed, 15.0);
        assert_eq!(opts.controls.zoom_speed, 2.0);
        assert_eq!(opts.controls.pan_speed, 2.4);
        assert!(opts.controls.static_moving);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[scene]
add_axes_helper = false

[lighting]
ambient_color = 0x404040
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert!(!opts.scene.add_axes_helper);
        assert!(opts.scene.add_light);
        assert_eq!(opts.lighting.ambient_color, 0x40_4040);
        assert_eq!(opts.lighting.hemisphere_intensity, 3.0);
        assert_eq!(opts.camera.far, 100_000.0);
    }

    #[test]
    fn malformed_toml_is_options_error() {
        let err = Options::from_toml("[scene]\nadd_light = 3").unwrap_err();
        assert!(matches!(err, OrthoviewError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("orthoview-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.renderer.exposure = 1.5;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("scene"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("renderer"));

        let controls = &props["controls"]["properties"];
        assert!(controls.get("rotate_speed").is_some());
        assert!(controls.get("min_zoom").is_none());
    }
}
