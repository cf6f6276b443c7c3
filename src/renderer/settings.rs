use crate::{options::{RendererOptions, ToneMapping}, scene::hex_to_rgb};

/// Sample count used when antialiasing is on.
pub const MSAA_SAMPLES: u32 = 4;

/// Resolved frame output parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSettings {
    /// Clear color, linear RGBA.
    pub clear_color: [f32; 4],
    /// Multisample antialiasing.
    pub antialias: bool,
    /// Device pixel ratio after clamping to the configured maximum.
    pub pixel_ratio: f32,
    /// Tone mapping curve.
    pub tone_mapping: ToneMapping,
    /// Exposure multiplier.
    pub exposure: f32,
    max_pixel_ratio: f32,
}

impl RendererSettings {
    /// Settings for a display with `device_pixel_ratio`.
    #[must_use]
    pub fn new(options: &RendererOptions, device_pixel_ratio: f32) -> Self {
        let [r, g, b] = hex_to_rgb(options.clear_color);
        let mut settings = Self {
            clear_color: [r, g, b, options.clear_alpha],
            antialias: options.antialias,
            pixel_ratio: 1.0,
            tone_mapping: options.tone_mapping,
            exposure: options.exposure,
            max_pixel_ratio: options.max_pixel_ratio,
        };
        settings.set_device_pixel_ratio(device_pixel_ratio);
        settings
    }

    /// Update the pixel ratio for a new display scale factor.
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f32) {
        self.pixel_ratio = device_pixel_ratio.min(self.max_pixel_ratio);
    }

    /// MSAA sample count for color and depth targets.
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        if self.antialias {
            MSAA_SAMPLES
        } else {
            1
        }
    }

    /// Clear color for wgpu load ops.
    #[must_use]
    pub fn wgpu_clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color.map(f64::from);
        wgpu::Color { r, g, b, a }
    }

    /// Multiplier applied to shaded colors before output.
    #[must_use]
    pub fn tone_scale(&self) -> f32 {
        match self.tone_mapping {
            ToneMapping::None => 1.0,
            ToneMapping::Linear => self.exposure,
        }
    }
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self::new(&RendererOptions::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stage_renderer() {
        let s = RendererSettings::default();
        assert_eq!(s.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(s.antialias);
        assert_eq!(s.sample_count(), 4);
        assert_eq!(s.tone_mapping, ToneMapping::Linear);
        assert_eq!(s.exposure, 1.0);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let options = RendererOptions::default();
        assert_eq!(RendererSettings::new(&options, 1.5).pixel_ratio, 1.5);
        assert_eq!(RendererSettings::new(&options, 3.0).pixel_ratio, 2.0);

        let mut s = RendererSettings::new(&options, 1.0);
        s.set_device_pixel_ratio(2.5);
        assert_eq!(s.pixel_ratio, 2.0);
    }

    #[test]
    fn tone_scale_follows_curve() {
        let options = RendererOptions {
            exposure: 1.5,
            ..RendererOptions::default()
        };
        let mut s = RendererSettings::new(&options, 1.0);
        assert_eq!(s.tone_scale(), 1.5);
        s.tone_mapping = ToneMapping::None;
        assert_eq!(s.tone_scale(), 1.0);
    }

    #[test]
    fn no_msaa_without_antialias() {
        let options = RendererOptions {
            antialias: false,
            ..RendererOptions::default()
        };
        assert_eq!(RendererSettings::new(&options, 1.0).sample_count(), 1);
    }
}
