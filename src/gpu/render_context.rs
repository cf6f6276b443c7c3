use std::fmt;

use crate::renderer::RendererSettings;

/// Why the window's GPU context could not be created.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a wgpu surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused to open a device.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter reports no usable configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create window surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no adapter for window surface: {e}"),
            Self::DeviceRequest(e) => write!(f, "cannot open GPU device: {e}"),
            Self::UnsupportedSurface => write!(f, "window surface has no usable configuration"),
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Largest sample count not above `requested` that `supported` accepts,
/// halving down to 1 (always supported).
fn resolve_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    let mut count = requested.max(1);
    while count > 1 && !supported(count) {
        count /= 2;
    }
    count
}

/// Alpha mode for the surface. An opaque clear color presents opaquely;
/// a translucent one asks for a compositing mode so the window shows
/// through, falling back to whatever the surface offers first.
fn choose_alpha_mode(
    clear_alpha: f32,
    available: &[wgpu::CompositeAlphaMode],
) -> wgpu::CompositeAlphaMode {
    use wgpu::CompositeAlphaMode as Mode;
    let preferred: &[Mode] = if clear_alpha < 1.0 {
        &[Mode::PreMultiplied, Mode::PostMultiplied, Mode::Inherit]
    } else {
        &[Mode::Opaque]
    };
    preferred
        .iter()
        .copied()
        .find(|mode| available.contains(mode))
        .or_else(|| available.first().copied())
        .unwrap_or(Mode::Auto)
}

/// Device, queue and presentation surface of the viewer window.
///
/// The sample count is resolved once against the adapter: the renderer
/// settings ask for MSAA, and the context lowers it to what the surface
/// format supports.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Command queue.
    pub queue: wgpu::Queue,
    /// Window surface.
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration kept in sync with the window size.
    pub config: wgpu::SurfaceConfiguration,
    /// Samples per pixel for color and depth targets.
    pub sample_count: u32,
}

impl RenderContext {
    /// Open a device presenting to `window` at `size` physical pixels,
    /// configured for `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] if the surface, adapter or device
    /// cannot be created, or the surface has no supported configuration.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        settings: &RendererSettings,
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Orthoview Device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let mut config = surface
            .get_default_config(&adapter, size.0.max(1), size.1.max(1))
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::Fifo;
        config.alpha_mode = choose_alpha_mode(
            settings.clear_color[3],
            &surface.get_capabilities(&adapter).alpha_modes,
        );
        surface.configure(&device, &config);

        let features = adapter.get_texture_format_features(config.format);
        let requested = settings.sample_count();
        let sample_count =
            resolve_sample_count(requested, |n| features.flags.sample_count_supported(n));
        if sample_count != requested {
            log::warn!(
                "{:?} does not support {requested}x MSAA, using {sample_count}x",
                config.format
            );
        }
        log::debug!(
            "surface {}x{} {:?}, alpha {:?}, {sample_count}x samples",
            config.width,
            config.height,
            config.format,
            config.alpha_mode
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            sample_count,
        })
    }

    /// Surface texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface `(width, height)` in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface for a new window size. Zero-sized
    /// dimensions (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain texture.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the surface is lost, outdated or
    /// timed out.
    pub fn get_next_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Fresh command encoder.
    #[must_use]
    pub fn create_encoder(&self, label: &str) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
    }

    /// Finish `encoder` and submit it.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use wgpu::CompositeAlphaMode as Mode;

    use super::*;

    #[test]
    fn sample_count_halves_until_supported() {
        assert_eq!(resolve_sample_count(4, |n| n == 4), 4);
        assert_eq!(resolve_sample_count(4, |n| n <= 2), 2);
        assert_eq!(resolve_sample_count(4, |_| false), 1);
        assert_eq!(resolve_sample_count(1, |_| false), 1);
    }

    #[test]
    fn disabled_antialias_requests_single_sample() {
        let mut settings = RendererSettings::default();
        settings.antialias = false;
        assert_eq!(resolve_sample_count(settings.sample_count(), |_| true), 1);
    }

    #[test]
    fn opaque_clear_presents_opaque() {
        assert_eq!(choose_alpha_mode(1.0, &[Mode::Auto, Mode::Opaque]), Mode::Opaque);
    }

    #[test]
    fn translucent_clear_prefers_premultiplied() {
        let available = [Mode::Opaque, Mode::PostMultiplied, Mode::PreMultiplied];
        assert_eq!(choose_alpha_mode(0.0, &available), Mode::PreMultiplied);
        assert_eq!(choose_alpha_mode(0.5, &[Mode::Opaque]), Mode::Opaque);
        assert_eq!(choose_alpha_mode(0.5, &[]), Mode::Auto);
    }
}
