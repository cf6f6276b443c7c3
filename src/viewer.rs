//! Standalone window running the animation loop, backed by winit.
//!
//! Each frame renders the scene, then the label overlay, then lets the
//! trackball controller move the camera. The camera is fitted to the scene
//! objects on startup and again whenever the window is resized.
//!
//! ```no_run
//! # use orthoview::{scene::{Geometry, Object3D}, Viewer};
//! # use glam::Vec3;
//! Viewer::builder()
//!     .with_object(Object3D::mesh("cube", Geometry::cuboid(Vec3::ONE)))
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::OrthoviewError,
    gpu::render_context::RenderContext,
    input::{InputEvent, MouseButton},
    options::Options,
    renderer::SceneRenderer,
    scene::Object3D,
    stage::Stage,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    objects: Vec<Object3D>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            objects: Vec::new(),
            options: None,
            title: "Orthoview".into(),
        }
    }

    /// Add an object to the scene.
    #[must_use]
    pub fn with_object(mut self, object: Object3D) -> Self {
        self.objects.push(object);
        self
    }

    /// Add several objects to the scene.
    #[must_use]
    pub fn with_objects(mut self, objects: impl IntoIterator<Item = Object3D>) -> Self {
        self.objects.extend(objects);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            objects: self.objects,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing a scene through an orthographic camera.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    objects: Vec<Object3D>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`OrthoviewError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), OrthoviewError> {
        let event_loop =
            EventLoop::new().map_err(|e| OrthoviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            state: None,
            objects: self.objects,
            options: self.options,
            title: self.title,
            last_frame_time: Instant::now(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrthoviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Everything that exists once the window is up.
struct ViewerState {
    window: Arc<Window>,
    context: RenderContext,
    renderer: SceneRenderer,
    stage: Stage,
    pointer: (f32, f32),
    press: Option<(f32, f32)>,
}

/// Internal winit application handler.
struct ViewerApp {
    state: Option<ViewerState>,
    /// Objects waiting for the stage to be created.
    objects: Vec<Object3D>,
    options: Options,
    title: String,
    last_frame_time: Instant,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

#[allow(clippy::cast_precision_loss)]
fn to_f32((w, h): (u32, u32)) -> (f32, f32) {
    (w as f32, h as f32)
}

impl ViewerApp {
    fn init(&mut self, window: Arc<Window>) -> Result<ViewerState, OrthoviewError> {
        let size = viewport_size(window.inner_size());
        let (width, height) = to_f32(size);
        let mut stage = Stage::new(width, height, &self.options);
        #[allow(clippy::cast_possible_truncation)]
        let scale = window.scale_factor() as f32;
        stage.renderer.set_device_pixel_ratio(scale);

        let context =
            pollster::block_on(RenderContext::new(window.clone(), size, &stage.renderer))?;
        for object in self.objects.drain(..) {
            let _ = stage.scene.add(object);
        }
        let zoom = stage.fit_scene();
        log::info!(
            "showing {} objects at zoom {zoom:.3} (pixel ratio {})",
            stage.scene.len(),
            stage.renderer.pixel_ratio
        );

        let mut renderer = SceneRenderer::new(&context, stage.renderer);
        renderer.prepare_scene(&context, &stage.scene);

        Ok(ViewerState {
            window,
            context,
            renderer,
            stage,
            pointer: (0.0, 0.0),
            press: None,
        })
    }
}

impl ViewerState {
    fn resize(&mut self, size: (u32, u32)) {
        self.context.resize(size.0, size.1);
        self.renderer.resize(&self.context);
        let (width, height) = to_f32(size);
        self.stage.resize(width, height);
        let _ = self.stage.fit_scene();
    }

    /// Render the scene, then tick the stage (place labels, update
    /// controls), then draw the labels.
    fn frame(&mut self) {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.resize(viewport_size(self.window.inner_size()));
                return;
            }
            Err(e) => {
                log::error!("render error: {e:?}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render_scene(&self.context, &view, &self.stage.camera);
        // Placements come from the camera the scene was just drawn with;
        // the controller moves it afterwards.
        let _ = self.stage.tick();
        self.renderer
            .render_labels(&self.context, &view, &self.stage.overlay);

        frame.present();
    }

    fn input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMoved { x, y } => self.pointer = (x, y),
            InputEvent::ButtonPressed(MouseButton::Left) => self.press = Some(self.pointer),
            InputEvent::ButtonReleased(MouseButton::Left) => {
                if self.press.take() == Some(self.pointer) {
                    self.log_pick();
                }
            }
            _ => {}
        }
        if self.stage.handle_event(event) {
            self.window.request_redraw();
        }
    }

    /// Report what lies under a click that did not drag.
    fn log_pick(&self) {
        let (x, y) = self.pointer;
        match self.stage.pick(x, y).first() {
            Some(hit) => log::info!(
                "picked {} at {:.2?} (distance {:.2})",
                hit.object.name,
                hit.point,
                hit.distance
            ),
            None => log::info!("nothing under pointer at ({x:.0}, {y:.0})"),
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attrs = Window::default_attributes().with_title(&self.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.init(window) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to initialize viewer: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => state.resize(viewport_size(size)),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scale = scale_factor as f32;
                state.stage.renderer.set_device_pixel_ratio(scale);
                state.resize(viewport_size(state.window.inner_size()));
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame_time);
                self.last_frame_time = now;
                log::trace!("frame time {:.2} ms", dt.as_secs_f64() * 1000.0);

                state.frame();
                state.window.request_redraw();
            }

            WindowEvent::MouseInput {
                button,
                state: button_state,
                ..
            } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    state.input(&match button_state {
                        ElementState::Pressed => InputEvent::ButtonPressed(button),
                        ElementState::Released => InputEvent::ButtonReleased(button),
                    });
                }
            }

            #[allow(clippy::cast_possible_truncation)]
            WindowEvent::CursorMoved { position, .. } => {
                state.input(&InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                state.input(&InputEvent::Wheel { lines });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.input(&InputEvent::ShiftChanged(modifiers.state().shift_key()));
            }

            _ => (),
        }
    }
}
