//! Scene bootstrapper.
//!
//! A [`Stage`] bundles everything needed to look at a scene: the scene
//! graph with its default lights and axes, an orthographic camera sized to
//! the viewport, a trackball controller, the label overlay, and resolved
//! renderer settings. It is pure CPU state; the
//! [`SceneRenderer`](crate::renderer::SceneRenderer) draws it.

use glam::Vec3;

use crate::{
    camera::{
        controller::TrackballController,
        core::OrthographicCamera,
        fit::CameraFitter,
    },
    input::{pointer_to_ndc, InputEvent},
    options::Options,
    overlay::{LabelOverlay, LabelPlacement},
    picking::{Intersection, Raycaster},
    renderer::RendererSettings,
    scene::{AxesHelper, Light, Object3D, Scene},
};

/// Scene, camera, controls, overlay and renderer settings for one viewport.
#[derive(Debug, Clone)]
pub struct Stage {
    /// The scene graph.
    pub scene: Scene,
    /// The orthographic camera.
    pub camera: OrthographicCamera,
    /// Trackball controls driving `camera`.
    pub controller: TrackballController,
    /// Screen-space label placement.
    pub overlay: LabelOverlay,
    /// Frame output settings.
    pub renderer: RendererSettings,
    width: f32,
    height: f32,
    fallback_offset: f32,
}

impl Stage {
    /// Bootstrap a stage for a `width` x `height` pixel viewport.
    ///
    /// The camera frustum spans `width * aspect` by `height * aspect`, the
    /// camera sits at the configured initial position looking at the
    /// origin, and default lights and axes are added unless disabled in
    /// `options.scene`.
    #[must_use]
    pub fn new(width: f32, height: f32, options: &Options) -> Self {
        let mut camera = OrthographicCamera::from_viewport(
            width,
            height,
            options.camera.near,
            options.camera.far,
        );
        camera.position = Vec3::from_array(options.camera.initial_position);
        camera.look_at(Vec3::ZERO);

        let mut controller = TrackballController::new(&options.controls);
        controller.resize(width, height);

        let mut scene = Scene::new();
        if options.scene.add_light {
            for light in Light::default_rig(&options.lighting) {
                scene.add_light(light);
            }
        }
        if options.scene.add_axes_helper {
            scene.axes = Some(AxesHelper::new(options.scene.axes_size));
        }

        log::debug!(
            "stage bootstrapped: {width}x{height}, {} lights, axes {}",
            scene.lights.len(),
            scene.axes.is_some()
        );

        Self {
            scene,
            camera,
            controller,
            overlay: LabelOverlay::new(width, height),
            renderer: RendererSettings::new(&options.renderer, 1.0),
            width,
            height,
            fallback_offset: options.camera.fallback_offset,
        }
    }

    /// Viewport `(width, height)` in pixels.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Adapt frustum, overlay and controller to a new viewport size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        log::debug!("stage resized to {width}x{height}");
        self.width = width;
        self.height = height;
        self.camera.set_viewport(width, height);
        self.overlay.set_size(width, height);
        self.controller.resize(width, height);
    }

    /// One frame of CPU-side work: place labels, then let the controller
    /// move the camera.
    pub fn tick(&mut self) -> &[LabelPlacement] {
        let _ = self.overlay.render(&self.scene, &self.camera);
        self.controller.update(&mut self.camera);
        self.overlay.placements()
    }

    /// Forward an input event to the controller.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.controller.handle_event(event)
    }

    fn fitter(&self) -> CameraFitter {
        CameraFitter::new(self.width, self.height).with_fallback_offset(self.fallback_offset)
    }

    /// Frame `objects` with the stage camera and return the applied zoom.
    /// Bounds come from the objects' current transforms.
    pub fn fit<'a>(&mut self, objects: impl IntoIterator<Item = &'a Object3D>) -> f32 {
        let fitter = self.fitter();
        fitter.fit(&mut self.camera, &mut self.controller, objects)
    }

    /// Refresh world matrices and frame every object in the scene.
    pub fn fit_scene(&mut self) -> f32 {
        let fitter = self.fitter();
        self.scene.update_world_matrices();
        fitter.fit(
            &mut self.camera,
            &mut self.controller,
            self.scene.objects(),
        )
    }

    /// Scene hits under the pointer at pixel `(x, y)`, nearest first.
    #[must_use]
    pub fn pick(&self, x: f32, y: f32) -> Vec<Intersection<'_>> {
        let ndc = pointer_to_ndc(x, y, self.width, self.height);
        Raycaster::from_camera(ndc, &self.camera).intersect_objects(self.scene.objects(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        options::{RendererOptions, SceneOptions},
        scene::{Geometry, Label},
    };

    #[test]
    fn bootstrap_defaults() {
        let stage = Stage::new(200.0, 100.0, &Options::default());
        // aspect 2: frustum is (w * 2) x (h * 2)
        assert_eq!(stage.camera.left, -200.0);
        assert_eq!(stage.camera.right, 200.0);
        assert_eq!(stage.camera.top, 100.0);
        assert_eq!(stage.camera.bottom, -100.0);
        assert_eq!(stage.camera.near, 0.1);
        assert_eq!(stage.camera.far, 100_000.0);
        assert_eq!(stage.camera.position, Vec3::new(30.0, 30.0, 30.0));
        assert_eq!(stage.camera.target(), Vec3::ZERO);

        assert_eq!(stage.controller.rotate_speed, 15.0);
        assert_eq!(stage.controller.zoom_speed, 2.0);
        assert_eq!(stage.controller.pan_speed, 2.4);
        assert!(stage.controller.static_moving);

        assert_eq!(stage.scene.lights.len(), 3);
        assert_eq!(stage.scene.axes, Some(AxesHelper::new(100.0)));
        assert_eq!(stage.overlay.size(), (200.0, 100.0));
        assert!(stage.renderer.antialias);
        assert_eq!(stage.renderer.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn scene_options_disable_helpers() {
        let options = Options {
            scene: SceneOptions {
                add_light: false,
                add_axes_helper: false,
                ..SceneOptions::default()
            },
            renderer: RendererOptions {
                antialias: false,
                ..RendererOptions::default()
            },
            ..Options::default()
        };
        let stage = Stage::new(100.0, 100.0, &options);
        assert!(stage.scene.lights.is_empty());
        assert!(stage.scene.axes.is_none());
        assert!(!stage.renderer.antialias);
    }

    #[test]
    fn fit_scene_frames_all_objects() {
        let mut stage = Stage::new(100.0, 100.0, &Options::default());
        let _ = stage.scene.add(
            Object3D::mesh("a", Geometry::cuboid(Vec3::ONE)).with_position(Vec3::new(2.0, 0.0, 0.0)),
        );
        let _ = stage.scene.add(
            Object3D::mesh("b", Geometry::cuboid(Vec3::ONE)).with_position(Vec3::new(6.0, 0.0, 0.0)),
        );
        let zoom = stage.fit_scene();
        // union spans x 1.5..6.5
        assert_eq!(zoom, 20.0);
        assert_eq!(stage.controller.target, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn fit_scene_on_empty_scene_keeps_camera() {
        let mut stage = Stage::new(100.0, 100.0, &Options::default());
        let zoom = stage.fit_scene();
        assert_eq!(zoom, 1.0);
        assert_eq!(stage.camera.position, Vec3::new(30.0, 30.0, 30.0));
    }

    #[test]
    fn fit_external_objects() {
        let mut stage = Stage::new(100.0, 100.0, &Options::default());
        let extra = [Object3D::mesh("x", Geometry::cuboid(Vec3::splat(2.0)))];
        assert_eq!(stage.fit(&extra), 50.0);
    }

    #[test]
    fn fit_frames_edited_transform() {
        let mut stage = Stage::new(100.0, 100.0, &Options::default());
        let mut moved = Object3D::mesh("m", Geometry::cuboid(Vec3::ONE));
        moved.transform.translation = Vec3::new(0.0, -6.0, 0.0);
        let _ = stage.fit([&moved]);
        assert_eq!(stage.controller.target, Vec3::new(0.0, -6.0, 0.0));
    }

    #[test]
    fn resize_updates_camera_overlay_and_controller() {
        let mut stage = Stage::new(100.0, 100.0, &Options::default());
        stage.resize(300.0, 150.0);
        assert_eq!(stage.viewport(), (300.0, 150.0));
        assert_eq!(stage.camera.right, 300.0);
        assert_eq!(stage.overlay.size(), (300.0, 150.0));
        assert_eq!(stage.controller.screen().width, 300.0);

        stage.resize(0.0, 10.0);
        assert_eq!(stage.viewport(), (300.0, 150.0));
    }

    #[test]
    fn tick_places_labels() {
        let mut stage = Stage::new(100.0, 100.0, &Options::default());
        let _ = stage
            .scene
            .add(Object3D::new("origin").with_label(Label::new("O")));
        let placed = stage.tick();
        assert_eq!(placed.len(), 1);
        assert!((placed[0].position.x - 50.0).abs() < 1e-3);
        assert!((placed[0].position.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn pick_hits_object_under_viewport_center() {
        let mut stage = Stage::new(100.0, 100.0, &Options::default());
        let _ = stage.scene.add(
            Object3D::mesh("target", Geometry::cuboid(Vec3::splat(2.0)))
                .with_position(Vec3::new(3.0, 1.0, -2.0)),
        );
        let _ = stage.fit_scene();
        stage.camera.zoom = 10.0;
        stage.camera.update_projection_matrix();
        let hits = stage.pick(50.0, 50.0);
        assert_eq!(hits.first().map(|h| h.object.name.as_str()), Some("target"));
        assert!(stage.pick(1.0, 1.0).is_empty());
    }
}
