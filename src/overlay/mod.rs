//! Screen-space label overlay.
//!
//! Each frame, [`LabelOverlay::render`] projects the world-space anchor of
//! every visible [`Label`](crate::scene::Label) through the camera and
//! produces pixel-space [`LabelPlacement`]s, ordered back to front. The
//! overlay does no text rasterization itself; a UI layer (or the viewer's
//! marker pass) consumes the placements.

use glam::Vec2;

use crate::{
    camera::{core::OrthographicCamera, frustum::Frustum},
    scene::{LineVertex, Scene},
};

/// A label positioned in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Label text.
    pub text: String,
    /// Name of the object the label belongs to.
    pub object: String,
    /// Pixel position, origin at the top-left of the viewport.
    pub position: Vec2,
    /// Normalized depth in `[0, 1]`; larger is farther from the camera.
    pub depth: f32,
}

/// Places object labels in viewport pixel coordinates.
#[derive(Debug, Clone, Default)]
pub struct LabelOverlay {
    width: f32,
    height: f32,
    placements: Vec<LabelPlacement>,
}

impl LabelOverlay {
    /// Overlay covering a `width` x `height` viewport.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            placements: Vec::new(),
        }
    }

    /// Resize the overlay to match the viewport.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Current `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Recompute placements for `scene` as seen by `camera`.
    ///
    /// Labels of hidden objects, hidden labels, and labels whose anchor lies
    /// outside the camera's view volume are skipped.
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &OrthographicCamera,
    ) -> &[LabelPlacement] {
        self.placements.clear();
        let view_proj = camera.view_projection();
        let frustum = Frustum::from_view_projection(view_proj);
        let (width, height) = (self.width, self.height);
        let placements = &mut self.placements;

        scene.traverse_visible(&mut |object| {
            let world = object.world_matrix();
            for label in object.labels.iter().filter(|l| l.visible) {
                let anchor = world.transform_point3(label.offset);
                if !frustum.contains_point(anchor) {
                    continue;
                }
                let ndc = view_proj.project_point3(anchor);
                placements.push(LabelPlacement {
                    text: label.text.clone(),
                    object: object.name.clone(),
                    position: ndc_to_pixels(ndc.truncate(), width, height),
                    depth: ndc.z,
                });
            }
        });

        self.placements
            .sort_by(|a, b| b.depth.total_cmp(&a.depth));
        &self.placements
    }

    /// Placements from the last [`render`](Self::render).
    #[must_use]
    pub fn placements(&self) -> &[LabelPlacement] {
        &self.placements
    }

    /// Line-list crosshairs in normalized device coordinates, one per
    /// placement, `size` pixels across.
    #[must_use]
    pub fn marker_vertices(&self, size: f32, color: [f32; 3]) -> Vec<LineVertex> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec::new();
        }
        let half = Vec2::new(size / self.width, size / self.height);
        let mut vertices = Vec::with_capacity(self.placements.len() * 4);
        for placement in &self.placements {
            let c = pixels_to_ndc(placement.position, self.width, self.height);
            for (a, b) in [
                (c - Vec2::new(half.x, 0.0), c + Vec2::new(half.x, 0.0)),
                (c - Vec2::new(0.0, half.y), c + Vec2::new(0.0, half.y)),
            ] {
                vertices.push(LineVertex {
                    position: a.extend(0.0).to_array(),
                    color,
                });
                vertices.push(LineVertex {
                    position: b.extend(0.0).to_array(),
                    color,
                });
            }
        }
        vertices
    }
}

fn ndc_to_pixels(ndc: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (ndc.x * 0.5 + 0.5) * width,
        (-ndc.y * 0.5 + 0.5) * height,
    )
}

fn pixels_to_ndc(pixels: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(pixels.x / width * 2.0 - 1.0, -(pixels.y / height) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{Label, Object3D};

    fn camera() -> OrthographicCamera {
        let mut cam = OrthographicCamera::new(-10.0, 10.0, 10.0, -10.0, 0.1, 100.0);
        cam.position = Vec3::new(0.0, 0.0, 50.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn label_at_center_lands_mid_viewport() {
        let mut scene = Scene::new();
        let _ = scene.add(Object3D::new("a").with_label(Label::new("A")));
        let mut overlay = LabelOverlay::new(800.0, 600.0);
        let placed = overlay.render(&scene, &camera());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].text, "A");
        assert_eq!(placed[0].object, "a");
        assert!((placed[0].position - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn screen_y_grows_downward() {
        let mut scene = Scene::new();
        let _ = scene.add(
            Object3D::new("top")
                .with_position(Vec3::new(-5.0, 5.0, 0.0))
                .with_label(Label::new("upper left")),
        );
        let mut overlay = LabelOverlay::new(200.0, 100.0);
        let placed = overlay.render(&scene, &camera());
        assert!((placed[0].position - Vec2::new(50.0, 25.0)).length() < 1e-3);
    }

    #[test]
    fn offset_and_hidden_labels() {
        let mut hidden = Object3D::new("hidden").with_label(Label::new("no"));
        hidden.visible = false;
        let mut quiet = Label::new("quiet");
        quiet.visible = false;

        let mut scene = Scene::new();
        let _ = scene.add(hidden);
        let _ = scene.add(
            Object3D::new("b")
                .with_label(Label::new("up").with_offset(Vec3::new(0.0, 5.0, 0.0)))
                .with_label(quiet),
        );
        let mut overlay = LabelOverlay::new(100.0, 100.0);
        let placed = overlay.render(&scene, &camera());
        assert_eq!(placed.len(), 1);
        assert!((placed[0].position - Vec2::new(50.0, 25.0)).length() < 1e-3);
    }

    #[test]
    fn outside_depth_range_is_skipped_and_order_is_back_to_front() {
        let mut scene = Scene::new();
        for (name, z) in [("near", 20.0), ("behind", 60.0), ("far", -20.0)] {
            let _ = scene.add(
                Object3D::new(name)
                    .with_position(Vec3::new(0.0, 0.0, z))
                    .with_label(Label::new(name)),
            );
        }
        let mut overlay = LabelOverlay::new(100.0, 100.0);
        let names: Vec<_> = overlay
            .render(&scene, &camera())
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(names, ["far", "near"]);
    }

    #[test]
    fn labels_outside_the_view_rectangle_are_skipped() {
        let mut scene = Scene::new();
        for (name, x) in [("inside", 9.0), ("right", 11.0), ("left", -30.0)] {
            let _ = scene.add(
                Object3D::new(name)
                    .with_position(Vec3::new(x, 0.0, 0.0))
                    .with_label(Label::new(name)),
            );
        }
        let mut overlay = LabelOverlay::new(100.0, 100.0);
        let placed = overlay.render(&scene, &camera());
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].text, "inside");
        assert!((placed[0].position.x - 95.0).abs() < 1e-3);
    }

    #[test]
    fn resize_moves_placements() {
        let mut scene = Scene::new();
        let _ = scene.add(Object3D::new("a").with_label(Label::new("A")));
        let mut overlay = LabelOverlay::new(100.0, 100.0);
        let _ = overlay.render(&scene, &camera());
        overlay.set_size(400.0, 200.0);
        assert_eq!(overlay.size(), (400.0, 200.0));
        let placed = overlay.render(&scene, &camera());
        assert!((placed[0].position - Vec2::new(200.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn markers_are_centered_on_placements() {
        let mut scene = Scene::new();
        let _ = scene.add(Object3D::new("a").with_label(Label::new("A")));
        let mut overlay = LabelOverlay::new(100.0, 100.0);
        let _ = overlay.render(&scene, &camera());
        let v = overlay.marker_vertices(10.0, [1.0; 3]);
        assert_eq!(v.len(), 4);
        assert!((v[0].position[0] + 0.1).abs() < 1e-5);
        assert!((v[1].position[0] - 0.1).abs() < 1e-5);
    }
}
