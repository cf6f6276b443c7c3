//! Auto-framing: zoom and place an orthographic camera so a set of objects
//! fills the viewport.

use glam::{Mat4, Vec3};

use crate::{
    camera::{controller::TrackballController, core::OrthographicCamera},
    math::bounds::Aabb,
    scene::Object3D,
};

/// `+Z` offset applied when the derived view direction degenerates.
pub const DEFAULT_FALLBACK_OFFSET: f32 = 30.0;

/// Camera placement computed for a bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPlan {
    /// Union of the objects' world-space boxes.
    pub bounds: Aabb,
    /// Center of `bounds`; becomes the look-at and controller target.
    pub center: Vec3,
    /// Largest extent of `bounds` along any axis.
    pub frustum_size: f32,
    /// Orthographic zoom that fits `frustum_size` into the viewport.
    pub zoom: f32,
    /// New eye position.
    pub position: Vec3,
}

/// Frames objects within a viewport of fixed pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFitter {
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
    /// `+Z` offset used when the view direction degenerates.
    pub fallback_offset: f32,
}

impl CameraFitter {
    /// Fitter for a `width` x `height` viewport.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            fallback_offset: DEFAULT_FALLBACK_OFFSET,
        }
    }

    /// Override the degenerate-direction `+Z` offset.
    #[must_use]
    pub fn with_fallback_offset(mut self, offset: f32) -> Self {
        self.fallback_offset = offset;
        self
    }

    /// Compute a placement for `bounds`, or `None` if the box is empty or
    /// has no positive finite extent.
    #[must_use]
    pub fn plan(&self, bounds: Aabb) -> Option<FitPlan> {
        if bounds.is_empty() {
            return None;
        }
        let center = bounds.center();
        let frustum_size = bounds.size().max_element();
        if !(frustum_size.is_finite() && frustum_size > 0.0) {
            return None;
        }

        let width_zoom = self.viewport_width / frustum_size;
        let height_zoom = self.viewport_height / frustum_size;
        let zoom = width_zoom.min(height_zoom);

        // The basis is seeded with the center itself, so the offset
        // direction depends on where the objects sit in world space.
        let right = center.cross(Vec3::Z).normalize_or_zero();
        let front = right.cross(Vec3::Z).normalize_or_zero();
        let up = right.cross(front).normalize_or_zero();

        let mut position = center + up * frustum_size;
        if position == center {
            position.z += self.fallback_offset;
        }

        Some(FitPlan {
            bounds,
            center,
            frustum_size,
            zoom,
            position,
        })
    }

    /// Frame `objects` with `camera`, retarget `controller`, and return the
    /// applied zoom.
    ///
    /// Each object is treated as the root of its hierarchy and its world
    /// bounds are recomputed from the current transforms, so edits made
    /// since the last world-matrix update are framed. If the union is empty
    /// or flat in every axis, nothing is changed and the camera's existing
    /// zoom is returned.
    pub fn fit<'a>(
        &self,
        camera: &mut OrthographicCamera,
        controller: &mut TrackballController,
        objects: impl IntoIterator<Item = &'a Object3D>,
    ) -> f32 {
        let bounds = objects
            .into_iter()
            .fold(Aabb::EMPTY, |acc, o| acc.union(&o.bounds_under(&Mat4::IDENTITY)));

        let Some(plan) = self.plan(bounds) else {
            log::warn!(
                "camera fit skipped: degenerate bounds {:?}..{:?}",
                bounds.min,
                bounds.max
            );
            return camera.zoom;
        };
        self.apply(&plan, camera, controller);
        camera.zoom
    }

    /// Write `plan` into the camera and controller.
    pub fn apply(
        &self,
        plan: &FitPlan,
        camera: &mut OrthographicCamera,
        controller: &mut TrackballController,
    ) {
        log::debug!(
            "camera fit: center={:?} frustum_size={} zoom={} viewport={}x{}",
            plan.center,
            plan.frustum_size,
            plan.zoom,
            self.viewport_width,
            self.viewport_height
        );
        camera.zoom = plan.zoom;
        camera.position = plan.position;
        camera.look_at(plan.center);
        controller.target = plan.center;
        controller.update(camera);
        camera.update_projection_matrix();
    }
}

/// One-shot form of [`CameraFitter::fit`].
pub fn fit_camera<'a>(
    viewport_width: f32,
    viewport_height: f32,
    camera: &mut OrthographicCamera,
    controller: &mut TrackballController,
    objects: impl IntoIterator<Item = &'a Object3D>,
) -> f32 {
    CameraFitter::new(viewport_width, viewport_height).fit(camera, controller, objects)
}
