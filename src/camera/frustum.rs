//! Clip volume of an orthographic camera, used to cull labels.
//!
//! Planes are pulled out of the view-projection matrix, so the same code
//! works for any zoom or orientation.

use glam::{Mat4, Vec3, Vec4};

use crate::{camera::core::OrthographicCamera, math::bounds::Aabb};

/// A plane `normal · p + distance = 0` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance from origin.
    pub distance: f32,
}

impl Plane {
    /// Plane from raw `(a, b, c, d)` coefficients, normalized.
    #[must_use]
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let len = coefficients.truncate().length();
        if len > 0.0 {
            Self {
                normal: coefficients.truncate() / len,
                distance: coefficients.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from `point` (positive = inside).
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Six inward-facing planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Clipping planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Gribb/Hartmann plane extraction for a `[0, 1]` depth range.
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let m = vp.transpose();
        let (row0, row1, row2, row3) = (m.x_axis, m.y_axis, m.z_axis, m.w_axis);
        Self {
            planes: [
                Plane::from_coefficients(row3 + row0),
                Plane::from_coefficients(row3 - row0),
                Plane::from_coefficients(row3 + row1),
                Plane::from_coefficients(row3 - row1),
                Plane::from_coefficients(row2),
                Plane::from_coefficients(row3 - row2),
            ],
        }
    }

    /// Frustum of `camera` with its cached projection.
    #[must_use]
    pub fn from_camera(camera: &OrthographicCamera) -> Self {
        Self::from_view_projection(camera.view_projection())
    }

    /// `true` if `point` is inside or on the boundary.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.distance_to_point(point) >= 0.0)
    }

    /// `true` if any part of `aabb` may be inside. Conservative: boxes
    /// straddling a corner outside two planes can still pass.
    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if aabb.is_empty() {
            return false;
        }
        self.planes.iter().all(|plane| {
            // corner farthest along the plane normal
            let positive = Vec3::select(plane.normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
            plane.distance_to_point(positive) >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrthographicCamera {
        let mut cam = OrthographicCamera::new(-10.0, 10.0, 10.0, -10.0, 1.0, 100.0);
        cam.position = Vec3::new(0.0, 0.0, 50.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn contains_points_within_ortho_box() {
        let frustum = Frustum::from_camera(&camera());
        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(frustum.contains_point(Vec3::new(9.0, -9.0, 40.0)));
        assert!(!frustum.contains_point(Vec3::new(11.0, 0.0, 0.0)));
        // behind the eye and beyond far
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 60.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -60.0)));
    }

    #[test]
    fn zoom_narrows_the_box() {
        let mut cam = camera();
        let p = Vec3::new(7.0, 0.0, 0.0);
        assert!(Frustum::from_camera(&cam).contains_point(p));
        cam.zoom = 2.0;
        cam.update_projection_matrix();
        assert!(!Frustum::from_camera(&cam).contains_point(p));
    }

    #[test]
    fn aabb_culling() {
        let frustum = Frustum::from_camera(&camera());
        assert!(frustum.intersects_aabb(&Aabb::from_center_size(Vec3::ZERO, Vec3::ONE)));
        // straddles the right plane
        assert!(frustum.intersects_aabb(&Aabb::new(
            Vec3::new(9.0, 0.0, 0.0),
            Vec3::new(12.0, 1.0, 1.0)
        )));
        assert!(!frustum.intersects_aabb(&Aabb::new(
            Vec3::new(11.0, 0.0, 0.0),
            Vec3::new(12.0, 1.0, 1.0)
        )));
        assert!(!frustum.intersects_aabb(&Aabb::EMPTY));
    }
}
