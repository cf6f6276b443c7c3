use glam::{Mat4, Vec3};

/// Parallel-ray rejection threshold for triangle tests.
const EPSILON: f32 = 1e-7;

/// Half-line starting at `origin` heading along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction. Not required to be unit length; distances returned by
    /// intersection tests are in multiples of this vector.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray mapped through an affine transform. The direction is transformed
    /// without normalization so parameters stay comparable.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }

    /// Möller–Trumbore intersection with triangle `(a, b, c)`, both sides.
    /// Returns the ray parameter of the hit.
    #[must_use]
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_triangle_in_front() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(t, Some(5.0));
        assert_eq!(ray.at(5.0), Vec3::new(0.25, 0.25, 0.0));
    }

    #[test]
    fn misses_outside_and_behind() {
        let outside = Ray::new(Vec3::new(0.8, 0.8, 5.0), Vec3::NEG_Z);
        assert!(outside.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
        let behind = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::Z);
        assert!(behind.intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn transform_keeps_parameterization() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let moved = ray.transformed(&Mat4::from_scale(Vec3::splat(2.0)));
        assert_eq!(moved.direction, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(moved.at(1.0), Vec3::new(2.0, 0.0, 0.0));
    }
}
