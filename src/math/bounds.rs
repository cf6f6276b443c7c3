//! Axis-aligned bounding boxes.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in some coordinate space.
///
/// [`Aabb::EMPTY`] has inverted corners (`min = +inf`, `max = -inf`) so that
/// it acts as the identity for [`union`](Self::union).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// Box containing nothing.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Box spanning the given corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered at `center` with the given full size.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing all `points`. Empty for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |acc, p| acc.expand_by_point(p))
    }

    /// `true` if the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x
            || self.max.y < self.min.y
            || self.max.z < self.min.z
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box to include `point`.
    #[must_use]
    pub fn expand_by_point(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Midpoint of the box. Zero for an empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Extent along each axis. Zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// `true` if `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// The eight corner points.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box enclosing this box after transformation by
    /// `matrix`.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self::from_points(
            self.corners()
                .into_iter()
                .map(|c| matrix.transform_point3(c)),
        )
    }

    /// Distance along the ray to the first intersection with the box
    /// (slab test), or `None` if the ray misses. Returns `0.0` when the ray
    /// starts inside.
    #[must_use]
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let inv = direction.recip();
        let t0 = (self.min - origin) * inv;
        let t1 = (self.max - origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_union_identity() {
        let b = Aabb::new(Vec3::ONE, Vec3::splat(2.0));
        assert_eq!(Aabb::EMPTY.union(&b), b);
        assert!(Aabb::EMPTY.is_empty());
        assert_eq!(Aabb::EMPTY.size(), Vec3::ZERO);
    }

    #[test]
    fn union_of_disjoint_boxes_spans_both() {
        let a = Aabb::new(Vec3::new(-3.0, 0.0, 1.0), Vec3::new(-1.0, 2.0, 2.0));
        let b = Aabb::new(Vec3::new(4.0, -5.0, 0.0), Vec3::new(6.0, -4.0, 0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::new(-3.0, -5.0, 0.0));
        assert_eq!(u.max, Vec3::new(6.0, 2.0, 2.0));
    }

    #[test]
    fn center_and_size() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 4.0));
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.size(), Vec3::new(4.0, 4.0, 2.0));
    }

    #[test]
    fn transformed_encloses_rotated_box() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let rot = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let t = b.transformed(&rot);
        assert!((t.size().y - 2.0).abs() < 1e-5);
        assert!(t.size().x.abs() < 1e-5);
    }

    #[test]
    fn ray_hits_and_misses() {
        let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let t = b.ray_intersection(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(t, Some(4.0));
        assert_eq!(b.ray_intersection(Vec3::new(0.0, 3.0, 5.0), Vec3::NEG_Z), None);
        assert_eq!(b.ray_intersection(Vec3::ZERO, Vec3::X), Some(0.0));
        assert_eq!(b.ray_intersection(Vec3::new(0.0, 0.0, 5.0), Vec3::Z), None);
    }
}
