//! Indexed triangle meshes.

use glam::Vec3;

use crate::{math::bounds::Aabb, picking::bvh::BoundsTree};

/// Indexed triangle mesh in object-local coordinates.
///
/// The local bounding box is computed once at construction. A
/// [`BoundsTree`] for accelerated raycasting is only present after an
/// explicit [`compute_bounds_tree`](Self::compute_bounds_tree).
#[derive(Debug, Clone)]
pub struct Geometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    bounding_box: Aabb,
    bounds_tree: Option<BoundsTree>,
}

impl Geometry {
    /// Mesh from vertex positions, per-vertex normals and triangle indices.
    ///
    /// If `normals` does not match `positions` in length, flat normals are
    /// accumulated from the triangles instead.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let normals = if normals.len() == positions.len() {
            normals
        } else {
            vertex_normals(&positions, &indices)
        };
        let bounding_box = Aabb::from_points(positions.iter().copied());
        Self {
            positions,
            normals,
            indices,
            bounding_box,
            bounds_tree: None,
        }
    }

    /// Axis-aligned box of the given full size centered at the origin, with
    /// flat-shaded faces.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        // (normal, tangent u, tangent v) per face
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0_f32, -1.0_f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push((normal + u * su + v * sv) * h);
                normals.push(normal);
            }
            indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base,
                base + 2,
                base + 3,
            ]);
        }
        Self::new(positions, normals, indices)
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals.
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle indices, three per triangle.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Local-space bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }

    /// Number of complete triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of triangle `index`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        let i = index * 3;
        [
            self.positions[self.indices[i] as usize],
            self.positions[self.indices[i + 1] as usize],
            self.positions[self.indices[i + 2] as usize],
        ]
    }

    /// Build (or rebuild) the BVH used for accelerated raycasting.
    pub fn compute_bounds_tree(&mut self) {
        self.bounds_tree = Some(BoundsTree::build(self));
    }

    /// Drop the BVH; raycasts fall back to testing every triangle.
    pub fn dispose_bounds_tree(&mut self) {
        self.bounds_tree = None;
    }

    /// The BVH, if one has been computed.
    #[must_use]
    pub fn bounds_tree(&self) -> Option<&BoundsTree> {
        self.bounds_tree.as_ref()
    }
}

fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.iter().map(|n| n.normalize_or_zero()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cuboid_bounds() {
        let g = Geometry::cuboid(Vec3::ONE);
        assert_eq!(g.positions().len(), 24);
        assert_eq!(g.triangle_count(), 12);
        let b = g.bounding_box();
        assert_eq!(b.min, Vec3::splat(-0.5));
        assert_eq!(b.max, Vec3::splat(0.5));
    }

    #[test]
    fn cuboid_faces_wind_outward() {
        let g = Geometry::cuboid(Vec3::new(2.0, 3.0, 4.0));
        for i in 0..g.triangle_count() {
            let [a, b, c] = g.triangle(i);
            let n = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(n.dot(centroid) > 0.0, "triangle {i} faces inward");
        }
    }

    #[test]
    fn missing_normals_are_generated() {
        let g = Geometry::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            Vec::new(),
            vec![0, 1, 2],
        );
        assert_eq!(g.normals(), &[Vec3::Z, Vec3::Z, Vec3::Z]);
    }

    #[test]
    fn bounds_tree_is_opt_in() {
        let mut g = Geometry::cuboid(Vec3::ONE);
        assert!(g.bounds_tree().is_none());
        g.compute_bounds_tree();
        assert!(g.bounds_tree().is_some());
        g.dispose_bounds_tree();
        assert!(g.bounds_tree().is_none());
    }
}
