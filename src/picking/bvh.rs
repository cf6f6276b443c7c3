//! Bounding volume hierarchy over a mesh's triangles.
//!
//! Built explicitly from a [`Geometry`] and stored alongside it; the
//! raycaster consults it when present instead of testing every triangle.

use glam::Vec3;

use crate::{math::bounds::Aabb, picking::ray::Ray, scene::geometry::Geometry};

/// Maximum triangles stored in a leaf node.
const MAX_LEAF_TRIANGLES: usize = 4;

/// Closest ray/triangle intersection found in a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter of the hit.
    pub t: f32,
    /// Index of the intersected triangle.
    pub triangle: usize,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf { start: usize, count: usize },
    Interior { left: usize, right: usize },
}

#[derive(Debug, Clone)]
struct Node {
    bounds: Aabb,
    kind: NodeKind,
}

/// Binary BVH with median splits along the longest centroid axis.
#[derive(Debug, Clone)]
pub struct BoundsTree {
    nodes: Vec<Node>,
    /// Triangle indices, reordered so each leaf owns a contiguous run.
    triangles: Vec<usize>,
}

impl BoundsTree {
    /// Build a tree over every triangle of `geometry`.
    #[must_use]
    pub fn build(geometry: &Geometry) -> Self {
        let count = geometry.triangle_count();
        let tri_bounds: Vec<Aabb> = (0..count)
            .map(|i| Aabb::from_points(geometry.triangle(i)))
            .collect();
        let centroids: Vec<Vec3> = tri_bounds.iter().map(Aabb::center).collect();

        let mut tree = Self {
            nodes: Vec::with_capacity(count.max(1) * 2),
            triangles: (0..count).collect(),
        };
        let _root = tree.build_node(0, count, &tri_bounds, &centroids);
        log::debug!(
            "built bounds tree: {count} triangles, {} nodes",
            tree.nodes.len()
        );
        tree
    }

    fn build_node(
        &mut self,
        start: usize,
        count: usize,
        tri_bounds: &[Aabb],
        centroids: &[Vec3],
    ) -> usize {
        let slice = &self.triangles[start..start + count];
        let bounds = slice
            .iter()
            .fold(Aabb::EMPTY, |acc, &t| acc.union(&tri_bounds[t]));

        let index = self.nodes.len();
        self.nodes.push(Node {
            bounds,
            kind: NodeKind::Leaf { start, count },
        });
        if count <= MAX_LEAF_TRIANGLES {
            return index;
        }

        let centroid_bounds =
            Aabb::from_points(slice.iter().map(|&t| centroids[t]));
        let extent = centroid_bounds.size();
        let axis = if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        };
        // All centroids coincide: splitting cannot separate them
        if extent[axis] <= 0.0 {
            return index;
        }

        self.triangles[start..start + count].sort_unstable_by(|&a, &b| {
            centroids[a][axis].total_cmp(&centroids[b][axis])
        });
        let half = count / 2;
        let left = self.build_node(start, half, tri_bounds, centroids);
        let right =
            self.build_node(start + half, count - half, tri_bounds, centroids);
        self.nodes[index].kind = NodeKind::Interior { left, right };
        index
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounds of the whole tree (empty for a mesh with no triangles).
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.nodes.first().map_or(Aabb::EMPTY, |n| n.bounds)
    }

    /// Closest hit of `ray` against `geometry`, which must be the mesh this
    /// tree was built from.
    #[must_use]
    pub fn raycast(&self, geometry: &Geometry, ray: &Ray) -> Option<TriangleHit> {
        let mut best: Option<TriangleHit> = None;
        let mut stack = Vec::with_capacity(32);
        if !self.nodes.is_empty() {
            stack.push(0);
        }

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            let Some(entry) =
                node.bounds.ray_intersection(ray.origin, ray.direction)
            else {
                continue;
            };
            if best.is_some_and(|b| entry > b.t) {
                continue;
            }
            match node.kind {
                NodeKind::Leaf { start, count } => {
                    for &tri in &self.triangles[start..start + count] {
                        let [a, b, c] = geometry.triangle(tri);
                        if let Some(t) = ray.intersect_triangle(a, b, c) {
                            if best.is_none_or(|b| t < b.t) {
                                best = Some(TriangleHit { t, triangle: tri });
                            }
                        }
                    }
                }
                NodeKind::Interior { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        best
    }
}

/// Closest hit of `ray` against every triangle of `geometry`.
#[must_use]
pub fn raycast_brute_force(geometry: &Geometry, ray: &Ray) -> Option<TriangleHit> {
    (0..geometry.triangle_count())
        .filter_map(|i| {
            let [a, b, c] = geometry.triangle(i);
            ray.intersect_triangle(a, b, c)
                .map(|t| TriangleHit { t, triangle: i })
        })
        .min_by(|x, y| x.t.total_cmp(&y.t))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A row of `n` unit quads along +X at z = 0.
    fn strip(n: u32) -> Geometry {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for i in 0..n {
            let x = i as f32;
            let base = positions.len() as u32;
            positions.extend_from_slice(&[
                Vec3::new(x, 0.0, 0.0),
                Vec3::new(x + 1.0, 0.0, 0.0),
                Vec3::new(x + 1.0, 1.0, 0.0),
                Vec3::new(x, 1.0, 0.0),
            ]);
            indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base,
                base + 2,
                base + 3,
            ]);
        }
        Geometry::new(positions, Vec::new(), indices)
    }

    #[test]
    fn tree_covers_mesh_bounds() {
        let g = strip(16);
        let tree = BoundsTree::build(&g);
        assert_eq!(tree.bounds(), g.bounding_box());
        assert!(tree.node_count() > 1);
    }

    #[test]
    fn matches_brute_force() {
        let g = strip(32);
        let tree = BoundsTree::build(&g);
        for i in 0..64 {
            let x = i as f32 * 0.5 + 0.1;
            let ray = Ray::new(Vec3::new(x, 0.3, 10.0), Vec3::NEG_Z);
            let fast = tree.raycast(&g, &ray);
            let slow = raycast_brute_force(&g, &ray);
            assert_eq!(fast.map(|h| h.t), slow.map(|h| h.t), "x = {x}");
        }
    }

    #[test]
    fn picks_nearest_of_stacked_cuboid_faces() {
        let g = Geometry::cuboid(Vec3::splat(2.0));
        let tree = BoundsTree::build(&g);
        let ray = Ray::new(Vec3::new(0.2, 0.3, 10.0), Vec3::NEG_Z);
        let hit = tree.raycast(&g, &ray).unwrap();
        assert!((hit.t - 9.0).abs() < 1e-5);
    }

    #[test]
    fn empty_geometry_never_hits() {
        let g = Geometry::new(Vec::new(), Vec::new(), Vec::new());
        let tree = BoundsTree::build(&g);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(tree.raycast(&g, &ray).is_none());
        assert!(tree.bounds().is_empty());
    }
}
