//! Scene-graph nodes.

use glam::{Mat4, Quat, Vec3};

use crate::{
    math::bounds::Aabb,
    scene::{geometry::Geometry, label::Label},
};

/// Local translation, rotation and scale of an [`Object3D`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub translation: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Local-to-parent matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

/// A node in the scene graph: an optional mesh, optional labels and child
/// nodes, placed by a local [`Transform`].
///
/// The world matrix is cached. Builder methods keep it consistent for root
/// objects; after editing [`transform`](Self::transform) directly, call
/// [`update_world_matrix`](Self::update_world_matrix) (or
/// [`Scene::update_world_matrices`](crate::scene::Scene::update_world_matrices)).
/// [`bounds_under`](Self::bounds_under) reads the transforms directly.
#[derive(Debug, Clone)]
pub struct Object3D {
    /// Display name; also used for scene lookups.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Hidden objects are skipped by rendering, labels and picking.
    pub visible: bool,
    /// Base surface color (linear RGB).
    pub color: [f32; 3],
    /// Screen-space labels anchored to this object.
    pub labels: Vec<Label>,
    geometry: Option<Geometry>,
    children: Vec<Object3D>,
    world_matrix: Mat4,
}

impl Object3D {
    /// Empty object at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            color: [0.8, 0.8, 0.8],
            labels: Vec::new(),
            geometry: None,
            children: Vec::new(),
            world_matrix: Mat4::IDENTITY,
        }
    }

    /// Object drawing `geometry`.
    #[must_use]
    pub fn mesh(name: impl Into<String>, geometry: Geometry) -> Self {
        Self::new(name).with_geometry(geometry)
    }

    /// Attach a mesh.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set the local translation.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.translation = position;
        self.update_world_matrix(&Mat4::IDENTITY);
        self
    }

    /// Set the local rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self.update_world_matrix(&Mat4::IDENTITY);
        self
    }

    /// Set the local scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self.update_world_matrix(&Mat4::IDENTITY);
        self
    }

    /// Set the surface color.
    #[must_use]
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Attach a child object.
    #[must_use]
    pub fn with_child(mut self, child: Object3D) -> Self {
        self.add_child(child);
        self
    }

    /// Attach a child object, placing it under this object's world matrix.
    pub fn add_child(&mut self, mut child: Object3D) {
        child.update_world_matrix(&self.world_matrix);
        self.children.push(child);
    }

    /// The mesh, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Mutable access to the mesh (e.g. to build its bounds tree).
    pub fn geometry_mut(&mut self) -> Option<&mut Geometry> {
        self.geometry.as_mut()
    }

    /// Child objects.
    #[must_use]
    pub fn children(&self) -> &[Object3D] {
        &self.children
    }

    /// Mutable child objects.
    pub fn children_mut(&mut self) -> &mut [Object3D] {
        &mut self.children
    }

    /// Cached local-to-world matrix.
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// World-space origin of this object.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    /// Recompute the world matrix of this object and all descendants from
    /// the parent's world matrix.
    pub fn update_world_matrix(&mut self, parent: &Mat4) {
        self.world_matrix = *parent * self.transform.matrix();
        let world = self.world_matrix;
        for child in &mut self.children {
            child.update_world_matrix(&world);
        }
    }

    /// World-space box enclosing this object's mesh and all descendants'
    /// meshes, using the cached world matrices.
    #[must_use]
    pub fn world_bounds(&self) -> Aabb {
        let own = self.geometry.as_ref().map_or(Aabb::EMPTY, |g| {
            g.bounding_box().transformed(&self.world_matrix)
        });
        self.children
            .iter()
            .fold(own, |acc, child| acc.union(&child.world_bounds()))
    }

    /// World-space box of this subtree placed under `parent`, computed from
    /// the current local transforms. Cached world matrices are not read, so
    /// transforms edited since the last
    /// [`update_world_matrix`](Self::update_world_matrix) are honored.
    #[must_use]
    pub fn bounds_under(&self, parent: &Mat4) -> Aabb {
        let world = *parent * self.transform.matrix();
        let own = self
            .geometry
            .as_ref()
            .map_or(Aabb::EMPTY, |g| g.bounding_box().transformed(&world));
        self.children
            .iter()
            .fold(own, |acc, child| acc.union(&child.bounds_under(&world)))
    }

    /// Visit this object and every descendant, depth first.
    pub fn traverse<'a>(&'a self, visit: &mut impl FnMut(&'a Object3D)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }

    /// Like [`traverse`](Self::traverse) but skips hidden subtrees.
    pub fn traverse_visible<'a>(&'a self, visit: &mut impl FnMut(&'a Object3D)) {
        if !self.visible {
            return;
        }
        visit(self);
        for child in &self.children {
            child.traverse_visible(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_bounds_follow_translation_and_scale() {
        let obj = Object3D::mesh("cube", Geometry::cuboid(Vec3::ONE))
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_position(Vec3::new(5.0, 0.0, 0.0));
        let b = obj.world_bounds();
        assert_eq!(b.min, Vec3::new(4.0, -0.5, -0.5));
        assert_eq!(b.max, Vec3::new(6.0, 0.5, 0.5));
    }

    #[test]
    fn children_inherit_parent_transform() {
        let child = Object3D::mesh("child", Geometry::cuboid(Vec3::ONE))
            .with_position(Vec3::new(0.0, 3.0, 0.0));
        let parent = Object3D::new("group")
            .with_position(Vec3::new(10.0, 0.0, 0.0))
            .with_child(child);
        assert_eq!(
            parent.children()[0].world_position(),
            Vec3::new(10.0, 3.0, 0.0)
        );
        let b = parent.world_bounds();
        assert_eq!(b.center(), Vec3::new(10.0, 3.0, 0.0));
    }

    #[test]
    fn bounds_under_ignores_stale_world_matrix() {
        let mut obj = Object3D::mesh("cube", Geometry::cuboid(Vec3::ONE));
        obj.transform.translation = Vec3::new(0.0, 0.0, -8.0);
        assert_eq!(obj.world_bounds().center(), Vec3::ZERO);
        assert_eq!(
            obj.bounds_under(&Mat4::IDENTITY).center(),
            Vec3::new(0.0, 0.0, -8.0)
        );
        let parent = Mat4::from_translation(Vec3::X);
        assert_eq!(obj.bounds_under(&parent).center(), Vec3::new(1.0, 0.0, -8.0));
    }

    #[test]
    fn empty_group_has_empty_bounds() {
        assert!(Object3D::new("empty").world_bounds().is_empty());
    }

    #[test]
    fn traverse_visible_skips_hidden_subtree() {
        let mut hidden = Object3D::new("hidden").with_child(Object3D::new("inner"));
        hidden.visible = false;
        let root = Object3D::new("root")
            .with_child(hidden)
            .with_child(Object3D::new("shown"));

        let mut all = Vec::new();
        root.traverse(&mut |o| all.push(o.name.as_str()));
        assert_eq!(all, ["root", "hidden", "inner", "shown"]);

        let mut visible = Vec::new();
        root.traverse_visible(&mut |o| visible.push(o.name.as_str()));
        assert_eq!(visible, ["root", "shown"]);
    }
}
