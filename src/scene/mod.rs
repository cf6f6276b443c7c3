//! Scene graph: objects, lights and helpers.
//!
//! A [`Scene`] owns a flat list of root [`Object3D`]s (each of which may
//! carry children), the light rig, and an optional [`AxesHelper`]. It does
//! no rendering itself; see [`crate::renderer`] and [`crate::overlay`].

/// Indexed triangle meshes.
pub mod geometry;
/// Origin axes helper.
pub mod helpers;
/// Screen-space labels attached to objects.
pub mod label;
/// Light sources.
pub mod light;
/// Scene-graph nodes and transforms.
pub mod object;

pub use geometry::Geometry;
use glam::Mat4;
pub use helpers::{AxesHelper, LineVertex};
pub use label::Label;
pub use light::{hex_to_rgb, Light};
pub use object::{Object3D, Transform};
use rustc_hash::FxHashMap;

use crate::math::bounds::Aabb;

/// Handle to a root object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Root container for everything that gets drawn.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object3D>,
    /// Light sources.
    pub lights: Vec<Light>,
    /// Axes helper drawn at the origin, if any.
    pub axes: Option<AxesHelper>,
    by_name: FxHashMap<String, ObjectId>,
}

impl Scene {
    /// Empty scene with no lights and no helpers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root object. Later objects with the same name shadow earlier
    /// ones in [`find`](Self::find).
    pub fn add(&mut self, object: Object3D) -> ObjectId {
        let id = ObjectId(self.objects.len());
        let _ = self.by_name.insert(object.name.clone(), id);
        self.objects.push(object);
        id
    }

    /// Add a light source.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Root object by handle.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id.0)
    }

    /// Mutable root object by handle.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id.0)
    }

    /// Root object by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Object3D> {
        self.by_name.get(name).and_then(|&id| self.get(id))
    }

    /// All root objects.
    #[must_use]
    pub fn objects(&self) -> &[Object3D] {
        &self.objects
    }

    /// Mutable root objects.
    pub fn objects_mut(&mut self) -> &mut [Object3D] {
        &mut self.objects
    }

    /// Number of root objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` if the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object, keeping lights and helpers.
    pub fn clear_objects(&mut self) {
        self.objects.clear();
        self.by_name.clear();
    }

    /// Refresh cached world matrices of every object.
    pub fn update_world_matrices(&mut self) {
        for object in &mut self.objects {
            object.update_world_matrix(&Mat4::IDENTITY);
        }
    }

    /// World-space box enclosing every object's mesh (helpers excluded).
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| acc.union(&o.world_bounds()))
    }

    /// Visit every visible object, depth first.
    pub fn traverse_visible<'a>(&'a self, visit: &mut impl FnMut(&'a Object3D)) {
        for object in &self.objects {
            object.traverse_visible(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn add_and_find_by_name() {
        let mut scene = Scene::new();
        let a = scene.add(Object3D::new("a"));
        let b = scene.add(Object3D::new("b"));
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.find("b").map(|o| o.name.as_str()), Some("b"));
        assert!(scene.find("c").is_none());
    }

    #[test]
    fn bounds_cover_all_objects() {
        let mut scene = Scene::new();
        let _ = scene.add(
            Object3D::mesh("left", Geometry::cuboid(Vec3::ONE))
                .with_position(Vec3::new(-5.0, 0.0, 0.0)),
        );
        let _ = scene.add(
            Object3D::mesh("right", Geometry::cuboid(Vec3::ONE))
                .with_position(Vec3::new(5.0, 0.0, 0.0)),
        );
        let b = scene.bounds();
        assert_eq!(b.min, Vec3::new(-5.5, -0.5, -0.5));
        assert_eq!(b.max, Vec3::new(5.5, 0.5, 0.5));
    }

    #[test]
    fn world_matrices_refresh_after_direct_edit() {
        let mut scene = Scene::new();
        let id = scene.add(Object3D::mesh("cube", Geometry::cuboid(Vec3::ONE)));
        scene.get_mut(id).unwrap().transform.translation = Vec3::new(0.0, 2.0, 0.0);
        assert_eq!(scene.bounds().center(), Vec3::ZERO);
        scene.update_world_matrices();
        assert_eq!(scene.bounds().center(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn clear_keeps_lights() {
        let mut scene = Scene::new();
        scene.add_light(Light::Ambient {
            color: [1.0; 3],
            intensity: 1.0,
        });
        let _ = scene.add(Object3D::new("x"));
        scene.clear_objects();
        assert!(scene.is_empty());
        assert!(scene.find("x").is_none());
        assert_eq!(scene.lights.len(), 1);
    }
}
