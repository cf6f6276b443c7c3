use glam::{Vec2, Vec3};

use crate::{
    camera::core::OrthographicCamera,
    picking::{bvh, ray::Ray},
    scene::Object3D,
};

/// A ray hit on a scene object.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Index of the intersected triangle in the object's geometry.
    pub triangle: usize,
    /// The object that was hit.
    pub object: &'a Object3D,
}

/// Casts world-space rays into the scene.
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    /// The world-space ray. Its direction is kept unit length.
    pub ray: Ray,
    /// Hits closer than this are ignored.
    pub near: f32,
    /// Hits farther than this are ignored.
    pub far: f32,
}

impl Raycaster {
    /// Raycaster along `ray` with an unbounded range.
    #[must_use]
    pub fn new(ray: Ray) -> Self {
        Self {
            ray: Ray::new(ray.origin, ray.direction.normalize_or_zero()),
            near: 0.0,
            far: f32::INFINITY,
        }
    }

    /// Pick ray through the point `ndc` (see
    /// [`pointer_to_ndc`](crate::input::pointer_to_ndc)) of an orthographic
    /// camera: it starts on the near plane and runs parallel to the view
    /// direction.
    #[must_use]
    pub fn from_camera(ndc: Vec2, camera: &OrthographicCamera) -> Self {
        let origin = camera.unproject(ndc.extend(0.0));
        Self::new(Ray::new(origin, camera.forward()))
    }

    /// Hits on `object` (and its descendants if `recursive`), appended to
    /// `hits` unsorted.
    pub fn intersect_object<'a>(
        &self,
        object: &'a Object3D,
        recursive: bool,
        hits: &mut Vec<Intersection<'a>>,
    ) {
        if !object.visible {
            return;
        }
        if let Some(hit) = self.intersect_mesh(object) {
            hits.push(hit);
        }
        if recursive {
            for child in object.children() {
                self.intersect_object(child, true, hits);
            }
        }
    }

    /// Hits on every object in `objects`, nearest first.
    #[must_use]
    pub fn intersect_objects<'a>(
        &self,
        objects: impl IntoIterator<Item = &'a Object3D>,
        recursive: bool,
    ) -> Vec<Intersection<'a>> {
        let mut hits = Vec::new();
        for object in objects {
            self.intersect_object(object, recursive, &mut hits);
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn intersect_mesh<'a>(&self, object: &'a Object3D) -> Option<Intersection<'a>> {
        let geometry = object.geometry()?;
        let world = object.world_matrix();
        let local_ray = self.ray.transformed(&world.inverse());
        if geometry
            .bounding_box()
            .ray_intersection(local_ray.origin, local_ray.direction)
            .is_none()
        {
            return None;
        }

        let hit = match geometry.bounds_tree() {
            Some(tree) => tree.raycast(geometry, &local_ray),
            None => bvh::raycast_brute_force(geometry, &local_ray),
        }?;

        let point = world.transform_point3(local_ray.at(hit.t));
        let distance = (point - self.ray.origin).length();
        if distance < self.near || distance > self.far {
            return None;
        }
        Some(Intersection {
            distance,
            point,
            triangle: hit.triangle,
            object,
        })
    }
}
