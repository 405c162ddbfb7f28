//! Scene Graph
//!
//! A flat list of meshes addressed by stable [`MeshId`]s. Meshes hold shared
//! geometry, a colour and a rigid transform; nothing here knows about
//! physics. The menu keeps its own `MeshId -> body` join records.

pub mod geometry;

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::physics::collision::Ray;

pub use geometry::{Aabb, BoundingSphere, Geometry, MeshVertex};

/// Stable index of a mesh in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

/// A drawable object.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Arc<Geometry>,
    /// Linear RGB.
    pub color: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
}

impl Mesh {
    pub fn new(geometry: Arc<Geometry>, color: Vec3) -> Self {
        Self {
            geometry,
            color,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// Result of a scene ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub mesh: MeshId,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Normal of the struck face in the mesh's local frame.
    pub local_normal: Vec3,
}

#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn get_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(index, mesh)| (MeshId(index), mesh))
    }

    /// Nearest mesh hit by a world-space ray.
    ///
    /// Meshes are rigid, so the ray is moved into each mesh's local frame
    /// and distances stay in world units.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut nearest: Option<Intersection> = None;
        for (id, mesh) in self.iter() {
            let local_ray = ray.transformed(&mesh.model_matrix().inverse());
            let Some(hit) = mesh.geometry.raycast(&local_ray) else {
                continue;
            };
            if nearest.is_some_and(|best| best.distance <= hit.distance) {
                continue;
            }
            let Some(local_normal) = mesh.geometry.face_normal(hit.triangle) else {
                continue;
            };
            nearest = Some(Intersection {
                mesh: id,
                distance: hit.distance,
                point: ray.at(hit.distance),
                local_normal,
            });
        }
        nearest
    }
}
