//! Triangle geometry shared by the renderer and the picker.

use glam::Vec3;

use crate::physics::collision::{Ray, RayHit, ray_aabb_intersect, ray_triangle_intersect};

/// Vertex layout uploaded to the GPU (position, normal).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box that any point will expand.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut aabb, p| {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
            aabb
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Indexed triangle list with precomputed bounds.
///
/// Triangles are counter-clockwise when seen from the side their vertex
/// normals point to; the renderer culls back faces and the picker ignores
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    bounding_box: Aabb,
    bounding_sphere: BoundingSphere,
}

impl Geometry {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        let bounding_box = Aabb::from_points(vertices.iter().map(MeshVertex::position));
        // Centre of the box, radius to the farthest vertex.
        let center = bounding_box.center();
        let radius = vertices
            .iter()
            .map(|v| v.position().distance(center))
            .fold(0.0, f32::max);
        Self {
            vertices,
            indices,
            bounding_box,
            bounding_sphere: BoundingSphere { center, radius },
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Replace the bounding box (used for glyphs with no outline).
    pub fn with_bounding_box(mut self, bounding_box: Aabb) -> Self {
        self.bounding_box = bounding_box;
        self.bounding_sphere.center = bounding_box.center();
        self.bounding_sphere.radius = bounding_box.size().length() * 0.5;
        self
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }

    /// Corner vertices of triangle `index`.
    pub fn triangle(&self, index: usize) -> Option<[&MeshVertex; 3]> {
        let tri = self.indices.get(index * 3..index * 3 + 3)?;
        Some([
            self.vertices.get(tri[0] as usize)?,
            self.vertices.get(tri[1] as usize)?,
            self.vertices.get(tri[2] as usize)?,
        ])
    }

    /// Normal of triangle `index`, taken from its first vertex.
    pub fn face_normal(&self, index: usize) -> Option<Vec3> {
        self.triangle(index).map(|[a, _, _]| a.normal())
    }

    /// Nearest front-facing triangle hit by `ray` (geometry space).
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        if self.is_empty() {
            return None;
        }
        ray_aabb_intersect(
            ray.origin,
            ray.direction,
            self.bounding_box.min,
            self.bounding_box.max,
        )?;

        let mut nearest: Option<RayHit> = None;
        for index in 0..self.triangle_count() {
            let Some([a, b, c]) = self.triangle(index) else {
                continue;
            };
            // Back faces are invisible, so they can't be clicked either.
            if a.normal().dot(ray.direction) >= 0.0 {
                continue;
            }
            let Some(t) = ray_triangle_intersect(
                ray.origin,
                ray.direction,
                a.position(),
                b.position(),
                c.position(),
            ) else {
                continue;
            };
            if nearest.is_none_or(|hit| t < hit.distance) {
                nearest = Some(RayHit {
                    distance: t,
                    point: ray.at(t),
                    triangle: index,
                });
            }
        }
        nearest
    }
}
