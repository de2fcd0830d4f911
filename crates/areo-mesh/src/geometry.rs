//! Indexed triangle geometry shared by every primitive.

use glam::{Mat3, Quat, Vec3};

use crate::vertex_format::MeshVertex;

/// An indexed triangle mesh with per-vertex normals and UVs.
///
/// The three attribute vectors always have the same length; `indices` is a
/// CCW triangle list into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Create an empty geometry with room for `vertices` vertices and `indices` indices.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of indexed triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest distance of any vertex from the origin.
    pub fn bounding_sphere_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }

    /// Largest distance of any vertex from the Y axis.
    pub fn radial_extent(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| (p.x * p.x + p.z * p.z).sqrt())
            .fold(0.0, f32::max)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty geometry.
    pub fn aabb(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// Offset every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        for p in &mut self.positions {
            *p += offset;
        }
        self
    }

    /// Rotate positions and normals about the origin.
    pub fn rotate(&mut self, rotation: Quat) -> &mut Self {
        let basis = Mat3::from_quat(rotation);
        for p in &mut self.positions {
            *p = basis * *p;
        }
        for n in &mut self.normals {
            *n = (basis * *n).normalize_or_zero();
        }
        self
    }

    /// Append `other`, re-basing its indices.
    pub fn merge(&mut self, other: &Geometry) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Interleave attributes into GPU-ready vertices.
    pub fn to_vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: *uv,
            })
            .collect()
    }
}
