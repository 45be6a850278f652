//! Mesh geometry types.

use crate::resource_pack::TextureData;
use crate::types::{BoundingBox, Direction};
use glam::{Mat4, Vec3};
use std::sync::Arc;

/// A vertex in the output mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space.
    pub position: [f32; 3],
    /// Normal vector.
    pub normal: [f32; 3],
    /// Texture coordinates (bottom-left origin).
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Surface appearance of one face.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Zero opacity; the face is never drawn.
    Transparent,
    /// Nearest-neighbour texture sampling with alpha-threshold discard.
    Cutout {
        texture: Arc<TextureData>,
        /// Subtracted from the fragment depth, so later elements win on ties.
        depth_bias: f32,
        /// Whether directional face shading applies.
        shade: bool,
    },
}

impl Material {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Material::Transparent)
    }
}

/// One face of a cuboid, before it is placed in a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    pub direction: Direction,
    /// Corner UVs in ring order (top-left, top-right, bottom-right, bottom-left).
    pub uvs: [[f32; 2]; 4],
    pub material: Material,
}

/// A sized cuboid with its placement transform and six faces.
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidGeometry {
    /// Edge lengths in block units (each at least the minimum extent).
    pub size: [f32; 3],
    /// Local-to-model transform; the cuboid itself is centered on its local origin.
    pub transform: Mat4,
    /// Faces in [`Direction::FACE_ORDER`].
    pub faces: [FaceGeometry; 6],
}

impl CuboidGeometry {
    fn half_extents(&self) -> Vec3 {
        Vec3::from(self.size) * 0.5
    }

    /// The eight transformed corners.
    pub fn corners(&self) -> [[f32; 3]; 8] {
        let h = self.half_extents();
        let mut corners = [[0.0; 3]; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let local = Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            );
            *corner = self.transform.transform_point3(local).to_array();
        }
        corners
    }

    /// The face in the given direction.
    pub fn face(&self, direction: Direction) -> &FaceGeometry {
        &self.faces[direction.face_index()]
    }

    /// Transformed corner positions of one face, in ring order.
    pub fn face_positions(&self, direction: Direction) -> [[f32; 3]; 4] {
        let h = self.half_extents();
        let (from, to) = ((-h).to_array(), h.to_array());

        let ring = match direction {
            Direction::Down => [
                [from[0], from[1], to[2]],
                [to[0], from[1], to[2]],
                [to[0], from[1], from[2]],
                [from[0], from[1], from[2]],
            ],
            Direction::Up => [
                [from[0], to[1], from[2]],
                [to[0], to[1], from[2]],
                [to[0], to[1], to[2]],
                [from[0], to[1], to[2]],
            ],
            Direction::North => [
                [to[0], to[1], from[2]],
                [from[0], to[1], from[2]],
                [from[0], from[1], from[2]],
                [to[0], from[1], from[2]],
            ],
            Direction::South => [
                [from[0], to[1], to[2]],
                [to[0], to[1], to[2]],
                [to[0], from[1], to[2]],
                [from[0], from[1], to[2]],
            ],
            Direction::West => [
                [from[0], to[1], from[2]],
                [from[0], to[1], to[2]],
                [from[0], from[1], to[2]],
                [from[0], from[1], from[2]],
            ],
            Direction::East => [
                [to[0], to[1], to[2]],
                [to[0], to[1], from[2]],
                [to[0], from[1], from[2]],
                [to[0], from[1], to[2]],
            ],
        };

        ring.map(|p| self.transform.transform_point3(Vec3::from(p)).to_array())
    }

    /// Transformed outward normal of one face.
    pub fn face_normal(&self, direction: Direction) -> [f32; 3] {
        self.transform
            .transform_vector3(Vec3::from(direction.normal()))
            .normalize_or_zero()
            .to_array()
    }
}

/// Per-quad attributes of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshFace {
    /// Direction of the face in its element, before any rotation.
    pub direction: Direction,
    pub material: Material,
}

/// A triangle mesh of textured quads.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices (3 per triangle).
    pub indices: Vec<u32>,
    /// One entry per quad; triangles `2n` and `2n + 1` belong to face `n`.
    pub faces: Vec<MeshFace>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle by vertex indices.
    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Add a quad (two triangles) by vertex indices.
    /// Vertices are provided in ring order around the quad.
    /// Triangles are wound CCW for front-facing.
    pub fn add_quad(&mut self, i0: u32, i1: u32, i2: u32, i3: u32, face: MeshFace) {
        // First triangle: 0, 2, 1
        self.add_triangle(i0, i2, i1);
        // Second triangle: 0, 3, 2
        self.add_triangle(i0, i3, i2);
        self.faces.push(face);
    }

    /// Face attributes of a triangle.
    pub fn triangle_face(&self, triangle: usize) -> Option<&MeshFace> {
        self.faces.get(triangle / 2)
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Translate all vertices by an offset.
    pub fn translate(&mut self, offset: [f32; 3]) {
        for vertex in &mut self.vertices {
            vertex.position[0] += offset[0];
            vertex.position[1] += offset[1];
            vertex.position[2] += offset[2];
        }
    }

    /// Bounding box over all vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().map(|v| v.position))
    }
}
