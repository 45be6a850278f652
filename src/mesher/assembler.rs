//! Mesh assembly: element cuboids into one centered, view-fitted mesh.

use super::geometry::{CuboidGeometry, Mesh, MeshFace, Vertex};
use crate::error::{RenderError, Result};
use crate::types::BoundingBox;
use tracing::debug;

/// Fraction of the view the largest model dimension fills.
pub const DEFAULT_MARGIN: f32 = 0.8;

/// Floor of the largest dimension when computing the view scale.
const MIN_DIMENSION: f32 = 1e-6;

/// A model's geometry, centered on the origin.
#[derive(Debug, Clone)]
pub struct AssembledMesh {
    /// Visible faces only; transparent faces are dropped.
    pub mesh: Mesh,
    /// Box over every cuboid corner, after re-centering.
    pub bounds: BoundingBox,
    /// Uniform scale that fits the model into the view.
    pub view_scale: f32,
}

/// Assemble cuboids into one mesh and fit it for viewing.
///
/// The bounding box covers all cuboid corners, including those of fully
/// transparent cuboids.
pub fn assemble(id: &str, cuboids: &[CuboidGeometry], margin: f32) -> Result<AssembledMesh> {
    let corners = cuboids.iter().flat_map(|cuboid| cuboid.corners());
    let Some(raw_bounds) = BoundingBox::from_points(corners) else {
        return Err(RenderError::EmptyModel(id.to_string()));
    };

    let mut mesh = Mesh::new();
    for cuboid in cuboids {
        add_cuboid(&mut mesh, cuboid);
    }

    let [cx, cy, cz] = raw_bounds.center();
    mesh.translate([-cx, -cy, -cz]);

    let bounds = BoundingBox::new(
        [raw_bounds.min[0] - cx, raw_bounds.min[1] - cy, raw_bounds.min[2] - cz],
        [raw_bounds.max[0] - cx, raw_bounds.max[1] - cy, raw_bounds.max[2] - cz],
    );
    let view_scale = margin / bounds.max_dimension().max(MIN_DIMENSION);

    debug!(
        model = id,
        cuboids = cuboids.len(),
        triangles = mesh.triangle_count(),
        view_scale,
        "assembled mesh"
    );

    Ok(AssembledMesh {
        mesh,
        bounds,
        view_scale,
    })
}

fn add_cuboid(mesh: &mut Mesh, cuboid: &CuboidGeometry) {
    for face in &cuboid.faces {
        if face.material.is_transparent() {
            continue;
        }

        let positions = cuboid.face_positions(face.direction);
        let normal = cuboid.face_normal(face.direction);

        let [v0, v1, v2, v3] = [0, 1, 2, 3]
            .map(|i| mesh.add_vertex(Vertex::new(positions[i], normal, face.uvs[i])));

        mesh.add_quad(
            v0,
            v1,
            v2,
            v3,
            MeshFace {
                direction: face.direction,
                material: face.material.clone(),
            },
        );
    }
}
