//! Cuboid geometry for model elements and generated items.

use super::geometry::{CuboidGeometry, FaceGeometry, Material};
use super::material::{TextureBinding, LAYER0_REFERENCE};
use crate::error::{RenderError, Result};
use crate::resource_pack::{ModelElement, ModelFace};
use crate::types::Direction;
use glam::{Mat4, Vec3};

/// Smallest edge length of a built cuboid, in block units.
pub const MIN_EXTENT: f32 = 0.001;

/// Depth bias step between consecutive elements.
pub const ELEMENT_DEPTH_BIAS: f32 = 1e-4;

/// Upper bound of the per-element depth bias.
pub const MAX_DEPTH_BIAS: f32 = 0.01;

/// Corner permutation per UV rotation step: `corner[i] = base[UV_ROTATION[step][i]]`.
pub const UV_ROTATION: [[usize; 4]; 4] = [
    [0, 1, 2, 3], // 0
    [3, 0, 1, 2], // 90
    [2, 3, 0, 1], // 180
    [1, 2, 3, 0], // 270
];

/// Full-texture UV rectangle used by the generated item quad.
const FULL_UV: [f32; 4] = [0.0, 0.0, 16.0, 16.0];

/// Build the cuboid for one element.
///
/// `index` is the element's position in the model, used for the depth bias.
pub fn build_element(
    element: &ModelElement,
    index: usize,
    binding: &TextureBinding,
) -> CuboidGeometry {
    let depth_bias = (index as f32 * ELEMENT_DEPTH_BIAS).min(MAX_DEPTH_BIAS);

    let faces = Direction::FACE_ORDER.map(|direction| {
        build_face(
            direction,
            element.faces.get(&direction),
            binding,
            depth_bias,
            element.shade,
        )
    });

    CuboidGeometry {
        size: element.normalized_size(MIN_EXTENT),
        transform: element_transform(element),
        faces,
    }
}

/// Build the flat quad of a generated item from its `layer0` texture.
pub fn build_generated_quad(binding: &TextureBinding) -> Result<CuboidGeometry> {
    let Some(texture) = binding.get(LAYER0_REFERENCE) else {
        return Err(RenderError::TextureUnresolved(LAYER0_REFERENCE.to_string()));
    };

    let faces = Direction::FACE_ORDER.map(|direction| match direction {
        Direction::South | Direction::North => FaceGeometry {
            direction,
            uvs: face_uvs(Some(FULL_UV), 0),
            material: Material::Cutout {
                texture: texture.clone(),
                depth_bias: 0.0,
                shade: false,
            },
        },
        _ => FaceGeometry {
            direction,
            uvs: face_uvs(None, 0),
            material: Material::Transparent,
        },
    });

    Ok(CuboidGeometry {
        size: [1.0, 1.0, MIN_EXTENT],
        transform: Mat4::IDENTITY,
        faces,
    })
}

fn build_face(
    direction: Direction,
    face: Option<&ModelFace>,
    binding: &TextureBinding,
    depth_bias: f32,
    shade: bool,
) -> FaceGeometry {
    let Some(face) = face else {
        return FaceGeometry {
            direction,
            uvs: face_uvs(None, 0),
            material: Material::Transparent,
        };
    };

    let material = match (face.uv, binding.get(&face.texture)) {
        (Some(_), Some(texture)) => Material::Cutout {
            texture: texture.clone(),
            depth_bias,
            shade,
        },
        _ => Material::Transparent,
    };

    FaceGeometry {
        direction,
        uvs: face_uvs(face.uv, face.rotation),
        material,
    }
}

/// Corner UVs of a face in ring order, with the face rotation applied.
///
/// `uv` is in 0-16 pixel space with its origin at the top-left; the result
/// has a bottom-left origin. Without `uv` every corner is `(0, 0)`.
pub fn face_uvs(uv: Option<[f32; 4]>, rotation: i32) -> [[f32; 2]; 4] {
    let Some([u1, v1, u2, v2]) = uv else {
        return [[0.0, 0.0]; 4];
    };

    let (u1, u2) = (u1 / 16.0, u2 / 16.0);
    let (v1, v2) = (1.0 - v1 / 16.0, 1.0 - v2 / 16.0);

    // top-left, top-right, bottom-right, bottom-left
    let base = [[u1, v1], [u2, v1], [u2, v2], [u1, v2]];

    let step = (rotation.rem_euclid(360) / 90) as usize;
    UV_ROTATION[step].map(|i| base[i])
}

/// Placement of an element's centered cuboid in model space.
///
/// With a pivot rotation this is `T(pivot) * S(rescale) * R * T(center - pivot)`.
fn element_transform(element: &ModelElement) -> Mat4 {
    let center = Vec3::from(element.normalized_center());

    let Some(rotation) = &element.rotation else {
        return Mat4::from_translation(center);
    };

    let pivot = Vec3::from(rotation.normalized_origin());
    let axis = Vec3::from(rotation.axis.unit_vector());

    Mat4::from_translation(pivot)
        * Mat4::from_scale(Vec3::from(rotation.rescale_vector()))
        * Mat4::from_axis_angle(axis, rotation.angle_radians())
        * Mat4::from_translation(center - pivot)
}
