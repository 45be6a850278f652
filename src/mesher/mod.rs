//! Mesh generation from resolved models.
//!
//! This module binds a model's textures, turns its elements into cuboids and
//! assembles them into one centered triangle mesh.

pub mod assembler;
pub mod cuboid;
pub mod geometry;
pub mod material;

pub use assembler::{assemble, AssembledMesh, DEFAULT_MARGIN};
pub use geometry::{CuboidGeometry, FaceGeometry, Material, Mesh, MeshFace, Vertex};
pub use material::TextureBinding;

use crate::error::{RenderError, Result};
use crate::resolver::{ModelKind, ResolvedModel};
use crate::resource_pack::AssetSource;

/// Builds view-ready meshes for resolved models.
pub struct Mesher<'a> {
    source: &'a dyn AssetSource,
    margin: f32,
}

impl<'a> Mesher<'a> {
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self {
            source,
            margin: DEFAULT_MARGIN,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Fetch textures, build cuboids and assemble one model.
    pub fn mesh(&self, resolved: &ResolvedModel) -> Result<AssembledMesh> {
        let binding = TextureBinding::fetch(self.source, resolved);
        let cuboids = build_cuboids(resolved, &binding)?;
        assemble(&resolved.id.to_string(), &cuboids, self.margin)
    }
}

/// Build every cuboid of a model against its texture binding.
pub fn build_cuboids(
    resolved: &ResolvedModel,
    binding: &TextureBinding,
) -> Result<Vec<CuboidGeometry>> {
    match resolved.kind {
        ModelKind::Generated => Ok(vec![cuboid::build_generated_quad(binding)?]),
        ModelKind::Elements if resolved.model.elements().is_empty() => {
            Err(RenderError::EmptyModel(resolved.id.to_string()))
        }
        ModelKind::Elements => Ok(resolved
            .model
            .elements()
            .iter()
            .enumerate()
            .map(|(index, element)| cuboid::build_element(element, index, binding))
            .collect()),
    }
}
