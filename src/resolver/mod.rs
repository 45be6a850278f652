//! Model and texture reference resolution.
//!
//! This module handles resolving model inheritance chains into a single merged
//! model and resolving texture variables to concrete texture locations.

pub mod model_resolver;
pub mod texture_resolver;

pub use model_resolver::ModelResolver;
pub use texture_resolver::{TextureContext, TextureResolver};

use crate::resource_pack::{BlockModel, ResourceLocation};

/// How a resolved model turns into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Cuboid elements from the model itself or an ancestor.
    Elements,
    /// Flat item quad built from the `layer0` texture.
    Generated,
}

/// A model with its parent chain merged in.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    /// The model that was requested.
    pub id: ResourceLocation,
    /// The fully merged model (inherited elements and textures).
    pub model: BlockModel,
    pub kind: ModelKind,
    /// Contributing model ids, leaf first.
    pub chain: Vec<ResourceLocation>,
}

impl ResolvedModel {
    /// A texture resolver over the merged texture map.
    pub fn texture_resolver(&self) -> TextureResolver<'_> {
        TextureResolver::new(&self.model.textures)
    }
}
