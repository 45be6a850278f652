//! Texture binding for one resolved model.
//!
//! All face texture references are resolved up front, every distinct texture
//! is decoded in parallel, and the results are joined into one read-only map
//! before any geometry is built.

use crate::resolver::{ModelKind, ResolvedModel};
use crate::resource_pack::texture::load_texture_from_bytes;
use crate::resource_pack::{AssetSource, ResourceLocation, TextureData};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Face reference used by the generated item quad.
pub const LAYER0_REFERENCE: &str = "#layer0";

/// Face texture references of a model bound to loaded textures.
///
/// A reference that failed to resolve or load has no entry; faces using it
/// render transparent.
#[derive(Debug, Clone, Default)]
pub struct TextureBinding {
    bound: HashMap<String, Arc<TextureData>>,
}

impl TextureBinding {
    /// Resolve and load every texture the model's faces refer to.
    pub fn fetch(source: &dyn AssetSource, resolved: &ResolvedModel) -> Self {
        let resolver = resolved.texture_resolver();

        let references: BTreeSet<&str> = match resolved.kind {
            ModelKind::Generated => [LAYER0_REFERENCE].into_iter().collect(),
            ModelKind::Elements => resolved
                .model
                .elements()
                .iter()
                .flat_map(|element| element.faces.values())
                .map(|face| face.texture.as_str())
                .collect(),
        };

        let mut locations: HashMap<&str, ResourceLocation> = HashMap::new();
        for reference in references {
            match resolver.resolve_reference(reference) {
                Ok(location) => {
                    locations.insert(reference, location);
                }
                Err(e) => {
                    warn!(
                        model = %resolved.id,
                        reference,
                        error = %e,
                        "texture reference unresolved"
                    );
                }
            }
        }

        let unique: BTreeSet<&ResourceLocation> = locations.values().collect();
        let loaded: HashMap<&ResourceLocation, Arc<TextureData>> = unique
            .into_par_iter()
            .filter_map(|location| {
                load_texture(source, location).map(|texture| (location, Arc::new(texture)))
            })
            .collect();

        let bound: HashMap<String, Arc<TextureData>> = locations
            .iter()
            .filter_map(|(reference, location)| {
                loaded
                    .get(location)
                    .map(|texture| (reference.to_string(), Arc::clone(texture)))
            })
            .collect();

        debug!(
            model = %resolved.id,
            references = locations.len(),
            textures = loaded.len(),
            "bound textures"
        );

        Self { bound }
    }

    /// Texture bound to a face reference.
    pub fn get(&self, reference: &str) -> Option<&Arc<TextureData>> {
        self.bound.get(reference)
    }

    pub fn insert(&mut self, reference: impl Into<String>, texture: TextureData) {
        self.bound.insert(reference.into(), Arc::new(texture));
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

/// Load and decode one texture, keeping only the first animation frame.
fn load_texture(source: &dyn AssetSource, location: &ResourceLocation) -> Option<TextureData> {
    let Some(bytes) = source.texture_bytes(location) else {
        warn!(texture = %location, file = %location.texture_file(), "texture not found");
        return None;
    };

    match load_texture_from_bytes(bytes) {
        Ok(texture) => Some(texture.first_frame()),
        Err(e) => {
            warn!(texture = %location, error = %e, "failed to decode texture");
            None
        }
    }
}
