//! Model inheritance resolution.

use super::{ModelKind, ResolvedModel};
use crate::error::{RenderError, Result};
use crate::resource_pack::{AssetSource, BlockModel, ResourceLocation, DEFAULT_NAMESPACE};
use tracing::debug;

/// Maximum depth for model inheritance to prevent infinite loops.
pub const MAX_INHERITANCE_DEPTH: usize = 10;

/// Resolves model inheritance chains.
pub struct ModelResolver<'a> {
    source: &'a dyn AssetSource,
}

impl<'a> ModelResolver<'a> {
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self { source }
    }

    /// Resolve a model with all inherited properties.
    pub fn resolve(&self, model_id: &str) -> Result<ResolvedModel> {
        let id = ResourceLocation::parse(model_id);
        let (chain, kind) = self.collect_chain(&id)?;

        // Fold from the root ancestor down to the leaf
        let mut documents = chain.into_iter().rev();
        let Some((root_id, root)) = documents.next() else {
            return Err(RenderError::ModelNotFound(id.to_string()));
        };

        let mut ancestry = vec![root_id];
        let mut model = root;
        for (child_id, child) in documents {
            model = merge_models(model, child);
            ancestry.push(child_id);
        }
        ancestry.reverse();

        debug!(model = %id, depth = ancestry.len(), ?kind, "resolved model");

        Ok(ResolvedModel {
            id,
            model,
            kind,
            chain: ancestry,
        })
    }

    /// Load the document chain, leaf first, stopping at a terminal parent.
    fn collect_chain(
        &self,
        id: &ResourceLocation,
    ) -> Result<(Vec<(ResourceLocation, BlockModel)>, ModelKind)> {
        let mut chain = Vec::new();
        let mut current = id.clone();
        let mut depth = 0;

        loop {
            if depth > MAX_INHERITANCE_DEPTH {
                return Err(RenderError::ParentRecursionExceeded(id.to_string()));
            }

            let model = self.load(&current)?;
            let parent = model.parent.clone();
            chain.push((current, model));

            let Some(parent) = parent else {
                return Ok((chain, ModelKind::Elements));
            };
            if let Some(kind) = terminal_kind(&parent) {
                return Ok((chain, kind));
            }

            current = ResourceLocation::parse(&parent);
            depth += 1;
        }
    }

    /// Load and parse one model document.
    fn load(&self, location: &ResourceLocation) -> Result<BlockModel> {
        let json = self.source.model_json(location).ok_or_else(|| {
            RenderError::ModelNotFound(format!("{} ({})", location, location.model_file()))
        })?;

        serde_json::from_str(json).map_err(|source| RenderError::InvalidModel {
            id: location.to_string(),
            source,
        })
    }
}

/// Parents that end the chain without being loaded.
fn terminal_kind(parent: &str) -> Option<ModelKind> {
    let path = match parent.split_once(':') {
        Some((namespace, path)) if namespace == DEFAULT_NAMESPACE => path,
        Some(_) => return None,
        None => parent,
    };

    match path {
        "item/generated" | "builtin/generated" => Some(ModelKind::Generated),
        _ if path.starts_with("builtin/") => Some(ModelKind::Elements),
        _ => None,
    }
}

/// Merge a child model over its resolved parent.
/// Child properties override parent properties.
fn merge_models(parent: BlockModel, child: BlockModel) -> BlockModel {
    let mut merged = parent;

    // Merge textures (child overrides parent, parent keys keep their position)
    for (key, value) in child.textures {
        merged.textures.insert(key, value);
    }

    // A declared element list replaces the parent's, even when empty
    if child.elements.is_some() {
        merged.elements = child.elements;
    }

    if child.ambient_occlusion.is_some() {
        merged.ambient_occlusion = child.ambient_occlusion;
    }
    if child.display.is_some() {
        merged.display = child.display;
    }

    // Clear parent reference (model is now resolved)
    merged.parent = None;

    merged
}
