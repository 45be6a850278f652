//! Resource pack loading and asset lookup.
//!
//! This module handles loading Minecraft resource packs (ZIP files or directories)
//! and serving their model documents and texture images by resource location.

pub mod loader;
pub mod model;
pub mod texture;

pub use model::{BlockModel, ModelElement, ModelFace};
pub use texture::TextureData;

use std::collections::HashMap;

/// Namespace assumed when a location omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespaced asset identifier such as `minecraft:block/stone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceLocation {
    pub namespace: String,
    pub path: String,
}

impl ResourceLocation {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parse `namespace:path`, defaulting the namespace to `minecraft`.
    pub fn parse(location: &str) -> Self {
        let (namespace, path) = parse_resource_location(location);
        Self::new(namespace, path)
    }

    /// Path of the model document inside a pack.
    pub fn model_file(&self) -> String {
        format!("assets/{}/models/{}.json", self.namespace, self.path)
    }

    /// Path of the texture image inside a pack.
    pub fn texture_file(&self) -> String {
        format!("assets/{}/textures/{}.png", self.namespace, self.path)
    }
}

impl std::fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Read access to model documents and texture images.
///
/// Implemented by [`ResourcePack`]; the resolvers and the texture fetcher only
/// go through this trait, so other asset stores can be plugged in.
pub trait AssetSource: Sync {
    /// Raw JSON text of a model document.
    fn model_json(&self, location: &ResourceLocation) -> Option<&str>;

    /// Raw (encoded) bytes of a texture image.
    fn texture_bytes(&self, location: &ResourceLocation) -> Option<&[u8]>;

    /// Every model the source knows about, sorted.
    fn model_ids(&self) -> Vec<ResourceLocation>;
}

/// A loaded Minecraft resource pack.
///
/// Models are kept as JSON text and textures as encoded PNG bytes; both are
/// parsed on demand so only the model being rendered is ever decoded.
#[derive(Debug, Default, Clone)]
pub struct ResourcePack {
    /// Model documents by namespace and model path.
    /// Key: namespace, Value: map of model_path to JSON text.
    pub models: HashMap<String, HashMap<String, String>>,

    /// Texture images by namespace and texture path.
    /// Key: namespace, Value: map of texture_path to PNG bytes.
    pub textures: HashMap<String, HashMap<String, Vec<u8>>>,
}

impl ResourcePack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model document.
    pub fn add_model(&mut self, namespace: &str, model_path: &str, json: impl Into<String>) {
        self.models
            .entry(namespace.to_string())
            .or_default()
            .insert(model_path.to_string(), json.into());
    }

    /// Add an encoded texture image.
    pub fn add_texture(&mut self, namespace: &str, texture_path: &str, data: Vec<u8>) {
        self.textures
            .entry(namespace.to_string())
            .or_default()
            .insert(texture_path.to_string(), data);
    }

    /// Get the total number of models.
    pub fn model_count(&self) -> usize {
        self.models.values().map(|m| m.len()).sum()
    }

    /// Get the total number of textures.
    pub fn texture_count(&self) -> usize {
        self.textures.values().map(|m| m.len()).sum()
    }

    /// Get all namespaces in the resource pack.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<_> = self
            .models
            .keys()
            .chain(self.textures.keys())
            .map(|s| s.as_str())
            .collect();
        namespaces.sort();
        namespaces.dedup();
        namespaces
    }
}

impl AssetSource for ResourcePack {
    fn model_json(&self, location: &ResourceLocation) -> Option<&str> {
        self.models
            .get(&location.namespace)
            .and_then(|ns| ns.get(&location.path))
            .map(|s| s.as_str())
    }

    fn texture_bytes(&self, location: &ResourceLocation) -> Option<&[u8]> {
        self.textures
            .get(&location.namespace)
            .and_then(|ns| ns.get(&location.path))
            .map(|d| d.as_slice())
    }

    fn model_ids(&self) -> Vec<ResourceLocation> {
        let mut ids: Vec<_> = self
            .models
            .iter()
            .flat_map(|(namespace, models)| {
                models
                    .keys()
                    .map(move |path| ResourceLocation::new(namespace.as_str(), path.as_str()))
            })
            .collect();
        ids.sort();
        ids
    }
}

/// Parse a resource location into namespace and path.
/// "minecraft:block/stone" -> ("minecraft", "block/stone")
/// "block/stone" -> ("minecraft", "block/stone")
pub(crate) fn parse_resource_location(resource_location: &str) -> (&str, &str) {
    if let Some((namespace, path)) = resource_location.split_once(':') {
        (namespace, path)
    } else {
        (DEFAULT_NAMESPACE, resource_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_location() {
        assert_eq!(
            parse_resource_location("minecraft:block/stone"),
            ("minecraft", "block/stone")
        );
        assert_eq!(
            parse_resource_location("mymod:block/custom"),
            ("mymod", "block/custom")
        );
        assert_eq!(
            parse_resource_location("block/stone"),
            ("minecraft", "block/stone")
        );
    }

    #[test]
    fn test_location_files() {
        let location = ResourceLocation::parse("mymod:item/gear");
        assert_eq!(location.model_file(), "assets/mymod/models/item/gear.json");
        assert_eq!(location.texture_file(), "assets/mymod/textures/item/gear.png");
        assert_eq!(location.to_string(), "mymod:item/gear");
    }

    #[test]
    fn test_model_ids_sorted() {
        let mut pack = ResourcePack::new();
        pack.add_model("minecraft", "item/stick", "{}");
        pack.add_model("aaa", "block/x", "{}");
        pack.add_model("minecraft", "block/stone", "{}");

        let ids: Vec<String> = pack.model_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(
            ids,
            vec!["aaa:block/x", "minecraft:block/stone", "minecraft:item/stick"]
        );
        assert_eq!(pack.model_count(), 3);
        assert_eq!(pack.namespaces(), vec!["aaa", "minecraft"]);
    }
}
