//! Texture variable resolution.
//!
//! Follows `#variable` indirections through a model's texture map and turns
//! the final value into a concrete texture location.

use crate::error::{RenderError, Result};
use crate::resource_pack::{parse_resource_location, ResourceLocation, DEFAULT_NAMESPACE};
use serde_json::{Map, Value};

/// Maximum number of `#variable` hops before giving up.
pub const MAX_TEXTURE_INDIRECTION: usize = 10;

/// Marker starting a reference to another texture variable.
const INDIRECTION_MARKER: char = '#';

/// Pseudo-reference resolved against the model's own texture directory.
const CONTEXTUAL_PREFIX: &str = "items_displayed:";

/// Namespace and directory inferred from a model's concrete texture entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureContext {
    pub namespace: String,
    /// Directory prefix including the trailing `/` (empty if none was found).
    pub directory: String,
}

impl TextureContext {
    /// Infer the context from the first plain, concrete texture path that
    /// contains a directory, scanning in document order.
    pub fn infer(textures: &Map<String, Value>) -> Self {
        let candidate = textures.values().filter_map(Value::as_str).find(|value| {
            !value.starts_with(INDIRECTION_MARKER)
                && !value.starts_with(CONTEXTUAL_PREFIX)
                && value.contains('/')
        });

        match candidate {
            Some(value) => {
                let (namespace, path) = parse_resource_location(value);
                let directory = match path.rfind('/') {
                    Some(idx) => &path[..=idx],
                    None => "",
                };
                Self {
                    namespace: namespace.to_string(),
                    directory: directory.to_string(),
                }
            }
            None => Self {
                namespace: DEFAULT_NAMESPACE.to_string(),
                directory: String::new(),
            },
        }
    }
}

/// Resolves texture references for one merged model.
pub struct TextureResolver<'a> {
    textures: &'a Map<String, Value>,
    context: TextureContext,
}

impl<'a> TextureResolver<'a> {
    pub fn new(textures: &'a Map<String, Value>) -> Self {
        Self {
            textures,
            context: TextureContext::infer(textures),
        }
    }

    pub fn context(&self) -> &TextureContext {
        &self.context
    }

    /// Resolve a face reference: `#variable` or a direct texture path.
    pub fn resolve_reference(&self, reference: &str) -> Result<ResourceLocation> {
        match reference.strip_prefix(INDIRECTION_MARKER) {
            Some(key) => self.resolve_variable(key),
            None => self.concrete(reference),
        }
    }

    /// Resolve a texture variable (without the `#`) to a concrete location.
    pub fn resolve_variable(&self, key: &str) -> Result<ResourceLocation> {
        let mut current = key;
        let mut hops = 0;

        loop {
            let value = self.textures.get(current).ok_or_else(|| {
                let detail = format!("#{} (undefined variable #{})", key, current);
                RenderError::TextureUnresolved(detail)
            })?;

            match value {
                Value::String(s) => match s.strip_prefix(INDIRECTION_MARKER) {
                    Some(next) => {
                        if hops == MAX_TEXTURE_INDIRECTION {
                            let detail = format!("#{}", key);
                            return Err(RenderError::TextureIndirectionExceeded(detail));
                        }
                        hops += 1;
                        current = next;
                    }
                    None => return self.concrete(s),
                },
                Value::Object(obj) => {
                    return match obj.get("sprite").and_then(Value::as_str) {
                        Some(sprite) => self.concrete(sprite),
                        None => Err(RenderError::TextureUnresolved(format!(
                            "#{} (object without sprite)",
                            key
                        ))),
                    };
                }
                _ => {
                    return Err(RenderError::TextureUnresolved(format!(
                        "#{} (unsupported value {})",
                        key, value
                    )))
                }
            }
        }
    }

    /// Turn a concrete value into a location, expanding the contextual pseudo-reference.
    fn concrete(&self, value: &str) -> Result<ResourceLocation> {
        if let Some(name) = value.strip_prefix(CONTEXTUAL_PREFIX) {
            return Ok(ResourceLocation::new(
                self.context.namespace.as_str(),
                format!("{}{}", self.context.directory, name),
            ));
        }

        if value.is_empty() {
            return Err(RenderError::TextureUnresolved("empty texture path".to_string()));
        }

        Ok(ResourceLocation::parse(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn textures(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    /// v0 -> #v1 -> ... -> #vk -> "block/end"
    fn chain(k: usize) -> Map<String, Value> {
        let mut map = Map::new();
        for i in 0..k {
            map.insert(format!("v{}", i), Value::String(format!("#v{}", i + 1)));
        }
        map.insert(format!("v{}", k), Value::String("block/end".to_string()));
        map
    }

    #[test]
    fn test_direct_path() {
        let map = textures(json!({"all": "block/stone"}));
        let resolver = TextureResolver::new(&map);

        assert_eq!(
            resolver.resolve_reference("#all").unwrap(),
            ResourceLocation::new("minecraft", "block/stone")
        );
        assert_eq!(
            resolver.resolve_reference("mymod:block/dirt").unwrap(),
            ResourceLocation::new("mymod", "block/dirt")
        );
    }

    #[test]
    fn test_indirection_within_bound() {
        for k in [1, 5, MAX_TEXTURE_INDIRECTION] {
            let map = chain(k);
            let resolver = TextureResolver::new(&map);
            assert_eq!(
                resolver.resolve_variable("v0").unwrap(),
                ResourceLocation::new("minecraft", "block/end"),
                "chain of {} hops",
                k
            );
        }
    }

    #[test]
    fn test_indirection_exceeded() {
        let map = chain(MAX_TEXTURE_INDIRECTION + 1);
        let resolver = TextureResolver::new(&map);
        assert!(matches!(
            resolver.resolve_variable("v0"),
            Err(RenderError::TextureIndirectionExceeded(_))
        ));
    }

    #[test]
    fn test_cycle_terminates() {
        let map = textures(json!({"a": "#b", "b": "#a"}));
        let resolver = TextureResolver::new(&map);
        assert!(matches!(
            resolver.resolve_reference("#a"),
            Err(RenderError::TextureIndirectionExceeded(_))
        ));
    }

    #[test]
    fn test_undefined_variable() {
        let map = textures(json!({"side": "#missing"}));
        let resolver = TextureResolver::new(&map);
        assert!(matches!(
            resolver.resolve_reference("#side"),
            Err(RenderError::TextureUnresolved(_))
        ));
    }

    #[test]
    fn test_contextual_reference() {
        let map = textures(json!({
            "particle": "#front",
            "front": "items_displayed:gear_front",
            "flat": "stone",
            "side": "mymod:block/machines/casing",
            "top": "block/other/top"
        }));
        let resolver = TextureResolver::new(&map);

        assert_eq!(
            resolver.context(),
            &TextureContext {
                namespace: "mymod".to_string(),
                directory: "block/machines/".to_string(),
            }
        );
        assert_eq!(
            resolver.resolve_reference("#particle").unwrap(),
            ResourceLocation::new("mymod", "block/machines/gear_front")
        );
    }

    #[test]
    fn test_contextual_reference_without_context() {
        let map = textures(json!({"front": "items_displayed:gear"}));
        let resolver = TextureResolver::new(&map);
        assert_eq!(
            resolver.resolve_reference("#front").unwrap(),
            ResourceLocation::new("minecraft", "gear")
        );
    }

    #[test]
    fn test_sprite_object() {
        let map = textures(json!({
            "all": {"sprite": "block/glass", "force_translucent": true},
            "bad": 5
        }));
        let resolver = TextureResolver::new(&map);

        assert_eq!(
            resolver.resolve_reference("#all").unwrap(),
            ResourceLocation::new("minecraft", "block/glass")
        );
        assert!(resolver.resolve_reference("#bad").is_err());
        // Objects never provide the contextual directory
        assert_eq!(resolver.context().directory, "");
    }
}
