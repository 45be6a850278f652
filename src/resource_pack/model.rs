//! Block and item model parsing.
//!
//! Models define the 3D geometry of blocks and items using cuboid elements.

use crate::types::{Direction, ElementRotation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A parsed model from models/*.json.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockModel {
    /// Parent model to inherit from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Whether to use ambient occlusion.
    #[serde(
        default,
        rename = "ambientocclusion",
        skip_serializing_if = "Option::is_none"
    )]
    pub ambient_occlusion: Option<bool>,

    /// Texture variable definitions, in document order.
    ///
    /// Values are usually strings (`"block/stone"`, `"#side"`), but newer packs
    /// may use objects such as `{"sprite": "block/stone"}`.
    #[serde(default)]
    pub textures: Map<String, Value>,

    /// Model elements (cuboids). `Some(vec![])` still overrides a parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ModelElement>>,

    /// Display transforms (not used for icon rendering).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Value>,
}

impl BlockModel {
    /// Check if this model declares its own element list, even an empty one.
    pub fn has_elements(&self) -> bool {
        self.elements.is_some()
    }

    /// The element list, empty when none is declared.
    pub fn elements(&self) -> &[ModelElement] {
        self.elements.as_deref().unwrap_or_default()
    }

    /// Get the string value bound to a texture variable, if it is a string.
    pub fn texture_str(&self, key: &str) -> Option<&str> {
        self.textures.get(key).and_then(Value::as_str)
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<ElementRotation>,
    /// Whether this element receives directional shading.
    #[serde(default = "default_shade")]
    pub shade: bool,
    /// Face definitions. Missing faces are invisible.
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

fn default_shade() -> bool {
    true
}

impl ModelElement {
    /// Get the size of this element in Minecraft coordinates (0-16).
    pub fn size(&self) -> [f32; 3] {
        [
            self.to[0] - self.from[0],
            self.to[1] - self.from[1],
            self.to[2] - self.from[2],
        ]
    }

    /// Get the center of this element in Minecraft coordinates.
    pub fn center(&self) -> [f32; 3] {
        [
            (self.from[0] + self.to[0]) / 2.0,
            (self.from[1] + self.to[1]) / 2.0,
            (self.from[2] + self.to[2]) / 2.0,
        ]
    }

    /// Get the normalized center (a full 0-16 cube is centered on the origin).
    pub fn normalized_center(&self) -> [f32; 3] {
        let c = self.center();
        [c[0] / 16.0 - 0.5, c[1] / 16.0 - 0.5, c[2] / 16.0 - 0.5]
    }

    /// Get the normalized size, floored at `min_extent` on every axis.
    ///
    /// `to < from` is treated like a flat element, never as a flip.
    pub fn normalized_size(&self, min_extent: f32) -> [f32; 3] {
        let s = self.size();
        [
            (s[0] / 16.0).max(min_extent),
            (s[1] / 16.0).max(min_extent),
            (s[2] / 16.0).max(min_extent),
        ]
    }
}

/// A face of a model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFace {
    /// UV coordinates [u1, v1, u2, v2] in 0-16 range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<[f32; 4]>,
    /// Texture reference (e.g., "#side" or "block/stone").
    #[serde(default)]
    pub texture: String,
    /// UV rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub rotation: i32,
}

impl ModelFace {
    /// Get normalized UV coordinates (0-1 range), if the face declares any.
    pub fn normalized_uv(&self) -> Option<[f32; 4]> {
        self.uv
            .map(|uv| [uv[0] / 16.0, uv[1] / 16.0, uv[2] / 16.0, uv[3] / 16.0])
    }
}
