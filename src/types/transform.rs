//! Element pivot rotation.

use super::Axis;
use serde::{Deserialize, Serialize};

/// Element-level rotation from model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 Minecraft coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub angle: f32,
    /// Whether to rescale the element after rotation.
    #[serde(default)]
    pub rescale: bool,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Convert origin from Minecraft coordinates (0-16) to normalized (-0.5 to 0.5).
    pub fn normalized_origin(&self) -> [f32; 3] {
        [
            self.origin[0] / 16.0 - 0.5,
            self.origin[1] / 16.0 - 0.5,
            self.origin[2] / 16.0 - 0.5,
        ]
    }

    /// Get the angle in radians.
    pub fn angle_radians(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Per-axis scale applied after rotation.
    ///
    /// With `rescale` the two axes perpendicular to the rotation axis are
    /// stretched by `1 / cos(angle)`; the rotation axis itself is untouched.
    pub fn rescale_vector(&self) -> [f32; 3] {
        if !self.rescale {
            return [1.0, 1.0, 1.0];
        }

        let cos = self.angle_radians().cos().abs();
        if cos < 1e-4 {
            return [1.0, 1.0, 1.0];
        }
        let factor = 1.0 / cos;

        match self.axis {
            Axis::X => [1.0, factor, factor],
            Axis::Y => [factor, 1.0, factor],
            Axis::Z => [factor, factor, 1.0],
        }
    }
}
