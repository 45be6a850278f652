//! Software rendering of assembled meshes into PNG stills and GIF turntables.

pub mod camera;
pub mod capture;
pub mod encode;
pub mod rasterizer;

pub use camera::Camera;
pub use capture::{
    capture, turntable_angles, OutputFormat, RenderOutput, FRAME_DELAY_MS, TURNTABLE_FRAMES,
};

use crate::mesher::{AssembledMesh, DEFAULT_MARGIN};
use std::str::FromStr;

/// What to produce for each model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One frame, PNG.
    #[default]
    Still,
    /// 60 frames rotating about Y, looping GIF.
    Turntable,
}

impl RenderMode {
    /// Encoding used for this mode's output.
    pub fn output_format(&self) -> OutputFormat {
        match self {
            RenderMode::Still => OutputFormat::Png,
            RenderMode::Turntable => OutputFormat::Gif,
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "still" => Ok(RenderMode::Still),
            "turntable" => Ok(RenderMode::Turntable),
            other => Err(format!(
                "unknown render mode '{}' (expected 'still' or 'turntable')",
                other
            )),
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Still => write!(f, "still"),
            RenderMode::Turntable => write!(f, "turntable"),
        }
    }
}

/// Rendering configuration, fixed for a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub mode: RenderMode,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Camera azimuth in degrees.
    pub azimuth_deg: f32,
    /// Camera elevation in degrees.
    pub elevation_deg: f32,
    /// Fraction of the view filled by the largest model dimension.
    pub margin: f32,
    /// Texels with alpha below this (0-1) are discarded.
    pub alpha_threshold: f32,
    /// Apply fixed per-direction face brightness.
    pub face_shading: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Still,
            width: 256,
            height: 256,
            azimuth_deg: 225.0,
            elevation_deg: 30.0,
            margin: DEFAULT_MARGIN,
            alpha_threshold: 0.1,
            face_shading: true,
        }
    }
}

impl RenderConfig {
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set a square output size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.width = size;
        self.height = size;
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_camera_angles(mut self, azimuth_deg: f32, elevation_deg: f32) -> Self {
        self.azimuth_deg = azimuth_deg;
        self.elevation_deg = elevation_deg;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_alpha_threshold(mut self, alpha_threshold: f32) -> Self {
        self.alpha_threshold = alpha_threshold;
        self
    }

    pub fn with_face_shading(mut self, face_shading: bool) -> Self {
        self.face_shading = face_shading;
        self
    }
}

/// Everything needed to draw one model: its mesh and the turntable angle.
///
/// Owned for the duration of one model's capture, then dropped.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub assembled: AssembledMesh,
    /// Rotation about Y in radians.
    pub rotation_y: f32,
}

impl RenderContext {
    pub fn new(assembled: AssembledMesh) -> Self {
        Self {
            assembled,
            rotation_y: 0.0,
        }
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation_y = radians;
    }

    /// Model matrix: fit scale, then the turntable rotation.
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_y(self.rotation_y)
            * glam::Mat4::from_scale(glam::Vec3::splat(self.assembled.view_scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_parsing() {
        assert_eq!("still".parse::<RenderMode>(), Ok(RenderMode::Still));
        assert_eq!("Turntable".parse::<RenderMode>(), Ok(RenderMode::Turntable));
        assert!("spin".parse::<RenderMode>().is_err());

        assert_eq!(RenderMode::Still.output_format().extension(), "png");
        assert_eq!(RenderMode::Turntable.output_format().extension(), "gif");
    }

    #[test]
    fn test_config_builders() {
        let config = RenderConfig::default()
            .with_mode(RenderMode::Turntable)
            .with_size(64)
            .with_face_shading(false);

        assert_eq!(config.mode, RenderMode::Turntable);
        assert_eq!((config.width, config.height), (64, 64));
        assert!(!config.face_shading);
        assert_eq!(config.azimuth_deg, 225.0);
        assert_eq!(config.elevation_deg, 30.0);
        assert_eq!(config.alpha_threshold, 0.1);
    }
}
