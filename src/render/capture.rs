//! Frame capture: a still PNG or a rotating GIF turntable.

use super::encode::{encode_gif, encode_png};
use super::rasterizer::render_frame;
use super::{Camera, RenderConfig, RenderContext, RenderMode};
use crate::error::{RenderError, Result};
use std::f32::consts::TAU;
use tracing::debug;

/// Frames in one full turntable revolution.
pub const TURNTABLE_FRAMES: usize = 60;

/// Display time of each turntable frame.
pub const FRAME_DELAY_MS: u32 = 40;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Gif,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
        }
    }
}

/// Encoded image for one model.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    pub frame_count: usize,
}

/// Y rotation of each turntable frame, in radians.
pub fn turntable_angles() -> impl Iterator<Item = f32> {
    (0..TURNTABLE_FRAMES).map(|i| i as f32 * TAU / TURNTABLE_FRAMES as f32)
}

/// Capture a model in the configured mode.
pub fn capture(
    context: &mut RenderContext,
    camera: &Camera,
    config: &RenderConfig,
) -> Result<RenderOutput> {
    match config.mode {
        RenderMode::Still => {
            let frame = render_frame(context, camera, config)?;
            Ok(RenderOutput {
                format: config.mode.output_format(),
                bytes: encode_png(&frame).map_err(capture_failure)?,
                frame_count: 1,
            })
        }
        RenderMode::Turntable => {
            context.set_rotation(0.0);

            let mut frames = Vec::with_capacity(TURNTABLE_FRAMES);
            for angle in turntable_angles() {
                context.set_rotation(angle);
                frames.push(render_frame(context, camera, config)?);
            }
            context.set_rotation(0.0);

            let frame_count = frames.len();
            let bytes = encode_gif(frames, FRAME_DELAY_MS).map_err(capture_failure)?;
            debug!(frames = frame_count, bytes = bytes.len(), "encoded turntable");

            Ok(RenderOutput {
                format: config.mode.output_format(),
                bytes,
                frame_count,
            })
        }
    }
}

fn capture_failure(error: RenderError) -> RenderError {
    match error {
        RenderError::CaptureFailure(_) => error,
        other => RenderError::CaptureFailure(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::{assemble, cuboid, TextureBinding};
    use crate::resource_pack::{ModelElement, TextureData};

    fn cube_context() -> RenderContext {
        let mut binding = TextureBinding::default();
        binding.insert("#t", TextureData::new(1, 1, vec![10, 200, 10, 255]));
        let element: ModelElement = serde_json::from_str(
            r##"{"from": [0, 0, 0], "to": [16, 16, 8],
                 "faces": {"up": {"texture": "#t", "uv": [0, 0, 16, 16]},
                           "north": {"texture": "#t", "uv": [0, 0, 16, 16]}}}"##,
        )
        .unwrap();
        let cuboids = vec![cuboid::build_element(&element, 0, &binding)];
        RenderContext::new(assemble("cube", &cuboids, 0.8).unwrap())
    }

    #[test]
    fn test_turntable_angles() {
        let angles: Vec<f32> = turntable_angles().collect();
        assert_eq!(angles.len(), 60);
        assert_eq!(angles[0], 0.0);
        for (i, angle) in angles.iter().enumerate() {
            assert!((angle - i as f32 * TAU / 60.0).abs() < 1e-6);
        }
        assert!(*angles.last().unwrap() < TAU);
    }

    #[test]
    fn test_still_capture() {
        let mut context = cube_context();
        let config = RenderConfig::default().with_size(32);
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);

        let output = capture(&mut context, &camera, &config).unwrap();
        assert_eq!(output.format, OutputFormat::Png);
        assert_eq!(output.frame_count, 1);

        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn test_turntable_capture() {
        let mut context = cube_context();
        let config = RenderConfig::default()
            .with_mode(RenderMode::Turntable)
            .with_size(16);
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);

        let output = capture(&mut context, &camera, &config).unwrap();
        assert_eq!(output.format, OutputFormat::Gif);
        assert_eq!(output.frame_count, TURNTABLE_FRAMES);
        assert_eq!(&output.bytes[..3], b"GIF");
        assert_eq!(context.rotation_y, 0.0);
    }
}
