//! Triangle rasterization with depth buffer and texture sampling
//!
//! Provides per-pixel triangle rendering with:
//! - Back-face culling against the vertex normals
//! - Depth testing via z-buffer, offset by each material's depth bias
//! - UV interpolation using barycentric coordinates
//! - Nearest-neighbour sampling with alpha-threshold discard

use super::{Camera, RenderConfig, RenderContext};
use crate::error::{RenderError, Result};
use crate::mesher::Material;
use crate::resource_pack::TextureData;
use glam::Vec3;
use image::{Rgba, RgbaImage};

/// A vertex after projection: screen position, camera depth and UV.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    u: f32,
    v: f32,
}

/// Per-triangle fragment inputs.
struct Fragment<'a> {
    texture: &'a TextureData,
    depth_bias: f32,
    brightness: f32,
    alpha_threshold: f32,
}

/// Render one frame of a model onto a transparent background.
pub fn render_frame(
    context: &RenderContext,
    camera: &Camera,
    config: &RenderConfig,
) -> Result<RgbaImage> {
    let (width, height) = (config.width, config.height);
    if width == 0 || height == 0 {
        return Err(RenderError::CaptureFailure(format!(
            "invalid frame size {}x{}",
            width, height
        )));
    }

    let mut image = RgbaImage::new(width, height);
    let mut depth_buffer = vec![f32::INFINITY; width as usize * height as usize];

    let model = context.model_matrix();
    let view_projection = camera.view_projection_matrix(width, height) * model;
    let model_view = camera.view_matrix() * model;
    let view_direction = camera.view_direction();

    let mesh = &context.assembled.mesh;
    let projected: Vec<ScreenVertex> = mesh
        .vertices
        .iter()
        .map(|vertex| {
            let position = Vec3::from(vertex.position);
            let clip = view_projection * position.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            ScreenVertex {
                x: (ndc.x + 1.0) * 0.5 * width as f32,
                y: (1.0 - ndc.y) * 0.5 * height as f32, // Flip Y axis
                depth: -model_view.transform_point3(position).z,
                u: vertex.uv[0],
                v: vertex.uv[1],
            }
        })
        .collect();

    for (triangle, indices) in mesh.indices.chunks_exact(3).enumerate() {
        let Some(face) = mesh.triangle_face(triangle) else {
            continue;
        };
        let Material::Cutout {
            texture,
            depth_bias,
            shade,
        } = &face.material
        else {
            continue;
        };

        let corners = match [indices[0], indices[1], indices[2]]
            .map(|index| projected.get(index as usize).copied())
        {
            [Some(a), Some(b), Some(c)] => [a, b, c],
            _ => {
                return Err(RenderError::CaptureFailure(format!(
                    "triangle {} references a missing vertex",
                    triangle
                )))
            }
        };

        // Orthographic view: a face is visible when its normal points at the camera
        let Some(vertex) = mesh.vertices.get(indices[0] as usize) else {
            continue;
        };
        let normal = model.transform_vector3(Vec3::from(vertex.normal));
        if normal.dot(view_direction) <= 0.0 {
            continue;
        }

        let brightness = if config.face_shading && *shade {
            face.direction.shade()
        } else {
            1.0
        };

        let fragment = Fragment {
            texture: texture.as_ref(),
            depth_bias: *depth_bias,
            brightness,
            alpha_threshold: config.alpha_threshold,
        };
        render_triangle(&mut image, &mut depth_buffer, &corners, &fragment);
    }

    Ok(image)
}

fn render_triangle(
    image: &mut RgbaImage,
    depth_buffer: &mut [f32],
    corners: &[ScreenVertex; 3],
    fragment: &Fragment<'_>,
) {
    let [p0, p1, p2] = *corners;

    let (width, height) = image.dimensions();
    let min_x = p0.x.min(p1.x).min(p2.x).max(0.0) as u32;
    let max_x = p0.x.max(p1.x).max(p2.x).min(width as f32 - 1.0).max(0.0) as u32;
    let min_y = p0.y.min(p1.y).min(p2.y).max(0.0) as u32;
    let max_y = p0.y.max(p1.y).max(p2.y).min(height as f32 - 1.0).max(0.0) as u32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            let (bary_u, bary_v, bary_w) =
                barycentric_coords(px, py, p0.x, p0.y, p1.x, p1.y, p2.x, p2.y);
            if bary_u < 0.0 || bary_v < 0.0 || bary_w < 0.0 {
                continue;
            }

            // Vertex weights: p0 = w, p1 = v, p2 = u
            let depth = bary_w * p0.depth + bary_v * p1.depth + bary_u * p2.depth;
            let depth = depth - fragment.depth_bias;
            let buffer_index = y as usize * width as usize + x as usize;
            if depth >= depth_buffer[buffer_index] {
                continue;
            }

            let tex_u = bary_w * p0.u + bary_v * p1.u + bary_u * p2.u;
            let tex_v = bary_w * p0.v + bary_v * p1.v + bary_u * p2.v;
            let texel = fragment.texture.sample_nearest(tex_u, tex_v);

            if (texel[3] as f32 / 255.0) < fragment.alpha_threshold {
                continue;
            }

            let shade =
                |c: u8| (c as f32 * fragment.brightness).round().clamp(0.0, 255.0) as u8;
            let color = Rgba([shade(texel[0]), shade(texel[1]), shade(texel[2]), 255]);
            image.put_pixel(x, y, color);
            depth_buffer[buffer_index] = depth;
        }
    }
}

/// Calculate barycentric coordinates for a point relative to a triangle
///
/// Returns (u, v, w) where u weights vertex 2, v weights vertex 1 and
/// w = 1 - u - v weights vertex 0. Degenerate triangles report the point as
/// outside.
#[allow(clippy::too_many_arguments)]
fn barycentric_coords(
    px: f32,
    py: f32,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
) -> (f32, f32, f32) {
    let v0x = x2 - x0;
    let v0y = y2 - y0;
    let v1x = x1 - x0;
    let v1y = y1 - y0;
    let v2x = px - x0;
    let v2y = py - y0;

    let dot00 = v0x * v0x + v0y * v0y;
    let dot01 = v0x * v1x + v0y * v1y;
    let dot02 = v0x * v2x + v0y * v2y;
    let dot11 = v1x * v1x + v1y * v1y;
    let dot12 = v1x * v2x + v1y * v2y;

    let denom = dot00 * dot11 - dot01 * dot01;

    const EPSILON: f32 = 1e-10;
    if denom.abs() < EPSILON {
        return (-1.0, -1.0, -1.0);
    }

    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;
    let w = 1.0 - u - v;

    (u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::{assemble, cuboid, TextureBinding};
    use crate::resource_pack::ModelElement;
    use crate::types::Direction;

    fn solid(color: [u8; 4]) -> TextureData {
        TextureData::new(1, 1, color.to_vec())
    }

    fn context(elements: &str, binding: &TextureBinding) -> RenderContext {
        let elements: Vec<ModelElement> = serde_json::from_str(elements).unwrap();
        let cuboids: Vec<_> = elements
            .iter()
            .enumerate()
            .map(|(i, e)| cuboid::build_element(e, i, binding))
            .collect();
        RenderContext::new(assemble("test", &cuboids, 0.8).unwrap())
    }

    fn all_faces(texture: &str) -> String {
        let face = format!(r#"{{"texture": "{}", "uv": [0, 0, 16, 16]}}"#, texture);
        format!(
            r#"{{"up": {f}, "down": {f}, "north": {f}, "south": {f}, "east": {f}, "west": {f}}}"#,
            f = face
        )
    }

    fn center_pixel(image: &RgbaImage) -> [u8; 4] {
        image.get_pixel(image.width() / 2, image.height() / 2).0
    }

    #[test]
    fn test_barycentric_coords() {
        let (u, v, w) = barycentric_coords(5.0, 5.0, 0.0, 0.0, 10.0, 0.0, 5.0, 10.0);
        assert!((u + v + w - 1.0).abs() < 0.001);
        assert!(u >= 0.0 && v >= 0.0 && w >= 0.0);

        // Collinear points are never inside
        let (u, v, w) = barycentric_coords(5.0, 5.0, 0.0, 0.0, 5.0, 5.0, 10.0, 10.0);
        assert!(u < 0.0 || v < 0.0 || w < 0.0);
    }

    #[test]
    fn test_cube_draws_shaded_faces_on_transparent_background() {
        let mut binding = TextureBinding::default();
        binding.insert("#t", solid([200, 200, 200, 255]));
        let ctx = context(
            &format!(
                r#"[{{"from": [0,0,0], "to": [16,16,16], "faces": {}}}]"#,
                all_faces("#t")
            ),
            &binding,
        );

        let config = RenderConfig::default().with_size(64);
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);
        let image = render_frame(&ctx, &camera, &config).unwrap();

        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(image.get_pixel(63, 63).0, [0, 0, 0, 0]);

        // Middle of the frame is the silhouette; the top face is unshaded
        assert_eq!(center_pixel(&image)[3], 255);
        let top = image.get_pixel(32, 20).0;
        assert_eq!(top, [200, 200, 200, 255]);

        let mut shades: Vec<u8> = image
            .pixels()
            .filter(|p| p.0[3] == 255)
            .map(|p| p.0[0])
            .collect();
        shades.sort_unstable();
        shades.dedup();
        // up 1.0, north 0.8, west 0.6
        assert_eq!(shades, vec![120, 160, 200]);
    }

    #[test]
    fn test_face_shading_disabled() {
        let mut binding = TextureBinding::default();
        binding.insert("#t", solid([200, 200, 200, 255]));
        let ctx = context(
            &format!(
                r#"[{{"from": [0,0,0], "to": [16,16,16], "faces": {}}}]"#,
                all_faces("#t")
            ),
            &binding,
        );

        let config = RenderConfig::default().with_size(64).with_face_shading(false);
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);
        let image = render_frame(&ctx, &camera, &config).unwrap();

        assert!(image
            .pixels()
            .filter(|p| p.0[3] == 255)
            .all(|p| p.0 == [200, 200, 200, 255]));
    }

    #[test]
    fn test_alpha_threshold_discards_texels() {
        let mut binding = TextureBinding::default();
        binding.insert("#glass", solid([255, 255, 255, 10]));
        let ctx = context(
            &format!(
                r#"[{{"from": [0,0,0], "to": [16,16,16], "faces": {}}}]"#,
                all_faces("#glass")
            ),
            &binding,
        );

        let config = RenderConfig::default().with_size(32);
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);
        let image = render_frame(&ctx, &camera, &config).unwrap();
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_later_coplanar_element_wins() {
        let mut binding = TextureBinding::default();
        binding.insert("#red", solid([255, 0, 0, 255]));
        binding.insert("#blue", solid([0, 0, 255, 255]));
        let ctx = context(
            &format!(
                r#"[
                    {{"from": [0,0,0], "to": [16,16,16], "faces": {}}},
                    {{"from": [0,0,0], "to": [16,16,16], "faces": {}}}
                ]"#,
                all_faces("#red"),
                all_faces("#blue")
            ),
            &binding,
        );

        let config = RenderConfig::default().with_size(64).with_face_shading(false);
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);
        let image = render_frame(&ctx, &camera, &config).unwrap();
        assert_eq!(center_pixel(&image), [0, 0, 255, 255]);
    }

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const YELLOW: [u8; 4] = [255, 255, 0, 255];

    /// 2x2 texture: red top-left, green top-right, blue bottom-left, yellow bottom-right.
    fn quadrants() -> TextureData {
        TextureData::new(2, 2, [RED, GREEN, BLUE, YELLOW].concat())
    }

    /// Pixel that a model-space point lands on.
    fn pixel_at(ctx: &RenderContext, camera: &Camera, size: u32, point: [f32; 3]) -> (u32, u32) {
        let clip = camera.view_projection_matrix(size, size)
            * ctx.model_matrix()
            * Vec3::from(point).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * size as f32;
        let y = (1.0 - ndc.y) * 0.5 * size as f32;
        (x as u32, y as u32)
    }

    fn quadrant_cube(rotation: i32) -> (RenderContext, RgbaImage, Camera, u32) {
        let mut binding = TextureBinding::default();
        binding.insert("#q", quadrants());
        let face = format!(
            r##"{{"texture": "#q", "uv": [0, 0, 16, 16], "rotation": {}}}"##,
            rotation
        );
        let ctx = context(
            &format!(
                r#"[{{"from": [0,0,0], "to": [16,16,16],
                     "faces": {{"north": {f}, "west": {f}, "up": {f}}}}}]"#,
                f = face
            ),
            &binding,
        );

        let size = 128;
        let config = RenderConfig::default()
            .with_size(size)
            .with_face_shading(false);
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);
        let image = render_frame(&ctx, &camera, &config).unwrap();
        (ctx, image, camera, size)
    }

    /// Quadrant centers of a face, as (top-left, top-right, bottom-left, bottom-right).
    fn face_quadrants(direction: Direction) -> [[f32; 3]; 4] {
        match direction {
            // Seen from -Z: left is +X
            Direction::North => [
                [0.25, 0.25, -0.5],
                [-0.25, 0.25, -0.5],
                [0.25, -0.25, -0.5],
                [-0.25, -0.25, -0.5],
            ],
            // Seen from -X: left is -Z
            Direction::West => [
                [-0.5, 0.25, -0.25],
                [-0.5, 0.25, 0.25],
                [-0.5, -0.25, -0.25],
                [-0.5, -0.25, 0.25],
            ],
            // Seen from above with north at the top
            Direction::Up => [
                [-0.25, 0.5, -0.25],
                [0.25, 0.5, -0.25],
                [-0.25, 0.5, 0.25],
                [0.25, 0.5, 0.25],
            ],
            _ => unreachable!(),
        }
    }

    fn sampled_quadrants(rotation: i32) -> Vec<(Direction, [[u8; 4]; 4])> {
        let (ctx, image, camera, size) = quadrant_cube(rotation);
        [Direction::North, Direction::West, Direction::Up]
            .into_iter()
            .map(|direction| {
                let colors = face_quadrants(direction).map(|point| {
                    let (x, y) = pixel_at(&ctx, &camera, size, point);
                    image.get_pixel(x, y).0
                });
                (direction, colors)
            })
            .collect()
    }

    #[test]
    fn test_texture_quadrants_land_on_face_quadrants() {
        for (direction, colors) in sampled_quadrants(0) {
            assert_eq!(colors, [RED, GREEN, BLUE, YELLOW], "{} face", direction);
        }
    }

    #[test]
    fn test_face_rotation_turns_texture_clockwise() {
        // Rotated 90 degrees clockwise: bottom-left moves to the top-left
        for (direction, colors) in sampled_quadrants(90) {
            assert_eq!(colors, [BLUE, RED, YELLOW, GREEN], "{} face", direction);
        }
    }

    #[test]
    fn test_zero_size_frame() {
        let ctx = context(
            r#"[{"from": [0,0,0], "to": [16,16,16], "faces": {}}]"#,
            &TextureBinding::default(),
        );
        let config = RenderConfig::default().with_size(0);
        let camera = Camera::orbit(225.0, 30.0);
        assert!(matches!(
            render_frame(&ctx, &camera, &config),
            Err(RenderError::CaptureFailure(_))
        ));
    }
}
