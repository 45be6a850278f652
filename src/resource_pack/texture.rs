//! Texture decoding and texel access.

/// Raw texture data decoded from PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
    /// Whether this texture is a vertical animation strip.
    pub is_animated: bool,
    /// Animation frame count (1 if not animated).
    pub frame_count: u32,
}

impl TextureData {
    /// Create a new texture from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
            is_animated: false,
            frame_count: 1,
        }
    }

    /// Get a pixel at (x, y), origin at the top-left.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Nearest-neighbour sample at texture coordinates with a bottom-left origin.
    ///
    /// `v = 1` is the top row of the image, matching the UVs produced by the
    /// cuboid builder. Coordinates outside 0-1 clamp to the edge.
    pub fn sample_nearest(&self, u: f32, v: f32) -> [u8; 4] {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }

        let x = (u * self.width as f32).floor();
        let y = ((1.0 - v) * self.height as f32).floor();
        let x = (x.max(0.0) as u32).min(self.width - 1);
        let y = (y.max(0.0) as u32).min(self.height - 1);
        self.get_pixel(x, y)
    }

    /// Get the first frame of an animated texture (or the whole texture if not animated).
    pub fn first_frame(self) -> TextureData {
        if !self.is_animated || self.frame_count <= 1 {
            return self;
        }

        let frame_height = self.height / self.frame_count;
        let frame_size = (self.width * frame_height * 4) as usize;

        Self {
            width: self.width,
            height: frame_height,
            pixels: self.pixels[..frame_size].to_vec(),
            is_animated: false,
            frame_count: 1,
        }
    }
}

/// Load a texture from PNG bytes.
pub fn load_texture_from_bytes(data: &[u8]) -> Result<TextureData, image::ImageError> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    // Animation strips are taller than wide, with height a multiple of width
    let is_animated = width > 0 && height > width && height % width == 0;
    let frame_count = if is_animated { height / width } else { 1 };

    Ok(TextureData {
        width,
        height,
        pixels: rgba.into_raw(),
        is_animated,
        frame_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_texture() -> TextureData {
        // red, green / blue, white
        TextureData::new(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255,
            ],
        )
    }

    #[test]
    fn test_get_pixel() {
        let tex = quad_texture();

        assert_eq!(tex.get_pixel(0, 0), [255, 0, 0, 255]); // Red
        assert_eq!(tex.get_pixel(1, 0), [0, 255, 0, 255]); // Green
        assert_eq!(tex.get_pixel(0, 1), [0, 0, 255, 255]); // Blue
        assert_eq!(tex.get_pixel(1, 1), [255, 255, 255, 255]); // White
    }

    #[test]
    fn test_sample_nearest_flips_v() {
        let tex = quad_texture();

        // v close to 1 is the top row
        assert_eq!(tex.sample_nearest(0.25, 0.75), [255, 0, 0, 255]);
        assert_eq!(tex.sample_nearest(0.75, 0.75), [0, 255, 0, 255]);
        assert_eq!(tex.sample_nearest(0.25, 0.25), [0, 0, 255, 255]);
        // Edges clamp instead of wrapping
        assert_eq!(tex.sample_nearest(1.0, 0.0), [255, 255, 255, 255]);
        assert_eq!(tex.sample_nearest(-0.5, 1.5), [255, 0, 0, 255]);
    }

    #[test]
    fn test_first_frame_of_strip() {
        let mut pixels = vec![10u8; 4];
        pixels.extend_from_slice(&[20u8; 4]);
        let strip = TextureData {
            width: 1,
            height: 2,
            pixels,
            is_animated: true,
            frame_count: 2,
        };

        let frame = strip.first_frame();
        assert_eq!(frame.height, 1);
        assert_eq!(frame.get_pixel(0, 0), [10, 10, 10, 10]);
    }

    #[test]
    fn test_load_png_bytes() {
        let mut img = image::RgbaImage::new(4, 8);
        img.put_pixel(0, 0, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let tex = load_texture_from_bytes(&bytes).unwrap();
        assert_eq!((tex.width, tex.height), (4, 8));
        assert!(tex.is_animated);
        assert_eq!(tex.frame_count, 2);
        assert_eq!(tex.get_pixel(0, 0), [1, 2, 3, 255]);
    }
}
