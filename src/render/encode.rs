//! Image export (PNG and GIF)

use crate::error::Result;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat, RgbaImage};

/// Export an RGBA image to PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image.write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

/// Export a sequence of RGBA images as a looping animated GIF
pub fn encode_gif(frames: Vec<RgbaImage>, frame_delay_ms: u32) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder.set_repeat(Repeat::Infinite)?;

        for frame_image in frames {
            let frame = Frame::from_parts(
                frame_image,
                0,
                0,
                Delay::from_numer_denom_ms(frame_delay_ms, 1),
            );
            encoder.encode_frame(frame)?;
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgba};

    fn checker(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn test_png_is_readable() {
        let bytes = encode_png(&checker(8)).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0[3], 0);
    }

    #[test]
    fn test_gif_frames_and_delay() {
        let frames = vec![checker(4), checker(4), checker(4)];
        let bytes = encode_gif(frames, 40).unwrap();

        let decoder = GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 3);

        let (numer, denom) = frames[0].delay().numer_denom_ms();
        assert_eq!(numer / denom, 40);
    }
}
