use crate::sketch::render::RgbaBuffer;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use std::io::Cursor;

/// Rewrites every pixel that is not fully opaque to opaque white, in place.
/// The recognizer expects ink on a white page, not on transparency; the live
/// surface is mutated by this step, matching what the user then sees.
pub fn flatten_alpha_to_white(buffer: &mut RgbaBuffer) {
    for px in buffer.pixels.chunks_exact_mut(4) {
        if px[3] < 255 {
            px[0] = 255;
            px[1] = 255;
            px[2] = 255;
            px[3] = 255;
        }
    }
}

/// Encodes the buffer as a PNG and wraps it in base64 (no data-URL prefix).
pub fn encode_png_base64(buffer: &RgbaBuffer) -> Result<String> {
    let mut png = Vec::new();
    PngEncoder::new(Cursor::new(&mut png))
        .write_image(
            &buffer.pixels,
            buffer.width,
            buffer.height,
            ColorType::Rgba8,
        )
        .context("encode canvas snapshot as png")?;
    Ok(STANDARD.encode(&png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::model::Color;

    #[test]
    fn flatten_leaves_no_translucent_pixel() {
        // one opaque ink pixel, one translucent, the rest transparent
        let mut pixels = vec![0u8; 4 * 4 * 4];
        pixels[0..4].copy_from_slice(&[0, 0, 0, 255]);
        pixels[4..8].copy_from_slice(&[10, 20, 30, 128]);
        let mut buffer = RgbaBuffer::from_pixels(4, 4, pixels);

        flatten_alpha_to_white(&mut buffer);

        assert!(buffer.pixels.chunks_exact(4).all(|px| px[3] == 255));
        assert_eq!(buffer.pixel(0, 0), Color::BLACK);
        assert_eq!(buffer.pixel(1, 0), Color::WHITE);
        assert_eq!(buffer.pixel(2, 0), Color::WHITE);
    }

    #[test]
    fn all_transparent_canvas_flattens_to_all_white() {
        let mut buffer = RgbaBuffer::new(8, 8);
        flatten_alpha_to_white(&mut buffer);
        assert!(buffer
            .pixels
            .chunks_exact(4)
            .all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn encoded_snapshot_decodes_back_fully_opaque() {
        let mut buffer = RgbaBuffer::new(8, 8);
        flatten_alpha_to_white(&mut buffer);

        let encoded = encode_png_base64(&buffer).expect("encode");
        let bytes = STANDARD.decode(encoded).expect("base64");
        let decoded = image::load_from_memory(&bytes).expect("png").to_rgba8();
        assert!(decoded.pixels().all(|px| px.0[3] == 255));
    }
}
