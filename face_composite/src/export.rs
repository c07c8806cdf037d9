use crate::error::CompositeError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::path::Path;

pub mod export {
    use super::*;

    /// Encodes a composite as an 8-bit RGB PNG.
    pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, CompositeError> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(bytes)
    }

    /// Writes a composite to `path` as PNG, whatever the extension says.
    pub fn save_png(image: &RgbImage, path: impl AsRef<Path>) -> Result<(), CompositeError> {
        let bytes = encode_png(image)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// A `data:image/png;base64,...` URL, ready for an `<img src>`.
    pub fn to_data_url(image: &RgbImage) -> Result<String, CompositeError> {
        let bytes = encode_png(image)?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::export::*;
    use super::*;
    use image::Rgb;

    fn sample() -> RgbImage {
        let mut image = RgbImage::from_pixel(8, 6, Rgb([245, 245, 245]));
        image.put_pixel(3, 2, Rgb([0, 0, 0]));
        image.put_pixel(7, 5, Rgb([139, 0, 0]));
        image
    }

    #[test]
    fn png_bytes_decode_to_the_same_pixels() {
        let bytes = encode_png(&sample()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn data_url_carries_the_png() {
        let url = to_data_url(&sample()).unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        assert_eq!(bytes, encode_png(&sample()).unwrap());
    }

    #[test]
    fn save_png_writes_a_readable_file() {
        let path = std::env::temp_dir().join(format!("face_composite_export_{}.png", std::process::id()));
        save_png(&sample(), &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(decoded, sample());
    }
}
