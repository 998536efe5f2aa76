//! Image decode/measure service shared by the renderers.
#![allow(dead_code)]

use std::io::Cursor;

use image::{GenericImageView, ImageFormat, ImageReader};

use crate::models::Photo;
use crate::render::RenderError;

/// A photo decoded to 8-bit RGB pixels.
pub struct DecodedImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

fn load(photo: &Photo) -> Result<image::DynamicImage, RenderError> {
    if photo.data.is_empty() {
        return Err(RenderError::ImageDecode(format!(
            "photo '{}' has no image data",
            photo.name
        )));
    }

    ImageReader::new(Cursor::new(&photo.data[..]))
        .with_guessed_format()
        .map_err(|e| RenderError::ImageDecode(format!("'{}': {e}", photo.name)))?
        .decode()
        .map_err(|e| RenderError::ImageDecode(format!("'{}': {e}", photo.name)))
}

pub fn decode_photo(photo: &Photo) -> Result<DecodedImage, RenderError> {
    let img = load(photo)?;
    let (width_px, height_px) = img.dimensions();
    if width_px == 0 || height_px == 0 {
        return Err(RenderError::ImageDecode(format!(
            "'{}' has zero dimensions",
            photo.name
        )));
    }

    Ok(DecodedImage {
        width_px,
        height_px,
        rgb: img.to_rgb8().into_raw(),
    })
}

/// Pixel dimensions of a photo, or an error if its bytes are not a decodable image.
pub fn measure_photo(photo: &Photo) -> Result<(u32, u32), RenderError> {
    decode_photo(photo).map(|d| (d.width_px, d.height_px))
}

/// Decodes and re-encodes as PNG, for surfaces that embed a file rather than pixels.
pub fn photo_as_png(photo: &Photo) -> Result<(Vec<u8>, u32, u32), RenderError> {
    let img = load(photo)?;
    let (width, height) = img.dimensions();
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| RenderError::ImageDecode(format!("'{}': {e}", photo.name)))?;
    Ok((png, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::{corrupt_photo, good_photo};

    #[test]
    fn test_decode_valid_png() {
        let decoded = decode_photo(&good_photo("ok.png")).unwrap();
        assert_eq!((decoded.width_px, decoded.height_px), (8, 6));
        assert_eq!(decoded.rgb.len(), 8 * 6 * 3);
    }

    #[test]
    fn test_measure_rejects_corrupt_bytes() {
        let err = measure_photo(&corrupt_photo("bad.jpg")).unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode(_)));
        assert!(err.to_string().contains("bad.jpg"));
    }

    #[test]
    fn test_empty_data_is_an_error() {
        let photo = Photo::new("empty.jpg", Vec::new());
        assert!(matches!(
            decode_photo(&photo),
            Err(RenderError::ImageDecode(_))
        ));
    }

    #[test]
    fn test_photo_as_png_round_trips_dimensions() {
        let (png, w, h) = photo_as_png(&good_photo("ok.png")).unwrap();
        assert_eq!((w, h), (8, 6));
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
