//! Recipe image payload handling.
//!
//! Clients send images inline as `data:image/<fmt>;base64,<payload>` URIs.
//! The bytes are validated here and handed to the store together with the
//! recipe rows; the recipe then keeps an `/api/images/{id}` reference instead
//! of the payload.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, ImageReader};

use uuid::Uuid;

use crate::error::CatalogError;
use crate::types::{DecodedImage, RecipeImage};

/// Allowed image formats for recipe images.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum decoded image size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// URL prefix under which stored images are served.
pub const IMAGE_URL_PREFIX: &str = "/api/images/";

/// Longest image reference a recipe row holds (`recipes.image VARCHAR(255)`).
pub const MAX_REFERENCE_LEN: usize = 255;

/// Reference under which a stored image is served.
pub fn image_url(id: Uuid) -> String {
    format!("{}{}", IMAGE_URL_PREFIX, id)
}

/// The stored image a reference points at, if it is one of ours.
pub fn stored_image_id(reference: &str) -> Option<Uuid> {
    reference.strip_prefix(IMAGE_URL_PREFIX)?.parse().ok()
}

/// Validate image data: check format is allowed and detect content type.
pub fn validate_image(data: &[u8]) -> Result<String, String> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    Ok(format.to_mime_type().to_string())
}

/// Decode an inline `data:image/...;base64,` payload.
///
/// Returns `Ok(None)` when `input` is not a data URI.
pub fn decode_data_uri(input: &str) -> Result<Option<DecodedImage>, CatalogError> {
    if !input.starts_with("data:image") {
        return Ok(None);
    }

    let (_, payload) = input
        .split_once(";base64,")
        .ok_or_else(|| CatalogError::validation("Image data URI must be base64 encoded"))?;

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| CatalogError::validation(format!("Invalid base64 image data: {}", e)))?;

    if data.len() > MAX_FILE_SIZE {
        return Err(CatalogError::validation(format!(
            "Image too large: {} bytes (max {})",
            data.len(),
            MAX_FILE_SIZE
        )));
    }

    // The declared MIME type is ignored in favour of what the bytes contain.
    let content_type = validate_image(&data).map_err(CatalogError::Validation)?;

    Ok(Some(DecodedImage { content_type, data }))
}

/// Turn a client-supplied image value into the image half of a recipe write.
///
/// Data URIs are decoded for storage; other non-empty strings are kept as
/// given; empty input means no image.
pub fn parse_image(input: Option<&str>) -> Result<RecipeImage, CatalogError> {
    let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(RecipeImage::Absent);
    };

    if let Some(image) = decode_data_uri(input)? {
        return Ok(RecipeImage::Upload(image));
    }

    if input.chars().count() > MAX_REFERENCE_LEN {
        return Err(CatalogError::validation(format!(
            "Image reference must be at most {} characters",
            MAX_REFERENCE_LEN
        )));
    }
    Ok(RecipeImage::Reference(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::new(2, 2);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_plain_reference_is_not_a_data_uri() {
        assert_eq!(decode_data_uri("/media/recipes/soup.png").unwrap(), None);
    }

    #[test]
    fn test_decodes_png_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes()));
        let decoded = decode_data_uri(&uri).unwrap().unwrap();
        assert_eq!(decoded.content_type, "image/png");
        assert_eq!(decoded.data, png_bytes());
    }

    #[test]
    fn test_content_type_comes_from_bytes() {
        let uri = format!("data:image/jpeg;base64,{}", STANDARD.encode(png_bytes()));
        let decoded = decode_data_uri(&uri).unwrap().unwrap();
        assert_eq!(decoded.content_type, "image/png");
    }

    #[test]
    fn test_parse_image_variants() {
        assert_eq!(parse_image(None).unwrap(), RecipeImage::Absent);
        assert_eq!(parse_image(Some("  ")).unwrap(), RecipeImage::Absent);
        assert_eq!(
            parse_image(Some("/media/soup.png")).unwrap(),
            RecipeImage::Reference("/media/soup.png".to_string())
        );

        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes()));
        assert!(matches!(
            parse_image(Some(&uri)).unwrap(),
            RecipeImage::Upload(DecodedImage { ref content_type, .. }) if content_type == "image/png"
        ));
    }

    #[test]
    fn test_reference_must_fit_the_column() {
        let longest = format!("/media/{}", "a".repeat(MAX_REFERENCE_LEN - 7));
        assert_eq!(longest.len(), MAX_REFERENCE_LEN);
        assert!(parse_image(Some(&longest)).is_ok());

        let too_long = format!("https://cdn.example.com/{}.png", "x".repeat(260));
        assert!(matches!(
            parse_image(Some(&too_long)),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_stored_image_id() {
        let id = Uuid::new_v4();
        assert_eq!(stored_image_id(&image_url(id)), Some(id));
        assert_eq!(stored_image_id("/media/soup.png"), None);
        assert_eq!(stored_image_id("/api/images/not-a-uuid"), None);
    }

    #[test]
    fn test_rejects_bad_payloads() {
        assert!(decode_data_uri("data:image/png,rawdata").is_err());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_err());
        let not_image = STANDARD.encode(b"hello world");
        assert!(decode_data_uri(&format!("data:image/png;base64,{}", not_image)).is_err());
    }
}
