// src/services/image_processor.rs
use crate::errors::WardrobeError;
use crate::models::strip_data_url;
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use image::{DynamicImage, GenericImageView, ImageFormat as ImgFormat};
use log::{debug, warn};

/// Largest photo accepted before downsizing.
const MAX_INPUT_DIMENSION: u32 = 8192;

/// Prepares uploaded photos for inline submission to the vision API.
pub struct ImageProcessor {
    max_dimension: u32,
}

impl ImageProcessor {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    pub fn validate_image(&self, data: &[u8]) -> Result<(u32, u32), WardrobeError> {
        let img = image::load_from_memory(data)
            .map_err(|e| WardrobeError::ImageProcessing(format!("Invalid image format: {}", e)))?;

        let (width, height) = img.dimensions();

        if width > MAX_INPUT_DIMENSION || height > MAX_INPUT_DIMENSION {
            return Err(WardrobeError::ImageProcessing(format!(
                "Image dimensions exceed {0}x{0}",
                MAX_INPUT_DIMENSION
            )));
        }

        Ok((width, height))
    }

    pub fn resize_if_needed(&self, data: &[u8]) -> Result<Vec<u8>, WardrobeError> {
        let img = image::load_from_memory(data)
            .map_err(|e| WardrobeError::ImageProcessing(format!("Failed to load image: {}", e)))?;

        let (width, height) = img.dimensions();
        let max_size = self.max_dimension;

        if width <= max_size && height <= max_size {
            return Ok(data.to_vec());
        }

        let ratio = (max_size as f32 / width.max(height) as f32).min(1.0);
        let new_width = ((width as f32 * ratio) as u32).max(1);
        let new_height = ((height as f32 * ratio) as u32).max(1);

        debug!("Resizing {}x{} to {}x{}", width, height, new_width, new_height);

        let resized = img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3);
        // JPEG carries no alpha channel
        let resized = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut output = Vec::new();
        resized
            .write_to(&mut std::io::Cursor::new(&mut output), ImgFormat::Jpeg)
            .map_err(|e| {
                WardrobeError::ImageProcessing(format!("Failed to encode resized image: {}", e))
            })?;

        Ok(output)
    }

    /// Decodes inline base64 content, with or without a `data:` URL prefix.
    pub fn decode_inline(&self, content: &str) -> Result<Bytes, WardrobeError> {
        general_purpose::STANDARD
            .decode(strip_data_url(content))
            .map(Bytes::from)
            .map_err(|e| WardrobeError::ImageProcessing(format!("Invalid base64 image: {}", e)))
    }

    /// Validates raw image bytes and downsizes them, returning base64 content.
    pub fn prepare_bytes(&self, data: &[u8]) -> Result<String, WardrobeError> {
        self.validate_image(data)?;
        let processed = self.resize_if_needed(data)?;
        Ok(general_purpose::STANDARD.encode(processed))
    }

    pub fn prepare_inline(&self, content: &str) -> Result<String, WardrobeError> {
        let data = self.decode_inline(content)?;
        self.prepare_bytes(&data)
    }

    /// Like `prepare_bytes`, but unreadable uploads are encoded untouched.
    /// The detection facility then rejects them and analysis degrades to the
    /// mock record instead of failing the request.
    pub fn prepare_bytes_or_raw(&self, data: &[u8]) -> String {
        self.prepare_bytes(data).unwrap_or_else(|e| {
            warn!("Sending upload unprocessed: {}", e);
            general_purpose::STANDARD.encode(data)
        })
    }

    pub fn prepare_inline_or_raw(&self, content: String) -> String {
        if content.trim().is_empty() {
            return content;
        }
        match self.prepare_inline(&content) {
            Ok(processed) => processed,
            Err(e) => {
                warn!("Sending inline image unprocessed: {}", e);
                content
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 10, 12]));
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), ImgFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn rejects_non_images() {
        let processor = ImageProcessor::new(256);
        assert!(matches!(
            processor.validate_image(b"definitely not a picture"),
            Err(WardrobeError::ImageProcessing(_))
        ));
    }

    #[test]
    fn small_images_pass_through() {
        let processor = ImageProcessor::new(256);
        let data = png(64, 32);
        assert_eq!(processor.validate_image(&data).unwrap(), (64, 32));
        assert_eq!(processor.resize_if_needed(&data).unwrap(), data);
    }

    #[test]
    fn large_images_are_downsized() {
        let processor = ImageProcessor::new(256);
        let resized = processor.resize_if_needed(&png(600, 300)).unwrap();
        let img = image::load_from_memory(&resized).unwrap();
        assert_eq!(img.dimensions(), (256, 128));
    }

    #[test]
    fn inline_data_url_is_decoded() {
        let processor = ImageProcessor::new(256);
        let data = png(8, 8);
        let url = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&data)
        );
        assert_eq!(processor.decode_inline(&url).unwrap(), Bytes::from(data.clone()));

        let content = processor.prepare_inline(&url).unwrap();
        assert_eq!(general_purpose::STANDARD.decode(content).unwrap(), data);
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let processor = ImageProcessor::new(256);
        assert!(matches!(
            processor.decode_inline("data:image/png;base64,@@@"),
            Err(WardrobeError::ImageProcessing(_))
        ));
    }

    #[test]
    fn unreadable_inline_content_passes_through() {
        let processor = ImageProcessor::new(256);
        assert_eq!(
            processor.prepare_inline_or_raw("not-base64-at-all!!".to_string()),
            "not-base64-at-all!!"
        );
        // valid base64, but not a picture
        assert_eq!(
            processor.prepare_inline_or_raw("bm90IGFuIGltYWdl".to_string()),
            "bm90IGFuIGltYWdl"
        );
        assert_eq!(processor.prepare_inline_or_raw("  ".to_string()), "  ");
    }

    #[test]
    fn unreadable_upload_is_encoded_untouched() {
        let processor = ImageProcessor::new(256);
        let content = processor.prepare_bytes_or_raw(b"not really a jpeg");
        assert_eq!(
            general_purpose::STANDARD.decode(content).unwrap(),
            b"not really a jpeg"
        );

        let resized = processor.prepare_bytes_or_raw(&png(600, 300));
        let img = image::load_from_memory(&general_purpose::STANDARD.decode(resized).unwrap()).unwrap();
        assert_eq!(img.dimensions(), (256, 128));
    }
}
