use image::{DynamicImage, ImageFormat};

use crate::{Result, ScrapboxError};

/// Image formats a page icon may come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Jpeg,
    Png,
    Gif,
}

impl IconFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            IconFormat::Jpeg => "jpeg",
            IconFormat::Png => "png",
            IconFormat::Gif => "gif",
        }
    }

    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(IconFormat::Jpeg),
            ImageFormat::Png => Some(IconFormat::Png),
            ImageFormat::Gif => Some(IconFormat::Gif),
            _ => None,
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            IconFormat::Jpeg => ImageFormat::Jpeg,
            IconFormat::Png => ImageFormat::Png,
            IconFormat::Gif => ImageFormat::Gif,
        }
    }
}

impl std::fmt::Display for IconFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Sniffs the format from the magic bytes and decodes the image.
pub fn decode_icon(url: &str, bytes: &[u8]) -> Result<(DynamicImage, IconFormat)> {
    let decode_error = |message: String| ScrapboxError::ImageDecode {
        url: url.to_string(),
        message,
    };
    let detected =
        image::guess_format(bytes).map_err(|e| decode_error(format!("unknown format: {}", e)))?;
    let format = IconFormat::from_image_format(detected)
        .ok_or_else(|| decode_error(format!("unsupported format: {:?}", detected)))?;
    let icon = image::load_from_memory_with_format(bytes, format.image_format())
        .map_err(|e| decode_error(e.to_string()))?;
    Ok((icon, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 3, Rgba([255, 0, 0, 255])));
        let mut bytes = Vec::new();
        let image = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => image,
        };
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_decode_detects_format() {
        for (format, expected) in [
            (ImageFormat::Png, IconFormat::Png),
            (ImageFormat::Gif, IconFormat::Gif),
            (ImageFormat::Jpeg, IconFormat::Jpeg),
        ] {
            let (icon, detected) = decode_icon("icon", &encode(format)).unwrap();
            assert_eq!(detected, expected);
            assert_eq!(icon.width(), 2);
            assert_eq!(icon.height(), 3);
        }
        assert_eq!(IconFormat::Jpeg.to_string(), "jpeg");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_icon("https://scrapbox.io/api/pages/p/t/icon", b"plain text").unwrap_err();
        assert!(matches!(err, ScrapboxError::ImageDecode { .. }));
        assert!(err.to_string().contains("/icon"));
    }

    #[test]
    fn test_decode_rejects_truncated_png() {
        let bytes = encode(ImageFormat::Png);
        let err = decode_icon("icon", &bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, ScrapboxError::ImageDecode { .. }));
    }
}
