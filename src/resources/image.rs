//! CPU-Side Pixel Storage and Image Decoding
//!
//! [`Image`] owns a decoded pixel buffer on the heap. The buffer is freed
//! when the owning resource is dropped, on every exit path including decode
//! failure; there are no manual free calls and no finalizers.

use std::path::Path;

use wgpu::TextureFormat;

use crate::errors::{ResourceError, Result};

/// Color space of source pixels, mapped to the texture format at decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    Linear,
}

impl ColorSpace {
    #[must_use]
    pub fn texture_format(self) -> TextureFormat {
        match self {
            Self::Srgb => TextureFormat::Rgba8UnormSrgb,
            Self::Linear => TextureFormat::Rgba8Unorm,
        }
    }
}

/// A decoded image: tightly packed RGBA8 pixels plus dimensions and format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    label: String,
    width: u32,
    height: u32,
    format: TextureFormat,
    data: Vec<u8>,
}

impl Image {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Vec<u8>,
    ) -> Self {
        Self {
            label: label.into(),
            width,
            height,
            format,
            data,
        }
    }

    /// 1x1 single-color image, used for placeholders and dummy bindings.
    #[must_use]
    pub fn solid_color(label: impl Into<String>, color: [u8; 4]) -> Self {
        Self::new(label, 1, 1, TextureFormat::Rgba8UnormSrgb, color.to_vec())
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Largest of width and height, compared against the device limit.
    #[inline]
    #[must_use]
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    /// A usable image has nonzero dimensions and a non-empty buffer.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && !self.data.is_empty()
    }

    /// Consumes the image and hands the pixel buffer to the caller
    /// (typically the render thread, for upload).
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Decodes an image from an in-memory byte buffer, converting to RGBA8.
///
/// A corrupt or unsupported file is an explicit [`ResourceError::ImageDecode`];
/// callers that prefer degrading over failing apply their fallback policy on
/// top of this.
pub fn decode_image(bytes: &[u8], color_space: ColorSpace, label: &str) -> Result<Image> {
    use image::GenericImageView;

    let img = image::load_from_memory(bytes)
        .map_err(|e| ResourceError::ImageDecode(format!("{label}: {e}")))?;

    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();

    Ok(Image::new(
        label,
        width,
        height,
        color_space.texture_format(),
        rgba.into_vec(),
    ))
}

/// Decodes an image file from disk.
///
/// A missing file surfaces as [`ResourceError::NotFound`] rather than a
/// decode error, so callers can distinguish "wrong path" from "bad file".
pub fn decode_image_file(path: impl AsRef<Path>, color_space: ColorSpace) -> Result<Image> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ResourceError::NotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    decode_image(&bytes, color_space, &path.display().to_string())
}
