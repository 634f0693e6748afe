//! Texture Resources

use uuid::Uuid;

use crate::resources::image::Image;

/// Placeholder color for textures that failed to load. Magenta is loud on
/// purpose: it should never survive into a shipped scene unnoticed.
const PLACEHOLDER_COLOR: [u8; 4] = [255, 0, 255, 255];

/// A 2D texture asset: decoded pixels plus identity.
///
/// This is the CPU-side representation. GPU texture creation happens on the
/// render thread after the payload passes through the upload queue.
#[derive(Debug)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,
    pub image: Image,
}

impl Texture {
    pub fn new(name: impl Into<String>, image: Image) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            image,
        }
    }

    /// 1x1 magenta fallback substituted when a texture fails to load.
    #[must_use]
    pub fn placeholder(name: &str) -> Self {
        Self::new(name, Image::solid_color(name, PLACEHOLDER_COLOR))
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel memory held by this texture, in bytes.
    #[inline]
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.image.byte_size()
    }
}
