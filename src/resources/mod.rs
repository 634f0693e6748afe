pub mod animation;
pub mod image;
pub mod info;
pub mod texture;
pub mod tilemap;

pub use animation::{AnimationDef, FrameDef, SpriteAnimation};
pub use image::{ColorSpace, Image, decode_image, decode_image_file};
pub use info::{ResourceInfo, ResourceKind};
pub use texture::Texture;
pub use tilemap::{TileLayer, TileMap};

/// Concrete resource data, one variant per [`ResourceKind`].
///
/// The cache stores payloads behind this tagged union so the manager can
/// reason about size, upload needs and placeholders without knowing the
/// concrete type a loader produced.
#[derive(Debug)]
pub enum ResourcePayload {
    Texture(Texture),
    Animation(SpriteAnimation),
    TileMap(TileMap),
}

impl ResourcePayload {
    /// The resource class of this payload.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Texture(_) => ResourceKind::Texture,
            Self::Animation(_) => ResourceKind::Animation,
            Self::TileMap(_) => ResourceKind::TileMap,
        }
    }

    /// Heap memory held by this payload, in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        match self {
            Self::Texture(t) => t.byte_size(),
            Self::Animation(a) => a.byte_size(),
            Self::TileMap(m) => m.byte_size(),
        }
    }

    /// Largest pixel dimension, for payloads that end up as GPU textures.
    ///
    /// Pure data payloads return `None` and are exempt from the texture
    /// size gate.
    #[must_use]
    pub fn max_dimension(&self) -> Option<u32> {
        match self {
            Self::Texture(t) => Some(t.image.max_dimension()),
            Self::Animation(a) => Some(a.sheet.max_dimension()),
            Self::TileMap(_) => None,
        }
    }

    /// Whether this payload must be handed to the render thread for GPU
    /// texture creation.
    #[must_use]
    pub fn needs_gpu_upload(&self) -> bool {
        matches!(self, Self::Texture(_) | Self::Animation(_))
    }

    /// Fallback payload substituted when a loader fails under the
    /// placeholder policy. Always valid, always tiny.
    #[must_use]
    pub fn placeholder(info: &ResourceInfo) -> Self {
        let name = info.to_string();
        match info.kind() {
            ResourceKind::Texture => Self::Texture(Texture::placeholder(&name)),
            ResourceKind::Animation => Self::Animation(SpriteAnimation::placeholder(&name)),
            ResourceKind::TileMap => Self::TileMap(TileMap::empty(&name)),
        }
    }
}
