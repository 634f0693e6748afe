//! Built-In Loaders
//!
//! The stock loader table for a tile-based RPG project: tileset and sprite
//! textures, sprite-sheet animations with JSON sidecars, and JSON tile
//! maps. Games register their own loaders on top; the latest registration
//! for a tag wins.

use crate::assets::manager::ResourceManager;
use crate::assets::registry::LoadContext;
use crate::errors::Result;
use crate::resources::{
    AnimationDef, ColorSpace, ResourceInfo, ResourceKind, ResourcePayload, SpriteAnimation,
    Texture, TileMap, decode_image,
};

/// Tileset sheet categories, in the classic tile-RPG layout: autotile
/// sheets A1-A5 plus the freeform B-E sheets.
pub const TILESET_TAGS: &[&str] = &["A1", "A2", "A3", "A4", "A5", "B", "C", "D", "E"];

fn display_name(info: &ResourceInfo) -> String {
    info.path()
        .file_stem()
        .map_or_else(|| info.to_string(), |s| s.to_string_lossy().into_owned())
}

/// Loader for standalone 2D textures: resolver read plus image decode.
pub fn texture_loader(
    color_space: ColorSpace,
) -> impl Fn(&LoadContext<'_>, &ResourceInfo) -> Result<ResourcePayload> + Send + Sync + 'static {
    move |ctx, info| {
        let bytes = ctx.resolver.read_bytes(info.path())?;
        let image = decode_image(&bytes, color_space, &info.path().display().to_string())?;
        Ok(ResourcePayload::Texture(Texture::new(
            display_name(info),
            image,
        )))
    }
}

/// Loader for sprite-sheet animations.
///
/// `info.path` points at the JSON sidecar; the sheet path inside it is
/// resolved against the same asset root.
pub fn animation_loader(
    color_space: ColorSpace,
) -> impl Fn(&LoadContext<'_>, &ResourceInfo) -> Result<ResourcePayload> + Send + Sync + 'static {
    move |ctx, info| {
        let def_bytes = ctx.resolver.read_bytes(info.path())?;
        let def = AnimationDef::from_json(&def_bytes)?;

        let sheet_bytes = ctx.resolver.read_bytes(&def.sheet)?;
        let sheet = decode_image(&sheet_bytes, color_space, &def.sheet)?;

        Ok(ResourcePayload::Animation(SpriteAnimation::new(
            display_name(info),
            def,
            sheet,
        )))
    }
}

/// Loader for JSON tile maps.
pub fn tilemap_loader()
-> impl Fn(&LoadContext<'_>, &ResourceInfo) -> Result<ResourcePayload> + Send + Sync + 'static {
    |ctx, info| {
        let bytes = ctx.resolver.read_bytes(info.path())?;
        Ok(ResourcePayload::TileMap(TileMap::from_json(&bytes)?))
    }
}

/// Installs the stock loader table on a manager.
///
/// Tileset sheets and character sprites decode as sRGB, the common case
/// for authored pixel art.
pub fn register_defaults(manager: &ResourceManager) {
    for tag in TILESET_TAGS {
        manager.register_loader(ResourceKind::Texture, *tag, texture_loader(ColorSpace::Srgb));
    }
    manager.register_loader(
        ResourceKind::Texture,
        "character",
        texture_loader(ColorSpace::Srgb),
    );
    manager.register_loader(
        ResourceKind::Texture,
        "battleback",
        texture_loader(ColorSpace::Srgb),
    );
    manager.register_loader(
        ResourceKind::Animation,
        "character",
        animation_loader(ColorSpace::Srgb),
    );
    manager.register_loader(ResourceKind::TileMap, "map", tilemap_loader());
}
