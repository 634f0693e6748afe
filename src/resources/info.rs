//! Cache Keys
//!
//! [`ResourceInfo`] identifies a cacheable asset by class, dispatch tag,
//! path and extra parameters. Two fetches with equal keys resolve to the
//! same cached resource, so everything that distinguishes one load from
//! another must be part of the key.

use std::fmt;
use std::path::{Path, PathBuf};

use smallvec::SmallVec;

/// Resource class. Also the first half of the loader-registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// A standalone 2D texture (tileset sheet, portrait, battleback).
    Texture,
    /// A sprite-sheet animation with per-frame timing.
    Animation,
    /// Tile map data, no pixels of its own.
    TileMap,
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::Animation => "animation",
            Self::TileMap => "tilemap",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable key identifying a cacheable asset.
///
/// Fields are fixed at construction; equality and hashing cover all of
/// them. The `tag` selects which registered loader handles the asset
/// (tileset sheet categories such as `"A5"`, or `"character"`, `"map"`).
/// `params` carries ordered loader-specific arguments, e.g. a sheet row
/// selector for character sprites.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceInfo {
    kind: ResourceKind,
    tag: String,
    path: PathBuf,
    params: SmallVec<[String; 2]>,
}

impl ResourceInfo {
    pub fn new(kind: ResourceKind, tag: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            path: path.into(),
            params: SmallVec::new(),
        }
    }

    /// Attaches extra string parameters. Order is significant for equality.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for ResourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.tag, self.path.display())?;
        for p in &self.params {
            write!(f, ":{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(info: &ResourceInfo) -> u64 {
        let mut h = DefaultHasher::new();
        info.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equality_covers_all_fields() {
        let base = ResourceInfo::new(ResourceKind::Texture, "A5", "img/tilesets/outside.png");
        let same = ResourceInfo::new(ResourceKind::Texture, "A5", "img/tilesets/outside.png");
        assert_eq!(base, same);
        assert_eq!(hash_of(&base), hash_of(&same));

        let other_tag = ResourceInfo::new(ResourceKind::Texture, "A4", "img/tilesets/outside.png");
        assert_ne!(base, other_tag);

        let other_kind = ResourceInfo::new(ResourceKind::Animation, "A5", "img/tilesets/outside.png");
        assert_ne!(base, other_kind);

        let with_params = base.clone().with_params(["row:3"]);
        assert_ne!(base, with_params);
    }

    #[test]
    fn param_order_is_significant() {
        let ab = ResourceInfo::new(ResourceKind::Texture, "character", "img/hero.png")
            .with_params(["a", "b"]);
        let ba = ResourceInfo::new(ResourceKind::Texture, "character", "img/hero.png")
            .with_params(["b", "a"]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn display_includes_kind_tag_and_path() {
        let info =
            ResourceInfo::new(ResourceKind::TileMap, "map", "data/map001.json").with_params(["n"]);
        assert_eq!(info.to_string(), "tilemap:map:data/map001.json:n");
    }
}
