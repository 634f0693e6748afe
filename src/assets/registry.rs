//! Loader Registration and Dispatch
//!
//! The registry is an explicit table from `(kind, tag)` to a loader
//! function, built at startup. No reflection, no plugin discovery: if a
//! tag is not in the table, the fetch fails with an explicit error.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::assets::io::AssetResolver;
use crate::errors::Result;
use crate::resources::{ResourceInfo, ResourceKind, ResourcePayload};

/// Everything a loader may consult besides the key itself.
pub struct LoadContext<'a> {
    /// Resolves logical asset paths against the asset root.
    pub resolver: &'a AssetResolver,
    /// The device texture limit cached at manager construction, for
    /// loaders that want to downscale instead of tripping the size gate.
    pub max_texture_size: u32,
}

/// A loader builds the payload for one resource key.
///
/// Loaders run on whichever thread called fetch, must not assume a render
/// context, and report failure through `Result` rather than by leaving a
/// half-populated resource behind.
pub type LoaderFn =
    Arc<dyn Fn(&LoadContext<'_>, &ResourceInfo) -> Result<ResourcePayload> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LoaderKey {
    kind: ResourceKind,
    tag: String,
}

/// Table of registered loaders, safe for concurrent lookup and insert.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: RwLock<FxHashMap<LoaderKey, LoaderFn>>,
}

impl LoaderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loader for `(kind, tag)`.
    ///
    /// The latest registration wins; there is no duplicate detection, so a
    /// game can override a stock loader by registering after
    /// [`register_defaults`](crate::assets::register_defaults).
    pub fn register<F>(&self, kind: ResourceKind, tag: impl Into<String>, loader: F)
    where
        F: Fn(&LoadContext<'_>, &ResourceInfo) -> Result<ResourcePayload> + Send + Sync + 'static,
    {
        let key = LoaderKey {
            kind,
            tag: tag.into(),
        };
        self.loaders.write().insert(key, Arc::new(loader));
    }

    /// The loader registered for `(kind, tag)`, if any.
    #[must_use]
    pub fn get(&self, kind: ResourceKind, tag: &str) -> Option<LoaderFn> {
        let key = LoaderKey {
            kind,
            tag: tag.to_string(),
        };
        self.loaders.read().get(&key).cloned()
    }

    #[must_use]
    pub fn contains(&self, kind: ResourceKind, tag: &str) -> bool {
        self.get(kind, tag).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Texture;

    fn constant_loader(name: &'static str) -> impl Fn(&LoadContext<'_>, &ResourceInfo) -> Result<ResourcePayload> + Send + Sync
    {
        move |_, _| Ok(ResourcePayload::Texture(Texture::placeholder(name)))
    }

    #[test]
    fn get_unregistered_is_none() {
        let registry = LoaderRegistry::new();
        assert!(registry.get(ResourceKind::Texture, "A5").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_is_keyed_by_kind_and_tag() {
        let registry = LoaderRegistry::new();
        registry.register(ResourceKind::Texture, "A5", constant_loader("a5"));

        assert!(registry.contains(ResourceKind::Texture, "A5"));
        assert!(!registry.contains(ResourceKind::Texture, "A4"));
        assert!(!registry.contains(ResourceKind::Animation, "A5"));
    }

    #[test]
    fn last_registration_wins() {
        let resolver = AssetResolver::new(".");
        let ctx = LoadContext {
            resolver: &resolver,
            max_texture_size: 4096,
        };
        let info = ResourceInfo::new(ResourceKind::Texture, "A5", "x.png");

        let registry = LoaderRegistry::new();
        registry.register(ResourceKind::Texture, "A5", constant_loader("first"));
        registry.register(ResourceKind::Texture, "A5", constant_loader("second"));
        assert_eq!(registry.len(), 1);

        let loader = registry.get(ResourceKind::Texture, "A5").unwrap();
        let payload = loader(&ctx, &info).unwrap();
        match payload {
            ResourcePayload::Texture(tex) => assert_eq!(tex.name, "second"),
            other => panic!("unexpected payload {:?}", other.kind()),
        }
    }
}
