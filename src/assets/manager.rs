//! Resource Manager
//!
//! Owns the cache, dispatches loads through the registry, enforces the
//! device texture limit and is the sole authority for closing resources.
//!
//! Concurrency model: logic threads fetch concurrently; the cache's
//! get-or-create is atomic per key, so racing fetchers of the same
//! [`ResourceInfo`] never double-construct a resource and exactly one
//! loader invocation occurs. The constructing thread runs the loader with
//! no cache lock held; everyone else parks on the entry until it settles.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::assets::handle::ResourceHandle;
use crate::assets::io::AssetResolver;
use crate::assets::lifecycle::{ResourceEntry, ResourceStage};
use crate::assets::registry::{LoadContext, LoaderRegistry};
use crate::assets::upload::{UploadQueue, UploadRequest};
use crate::config::{LoadFailurePolicy, OversizePolicy, ResourceConfig};
use crate::errors::{ResourceError, Result};
use crate::resources::{ResourceInfo, ResourceKind, ResourcePayload};

pub struct ResourceManager {
    cache: RwLock<FxHashMap<ResourceInfo, Arc<ResourceEntry>>>,
    registry: LoaderRegistry,
    resolver: AssetResolver,
    config: ResourceConfig,
    /// Device limit, queried once at construction and cached for the
    /// manager's lifetime.
    max_texture_size: u32,
    uploads: UploadQueue,
}

impl ResourceManager {
    /// Builds a manager over an asset root.
    ///
    /// `limits` is the graphics-context query result; the texture limit is
    /// read from it here, once, unless the config overrides it.
    #[must_use]
    pub fn new(resolver: AssetResolver, config: ResourceConfig, limits: &wgpu::Limits) -> Self {
        let max_texture_size = config
            .max_texture_size
            .unwrap_or(limits.max_texture_dimension_2d);
        Self {
            cache: RwLock::new(FxHashMap::default()),
            registry: LoaderRegistry::new(),
            resolver,
            config,
            max_texture_size,
            uploads: UploadQueue::new(),
        }
    }

    // ========================================================================
    // Registration & Introspection
    // ========================================================================

    /// Registers a loader for `(kind, tag)`; the latest registration wins.
    pub fn register_loader<F>(&self, kind: ResourceKind, tag: impl Into<String>, loader: F)
    where
        F: Fn(&LoadContext<'_>, &ResourceInfo) -> Result<ResourcePayload> + Send + Sync + 'static,
    {
        self.registry.register(kind, tag, loader);
    }

    /// The maximum texture dimension cached at construction.
    #[inline]
    #[must_use]
    pub fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    /// Pending GPU uploads; drained by the render thread.
    #[inline]
    #[must_use]
    pub fn uploads(&self) -> &UploadQueue {
        &self.uploads
    }

    #[must_use]
    pub fn contains(&self, info: &ResourceInfo) -> bool {
        self.cache.read().contains_key(info)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Lifecycle stage of a cached resource, if cached at all.
    #[must_use]
    pub fn stage_of(&self, info: &ResourceInfo) -> Option<ResourceStage> {
        self.cache.read().get(info).map(|e| e.stage())
    }

    /// Total payload bytes held by ready resources.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.cache.read().values().map(|e| e.byte_size()).sum()
    }

    // ========================================================================
    // Fetch
    // ========================================================================

    /// Fetches the resource for `info`, loading it on first use.
    ///
    /// Cache hits return a handle to the existing instance. A miss makes
    /// this thread the loading thread: it dispatches the registered loader
    /// and settles the entry while concurrent fetchers of the same key
    /// block. No loader registered for `(kind, tag)` is an explicit
    /// [`ResourceError::NoLoaderRegistered`]; whether loader failures and
    /// oversized results fail the fetch is decided by the
    /// [`ResourceConfig`] policies.
    pub fn fetch(&self, info: &ResourceInfo) -> Result<ResourceHandle> {
        // Fast path: read lock only.
        let existing = self.cache.read().get(info).cloned();
        if let Some(entry) = existing {
            return Self::wait_for(&entry);
        }

        // Miss: get-or-create must be atomic per key.
        let (entry, we_load) = {
            let mut cache = self.cache.write();
            match cache.entry(info.clone()) {
                Entry::Occupied(occupied) => (Arc::clone(occupied.get()), false),
                Entry::Vacant(vacant) => {
                    let entry = Arc::new(ResourceEntry::new(info.clone()));
                    entry.begin_loading();
                    vacant.insert(Arc::clone(&entry));
                    (entry, true)
                }
            }
        };

        if we_load {
            self.load_entry(&entry)
        } else {
            Self::wait_for(&entry)
        }
    }

    fn wait_for(entry: &Arc<ResourceEntry>) -> Result<ResourceHandle> {
        // Pin first: a reap pass between settling and handle creation must
        // not close the resource out from under this fetcher.
        let handle = ResourceHandle::new(Arc::clone(entry));
        match entry.wait_settled() {
            Some(_) => Ok(handle),
            None => Err(ResourceError::Closed(entry.info().to_string())),
        }
    }

    /// Runs the loader for a freshly inserted entry. Called with no cache
    /// lock held.
    fn load_entry(&self, entry: &Arc<ResourceEntry>) -> Result<ResourceHandle> {
        let info = entry.info();

        let Some(loader) = self.registry.get(info.kind(), info.tag()) else {
            log::error!("no loader registered for {info}");
            entry.fail();
            self.evict(info);
            return Err(ResourceError::NoLoaderRegistered {
                kind: info.kind(),
                tag: info.tag().to_string(),
            });
        };

        let ctx = LoadContext {
            resolver: &self.resolver,
            max_texture_size: self.max_texture_size,
        };

        let payload = match loader(&ctx, info) {
            Ok(payload) => payload,
            Err(err) => match self.config.load_failure {
                LoadFailurePolicy::Placeholder => {
                    log::error!("failed to load {info}: {err}; substituting placeholder");
                    ResourcePayload::placeholder(info)
                }
                LoadFailurePolicy::Fail => {
                    entry.fail();
                    self.evict(info);
                    return Err(ResourceError::LoadFailed(info.to_string(), err.to_string()));
                }
            },
        };

        if let Err(err) = self.check_limits(&payload) {
            match self.config.oversize {
                OversizePolicy::Warn => {
                    log::warn!("{info}: {err}");
                }
                OversizePolicy::Fail => {
                    entry.fail();
                    self.evict(info);
                    return Err(err);
                }
            }
        }

        let needs_upload = payload.needs_gpu_upload();
        entry.complete(payload);

        if needs_upload {
            // A close that raced the completion leaves no payload; then
            // there is nothing to upload either.
            if let Some(payload) = entry.payload() {
                self.uploads.push(UploadRequest {
                    info: entry.info().clone(),
                    payload,
                });
            }
        }

        Ok(ResourceHandle::new(Arc::clone(entry)))
    }

    /// Advisory size gate: compares a payload's largest pixel dimension
    /// against the cached device limit. Data-only payloads always pass.
    pub fn check_limits(&self, payload: &ResourcePayload) -> Result<()> {
        if let Some(dimension) = payload.max_dimension() {
            if dimension > self.max_texture_size {
                return Err(ResourceError::Oversized {
                    dimension,
                    max: self.max_texture_size,
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Close, Release & Reap
    // ========================================================================

    /// Closes a resource immediately and evicts it from the cache.
    ///
    /// Idempotent from the caller's perspective: closing an uncached key
    /// is a no-op and returns `false`. After a close the key is free
    /// again; a later fetch constructs a fresh resource.
    pub fn close(&self, info: &ResourceInfo) -> bool {
        let entry = self.cache.write().remove(info);
        match entry {
            Some(entry) => entry.close(),
            None => false,
        }
    }

    /// Marks a resource for release. The payload stays alive while strong
    /// handles pin it; the next [`reap`](Self::reap) that sees it
    /// unpinned closes and evicts it.
    pub fn release(&self, info: &ResourceInfo) {
        if let Some(entry) = self.cache.read().get(info) {
            entry.tracker().mark_for_release();
        }
    }

    /// Closes and evicts every marked resource with no live strong
    /// handles. Returns how many were reaped. Typically called once per
    /// frame, after the renderer dropped last frame's handles.
    pub fn reap(&self) -> usize {
        let mut cache = self.cache.write();
        let doomed: Vec<ResourceInfo> = cache
            .iter()
            .filter(|(_, entry)| entry.tracker().can_release())
            .map(|(info, _)| info.clone())
            .collect();
        for info in &doomed {
            if let Some(entry) = cache.remove(info) {
                entry.close();
                log::debug!("reaped {info}");
            }
        }
        doomed.len()
    }

    /// Closes everything and clears the cache. Called on teardown; also
    /// what [`Drop`] does, so native memory release never depends on leak
    /// timing.
    pub fn close_all(&self) {
        let mut cache = self.cache.write();
        for entry in cache.values() {
            entry.close();
        }
        cache.clear();
    }

    fn evict(&self, info: &ResourceInfo) {
        self.cache.write().remove(info);
    }
}

impl Drop for ResourceManager {
    fn drop(&mut self) {
        self.close_all();
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("cached", &self.len())
            .field("max_texture_size", &self.max_texture_size)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
