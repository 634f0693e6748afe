//! Resource Handles
//!
//! Fetching hands out reference-counted handles so a resource cannot be
//! reaped while something still renders from it. Handles never close a
//! resource themselves; the [`ResourceManager`] stays the sole closing
//! authority and consults the counts during [`reap`].
//!
//! [`ResourceManager`]: crate::assets::ResourceManager
//! [`reap`]: crate::assets::ResourceManager::reap

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::assets::lifecycle::{ResourceEntry, ResourceStage};
use crate::resources::{ResourceInfo, ResourcePayload};

/// Atomic reference state for one cached resource.
///
/// Strong count covers live [`ResourceHandle`]s only; the cache's own
/// reference is not counted, so a cached-but-unreferenced resource sits at
/// zero and is reapable once marked.
#[derive(Debug)]
pub struct ResourceTracker {
    strong: AtomicU32,
    weak: AtomicU32,
    marked_for_release: AtomicBool,
}

impl ResourceTracker {
    pub(crate) fn new() -> Self {
        Self {
            strong: AtomicU32::new(0),
            weak: AtomicU32::new(0),
            marked_for_release: AtomicBool::new(false),
        }
    }

    #[inline]
    pub(crate) fn add_strong(&self) {
        self.strong.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn release_strong(&self) {
        let prev = self.strong.fetch_sub(1, Ordering::Release);
        if prev == 1 {
            std::sync::atomic::fence(Ordering::Acquire);
        }
    }

    #[inline]
    #[must_use]
    pub fn strong_count(&self) -> u32 {
        self.strong.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn add_weak(&self) {
        self.weak.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn release_weak(&self) {
        self.weak.fetch_sub(1, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn weak_count(&self) -> u32 {
        self.weak.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_for_release(&self) {
        self.marked_for_release.store(true, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_marked_for_release(&self) -> bool {
        self.marked_for_release.load(Ordering::Acquire)
    }

    /// Reapable: marked, and no strong handle pins it.
    #[inline]
    #[must_use]
    pub fn can_release(&self) -> bool {
        self.is_marked_for_release() && self.strong_count() == 0
    }
}

/// Strong handle to a cached resource.
///
/// Keeps the resource pinned against [`reap`]; does not keep it open
/// against an explicit [`close`].
///
/// [`reap`]: crate::assets::ResourceManager::reap
/// [`close`]: crate::assets::ResourceManager::close
pub struct ResourceHandle {
    entry: Arc<ResourceEntry>,
}

impl ResourceHandle {
    pub(crate) fn new(entry: Arc<ResourceEntry>) -> Self {
        entry.tracker().add_strong();
        Self { entry }
    }

    #[inline]
    #[must_use]
    pub fn info(&self) -> &ResourceInfo {
        self.entry.info()
    }

    #[must_use]
    pub fn stage(&self) -> ResourceStage {
        self.entry.stage()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.entry.is_ready()
    }

    /// Payload while the resource is ready; `None` once it closed.
    #[must_use]
    pub fn payload(&self) -> Option<Arc<ResourcePayload>> {
        self.entry.payload()
    }

    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.entry.byte_size()
    }

    /// Live strong handles for this resource.
    #[must_use]
    pub fn ref_count(&self) -> u32 {
        self.entry.tracker().strong_count()
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakResourceHandle {
        self.entry.tracker().add_weak();
        WeakResourceHandle {
            entry: Arc::clone(&self.entry),
        }
    }

    #[inline]
    pub(crate) fn entry(&self) -> &Arc<ResourceEntry> {
        &self.entry
    }
}

impl Clone for ResourceHandle {
    fn clone(&self) -> Self {
        self.entry.tracker().add_strong();
        Self {
            entry: Arc::clone(&self.entry),
        }
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        self.entry.tracker().release_strong();
    }
}

impl std::fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("info", &self.info().to_string())
            .field("stage", &self.stage())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

/// Weak handle: does not pin the resource against reaping.
///
/// Upgrade before use. Once the resource is marked for release the upgrade
/// fails, which is what keeps a cache-eviction pass from racing new users.
pub struct WeakResourceHandle {
    entry: Arc<ResourceEntry>,
}

impl WeakResourceHandle {
    #[inline]
    #[must_use]
    pub fn info(&self) -> &ResourceInfo {
        self.entry.info()
    }

    /// Attempts to re-acquire a strong handle.
    pub fn upgrade(&self) -> Option<ResourceHandle> {
        let tracker = self.entry.tracker();
        if tracker.is_marked_for_release() {
            return None;
        }
        let handle = ResourceHandle::new(Arc::clone(&self.entry));
        // Re-check after the increment: a mark that slipped in between
        // would otherwise hand out a handle the reaper no longer sees.
        if tracker.is_marked_for_release() {
            return None;
        }
        Some(handle)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.entry.tracker().is_marked_for_release() && !self.entry.is_closed()
    }
}

impl Clone for WeakResourceHandle {
    fn clone(&self) -> Self {
        self.entry.tracker().add_weak();
        Self {
            entry: Arc::clone(&self.entry),
        }
    }
}

impl Drop for WeakResourceHandle {
    fn drop(&mut self) {
        self.entry.tracker().release_weak();
    }
}
