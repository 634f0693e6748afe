//! Resource Lifecycle
//!
//! Every cached resource is one [`ResourceEntry`] moving through
//! `Unloaded -> Loading -> Ready -> Closed`. Loading drops to `Closed`
//! when the loader fails; `Closed` is terminal. Transitions are guarded by
//! a mutex so racing fetchers observe exactly one loader run, and waiters
//! park on a condvar until the entry settles.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::assets::handle::ResourceTracker;
use crate::resources::{ResourceInfo, ResourcePayload};

/// Observable lifecycle stage of a cached resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStage {
    /// Constructed, loader not yet dispatched.
    Unloaded,
    /// A loader is running on some thread; fetchers block until it settles.
    Loading,
    /// Loaded payload available.
    Ready,
    /// Terminal. Payload memory has been released.
    Closed,
}

enum State {
    Unloaded,
    Loading,
    Ready(Arc<ResourcePayload>),
    Closed,
}

impl State {
    fn stage(&self) -> ResourceStage {
        match self {
            Self::Unloaded => ResourceStage::Unloaded,
            Self::Loading => ResourceStage::Loading,
            Self::Ready(_) => ResourceStage::Ready,
            Self::Closed => ResourceStage::Closed,
        }
    }
}

/// One cached resource: key, lifecycle state and reference tracking.
///
/// The cache guarantees at most one live entry per distinct
/// [`ResourceInfo`]; the entry guarantees its pixel memory is dropped
/// exactly when it closes, not when a garbage collector gets around to it.
pub struct ResourceEntry {
    info: ResourceInfo,
    state: Mutex<State>,
    settled: Condvar,
    tracker: ResourceTracker,
}

impl ResourceEntry {
    pub(crate) fn new(info: ResourceInfo) -> Self {
        Self {
            info,
            state: Mutex::new(State::Unloaded),
            settled: Condvar::new(),
            tracker: ResourceTracker::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn info(&self) -> &ResourceInfo {
        &self.info
    }

    #[must_use]
    pub fn stage(&self) -> ResourceStage {
        self.state.lock().stage()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.stage() == ResourceStage::Ready
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.stage() == ResourceStage::Closed
    }

    /// Payload if the entry is ready, `None` otherwise.
    #[must_use]
    pub fn payload(&self) -> Option<Arc<ResourcePayload>> {
        match &*self.state.lock() {
            State::Ready(payload) => Some(Arc::clone(payload)),
            _ => None,
        }
    }

    /// Payload memory in bytes; 0 unless ready.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        match &*self.state.lock() {
            State::Ready(payload) => payload.byte_size(),
            _ => 0,
        }
    }

    #[inline]
    pub(crate) fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }

    /// `Unloaded -> Loading`. Returns `false` if the entry already left
    /// `Unloaded`.
    pub(crate) fn begin_loading(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            State::Unloaded => {
                *state = State::Loading;
                true
            }
            _ => false,
        }
    }

    /// `Loading -> Ready`. A close that raced the loader wins: the payload
    /// is dropped on the spot and the entry stays `Closed`.
    pub(crate) fn complete(&self, payload: ResourcePayload) {
        let mut state = self.state.lock();
        if matches!(*state, State::Loading) {
            *state = State::Ready(Arc::new(payload));
        }
        drop(state);
        self.settled.notify_all();
    }

    /// `Loading -> Closed`, for loader failure. No payload memory was
    /// retained, so there is nothing to free.
    pub(crate) fn fail(&self) {
        let mut state = self.state.lock();
        if matches!(*state, State::Loading) {
            *state = State::Closed;
        }
        drop(state);
        self.settled.notify_all();
    }

    /// Transitions to `Closed` from any stage and releases the payload.
    ///
    /// Idempotent: closing a closed entry is a no-op. Returns `true` when
    /// this call performed the transition. Holders of a payload `Arc`
    /// obtained before the close keep that memory alive until they drop
    /// it; the cache itself releases deterministically here.
    pub fn close(&self) -> bool {
        let mut state = self.state.lock();
        let closed_now = !matches!(*state, State::Closed);
        *state = State::Closed;
        drop(state);
        if closed_now {
            self.settled.notify_all();
        }
        closed_now
    }

    /// Blocks while the entry is unloaded or loading.
    ///
    /// Returns the payload once ready, or `None` if the entry closed
    /// instead (loader failure or a concurrent explicit close).
    pub(crate) fn wait_settled(&self) -> Option<Arc<ResourcePayload>> {
        let mut state = self.state.lock();
        loop {
            match &*state {
                State::Ready(payload) => return Some(Arc::clone(payload)),
                State::Closed => return None,
                State::Unloaded | State::Loading => self.settled.wait(&mut state),
            }
        }
    }
}

impl std::fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("info", &self.info.to_string())
            .field("stage", &self.stage())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{ResourceKind, Texture};

    fn entry() -> ResourceEntry {
        ResourceEntry::new(ResourceInfo::new(
            ResourceKind::Texture,
            "A5",
            "img/tilesets/outside.png",
        ))
    }

    fn payload() -> ResourcePayload {
        ResourcePayload::Texture(Texture::placeholder("test"))
    }

    #[test]
    fn happy_path_transitions() {
        let e = entry();
        assert_eq!(e.stage(), ResourceStage::Unloaded);

        assert!(e.begin_loading());
        assert_eq!(e.stage(), ResourceStage::Loading);

        e.complete(payload());
        assert_eq!(e.stage(), ResourceStage::Ready);
        assert!(e.payload().is_some());
        assert!(e.byte_size() > 0);
    }

    #[test]
    fn begin_loading_only_from_unloaded() {
        let e = entry();
        assert!(e.begin_loading());
        assert!(!e.begin_loading());
    }

    #[test]
    fn loader_failure_closes() {
        let e = entry();
        e.begin_loading();
        e.fail();
        assert_eq!(e.stage(), ResourceStage::Closed);
        assert!(e.payload().is_none());
    }

    #[test]
    fn close_is_idempotent() {
        let e = entry();
        e.begin_loading();
        e.complete(payload());

        assert!(e.close());
        assert_eq!(e.stage(), ResourceStage::Closed);
        assert_eq!(e.byte_size(), 0);

        // Second close: no-op, still closed.
        assert!(!e.close());
        assert_eq!(e.stage(), ResourceStage::Closed);
    }

    #[test]
    fn complete_does_not_resurrect_a_closed_entry() {
        let e = entry();
        e.begin_loading();
        e.close();
        e.complete(payload());
        assert_eq!(e.stage(), ResourceStage::Closed);
        assert!(e.payload().is_none());
    }

    #[test]
    fn wait_settled_returns_payload_for_ready_entry() {
        let e = entry();
        e.begin_loading();
        e.complete(payload());
        assert!(e.wait_settled().is_some());
    }

    #[test]
    fn wait_settled_reports_closure() {
        let e = entry();
        e.begin_loading();
        e.fail();
        assert!(e.wait_settled().is_none());
    }
}
