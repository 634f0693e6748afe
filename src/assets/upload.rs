//! Render-Thread Upload Hand-Off
//!
//! Loads may run on any logic thread, but GPU texture creation belongs to
//! the render thread. When a GPU-bound payload becomes ready the manager
//! queues it here; the renderer drains the queue once per frame and
//! performs the actual uploads.

use std::sync::Arc;

use crate::resources::{ResourceInfo, ResourcePayload};

/// One completed load awaiting GPU upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub info: ResourceInfo,
    pub payload: Arc<ResourcePayload>,
}

/// Unbounded channel between loading threads and the render thread.
pub struct UploadQueue {
    tx: flume::Sender<UploadRequest>,
    rx: flume::Receiver<UploadRequest>,
}

impl UploadQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self { tx, rx }
    }

    pub(crate) fn push(&self, request: UploadRequest) {
        // Send only fails when all receivers are gone, and we hold one.
        let _ = self.tx.send(request);
    }

    /// Drains everything queued so far. Call from the render thread.
    pub fn drain(&self) -> impl Iterator<Item = UploadRequest> + '_ {
        self.rx.try_iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for UploadQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{ResourceKind, Texture};

    fn request(tag: &str) -> UploadRequest {
        let info = ResourceInfo::new(ResourceKind::Texture, tag, "x.png");
        UploadRequest {
            payload: Arc::new(ResourcePayload::Texture(Texture::placeholder(tag))),
            info,
        }
    }

    #[test]
    fn drain_yields_in_fifo_order() {
        let queue = UploadQueue::new();
        queue.push(request("A1"));
        queue.push(request("A2"));
        assert_eq!(queue.len(), 2);

        let tags: Vec<String> = queue.drain().map(|r| r.info.tag().to_string()).collect();
        assert_eq!(tags, ["A1", "A2"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_on_empty_queue_is_empty() {
        let queue = UploadQueue::new();
        assert_eq!(queue.drain().count(), 0);
    }
}
