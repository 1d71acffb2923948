//! Depth-1 render queue.
//!
//! At most one render is in flight. Requests arriving meanwhile overwrite a
//! single pending slot, so only the most recent one survives.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderQueue {
    rendering: bool,
    pending: Option<u32>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request for `page`.
    ///
    /// Returns `Some(page)` when the caller must start rendering it now. While
    /// a render is active the page becomes the pending one and `None` is
    /// returned.
    pub fn request(&mut self, page: u32) -> Option<u32> {
        if self.rendering {
            if let Some(dropped) = self.pending.replace(page) {
                log::debug!("render of page {} superseded by page {}", dropped, page);
            }
            None
        } else {
            self.rendering = true;
            Some(page)
        }
    }

    /// Marks the active render as complete.
    ///
    /// Returns the pending page, which the caller renders next; the queue
    /// stays busy in that case. Otherwise the queue goes idle.
    pub fn finish(&mut self) -> Option<u32> {
        let next = self.pending.take();
        self.rendering = next.is_some();
        next
    }

    /// Drops the active render and any pending one after a failure.
    pub fn abort(&mut self) {
        self.rendering = false;
        self.pending = None;
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn pending(&self) -> Option<u32> {
        self.pending
    }
}
