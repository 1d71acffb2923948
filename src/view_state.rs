//! Mutable state of one viewing session.

use crate::navigation::clamp_page;
use crate::render_queue::RenderQueue;
use crate::schema::ViewerOptions;
use crate::viewport::Zoom;

/// Current page, zoom and render queue.
///
/// Every method that may trigger a render returns the page the caller must
/// start rendering now, or `None` when nothing is to be started (document not
/// loaded yet, or the request was queued behind an active render).
#[derive(Debug, Clone)]
pub struct ViewState {
    page_count: Option<u32>,
    current_page: u32,
    zoom: Zoom,
    queue: RenderQueue,
}

impl ViewState {
    pub fn new(zoom: Zoom) -> Self {
        Self {
            page_count: None,
            current_page: 1,
            zoom,
            queue: RenderQueue::new(),
        }
    }

    pub fn from_options(options: &ViewerOptions) -> Self {
        Self::new(Zoom::new(
            options.initial_zoom,
            options.zoom_step,
            options.min_zoom,
            options.max_zoom,
        ))
    }

    pub fn document_loaded(&mut self, page_count: u32) {
        self.page_count = Some(page_count);
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    pub fn go_to(&mut self, requested: i64) -> Option<u32> {
        let page = clamp_page(requested, self.page_count?)?;
        self.current_page = page;
        self.queue.request(page)
    }

    pub fn next(&mut self) -> Option<u32> {
        self.go_to(i64::from(self.current_page) + 1)
    }

    pub fn prev(&mut self) -> Option<u32> {
        self.go_to(i64::from(self.current_page) - 1)
    }

    pub fn zoom_in(&mut self) -> Option<u32> {
        self.zoom.step_in();
        self.refresh()
    }

    pub fn zoom_out(&mut self) -> Option<u32> {
        self.zoom.step_out();
        self.refresh()
    }

    /// Re-renders the current page, e.g. after the window was resized.
    pub fn refresh(&mut self) -> Option<u32> {
        match self.page_count {
            Some(count) if count > 0 => self.queue.request(self.current_page),
            _ => None,
        }
    }

    pub fn finish_render(&mut self) -> Option<u32> {
        self.queue.finish()
    }

    pub fn abort_render(&mut self) {
        self.queue.abort();
    }

    pub fn is_rendering(&self) -> bool {
        self.queue.is_rendering()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Zoom::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(pages: u32) -> ViewState {
        let mut state = ViewState::default();
        state.document_loaded(pages);
        state
    }

    #[test]
    fn navigation_before_load_is_noop() {
        let mut state = ViewState::default();
        assert_eq!(state.go_to(3), None);
        assert_eq!(state.next(), None);
        assert_eq!(state.zoom_in(), None);
        assert_eq!(state.current_page(), 1);
        assert!(!state.is_rendering());
    }

    #[test]
    fn go_to_clamps() {
        let mut state = loaded(10);
        assert_eq!(state.go_to(0), Some(1));
        state.finish_render();
        assert_eq!(state.go_to(999), Some(10));
        assert_eq!(state.current_page(), 10);
    }

    #[test]
    fn next_at_last_page_rerenders_last() {
        let mut state = loaded(2);
        state.go_to(2);
        state.finish_render();
        assert_eq!(state.next(), Some(2));
        state.finish_render();
        assert_eq!(state.prev(), Some(1));
        state.finish_render();
        assert_eq!(state.prev(), Some(1));
    }

    #[test]
    fn rapid_navigation_coalesces() {
        let mut state = loaded(20);
        assert_eq!(state.go_to(1), Some(1));
        assert_eq!(state.next(), None);
        assert_eq!(state.next(), None);
        assert_eq!(state.next(), None);
        assert_eq!(state.current_page(), 4);
        assert_eq!(state.finish_render(), Some(4));
        assert_eq!(state.finish_render(), None);
    }

    #[test]
    fn zoom_requests_current_page() {
        let mut state = loaded(5);
        state.go_to(3);
        state.finish_render();
        assert_eq!(state.zoom_in(), Some(3));
        assert_eq!(state.zoom().label(), "130%");
        assert_eq!(state.zoom_out(), None);
        assert_eq!(state.finish_render(), Some(3));
    }

    #[test]
    fn empty_document_never_renders() {
        let mut state = loaded(0);
        assert_eq!(state.go_to(1), None);
        assert_eq!(state.refresh(), None);
        assert_eq!(state.zoom_in(), None);
    }

    #[test]
    fn abort_allows_new_render() {
        let mut state = loaded(5);
        state.go_to(2);
        state.go_to(4);
        state.abort_render();
        assert_eq!(state.refresh(), Some(4));
    }

    #[test]
    fn options_feed_zoom() {
        let mut options = ViewerOptions::default();
        options.initial_zoom = 1.0;
        let state = ViewState::from_options(&options);
        assert_eq!(state.zoom().label(), "100%");
    }
}
