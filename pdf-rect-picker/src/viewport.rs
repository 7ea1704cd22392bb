use crate::config::ZoomLimits;
use crate::geometry::{ScrollOffset, ZoomState};
use crate::selection::ViewTransform;

/// Viewport manages the current view state of a PDF document
#[derive(Debug, Clone)]
pub struct Viewport {
    current_page: usize,
    page_count: usize,
    zoom: ZoomState,
    scroll: ScrollOffset,
    limits: ZoomLimits,
}

impl Viewport {
    pub fn new(page_count: usize, limits: ZoomLimits) -> Self {
        Self {
            current_page: 0,
            page_count,
            zoom: ZoomState::DEFAULT,
            scroll: ScrollOffset::ORIGIN,
            limits,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns `false` and leaves the page unchanged when `page` is out of range.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < self.page_count {
            self.current_page = page;
            // Reset scroll when changing pages
            self.scroll = ScrollOffset::ORIGIN;
            true
        } else {
            false
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page + 1 < self.page_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 0
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = self.limits.clamp(self.zoom.factor() * self.limits.step());
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.limits.clamp(self.zoom.factor() / self.limits.step());
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = ZoomState::DEFAULT;
    }

    /// Record where the scrollable area currently sits.
    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            zoom: self.zoom,
            scroll: self.scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_steps_are_multiplicative_and_clamped() {
        let mut viewport = Viewport::new(3, ZoomLimits::default());
        viewport.zoom_in();
        assert_eq!(viewport.zoom(), ZoomState::new(1.25));

        for _ in 0..20 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom(), ZoomState::new(6.0));

        for _ in 0..40 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom(), ZoomState::new(0.2));

        viewport.reset_zoom();
        assert_eq!(viewport.zoom(), ZoomState::DEFAULT);
    }

    #[test]
    fn custom_limits_bound_the_steps() {
        let limits = ZoomLimits::new(0.5, 2.0, 2.0).unwrap();
        let mut viewport = Viewport::new(1, limits);
        viewport.zoom_in();
        viewport.zoom_in();
        assert_eq!(viewport.zoom(), ZoomState::new(2.0));
        viewport.reset_zoom();
        viewport.zoom_out();
        viewport.zoom_out();
        assert_eq!(viewport.zoom(), ZoomState::new(0.5));
    }

    #[test]
    fn navigation_stays_in_range_and_resets_scroll() {
        let mut viewport = Viewport::new(2, ZoomLimits::default());
        assert!(!viewport.has_previous_page());
        assert!(viewport.has_next_page());

        viewport.set_scroll(ScrollOffset::new(40.0, 90.0));
        assert!(viewport.set_page(1));
        assert_eq!(viewport.current_page(), 1);
        assert_eq!(viewport.transform().scroll, ScrollOffset::ORIGIN);
        assert!(!viewport.has_next_page());
        assert!(viewport.has_previous_page());

        assert!(!viewport.set_page(7));
        assert_eq!(viewport.current_page(), 1);
    }

    #[test]
    fn empty_document_has_no_navigation() {
        let mut viewport = Viewport::new(0, ZoomLimits::default());
        assert!(!viewport.has_next_page());
        assert!(!viewport.has_previous_page());
        assert!(!viewport.set_page(0));
    }

    #[test]
    fn transform_reflects_zoom_and_scroll() {
        let limits = ZoomLimits::new(0.5, 4.0, 2.0).unwrap();
        let mut viewport = Viewport::new(1, limits);
        viewport.zoom_in();
        viewport.set_scroll(ScrollOffset::new(5.0, 6.0));
        assert_eq!(
            viewport.transform(),
            ViewTransform {
                zoom: ZoomState::new(2.0),
                scroll: ScrollOffset::new(5.0, 6.0),
            }
        );
    }
}
