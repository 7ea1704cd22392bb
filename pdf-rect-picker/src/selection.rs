//! Rectangle selection state, kept in page-native units.
//!
//! The controller never stores viewport pixels. Pointer events are mapped to
//! the page on arrival and the stored rectangle is projected back out on
//! demand, so zoom and scroll can change freely without touching it.

use serde::Serialize;

use crate::error::{PickerError, Result};
use crate::geometry::{Page, PagePoint, ScrollOffset, SelectionRect, ViewportPoint, ViewportRect, ZoomState};
use crate::mapper;

/// The view parameters needed to map pointer positions onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewTransform {
    pub zoom: ZoomState,
    pub scroll: ScrollOffset,
}

/// Read-only projection of the committed selection for display and export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionResult {
    pub page_index: usize,
    pub rect: [f32; 4],
    pub width: f32,
    pub height: f32,
}

impl SelectionResult {
    /// Constructor-style literal placed on the clipboard.
    pub fn clipboard_text(&self) -> String {
        let [x0, y0, x1, y1] = self.rect;
        format!("Rect({x0:.2}, {y0:.2}, {x1:.2}, {y1:.2})")
    }

    pub fn rect_label(&self) -> String {
        let [x0, y0, x1, y1] = self.rect;
        format!("Rect: ({x0:.2}, {y0:.2}, {x1:.2}, {y1:.2})")
    }

    pub fn size_label(&self) -> String {
        format!("Size: {:.2} x {:.2}", self.width, self.height)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct SelectionController {
    page: Option<Page>,
    selection: Option<SelectionRect>,
    drag_anchor: Option<PagePoint>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Option<Page> {
        self.page
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Start a new drag, replacing any previous selection.
    pub fn on_pointer_down(&mut self, point: ViewportPoint, view: &ViewTransform) -> Result<()> {
        let page = self.page.ok_or(PickerError::NoDocument)?;
        let anchor = mapper::viewport_to_page_native(point, view.zoom, view.scroll, page.size);
        tracing::debug!(x = anchor.x, y = anchor.y, page = page.index, "drag started");

        self.drag_anchor = Some(anchor);
        self.selection = Some(SelectionRect::degenerate(anchor));
        Ok(())
    }

    /// Move the free corner of the active drag. Ignored when no drag is active.
    pub fn on_pointer_move(&mut self, point: ViewportPoint, view: &ViewTransform) {
        let (Some(anchor), Some(page)) = (self.drag_anchor, self.page) else {
            return;
        };
        let corner = mapper::viewport_to_page_native(point, view.zoom, view.scroll, page.size);
        self.selection = Some(SelectionRect::spanning(anchor, corner));
    }

    /// Finish the drag and return the committed selection, if one was in progress.
    pub fn on_pointer_up(
        &mut self,
        point: ViewportPoint,
        view: &ViewTransform,
    ) -> Option<SelectionResult> {
        if !self.is_dragging() {
            return None;
        }
        self.on_pointer_move(point, view);
        self.finish_drag()
    }

    /// End the drag where the last move left it, for releases with no known position.
    pub fn finish_drag(&mut self) -> Option<SelectionResult> {
        self.drag_anchor.take()?;

        let result = self.current_result();
        if let Some(result) = &result {
            tracing::info!(
                page = result.page_index,
                rect = ?result.rect,
                "selection committed"
            );
        }
        result
    }

    /// Zoom never touches the stored rectangle; hand back its new footprint.
    pub fn on_zoom_changed(&self, view: &ViewTransform) -> Option<ViewportRect> {
        self.projected(view)
    }

    /// Switch pages. Any selection or drag belongs to the old page and is dropped.
    pub fn on_page_changed(&mut self, page: Page) {
        if self.is_dragging() {
            tracing::debug!(from = ?self.page.map(|p| p.index), to = page.index, "drag cancelled by page change");
        }
        self.page = Some(page);
        self.selection = None;
        self.drag_anchor = None;
    }

    pub fn on_clear_requested(&mut self) {
        self.selection = None;
        self.drag_anchor = None;
    }

    pub fn current_result(&self) -> Option<SelectionResult> {
        let rect = self.selection?;
        let page = self.page?;
        Some(SelectionResult {
            page_index: page.index,
            rect: rect.to_array(),
            width: rect.width(),
            height: rect.height(),
        })
    }

    /// The selection in viewport pixels, for painting.
    pub fn projected(&self, view: &ViewTransform) -> Option<ViewportRect> {
        self.selection
            .as_ref()
            .map(|rect| mapper::page_rect_to_viewport(rect, view.zoom, view.scroll))
    }
}
