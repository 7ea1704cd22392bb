//! Conversions between page-native, pixmap-absolute and viewport coordinates.
//!
//! Every function here is pure: the zoom, scroll offset and page size are
//! passed in explicitly on each call.

use crate::geometry::{
    PagePoint, PageSize, ScrollOffset, SelectionRect, ViewportPoint, ViewportRect, ZoomState,
};

/// Map a pointer position to page-native units, clamped to the page.
///
/// A drag that overshoots the rendered page still lands on the page edge.
pub fn viewport_to_page_native(
    point: ViewportPoint,
    zoom: ZoomState,
    scroll: ScrollOffset,
    page: PageSize,
) -> PagePoint {
    let factor = zoom.factor();
    let pixmap_x = point.x + scroll.x();
    let pixmap_y = point.y + scroll.y();

    PagePoint::new(
        (pixmap_x / factor).clamp(0.0, page.width),
        (pixmap_y / factor).clamp(0.0, page.height),
    )
}

/// Project a page-native point onto the viewport. Not clamped.
pub fn page_native_to_viewport(
    point: PagePoint,
    zoom: ZoomState,
    scroll: ScrollOffset,
) -> ViewportPoint {
    let factor = zoom.factor();
    ViewportPoint::new(point.x * factor - scroll.x(), point.y * factor - scroll.y())
}

/// Project a selection onto the viewport. The paint layer is responsible for clipping.
pub fn page_rect_to_viewport(
    rect: &SelectionRect,
    zoom: ZoomState,
    scroll: ScrollOffset,
) -> ViewportRect {
    let top_left = page_native_to_viewport(rect.top_left(), zoom, scroll);
    let bottom_right = page_native_to_viewport(rect.bottom_right(), zoom, scroll);
    ViewportRect {
        x: top_left.x,
        y: top_left.y,
        width: bottom_right.x - top_left.x,
        height: bottom_right.y - top_left.y,
    }
}

/// Pixel dimensions of a page rasterized at `zoom`, rounded to the nearest
/// pixel and at least one pixel per axis.
pub fn pixmap_size(page: PageSize, zoom: ZoomState) -> (u32, u32) {
    let factor = zoom.factor();
    let width = (page.width * factor).round() as u32;
    let height = (page.height * factor).round() as u32;
    (width.max(1), height.max(1))
}
