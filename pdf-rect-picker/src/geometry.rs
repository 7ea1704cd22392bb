//! Value types for the three coordinate spaces the picker works in.
//!
//! Page-native values are what the user ultimately reads out. Viewport values
//! only exist while projecting to or from the screen.

/// A point in page-native units (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PagePoint {
    pub x: f32,
    pub y: f32,
}

impl PagePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A point in pixels relative to the visible, scrolled area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportPoint {
    pub x: f32,
    pub y: f32,
}

impl ViewportPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Intrinsic page dimensions in page-native units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// Negative or NaN dimensions collapse to zero so the clamp range is never inverted.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// The whole page as a rectangle.
    pub fn bounds(&self) -> SelectionRect {
        SelectionRect::spanning(PagePoint::default(), PagePoint::new(self.width, self.height))
    }
}

/// The page currently shown, identified by its zero-based index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub index: usize,
    pub size: PageSize,
}

impl Page {
    pub fn new(index: usize, size: PageSize) -> Self {
        Self { index, size }
    }
}

/// Uniform scale from page-native units to pixmap pixels.
///
/// Always strictly positive and finite. Constructing one from anything else is
/// a caller bug and panics.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomState(f32);

impl ZoomState {
    pub const DEFAULT: ZoomState = ZoomState(1.0);

    pub fn new(factor: f32) -> Self {
        assert!(
            factor.is_finite() && factor > 0.0,
            "zoom factor must be positive and finite, got {factor}"
        );
        Self(factor)
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    /// Zoom expressed as a whole percentage, for display.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Top-left of the visible area inside the full zoomed pixmap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    x: f32,
    y: f32,
}

impl ScrollOffset {
    pub const ORIGIN: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.max(0.0),
            y: y.max(0.0),
        }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }
}

/// A normalized rectangle in page-native units: `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl SelectionRect {
    /// Zero-area rectangle sitting on a single point.
    pub fn degenerate(at: PagePoint) -> Self {
        Self {
            x0: at.x,
            y0: at.y,
            x1: at.x,
            y1: at.y,
        }
    }

    /// Smallest rectangle containing both corners, in whatever order they come.
    pub fn spanning(a: PagePoint, b: PagePoint) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    pub fn top_left(&self) -> PagePoint {
        PagePoint::new(self.x0, self.y0)
    }

    pub fn bottom_right(&self) -> PagePoint {
        PagePoint::new(self.x1, self.y1)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// A rectangle projected into viewport pixels, ready for painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}
