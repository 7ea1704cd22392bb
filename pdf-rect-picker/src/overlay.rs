use iced::mouse;
use iced::widget::canvas::{self, event, Event, Frame, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::geometry::{ViewportPoint, ViewportRect};

/// Thickness of the page scrollbars. The overlay leaves these strips alone.
pub const SCROLLBAR_WIDTH: f32 = 10.0;

/// Pointer activity over the page, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(ViewportPoint),
    Moved(ViewportPoint),
    Released(ViewportPoint),
    /// The button came up while the cursor was outside the window.
    ReleasedOutside,
}

/// Transparent layer stacked over the page that turns mouse input into
/// [`PointerEvent`]s and paints the current selection.
#[derive(Debug)]
pub struct SelectionOverlay {
    selection: Option<ViewportRect>,
    page_area: ViewportRect,
    dragging: bool,
}

impl SelectionOverlay {
    pub fn new(selection: Option<ViewportRect>, page_area: ViewportRect, dragging: bool) -> Self {
        Self {
            selection,
            page_area,
            dragging,
        }
    }

    /// `position` is relative to the canvas. The scrollbar strips along the
    /// right and bottom edges never count as page.
    fn over_page(&self, position: Point, bounds: Rectangle) -> bool {
        position.x < bounds.width - SCROLLBAR_WIDTH
            && position.y < bounds.height - SCROLLBAR_WIDTH
            && to_rectangle(&self.page_area).contains(position)
    }
}

fn to_viewport(point: Point) -> ViewportPoint {
    ViewportPoint::new(point.x, point.y)
}

fn to_rectangle(rect: &ViewportRect) -> Rectangle {
    Rectangle::new(Point::new(rect.x, rect.y), Size::new(rect.width, rect.height))
}

impl canvas::Program<PointerEvent> for SelectionOverlay {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<PointerEvent>) {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                // Presses off the page fall through to the scrollbars underneath
                match cursor.position_in(bounds) {
                    Some(position) if self.over_page(position, bounds) => (
                        event::Status::Captured,
                        Some(PointerEvent::Pressed(to_viewport(position))),
                    ),
                    _ => (event::Status::Ignored, None),
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) if self.dragging => {
                // Positions outside the canvas are kept so the drag clamps to the page edge
                match cursor.position_from(bounds.position()) {
                    Some(position) => (
                        event::Status::Captured,
                        Some(PointerEvent::Moved(to_viewport(position))),
                    ),
                    None => (event::Status::Ignored, None),
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if self.dragging => {
                let released = match cursor.position_from(bounds.position()) {
                    Some(position) => PointerEvent::Released(to_viewport(position)),
                    None => PointerEvent::ReleasedOutside,
                };
                (event::Status::Captured, Some(released))
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let Some(selection) = self.selection else {
            return Vec::new();
        };

        let mut frame = Frame::new(renderer, bounds.size());
        let rect = to_rectangle(&selection);
        let fill = Color::from_rgba(0.2, 0.5, 1.0, 0.2);
        let border = Color::from_rgb(0.2, 0.5, 1.0);

        frame.fill_rectangle(rect.position(), rect.size(), fill);
        frame.stroke(
            &Path::rectangle(rect.position(), rect.size()),
            Stroke::default().with_color(border).with_width(2.0),
        );

        vec![frame.into_geometry()]
    }

    /// Stays `None` while idle so wheel events reach the scrollable underneath.
    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragging && cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas::Program;

    const PAGE: ViewportRect = ViewportRect {
        x: 0.0,
        y: 0.0,
        width: 600.0,
        height: 800.0,
    };

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(10.0, 20.0), Size::new(400.0, 300.0))
    }

    fn press() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    #[test]
    fn press_on_page_is_reported_relative_to_canvas() {
        let overlay = SelectionOverlay::new(None, PAGE, false);
        let cursor = mouse::Cursor::Available(Point::new(110.0, 70.0));
        let (status, message) = overlay.update(&mut (), press(), bounds(), cursor);

        assert_eq!(status, event::Status::Captured);
        assert_eq!(
            message,
            Some(PointerEvent::Pressed(ViewportPoint::new(100.0, 50.0)))
        );
    }

    #[test]
    fn press_off_page_is_ignored() {
        let small_page = ViewportRect {
            width: 50.0,
            height: 50.0,
            ..PAGE
        };
        let overlay = SelectionOverlay::new(None, small_page, false);
        let cursor = mouse::Cursor::Available(Point::new(300.0, 200.0));
        let (status, message) = overlay.update(&mut (), press(), bounds(), cursor);

        assert_eq!(status, event::Status::Ignored);
        assert_eq!(message, None);
    }

    #[test]
    fn press_on_scrollbar_strips_reaches_the_scrollable() {
        let zoomed_page = ViewportRect {
            width: 1200.0,
            height: 1600.0,
            ..PAGE
        };
        let overlay = SelectionOverlay::new(None, zoomed_page, false);

        for corner in [Point::new(405.0, 170.0), Point::new(200.0, 315.0)] {
            let cursor = mouse::Cursor::Available(corner);
            assert_eq!(
                overlay.update(&mut (), press(), bounds(), cursor),
                (event::Status::Ignored, None)
            );
        }
    }

    #[test]
    fn idle_overlay_lets_wheel_scrolling_through() {
        let overlay = SelectionOverlay::new(None, PAGE, false);
        let cursor = mouse::Cursor::Available(Point::new(110.0, 70.0));
        let wheel = Event::Mouse(mouse::Event::WheelScrolled {
            delta: mouse::ScrollDelta::Lines { x: 0.0, y: -3.0 },
        });

        assert_eq!(
            overlay.update(&mut (), wheel, bounds(), cursor),
            (event::Status::Ignored, None)
        );
        assert_eq!(
            overlay.mouse_interaction(&(), bounds(), cursor),
            mouse::Interaction::None
        );
    }

    #[test]
    fn crosshair_only_while_dragging() {
        let overlay = SelectionOverlay::new(None, PAGE, true);
        let cursor = mouse::Cursor::Available(Point::new(110.0, 70.0));
        assert_eq!(
            overlay.mouse_interaction(&(), bounds(), cursor),
            mouse::Interaction::Crosshair
        );
    }

    #[test]
    fn release_outside_window_still_ends_drag() {
        let overlay = SelectionOverlay::new(None, PAGE, true);
        let released = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        let (status, message) =
            overlay.update(&mut (), released, bounds(), mouse::Cursor::Unavailable);

        assert_eq!(status, event::Status::Captured);
        assert_eq!(message, Some(PointerEvent::ReleasedOutside));
    }

    #[test]
    fn moves_outside_canvas_are_kept_while_dragging() {
        let overlay = SelectionOverlay::new(None, PAGE, true);
        let cursor = mouse::Cursor::Available(Point::new(0.0, 500.0));
        let event = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(0.0, 500.0),
        });
        let (_, message) = overlay.update(&mut (), event, bounds(), cursor);

        assert_eq!(
            message,
            Some(PointerEvent::Moved(ViewportPoint::new(-10.0, 480.0)))
        );
    }

    #[test]
    fn moves_and_releases_without_drag_pass_through() {
        let overlay = SelectionOverlay::new(None, PAGE, false);
        let cursor = mouse::Cursor::Available(Point::new(50.0, 50.0));
        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(50.0, 50.0),
        });
        let released = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));

        assert_eq!(
            overlay.update(&mut (), moved, bounds(), cursor),
            (event::Status::Ignored, None)
        );
        assert_eq!(
            overlay.update(&mut (), released, bounds(), cursor),
            (event::Status::Ignored, None)
        );
    }
}
