//! Highlight rendering.
//!
//! A highlight is drawn by inverting pixels, so drawing the same highlight a
//! second time restores the original contents.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};
use serde::{Deserialize, Serialize};

use crate::display::PagedDisplay;

/// Length in pixels of each arm of a corner mark.
const CORNER_ARM_PX: i32 = 3;

/// Shape used to highlight a selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighlightStyle {
    /// Invert the whole area
    #[default]
    Full,
    /// Invert a one pixel border
    Box,
    /// Invert every other pixel of the border
    DottedBox,
    /// Invert L-shaped marks at the four corners
    Corners,
}

impl HighlightStyle {
    /// Whether `point` belongs to this style's shape over `top_left..=bottom_right`.
    fn covers(self, point: Point, top_left: Point, bottom_right: Point) -> bool {
        let dx = point.x - top_left.x;
        let dy = point.y - top_left.y;
        let on_border = dx == 0 || dy == 0 || point.x == bottom_right.x || point.y == bottom_right.y;

        match self {
            HighlightStyle::Full => true,
            HighlightStyle::Box => on_border,
            HighlightStyle::DottedBox => on_border && (dx + dy) % 2 == 0,
            HighlightStyle::Corners => {
                let near_x = dx < CORNER_ARM_PX || bottom_right.x - point.x < CORNER_ARM_PX;
                let near_y = dy < CORNER_ARM_PX || bottom_right.y - point.y < CORNER_ARM_PX;
                on_border && near_x && near_y
            }
        }
    }
}

/// Invert the pixels of `style`'s shape over `bounds`.
///
/// Only touches display memory; refreshing the panel is up to the caller.
pub fn draw_highlight(display: &mut dyn PagedDisplay, bounds: Rectangle, style: HighlightStyle) {
    let Some(bottom_right) = bounds.bottom_right() else {
        return;
    };

    for point in bounds.points() {
        if !style.covers(point, bounds.top_left, bottom_right) {
            continue;
        }
        if let (Ok(x), Ok(y)) = (u8::try_from(point.x), u8::try_from(point.y)) {
            display.invert_pixel(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::RecordingDisplay;

    fn area() -> Rectangle {
        Rectangle::new(Point::new(10, 4), Size::new(8, 8))
    }

    #[test]
    fn test_full_inverts_everything() {
        let mut display = RecordingDisplay::new();
        draw_highlight(&mut display, area(), HighlightStyle::Full);
        assert_eq!(display.lit_in(10, 4, 8, 8), 64);
        assert_eq!(display.lit_in(0, 0, 128, 64), 64);
    }

    #[test]
    fn test_box_is_border_only() {
        let mut display = RecordingDisplay::new();
        draw_highlight(&mut display, area(), HighlightStyle::Box);
        assert_eq!(display.lit_in(10, 4, 8, 8), 28);
        assert_eq!(display.lit_in(11, 5, 6, 6), 0);
    }

    #[test]
    fn test_dotted_box_alternates() {
        let mut display = RecordingDisplay::new();
        draw_highlight(&mut display, area(), HighlightStyle::DottedBox);
        assert_eq!(display.lit_in(10, 4, 8, 8), 14);
        assert!(display.framebuffer.pixel(10, 4));
        assert!(!display.framebuffer.pixel(11, 4));
    }

    #[test]
    fn test_corners_marks() {
        let mut display = RecordingDisplay::new();
        draw_highlight(&mut display, area(), HighlightStyle::Corners);
        // Each corner: 3 + 3 - 1 shared pixel
        assert_eq!(display.lit_in(10, 4, 8, 8), 20);
        assert!(display.framebuffer.pixel(17, 11));
        assert!(!display.framebuffer.pixel(13, 4));
    }

    #[test]
    fn test_second_draw_erases() {
        for style in [
            HighlightStyle::Full,
            HighlightStyle::Box,
            HighlightStyle::DottedBox,
            HighlightStyle::Corners,
        ] {
            let mut display = RecordingDisplay::new();
            draw_highlight(&mut display, area(), style);
            draw_highlight(&mut display, area(), style);
            assert_eq!(display.lit_in(0, 0, 128, 64), 0, "{:?} left pixels behind", style);
        }
    }

    #[test]
    fn test_empty_area_draws_nothing() {
        let mut display = RecordingDisplay::new();
        draw_highlight(
            &mut display,
            Rectangle::new(Point::new(5, 5), Size::zero()),
            HighlightStyle::Full,
        );
        assert_eq!(display.lit_in(0, 0, 128, 64), 0);
        assert!(display.refreshes.is_empty());
    }
}
