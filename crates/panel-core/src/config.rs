//! Panel geometry and serialisable widget layouts.
//!
//! Geometry is fixed at compile time. Layouts describe where widgets sit on the
//! panel and can be stored as `postcard` blobs (for example in flash) and
//! decoded at startup.

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::ui::{Direction, GestureKind, HighlightStyle};

/// Panel width in pixels (columns).
pub const DISPLAY_WIDTH_PX: u8 = 128;

/// Panel height in pixels (rows).
pub const DISPLAY_HEIGHT_PX: u8 = 64;

/// Rows per display memory page.
pub const PAGE_HEIGHT_PX: u8 = 8;

/// Number of pages covering the panel height.
pub const PAGE_COUNT: u8 = DISPLAY_HEIGHT_PX / PAGE_HEIGHT_PX;

/// Error types for layout configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The stored blob is not a valid layout
    #[error("Layout decode failed: {0}")]
    Decode(postcard::Error),

    /// The layout does not fit on the panel
    #[error("Layout at ({x}, {y}) spanning {width}x{height} extends past the panel")]
    OutOfBounds {
        /// Left column of the offending area
        x: u16,
        /// Top row of the offending area
        y: u16,
        /// Width of the offending area
        width: u16,
        /// Height of the offending area
        height: u16,
    },

    /// The initial selection does not name a slot
    #[error("Initial selection {selection} exceeds capacity {capacity}")]
    InvalidSelection {
        /// Requested initial selection
        selection: u8,
        /// Number of slots in the array
        capacity: usize,
    },
}

/// Result type for layout configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

fn check_area(x: u16, y: u16, width: u16, height: u16) -> ConfigResult<()> {
    if x + width > DISPLAY_WIDTH_PX as u16 || y + height > DISPLAY_HEIGHT_PX as u16 {
        return Err(ConfigError::OutOfBounds {
            x,
            y,
            width,
            height,
        });
    }
    Ok(())
}

/// Placement of a single highlightable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
    pub style: HighlightStyle,
}

impl WidgetLayout {
    /// Decode and validate a layout from a `postcard` blob.
    pub fn from_bytes(bytes: &[u8]) -> ConfigResult<Self> {
        let layout: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check that the widget lies entirely on the panel.
    pub fn validate(&self) -> ConfigResult<()> {
        check_area(
            self.x as u16,
            self.y as u16,
            self.width as u16,
            self.height as u16,
        )
    }
}

/// Placement of a row or column of identical widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiWidgetLayout {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
    /// Distance in pixels between the origins of neighbouring slots
    pub step: u8,
    pub direction: Direction,
    pub style: HighlightStyle,
    /// Gesture that moves the selection instead of being forwarded
    pub gesture: GestureKind,
    pub initial_selection: u8,
}

impl MultiWidgetLayout {
    /// Decode a layout from a `postcard` blob and validate it for `N` slots.
    pub fn from_bytes<const N: usize>(bytes: &[u8]) -> ConfigResult<Self> {
        let layout: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        layout.validate::<N>()?;
        Ok(layout)
    }

    /// Check that all `N` slots lie on the panel and the initial selection exists.
    pub fn validate<const N: usize>(&self) -> ConfigResult<()> {
        if self.initial_selection as usize >= N {
            return Err(ConfigError::InvalidSelection {
                selection: self.initial_selection,
                capacity: N,
            });
        }

        // The last slot is the furthest from the origin
        let span = (N.saturating_sub(1) as u16).saturating_mul(self.step as u16);
        let (width, height) = match self.direction {
            Direction::Horizontal => (span + self.width as u16, self.height as u16),
            Direction::Vertical => (self.width as u16, span + self.height as u16),
        };
        check_area(self.x as u16, self.y as u16, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_layout() -> MultiWidgetLayout {
        MultiWidgetLayout {
            x: 0,
            y: 0,
            width: 8,
            height: 8,
            step: 10,
            direction: Direction::Horizontal,
            style: HighlightStyle::Box,
            gesture: GestureKind::Click,
            initial_selection: 1,
        }
    }

    #[test]
    fn test_page_count_covers_panel() {
        assert_eq!(PAGE_COUNT, 8);
        assert_eq!(PAGE_COUNT as u16 * PAGE_HEIGHT_PX as u16, DISPLAY_HEIGHT_PX as u16);
    }

    #[test]
    fn test_decode_stored_multi_layout() {
        let bytes = postcard::to_allocvec(&row_layout()).unwrap();
        let decoded = MultiWidgetLayout::from_bytes::<4>(&bytes).unwrap();
        assert_eq!(decoded, row_layout());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = WidgetLayout::from_bytes(&[0xff]);
        assert!(matches!(result, Err(ConfigError::Decode(_))));
    }

    #[test]
    fn test_multi_layout_past_right_edge() {
        // 13 slots: last origin at 120, plus 8 wide = 128 fits; 14 does not
        assert!(row_layout().validate::<13>().is_ok());
        assert!(matches!(
            row_layout().validate::<14>(),
            Err(ConfigError::OutOfBounds { x: 0, width: 138, .. })
        ));
    }

    #[test]
    fn test_multi_layout_vertical_extent() {
        let mut layout = row_layout();
        layout.direction = Direction::Vertical;
        layout.step = 16;
        assert!(layout.validate::<4>().is_ok());
        assert!(layout.validate::<5>().is_err());
    }

    #[test]
    fn test_initial_selection_beyond_capacity() {
        let mut layout = row_layout();
        layout.initial_selection = 4;
        assert!(matches!(
            layout.validate::<4>(),
            Err(ConfigError::InvalidSelection {
                selection: 4,
                capacity: 4
            })
        ));
    }

    #[test]
    fn test_widget_layout_bounds() {
        let layout = WidgetLayout {
            x: 120,
            y: 56,
            width: 8,
            height: 8,
            style: HighlightStyle::Full,
        };
        assert!(layout.validate().is_ok());

        let too_tall = WidgetLayout { height: 9, ..layout };
        assert!(too_tall.validate().is_err());
    }
}
