//! Page-organised 1-bpp framebuffer.
//!
//! Display memory on SH1106-class controllers is split into pages of eight
//! rows. Each byte holds one column of a page, least significant bit on top.
//! The framebuffer mirrors that layout so a page span can be handed to the
//! hardware without repacking.

use core::convert::Infallible;
use core::ops::RangeInclusive;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PAGE_COUNT, PAGE_HEIGHT_PX};

/// Bytes in the framebuffer (128 columns x 8 pages = 1,024).
const BUFFER_LEN: usize = DISPLAY_WIDTH_PX as usize * PAGE_COUNT as usize;

/// RAM copy of the panel contents, implementing `DrawTarget<Color = BinaryColor>`.
///
/// Widgets only ever invert pixels; hosts draw static content (frames,
/// labels, icons) through the `embedded-graphics` primitives.
pub struct FrameBuffer {
    bytes: [u8; BUFFER_LEN],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank (all pixels off) framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
        }
    }

    /// Byte index and bit mask for a pixel, or `None` if it is off-panel.
    #[inline]
    fn locate(x: u8, y: u8) -> Option<(usize, u8)> {
        if x >= DISPLAY_WIDTH_PX || y >= DISPLAY_HEIGHT_PX {
            return None;
        }
        let page = (y / PAGE_HEIGHT_PX) as usize;
        let index = page * DISPLAY_WIDTH_PX as usize + x as usize;
        Some((index, 1 << (y % PAGE_HEIGHT_PX)))
    }

    /// Whether the pixel at `(x, y)` is lit. Off-panel pixels read as unlit.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        Self::locate(x, y).is_some_and(|(index, mask)| self.bytes[index] & mask != 0)
    }

    /// Light or clear a single pixel. Off-panel writes are dropped.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        if let Some((index, mask)) = Self::locate(x, y) {
            if on {
                self.bytes[index] |= mask;
            } else {
                self.bytes[index] &= !mask;
            }
        }
    }

    /// Flip a single pixel. Off-panel writes are dropped.
    pub fn invert_pixel(&mut self, x: u8, y: u8) {
        if let Some((index, mask)) = Self::locate(x, y) {
            self.bytes[index] ^= mask;
        }
    }

    /// Column bytes of one page, clamped to the panel.
    ///
    /// Returns an empty slice for a page or column range that lies entirely
    /// off the panel.
    pub fn page_span(&self, page: u8, columns: RangeInclusive<u8>) -> &[u8] {
        let start = *columns.start();
        let end = (*columns.end()).min(DISPLAY_WIDTH_PX - 1);
        if page >= PAGE_COUNT || start > end {
            return &[];
        }
        let row = page as usize * DISPLAY_WIDTH_PX as usize;
        &self.bytes[row + start as usize..=row + end as usize]
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let (Ok(x), Ok(y)) = (u8::try_from(coord.x), u8::try_from(coord.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xff } else { 0x00 };
        self.bytes.fill(fill);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_page_bit_layout() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(3, 0, true);
        fb.set_pixel(3, 7, true);
        fb.set_pixel(5, 9, true);

        assert_eq!(fb.page_span(0, 3..=3), &[0b1000_0001]);
        assert_eq!(fb.page_span(1, 5..=5), &[0b0000_0010]);
        assert!(fb.pixel(5, 9));
        assert!(!fb.pixel(5, 8));
    }

    #[test]
    fn test_invert_pixel_toggles() {
        let mut fb = FrameBuffer::new();
        fb.invert_pixel(10, 20);
        assert!(fb.pixel(10, 20));
        fb.invert_pixel(10, 20);
        assert!(!fb.pixel(10, 20));
    }

    #[test]
    fn test_off_panel_access_is_dropped() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(DISPLAY_WIDTH_PX, 0, true);
        fb.invert_pixel(0, DISPLAY_HEIGHT_PX);
        assert!(!fb.pixel(DISPLAY_WIDTH_PX, 0));
        assert!(fb.page_span(0, 0..=DISPLAY_WIDTH_PX - 1).iter().all(|b| *b == 0));
    }

    #[test]
    fn test_page_span_clamps() {
        let fb = FrameBuffer::new();
        assert_eq!(fb.page_span(0, 120..=255).len(), 8);
        assert!(fb.page_span(PAGE_COUNT, 0..=7).is_empty());
    }

    #[test]
    fn test_draw_target_rectangle() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(2, 6), Size::new(3, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();

        assert!(fb.pixel(2, 6));
        assert!(fb.pixel(4, 9));
        assert!(!fb.pixel(5, 9));
        // Rows 6-7 land in page 0, rows 8-9 in page 1
        assert_eq!(fb.page_span(0, 2..=4), &[0b1100_0000; 3]);
        assert_eq!(fb.page_span(1, 2..=4), &[0b0000_0011; 3]);
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new();
        fb.clear(BinaryColor::On).unwrap();
        assert!(fb.pixel(127, 63));
        fb.clear(BinaryColor::Off).unwrap();
        assert!(!fb.pixel(127, 63));
    }
}
