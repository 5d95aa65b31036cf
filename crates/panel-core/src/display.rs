//! Display collaborator seen by the widgets.
//!
//! Widgets never talk to the hardware directly. They invert pixels and ask
//! for a rectangle of display memory to be synchronised, expressed in columns
//! and whole pages. [`PagedPanel`] implements that contract on top of a
//! [`FrameBuffer`] and a hardware [`PageSink`].

use core::fmt::Debug;
use core::ops::RangeInclusive;

use log::{error, trace};

use crate::config::{DISPLAY_WIDTH_PX, PAGE_COUNT, PAGE_HEIGHT_PX};
use crate::framebuffer::FrameBuffer;

/// A refresh request: an inclusive column range and an inclusive page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRegion {
    pub col_start: u8,
    pub col_end: u8,
    pub page_start: u8,
    pub page_end: u8,
}

impl PageRegion {
    pub const fn new(col_start: u8, col_end: u8, page_start: u8, page_end: u8) -> Self {
        Self {
            col_start,
            col_end,
            page_start,
            page_end,
        }
    }

    /// Smallest region covering a pixel rectangle.
    ///
    /// Rows are rounded out to whole pages: `[y >> 3, (y + height - 1) >> 3]`.
    pub fn covering(x: u8, y: u8, width: u8, height: u8) -> Self {
        let col_end = x.saturating_add(width.saturating_sub(1));
        let row_end = y.saturating_add(height.saturating_sub(1));
        Self::new(x, col_end, y / PAGE_HEIGHT_PX, row_end / PAGE_HEIGHT_PX)
    }

    pub fn columns(&self) -> RangeInclusive<u8> {
        self.col_start..=self.col_end
    }

    pub fn pages(&self) -> RangeInclusive<u8> {
        self.page_start..=self.page_end
    }
}

/// Capabilities widgets need from the display.
///
/// Object safe so that heterogeneous widget trees can share one dispatch
/// signature regardless of the concrete panel type.
pub trait PagedDisplay {
    /// Synchronise the given region of display memory with the panel.
    fn refresh(&mut self, region: PageRegion);

    /// Flip one pixel in display memory. Off-panel pixels are ignored.
    fn invert_pixel(&mut self, x: u8, y: u8);
}

/// Hardware side of the display: accepts one page span at a time.
///
/// A controller driver implements this by setting the page and column
/// address and streaming `data` as display RAM bytes.
pub trait PageSink {
    type Error;

    fn write_page(&mut self, page: u8, col_start: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// A framebuffer paired with the hardware it is flushed to.
///
/// Every [`refresh`](PagedDisplay::refresh) is written through immediately;
/// nothing is queued between gestures.
pub struct PagedPanel<S: PageSink> {
    framebuffer: FrameBuffer,
    sink: S,
    error: Option<S::Error>,
}

impl<S: PageSink> PagedPanel<S> {
    pub fn new(sink: S) -> Self {
        Self {
            framebuffer: FrameBuffer::new(),
            sink,
            error: None,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Mutable access for drawing static content with `embedded-graphics`.
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take the first sink error recorded since the last call.
    pub fn take_error(&mut self) -> Option<S::Error> {
        self.error.take()
    }

    /// Write the whole framebuffer to the panel.
    pub fn refresh_all(&mut self) -> Result<(), S::Error> {
        for page in 0..PAGE_COUNT {
            let data = self.framebuffer.page_span(page, 0..=DISPLAY_WIDTH_PX - 1);
            self.sink.write_page(page, 0, data)?;
        }
        Ok(())
    }
}

impl<S> PagedDisplay for PagedPanel<S>
where
    S: PageSink,
    S::Error: Debug,
{
    fn refresh(&mut self, region: PageRegion) {
        trace!("Refreshing {:?}", region);

        let last_page = region.page_end.min(PAGE_COUNT - 1);
        for page in region.page_start..=last_page {
            let data = self.framebuffer.page_span(page, region.columns());
            if data.is_empty() {
                continue;
            }
            if let Err(e) = self.sink.write_page(page, region.col_start, data) {
                error!("Failed to write page {}: {:?}", page, e);
                if self.error.is_none() {
                    self.error = Some(e);
                }
                return;
            }
        }
    }

    fn invert_pixel(&mut self, x: u8, y: u8) {
        self.framebuffer.invert_pixel(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Sink that records every write and can be told to fail.
    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<(u8, u8, Vec<u8>)>,
        fail_on_page: Option<u8>,
    }

    impl PageSink for RecordingSink {
        type Error = u8;

        fn write_page(&mut self, page: u8, col_start: u8, data: &[u8]) -> Result<(), u8> {
            if self.fail_on_page == Some(page) {
                return Err(page);
            }
            self.writes.push((page, col_start, data.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_covering_rounds_to_pages() {
        assert_eq!(PageRegion::covering(30, 0, 8, 8), PageRegion::new(30, 37, 0, 0));
        assert_eq!(PageRegion::covering(0, 6, 4, 4), PageRegion::new(0, 3, 0, 1));
        assert_eq!(PageRegion::covering(0, 8, 1, 8), PageRegion::new(0, 0, 1, 1));
    }

    #[test]
    fn test_covering_saturates_at_edge() {
        let region = PageRegion::covering(250, 60, 20, 0);
        assert_eq!(region.col_end, 255);
        assert_eq!(region.pages(), 7..=7);
    }

    #[test]
    fn test_refresh_writes_each_page_span() {
        let mut panel = PagedPanel::new(RecordingSink::default());
        panel.invert_pixel(4, 9);
        panel.refresh(PageRegion::new(3, 5, 0, 1));

        let writes = &panel.sink().writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], (0, 3, alloc::vec![0, 0, 0]));
        assert_eq!(writes[1], (1, 3, alloc::vec![0, 0b10, 0]));
    }

    #[test]
    fn test_refresh_clamps_pages() {
        let mut panel = PagedPanel::new(RecordingSink::default());
        panel.refresh(PageRegion::new(0, 0, 6, 20));
        assert_eq!(panel.sink().writes.len(), 2);
    }

    #[test]
    fn test_sink_failure_is_recorded() {
        let mut panel = PagedPanel::new(RecordingSink {
            fail_on_page: Some(1),
            ..Default::default()
        });
        panel.refresh(PageRegion::new(0, 3, 0, 2));

        // Page 0 went out, page 1 failed, page 2 was abandoned
        assert_eq!(panel.sink().writes.len(), 1);
        assert_eq!(panel.take_error(), Some(1));
        assert_eq!(panel.take_error(), None);
    }

    #[test]
    fn test_refresh_all() {
        let mut panel = PagedPanel::new(RecordingSink::default());
        panel.refresh_all().unwrap();
        assert_eq!(panel.sink().writes.len(), PAGE_COUNT as usize);
        assert!(panel.sink().writes.iter().all(|(_, col, data)| *col == 0 && data.len() == 128));
    }
}
