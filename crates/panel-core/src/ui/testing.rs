//! Test double for the display collaborator.

use alloc::vec::Vec;

use crate::display::{PageRegion, PagedDisplay};
use crate::framebuffer::FrameBuffer;

/// Records refresh requests and keeps inverted pixels in a real framebuffer.
#[derive(Default)]
pub(crate) struct RecordingDisplay {
    pub refreshes: Vec<PageRegion>,
    pub framebuffer: FrameBuffer,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_refresh(&self) -> Option<PageRegion> {
        self.refreshes.last().copied()
    }

    /// Number of lit pixels inside the rectangle.
    pub fn lit_in(&self, x: u8, y: u8, width: u8, height: u8) -> usize {
        (x..x + width)
            .flat_map(|px| (y..y + height).map(move |py| (px, py)))
            .filter(|(px, py)| self.framebuffer.pixel(*px, *py))
            .count()
    }
}

impl PagedDisplay for RecordingDisplay {
    fn refresh(&mut self, region: PageRegion) {
        self.refreshes.push(region);
    }

    fn invert_pixel(&mut self, x: u8, y: u8) {
        self.framebuffer.invert_pixel(x, y);
    }
}
