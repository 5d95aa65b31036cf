//! Highlightable widget occupying a fixed rectangle

use crate::config::{ConfigResult, WidgetLayout};
use crate::display::PagedDisplay;
use crate::ui::core::{DisplayObject, GestureCallbacks, Widget};
use crate::ui::highlight::{HighlightStyle, draw_highlight};

/// A widget with a fixed rectangle and a highlight.
///
/// The host draws the widget's content into the framebuffer; the widget only
/// owns the highlight. [`invert`](Widget::invert) draws or erases the
/// highlight and refreshes the pages it covers.
///
/// # Examples
/// ```ignore
/// let mut ok = DisplayWidget::new(100, 48, 24, 16, HighlightStyle::Box);
/// ok.attach_click_callback(|| info!("ok"));
/// ok.invert(&mut panel, true);
/// ```
#[derive(Debug)]
pub struct DisplayWidget {
    x: u8,
    y: u8,
    width: u8,
    height: u8,
    style: HighlightStyle,
    inverted: bool,
    callbacks: GestureCallbacks,
}

impl DisplayWidget {
    pub fn new(x: u8, y: u8, width: u8, height: u8, style: HighlightStyle) -> Self {
        Self {
            x,
            y,
            width,
            height,
            style,
            inverted: false,
            callbacks: GestureCallbacks::default(),
        }
    }

    /// Build from a stored layout after checking it fits on the panel.
    pub fn from_layout(layout: &WidgetLayout) -> ConfigResult<Self> {
        layout.validate()?;
        Ok(Self::new(
            layout.x,
            layout.y,
            layout.width,
            layout.height,
            layout.style,
        ))
    }

    pub fn style(&self) -> HighlightStyle {
        self.style
    }
}

impl DisplayObject for DisplayWidget {
    fn x(&self) -> u8 {
        self.x
    }

    fn y(&self) -> u8 {
        self.y
    }

    fn width(&self) -> u8 {
        self.width
    }

    fn height(&self) -> u8 {
        self.height
    }

    fn display(&self, display: &mut dyn PagedDisplay) {
        display.refresh(self.region());
    }
}

impl Widget for DisplayWidget {
    fn callbacks_mut(&mut self) -> &mut GestureCallbacks {
        &mut self.callbacks
    }

    fn invert(&mut self, display: &mut dyn PagedDisplay, update_display: bool) {
        draw_highlight(display, self.bounds(), self.style);
        if update_display {
            self.display(display);
        }
        self.inverted = !self.inverted;
    }

    fn inverted(&self) -> bool {
        self.inverted
    }
}
