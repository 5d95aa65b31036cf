//! Row or column of identical highlightable slots
//!
//! A multi-display widget does not own children. Its `N` slots are one
//! visual template repeated at a fixed pixel step, and slot geometry is
//! computed from the index on demand. Only the selected slot is ever drawn or
//! refreshed.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigResult, MultiWidgetLayout};
use crate::display::{PageRegion, PagedDisplay};
use crate::ui::core::{DisplayObject, GestureCallbacks, GestureKind, Widget};
use crate::ui::highlight::{HighlightStyle, draw_highlight};
use crate::ui::layouts::widget_array::{Selection, WidgetArray};

/// Axis along which slots are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
}

/// `N` identical slots laid out along one axis, one of them selected.
///
/// The [`DisplayObject`] position is the origin of slot 0; `width()` and
/// `height()` are the size of a single slot.
///
/// # Examples
/// ```ignore
/// // Four 8x8 step buttons, 10px apart; scrolling moves between them
/// let mut steps = MultiDisplayWidget::<4>::new(0, 0, 8, 8, 10, Direction::Horizontal, GestureKind::Scroll)
///     .with_style(HighlightStyle::Box);
/// steps.attach_click_callback_array(|step| toggle_step(step));
/// ```
#[derive(Debug)]
pub struct MultiDisplayWidget<const N: usize> {
    x: u8,
    y: u8,
    width: u8,
    height: u8,
    step: u8,
    direction: Direction,
    style: HighlightStyle,
    inverted: bool,
    selection: Selection<N>,
    callbacks: GestureCallbacks,
}

impl<const N: usize> MultiDisplayWidget<N> {
    /// Create a widget whose `native` gesture moves the selection.
    ///
    /// Slots default to the `Full` highlight style with slot 0 selected.
    pub fn new(
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        step: u8,
        direction: Direction,
        native: GestureKind,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            step,
            direction,
            style: HighlightStyle::default(),
            inverted: false,
            selection: Selection::new(native, 0),
            callbacks: GestureCallbacks::default(),
        }
    }

    /// Build from a stored layout after validating it for `N` slots.
    pub fn from_layout(layout: &MultiWidgetLayout) -> ConfigResult<Self> {
        layout.validate::<N>()?;
        Ok(Self::new(
            layout.x,
            layout.y,
            layout.width,
            layout.height,
            layout.step,
            layout.direction,
            layout.gesture,
        )
        .with_style(layout.style)
        .with_initial_selection(layout.initial_selection))
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    /// Start with slot `initial` selected. Out-of-range indices are ignored.
    pub fn with_initial_selection(mut self, initial: u8) -> Self {
        if (initial as usize) < N {
            self.selection.set(initial);
        }
        self
    }

    /// Offset of slot `index` from the origin along the layout axis.
    fn slot_offset(&self, index: u8) -> u8 {
        let offset = index as u16 * self.step as u16;
        u8::try_from(offset).unwrap_or(u8::MAX)
    }

    /// Left column of slot `index`.
    pub fn slot_x(&self, index: u8) -> u8 {
        match self.direction {
            Direction::Horizontal => self.x.saturating_add(self.slot_offset(index)),
            Direction::Vertical => self.x,
        }
    }

    /// Top row of slot `index`.
    pub fn slot_y(&self, index: u8) -> u8 {
        match self.direction {
            Direction::Horizontal => self.y,
            Direction::Vertical => self.y.saturating_add(self.slot_offset(index)),
        }
    }

    pub fn slot_bounds(&self, index: u8) -> Rectangle {
        Rectangle::new(
            Point::new(self.slot_x(index) as i32, self.slot_y(index) as i32),
            Size::new(self.width as u32, self.height as u32),
        )
    }

    pub fn slot_region(&self, index: u8) -> PageRegion {
        PageRegion::covering(
            self.slot_x(index),
            self.slot_y(index),
            self.width,
            self.height,
        )
    }
}

impl<const N: usize> DisplayObject for MultiDisplayWidget<N> {
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

    /// Refresh the selected slot only.
    fn display(&self, display: &mut dyn PagedDisplay) {
        display.refresh(self.slot_region(self.selected()));
    }
}

impl<const N: usize> Widget for MultiDisplayWidget<N> {
    fn callbacks_mut(&mut self) -> &mut GestureCallbacks {
        &mut self.callbacks
    }

    fn invert(&mut self, display: &mut dyn PagedDisplay, update_display: bool) {
        draw_highlight(display, self.slot_bounds(self.selected()), self.style);
        if update_display {
            self.display(display);
        }
        self.inverted = !self.inverted;
    }

    fn inverted(&self) -> bool {
        self.inverted
    }

    fn on_click(&mut self, display: &mut dyn PagedDisplay) {
        self.route_click(display);
    }

    fn on_double_click(&mut self, display: &mut dyn PagedDisplay) {
        self.route_double_click(display);
    }

    fn on_scroll(&mut self, display: &mut dyn PagedDisplay, delta: i16) {
        self.route_scroll(display, delta);
    }
}

impl<const N: usize> WidgetArray<N> for MultiDisplayWidget<N> {
    fn selection(&self) -> &Selection<N> {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut Selection<N> {
        &mut self.selection
    }

    fn invert_selected(&mut self, display: &mut dyn PagedDisplay) {
        self.invert(display, true);
    }
}
