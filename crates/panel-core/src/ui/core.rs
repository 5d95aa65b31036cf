//! Core UI traits and types for the panel UI system

use alloc::boxed::Box;
use core::fmt;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::display::{PageRegion, PagedDisplay};

/// The three gesture types a panel can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Click,
    DoubleClick,
    Scroll,
}

/// A decoded input gesture delivered to the root of a widget tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
    DoubleClick,
    /// Encoder movement; positive is clockwise
    Scroll(i16),
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Click => GestureKind::Click,
            Gesture::DoubleClick => GestureKind::DoubleClick,
            Gesture::Scroll(_) => GestureKind::Scroll,
        }
    }

    /// Deliver this gesture to `widget`.
    ///
    /// Runs to completion, including nested dispatch and any attached
    /// callbacks, before returning.
    pub fn dispatch(self, widget: &mut dyn Widget, display: &mut dyn PagedDisplay) {
        debug!("Dispatching {:?}", self);
        match self {
            Gesture::Click => widget.on_click(display),
            Gesture::DoubleClick => widget.on_double_click(display),
            Gesture::Scroll(delta) => widget.on_scroll(display, delta),
        }
    }
}

/// A positioned rectangle on the panel.
///
/// Coordinates are device pixels with the origin at the top left.
pub trait DisplayObject {
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn width(&self) -> u8;
    fn height(&self) -> u8;

    fn bounds(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x() as i32, self.y() as i32),
            Size::new(self.width() as u32, self.height() as u32),
        )
    }

    /// Display memory covered by this element, rounded out to whole pages.
    fn region(&self) -> PageRegion {
        PageRegion::covering(self.x(), self.y(), self.width(), self.height())
    }

    /// Ask the display to synchronise this element's area.
    ///
    /// Plain elements are not self-refreshing, so the default does nothing.
    fn display(&self, _display: &mut dyn PagedDisplay) {}
}

pub type Callback = Box<dyn FnMut()>;
pub type ScrollCallback = Box<dyn FnMut(i16)>;

/// Single-slot callbacks for each gesture. Attaching replaces.
#[derive(Default)]
pub struct GestureCallbacks {
    click: Option<Callback>,
    double_click: Option<Callback>,
    scroll: Option<ScrollCallback>,
}

impl GestureCallbacks {
    pub fn attach_click(&mut self, callback: impl FnMut() + 'static) {
        self.click = Some(Box::new(callback));
    }

    pub fn attach_double_click(&mut self, callback: impl FnMut() + 'static) {
        self.double_click = Some(Box::new(callback));
    }

    pub fn attach_scroll(&mut self, callback: impl FnMut(i16) + 'static) {
        self.scroll = Some(Box::new(callback));
    }

    pub fn detach_click(&mut self) {
        self.click = None;
    }

    pub fn detach_double_click(&mut self) {
        self.double_click = None;
    }

    pub fn detach_scroll(&mut self) {
        self.scroll = None;
    }

    pub fn fire_click(&mut self) {
        if let Some(callback) = self.click.as_mut() {
            callback();
        }
    }

    pub fn fire_double_click(&mut self) {
        if let Some(callback) = self.double_click.as_mut() {
            callback();
        }
    }

    pub fn fire_scroll(&mut self, delta: i16) {
        if let Some(callback) = self.scroll.as_mut() {
            callback(delta);
        }
    }
}

impl fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("click", &self.click.is_some())
            .field("double_click", &self.double_click.is_some())
            .field("scroll", &self.scroll.is_some())
            .finish()
    }
}

/// Trait for elements that respond to gestures.
///
/// Every entry point receives the display so that highlight changes can be
/// drawn and refreshed as part of the same call.
pub trait Widget {
    fn callbacks_mut(&mut self) -> &mut GestureCallbacks;

    /// Toggle the highlight. Widgets without a visual ignore this.
    fn invert(&mut self, _display: &mut dyn PagedDisplay, _update_display: bool) {}

    fn inverted(&self) -> bool {
        false
    }

    fn on_click(&mut self, _display: &mut dyn PagedDisplay) {
        self.callbacks_mut().fire_click();
    }

    fn on_double_click(&mut self, _display: &mut dyn PagedDisplay) {
        self.callbacks_mut().fire_double_click();
    }

    fn on_scroll(&mut self, _display: &mut dyn PagedDisplay, delta: i16) {
        if delta != 0 {
            self.callbacks_mut().fire_scroll(delta);
        }
    }

    fn attach_click_callback(&mut self, callback: impl FnMut() + 'static)
    where
        Self: Sized,
    {
        self.callbacks_mut().attach_click(callback);
    }

    fn attach_double_click_callback(&mut self, callback: impl FnMut() + 'static)
    where
        Self: Sized,
    {
        self.callbacks_mut().attach_double_click(callback);
    }

    fn attach_scroll_callback(&mut self, callback: impl FnMut(i16) + 'static)
    where
        Self: Sized,
    {
        self.callbacks_mut().attach_scroll(callback);
    }

    fn detach_click_callback(&mut self) {
        self.callbacks_mut().detach_click();
    }

    fn detach_double_click_callback(&mut self) {
        self.callbacks_mut().detach_double_click();
    }

    fn detach_scroll_callback(&mut self) {
        self.callbacks_mut().detach_scroll();
    }
}

/// A widget with callbacks and no visual of its own.
///
/// Useful as a container child that only triggers host actions.
#[derive(Debug, Default)]
pub struct GestureNode {
    callbacks: GestureCallbacks,
}

impl GestureNode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for GestureNode {
    fn callbacks_mut(&mut self) -> &mut GestureCallbacks {
        &mut self.callbacks
    }
}
