//! Fixed-capacity selection arrays.
//!
//! A widget array manages `N` slots with exactly one selected. One gesture
//! kind is native to the array and moves the selection; the other two are
//! forwarded through the `*_default` hooks (a container forwards them to the
//! selected child) and reported to the indexed callbacks.
//!
//! # Highlight consistency
//!
//! When the selection moves while the array is highlighted, the old slot is
//! un-highlighted before the index changes and the new slot highlighted after,
//! so exactly one slot is ever shown as selected.

use alloc::boxed::Box;
use core::fmt;

use log::debug;

use crate::display::PagedDisplay;
use crate::ui::core::{GestureKind, Widget};

pub type IndexedCallback = Box<dyn FnMut(u8)>;
pub type IndexedScrollCallback = Box<dyn FnMut(u8, i16)>;

/// Callbacks that receive the selected index along with the gesture.
#[derive(Default)]
pub struct IndexedCallbacks {
    click: Option<IndexedCallback>,
    double_click: Option<IndexedCallback>,
    scroll: Option<IndexedScrollCallback>,
}

impl fmt::Debug for IndexedCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedCallbacks")
            .field("click", &self.click.is_some())
            .field("double_click", &self.double_click.is_some())
            .field("scroll", &self.scroll.is_some())
            .finish()
    }
}

/// Selection state of an `N`-slot array.
///
/// `selected` is always a valid slot index.
#[derive(Debug)]
pub struct Selection<const N: usize> {
    native: GestureKind,
    selected: u8,
    indexed: IndexedCallbacks,
}

impl<const N: usize> Selection<N> {
    const CAPACITY_OK: () = assert!(N >= 1 && N <= 256, "widget arrays hold 1 to 256 slots");

    /// Create a selection whose `native` gesture moves the selected slot.
    ///
    /// An `initial` index outside the array is ignored and slot 0 is selected.
    pub fn new(native: GestureKind, initial: u8) -> Self {
        let () = Self::CAPACITY_OK;
        Self {
            native,
            selected: if (initial as usize) < N { initial } else { 0 },
            indexed: IndexedCallbacks::default(),
        }
    }

    pub fn native(&self) -> GestureKind {
        self.native
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    /// Slot reached by moving `delta` slots from the current one, wrapping.
    pub fn offset(&self, delta: i32) -> u8 {
        (self.selected as i32 + delta).rem_euclid(N as i32) as u8
    }

    /// Move the selection without touching the attached callbacks.
    pub(crate) fn set(&mut self, index: u8) {
        debug_assert!((index as usize) < N);
        self.selected = index;
    }

    fn fire_click(&mut self) {
        let selected = self.selected;
        if let Some(callback) = self.indexed.click.as_mut() {
            callback(selected);
        }
    }

    fn fire_double_click(&mut self) {
        let selected = self.selected;
        if let Some(callback) = self.indexed.double_click.as_mut() {
            callback(selected);
        }
    }

    fn fire_scroll(&mut self, delta: i16) {
        let selected = self.selected;
        if let Some(callback) = self.indexed.scroll.as_mut() {
            callback(selected, delta);
        }
    }
}

/// Move the selection to `target`, carrying the highlight along.
fn move_selection<const N: usize, A>(array: &mut A, display: &mut dyn PagedDisplay, target: u8)
where
    A: WidgetArray<N> + ?Sized,
{
    let current = array.selection().selected();
    if target == current {
        return;
    }

    let show = array.inverted();
    if show {
        array.invert_selected(display);
    }
    array.selection_mut().set(target);
    debug!("Selection {} -> {} of {}", current, target, N);
    if show {
        array.invert_selected(display);
    }
}

/// Selection arithmetic and gesture routing shared by arrays of widgets.
///
/// Implementors provide the selection state, how to (un)highlight the
/// selected slot, and optionally where non-native gestures go. Their
/// [`Widget`] gesture handlers call the `route_*` methods.
pub trait WidgetArray<const N: usize>: Widget {
    fn selection(&self) -> &Selection<N>;
    fn selection_mut(&mut self) -> &mut Selection<N>;

    /// Toggle the highlight of exactly the selected slot, refreshing it.
    fn invert_selected(&mut self, display: &mut dyn PagedDisplay);

    fn click_default(&mut self, _display: &mut dyn PagedDisplay) {}

    fn double_click_default(&mut self, _display: &mut dyn PagedDisplay) {}

    fn scroll_default(&mut self, _display: &mut dyn PagedDisplay, _delta: i16) {}

    fn selected(&self) -> u8 {
        self.selection().selected()
    }

    /// Select slot `index`. Indices past the end are ignored.
    fn select(&mut self, display: &mut dyn PagedDisplay, index: u8) {
        if (index as usize) < N {
            move_selection(self, display, index);
        }
    }

    fn select_delta(&mut self, display: &mut dyn PagedDisplay, delta: i16) {
        let target = self.selection().offset(delta as i32);
        move_selection(self, display, target);
    }

    fn select_next(&mut self, display: &mut dyn PagedDisplay) {
        self.select_delta(display, 1);
    }

    /// Select the previous slot, wrapping from the first to the last.
    fn select_prev(&mut self, display: &mut dyn PagedDisplay) {
        self.select_delta(display, -1);
    }

    fn route_click(&mut self, display: &mut dyn PagedDisplay) {
        if self.selection().native() == GestureKind::Click {
            self.select_next(display);
        } else {
            self.click_default(display);
            self.selection_mut().fire_click();
        }
        self.callbacks_mut().fire_click();
    }

    fn route_double_click(&mut self, display: &mut dyn PagedDisplay) {
        if self.selection().native() == GestureKind::DoubleClick {
            self.select_next(display);
        } else {
            self.double_click_default(display);
            self.selection_mut().fire_double_click();
        }
        self.callbacks_mut().fire_double_click();
    }

    fn route_scroll(&mut self, display: &mut dyn PagedDisplay, delta: i16) {
        if delta == 0 {
            return;
        }
        if self.selection().native() == GestureKind::Scroll {
            self.select_delta(display, delta);
        } else {
            self.scroll_default(display, delta);
            self.selection_mut().fire_scroll(delta);
        }
        self.callbacks_mut().fire_scroll(delta);
    }

    fn attach_click_callback_array(&mut self, callback: impl FnMut(u8) + 'static)
    where
        Self: Sized,
    {
        self.selection_mut().indexed.click = Some(Box::new(callback));
    }

    fn attach_double_click_callback_array(&mut self, callback: impl FnMut(u8) + 'static)
    where
        Self: Sized,
    {
        self.selection_mut().indexed.double_click = Some(Box::new(callback));
    }

    fn attach_scroll_callback_array(&mut self, callback: impl FnMut(u8, i16) + 'static)
    where
        Self: Sized,
    {
        self.selection_mut().indexed.scroll = Some(Box::new(callback));
    }

    fn detach_click_callback_array(&mut self) {
        self.selection_mut().indexed.click = None;
    }

    fn detach_double_click_callback_array(&mut self) {
        self.selection_mut().indexed.double_click = None;
    }

    fn detach_scroll_callback_array(&mut self) {
        self.selection_mut().indexed.scroll = None;
    }
}
