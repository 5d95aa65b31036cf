//! Widget container: a selection array over borrowed child widgets
//!
//! Children are owned by whatever assembled the tree; the container only
//! borrows them for its own lifetime. Highlight and non-native gestures tunnel
//! to the selected child, which may itself be a container, so dispatch follows
//! exactly one path from the root to a leaf.

use log::debug;

use crate::display::PagedDisplay;
use crate::ui::core::{GestureCallbacks, GestureKind, Widget};
use crate::ui::layouts::widget_array::{Selection, WidgetArray};

/// Container of up to `N` heterogeneous child widgets.
///
/// # Examples
/// ```ignore
/// let mut rows = MultiDisplayWidget::<4>::new(0, 0, 8, 8, 10, Direction::Horizontal, GestureKind::Scroll);
/// let mut ok = DisplayWidget::new(100, 48, 24, 16, HighlightStyle::Box);
///
/// let mut root = WidgetContainer::<2>::new(GestureKind::DoubleClick);
/// root.attach_child(&mut rows, 0);
/// root.attach_child(&mut ok, 1);
///
/// Gesture::Scroll(1).dispatch(&mut root, &mut panel);
/// ```
pub struct WidgetContainer<'a, const N: usize> {
    children: [Option<&'a mut dyn Widget>; N],
    selection: Selection<N>,
    callbacks: GestureCallbacks,
}

impl<'a, const N: usize> WidgetContainer<'a, N> {
    /// Create an empty container whose `native` gesture moves between children.
    pub fn new(native: GestureKind) -> Self {
        Self::with_initial_selection(native, 0)
    }

    pub fn with_initial_selection(native: GestureKind, initial: u8) -> Self {
        Self {
            children: core::array::from_fn(|_| None),
            selection: Selection::new(native, initial),
            callbacks: GestureCallbacks::default(),
        }
    }

    /// Place `child` in slot `position`, returning the previous occupant.
    ///
    /// # Panics
    /// If `position` is not below `N`.
    pub fn attach_child(
        &mut self,
        child: &'a mut dyn Widget,
        position: u8,
    ) -> Option<&'a mut dyn Widget> {
        debug!("Attaching child at slot {} of {}", position, N);
        self.children[position as usize].replace(child)
    }

    /// Empty slot `position`, returning the previous occupant.
    pub fn detach_child(&mut self, position: u8) -> Option<&'a mut dyn Widget> {
        self.children.get_mut(position as usize)?.take()
    }

    /// Child in slot `index`, or `None` if the slot is empty or past the end.
    pub fn get_child(&self, index: u8) -> Option<&(dyn Widget + 'a)> {
        self.children.get(index as usize)?.as_deref()
    }

    pub fn get_child_mut(&mut self, index: u8) -> Option<&mut (dyn Widget + 'a)> {
        self.children.get_mut(index as usize)?.as_deref_mut()
    }

    fn selected_child(&self) -> Option<&(dyn Widget + 'a)> {
        self.get_child(self.selection.selected())
    }

    fn selected_child_mut(&mut self) -> Option<&mut (dyn Widget + 'a)> {
        let index = self.selection.selected();
        self.get_child_mut(index)
    }
}

impl<const N: usize> Widget for WidgetContainer<'_, N> {
    fn callbacks_mut(&mut self) -> &mut GestureCallbacks {
        &mut self.callbacks
    }

    fn invert(&mut self, display: &mut dyn PagedDisplay, update_display: bool) {
        if let Some(child) = self.selected_child_mut() {
            child.invert(display, update_display);
        }
    }

    /// Whether the selected child is highlighted; `false` for an empty slot.
    fn inverted(&self) -> bool {
        self.selected_child().is_some_and(|child| child.inverted())
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

impl<const N: usize> WidgetArray<N> for WidgetContainer<'_, N> {
    fn selection(&self) -> &Selection<N> {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut Selection<N> {
        &mut self.selection
    }

    fn invert_selected(&mut self, display: &mut dyn PagedDisplay) {
        if let Some(child) = self.selected_child_mut() {
            child.invert(display, true);
        }
    }

    fn click_default(&mut self, display: &mut dyn PagedDisplay) {
        if let Some(child) = self.selected_child_mut() {
            child.on_click(display);
        }
    }

    fn double_click_default(&mut self, display: &mut dyn PagedDisplay) {
        if let Some(child) = self.selected_child_mut() {
            child.on_double_click(display);
        }
    }

    fn scroll_default(&mut self, display: &mut dyn PagedDisplay, delta: i16) {
        if let Some(child) = self.selected_child_mut() {
            child.on_scroll(display, delta);
        }
    }
}
