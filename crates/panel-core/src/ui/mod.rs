//! Panel UI system - selection-driven widget trees for monochrome displays
//!
//! This module provides:
//! - Core traits for positioned elements and gesture-handling widgets
//! - Highlight (inversion) rendering in four styles
//! - A standalone highlightable widget and a linear multi-widget
//! - Selection arrays and widget containers that route gestures and
//!   highlight through nested trees

pub mod components;
pub mod core;
pub mod highlight;
pub mod layouts;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use components::{Direction, DisplayWidget, MultiDisplayWidget};
pub use self::core::{
    Callback, DisplayObject, Gesture, GestureCallbacks, GestureKind, GestureNode, ScrollCallback,
    Widget,
};
pub use highlight::{HighlightStyle, draw_highlight};
pub use layouts::{
    IndexedCallback, IndexedCallbacks, IndexedScrollCallback, Selection, WidgetArray,
    WidgetContainer,
};
