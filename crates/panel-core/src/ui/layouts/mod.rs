//! Selection arrays and widget containers

pub mod container;
pub mod widget_array;

pub use container::WidgetContainer;
pub use widget_array::{
    IndexedCallback, IndexedCallbacks, IndexedScrollCallback, Selection, WidgetArray,
};
