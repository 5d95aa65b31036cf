pub mod display_widget;
pub mod multi_display;

pub use display_widget::DisplayWidget;
pub use multi_display::{Direction, MultiDisplayWidget};
