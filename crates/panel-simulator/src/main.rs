//! Desktop simulator for the panel-core widget tree.
//!
//! Builds a small sequencer-style page and shows it in an SDL2 window via
//! `embedded-graphics-simulator`. The window only receives the page spans the
//! widgets actually refresh, so missing or excess refreshes are visible
//! directly.
//!
//! # Key bindings
//!
//! | Key             | Gesture           |
//! |-----------------|-------------------|
//! | C / Space       | Click             |
//! | D / Enter       | Double click      |
//! | Up / Right      | Scroll by +1      |
//! | Down / Left     | Scroll by -1      |
//! | Q / Esc         | Quit              |
//!
//! The mouse wheel scrolls as well. Set `RUST_LOG=debug` to trace dispatch
//! and selection moves.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
    sdl2::Keycode,
};
use log::info;

use panel_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PAGE_HEIGHT_PX};
use panel_core::display::{PageSink, PagedPanel};
use panel_core::framebuffer::FrameBuffer;
use panel_core::ui::{
    Direction, DisplayObject, DisplayWidget, Gesture, GestureKind, HighlightStyle,
    MultiDisplayWidget, Widget, WidgetArray, WidgetContainer,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 4;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// Stand-in for the controller RAM: page writes land in a simulator display.
struct WindowSink {
    display: SimulatorDisplay<BinaryColor>,
    writes: usize,
}

impl WindowSink {
    fn new() -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(
                DISPLAY_WIDTH_PX as u32,
                DISPLAY_HEIGHT_PX as u32,
            )),
            writes: 0,
        }
    }
}

impl PageSink for WindowSink {
    type Error = Infallible;

    /// Each byte is one column of the page, least significant bit on top.
    fn write_page(&mut self, page: u8, col_start: u8, data: &[u8]) -> Result<(), Infallible> {
        let top = page as i32 * PAGE_HEIGHT_PX as i32;
        let pixels = data.iter().enumerate().flat_map(|(i, &byte)| {
            let x = col_start as i32 + i as i32;
            (0..PAGE_HEIGHT_PX).map(move |bit| {
                Pixel(
                    Point::new(x, top + bit as i32),
                    BinaryColor::from(byte & (1 << bit) != 0),
                )
            })
        });
        self.writes += 1;
        self.display.draw_iter(pixels)
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Map an SDL keycode to the gesture it stands for.
fn keycode_to_gesture(keycode: Keycode) -> Option<Gesture> {
    match keycode {
        Keycode::C | Keycode::Space => Some(Gesture::Click),
        Keycode::D | Keycode::Return | Keycode::KpEnter => Some(Gesture::DoubleClick),
        Keycode::Up | Keycode::Right => Some(Gesture::Scroll(1)),
        Keycode::Down | Keycode::Left => Some(Gesture::Scroll(-1)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Static content
// ---------------------------------------------------------------------------

/// Outline every slot so unselected widgets are still visible.
fn draw_frames(framebuffer: &mut FrameBuffer, areas: impl IntoIterator<Item = Rectangle>) {
    let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    for area in areas {
        let _ = area.offset(1).into_styled(style).draw(framebuffer);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting panel simulator");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: C=Click  D=DoubleClick  Up/Down=Scroll  Q=Quit");

    let mut panel = PagedPanel::new(WindowSink::new());
    let steps_on = Rc::new(RefCell::new([false; 8]));

    // Step row: scroll picks a step, click toggles it
    let mut steps =
        MultiDisplayWidget::<8>::new(5, 5, 11, 11, 15, Direction::Horizontal, GestureKind::Scroll)
            .with_style(HighlightStyle::Box);
    let on = steps_on.clone();
    steps.attach_click_callback_array(move |step| {
        let mut on = on.borrow_mut();
        on[step as usize] = !on[step as usize];
        info!("Step {} {}", step + 1, if on[step as usize] { "on" } else { "off" });
    });

    // Mode column: scroll picks a mode, click confirms
    let mut modes =
        MultiDisplayWidget::<3>::new(5, 25, 40, 10, 12, Direction::Vertical, GestureKind::Scroll)
            .with_style(HighlightStyle::Corners);
    modes.attach_click_callback_array(|mode| info!("Mode {} selected", mode + 1));

    let mut play = DisplayWidget::new(80, 36, 40, 20, HighlightStyle::Full);
    play.attach_click_callback(|| info!("Play"));

    let mut frames: Vec<Rectangle> = (0..8).map(|i| steps.slot_bounds(i)).collect();
    frames.extend((0..3).map(|i| modes.slot_bounds(i)));
    frames.push(play.bounds());
    draw_frames(panel.framebuffer_mut(), frames);

    // Double click moves between the three groups
    let mut root = WidgetContainer::<3>::new(GestureKind::DoubleClick);
    root.attach_child(&mut steps, 0);
    root.attach_child(&mut modes, 1);
    root.attach_child(&mut play, 2);
    root.attach_scroll_callback_array(|group, delta| info!("Group {} scrolled by {}", group, delta));

    root.invert(&mut panel, false);
    let _ = panel.refresh_all();

    let output_settings = OutputSettingsBuilder::new()
        .scale(WINDOW_SCALE)
        .theme(BinaryColorTheme::OledBlue)
        .build();
    let mut window = Window::new("Panel Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(&panel.sink().display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            let gesture = match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    keycode_to_gesture(keycode)
                }

                SimulatorEvent::MouseWheel { scroll_delta, .. } if scroll_delta.y != 0 => {
                    Some(Gesture::Scroll(scroll_delta.y.clamp(-1, 1) as i16))
                }

                _ => None,
            };

            if let Some(gesture) = gesture {
                let writes_before = panel.sink().writes;
                gesture.dispatch(&mut root, &mut panel);
                info!(
                    "{:?} -> group {}, {} page writes",
                    gesture,
                    root.selected(),
                    panel.sink().writes - writes_before
                );
            }
        }

        window.update(&panel.sink().display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keycode_to_gesture() {
        assert_eq!(keycode_to_gesture(Keycode::C), Some(Gesture::Click));
        assert_eq!(keycode_to_gesture(Keycode::Space), Some(Gesture::Click));
        assert_eq!(keycode_to_gesture(Keycode::Return), Some(Gesture::DoubleClick));
        assert_eq!(keycode_to_gesture(Keycode::Up), Some(Gesture::Scroll(1)));
        assert_eq!(keycode_to_gesture(Keycode::Left), Some(Gesture::Scroll(-1)));
        assert_eq!(keycode_to_gesture(Keycode::Q), None);
    }

    #[test]
    fn test_page_write_unpacks_columns() {
        let mut sink = WindowSink::new();
        sink.write_page(1, 4, &[0b0000_0100, 0b1000_0000]).unwrap();
        assert_eq!(sink.display.get_pixel(Point::new(4, 10)), BinaryColor::On);
        assert_eq!(sink.display.get_pixel(Point::new(4, 9)), BinaryColor::Off);
        assert_eq!(sink.display.get_pixel(Point::new(5, 15)), BinaryColor::On);
        assert_eq!(sink.writes, 1);
    }

    #[test]
    fn test_page_write_clears_unset_bits() {
        let mut sink = WindowSink::new();
        sink.write_page(0, 0, &[0xFF]).unwrap();
        sink.write_page(0, 0, &[0x00]).unwrap();
        assert!((0..8).all(|y| sink.display.get_pixel(Point::new(0, y)) == BinaryColor::Off));
    }
}
