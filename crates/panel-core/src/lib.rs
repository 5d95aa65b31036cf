//! Hardware-independent widget composition layer for panel firmware
//!
//! This crate contains the platform-agnostic UI logic for a control panel with
//! a page-addressed monochrome display and three input gestures (click,
//! double-click and scroll): the widget model, selection arrays, widget
//! containers, highlight rendering, and the framebuffer the widgets draw into.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod display;
pub mod framebuffer;
pub mod ui;
