#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`RasterBuffer`**: Column-addressed bitmap, one packed byte run per display column
//! - **`draw_line` / `draw_circle`**: Integer rasterizers writing into a `RasterBuffer`
//! - **`FrameBuffer`**: Double buffer split into a drawing `Canvas` and an
//!   interrupt-side `FrameReader`
//! - **`Font`**: Character table of column glyphs for text
//! - **`ColumnScheduler`**: Per-cycle blank/latch/transfer state machine driven
//!   by a timer interrupt
//! - **`RotationSync`**: Once-per-revolution flag that re-anchors the column index
//! - **`ColumnSource`**: Trait supplying one column's bytes per cycle
//! - **`DriverChain`** and the line traits in [`hal`]: Implement these for your hardware
//! - **`init`**: Brings up the driver chain, sensor and timer and returns the scheduler
//!
//! Coordinates are signed (`i16`). Anything outside the buffer is clipped: writes
//! are silently dropped and never touch a neighbouring column.

#[macro_use]
mod fmt;

pub mod bringup;
pub mod buffer;
pub mod config;
pub mod frame;
pub mod hal;
pub mod raster;
pub mod rotation;
pub mod scheduler;
pub mod text;
pub mod time;

pub use bringup::init;
pub use buffer::{RasterBuffer, RasterError};
pub use config::{ConfigError, DisplayConfig, DisplayConfigBuilder};
pub use frame::{Canvas, FrameBuffer, FrameReader};
pub use hal::{
    ByteLink, Channel, ChannelLines, ChannelSelect, DriverChain, Edge, EdgeInput, OutputLine,
    PeriodicTimer, ShiftChain,
};
pub use raster::{draw_circle, draw_line};
pub use rotation::RotationSync;
pub use scheduler::{ColumnScheduler, ColumnSource, CycleReport, CycleState, RenderFn};
pub use text::{Font, FontError, draw_glyph};
pub use time::{TimeDuration, TimeInstant, TimeSource};

/// Number of columns on the reference display.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Number of LEDs per column on the reference display.
pub const DEFAULT_LEDS_PER_COLUMN: u16 = 64;
