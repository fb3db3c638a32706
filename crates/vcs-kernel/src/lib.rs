//! Frame-buffer-less four-sprite rendering for the Atari 2600.
//!
//! The TIA draws whatever its registers hold at the instant the beam passes,
//! so a display exists only as a schedule of register writes. This crate
//! builds that schedule for four independently moving sprites over a banded
//! playfield: resolve each sprite's X into a strobe slot and nudge pair,
//! rasterize graphics and colours into per-scanline line buffers, then
//! stream 192 scanlines of writes in which every control-flow branch is
//! cycle-balanced.
//!
//! # Timing
//!
//! A scanline is 76 CPU cycles (228 colour clocks, the first 68 horizontal
//! blank). [`MultiSpriteKernel::render`] owns the bus from its opening
//! WSYNC to the closing VBLANK write and accounts for every cycle in
//! between.

mod kernel;
mod marker;
mod positioning;
mod sprite;
mod startup;

pub use kernel::{MAX_SPRITES, MultiSpriteKernel, PLAYFIELD_STRIDE, SCREEN_HEIGHT};
pub use marker::ColorEntry;
pub use positioning::{HorizontalTiming, SpriteMove, horizontal_timing};
pub use sprite::{NumberSize, Sprite};
pub use startup::power_up;
