//! Stuffed-instruction interface to the Atari 2600 cartridge port.
//!
//! A modern cartridge drives the console by feeding the 6507 a stream of
//! cycle-timed instructions over the bus. There is no frame buffer and no
//! DMA: every TIA register write lands because the instruction performing it
//! was issued at the right CPU cycle. [`StuffedBus`] is the seam between
//! code that schedules those writes and whatever sits on the other end,
//! whether real cartridge glue or the recording [`TraceBus`].
//!
//! # Timing
//!
//! The 6507 runs at one third of the TIA colour clock. A scanline is 76 CPU
//! cycles, 228 colour clocks, of which the first 68 are horizontal blank and
//! the remaining 160 are visible pixels.

pub mod regs;
mod stuffer;
mod trace;

pub use regs::Player;
pub use stuffer::StuffedBus;
pub use trace::{TraceBus, TraceOp};

/// CPU cycles in one scanline.
pub const CYCLES_PER_LINE: u64 = 76;

/// Colour clocks per CPU cycle.
pub const CLOCKS_PER_CYCLE: u64 = 3;

/// Colour clocks in one scanline.
pub const CLOCKS_PER_LINE: u64 = CYCLES_PER_LINE * CLOCKS_PER_CYCLE;

/// Colour clocks of horizontal blank at the left edge of every line.
pub const HBLANK_CLOCKS: u64 = 68;

/// Visible pixels per line.
pub const VISIBLE_PIXELS: usize = 160;
