//! Replay a stuffed-bus trace through a simplified TIA.
//!
//! The model covers what the display kernel drives: background, playfield,
//! both players with NUSIZ replication and vertical delay, RESPx position
//! latching and standard/late HMOVE motion. Writes take effect at
//! store-cycle granularity, so a trace replay exercises the same ordering
//! constraints as real silicon. Missiles, the ball, collisions and audio
//! are out of scope.

mod capture;
mod model;
mod palette;

pub use capture::save_screenshot;
pub use model::{Frame, Tia, replay};
pub use palette::{NTSC_PALETTE, rgb};
