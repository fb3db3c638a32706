//! TIA write-register map.
//!
//! Addresses as seen from the cartridge: zero page, write side only, limited
//! to the registers this workspace drives or models. Missiles, the ball and
//! audio are absent. Strobes (WSYNC, RESPx, HMOVE, HMCLR) trigger on any
//! store; the data byte is ignored.

/// Vertical sync control.
pub const VSYNC: u8 = 0x00;
/// Vertical blank control. Bit 1 blanks the beam.
pub const VBLANK: u8 = 0x01;
/// Halt the CPU until the leading edge of horizontal blank. Strobe.
pub const WSYNC: u8 = 0x02;
/// Player 0 number/size.
pub const NUSIZ0: u8 = 0x04;
/// Player 1 number/size.
pub const NUSIZ1: u8 = 0x05;
/// Player 0 colour/luminance.
pub const COLUP0: u8 = 0x06;
/// Player 1 colour/luminance.
pub const COLUP1: u8 = 0x07;
/// Playfield colour/luminance.
pub const COLUPF: u8 = 0x08;
/// Background colour/luminance.
pub const COLUBK: u8 = 0x09;
/// Playfield control: mirror, score, priority.
pub const CTRLPF: u8 = 0x0A;
/// Playfield bits 0-3, upper nibble, displayed LSB first.
pub const PF0: u8 = 0x0D;
/// Playfield bits 4-11, displayed MSB first.
pub const PF1: u8 = 0x0E;
/// Playfield bits 12-19, displayed LSB first.
pub const PF2: u8 = 0x0F;
/// Reset player 0 position to the beam. Strobe.
pub const RESP0: u8 = 0x10;
/// Reset player 1 position to the beam. Strobe.
pub const RESP1: u8 = 0x11;
/// Player 0 graphics.
pub const GRP0: u8 = 0x1B;
/// Player 1 graphics.
pub const GRP1: u8 = 0x1C;
/// Player 0 horizontal motion, signed nibble in the high bits.
pub const HMP0: u8 = 0x20;
/// Player 1 horizontal motion.
pub const HMP1: u8 = 0x21;
/// Player 0 vertical delay.
pub const VDELP0: u8 = 0x25;
/// Player 1 vertical delay.
pub const VDELP1: u8 = 0x26;
/// Apply horizontal motion. Strobe.
pub const HMOVE: u8 = 0x2A;
/// Clear all horizontal motion registers. Strobe.
pub const HMCLR: u8 = 0x2B;

/// One of the TIA's two player objects.
///
/// A player's motion register sits exactly 0x10 above its position strobe,
/// so a positioning plan only needs to carry this identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Player {
    #[default]
    P0,
    P1,
}

impl Player {
    /// Position-reset strobe address.
    #[must_use]
    pub const fn resp(self) -> u8 {
        match self {
            Player::P0 => RESP0,
            Player::P1 => RESP1,
        }
    }

    /// Horizontal-motion register address.
    #[must_use]
    pub const fn hmp(self) -> u8 {
        match self {
            Player::P0 => HMP0,
            Player::P1 => HMP1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_register_sits_above_the_strobe() {
        assert_eq!(Player::P0.hmp(), Player::P0.resp() + 0x10);
        assert_eq!(Player::P1.hmp(), Player::P1.resp() + 0x10);
    }
}
