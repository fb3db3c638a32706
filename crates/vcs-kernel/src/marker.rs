//! Colour-or-marker bytes in the primary colour line buffer.
//!
//! TIA colour bytes never use bit 0 (luminance is bits 1-3, hue 4-7), so
//! the line-buffer builder borrows it as a tag: even bytes are colours
//! bound for COLUP0, odd bytes steer the emission loop. Bit 7 splits the
//! odd space between window-opening markers, which carry a sprite slot in
//! bits 1-6, and the end-of-sprite marker 0x81.

/// Decoded form of one colour line-buffer byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorEntry {
    /// Plain colour, bit 0 clear.
    Color(u8),
    /// A positioning window opens here for the given sprite slot. Written
    /// on two consecutive lines.
    WindowStart(usize),
    /// The line after a sprite's last graphics row. The emission loop
    /// treats it as an ordinary (hardware-ignored) colour write.
    SpriteEnd,
}

impl ColorEntry {
    /// Pack into a line-buffer byte.
    #[must_use]
    pub fn encode(self) -> u8 {
        match self {
            ColorEntry::Color(color) => color & 0xFE,
            ColorEntry::WindowStart(slot) => {
                debug_assert!(slot < 64, "slot {slot} does not fit the marker field");
                ((slot as u8) << 1) | 0x01
            }
            ColorEntry::SpriteEnd => 0x81,
        }
    }

    /// Unpack a line-buffer byte.
    #[must_use]
    pub fn decode(byte: u8) -> Self {
        if byte & 0x01 == 0 {
            ColorEntry::Color(byte)
        } else if byte & 0x80 == 0 {
            ColorEntry::WindowStart(usize::from(byte >> 1))
        } else {
            ColorEntry::SpriteEnd
        }
    }
}
