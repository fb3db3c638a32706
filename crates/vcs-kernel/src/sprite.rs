//! Sprite description handed to the kernel each frame.

/// Player replication and scaling modes, as the NUSIZ registers encode them.
///
/// Discriminants are the hardware encoding. Close spacing puts copies 16
/// pixels apart, medium 32, wide 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NumberSize {
    OneCopy = 0,
    TwoCopiesClose = 1,
    TwoCopiesMedium = 2,
    ThreeCopiesClose = 3,
    TwoCopiesWide = 4,
    DoubleSize = 5,
    ThreeCopiesMedium = 6,
    QuadSize = 7,
}

impl NumberSize {
    /// Hardware encoding for a NUSIZx write.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// One sprite, described a scanline at a time.
///
/// The kernel borrows these for the duration of a single
/// [`render`](crate::MultiSpriteKernel::render) call and never stores them;
/// the caller keeps ownership of the pixel data between frames.
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    /// Rows of graphics and colour data.
    pub height: usize,
    /// Left edge of the first copy, 0..160.
    pub position_x: u8,
    /// First scanline of the graphics, 2..192. The two lines above it carry
    /// the positioning window.
    pub position_y: u8,
    /// Frames dropped by the caller's animation pacing. Bookkeeping only;
    /// the kernel never reads it.
    pub frames_skipped: u32,
    /// Replication and scaling mode.
    pub number_size: NumberSize,
    /// One 8-pixel row per scanline, at least `height` rows.
    pub graphics: &'a [u8],
    /// One colour per scanline, at least `height` entries. Bit 0 is
    /// reserved and forced clear on the way into the line buffers.
    pub colors: &'a [u8],
}
