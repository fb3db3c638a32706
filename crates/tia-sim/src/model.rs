//! The register model and trace replay.

use vcs_bus::{CLOCKS_PER_LINE, HBLANK_CLOCKS, TraceOp, VISIBLE_PIXELS, regs};

const LINE: i16 = VISIBLE_PIXELS as i16;

/// One replayed frame: a row of TIA colour bytes per visible scanline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<[u8; VISIBLE_PIXELS]>,
}

impl Frame {
    /// Visible scanlines collected between the VBLANK edges.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PlayerState {
    /// Leftmost pixel column of the first copy.
    pos: i16,
    /// Displayed bitmap when vertically delayed.
    old: u8,
    /// Bitmap as last written.
    new: u8,
    vdel: bool,
    color: u8,
    nusiz: u8,
    hm: u8,
}

/// Register-level TIA state.
///
/// [`apply`](Self::apply) consumes one write at its effective colour clock;
/// [`pixel`](Self::pixel) asks what colour a column would show under the
/// current state. [`replay`] drives both from a recorded trace.
#[derive(Debug, Default)]
pub struct Tia {
    colubk: u8,
    colupf: u8,
    pf0: u8,
    pf1: u8,
    pf2: u8,
    p0: PlayerState,
    p1: PlayerState,
    vblank: u8,
}

impl Tia {
    /// Apply one register write at an absolute colour clock.
    pub fn apply(&mut self, reg: u8, value: u8, clock: u64) {
        match reg {
            regs::VBLANK => self.vblank = value,
            regs::COLUBK => self.colubk = value,
            regs::COLUPF => self.colupf = value,
            regs::COLUP0 => self.p0.color = value,
            regs::COLUP1 => self.p1.color = value,
            regs::NUSIZ0 => self.p0.nusiz = value & 0x07,
            regs::NUSIZ1 => self.p1.nusiz = value & 0x07,
            regs::PF0 => self.pf0 = value,
            regs::PF1 => self.pf1 = value,
            regs::PF2 => self.pf2 = value,
            regs::GRP0 => {
                self.p0.new = value;
                self.p1.old = self.p1.new;
            }
            regs::GRP1 => {
                self.p1.new = value;
                self.p0.old = self.p0.new;
            }
            regs::VDELP0 => self.p0.vdel = value & 0x01 != 0,
            regs::VDELP1 => self.p1.vdel = value & 0x01 != 0,
            regs::HMP0 => self.p0.hm = value,
            regs::HMP1 => self.p1.hm = value,
            regs::HMCLR => {
                self.p0.hm = 0;
                self.p1.hm = 0;
            }
            regs::RESP0 => self.p0.pos = Self::resp_column(clock),
            regs::RESP1 => self.p1.pos = Self::resp_column(clock),
            regs::HMOVE => {
                let late = clock % CLOCKS_PER_LINE >= HBLANK_CLOCKS;
                Self::apply_motion(&mut self.p0, late);
                Self::apply_motion(&mut self.p1, late);
            }
            _ => {}
        }
    }

    /// Colour the beam would paint at visible column `x` right now.
    #[must_use]
    pub fn pixel(&self, x: u16) -> u8 {
        let x = x as i16;
        if Self::player_pixel(&self.p0, x) {
            self.p0.color
        } else if Self::player_pixel(&self.p1, x) {
            self.p1.color
        } else if self.playfield_pixel(x) {
            self.colupf
        } else {
            self.colubk
        }
    }

    /// Whether the beam is blanked.
    #[must_use]
    pub fn blanked(&self) -> bool {
        self.vblank & 0x02 != 0
    }

    /// Column latched by a RESPx strobe whose store cycle begins at `clock`.
    ///
    /// During horizontal blank the position counter parks the object at
    /// column 3; in the visible region the first pixel lands 9 clocks after
    /// the strobe, wrapping at the right edge.
    fn resp_column(clock: u64) -> i16 {
        let in_line = clock % CLOCKS_PER_LINE;
        if in_line < HBLANK_CLOCKS {
            3
        } else {
            ((in_line - HBLANK_CLOCKS + 9) % VISIBLE_PIXELS as u64) as i16
        }
    }

    /// HMOVE. Strobed in horizontal blank the motion nibble is the signed
    /// -8..=7 shift; strobed later every object picks up an extra 8 to the
    /// left, which makes 0x80 the identity.
    fn apply_motion(p: &mut PlayerState, late: bool) {
        let nibble = i16::from(p.hm >> 4);
        let mut left = (nibble ^ 8) - 8;
        if late {
            left += 8;
        }
        p.pos = (p.pos - left).rem_euclid(LINE);
    }

    fn player_pixel(p: &PlayerState, x: i16) -> bool {
        let pattern = if p.vdel { p.old } else { p.new };
        if pattern == 0 {
            return false;
        }
        let (offsets, scale) = replication(p.nusiz);
        for &offset in offsets {
            // Only the position counter is mod 160. The graphic scan pauses
            // through horizontal blank, so a copy hanging off the right edge
            // clips instead of re-entering the line at column 0.
            let rel = x - p.pos - offset;
            if (0..8 * scale).contains(&rel) {
                let bit = (7 - rel / scale) as u32;
                if pattern >> bit & 1 != 0 {
                    return true;
                }
            }
        }
        false
    }

    fn playfield_pixel(&self, x: i16) -> bool {
        // CTRLPF stays zero in this workspace: repeat mode, no priority.
        let half = if x < LINE / 2 { x } else { x - LINE / 2 };
        let group = half / 4;
        match group {
            0..=3 => self.pf0 >> (4 + group) as u32 & 1 != 0,
            4..=11 => self.pf1 >> (11 - group) as u32 & 1 != 0,
            _ => self.pf2 >> (group - 12) as u32 & 1 != 0,
        }
    }
}

/// Copy offsets and pixel scale for a NUSIZ player mode.
const fn replication(nusiz: u8) -> (&'static [i16], i16) {
    match nusiz & 0x07 {
        1 => (&[0, 16], 1),
        2 => (&[0, 32], 1),
        3 => (&[0, 16, 32], 1),
        4 => (&[0, 64], 1),
        5 => (&[0], 2),
        6 => (&[0, 32, 64], 1),
        7 => (&[0], 4),
        _ => (&[0], 1),
    }
}

/// Replay one frame's trace into a [`Frame`].
///
/// Strobes act at the start of their store cycle, data writes become
/// visible one cycle later. Scanline collection starts at the line whose
/// VBLANK write turns the display on and stops at the write that blanks it
/// again, so a well-formed kernel trace yields exactly the visible frame.
#[must_use]
pub fn replay(ops: &[TraceOp]) -> Frame {
    let mut tia = Tia::default();
    let mut frame = Frame::default();
    let mut first_line = None;
    let mut beam = 0u64;

    for op in ops {
        let Some((reg, value)) = op.write else {
            continue;
        };
        let at = match reg {
            regs::RESP0 | regs::RESP1 | regs::HMOVE => op.store_clock(),
            _ => op.effect_clock(),
        };
        draw_span(&tia, &mut frame, first_line, beam, at);
        beam = beam.max(at);
        if reg == regs::VBLANK && value & 0x02 == 0 && first_line.is_none() {
            first_line = Some(at / CLOCKS_PER_LINE);
        }
        tia.apply(reg, value, at);
    }

    frame
}

fn draw_span(tia: &Tia, frame: &mut Frame, first_line: Option<u64>, from: u64, to: u64) {
    let Some(first) = first_line else {
        return;
    };
    if tia.blanked() {
        return;
    }
    for clock in from..to {
        let line = clock / CLOCKS_PER_LINE;
        if line < first {
            continue;
        }
        let in_line = clock % CLOCKS_PER_LINE;
        if in_line < HBLANK_CLOCKS {
            continue;
        }
        let row = (line - first) as usize;
        while frame.lines.len() <= row {
            frame.lines.push([0; VISIBLE_PIXELS]);
        }
        let px = (in_line - HBLANK_CLOCKS) as usize;
        frame.lines[row][px] = tia.pixel(px as u16);
    }
}
