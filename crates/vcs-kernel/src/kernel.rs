//! Line buffers and the cycle-balanced scanline emitter.
//!
//! # Scanline anatomy
//!
//! Every line issues the same backbone: the colour pair carried over in X
//! and Y (line 0 swaps in its VBLANK-off write), the marker-steered block,
//! COLUP1, six playfield writes, the HMxx housekeeping pair, the next
//! line's GRP1, PF0 and bitmap preloads, then the late HMOVE at cycle 69.
//! Six conditional RESPx strobes sit between the fixed writes at store
//! cycles 23, 33, 43, 51, 61 and 68; at most one fires per line. The
//! marker block's arms cost 5 (repaid by the 3-cycle strobe it enables), 8
//! and 8 cycles, so every reachable path through a line spends exactly 76.
//!
//! Interleaving is a hardware contract, not a convenience: each playfield
//! register is rewritten in the gap between its display windows, and the
//! delayed GRP1 write relies on VDELP1 holding the byte until the next
//! GRP0 store. Reordering writes breaks the picture even at equal cost.

use vcs_bus::{Player, StuffedBus, regs};

use crate::marker::ColorEntry;
use crate::positioning::{SpriteMove, horizontal_timing};
use crate::sprite::Sprite;

/// Visible scanlines per frame.
pub const SCREEN_HEIGHT: usize = 192;

/// Sprite slots per frame.
pub const MAX_SPRITES: usize = 4;

/// Playfield bytes per scanline.
pub const PLAYFIELD_STRIDE: usize = 5;

/// Per-frame render state: caller-filled display tables plus the scratch
/// line buffers the emission loop reads.
///
/// The colour and playfield tables persist across frames and belong to the
/// caller; the line buffers are rebuilt by every [`render`](Self::render)
/// pass and never observed outside it.
#[derive(Debug, Clone)]
pub struct MultiSpriteKernel {
    /// Background colour per scanline.
    pub background_colors: [u8; SCREEN_HEIGHT],
    /// Playfield colour per scanline.
    pub playfield_colors: [u8; SCREEN_HEIGHT],
    /// Playfield bitmap, [`PLAYFIELD_STRIDE`] bytes per scanline, 40 bits
    /// running left to right from byte 0's most significant bit.
    pub playfield_graphics: [u8; SCREEN_HEIGHT * PLAYFIELD_STRIDE],

    grp0_buffer: [u8; SCREEN_HEIGHT],
    colup0_buffer: [u8; SCREEN_HEIGHT],
    // Second player identity. The schedule drives GRP1 with a diagnostic
    // stripe and a fixed colour; only line 0's byte reaches the hardware.
    grp1_buffer: [u8; SCREEN_HEIGHT],
    colup1_buffer: [u8; SCREEN_HEIGHT],
    moves: [SpriteMove; MAX_SPRITES],
}

impl MultiSpriteKernel {
    /// Kernel with all tables zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            background_colors: [0; SCREEN_HEIGHT],
            playfield_colors: [0; SCREEN_HEIGHT],
            playfield_graphics: [0; SCREEN_HEIGHT * PLAYFIELD_STRIDE],
            grp0_buffer: [0; SCREEN_HEIGHT],
            colup0_buffer: [0; SCREEN_HEIGHT],
            grp1_buffer: [0; SCREEN_HEIGHT],
            colup1_buffer: [0; SCREEN_HEIGHT],
            moves: [SpriteMove::default(); MAX_SPRITES],
        }
    }

    /// Render one frame.
    ///
    /// Takes the bus out of overblank, emits the aligned 192-line frame
    /// and parks the machine back in overblank. Scratch state does not
    /// persist: the same inputs replay to an identical write stream.
    ///
    /// Sprites must carry at least `height` rows of data and sit fully
    /// below the top positioning window (`position_y` >= 2); violations
    /// trip debug assertions. All four sprites share one hardware player,
    /// time-sliced through their positioning windows, so only one window
    /// may be open at a time: sprites whose `[position_y - 2,
    /// position_y + height]` ranges overlap come out misplaced (the later
    /// slot wins the buffer bytes).
    pub fn render<B: StuffedBus>(&mut self, sprites: [&Sprite<'_>; MAX_SPRITES], bus: &mut B) {
        self.build_line_buffers(&sprites);
        self.emit_frame(bus);
    }

    /// Rasterize sprites into the line buffers and resolve their plans.
    ///
    /// Runs in the overblank shadow with no timing constraint. Later slots
    /// overwrite earlier ones where rows collide.
    fn build_line_buffers(&mut self, sprites: &[&Sprite<'_>; MAX_SPRITES]) {
        self.grp0_buffer.fill(0);
        self.colup0_buffer.fill(0);
        self.grp1_buffer.fill(0);
        self.colup1_buffer.fill(0);

        for (slot, sprite) in sprites.iter().enumerate() {
            debug_assert!(sprite.height > 0, "slot {slot}: zero-height sprite");
            debug_assert!(
                sprite.graphics.len() >= sprite.height && sprite.colors.len() >= sprite.height,
                "slot {slot}: fewer data rows than height"
            );
            debug_assert!(
                (2..SCREEN_HEIGHT).contains(&usize::from(sprite.position_y)),
                "slot {slot}: no room for the positioning window above line {}",
                sprite.position_y
            );

            let start_line = usize::from(sprite.position_y) - 2;
            let marker = ColorEntry::WindowStart(slot).encode();
            self.colup0_buffer[start_line] = marker;
            self.colup0_buffer[start_line + 1] = marker;

            let timing = horizontal_timing(sprite.position_x);
            self.moves[slot] = SpriteMove {
                sprite: slot,
                nusiz: sprite.number_size.bits(),
                hmove_first: timing.hmove_first,
                hmove_second: timing.hmove_second,
                target: Player::P0,
                resp_offset: timing.resp_offset,
            };

            let mut line = usize::from(sprite.position_y);
            for row in 0..sprite.height {
                if line >= SCREEN_HEIGHT {
                    break;
                }
                self.grp0_buffer[line] = sprite.graphics[row];
                self.colup0_buffer[line] = ColorEntry::Color(sprite.colors[row]).encode();
                line += 1;
            }
            if line < SCREEN_HEIGHT {
                self.grp0_buffer[line] = 0;
                self.colup0_buffer[line] = ColorEntry::SpriteEnd.encode();
            }
        }
    }

    /// Stream the frame's writes. The 6507 is live from the first WSYNC to
    /// the closing VBLANK; every primitive in between is accounted for.
    fn emit_frame<B: StuffedBus>(&self, bus: &mut B) {
        bus.end_overblank();

        bus.write5(regs::VDELP1, 0x01);

        // Alignment line: park both players, preload line 0's colours,
        // its left playfield edge and its first bitmap. Exactly 76 cycles
        // from the WSYNC, so the loop below enters each line at cycle 0.
        bus.sta3(regs::WSYNC);
        bus.sta3(regs::RESP0);
        bus.write5(regs::HMP0, 0x80);
        bus.write5(regs::COLUBK, self.background_colors[0]);
        bus.write5(regs::COLUPF, self.playfield_colors[0]);
        bus.write5(regs::GRP1, self.grp1_buffer[0]);
        bus.write5(regs::PF0, (self.playfield_graphics[0] >> 4).reverse_bits());
        bus.write5(regs::HMP1, 0x80);
        bus.sta3(regs::RESP1);
        bus.lda2(self.grp0_buffer[0]);
        bus.nop2n(19);

        let mut plan = self.moves[0];
        let mut move_offset: i8 = -1;
        let mut line = 0;
        loop {
            if line == 0 {
                // Display on. The absolute-addressed store makes this head
                // cost the same 6 cycles as the steady-state colour pair.
                bus.ldx2(0);
                bus.stx4(regs::VBLANK);
            } else {
                bus.stx3(regs::COLUBK);
                bus.sty3(regs::COLUPF);
            }

            match ColorEntry::decode(self.colup0_buffer[line]) {
                ColorEntry::WindowStart(slot) if move_offset < 0 => {
                    // Opening line: adopt the slot's plan and set the
                    // replication mode before the strobe fires.
                    plan = self.moves[slot];
                    move_offset = plan.resp_offset as i8;
                    bus.write5(regs::NUSIZ0, plan.nusiz);
                }
                ColorEntry::WindowStart(_) => {
                    // Second marker line: burn the width difference and
                    // preload the first row's colour.
                    bus.jmp3();
                    move_offset = 0;
                    bus.write5(regs::COLUP0, self.colup0_buffer[line + 1]);
                }
                ColorEntry::Color(_) | ColorEntry::SpriteEnd => {
                    bus.sta3(regs::GRP0);
                    if move_offset >= 0 {
                        // First row on screen: stop nudging.
                        move_offset = -1;
                        bus.write5(plan.target.hmp(), 0x80);
                    } else {
                        bus.write5(regs::COLUP0, self.colup0_buffer[line]);
                    }
                }
            }

            bus.write5(regs::COLUP1, 0xCC);

            let pf = &self.playfield_graphics[line * PLAYFIELD_STRIDE..(line + 1) * PLAYFIELD_STRIDE];
            bus.write5(regs::PF1, (pf[0] << 4) | (pf[1] >> 4));
            if move_offset == 1 {
                bus.sta3(plan.target.resp()); // store cycle 23, column 10
            }
            bus.write5(regs::PF2, ((pf[1] << 4) | (pf[2] >> 4)).reverse_bits());
            bus.write5(regs::PF0, pf[2].reverse_bits());
            if move_offset == 2 {
                bus.sta3(plan.target.resp()); // store cycle 33, column 40
            }
            bus.jmp3();
            bus.nop2();
            bus.write5(regs::PF1, pf[3]);
            if move_offset == 3 {
                bus.sta3(plan.target.resp()); // store cycle 43, column 70
            }
            bus.nop2();
            if move_offset > 0 {
                bus.lda2(plan.hmove_first);
            } else if move_offset == 0 {
                bus.lda2(plan.hmove_second);
            } else {
                bus.nop2();
            }
            if move_offset >= 0 {
                bus.sta4(plan.target.hmp());
            } else {
                bus.nop2n(2);
            }
            if move_offset == 4 {
                bus.sta3(plan.target.resp()); // store cycle 51, column 94
            }
            bus.write5(regs::PF2, pf[4].reverse_bits());

            line += 1;
            if line == SCREEN_HEIGHT {
                break;
            }

            // The second player carries the line number as a diagnostic
            // stripe; VDELP1 defers it to the next GRP0 store.
            bus.write5(regs::GRP1, line as u8);
            if move_offset == 5 {
                bus.sta3(plan.target.resp()); // store cycle 61, column 124
            }
            bus.write5(
                regs::PF0,
                (self.playfield_graphics[line * PLAYFIELD_STRIDE] >> 4).reverse_bits(),
            );
            bus.lda2(self.grp0_buffer[line]);
            if move_offset == 6 {
                bus.sta3(plan.target.resp()); // store cycle 68, column 145
            }
            bus.sta3(regs::HMOVE); // late apply, store cycle 71
            bus.ldx2(self.background_colors[line]);
            bus.ldy2(self.playfield_colors[line]);
        }

        bus.sta3(regs::WSYNC);
        bus.write5(regs::VBLANK, 0x02);
        bus.start_overblank();
    }
}

impl Default for MultiSpriteKernel {
    fn default() -> Self {
        Self::new()
    }
}
