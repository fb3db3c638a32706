//! The stuffed-instruction palette.

/// Cycle-timed instruction feed into the console.
///
/// Each method stuffs one 6507 instruction onto the cartridge bus; the
/// method name carries the instruction's cycle cost. During the visible
/// frame the caller is the only thing keeping the beam and the instruction
/// stream in step, so an implementation must account for every cycle.
/// Between frames, the overblank methods bracket a region where timing is
/// don't-care.
///
/// Store-class methods write whichever stuffed register (A, X or Y) they
/// name. [`write5`](Self::write5) is the fused `lda #imm; sta zp` pair and
/// therefore clobbers A.
pub trait StuffedBus {
    /// Load A with an immediate. 2 cycles.
    fn lda2(&mut self, value: u8);

    /// Load X with an immediate. 2 cycles.
    fn ldx2(&mut self, value: u8);

    /// Load Y with an immediate. 2 cycles.
    fn ldy2(&mut self, value: u8);

    /// Store A to a zero-page register. 3 cycles.
    fn sta3(&mut self, address: u8);

    /// Store X to a zero-page register. 3 cycles.
    fn stx3(&mut self, address: u8);

    /// Store Y to a zero-page register. 3 cycles.
    fn sty3(&mut self, address: u8);

    /// Store A through an absolute address. 4 cycles.
    fn sta4(&mut self, address: u8);

    /// Store X through an absolute address. 4 cycles.
    fn stx4(&mut self, address: u8);

    /// Load A with an immediate and store it to a zero-page register.
    /// 5 cycles.
    fn write5(&mut self, address: u8, value: u8);

    /// Burn two cycles.
    fn nop2(&mut self);

    /// Burn `2 * count` cycles.
    ///
    /// Default implementation repeats [`nop2`](Self::nop2). Implementations
    /// may override, but must burn the same number of cycles.
    fn nop2n(&mut self, count: u8) {
        for _ in 0..count {
            self.nop2();
        }
    }

    /// Jump to the next stuffed instruction. 3 cycles.
    ///
    /// Serves as an odd-parity spacer inside timed code and forces the CPU
    /// onto the stuffed stream at power-up.
    fn jmp3(&mut self);

    /// Install the idle loop in RIOT RAM. Untimed; power-up only.
    fn copy_overblank_to_riot_ram(&mut self);

    /// Park the CPU in the idle loop for vertical blank and overscan.
    /// Untimed.
    fn start_overblank(&mut self);

    /// Take the CPU back from the idle loop. Timing matters from the next
    /// primitive on.
    fn end_overblank(&mut self);
}
