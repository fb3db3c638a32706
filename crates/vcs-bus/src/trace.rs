//! Recording bus with a 6507 timing model.

use crate::{CLOCKS_PER_CYCLE, CYCLES_PER_LINE, StuffedBus, regs};

/// One recorded primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOp {
    /// CPU cycle at which the instruction began.
    pub start: u64,
    /// Cycles consumed. A WSYNC store costs 3 like any other; the halt it
    /// causes shows up as a gap before the next op's `start`.
    pub cost: u8,
    /// Register write performed during the final cycle, if any.
    pub write: Option<(u8, u8)>,
}

impl TraceOp {
    /// Colour clock at which the store cycle begins. Strobes take effect
    /// here.
    #[must_use]
    pub fn store_clock(self) -> u64 {
        (self.start + u64::from(self.cost) - 1) * CLOCKS_PER_CYCLE
    }

    /// First colour clock at which a written value is visible.
    #[must_use]
    pub fn effect_clock(self) -> u64 {
        (self.start + u64::from(self.cost)) * CLOCKS_PER_CYCLE
    }
}

/// Recording [`StuffedBus`]: counts cycles, models the stuffed A/X/Y
/// registers and WSYNC halts, and logs every primitive.
///
/// Stands in for the cartridge glue in tests and headless runs, the way a
/// logic analyzer would sit on a real bus.
#[derive(Debug, Default)]
pub struct TraceBus {
    ops: Vec<TraceOp>,
    cycles: u64,
    a: u8,
    x: u8,
    y: u8,
    in_overblank: bool,
    overblank_entries: u32,
    riot_loop_installed: bool,
}

impl TraceBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total CPU cycles elapsed, WSYNC halts included.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Every primitive recorded so far, in issue order.
    #[must_use]
    pub fn ops(&self) -> &[TraceOp] {
        &self.ops
    }

    /// Register writes only, as `(start_cycle, register, value)`.
    pub fn writes(&self) -> impl Iterator<Item = (u64, u8, u8)> + '_ {
        self.ops
            .iter()
            .filter_map(|op| op.write.map(|(reg, value)| (op.start, reg, value)))
    }

    /// Whether the CPU is parked in the overblank idle loop.
    #[must_use]
    pub fn in_overblank(&self) -> bool {
        self.in_overblank
    }

    /// Times the overblank loop has been entered.
    #[must_use]
    pub fn overblank_entries(&self) -> u32 {
        self.overblank_entries
    }

    /// Whether the idle loop has been installed in RIOT RAM.
    #[must_use]
    pub fn riot_loop_installed(&self) -> bool {
        self.riot_loop_installed
    }

    /// Forget recorded ops, keeping the clock and register state.
    ///
    /// Typical use: after power-up, and between frames, so each replay sees
    /// exactly one frame's writes.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    fn push(&mut self, cost: u8, write: Option<(u8, u8)>) {
        self.ops.push(TraceOp {
            start: self.cycles,
            cost,
            write,
        });
        self.cycles += u64::from(cost);
    }

    fn store(&mut self, cost: u8, address: u8, value: u8) {
        self.push(cost, Some((address, value)));
        if address == regs::WSYNC {
            self.cycles = self.cycles.div_ceil(CYCLES_PER_LINE) * CYCLES_PER_LINE;
        }
    }
}

impl StuffedBus for TraceBus {
    fn lda2(&mut self, value: u8) {
        self.a = value;
        self.push(2, None);
    }

    fn ldx2(&mut self, value: u8) {
        self.x = value;
        self.push(2, None);
    }

    fn ldy2(&mut self, value: u8) {
        self.y = value;
        self.push(2, None);
    }

    fn sta3(&mut self, address: u8) {
        self.store(3, address, self.a);
    }

    fn stx3(&mut self, address: u8) {
        self.store(3, address, self.x);
    }

    fn sty3(&mut self, address: u8) {
        self.store(3, address, self.y);
    }

    fn sta4(&mut self, address: u8) {
        self.store(4, address, self.a);
    }

    fn stx4(&mut self, address: u8) {
        self.store(4, address, self.x);
    }

    fn write5(&mut self, address: u8, value: u8) {
        self.a = value;
        self.store(5, address, value);
    }

    fn nop2(&mut self) {
        self.push(2, None);
    }

    fn jmp3(&mut self) {
        self.push(3, None);
    }

    fn copy_overblank_to_riot_ram(&mut self) {
        self.riot_loop_installed = true;
    }

    fn start_overblank(&mut self) {
        self.in_overblank = true;
        self.overblank_entries += 1;
    }

    fn end_overblank(&mut self) {
        self.in_overblank = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_accumulate() {
        let mut bus = TraceBus::new();
        bus.lda2(0x12);
        bus.sta3(regs::COLUBK);
        bus.write5(regs::COLUPF, 0x34);
        bus.nop2n(3);
        bus.jmp3();
        assert_eq!(bus.cycles(), 2 + 3 + 5 + 6 + 3);
    }

    #[test]
    fn stores_carry_register_values() {
        let mut bus = TraceBus::new();
        bus.lda2(0xAB);
        bus.ldx2(0xCD);
        bus.ldy2(0xEF);
        bus.sta3(regs::COLUBK);
        bus.stx4(regs::VBLANK);
        bus.sty3(regs::COLUPF);
        let writes: Vec<_> = bus.writes().collect();
        assert_eq!(
            writes,
            vec![
                (6, regs::COLUBK, 0xAB),
                (9, regs::VBLANK, 0xCD),
                (13, regs::COLUPF, 0xEF),
            ]
        );
    }

    #[test]
    fn write5_clobbers_a() {
        let mut bus = TraceBus::new();
        bus.lda2(0x11);
        bus.write5(regs::COLUBK, 0x22);
        bus.sta3(regs::COLUPF);
        let (_, _, value) = bus.writes().last().unwrap();
        assert_eq!(value, 0x22);
    }

    #[test]
    fn wsync_halts_to_the_next_line() {
        let mut bus = TraceBus::new();
        bus.nop2n(5);
        bus.sta3(regs::WSYNC); // store ends at cycle 13
        assert_eq!(bus.cycles(), CYCLES_PER_LINE);
    }

    #[test]
    fn wsync_on_the_boundary_costs_nothing_extra() {
        let mut bus = TraceBus::new();
        bus.nop2n(35);
        bus.jmp3();
        bus.sta3(regs::WSYNC); // store ends exactly on the boundary
        assert_eq!(bus.cycles(), CYCLES_PER_LINE);
    }

    #[test]
    fn overblank_bracketing() {
        let mut bus = TraceBus::new();
        bus.copy_overblank_to_riot_ram();
        bus.start_overblank();
        assert!(bus.in_overblank());
        bus.end_overblank();
        assert!(!bus.in_overblank());
        assert_eq!(bus.overblank_entries(), 1);
        assert!(bus.riot_loop_installed());
    }

    #[test]
    fn store_and_effect_clocks() {
        let mut bus = TraceBus::new();
        bus.nop2();
        bus.sta3(regs::RESP0);
        let op = *bus.ops().last().unwrap();
        assert_eq!(op.store_clock(), 4 * CLOCKS_PER_CYCLE);
        assert_eq!(op.effect_clock(), 5 * CLOCKS_PER_CYCLE);
    }
}
