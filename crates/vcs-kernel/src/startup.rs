//! Power-up housekeeping run before the first frame.

use vcs_bus::StuffedBus;

/// Bring the console to a known state.
///
/// Clears the whole zero page, which covers every TIA register and the
/// RIOT RAM the overblank loop runs from, then installs that loop and
/// enters overblank. The caller renders frames from there; see
/// [`MultiSpriteKernel::render`](crate::MultiSpriteKernel::render).
///
/// None of this is display-timed, so the cycle cost is irrelevant; the
/// first frame aligns itself off WSYNC.
pub fn power_up<B: StuffedBus>(bus: &mut B) {
    bus.jmp3();
    bus.lda2(0);
    for address in 0..=255u8 {
        bus.sta3(address);
    }
    bus.copy_overblank_to_riot_ram();
    bus.start_overblank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcs_bus::TraceBus;

    #[test]
    fn clears_the_whole_zero_page() {
        let mut bus = TraceBus::new();
        power_up(&mut bus);

        let writes: Vec<_> = bus.writes().collect();
        assert_eq!(writes.len(), 256);
        assert!(writes.iter().all(|&(_, _, value)| value == 0));
        let addresses: Vec<u8> = writes.iter().map(|&(_, addr, _)| addr).collect();
        let expected: Vec<u8> = (0..=255u8).collect();
        assert_eq!(addresses, expected);

        assert!(bus.in_overblank());
        assert!(bus.riot_loop_installed());
    }
}
