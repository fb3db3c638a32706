//! End-to-end placement checks: render a frame, replay the write stream
//! through the TIA model and read back where the pixels landed.
//!
//! The probe sprite paints colour 0x44 on lines 20 and 21; everything
//! else in the scene uses other colours, so the first 0x44 on line 20 is
//! the probe's landing column.

use tia_sim::{Frame, replay};
use vcs_bus::TraceBus;
use vcs_kernel::{MultiSpriteKernel, NumberSize, Sprite};

const PROBE_ROWS: [u8; 2] = [0xFF, 0xFF];
const PROBE_COLORS: [u8; 2] = [0x44, 0x44];
const PARK_COLORS: [u8; 2] = [0x22, 0x22];

fn probe(x: u8, number_size: NumberSize) -> Sprite<'static> {
    Sprite {
        height: 2,
        position_x: x,
        position_y: 20,
        frames_skipped: 0,
        number_size,
        graphics: &PROBE_ROWS,
        colors: &PROBE_COLORS,
    }
}

fn parked(y: u8) -> Sprite<'static> {
    Sprite {
        height: 2,
        position_x: 80,
        position_y: y,
        frames_skipped: 0,
        number_size: NumberSize::OneCopy,
        graphics: &PROBE_ROWS,
        colors: &PARK_COLORS,
    }
}

fn scene(first: &Sprite<'_>) -> Frame {
    let second = parked(100);
    let third = parked(130);
    let fourth = parked(160);
    let mut kernel = MultiSpriteKernel::new();
    let mut bus = TraceBus::new();
    kernel.render([first, &second, &third, &fourth], &mut bus);
    replay(bus.ops())
}

fn landing_column(frame: &Frame) -> Option<usize> {
    frame.lines[20].iter().position(|&colour| colour == 0x44)
}

#[test]
fn every_column_lands_where_asked() {
    for x in 0..145u8 {
        if x == 9 {
            continue;
        }
        let frame = scene(&probe(x, NumberSize::OneCopy));
        assert_eq!(landing_column(&frame), Some(usize::from(x)), "x={x}");
    }
}

#[test]
fn column_nine_snaps_to_ten() {
    let frame = scene(&probe(9, NumberSize::OneCopy));
    assert_eq!(landing_column(&frame), Some(10));
}

#[test]
fn the_right_band_lands_one_column_short() {
    for x in 145..160u8 {
        let frame = scene(&probe(x, NumberSize::OneCopy));
        assert_eq!(landing_column(&frame), Some(usize::from(x) - 1), "x={x}");
    }
}

#[test]
fn frames_come_back_full_height() {
    let frame = scene(&probe(50, NumberSize::OneCopy));
    assert_eq!(frame.height(), 192);
}

#[test]
fn close_copies_sit_sixteen_columns_apart() {
    let frame = scene(&probe(40, NumberSize::TwoCopiesClose));
    let line = &frame.lines[20];
    assert!(line[40..48].iter().all(|&c| c == 0x44));
    assert!(line[56..64].iter().all(|&c| c == 0x44));
    assert!(line[48..56].iter().all(|&c| c != 0x44));
}

#[test]
fn double_size_stretches_each_bit() {
    const WIDE_ROWS: [u8; 2] = [0xF0, 0xF0];
    let mut sprite = probe(40, NumberSize::DoubleSize);
    sprite.graphics = &WIDE_ROWS;
    let frame = scene(&sprite);
    let line = &frame.lines[20];
    assert!(line[40..48].iter().all(|&c| c == 0x44));
    assert!(line[48..56].iter().all(|&c| c != 0x44));
}

#[test]
fn the_playfield_bands_under_the_sprites() {
    let high = parked(20);
    let second = parked(50);
    let third = parked(70);
    let fourth = parked(90);
    let mut kernel = MultiSpriteKernel::new();
    kernel.playfield_colors[100] = 0x1E;
    kernel.playfield_graphics[100 * 5] = 0xFF;
    let mut bus = TraceBus::new();
    kernel.render([&high, &second, &third, &fourth], &mut bus);
    let frame = replay(bus.ops());

    // Eight playfield bits, four columns each, left edge of line 100.
    assert!(frame.lines[100][0..32].iter().all(|&c| c == 0x1E));
    assert_eq!(frame.lines[100][32], 0);
    assert!(frame.lines[99][0..32].iter().all(|&c| c == 0));
    assert!(frame.lines[101][0..32].iter().all(|&c| c == 0));
}

#[test]
fn parked_sprites_share_the_frame() {
    let frame = scene(&probe(50, NumberSize::OneCopy));
    assert!(frame.lines[20][50..58].iter().all(|&c| c == 0x44));
    assert!(frame.lines[100][80..88].iter().all(|&c| c == 0x22));
    assert!(frame.lines[130][80..88].iter().all(|&c| c == 0x22));
    assert!(frame.lines[160][80..88].iter().all(|&c| c == 0x22));
}
