//! Headless demo runner for the four-sprite kernel.
//!
//! Animates four boxes across a banded backdrop, replaying every frame's
//! write stream through the TIA model. Frames can be recorded as PNGs for
//! eyeballing or regression diffs.

use std::fs;
use std::path::PathBuf;
use std::process;

use tia_sim::{Frame, replay, save_screenshot};
use vcs_bus::TraceBus;
use vcs_kernel::{
    MAX_SPRITES, MultiSpriteKernel, NumberSize, PLAYFIELD_STRIDE, SCREEN_HEIGHT, Sprite, power_up,
};

const BOX_GRAPHICS: [u8; 10] = [0xFF, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF];
const RAMP_COLORS: [u8; 10] = [0x88, 0x86, 0x84, 0x82, 0x54, 0x54, 0x82, 0x84, 0x86, 0x88];

struct CliArgs {
    frames: u32,
    screenshot_path: Option<PathBuf>,
    record_dir: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        frames: 60,
        screenshot_path: None,
        record_dir: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.frames = s.parse().unwrap_or(60);
                }
            }
            "--screenshot" => {
                i += 1;
                cli.screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--record" => {
                i += 1;
                cli.record_dir = args.get(i).map(PathBuf::from);
            }
            "--help" | "-h" => {
                eprintln!("Usage: vcs-runner [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --frames <n>         Number of frames to run [default: 60]");
                eprintln!("  --screenshot <file>  Save the last frame as a PNG");
                eprintln!("  --record <dir>       Record every frame to directory");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

// ---------------------------------------------------------------------------
// Demo scene
// ---------------------------------------------------------------------------

fn demo_sprite(x: u8, y: u8, number_size: NumberSize) -> Sprite<'static> {
    Sprite {
        height: 10,
        position_x: x,
        position_y: y,
        frames_skipped: 0,
        number_size,
        graphics: &BOX_GRAPHICS,
        colors: &RAMP_COLORS,
    }
}

/// Hue bands for the background, a counter-running ramp for the playfield
/// colour and a per-line weave for the playfield bits.
fn seed_tables(kernel: &mut MultiSpriteKernel) {
    for line in 0..SCREEN_HEIGHT {
        kernel.background_colors[line] = (line as u8) & 0xF0;
        kernel.playfield_colors[line] = (line as u8).wrapping_neg() | 0x08;
        for byte in 0..PLAYFIELD_STRIDE {
            kernel.playfield_graphics[line * PLAYFIELD_STRIDE + byte] = if byte % 2 == 0 {
                !(line as u8)
            } else {
                line as u8
            };
        }
    }
}

/// March the boxes at different speeds, two left, two right.
fn advance(xs: &mut [u8; MAX_SPRITES]) {
    xs[0] = if xs[0] == 159 { 0 } else { xs[0] + 1 };
    xs[1] = if xs[1] == 0 { 159 } else { xs[1] - 1 };
    xs[2] = (xs[2] + 2) % 160;
    xs[3] = if xs[3] < 2 { 159 } else { xs[3] - 2 };
}

fn main() {
    let cli = parse_args();

    let frames_dir = cli.record_dir.as_ref().map(|dir| dir.join("frames"));
    if let Some(ref dir) = frames_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Record error: {e}");
            process::exit(1);
        }
    }

    let mut kernel = MultiSpriteKernel::new();
    seed_tables(&mut kernel);

    let mut bus = TraceBus::new();
    power_up(&mut bus);
    bus.clear_ops();

    let mut xs: [u8; MAX_SPRITES] = [0, 125, 130, 140];
    let mut last_frame: Option<Frame> = None;

    for i in 1..=cli.frames {
        // Top line: fixed colours, retouched every frame. The tables stay
        // caller-mutable between renders.
        kernel.background_colors[0] = 0x55;
        kernel.playfield_colors[0] = 0x55;
        kernel.playfield_graphics[0] = 0x55;

        let sprites = [
            demo_sprite(xs[0], 20, NumberSize::ThreeCopiesClose),
            demo_sprite(xs[1], 33, NumberSize::DoubleSize),
            demo_sprite(xs[2], 46, NumberSize::QuadSize),
            demo_sprite(xs[3], 59, NumberSize::TwoCopiesWide),
        ];
        bus.clear_ops();
        kernel.render([&sprites[0], &sprites[1], &sprites[2], &sprites[3]], &mut bus);
        let frame = replay(bus.ops());

        if let Some(ref dir) = frames_dir {
            let filename = dir.join(format!("{i:06}.png"));
            if let Err(e) = save_screenshot(&frame, &filename) {
                eprintln!("Record error: {e}");
                process::exit(1);
            }
        }

        advance(&mut xs);
        last_frame = Some(frame);
    }

    if let Some(ref dir) = frames_dir {
        eprintln!("Captured {} frames to {}", cli.frames, dir.display());
    }

    if let Some(ref path) = cli.screenshot_path {
        match last_frame {
            Some(ref frame) => {
                if let Err(e) = save_screenshot(frame, path) {
                    eprintln!("Screenshot error: {e}");
                    process::exit(1);
                }
                eprintln!("Screenshot saved to {}", path.display());
            }
            None => eprintln!("Nothing rendered, no screenshot"),
        }
    }

    println!("Rendered {} frames of the four-sprite demo", cli.frames);
}
