//! Headless capture: PNG screenshots of replayed frames.

use std::error::Error;
use std::fs;
use std::path::Path;

use vcs_bus::VISIBLE_PIXELS;

use crate::Frame;
use crate::palette::rgb;

/// Save a replayed frame as an RGBA PNG, widened to square-ish pixels.
///
/// TIA pixels are roughly twice as wide as they are tall, so each colour
/// clock becomes two image columns.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_screenshot(frame: &Frame, path: &Path) -> Result<(), Box<dyn Error>> {
    let width = (VISIBLE_PIXELS * 2) as u32;
    let height = frame.height() as u32;

    let file = fs::File::create(path)?;
    let w = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for line in &frame.lines {
        for &color in line {
            let pixel = rgb(color);
            let r = ((pixel >> 16) & 0xFF) as u8;
            let g = ((pixel >> 8) & 0xFF) as u8;
            let b = (pixel & 0xFF) as u8;
            for _ in 0..2 {
                rgba.push(r);
                rgba.push(g);
                rgba.push(b);
                rgba.push(0xFF);
            }
        }
    }

    writer.write_image_data(&rgba)?;
    Ok(())
}
