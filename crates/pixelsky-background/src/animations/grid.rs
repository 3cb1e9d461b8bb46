//! Faint background grid (stateless).

use pixelsky_core::{Rgba, Surface};

/// Draw 1px grid lines every `cell` pixels across the whole surface.
pub fn draw(surface: &mut impl Surface, cell: u32, color: Rgba) {
    let width = surface.width();
    let height = surface.height();
    let step = cell.max(1) as usize;

    for x in (0..width).step_by(step) {
        surface.fill_rect(x as i32, 0, 1, height, color);
    }
    for y in (0..height).step_by(step) {
        surface.fill_rect(0, y as i32, width, 1, color);
    }
}
