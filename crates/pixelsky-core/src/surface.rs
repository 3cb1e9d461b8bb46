//! Raster drawing target.

use crate::color::Rgba;

/// A 2D raster surface measured in pixels.
///
/// Rectangles may extend past the edges (or start at negative coordinates);
/// implementations clip them.
pub trait Surface {
    /// Resize the surface. Existing content is discarded.
    fn resize(&mut self, width: u32, height: u32);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Blend a solid rectangle onto the surface.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba);
}
