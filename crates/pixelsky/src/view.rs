//! Presentation of the background surface in terminal cells.
//!
//! Every cell shows two vertically stacked pixel blocks using the upper half
//! block glyph: the foreground paints the top block, the background the
//! bottom one.

use pixelsky_background::PixelCanvas;
use pixelsky_core::{Rgb, Viewport};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

const HALF_BLOCK: &str = "▀";

/// Surface size covering `cols` x `rows` cells.
pub fn viewport_for(cols: u16, rows: u16, pixels_per_cell: u16) -> Viewport {
    let ppc = u32::from(pixels_per_cell.max(1));
    Viewport::new(u32::from(cols) * ppc, u32::from(rows) * 2 * ppc)
}

/// Render a single cell.
fn render_cell(canvas: &PixelCanvas, col: u16, row: u16, ppc: u32, backdrop: Rgb) -> Span<'static> {
    let x = u32::from(col) * ppc;
    let top_y = u32::from(row) * 2 * ppc;
    let top = canvas.block_over(x, top_y, ppc, ppc, backdrop);
    let bottom = canvas.block_over(x, top_y + ppc, ppc, ppc, backdrop);
    Span::styled(HALF_BLOCK, Style::new().fg(top.into()).bg(bottom.into()))
}

/// Build the lines for a `cols` x `rows` area.
pub fn canvas_lines(
    canvas: &PixelCanvas,
    cols: u16,
    rows: u16,
    pixels_per_cell: u16,
    backdrop: Rgb,
) -> Vec<Line<'static>> {
    let ppc = u32::from(pixels_per_cell.max(1));
    (0..rows)
        .map(|row| {
            let spans: Vec<Span> = (0..cols)
                .map(|col| render_cell(canvas, col, row, ppc, backdrop))
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Lines filled with the backdrop only, used when no surface exists.
pub fn backdrop_lines(cols: u16, rows: u16, backdrop: Rgb) -> Vec<Line<'static>> {
    let style = Style::new().bg(backdrop.into());
    (0..rows)
        .map(|_| Line::from(Span::styled(" ".repeat(usize::from(cols)), style)))
        .collect()
}
