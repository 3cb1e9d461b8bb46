//! Twinkling plus-shaped marks (stateful, stationary).

use std::f32::consts::TAU;

use pixelsky_core::{Rgb, Surface};
use rand::Rng;

use crate::pattern::PLUS_OFFSETS;
use crate::random::uniform;

/// A stationary mark whose opacity oscillates with the frame counter.
#[derive(Debug, Clone, PartialEq)]
pub struct TwinkleMark {
    pub x: f32,
    pub y: f32,
    /// Side of each of the five squares, 2 or 3 pixels.
    pub size: u32,
    /// Phase advance per frame.
    pub phase_speed: f32,
    pub phase_offset: f32,
}

impl TwinkleMark {
    /// Opacity at the given frame, always within `0.0..=1.0`.
    pub fn opacity(&self, frame: u64) -> f32 {
        let phase = frame as f64 * f64::from(self.phase_speed) + f64::from(self.phase_offset);
        (0.5 + 0.5 * phase.sin()).clamp(0.0, 1.0) as f32
    }

    /// Draw the five squares of the plus shape.
    pub fn draw(&self, surface: &mut impl Surface, color: Rgb, frame: u64) {
        let color = color.with_alpha(self.opacity(frame));
        let size = self.size as f32;
        for (dx, dy) in PLUS_OFFSETS {
            let x = (self.x + dx as f32 * size).floor() as i32;
            let y = (self.y + dy as f32 * size).floor() as i32;
            surface.fill_rect(x, y, self.size, self.size, color);
        }
    }
}

/// Generate `count` marks scattered over a `width` x `height` surface.
pub fn generate(count: usize, width: u32, height: u32, rng: &mut impl Rng) -> Vec<TwinkleMark> {
    (0..count)
        .map(|_| TwinkleMark {
            x: uniform(rng, 0.0, width as f32),
            y: uniform(rng, 0.0, height as f32),
            size: if rng.gen_bool(0.5) { 2 } else { 3 },
            phase_speed: uniform(rng, 0.02, 0.05),
            phase_offset: uniform(rng, 0.0, TAU),
        })
        .collect()
}
