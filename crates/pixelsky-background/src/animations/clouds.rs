//! Drifting pixel clouds (stateful).

use pixelsky_core::{Rgb, Surface};
use rand::Rng;

use crate::pattern::{CLOUD_BLOCK_SIZE, CLOUD_PATTERN};
use crate::random::uniform;

/// Fraction of the surface height clouds may spawn in.
pub const CLOUD_BAND: f32 = 0.4;

/// A cloud drifting right to left.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftingCloud {
    pub x: f32,
    pub y: f32,
    /// Pixels moved left per frame.
    pub speed: f32,
    /// Controls how far past the left edge the cloud travels before wrapping.
    pub size: f32,
    pub opacity: f32,
}

impl DriftingCloud {
    /// Draw the cloud bitmap at its current position.
    pub fn draw(&self, surface: &mut impl Surface, color: Rgb) {
        let color = color.with_alpha(self.opacity);
        let block = CLOUD_BLOCK_SIZE as f32;
        for (row, cells) in CLOUD_PATTERN.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 1 {
                    let x = (self.x + col as f32 * block).floor() as i32;
                    let y = (self.y + row as f32 * block).floor() as i32;
                    surface.fill_rect(x, y, CLOUD_BLOCK_SIZE, CLOUD_BLOCK_SIZE, color);
                }
            }
        }
    }

    /// Whether the cloud has left the surface far enough to wrap around.
    pub fn has_exited(&self) -> bool {
        self.x < -self.size * 2.0
    }

    /// Move one frame to the left, wrapping to the right edge once it exits.
    /// Returns `true` when the cloud was respawned.
    pub fn advance(&mut self, width: u32, height: u32, rng: &mut impl Rng) -> bool {
        self.x -= self.speed;
        if self.has_exited() {
            self.x = width as f32 + self.size;
            self.y = uniform(rng, 0.0, height as f32 * CLOUD_BAND);
            return true;
        }
        false
    }
}

/// Generate `count` clouds in the upper band of a `width` x `height` surface.
pub fn generate(count: usize, width: u32, height: u32, rng: &mut impl Rng) -> Vec<DriftingCloud> {
    (0..count)
        .map(|_| DriftingCloud {
            x: uniform(rng, 0.0, width as f32),
            y: uniform(rng, 0.0, height as f32 * CLOUD_BAND),
            speed: uniform(rng, 0.2, 0.5),
            size: uniform(rng, 30.0, 50.0),
            opacity: uniform(rng, 0.3, 0.6),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::testing::RecordingSurface;

    fn cloud(x: f32, size: f32) -> DriftingCloud {
        DriftingCloud {
            x,
            y: 10.0,
            speed: 0.0,
            size,
            opacity: 0.4,
        }
    }

    #[test]
    fn test_generate_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let clouds = generate(5, 800, 600, &mut rng);
        assert_eq!(clouds.len(), 5);
        for c in &clouds {
            assert!((0.0..800.0).contains(&c.x));
            assert!((0.0..240.0).contains(&c.y));
            assert!((0.2..0.5).contains(&c.speed));
            assert!((30.0..50.0).contains(&c.size));
            assert!((0.3..0.6).contains(&c.opacity));
        }
    }

    #[test]
    fn test_advance_moves_left() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut c = DriftingCloud {
            speed: 0.25,
            ..cloud(100.0, 40.0)
        };
        assert!(!c.advance(800, 600, &mut rng));
        assert_eq!(c.x, 99.75);
        assert_eq!(c.y, 10.0);
    }

    #[test]
    fn test_exit_threshold_is_strict() {
        let mut rng = StdRng::seed_from_u64(3);

        let mut inside = cloud(-80.0 + 0.01, 40.0);
        assert!(!inside.advance(800, 600, &mut rng));
        assert!(inside.x < 0.0);

        let mut at_edge = cloud(-80.0, 40.0);
        assert!(!at_edge.advance(800, 600, &mut rng));

        let mut outside = cloud(-80.0 - 0.01, 40.0);
        assert!(outside.advance(800, 600, &mut rng));
        assert_eq!(outside.x, 840.0);
        assert!((0.0..240.0).contains(&outside.y));
    }

    #[test]
    fn test_draw_pattern() {
        let mut surface = RecordingSurface::new(200, 200);
        cloud(12.5, 40.0).draw(&mut surface, Rgb::new(74, 158, 255));

        let filled = CLOUD_PATTERN.iter().flatten().filter(|&&c| c == 1).count();
        assert_eq!(surface.rects().count(), filled);
        assert!(surface.rects().all(|r| r.width == 4 && r.height == 4));
        assert!(surface.rects().all(|r| r.color.alpha == 0.4));

        // First filled block is column 2 of row 0.
        let first = surface.rects().next().unwrap();
        assert_eq!((first.x, first.y), (12 + 8, 10));
    }

    proptest! {
        #[test]
        fn respawn_lands_in_upper_band(
            seed in any::<u64>(),
            height in 1u32..2000,
            size in 30.0f32..50.0,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut c = DriftingCloud { speed: 1.0, ..cloud(-size * 2.0, size) };
            prop_assert!(c.advance(640, height, &mut rng));
            prop_assert!(c.y >= 0.0 && c.y < height as f32 * CLOUD_BAND);
            prop_assert_eq!(c.x, 640.0 + size);
        }
    }
}
