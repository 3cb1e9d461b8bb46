//! Software raster surface.

use pixelsky_core::{Rgb, Rgba, Surface};

/// One pixel with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Pixel {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Pixel {
    /// Source-over blend of `src` onto this pixel.
    fn blend(&mut self, src: Rgba) {
        let sa = src.alpha;
        if sa <= 0.0 {
            return;
        }
        let da = self.a * (1.0 - sa);
        let out_a = sa + da;
        let mix = |s: u8, d: f32| (f32::from(s) * sa + d * da) / out_a;
        self.r = mix(src.rgb.r, self.r);
        self.g = mix(src.rgb.g, self.g);
        self.b = mix(src.rgb.b, self.b);
        self.a = out_a;
    }

    fn over(self, backdrop: Rgb) -> [f32; 3] {
        let inv = 1.0 - self.a;
        [
            self.r * self.a + f32::from(backdrop.r) * inv,
            self.g * self.a + f32::from(backdrop.g) * inv,
            self.b * self.a + f32::from(backdrop.b) * inv,
        ]
    }
}

/// In-memory RGBA surface that starts out fully transparent.
#[derive(Debug, Clone, Default)]
pub struct PixelCanvas {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Pixel::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Colour at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| {
            let p = self.pixels[i];
            let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
            Rgba::new(Rgb::new(channel(p.r), channel(p.g), channel(p.b)), p.a)
        })
    }

    /// Average of the `width` x `height` block at `(x, y)` composited over
    /// `backdrop`. Pixels outside the canvas count as backdrop.
    pub fn block_over(&self, x: u32, y: u32, width: u32, height: u32, backdrop: Rgb) -> Rgb {
        let count = width as usize * height as usize;
        if count == 0 {
            return backdrop;
        }
        let mut sum = [0.0f32; 3];
        for py in y..y.saturating_add(height) {
            for px in x..x.saturating_add(width) {
                let rgb = match self.index(px, py) {
                    Some(i) => self.pixels[i].over(backdrop),
                    None => [backdrop.r, backdrop.g, backdrop.b].map(f32::from),
                };
                for (acc, v) in sum.iter_mut().zip(rgb) {
                    *acc += v;
                }
            }
        }
        let [r, g, b] = sum.map(|v| (v / count as f32).round().clamp(0.0, 255.0) as u8);
        Rgb::new(r, g, b)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

impl Surface for PixelCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Pixel::default(); width as usize * height as usize];
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::default());
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        let clip = |start: i32, len: u32, limit: u32| {
            let lo = i64::from(start).clamp(0, i64::from(limit));
            let hi = (i64::from(start) + i64::from(len)).clamp(0, i64::from(limit));
            (lo as u32, hi as u32)
        };
        let (x0, x1) = clip(x, width, self.width);
        let (y0, y1) = clip(y, height, self.height);

        let stride = self.width as usize;
        for py in y0..y1 {
            let row = py as usize * stride;
            for px in x0..x1 {
                self.pixels[row + px as usize].blend(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Rgb = Rgb::new(0, 68, 119);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn test_starts_transparent() {
        let canvas = PixelCanvas::new(4, 4);
        assert_eq!(canvas.pixel(0, 0).map(|p| p.alpha), Some(0.0));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_and_clip() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(-2, 2, 4, 10, BLUE.with_alpha(1.0));

        assert_eq!(canvas.pixel(0, 2), Some(BLUE.with_alpha(1.0)));
        assert_eq!(canvas.pixel(1, 3), Some(BLUE.with_alpha(1.0)));
        assert_eq!(canvas.pixel(2, 2).map(|p| p.alpha), Some(0.0));
        assert_eq!(canvas.pixel(0, 1).map(|p| p.alpha), Some(0.0));
    }

    #[test]
    fn test_fully_outside_is_ignored() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(-10, -10, 4, 4, BLUE.with_alpha(1.0));
        canvas.fill_rect(10, 0, 4, 4, BLUE.with_alpha(1.0));
        assert!((0..4).all(|x| (0..4).all(|y| canvas.pixel(x, y).unwrap().alpha == 0.0)));
    }

    #[test]
    fn test_source_over_accumulates_alpha() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.fill_rect(0, 0, 1, 1, BLUE.with_alpha(0.5));
        canvas.fill_rect(0, 0, 1, 1, BLUE.with_alpha(0.5));
        let alpha = canvas.pixel(0, 0).unwrap().alpha;
        assert!((alpha - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.fill_rect(0, 0, 2, 2, BLUE.with_alpha(1.0));
        canvas.clear();
        assert_eq!(canvas.pixel(1, 1).map(|p| p.alpha), Some(0.0));

        canvas.resize(3, 1);
        assert_eq!((canvas.width(), canvas.height()), (3, 1));
        assert!(canvas.pixel(2, 0).is_some());
        assert!(canvas.pixel(0, 1).is_none());
    }

    #[test]
    fn test_block_over_backdrop() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.fill_rect(0, 0, 1, 2, BLUE.with_alpha(1.0));

        // Half the block is opaque blue, half shows the white backdrop.
        let avg = canvas.block_over(0, 0, 2, 2, WHITE);
        assert_eq!(avg, Rgb::new(128, 162, 187));

        // Entirely outside the canvas: backdrop.
        assert_eq!(canvas.block_over(5, 5, 2, 2, WHITE), WHITE);
    }
}
