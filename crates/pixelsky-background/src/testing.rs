//! Surface and scheduler doubles for unit tests.

use pixelsky_core::{FrameHandle, FrameScheduler, Rgba, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Resize(u32, u32),
    Clear,
    Fill(FilledRect),
}

/// Records every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = &FilledRect> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Fill(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn clears(&self) -> usize {
        self.ops.iter().filter(|op| **op == SurfaceOp::Clear).count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.push(SurfaceOp::Resize(width, height));
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        self.ops.push(SurfaceOp::Fill(FilledRect {
            x,
            y,
            width,
            height,
            color,
        }));
    }
}

/// Hands out sequential handles and remembers which ones are outstanding.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pub outstanding: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    /// Take the single outstanding request, as the host would on refresh.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        assert!(self.outstanding.len() <= 1, "more than one frame requested");
        self.outstanding.pop()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.outstanding.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(pos) = self.outstanding.iter().position(|h| *h == handle) {
            self.outstanding.remove(pos);
            self.cancelled.push(handle);
        }
    }
}
