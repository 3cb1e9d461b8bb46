//! Viewport dimensions.

use std::cell::Cell;
use std::rc::Rc;

/// Size of the visible area in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Read access to the current viewport size.
pub trait ViewportSource {
    fn viewport(&self) -> Viewport;
}

impl<F> ViewportSource for F
where
    F: Fn() -> Viewport,
{
    fn viewport(&self) -> Viewport {
        self()
    }
}

/// Host-owned viewport shared with readers on the same thread.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport(Rc<Cell<Viewport>>);

impl SharedViewport {
    pub fn new(viewport: Viewport) -> Self {
        Self(Rc::new(Cell::new(viewport)))
    }

    pub fn set(&self, viewport: Viewport) {
        self.0.set(viewport);
    }

    pub fn get(&self) -> Viewport {
        self.0.get()
    }
}

impl ViewportSource for SharedViewport {
    fn viewport(&self) -> Viewport {
        self.get()
    }
}
