//! Animated pixel-art background.
//!
//! [`PixelArtBackground`] owns a raster [`Surface`](pixelsky_core::Surface)
//! and redraws a faint grid, twinkling plus-shaped marks and drifting pixel
//! clouds once per host frame. It reacts to debounced viewport resizes,
//! visibility changes and the current light/dark theme.

mod animations;
mod canvas;
mod clock;
mod debounce;
mod pattern;
mod random;
mod renderer;

#[cfg(test)]
mod testing;

pub use animations::clouds::DriftingCloud;
pub use animations::marks::TwinkleMark;
pub use canvas::PixelCanvas;
pub use clock::AnimationClock;
pub use debounce::ResizeDebouncer;
pub use renderer::{
    CLOUD_COUNT, GRID_CELL_SIZE, MARK_COUNT, PixelArtBackground, RESIZE_DEBOUNCE,
};
