//! Core types shared by the pixelsky crates.
//!
//! The background renderer never reaches into global state: the theme, the
//! viewport size, the frame-scheduling primitive and the drawing surface are
//! all handed to it as the capabilities defined here.

mod color;
mod frame;
mod surface;
mod theme;
mod viewport;

pub use color::{ParseColorError, Rgb, Rgba};
pub use frame::{FrameHandle, FrameScheduler};
pub use surface::Surface;
pub use theme::{ColorSet, Palette, SharedTheme, Theme, ThemeMode, ThemeSource};
pub use viewport::{SharedViewport, Viewport, ViewportSource};
