//! Background renderer lifecycle: generation, per-frame redraw, resize and
//! visibility handling.

use std::time::{Duration, Instant};

use pixelsky_core::{
    FrameHandle, FrameScheduler, Palette, Surface, ThemeSource, Viewport, ViewportSource,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::animations::clouds::{self, DriftingCloud};
use crate::animations::grid;
use crate::animations::marks::{self, TwinkleMark};
use crate::clock::AnimationClock;
use crate::debounce::ResizeDebouncer;

/// Number of twinkling marks.
pub const MARK_COUNT: usize = 50;
/// Number of drifting clouds.
pub const CLOUD_COUNT: usize = 5;
/// Spacing of the background grid in pixels.
pub const GRID_CELL_SIZE: u32 = 20;
/// Quiet period before a resize regenerates the scene.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Animated pixel-art background.
///
/// The renderer is driven entirely by its host: it asks `scheduler` for the
/// next frame and draws when the host hands that frame back through
/// [`on_frame`](Self::on_frame). At most one frame is ever pending, so
/// stopping and restarting the loop can never produce a second loop.
///
/// Constructed without a surface, the renderer is inert: nothing is drawn
/// and no frame is ever requested.
#[derive(Debug)]
pub struct PixelArtBackground<S, T, V, F> {
    surface: Option<S>,
    theme: T,
    viewport: V,
    scheduler: F,
    palette: Palette,
    marks: Vec<TwinkleMark>,
    clouds: Vec<DriftingCloud>,
    clock: AnimationClock,
    /// The frame requested from the host and not yet delivered.
    pending: Option<FrameHandle>,
    resize: ResizeDebouncer,
    rng: StdRng,
}

impl<S, T, V, F> PixelArtBackground<S, T, V, F>
where
    S: Surface,
    T: ThemeSource,
    V: ViewportSource,
    F: FrameScheduler,
{
    /// Create the renderer and start its redraw loop.
    pub fn new(surface: Option<S>, theme: T, viewport: V, scheduler: F, palette: Palette) -> Self {
        Self::with_rng(
            surface,
            theme,
            viewport,
            scheduler,
            palette,
            StdRng::from_entropy(),
        )
    }

    /// Like [`new`](Self::new) with a caller-supplied random source.
    pub fn with_rng(
        surface: Option<S>,
        theme: T,
        viewport: V,
        scheduler: F,
        palette: Palette,
        rng: StdRng,
    ) -> Self {
        let mut background = Self {
            surface,
            theme,
            viewport,
            scheduler,
            palette,
            marks: Vec::new(),
            clouds: Vec::new(),
            clock: AnimationClock::new(),
            pending: None,
            resize: ResizeDebouncer::new(RESIZE_DEBOUNCE),
            rng,
        };
        background.init();
        background
    }

    fn init(&mut self) {
        if self.surface.is_none() {
            debug!("no drawing surface, background disabled");
            return;
        }
        self.regenerate();
        self.start();
    }

    /// Size the surface to the viewport and rebuild every entity.
    fn regenerate(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Viewport { width, height } = self.viewport.viewport();
        surface.resize(width, height);

        self.marks = marks::generate(MARK_COUNT, width, height, &mut self.rng);
        self.clouds = clouds::generate(CLOUD_COUNT, width, height, &mut self.rng);
        self.clock.reset();
        debug!(width, height, "background regenerated");
    }

    fn start(&mut self) {
        if self.surface.is_none() || self.pending.is_some() {
            return;
        }
        self.pending = Some(self.scheduler.request_frame());
        debug!(frame = self.clock.frame(), "redraw loop started");
    }

    fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            debug!(frame = self.clock.frame(), "redraw loop stopped");
        }
    }

    /// Host callback for a delivered frame.
    ///
    /// Only the currently pending frame is honoured; stale or cancelled
    /// handles are ignored. Returns whether a frame was drawn.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        self.redraw();
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    fn redraw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let frame = self.clock.frame();
        let (width, height) = (surface.width(), surface.height());

        surface.clear();

        let colors = self.palette.colors(self.theme.theme());
        grid::draw(surface, GRID_CELL_SIZE, colors.grid);

        for mark in &self.marks {
            let colors = self.palette.colors(self.theme.theme());
            mark.draw(surface, colors.mark, frame);
        }

        for cloud in &mut self.clouds {
            let colors = self.palette.colors(self.theme.theme());
            cloud.draw(surface, colors.cloud);
            cloud.advance(width, height, &mut self.rng);
        }

        self.clock.tick();
    }

    /// Record a viewport resize. The scene is rebuilt by [`poll`](Self::poll)
    /// once resizes have been quiet for [`RESIZE_DEBOUNCE`].
    pub fn notify_resize(&mut self, now: Instant) {
        if self.surface.is_some() {
            self.resize.notify(now);
        }
    }

    /// Run timers that are due. Returns `true` when the scene was rebuilt.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.resize.fire(now) {
            return false;
        }
        self.regenerate();
        true
    }

    /// Stop redrawing while hidden and resume once visible again. The frame
    /// counter carries on from where it stopped.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Whether a surface was available at construction.
    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_armed()
    }

    /// Frames drawn since the scene was last generated.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn marks(&self) -> &[TwinkleMark] {
        &self.marks
    }

    pub fn clouds(&self) -> &[DriftingCloud] {
        &self.clouds
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}
