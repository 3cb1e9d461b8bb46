//! Frame-scheduling primitive for the terminal host.

use std::time::{Duration, Instant};

use pixelsky_core::{FrameHandle, FrameScheduler};

/// Releases at most one requested frame per display interval.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_id: u64,
    requested: Option<FrameHandle>,
    last_release: Option<Instant>,
}

impl FrameClock {
    /// Create a clock refreshing `fps` times per second.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next_id: 0,
            requested: None,
            last_release: None,
        }
    }

    /// Take the requested frame if its refresh slot has arrived.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        let handle = self.requested?;
        if self.time_until_due(now)? > Duration::ZERO {
            return None;
        }
        self.requested = None;
        self.last_release = Some(now);
        Some(handle)
    }

    /// Time left until the requested frame is due, `None` if nothing is
    /// requested.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.requested?;
        Some(match self.last_release {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.requested = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.requested == Some(handle) {
            self.requested = None;
        }
    }
}
