//! Frame counter driving the twinkle phase.

/// Counts rendered frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationClock {
    frame: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered since the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance by exactly one frame.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }
}
