//! Host frame-scheduling primitive.

/// Identifies one requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// The host's per-frame callback primitive.
///
/// A request asks the host to call back once on its next display refresh. The
/// host delivers the callback by handing the returned handle back to whoever
/// requested it.
pub trait FrameScheduler {
    /// Request a callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Unknown or already delivered handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}
