//! Host services the animator runs on: a frame scheduler and a resize signal

/// Token for a requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Token for a resize subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// "Run the frame callback before the next repaint" and its cancellation
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancelling a handle that already fired or was already cancelled is a no-op
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Subscription to viewport resize notifications
pub trait ResizeEvents {
    fn subscribe(&mut self) -> ListenerId;

    fn unsubscribe(&mut self, id: ListenerId);
}

pub trait Host: FrameScheduler + ResizeEvents {}

impl<T: FrameScheduler + ResizeEvents + ?Sized> Host for T {}
