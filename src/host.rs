//! The winit event loop as the animator's host
//!
//! Frame requests become `request_redraw` calls; a redraw only runs the frame
//! callback while the handle it was requested under is still pending, so a
//! cancelled request that winit delivers anyway is dropped.

use field_simulation::{FrameHandle, FrameScheduler, ListenerId, ResizeEvents};
use std::sync::Arc;
use winit::window::Window;

#[derive(Default)]
pub struct WinitHost {
    window: Option<Arc<Window>>,
    next_id: u64,
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerId>,
}

impl WinitHost {
    pub fn attach(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    /// Consume the pending frame request, if any, for a redraw that just arrived
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    /// Whether resize events should be forwarded to the animator
    pub fn wants_resize(&self) -> bool {
        self.resize_listener.is_some()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameScheduler for WinitHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next());
        self.pending_frame = Some(handle);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }
}

impl ResizeEvents for WinitHost {
    fn subscribe(&mut self) -> ListenerId {
        let id = ListenerId(self.next());
        self.resize_listener = Some(id);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        if self.resize_listener == Some(id) {
            self.resize_listener = None;
        }
    }
}
