//! Deterministic in-process host for tests and headless demos.
//!
//! [`SimHost`] implements every collaborator trait in [`crate::host`]
//! behind one interior-mutable cell: tests script element geometry,
//! viewport metrics and scroll offsets, then advance the animation by
//! stepping frames manually.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::host::{
    ElementHandle, ElementRect, FrameCallback, FrameHandle, FrameScheduler, ScrollCallback,
    ScrollSource, ScrollSubscription, ViewportMetrics,
};

#[derive(Default)]
struct SimState {
    element: Option<ElementRect>,
    viewport_height: f32,
    content_height: f32,
    scroll_y: f32,
    next_frame_id: u64,
    frames: Vec<(FrameHandle, FrameCallback)>,
    next_subscription_id: u64,
    scroll_subscribers: Vec<(ScrollSubscription, Arc<dyn Fn() + Send + Sync>)>,
}

/// Simulated element, viewport, frame scheduler and scroll source.
///
/// Frames requested while [`step_frame`](Self::step_frame) is running
/// are serviced on the next step, matching the frame-scheduler
/// contract. Scroll notifications are delivered synchronously from
/// [`set_scroll_y`](Self::set_scroll_y).
#[derive(Default)]
pub struct SimHost {
    state: Mutex<SimState>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the tracked element's geometry.
    pub fn set_element(&self, rect: Option<ElementRect>) {
        self.state.lock().element = rect;
    }

    /// Sets the viewport height and total scrollable content height.
    pub fn set_viewport(&self, viewport_height: f32, content_height: f32) {
        let mut state = self.state.lock();
        state.viewport_height = viewport_height;
        state.content_height = content_height;
    }

    /// Sets the scroll offset and notifies all subscribers.
    pub fn set_scroll_y(&self, scroll_y: f32) {
        let subscribers: Vec<_> = {
            let mut state = self.state.lock();
            state.scroll_y = scroll_y;
            state
                .scroll_subscribers
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect()
        };
        // Deliver outside the lock so handlers may read metrics back.
        for callback in subscribers {
            callback();
        }
    }

    /// Number of frame callbacks waiting for the next step.
    pub fn pending_frames(&self) -> usize {
        self.state.lock().frames.len()
    }

    /// Runs every pending frame callback once, in request order.
    pub fn step_frame(&self) {
        let frames = std::mem::take(&mut self.state.lock().frames);
        for (_, callback) in frames {
            callback();
        }
    }
}

impl ElementHandle for SimHost {
    fn geometry(&self) -> Option<ElementRect> {
        self.state.lock().element
    }
}

impl ViewportMetrics for SimHost {
    fn viewport_height(&self) -> f32 {
        self.state.lock().viewport_height
    }

    fn scroll_y(&self) -> f32 {
        self.state.lock().scroll_y
    }

    fn content_height(&self) -> f32 {
        self.state.lock().content_height
    }
}

impl FrameScheduler for SimHost {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut state = self.state.lock();
        state.next_frame_id += 1;
        let handle = FrameHandle(state.next_frame_id);
        state.frames.push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state
            .lock()
            .frames
            .retain(|(pending, _)| *pending != handle);
    }
}

impl ScrollSource for SimHost {
    fn subscribe(&self, callback: ScrollCallback) -> ScrollSubscription {
        let mut state = self.state.lock();
        state.next_subscription_id += 1;
        let subscription = ScrollSubscription(state.next_subscription_id);
        state
            .scroll_subscribers
            .push((subscription, Arc::from(callback)));
        subscription
    }

    fn unsubscribe(&self, subscription: ScrollSubscription) {
        self.state
            .lock()
            .scroll_subscribers
            .retain(|(active, _)| *active != subscription);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn frames_requested_during_a_step_run_next_step() {
        let host = Arc::new(SimHost::new());
        let runs = Arc::new(AtomicUsize::new(0));

        let host_inner = host.clone();
        let runs_inner = runs.clone();
        host.request_frame(Box::new(move || {
            runs_inner.fetch_add(1, Ordering::SeqCst);
            let runs_next = runs_inner.clone();
            host_inner.request_frame(Box::new(move || {
                runs_next.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        host.step_frame();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(host.pending_frames(), 1);
        host.step_frame();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn cancelled_frames_never_run() {
        let host = SimHost::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let runs_inner = runs.clone();
        let handle = host.request_frame(Box::new(move || {
            runs_inner.fetch_add(1, Ordering::SeqCst);
        }));
        host.cancel_frame(handle);

        host.step_frame();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
