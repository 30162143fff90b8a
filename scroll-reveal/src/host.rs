//! Host collaborator seams.
//!
//! The animation core never talks to a real windowing system or DOM.
//! Instead the embedding host supplies four capabilities as trait
//! objects: element geometry, viewport/document metrics, frame-paced
//! scheduling, and scroll notifications. The `sim` module (feature
//! `testing`) provides deterministic in-process implementations of
//! all of them.

/// Viewport-relative bounding geometry of a tracked element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    /// Offset of the element's top edge from the viewport top, in px.
    pub top: f32,
    /// Element height in px.
    pub height: f32,
}

/// Supplies the tracked element's geometry on demand.
///
/// `None` means the element is not resolvable yet (for example the
/// host has not mounted it); the driver degrades gracefully and keeps
/// polling on subsequent ticks.
pub trait ElementHandle: Send + Sync {
    fn geometry(&self) -> Option<ElementRect>;
}

/// Supplies current viewport and scrollable-document metrics.
pub trait ViewportMetrics: Send + Sync {
    /// Visible viewport height in px.
    fn viewport_height(&self) -> f32;
    /// Current vertical scroll offset in px.
    fn scroll_y(&self) -> f32;
    /// Total scrollable content height in px.
    fn content_height(&self) -> f32;
}

/// Identifies one pending frame request, for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Callback invoked once, just before the next display refresh.
pub type FrameCallback = Box<dyn FnOnce() + Send>;

/// Frame-paced scheduler provided by the host's render loop.
///
/// A requested callback runs at most once; cancelling its handle
/// before it fires prevents it from running at all. Callbacks
/// requested while a frame is being serviced belong to the next
/// frame, never the current one.
pub trait FrameScheduler: Send + Sync {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Identifies one scroll subscription, for unsubscribing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollSubscription(pub u64);

/// Callback invoked on every scroll position change.
pub type ScrollCallback = Box<dyn Fn() + Send + Sync>;

/// Scroll notification source provided by the host.
///
/// Subscribed callbacks must stay cheap: they are delivered inline
/// from the host's scroll path and must not block it.
pub trait ScrollSource: Send + Sync {
    fn subscribe(&self, callback: ScrollCallback) -> ScrollSubscription;
    fn unsubscribe(&self, subscription: ScrollSubscription);
}
