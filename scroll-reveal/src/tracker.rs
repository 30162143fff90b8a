//! Page scroll progress tracking.
//!
//! Purely event-reactive: no smoothing and no frame loop. The tracker
//! recomputes its state inline on every scroll notification, so the
//! handler stays cheap enough to be delivered from the host's scroll
//! path without blocking it.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::host::{ScrollSource, ScrollSubscription, ViewportMetrics};

/// Raw scroll offset plus normalized page progress.
///
/// `scroll_progress` is 0 when the content does not scroll at all and
/// nominally stays in `[0, 1]`, though it can exceed the range
/// transiently while the document height changes under the reader.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Vertical scroll offset in px.
    pub scroll_y: f32,
    /// `scroll_y` divided by the maximum scrollable distance.
    pub scroll_progress: f32,
}

/// Tracks the page's normalized scroll progress.
///
/// [`attach`](Self::attach) subscribes to the host's scroll source and
/// refreshes once eagerly; [`detach`](Self::detach) unsubscribes.
/// Both are idempotent, and detaching before attaching is a no-op.
/// Dropping the tracker detaches it.
pub struct ScrollProgressTracker {
    state: Arc<Mutex<ScrollState>>,
    metrics: Arc<dyn ViewportMetrics>,
    source: Arc<dyn ScrollSource>,
    subscription: Mutex<Option<ScrollSubscription>>,
}

impl ScrollProgressTracker {
    /// Creates a tracker over the given host collaborators.
    pub fn new(metrics: Arc<dyn ViewportMetrics>, source: Arc<dyn ScrollSource>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScrollState::default())),
            metrics,
            source,
            subscription: Mutex::new(None),
        }
    }

    /// Subscribes to scroll notifications and refreshes eagerly.
    /// Ignored when already attached.
    pub fn attach(&self) {
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            return;
        }

        let state = self.state.clone();
        let metrics = self.metrics.clone();
        *subscription = Some(self.source.subscribe(Box::new(move || {
            refresh(&state, metrics.as_ref());
        })));
        drop(subscription);

        refresh(&self.state, self.metrics.as_ref());
        debug!("scroll progress tracker attached");
    }

    /// Unsubscribes from scroll notifications. Ignored when not
    /// attached.
    pub fn detach(&self) {
        let Some(subscription) = self.subscription.lock().take() else {
            return;
        };
        self.source.unsubscribe(subscription);
        debug!("scroll progress tracker detached");
    }

    /// Most recent scroll state.
    pub fn state(&self) -> ScrollState {
        *self.state.lock()
    }

    /// Current vertical scroll offset in px.
    pub fn scroll_y(&self) -> f32 {
        self.state.lock().scroll_y
    }

    /// Current normalized page progress.
    pub fn scroll_progress(&self) -> f32 {
        self.state.lock().scroll_progress
    }
}

impl Drop for ScrollProgressTracker {
    fn drop(&mut self) {
        self.detach();
    }
}

fn refresh(state: &Mutex<ScrollState>, metrics: &dyn ViewportMetrics) {
    let scroll_y = metrics.scroll_y();
    let doc_height = metrics.content_height() - metrics.viewport_height();
    let scroll_progress = if doc_height > 0.0 {
        scroll_y / doc_height
    } else {
        // Content shorter than the viewport never scrolls.
        0.0
    };
    *state.lock() = ScrollState {
        scroll_y,
        scroll_progress,
    };
}
