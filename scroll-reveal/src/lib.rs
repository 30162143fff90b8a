//! scroll-reveal computes smoothed 3D transform and opacity values for
//! a visual element from its position within the viewport, producing a
//! scroll-driven parallax/reveal animation, plus a normalized
//! page-scroll progress signal.
//!
//! # Architecture
//!
//! Three independent pieces:
//!
//! - [`curve`]: pure 3-point piecewise-linear mapping, the
//!   interpolation primitive everything else is built on.
//! - [`driver`]: a [`RevealDriver`] owns current/target parameter
//!   state for one tracked element. Every frame it recomputes targets
//!   from element geometry, eases the rendered state toward them, and
//!   emits a [`RevealStyle`] snapshot. The frame loop is
//!   self-rescheduling and runs from [`RevealDriver::attach`] until
//!   [`RevealDriver::detach`].
//! - [`tracker`]: a [`ScrollProgressTracker`] exposes the page's raw
//!   scroll offset and normalized progress, recomputed on every scroll
//!   notification with no smoothing of its own.
//!
//! The crate never touches a real windowing system. Hosts provide the
//! traits in [`host`] (element geometry, viewport metrics, a
//! frame-paced scheduler and a scroll source) and project the emitted
//! style onto whatever they render with. The `testing` feature adds
//! `sim::SimHost`, a deterministic host with manually-stepped frames
//! used by the test suite and the example.
//!
//! # Curve mapping
//!
//! ```
//! use scroll_reveal::{Curve, map_range};
//!
//! // (start, mid, end) control values, hit at t = 0, 0.5 and 1.
//! let rotate_x = Curve::new(-15.0, 0.0, 10.0);
//!
//! // Progress 1.0 against the driver's (-0.5, 1.5) bounds normalizes
//! // to t = 0.75, halfway through the second segment.
//! assert_eq!(map_range(1.0, -0.5, 1.5, rotate_x), 5.0);
//! ```

pub mod curve;
pub mod driver;
pub mod host;
pub mod tracker;

#[cfg(any(test, feature = "testing"))]
pub mod sim;

pub use curve::{Curve, lerp, map_range};
pub use driver::{RevealArgs, RevealDriver, RevealParams, RevealStyle};
pub use host::{
    ElementHandle, ElementRect, FrameCallback, FrameHandle, FrameScheduler, ScrollCallback,
    ScrollSource, ScrollSubscription, ViewportMetrics,
};
pub use tracker::{ScrollProgressTracker, ScrollState};
