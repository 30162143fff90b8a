//! Scroll-driven reveal animation driver.
//!
//! A [`RevealDriver`] tracks one element. Every frame it reads the
//! element's position within the viewport, maps the resulting progress
//! scalar through a set of 3-point curves to obtain target transform
//! parameters, eases the rendered parameters toward those targets, and
//! composes a CSS-style transform/opacity snapshot for the host's
//! rendering layer to project.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    curve::{Curve, lerp, map_range},
    host::{ElementHandle, FrameHandle, FrameScheduler, ViewportMetrics},
};

/// Input bounds for the four transform curves.
const TRANSFORM_INPUT_RANGE: (f32, f32) = (-0.5, 1.5);
/// Input bounds for the opacity envelope.
const OPACITY_INPUT_RANGE: (f32, f32) = (-0.3, 1.3);
/// Fade-in/fade-out envelope. The trailing 0.3 (rather than 0.0) is
/// intentional: elements leaving the viewport keep a partial fade.
const OPACITY_CURVE: Curve = Curve::new(0.0, 1.0, 0.3);

/// Arguments for a [`RevealDriver`].
///
/// Each range is a (start, mid, end) curve evaluated against the
/// element's viewport progress; see [`map_range`].
#[derive(Debug, Clone, PartialEq)]
pub struct RevealArgs {
    /// Rotation around the X axis, in degrees.
    pub rotate_x_range: Curve,
    /// Rotation around the Y axis, in degrees.
    pub rotate_y_range: Curve,
    /// Uniform scale factor.
    pub scale_range: Curve,
    /// Depth translation, in px.
    pub translate_z_range: Curve,
    /// Exponential smoothing factor in (0, 1).
    /// Larger values track targets faster; smaller values float more.
    pub easing: f32,
}

impl Default for RevealArgs {
    fn default() -> Self {
        Self {
            rotate_x_range: Curve::new(-15.0, 0.0, 10.0),
            rotate_y_range: Curve::new(20.0, 0.0, -20.0),
            scale_range: Curve::new(0.7, 1.0, 0.85),
            translate_z_range: Curve::new(-200.0, 0.0, -100.0),
            easing: 0.08,
        }
    }
}

impl RevealArgs {
    /// Sets the rotateX curve.
    pub fn rotate_x_range(mut self, curve: impl Into<Curve>) -> Self {
        self.rotate_x_range = curve.into();
        self
    }

    /// Sets the rotateY curve.
    pub fn rotate_y_range(mut self, curve: impl Into<Curve>) -> Self {
        self.rotate_y_range = curve.into();
        self
    }

    /// Sets the scale curve.
    pub fn scale_range(mut self, curve: impl Into<Curve>) -> Self {
        self.scale_range = curve.into();
        self
    }

    /// Sets the translateZ curve.
    pub fn translate_z_range(mut self, curve: impl Into<Curve>) -> Self {
        self.translate_z_range = curve.into();
        self
    }

    /// Sets the smoothing factor. Must stay within (0, 1).
    pub fn easing(mut self, easing: f32) -> Self {
        self.easing = easing;
        self
    }
}

/// The five animated scalar fields of one tracked element.
///
/// A driver owns two instances: `current` (what is rendered) and
/// `target` (what the element's viewport position asks for). Targets
/// are recomputed every tick; `current` chases them by exponential
/// smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealParams {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
    pub translate_z: f32,
    pub opacity: f32,
}

impl RevealParams {
    /// Advances every field one smoothing step toward `target`.
    ///
    /// With `easing` in (0, 1) this strictly shrinks the gap each call
    /// and leaves an already-converged value untouched.
    pub fn approach(&mut self, target: &RevealParams, easing: f32) {
        self.rotate_x = lerp(self.rotate_x, target.rotate_x, easing);
        self.rotate_y = lerp(self.rotate_y, target.rotate_y, easing);
        self.scale = lerp(self.scale, target.scale, easing);
        self.translate_z = lerp(self.translate_z, target.translate_z, easing);
        self.opacity = lerp(self.opacity, target.opacity, easing);
    }

    fn initial(args: &RevealArgs) -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            scale: args.scale_range.start(),
            translate_z: args.translate_z_range.start(),
            opacity: 0.0,
        }
    }

    fn retarget(&mut self, args: &RevealArgs, progress: f32) {
        let (in_min, in_max) = TRANSFORM_INPUT_RANGE;
        self.rotate_x = map_range(progress, in_min, in_max, args.rotate_x_range);
        self.rotate_y = map_range(progress, in_min, in_max, args.rotate_y_range);
        self.scale = map_range(progress, in_min, in_max, args.scale_range);
        self.translate_z = map_range(progress, in_min, in_max, args.translate_z_range);

        let (in_min, in_max) = OPACITY_INPUT_RANGE;
        self.opacity = map_range(progress, in_min, in_max, OPACITY_CURVE).clamp(0.0, 1.0);
    }
}

/// Render-ready style snapshot derived from [`RevealParams`].
///
/// Both fields are textual with fixed precision so consumers can rely
/// on exact string equality frame-over-frame when the parameters have
/// settled.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealStyle {
    /// `perspective(..) rotateX(..) rotateY(..) scale(..) translateZ(..)`,
    /// always in that order.
    pub transform: String,
    /// Opacity in `[0, 1]`, rendered with 3 decimal places.
    pub opacity: String,
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self {
            transform: String::new(),
            opacity: "0".to_string(),
        }
    }
}

impl RevealStyle {
    /// Composes the style string for a parameter snapshot.
    pub fn compose(params: &RevealParams) -> Self {
        Self {
            transform: format!(
                "perspective(1200px) rotateX({:.2}deg) rotateY({:.2}deg) scale({:.4}) translateZ({:.1}px)",
                params.rotate_x, params.rotate_y, params.scale, params.translate_z,
            ),
            opacity: format!("{:.3}", params.opacity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverPhase {
    /// No tick scheduled yet.
    Unattached,
    /// Self-sustaining tick loop active.
    Running,
    /// Terminal. The loop is cancelled and never restarts.
    Detached,
}

struct DriverState {
    phase: DriverPhase,
    args: RevealArgs,
    current: RevealParams,
    target: RevealParams,
    style: RevealStyle,
    /// Handle of the one pending frame while Running.
    pending: Option<FrameHandle>,
}

/// Drives the reveal animation for one tracked element.
///
/// The driver starts unattached; call [`attach`](Self::attach) once
/// the host is ready to service frames.
/// Each tick reschedules itself, so the loop runs until
/// [`detach`](Self::detach) cancels it. Detach is terminal, idempotent
/// and safe to call before attach. Dropping the driver detaches it.
pub struct RevealDriver {
    state: Arc<Mutex<DriverState>>,
    element: Arc<dyn ElementHandle>,
    metrics: Arc<dyn ViewportMetrics>,
    scheduler: Arc<dyn FrameScheduler>,
}

impl RevealDriver {
    /// Creates a driver over the given host collaborators.
    ///
    /// `current` is seeded with the rotations at rest, scale and
    /// translateZ at their curve start points, and opacity 0; `target`
    /// mirrors it until the first tick.
    pub fn new(
        element: Arc<dyn ElementHandle>,
        metrics: Arc<dyn ViewportMetrics>,
        scheduler: Arc<dyn FrameScheduler>,
        args: RevealArgs,
    ) -> Self {
        let current = RevealParams::initial(&args);
        let state = DriverState {
            phase: DriverPhase::Unattached,
            args,
            current,
            target: current,
            style: RevealStyle::default(),
            pending: None,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            element,
            metrics,
            scheduler,
        }
    }

    /// Starts the tick loop. Ignored unless the driver is unattached.
    pub fn attach(&self) {
        let mut state = self.state.lock();
        if state.phase != DriverPhase::Unattached {
            return;
        }
        state.phase = DriverPhase::Running;
        let handle = schedule_tick(&self.state, &self.element, &self.metrics, &self.scheduler);
        state.pending = Some(handle);
        debug!("reveal driver attached");
    }

    /// Stops the tick loop and cancels the pending frame, if any.
    ///
    /// Terminal: a detached driver never ticks again. Calling this
    /// repeatedly, or before [`attach`](Self::attach), is a no-op.
    pub fn detach(&self) {
        let pending = {
            let mut state = self.state.lock();
            if state.phase == DriverPhase::Detached {
                return;
            }
            state.phase = DriverPhase::Detached;
            state.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel_frame(handle);
        }
        debug!("reveal driver detached");
    }

    /// Whether the tick loop is currently active.
    pub fn is_running(&self) -> bool {
        self.state.lock().phase == DriverPhase::Running
    }

    /// Most recent style snapshot.
    pub fn style(&self) -> RevealStyle {
        self.state.lock().style.clone()
    }

    /// Currently rendered parameter state.
    pub fn params(&self) -> RevealParams {
        self.state.lock().current
    }

    /// Parameter state the driver is easing toward.
    pub fn target_params(&self) -> RevealParams {
        self.state.lock().target
    }
}

impl Drop for RevealDriver {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Requests the next tick and returns its cancellation handle.
fn schedule_tick(
    state: &Arc<Mutex<DriverState>>,
    element: &Arc<dyn ElementHandle>,
    metrics: &Arc<dyn ViewportMetrics>,
    scheduler: &Arc<dyn FrameScheduler>,
) -> FrameHandle {
    // The callback holds the state weakly so a driver dropped without
    // detach does not keep its state alive through the scheduler.
    let state = Arc::downgrade(state);
    let element = element.clone();
    let metrics = metrics.clone();
    let scheduler_for_tick = scheduler.clone();
    scheduler.request_frame(Box::new(move || {
        let Some(state) = state.upgrade() else {
            return;
        };
        tick(&state, &element, &metrics, &scheduler_for_tick);
    }))
}

fn tick(
    state: &Arc<Mutex<DriverState>>,
    element: &Arc<dyn ElementHandle>,
    metrics: &Arc<dyn ViewportMetrics>,
    scheduler: &Arc<dyn FrameScheduler>,
) {
    let mut state_guard = state.lock();
    if state_guard.phase != DriverPhase::Running {
        return;
    }
    state_guard.pending = None;

    let Some(rect) = element.geometry() else {
        // Element not resolvable yet. Keep the loop alive and try
        // again next frame.
        trace!("tracked element unresolved, skipping tick");
        let handle = schedule_tick(state, element, metrics, scheduler);
        state_guard.pending = Some(handle);
        return;
    };

    let viewport_height = metrics.viewport_height();
    let element_center = rect.top + rect.height / 2.0;
    // 0 when the element center sits at the viewport bottom edge,
    // increasing as the element rises.
    let progress = 1.0 - element_center / viewport_height;

    let DriverState {
        args,
        current,
        target,
        style,
        ..
    } = &mut *state_guard;
    target.retarget(args, progress);
    current.approach(target, args.easing);
    *style = RevealStyle::compose(current);

    let handle = schedule_tick(state, element, metrics, scheduler);
    state_guard.pending = Some(handle);
}
