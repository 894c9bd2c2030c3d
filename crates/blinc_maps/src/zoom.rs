//! Box-fitted zoom for map charts
//!
//! A zoom scales the visible rectangle about a focal point, fits the result
//! inside the data bounds, and pins both axes to it. While the transition of
//! the previous zoom is running, new requests are dropped.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::axis::Axis;
use crate::view::{Domain1D, Domain2D, Point, Rect};

/// Fit `inner` inside `outer`, one dimension at a time.
///
/// Trailing overflow either snaps to `outer` (when `inner` is also larger)
/// or shifts back flush with the trailing edge. Afterwards the size is capped
/// at `outer`'s and the leading edge is pushed up to `outer`'s.
pub fn fit_to_box(inner: Rect, outer: Rect) -> Rect {
    let (x, width) = fit_span(inner.x, inner.width, outer.x, outer.width);
    let (y, height) = fit_span(inner.y, inner.height, outer.y, outer.height);
    Rect::new(x, y, width, height)
}

fn fit_span(mut pos: f32, mut size: f32, outer_pos: f32, outer_size: f32) -> (f32, f32) {
    if pos + size > outer_pos + outer_size {
        if size > outer_size {
            size = outer_size;
            pos = outer_pos;
        } else {
            pos = outer_pos + outer_size - size;
        }
    }
    if size > outer_size {
        size = outer_size;
    }
    if pos < outer_pos {
        pos = outer_pos;
    }
    (pos, size)
}

/// Time source for the zoom latch.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> Instant,
{
    fn now(&self) -> Instant {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomPhase {
    Idle,
    Zooming,
}

/// Mutual-exclusion latch released once its deadline passes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoomLatch {
    release_at: Option<Instant>,
}

impl ZoomLatch {
    pub fn engage(&mut self, now: Instant, duration: Duration) {
        if !duration.is_zero() {
            self.release_at = Some(now + duration);
        }
    }

    /// Whether the latch still holds at `now`; clears it once expired.
    pub fn is_engaged(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(at) if now < at => true,
            Some(_) => {
                self.release_at = None;
                false
            }
            None => false,
        }
    }
}

/// Zoom state machine: idle, or zooming until the transition has elapsed.
#[derive(Debug)]
pub struct MapNavigator<C: Clock = SystemClock> {
    clock: C,
    latch: ZoomLatch,
    transition: Duration,
}

impl MapNavigator<SystemClock> {
    pub fn new(transition: Duration) -> Self {
        Self::with_clock(transition, SystemClock)
    }
}

impl<C: Clock> MapNavigator<C> {
    pub fn with_clock(transition: Duration, clock: C) -> Self {
        Self {
            clock,
            latch: ZoomLatch::default(),
            transition,
        }
    }

    pub fn transition(&self) -> Duration {
        self.transition
    }

    pub fn phase(&mut self) -> ZoomPhase {
        if self.latch.is_engaged(self.clock.now()) {
            ZoomPhase::Zooming
        } else {
            ZoomPhase::Idle
        }
    }

    /// Rectangle that zooming by `factor` about `focus` would show, fitted to
    /// the data bounds. `None` when the axes have no data extremes yet.
    pub fn target(
        x_axis: &Axis,
        y_axis: &Axis,
        factor: f32,
        focus: Option<Point>,
    ) -> Option<Rect> {
        let bound = Domain2D::new(x_axis.data_extremes()?, y_axis.data_extremes()?).to_rect();
        let x: Domain1D = x_axis.extremes();
        let y: Domain1D = y_axis.extremes();
        let center = focus.unwrap_or_else(|| Point::new(x.center(), y.center()));
        let candidate =
            Domain2D::new(x.rescaled(factor, center.x), y.rescaled(factor, center.y)).to_rect();
        Some(fit_to_box(candidate, bound))
    }

    /// Zoom both axes by `factor` (< 1 zooms in, > 1 zooms out), centered on
    /// `focus` in data coordinates or on the current view center.
    ///
    /// Pins the axes' extremes without laying them out; the caller redraws
    /// once. Returns the applied rectangle, or `None` when the request was
    /// dropped.
    pub fn zoom(
        &mut self,
        x_axis: &mut Axis,
        y_axis: &mut Axis,
        factor: f32,
        focus: Option<Point>,
    ) -> Option<Rect> {
        let now = self.clock.now();
        if self.latch.is_engaged(now) {
            trace!(factor, "zoom in progress, request dropped");
            return None;
        }
        if !(factor.is_finite() && factor > 0.0) {
            trace!(factor, "ignoring invalid zoom factor");
            return None;
        }

        let fitted = Self::target(x_axis, y_axis, factor, focus)?;
        x_axis.set_extremes(Some(fitted.x), Some(fitted.right()));
        y_axis.set_extremes(Some(fitted.y), Some(fitted.bottom()));

        self.latch.engage(now, self.transition);
        Some(fitted)
    }
}
