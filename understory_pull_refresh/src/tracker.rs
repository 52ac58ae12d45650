// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracking: engagement checks and raw displacement.
//!
//! ## Lifecycle
//!
//! 1) [`GestureTracker::begin`] checks the engagement policy and, when the
//!    gesture is accepted, snapshots the container's scroll metrics.
//! 2) [`GestureTracker::update`] records the pointer and returns the signed
//!    displacement (positive = pulled down). It never clamps.
//! 3) [`GestureTracker::end`] disarms and returns the final displacement once.
//!
//! Direction eligibility is always judged against the snapshot from
//! `begin`: scrolling that happens mid-gesture does not retarget a pull.

use kurbo::{Point, Rect};

use crate::config::TriggerHeight;
use crate::pointer::PointerKind;
use crate::probe::{ScrollDirection, ScrollProbe};
use crate::types::ScrollMetrics;

/// What the host knows about the container when a pointer goes down.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerContext<K> {
    /// The container's own scroll metrics.
    pub metrics: ScrollMetrics,
    /// Container bounding box in viewport coordinates.
    pub bounds: Rect,
    /// Height of the viewport.
    pub viewport_height: f64,
    /// Node the pointer went down on, for scroll probing.
    pub target: Option<K>,
}

impl<K> ContainerContext<K> {
    /// Context with no probe target.
    pub fn new(metrics: ScrollMetrics, bounds: Rect, viewport_height: f64) -> Self {
        Self {
            metrics,
            bounds,
            viewport_height,
            target: None,
        }
    }

    /// Attach the node the pointer went down on.
    pub fn with_target(mut self, target: K) -> Self {
        self.target = Some(target);
        self
    }

    /// True when the container starts above and ends below the viewport.
    pub fn spans_viewport(&self) -> bool {
        self.bounds.y0 < 0.0 && self.bounds.y1 > self.viewport_height
    }
}

/// Why a gesture start was not armed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Rejection {
    /// The controller is not mounted.
    NotMounted,
    /// The pointer event carried no usable coordinate.
    MissingCoordinates,
    /// A callback is in flight and the reentry policy locks new gestures out.
    RefreshInFlight,
    /// The start lies farther below the container's top than the trigger height.
    OutsideEngagementZone,
    /// An inner scrollable can still scroll up and should take the gesture.
    AbsorbedByInnerScroll,
    /// The container spans the whole viewport; leave the gesture to page scroll.
    ContainerOverflowsViewport,
}

/// Result of [`GestureTracker::begin`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BeginOutcome {
    /// A session is active.
    Armed,
    /// No session was started.
    Rejected(Rejection),
}

impl BeginOutcome {
    /// True when a session was started.
    pub fn is_armed(self) -> bool {
        matches!(self, Self::Armed)
    }
}

/// Pointer state for one gesture, from begin to end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSession {
    /// Where the pointer went down.
    pub start: Point,
    /// Latest pointer position.
    pub current: Point,
    /// Container metrics captured at begin.
    pub snapshot: ScrollMetrics,
    /// False once ended.
    pub active: bool,
}

impl GestureSession {
    /// Signed vertical displacement; positive is pulled down.
    #[inline]
    pub fn displacement(&self) -> f64 {
        self.current.y - self.start.y
    }
}

/// Owns the active [`GestureSession`], if any.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    session: Option<GestureSession>,
    last: f64,
}

impl GestureTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to arm a session at `position`.
    ///
    /// - `TriggerHeight::Fixed(h)` rejects starts more than `h` below the
    ///   container's top edge.
    /// - `TriggerHeight::Auto` rejects touches whose target can still scroll
    ///   up (mouse drags never scroll inner content natively, so the probe is
    ///   skipped for them), and any start while the container spans the whole
    ///   viewport.
    pub fn begin<K, P: ScrollProbe<K>>(
        &mut self,
        kind: PointerKind,
        position: Point,
        ctx: &ContainerContext<K>,
        trigger: TriggerHeight,
        probe: &P,
    ) -> BeginOutcome {
        if let Err(r) = check_engagement(kind, position, ctx, trigger, probe) {
            log::debug!("gesture rejected at y={}: {r:?}", position.y);
            return BeginOutcome::Rejected(r);
        }
        if self.is_active() {
            log::debug!("gesture restarted without an end");
        }
        self.session = Some(GestureSession {
            start: position,
            current: position,
            snapshot: ctx.metrics,
            active: true,
        });
        self.last = 0.0;
        log::debug!("gesture armed at y={}", position.y);
        BeginOutcome::Armed
    }

    /// Record a pointer move and return the displacement.
    ///
    /// Without an active session this returns the previous displacement.
    pub fn update(&mut self, position: Point) -> f64 {
        let Some(s) = self.session.as_mut().filter(|s| s.active) else {
            return self.last;
        };
        s.current = position;
        self.last = s.displacement();
        log::trace!("gesture moved: displacement {}", self.last);
        self.last
    }

    /// Disarm and return the final displacement, or `None` if already ended.
    pub fn end(&mut self) -> Option<f64> {
        let s = self.session.take().filter(|s| s.active)?;
        self.last = 0.0;
        Some(s.displacement())
    }

    /// True while a session is armed.
    pub fn is_active(&self) -> bool {
        self.session.is_some_and(|s| s.active)
    }

    /// The active session.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Current displacement, or zero without a session.
    pub fn displacement(&self) -> f64 {
        self.session.map_or(0.0, |s| s.displacement())
    }
}

fn check_engagement<K, P: ScrollProbe<K>>(
    kind: PointerKind,
    position: Point,
    ctx: &ContainerContext<K>,
    trigger: TriggerHeight,
    probe: &P,
) -> Result<(), Rejection> {
    match trigger {
        TriggerHeight::Unbounded => Ok(()),
        TriggerHeight::Fixed(h) => {
            if position.y - ctx.bounds.y0 > h {
                Err(Rejection::OutsideEngagementZone)
            } else {
                Ok(())
            }
        }
        TriggerHeight::Auto => {
            if kind == PointerKind::Touch
                && ctx
                    .target
                    .as_ref()
                    .is_some_and(|t| probe.can_scroll(t, ScrollDirection::Up))
            {
                return Err(Rejection::AbsorbedByInnerScroll);
            }
            if ctx.spans_viewport() {
                return Err(Rejection::ContainerOverflowsViewport);
            }
            Ok(())
        }
    }
}
