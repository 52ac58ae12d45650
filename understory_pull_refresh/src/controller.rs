// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pull-to-refresh controller for one mounted widget.
//!
//! ## Usage
//!
//! - Construct with [`PullToRefresh::new`], optionally adding a load-more
//!   callback ([`PullToRefresh::with_pull_up`]) and a scroll probe
//!   ([`PullToRefresh::with_probe`]).
//! - Report measured indicator heights with
//!   [`PullToRefresh::set_indicator_extent`].
//! - Feed pointer events through [`PullToRefresh::handle_pointer`] and apply
//!   the returned [`VisualUpdate`]s. While [`PullToRefresh::is_dragging`] is
//!   true, consume move events so the platform does not scroll as well.
//! - Call [`PullToRefresh::on_frame`] at the next paint whenever
//!   [`PullToRefresh::needs_frame`] is true, and [`PullToRefresh::tick`] from
//!   the event loop (at least by [`PullToRefresh::next_deadline`]).
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_pull_refresh::completion::completion;
//! use understory_pull_refresh::config::PullToRefreshConfig;
//! use understory_pull_refresh::controller::PullToRefresh;
//! use understory_pull_refresh::pointer::{PointerEvent, PointerPhase};
//! use understory_pull_refresh::tracker::ContainerContext;
//! use understory_pull_refresh::types::{GestureState, PullDirection, ScrollMetrics, VisualUpdate};
//!
//! let (done, resolver) = completion();
//! let mut pending = Some(done);
//! let mut ptr: PullToRefresh<()> =
//!     PullToRefresh::new(PullToRefreshConfig::new(80.0), move || pending.take().unwrap()).unwrap();
//! ptr.set_indicator_extent(PullDirection::Down, 120.0);
//!
//! let ctx = ContainerContext::new(
//!     ScrollMetrics::new(0.0, 2000.0, 600.0),
//!     Rect::new(0.0, 0.0, 400.0, 600.0),
//!     800.0,
//! );
//! let at = |phase, y| PointerEvent::mouse(phase, Point::new(0.0, y));
//! ptr.handle_pointer(&at(PointerPhase::Down, 10.0), &ctx);
//! ptr.handle_pointer(&at(PointerPhase::Move, 110.0), &ctx);
//! let release = ptr.handle_pointer(&at(PointerPhase::Up, 110.0), &ctx);
//! assert!(release.contains(&VisualUpdate::Translate(80.0)));
//! assert!(ptr.state().contains(GestureState::REFRESHING));
//!
//! resolver.fulfill();
//! ptr.tick(Duration::from_millis(500));
//! assert_eq!(ptr.on_frame(), vec![
//!     VisualUpdate::Overflow(understory_pull_refresh::types::Overflow::Auto),
//!     VisualUpdate::ResetTransform,
//! ]);
//! ptr.tick(Duration::from_millis(700));
//! assert_eq!(ptr.state(), GestureState::empty());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use core::time::Duration;

use kurbo::Point;

use crate::completion::Completion;
use crate::config::{ConfigError, PullToRefreshConfig, ReentryPolicy, ThresholdConfig};
use crate::orchestrator::{RefreshOrchestrator, RefreshPhase};
use crate::pointer::{PointerEvent, PointerKind, PointerPhase};
use crate::probe::{NoProbe, ScrollProbe};
use crate::threshold::{BreachLatch, Classification, ThresholdEngine};
use crate::tracker::{BeginOutcome, ContainerContext, GestureTracker, Rejection};
use crate::types::{
    GestureState, IndicatorContent, Overflow, PullDirection, Visibility, VisualUpdate,
};

/// Pull-to-refresh state for one mounted widget.
///
/// `K` is the host's node key, used only for scroll probing; `P` is the probe.
pub struct PullToRefresh<K, P = NoProbe> {
    config: PullToRefreshConfig,
    thresholds: ThresholdConfig,
    tracker: GestureTracker,
    latch: BreachLatch,
    engine: ThresholdEngine,
    orchestrator: RefreshOrchestrator,
    probe: P,
    mounted: bool,
    visual_only: bool,
    content: [IndicatorContent; 2],
    _phantom: PhantomData<fn(&K)>,
}

impl<K, P> fmt::Debug for PullToRefresh<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullToRefresh")
            .field("config", &self.config)
            .field("thresholds", &self.thresholds)
            .field("tracker", &self.tracker)
            .field("orchestrator", &self.orchestrator)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl<K> PullToRefresh<K, NoProbe> {
    /// Create a mounted controller with a refresh callback.
    pub fn new(
        config: PullToRefreshConfig,
        on_refresh: impl FnMut() -> Completion + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let thresholds = config.thresholds();
        let orchestrator = RefreshOrchestrator::new(Box::new(on_refresh), config.settle_grace);
        Ok(Self {
            config,
            thresholds,
            tracker: GestureTracker::new(),
            latch: BreachLatch::default(),
            engine: ThresholdEngine::new(thresholds, false),
            orchestrator,
            probe: NoProbe,
            mounted: true,
            visual_only: false,
            content: [IndicatorContent::Pull; 2],
            _phantom: PhantomData,
        })
    }
}

impl<K, P: ScrollProbe<K>> PullToRefresh<K, P> {
    /// Add a load-more callback, enabling pull-up.
    pub fn with_pull_up(mut self, on_pull_up: impl FnMut() -> Completion + 'static) -> Self {
        self.orchestrator.set_pull_up(Some(Box::new(on_pull_up)));
        self
    }

    /// Replace the scroll probe consulted in auto trigger mode.
    pub fn with_probe<Q: ScrollProbe<K>>(self, probe: Q) -> PullToRefresh<K, Q> {
        PullToRefresh {
            config: self.config,
            thresholds: self.thresholds,
            tracker: self.tracker,
            latch: self.latch,
            engine: self.engine,
            orchestrator: self.orchestrator,
            probe,
            mounted: self.mounted,
            visual_only: self.visual_only,
            content: self.content,
            _phantom: PhantomData,
        }
    }

    /// Replace the configuration. Takes effect from the next gesture.
    pub fn set_config(&mut self, config: PullToRefreshConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.thresholds.pull_down_threshold = config.pull_down_threshold;
        self.thresholds.pull_up_threshold = config.pull_up_threshold;
        self.orchestrator.set_settle_grace(config.settle_grace);
        self.config = config;
        Ok(())
    }

    /// Current configuration.
    pub fn config(&self) -> &PullToRefreshConfig {
        &self.config
    }

    /// Cache the measured height of an indicator region.
    ///
    /// This is the farthest the container visually travels in that direction.
    /// Call again whenever the indicator content is re-measured. Takes effect
    /// from the next gesture.
    pub fn set_indicator_extent(&mut self, direction: PullDirection, measured: f64) {
        self.thresholds.set_max_distance(direction, measured);
    }

    /// Distances that the next gesture will use.
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Start listening for events again after [`unmount`](Self::unmount).
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Stop listening, dropping the session and any callback in flight.
    ///
    /// Nothing carries over to a later [`mount`](Self::mount).
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.tracker.end();
        self.latch.clear();
        self.visual_only = false;
        self.orchestrator.reset();
        self.content = [IndicatorContent::Pull; 2];
    }

    /// True while mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Route a pointer event to the matching handler.
    ///
    /// Down events with a missing coordinate are ignored; up and cancel never
    /// need one (a lifted touch has no contact points).
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &ContainerContext<K>,
    ) -> Vec<VisualUpdate> {
        match event.phase {
            PointerPhase::Down => {
                let Some(y) = event.page_y() else {
                    log::debug!("pointer down without coordinates ignored");
                    return Vec::new();
                };
                let x = event.page.map_or(0.0, |p| p.x);
                self.pointer_down(event.kind, Point::new(x, y), ctx)
                    .unwrap_or_default()
            }
            PointerPhase::Move => match event.page.filter(|_| event.page_y().is_some()) {
                Some(p) => self.pointer_move(p),
                None => Vec::new(),
            },
            PointerPhase::Up => self.pointer_up(),
            PointerPhase::Cancel => self.pointer_cancel(),
        }
    }

    /// Try to start a gesture.
    ///
    /// On success returns the transition styling to arm; otherwise the reason
    /// the gesture was left alone.
    pub fn pointer_down(
        &mut self,
        kind: PointerKind,
        position: Point,
        ctx: &ContainerContext<K>,
    ) -> Result<Vec<VisualUpdate>, Rejection> {
        if !self.mounted {
            return Err(Rejection::NotMounted);
        }
        let reentrant = self.orchestrator.in_flight().is_some();
        if reentrant && self.config.reentry == ReentryPolicy::LockWhileRefreshing {
            log::debug!("gesture rejected: refresh in flight");
            return Err(Rejection::RefreshInFlight);
        }
        let outcome = self.tracker.begin(
            kind,
            position,
            ctx,
            self.config.trigger_height,
            &self.probe,
        );
        if let BeginOutcome::Rejected(r) = outcome {
            return Err(r);
        }
        self.engine = ThresholdEngine::new(self.thresholds, self.orchestrator.has_pull_up());
        self.latch.clear();
        self.visual_only = reentrant;
        let mut out = alloc::vec![VisualUpdate::Transition(Some(
            self.config.transition.clone()
        ))];
        if !reentrant {
            // Drop flags left by a session that never saw an up.
            self.orchestrator.track(Classification::Idle, None);
            self.push_content_changes(&mut out);
        }
        Ok(out)
    }

    /// Track a move of the active gesture.
    pub fn pointer_move(&mut self, position: Point) -> Vec<VisualUpdate> {
        let Some(snapshot) = self.tracker.session().map(|s| s.snapshot) else {
            return Vec::new();
        };
        if !self.mounted || !self.tracker.is_active() {
            return Vec::new();
        }
        let d = self.tracker.update(position);
        if !self.visual_only {
            let c = self.engine.classify(d, &snapshot);
            if let Some(direction) = self.latch.observe(d, c) {
                log::debug!("{direction:?} threshold breached at displacement {d}");
            }
            self.orchestrator.track(c, self.latch.latched());
        }
        let mut out = Vec::new();
        if let Some((direction, offset)) = self.engine.visual_offset(d, &snapshot) {
            out.push(VisualUpdate::Overflow(Overflow::Visible));
            out.push(VisualUpdate::Translate(offset));
            out.push(VisualUpdate::IndicatorVisibility {
                direction,
                visibility: Visibility::Visible,
            });
        }
        self.push_content_changes(&mut out);
        out
    }

    /// Release the active gesture. A second call is a no-op.
    pub fn pointer_up(&mut self) -> Vec<VisualUpdate> {
        self.finish(true)
    }

    /// Abort the active gesture; never triggers a callback.
    pub fn pointer_cancel(&mut self) -> Vec<VisualUpdate> {
        self.finish(false)
    }

    /// Observe callback completions and grace deadlines.
    ///
    /// `now` is a monotonic timestamp from any fixed origin.
    pub fn tick(&mut self, now: Duration) -> Vec<VisualUpdate> {
        let mut out = Vec::new();
        if self.orchestrator.tick(now) {
            self.push_content_changes(&mut out);
        }
        out
    }

    /// When [`tick`](Self::tick) must next run, if a grace delay is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.orchestrator.next_deadline()
    }

    /// True when a container reset waits for the next paint.
    pub fn needs_frame(&self) -> bool {
        self.orchestrator.needs_frame()
    }

    /// Apply work deferred to the paint boundary.
    pub fn on_frame(&mut self) -> Vec<VisualUpdate> {
        self.orchestrator.on_frame()
    }

    /// Published gesture flags.
    pub fn state(&self) -> GestureState {
        self.orchestrator.state()
    }

    /// Refresh phase for `direction`.
    pub fn phase(&self, direction: PullDirection) -> RefreshPhase {
        self.orchestrator.phase(direction)
    }

    /// True while a gesture is armed.
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_active()
    }

    /// Current displacement of the active gesture, or zero.
    pub fn displacement(&self) -> f64 {
        self.tracker.displacement()
    }

    /// Content the indicator for `direction` should show.
    pub fn indicator_content(&self, direction: PullDirection) -> IndicatorContent {
        self.state().indicator_content(direction)
    }

    /// Visibility indicators take at rest.
    pub fn rest_visibility(&self) -> Visibility {
        self.config.rest_visibility()
    }

    fn finish(&mut self, released: bool) -> Vec<VisualUpdate> {
        let Some(d) = self.tracker.end() else {
            return Vec::new();
        };
        let latched = if released && !self.visual_only {
            self.latch.latched()
        } else {
            None
        };
        self.latch.clear();
        self.visual_only = false;
        let mut out = self
            .orchestrator
            .release(d, latched, &self.engine, self.config.rest_visibility());
        self.push_content_changes(&mut out);
        out
    }

    fn push_content_changes(&mut self, out: &mut Vec<VisualUpdate>) {
        let state = self.orchestrator.state();
        for (i, direction) in PullDirection::ALL.into_iter().enumerate() {
            let content = state.indicator_content(direction);
            if content == self.content[i] {
                continue;
            }
            self.content[i] = content;
            if direction == PullDirection::Up && !self.orchestrator.has_pull_up() {
                continue;
            }
            out.push(VisualUpdate::IndicatorContent { direction, content });
        }
    }
}
