// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold classification and breach latching.
//!
//! ## Overview
//!
//! [`ThresholdEngine::classify`] is a pure function of displacement, the scroll
//! snapshot taken at gesture start, and the configured distances. It is
//! recomputed on every move.
//!
//! Visual travel is gated separately by [`ThresholdEngine::visual_offset`]:
//! once the displacement exceeds the measured indicator height for a
//! direction, nothing more is forwarded and the last applied translation
//! stays on screen. Threshold detection ignores that cap.
//!
//! [`BreachLatch`] turns per-move classifications into the one-way
//! breached flag of a session.
//!
//! ```
//! use understory_pull_refresh::config::PullToRefreshConfig;
//! use understory_pull_refresh::threshold::{BreachLatch, Classification, ThresholdEngine};
//! use understory_pull_refresh::types::{PullDirection, ScrollMetrics};
//!
//! let engine = ThresholdEngine::new(PullToRefreshConfig::new(80.0).thresholds(), false);
//! let at_top = ScrollMetrics::new(0.0, 1000.0, 400.0);
//! let mut latch = BreachLatch::default();
//!
//! latch.observe(100.0, engine.classify(100.0, &at_top));
//! // Pulling back below the threshold keeps the breach.
//! let c = engine.classify(40.0, &at_top);
//! assert_eq!(c, Classification::PullingDown);
//! latch.observe(40.0, c);
//! assert_eq!(latch.latched(), Some(PullDirection::Down));
//! ```

use crate::config::ThresholdConfig;
use crate::types::{PullDirection, ScrollMetrics};

/// Classification of the current displacement.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Classification {
    /// No eligible pull.
    #[default]
    Idle,
    /// Pulling down below the threshold.
    PullingDown,
    /// Pulling down at or past the threshold.
    DownBreached,
    /// Pulling up below the threshold.
    PullingUp,
    /// Pulling up at or past the threshold.
    UpBreached,
}

impl Classification {
    /// Direction being pulled, if any.
    pub fn direction(self) -> Option<PullDirection> {
        match self {
            Self::Idle => None,
            Self::PullingDown | Self::DownBreached => Some(PullDirection::Down),
            Self::PullingUp | Self::UpBreached => Some(PullDirection::Up),
        }
    }

    /// True when the threshold for the pulled direction is met.
    pub fn is_breached(self) -> bool {
        matches!(self, Self::DownBreached | Self::UpBreached)
    }
}

/// Pure classifier over a session's distances.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ThresholdEngine {
    thresholds: ThresholdConfig,
    pull_up_enabled: bool,
}

impl ThresholdEngine {
    /// Create an engine; `pull_up_enabled` is true when a load-more callback exists.
    pub fn new(thresholds: ThresholdConfig, pull_up_enabled: bool) -> Self {
        Self {
            thresholds,
            pull_up_enabled,
        }
    }

    /// Distances in use.
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Returns the direction `displacement` pulls in, if that pull is allowed
    /// from `snapshot`.
    ///
    /// Pull-down needs the container at its top, pull-up needs it at its
    /// bottom and a load-more callback.
    pub fn eligible(&self, displacement: f64, snapshot: &ScrollMetrics) -> Option<PullDirection> {
        let direction = PullDirection::of(displacement)?;
        if direction == PullDirection::Up && !self.pull_up_enabled {
            return None;
        }
        snapshot.at_boundary(direction).then_some(direction)
    }

    /// Classify a displacement against the snapshot taken at gesture start.
    pub fn classify(&self, displacement: f64, snapshot: &ScrollMetrics) -> Classification {
        let Some(direction) = self.eligible(displacement, snapshot) else {
            return Classification::Idle;
        };
        let breached = direction.sign() * displacement >= self.thresholds.threshold(direction);
        match (direction, breached) {
            (PullDirection::Down, false) => Classification::PullingDown,
            (PullDirection::Down, true) => Classification::DownBreached,
            (PullDirection::Up, false) => Classification::PullingUp,
            (PullDirection::Up, true) => Classification::UpBreached,
        }
    }

    /// Translation to forward to the presentation layer for this move.
    ///
    /// Returns `None` when the pull is ineligible or travels past the
    /// measured indicator height.
    pub fn visual_offset(
        &self,
        displacement: f64,
        snapshot: &ScrollMetrics,
    ) -> Option<(PullDirection, f64)> {
        let direction = self.eligible(displacement, snapshot)?;
        (direction.sign() * displacement <= self.thresholds.max_distance(direction))
            .then_some((direction, displacement))
    }

    /// Translation a refresh is pinned at after release.
    pub fn pinned_offset(&self, direction: PullDirection) -> f64 {
        direction.sign() * self.thresholds.threshold(direction)
    }
}

/// One-way breach latch for a single session.
///
/// Once a direction breaches it stays latched while the displacement keeps
/// that sign, so an overshoot followed by a partial retract still triggers.
/// Crossing to the opposite sign releases it: a latched direction never
/// coexists with displacement the other way, and at most one direction is
/// latched.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BreachLatch {
    latched: Option<PullDirection>,
}

impl BreachLatch {
    /// Feed one move. Returns the direction that became latched on this move.
    pub fn observe(
        &mut self,
        displacement: f64,
        classification: Classification,
    ) -> Option<PullDirection> {
        if let (Some(held), Some(now)) = (self.latched, PullDirection::of(displacement))
            && held != now
        {
            log::debug!("{held:?} breach released: displacement crossed to {now:?}");
            self.latched = None;
        }
        if self.latched.is_none() && classification.is_breached() {
            self.latched = classification.direction();
            return self.latched;
        }
        None
    }

    /// Latched direction, if any.
    pub fn latched(&self) -> Option<PullDirection> {
        self.latched
    }

    /// Release the latch.
    pub fn clear(&mut self) {
        self.latched = None;
    }
}
