// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration: thresholds, engagement policy, and timing.
//!
//! ## Minimal example
//!
//! ```
//! use understory_pull_refresh::config::{PullToRefreshConfig, TriggerHeight};
//!
//! let config = PullToRefreshConfig::new(80.0)
//!     .with_pull_up_threshold(60.0)
//!     .with_trigger_height(TriggerHeight::Auto);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.effective_pull_up_threshold(), 60.0);
//! ```

use core::time::Duration;

use crate::types::{PullDirection, Transition, Visibility};

/// Errors reported when validating a [`PullToRefreshConfig`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A threshold is not a finite, strictly positive distance.
    #[error("{direction:?} threshold must be finite and greater than zero, got {value}")]
    InvalidThreshold {
        /// Direction the threshold applies to.
        direction: PullDirection,
        /// Rejected value.
        value: f64,
    },
    /// A fixed trigger height is negative or NaN.
    #[error("trigger height must be a non-negative distance, got {0}")]
    InvalidTriggerHeight(f64),
}

/// Where on the container a pull-down gesture may start.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerHeight {
    /// Any start position engages.
    #[default]
    Unbounded,
    /// Only starts within this many pixels of the container's top edge engage.
    Fixed(f64),
    /// Decide per gesture: defer to inner scrollables and to page scroll when
    /// the container spans the whole viewport.
    Auto,
}

/// Whether a new gesture may begin while a callback is in flight.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReentryPolicy {
    /// New gestures are tracked for visual feedback only; they cannot start a
    /// second callback.
    #[default]
    Allow,
    /// New gestures are rejected until the in-flight callback settles.
    LockWhileRefreshing,
}

/// Distances used to classify a gesture.
///
/// The max distances are measured from the indicator regions by the host and
/// cached via [`ThresholdConfig::set_max_distance`]; they stay non-negative.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ThresholdConfig {
    /// Pull-down activation distance.
    pub pull_down_threshold: f64,
    /// Pull-up activation distance; falls back to `pull_down_threshold`.
    pub pull_up_threshold: Option<f64>,
    /// Measured height of the pull-down indicator.
    pub max_pull_down_distance: f64,
    /// Measured height of the pull-up indicator.
    pub max_pull_up_distance: f64,
}

impl ThresholdConfig {
    /// Activation distance for `direction`.
    pub fn threshold(&self, direction: PullDirection) -> f64 {
        match direction {
            PullDirection::Down => self.pull_down_threshold,
            PullDirection::Up => self.pull_up_threshold.unwrap_or(self.pull_down_threshold),
        }
    }

    /// Visual travel cap for `direction`.
    pub fn max_distance(&self, direction: PullDirection) -> f64 {
        match direction {
            PullDirection::Down => self.max_pull_down_distance,
            PullDirection::Up => self.max_pull_up_distance,
        }
    }

    /// Cache a measured indicator height. Negative or non-finite measurements
    /// are stored as zero.
    pub fn set_max_distance(&mut self, direction: PullDirection, measured: f64) {
        let v = if measured.is_finite() && measured > 0.0 {
            measured
        } else {
            0.0
        };
        match direction {
            PullDirection::Down => self.max_pull_down_distance = v,
            PullDirection::Up => self.max_pull_up_distance = v,
        }
    }
}

/// Options recognized by the [controller](crate::controller::PullToRefresh).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PullToRefreshConfig {
    /// Pull-down activation distance in pixels. Required.
    pub pull_down_threshold: f64,
    /// Pull-up activation distance; defaults to `pull_down_threshold`.
    pub pull_up_threshold: Option<f64>,
    /// Engagement zone for gesture starts.
    pub trigger_height: TriggerHeight,
    /// Hide indicators while at rest.
    pub start_invisible: bool,
    /// Delay between the deferred visual reset and clearing the refreshing flags.
    pub settle_grace: Duration,
    /// Transition armed on the container and indicators at gesture start.
    pub transition: Transition,
    /// Gesture starts while a callback is in flight.
    pub reentry: ReentryPolicy,
}

impl Default for PullToRefreshConfig {
    fn default() -> Self {
        Self::new(80.0)
    }
}

impl PullToRefreshConfig {
    /// Default settle grace delay.
    pub const DEFAULT_SETTLE_GRACE: Duration = Duration::from_millis(200);

    /// Create a configuration with the required pull-down threshold.
    pub fn new(pull_down_threshold: f64) -> Self {
        Self {
            pull_down_threshold,
            pull_up_threshold: None,
            trigger_height: TriggerHeight::Unbounded,
            start_invisible: false,
            settle_grace: Self::DEFAULT_SETTLE_GRACE,
            transition: Transition::default(),
            reentry: ReentryPolicy::Allow,
        }
    }

    /// Set a separate pull-up threshold.
    pub fn with_pull_up_threshold(mut self, threshold: f64) -> Self {
        self.pull_up_threshold = Some(threshold);
        self
    }

    /// Set the engagement zone.
    pub fn with_trigger_height(mut self, trigger_height: TriggerHeight) -> Self {
        self.trigger_height = trigger_height;
        self
    }

    /// Hide indicators at rest.
    pub fn with_start_invisible(mut self, start_invisible: bool) -> Self {
        self.start_invisible = start_invisible;
        self
    }

    /// Set the settle grace delay.
    pub fn with_settle_grace(mut self, grace: Duration) -> Self {
        self.settle_grace = grace;
        self
    }

    /// Set the gesture transition.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Set the reentry policy.
    pub fn with_reentry(mut self, reentry: ReentryPolicy) -> Self {
        self.reentry = reentry;
        self
    }

    /// Pull-up threshold after applying the pull-down fallback.
    pub fn effective_pull_up_threshold(&self) -> f64 {
        self.pull_up_threshold.unwrap_or(self.pull_down_threshold)
    }

    /// Visibility indicators return to when a gesture ends without a callback.
    pub fn rest_visibility(&self) -> Visibility {
        if self.start_invisible {
            Visibility::Hidden
        } else {
            Visibility::Visible
        }
    }

    /// Threshold distances for a session, with no measured travel yet.
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig {
            pull_down_threshold: self.pull_down_threshold,
            pull_up_threshold: self.pull_up_threshold,
            max_pull_down_distance: 0.0,
            max_pull_up_distance: 0.0,
        }
    }

    /// Check distances for sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold(PullDirection::Down, self.pull_down_threshold)?;
        if let Some(up) = self.pull_up_threshold {
            check_threshold(PullDirection::Up, up)?;
        }
        if let TriggerHeight::Fixed(h) = self.trigger_height
            && (h.is_nan() || h < 0.0)
        {
            return Err(ConfigError::InvalidTriggerHeight(h));
        }
        Ok(())
    }
}

fn check_threshold(direction: PullDirection, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { direction, value })
    }
}
