// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: pull directions, scroll metrics, gesture flags, and visual updates.
//!
//! ## Overview
//!
//! These types describe what flows in and out of the
//! [`PullToRefresh`](crate::controller::PullToRefresh) controller.
//! Hosts feed [`ScrollMetrics`] in and apply [`VisualUpdate`] values to their
//! presentation layer.

use core::fmt;
use core::time::Duration;

use kurbo::CubicBez;

/// Direction of a pull gesture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PullDirection {
    /// Pulling content down from the top edge (refresh).
    Down,
    /// Pulling content up from the bottom edge (load more).
    Up,
}

impl PullDirection {
    /// Both directions, pull-down first.
    pub const ALL: [Self; 2] = [Self::Down, Self::Up];

    /// Sign of the displacement that moves in this direction.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Down => 1.0,
            Self::Up => -1.0,
        }
    }

    /// Direction matching the sign of a displacement, if any.
    ///
    /// Zero and NaN have no direction.
    pub fn of(displacement: f64) -> Option<Self> {
        if displacement > 0.0 {
            Some(Self::Down)
        } else if displacement < 0.0 {
            Some(Self::Up)
        } else {
            None
        }
    }
}

/// Snapshot of a container's own scroll position and extents.
///
/// Mirrors the DOM triple `scrollTop`, `scrollHeight`, `clientHeight`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top of the content.
    pub top: f64,
    /// Total height of the scrollable content.
    pub height: f64,
    /// Height of the visible portion.
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Create a metrics snapshot.
    pub const fn new(top: f64, height: f64, client_height: f64) -> Self {
        Self {
            top,
            height,
            client_height,
        }
    }

    /// True when scrolled to (or past) the top edge.
    #[inline]
    pub fn at_top(&self) -> bool {
        self.top <= 0.0
    }

    /// True when scrolled to (or past) the bottom edge.
    #[inline]
    pub fn at_bottom(&self) -> bool {
        self.top + self.client_height >= self.height
    }

    /// True when the container sits on the boundary a pull in `direction` needs.
    pub fn at_boundary(&self, direction: PullDirection) -> bool {
        match direction {
            PullDirection::Down => self.at_top(),
            PullDirection::Up => self.at_bottom(),
        }
    }
}

bitflags::bitflags! {
    /// Published gesture flags, read by the presentation layer.
    ///
    /// `REFRESHING` and `PULL_UP_REFRESHING` are never both set, and neither
    /// are the two breached flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureState: u8 {
        /// Pull-down displacement reached the pull-down threshold.
        const PULL_DOWN_BREACHED = 0b0000_0001;
        /// Pull-up displacement reached the pull-up threshold.
        const PULL_UP_BREACHED = 0b0000_0010;
        /// The refresh callback is in flight (or settling).
        const REFRESHING = 0b0000_0100;
        /// The load-more callback is in flight (or settling).
        const PULL_UP_REFRESHING = 0b0000_1000;
    }
}

impl GestureState {
    /// Breached flag for `direction`.
    pub const fn breached_flag(direction: PullDirection) -> Self {
        match direction {
            PullDirection::Down => Self::PULL_DOWN_BREACHED,
            PullDirection::Up => Self::PULL_UP_BREACHED,
        }
    }

    /// Refreshing flag for `direction`.
    pub const fn refreshing_flag(direction: PullDirection) -> Self {
        match direction {
            PullDirection::Down => Self::REFRESHING,
            PullDirection::Up => Self::PULL_UP_REFRESHING,
        }
    }

    /// True if either direction has a callback in flight.
    pub fn any_refreshing(self) -> bool {
        self.intersects(Self::REFRESHING | Self::PULL_UP_REFRESHING)
    }

    /// Content an indicator for `direction` should show in this state.
    pub fn indicator_content(self, direction: PullDirection) -> IndicatorContent {
        if self.contains(Self::refreshing_flag(direction)) {
            IndicatorContent::Refreshing
        } else if self.contains(Self::breached_flag(direction)) {
            IndicatorContent::Release
        } else {
            IndicatorContent::Pull
        }
    }
}

/// Which content an indicator region shows.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IndicatorContent {
    /// "Pull to refresh": idle or pulling below the threshold.
    Pull,
    /// "Release to refresh": the threshold is breached.
    Release,
    /// "Refreshing": the callback is in flight.
    Refreshing,
}

/// Overflow mode of the container.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Overflow {
    /// Content may render outside the container (while dragging or refreshing).
    Visible,
    /// Normal scrolling overflow at rest.
    Auto,
}

/// Visibility of an indicator region.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Visibility {
    /// Shown.
    Visible,
    /// Hidden but still laid out.
    Hidden,
}

/// Transform transition armed while a gesture is active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Transition duration.
    pub duration: Duration,
    /// Timing curve from `(0, 0)` to `(1, 1)`; only the inner control points matter.
    pub easing: CubicBez,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(200),
            easing: CubicBez::new((0.0, 0.0), (0.0, 0.0), (0.31, 1.0), (1.0, 1.0)),
        }
    }
}

impl fmt::Display for Transition {
    /// Formats as a CSS `transition` value for the `transform` property.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform {}s cubic-bezier({},{},{},{})",
            self.duration.as_secs_f64(),
            self.easing.p1.x,
            self.easing.p1.y,
            self.easing.p2.x,
            self.easing.p2.y,
        )
    }
}

/// A single change to apply to the presentation layer.
///
/// Produced by the [controller](crate::controller::PullToRefresh); the host's
/// visual adapter applies them in order.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualUpdate {
    /// Arm (`Some`) or clear (`None`) transform transitions on the container
    /// and indicator regions.
    Transition(Option<Transition>),
    /// Translate the container vertically by this many pixels.
    Translate(f64),
    /// Remove any container transform.
    ResetTransform,
    /// Set the container overflow mode.
    Overflow(Overflow),
    /// Show or hide an indicator region.
    IndicatorVisibility {
        /// Indicator region.
        direction: PullDirection,
        /// New visibility.
        visibility: Visibility,
    },
    /// Swap the content shown by an indicator region.
    IndicatorContent {
        /// Indicator region.
        direction: PullDirection,
        /// New content.
        content: IndicatorContent,
    },
}
