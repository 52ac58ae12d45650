// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refresh sequencing: from release to callback to settled rest state.
//!
//! ## Phases
//!
//! Each direction moves through
//! `Idle → Pulling → Breached → Refreshing → Settling → Idle`.
//!
//! - Release with a latched breach pins the translation at exactly the
//!   threshold distance and invokes the callback once.
//! - [`RefreshOrchestrator::tick`] observes the callback's [`Completion`].
//!   Fulfilment and rejection both start settling: a container reset is
//!   queued for the next frame and the flags clear after the grace delay.
//! - Release without a breach returns indicators to their rest visibility
//!   and queues the same container reset. No callback runs.
//!
//! The container reset waits for the host's next paint boundary
//! ([`RefreshOrchestrator::on_frame`]); only the grace delay is time based.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::completion::{Completion, Settlement};
use crate::threshold::{Classification, ThresholdEngine};
use crate::types::{GestureState, Overflow, PullDirection, Visibility, VisualUpdate};

/// A user refresh or load-more callback.
pub type RefreshCallback = Box<dyn FnMut() -> Completion>;

/// Per-direction refresh phase.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RefreshPhase {
    /// Nothing happening in this direction.
    #[default]
    Idle,
    /// An eligible pull below the threshold.
    Pulling,
    /// The threshold is latched for the active session.
    Breached,
    /// The callback is in flight.
    Refreshing,
    /// The callback completed; waiting out the grace delay.
    Settling,
}

struct InFlight {
    direction: PullDirection,
    pinned: f64,
    completion: Completion,
    settle_at: Option<Duration>,
}

/// Sequences callbacks and the return to rest for one widget.
pub struct RefreshOrchestrator {
    on_refresh: RefreshCallback,
    on_pull_up: Option<RefreshCallback>,
    state: GestureState,
    phases: [RefreshPhase; 2],
    in_flight: Option<InFlight>,
    frame_reset: bool,
    settle_grace: Duration,
}

impl fmt::Debug for RefreshOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshOrchestrator")
            .field("state", &self.state)
            .field("phases", &self.phases)
            .field("in_flight", &self.in_flight.as_ref().map(|i| i.direction))
            .field("frame_reset", &self.frame_reset)
            .finish_non_exhaustive()
    }
}

const fn slot(direction: PullDirection) -> usize {
    match direction {
        PullDirection::Down => 0,
        PullDirection::Up => 1,
    }
}

impl RefreshOrchestrator {
    /// Create an orchestrator around the refresh callback.
    pub fn new(on_refresh: RefreshCallback, settle_grace: Duration) -> Self {
        Self {
            on_refresh,
            on_pull_up: None,
            state: GestureState::empty(),
            phases: [RefreshPhase::Idle; 2],
            in_flight: None,
            frame_reset: false,
            settle_grace,
        }
    }

    /// Install or remove the load-more callback.
    pub fn set_pull_up(&mut self, on_pull_up: Option<RefreshCallback>) {
        self.on_pull_up = on_pull_up;
    }

    /// True when a load-more callback is installed.
    pub fn has_pull_up(&self) -> bool {
        self.on_pull_up.is_some()
    }

    /// Change the grace delay for future settles.
    pub fn set_settle_grace(&mut self, grace: Duration) {
        self.settle_grace = grace;
    }

    /// Published flags.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Phase for `direction`.
    pub fn phase(&self, direction: PullDirection) -> RefreshPhase {
        self.phases[slot(direction)]
    }

    /// Direction with a callback in flight or settling.
    pub fn in_flight(&self) -> Option<PullDirection> {
        self.in_flight.as_ref().map(|i| i.direction)
    }

    /// Reflect the active session's classification and latch.
    ///
    /// Ignored while a callback is in flight: reentrant sessions are visual only.
    pub fn track(&mut self, classification: Classification, latched: Option<PullDirection>) {
        if self.in_flight.is_some() {
            return;
        }
        for direction in PullDirection::ALL {
            let breached = latched == Some(direction);
            self.state
                .set(GestureState::breached_flag(direction), breached);
            self.phases[slot(direction)] = if breached {
                RefreshPhase::Breached
            } else if classification.direction() == Some(direction) {
                RefreshPhase::Pulling
            } else {
                RefreshPhase::Idle
            };
        }
    }

    /// Resolve a released gesture.
    ///
    /// While a callback is refreshing, the release keeps its pinned translation;
    /// once it is settling, the release returns to rest like an untriggered one.
    ///
    /// `latched` is the session's breach latch; it only triggers when the final
    /// displacement still points the same way. `rest` is the indicator
    /// visibility used when nothing triggers.
    pub fn release(
        &mut self,
        displacement: f64,
        latched: Option<PullDirection>,
        engine: &ThresholdEngine,
        rest: Visibility,
    ) -> Vec<VisualUpdate> {
        if let Some(i) = &self.in_flight
            && i.settle_at.is_none()
        {
            log::debug!(
                "release during {:?} refresh; keeping it pinned",
                i.direction
            );
            return alloc::vec![
                VisualUpdate::Overflow(Overflow::Visible),
                VisualUpdate::Translate(i.pinned),
            ];
        }

        // Once settling, the pinned refresh is over: return to rest instead.
        let trigger = latched.filter(|d| {
            self.in_flight.is_none()
                && PullDirection::of(displacement) == Some(*d)
                && self.can_invoke(*d)
        });
        let Some(direction) = trigger else {
            self.track(Classification::Idle, None);
            self.frame_reset = true;
            let mut out = alloc::vec![VisualUpdate::IndicatorVisibility {
                direction: PullDirection::Down,
                visibility: rest,
            }];
            if self.has_pull_up() {
                out.push(VisualUpdate::IndicatorVisibility {
                    direction: PullDirection::Up,
                    visibility: rest,
                });
            }
            return out;
        };

        let pinned = engine.pinned_offset(direction);
        self.state.insert(GestureState::refreshing_flag(direction));
        self.phases[slot(direction)] = RefreshPhase::Refreshing;
        log::debug!("{direction:?} released past threshold; invoking callback");
        let completion = match direction {
            PullDirection::Down => (self.on_refresh)(),
            PullDirection::Up => match self.on_pull_up.as_mut() {
                Some(f) => f(),
                None => Completion::ready(),
            },
        };
        self.in_flight = Some(InFlight {
            direction,
            pinned,
            completion,
            settle_at: None,
        });
        alloc::vec![
            VisualUpdate::Overflow(Overflow::Visible),
            VisualUpdate::Translate(pinned),
        ]
    }

    /// Observe completions and grace deadlines at time `now`.
    ///
    /// Returns true if the published state changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(i) = self.in_flight.as_mut() else {
            return false;
        };
        let mut changed = false;
        if i.settle_at.is_none()
            && let Some(s) = i.completion.settlement()
        {
            match s {
                Settlement::Fulfilled => log::debug!("{:?} callback completed", i.direction),
                Settlement::Rejected => log::warn!("{:?} callback rejected", i.direction),
            }
            i.settle_at = Some(now.saturating_add(self.settle_grace));
            self.phases[slot(i.direction)] = RefreshPhase::Settling;
            self.frame_reset = true;
            changed = true;
        }
        if i.settle_at.is_some_and(|at| now >= at) {
            let direction = i.direction;
            self.state.remove(
                GestureState::refreshing_flag(direction) | GestureState::breached_flag(direction),
            );
            self.phases[slot(direction)] = RefreshPhase::Idle;
            self.in_flight = None;
            self.frame_reset = true;
            log::debug!("{direction:?} refresh settled");
            changed = true;
        }
        changed
    }

    /// When the next grace deadline falls, if one is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.in_flight.as_ref().and_then(|i| i.settle_at)
    }

    /// True when a container reset waits for the next frame.
    pub fn needs_frame(&self) -> bool {
        self.frame_reset
    }

    /// Apply the deferred container reset at a paint boundary.
    pub fn on_frame(&mut self) -> Vec<VisualUpdate> {
        if !core::mem::take(&mut self.frame_reset) {
            return Vec::new();
        }
        alloc::vec![
            VisualUpdate::Overflow(Overflow::Auto),
            VisualUpdate::ResetTransform,
        ]
    }

    /// Drop all state, abandoning any callback in flight.
    pub fn reset(&mut self) {
        if let Some(i) = self.in_flight.take() {
            log::debug!("abandoning {:?} refresh", i.direction);
        }
        self.state = GestureState::empty();
        self.phases = [RefreshPhase::Idle; 2];
        self.frame_reset = false;
    }

    fn can_invoke(&self, direction: PullDirection) -> bool {
        direction == PullDirection::Down || self.has_pull_up()
    }
}
