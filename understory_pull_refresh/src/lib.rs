// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pull_refresh --heading-base-level=0

//! Understory Pull Refresh: a headless, `no_std` pull-to-refresh gesture controller.
//!
//! ## Overview
//!
//! This crate interprets vertical drags on a scroll container. Pulling down while the container
//! is scrolled to its top asks for a refresh; pulling up while it is scrolled to its bottom asks
//! for more content. It does no rendering and owns no widgets.
//! Instead, feed it pointer events and it returns [`VisualUpdate`](crate::types::VisualUpdate)
//! items (translations, overflow, indicator visibility and content) for your toolkit to apply.
//!
//! ## Gestures
//!
//! A gesture arms on pointer down, subject to the configured
//! [`TriggerHeight`](crate::config::TriggerHeight). The container's scroll metrics are
//! snapshotted at that moment and every later decision uses the snapshot.
//! Each move classifies the signed displacement against the per-direction threshold.
//! Crossing a threshold latches a breach for the rest of the session, so overshooting and
//! then retracting partway still refreshes. Reversing past the start point releases it.
//!
//! ## Refreshing
//!
//! Releasing with a latched breach pins the container at exactly the threshold distance and
//! invokes the matching callback once. Callbacks return a
//! [`Completion`](crate::completion::Completion); the controller observes it from
//! [`tick`](crate::controller::PullToRefresh::tick). Once it settles (fulfilled or rejected),
//! the container transform is reset at the next frame and the flags clear after a short grace
//! delay. A gesture that starts while a callback is in flight moves the container but cannot
//! trigger a second callback.
//!
//! ## Nested scrolling
//!
//! In [`TriggerHeight::Auto`](crate::config::TriggerHeight::Auto) mode a touch that lands inside
//! a scrollable region that can still scroll up is left to that region. Implement
//! [`ScrollTree`](crate::probe::ScrollTree) for your node tree and wrap it in
//! [`AncestorProbe`](crate::probe::AncestorProbe), or pass any closure as a
//! [`ScrollProbe`](crate::probe::ScrollProbe).
//!
//! ## Workflow
//!
//! 1) Build a [`PullToRefreshConfig`](crate::config::PullToRefreshConfig) and a
//!    [`PullToRefresh`](crate::controller::PullToRefresh) with your refresh callback.
//! 2) Measure the indicator regions and report them with
//!    [`set_indicator_extent`](crate::controller::PullToRefresh::set_indicator_extent).
//! 3) Route pointer events through
//!    [`handle_pointer`](crate::controller::PullToRefresh::handle_pointer) together with a
//!    [`ContainerContext`](crate::tracker::ContainerContext), and apply the updates.
//! 4) From your event loop, call [`tick`](crate::controller::PullToRefresh::tick) and, when
//!    [`needs_frame`](crate::controller::PullToRefresh::needs_frame) is set,
//!    [`on_frame`](crate::controller::PullToRefresh::on_frame) at the next paint.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_pull_refresh::completion::Completion;
//! use understory_pull_refresh::config::PullToRefreshConfig;
//! use understory_pull_refresh::controller::PullToRefresh;
//! use understory_pull_refresh::pointer::{PointerEvent, PointerPhase};
//! use understory_pull_refresh::tracker::ContainerContext;
//! use understory_pull_refresh::types::{GestureState, PullDirection, ScrollMetrics};
//!
//! let mut ptr: PullToRefresh<()> =
//!     PullToRefresh::new(PullToRefreshConfig::new(60.0), Completion::ready).unwrap();
//! ptr.set_indicator_extent(PullDirection::Down, 80.0);
//!
//! let ctx = ContainerContext::new(
//!     ScrollMetrics::new(0.0, 1200.0, 500.0),
//!     Rect::new(0.0, 0.0, 320.0, 500.0),
//!     640.0,
//! );
//! let touch = |phase, y| PointerEvent::touch(phase, &[Point::new(20.0, y)]);
//! ptr.handle_pointer(&touch(PointerPhase::Down, 0.0), &ctx);
//! ptr.handle_pointer(&touch(PointerPhase::Move, 70.0), &ctx);
//! assert!(ptr.state().contains(GestureState::PULL_DOWN_BREACHED));
//! ptr.handle_pointer(&touch(PointerPhase::Up, 70.0), &ctx);
//! assert!(ptr.state().contains(GestureState::REFRESHING));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod completion;
pub mod config;
pub mod controller;
pub mod orchestrator;
pub mod pointer;
pub mod probe;
pub mod threshold;
pub mod tracker;
pub mod types;
