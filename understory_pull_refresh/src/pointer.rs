// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One pointer abstraction for touch and mouse input.
//!
//! Toolkits deliver touches and mouse events with different shapes. Both are
//! collapsed into [`PointerEvent`], and [`PointerEvent::page_y`] is the only
//! place a coordinate is read. Events without a usable coordinate are treated
//! as "no gesture".
//!
//! ```
//! use kurbo::Point;
//! use understory_pull_refresh::pointer::{PointerEvent, PointerPhase};
//!
//! let touch = PointerEvent::touch(PointerPhase::Move, &[Point::new(4.0, 90.0), Point::new(0.0, 0.0)]);
//! assert_eq!(touch.page_y(), Some(90.0));
//!
//! let lifted = PointerEvent::touch(PointerPhase::Move, &[]);
//! assert_eq!(lifted.page_y(), None);
//! ```

use kurbo::Point;

/// Input device that produced a pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// Touch screen contact.
    Touch,
    /// Mouse (or pen reported as mouse).
    Mouse,
}

/// Stage of a pointer interaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerPhase {
    /// Contact starts (`touchstart`, `mousedown`).
    Down,
    /// Contact moves.
    Move,
    /// Contact ends normally.
    Up,
    /// The platform aborted the interaction.
    Cancel,
}

/// A pointer event in page coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Device kind.
    pub kind: PointerKind,
    /// Interaction stage.
    pub phase: PointerPhase,
    /// Page-space position, if the platform reported one.
    pub page: Option<Point>,
}

impl PointerEvent {
    /// A mouse event at `page`.
    pub fn mouse(phase: PointerPhase, page: Point) -> Self {
        Self {
            kind: PointerKind::Mouse,
            phase,
            page: Some(page),
        }
    }

    /// A touch event; only the first touch point is read.
    pub fn touch(phase: PointerPhase, touches: &[Point]) -> Self {
        Self {
            kind: PointerKind::Touch,
            phase,
            page: touches.first().copied(),
        }
    }

    /// Vertical page coordinate, or `None` when missing or not finite.
    pub fn page_y(&self) -> Option<f64> {
        self.page.map(|p| p.y).filter(|y| y.is_finite())
    }
}
