// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shot completion signals for refresh callbacks.
//!
//! A refresh callback returns a [`Completion`] and hands the paired
//! [`Resolver`] to whatever performs the work (a request, a task, a timer).
//! The resolver is consumed when it settles, so a callback can signal
//! completion at most once. The controller only observes completions from
//! [`tick`](crate::controller::PullToRefresh::tick), never synchronously.
//!
//! ```
//! use understory_pull_refresh::completion::{Settlement, completion};
//!
//! let (done, resolver) = completion();
//! assert!(done.settlement().is_none());
//! resolver.reject();
//! assert_eq!(done.settlement(), Some(Settlement::Rejected));
//! ```

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

/// How a callback finished. The controller treats both the same.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Settlement {
    /// The work succeeded.
    Fulfilled,
    /// The work failed.
    Rejected,
}

/// Observer side of a completion signal.
#[derive(Clone)]
pub struct Completion {
    slot: Rc<Cell<Option<Settlement>>>,
}

/// Producer side of a completion signal.
pub struct Resolver {
    slot: Rc<Cell<Option<Settlement>>>,
}

/// Create a pending completion and its resolver.
pub fn completion() -> (Completion, Resolver) {
    let slot = Rc::new(Cell::new(None));
    (
        Completion { slot: slot.clone() },
        Resolver { slot },
    )
}

impl Completion {
    /// A completion that is already fulfilled.
    pub fn ready() -> Self {
        Self {
            slot: Rc::new(Cell::new(Some(Settlement::Fulfilled))),
        }
    }

    /// How the work finished, or `None` while pending.
    pub fn settlement(&self) -> Option<Settlement> {
        self.slot.get()
    }

    /// True once settled either way.
    pub fn is_settled(&self) -> bool {
        self.settlement().is_some()
    }
}

impl Resolver {
    /// Signal success.
    pub fn fulfill(self) {
        self.settle(Settlement::Fulfilled);
    }

    /// Signal failure.
    pub fn reject(self) {
        self.settle(Settlement::Rejected);
    }

    /// Signal with an explicit outcome.
    pub fn settle(self, settlement: Settlement) {
        self.slot.set(Some(settlement));
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("settlement", &self.settlement())
            .finish()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_until_resolved() {
        let (c, r) = completion();
        let observer = c.clone();
        assert!(!c.is_settled());
        r.fulfill();
        assert_eq!(c.settlement(), Some(Settlement::Fulfilled));
        assert!(observer.is_settled());
    }

    #[test]
    fn dropped_resolver_stays_pending() {
        let (c, r) = completion();
        drop(r);
        assert_eq!(c.settlement(), None);
    }

    #[test]
    fn ready_is_fulfilled() {
        assert_eq!(Completion::ready().settlement(), Some(Settlement::Fulfilled));
    }
}
