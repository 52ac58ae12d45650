// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll probing: should an inner scrollable absorb a gesture?
//!
//! ## Overview
//!
//! In [`TriggerHeight::Auto`](crate::config::TriggerHeight::Auto) mode the
//! controller asks a [`ScrollProbe`] at touch start whether the touched node,
//! or anything above it, can still scroll toward the top. If so, the touch is
//! left to that scrollable instead of starting a pull.
//!
//! [`AncestorProbe`] walks parents through a [`ScrollTree`] in the same way a
//! responder path is reconstructed from a parent lookup.
//!
//! ```
//! use understory_pull_refresh::probe::{AncestorProbe, ScrollDirection, ScrollProbe, ScrollTree};
//! use understory_pull_refresh::types::ScrollMetrics;
//!
//! struct Tree;
//! impl ScrollTree<u32> for Tree {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//!     fn scroll_metrics(&self, node: &u32) -> Option<ScrollMetrics> {
//!         // Node 2 is a list scrolled 40px down.
//!         (*node == 2).then(|| ScrollMetrics::new(40.0, 900.0, 300.0))
//!     }
//! }
//!
//! let probe = AncestorProbe::new(Tree);
//! assert!(probe.can_scroll(&3, ScrollDirection::Up));
//! assert!(!probe.can_scroll(&1, ScrollDirection::Up));
//! ```

use crate::types::ScrollMetrics;

/// Direction a scrollable's content can still move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScrollDirection {
    /// Toward the start of the content (`scrollTop` can decrease).
    Up,
    /// Toward the end of the content (`scrollTop` can increase).
    Down,
}

impl ScrollMetrics {
    /// True if these metrics leave room to scroll in `direction`.
    pub fn can_scroll(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Up => self.top > 0.0,
            ScrollDirection::Down => self.top + self.client_height < self.height,
        }
    }
}

/// Reports whether a node's scroll context can still consume movement.
pub trait ScrollProbe<K> {
    /// Returns true if some scrollable around `node` can scroll in `direction`.
    fn can_scroll(&self, node: &K, direction: ScrollDirection) -> bool;
}

/// A probe that never absorbs gestures.
///
/// Used by [`PullToRefresh::new`](crate::controller::PullToRefresh::new).
#[derive(Copy, Clone, Debug, Default)]
pub struct NoProbe;

impl<K> ScrollProbe<K> for NoProbe {
    #[inline]
    fn can_scroll(&self, _node: &K, _direction: ScrollDirection) -> bool {
        false
    }
}

impl<K, F: Fn(&K, ScrollDirection) -> bool> ScrollProbe<K> for F {
    fn can_scroll(&self, node: &K, direction: ScrollDirection) -> bool {
        self(node, direction)
    }
}

/// Parent and scroll lookups over a host node hierarchy.
pub trait ScrollTree<K> {
    /// Returns the parent of `node`, or `None` at the root.
    fn parent_of(&self, node: &K) -> Option<K>;
    /// Returns scroll metrics when `node` is a scroll container, `None` otherwise.
    fn scroll_metrics(&self, node: &K) -> Option<ScrollMetrics>;
}

/// Probe that checks `node` and each of its ancestors.
#[derive(Clone, Debug)]
pub struct AncestorProbe<T> {
    tree: T,
    /// Safety bound on the walk for hosts whose ancestry may contain cycles.
    max_depth: usize,
}

impl<T> AncestorProbe<T> {
    /// Default limit on visited nodes.
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Wrap a scroll tree.
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how many nodes a single query may visit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Access the wrapped tree.
    pub fn tree(&self) -> &T {
        &self.tree
    }
}

impl<K, T: ScrollTree<K>> ScrollProbe<K> for AncestorProbe<T> {
    fn can_scroll(&self, node: &K, direction: ScrollDirection) -> bool {
        if self
            .tree
            .scroll_metrics(node)
            .is_some_and(|m| m.can_scroll(direction))
        {
            return true;
        }
        let mut cur = self.tree.parent_of(node);
        let mut visited = 1;
        while let Some(n) = cur {
            if visited >= self.max_depth {
                log::debug!("scroll probe stopped after {visited} nodes");
                return false;
            }
            if self
                .tree
                .scroll_metrics(&n)
                .is_some_and(|m| m.can_scroll(direction))
            {
                return true;
            }
            cur = self.tree.parent_of(&n);
            visited += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 4 → 3 → 2 → 1 (root). Node 3 is a nested list, node 1 the page.
    struct Nested {
        list: ScrollMetrics,
        page: ScrollMetrics,
    }

    impl ScrollTree<u32> for Nested {
        fn parent_of(&self, node: &u32) -> Option<u32> {
            (*node > 1).then(|| node - 1)
        }

        fn scroll_metrics(&self, node: &u32) -> Option<ScrollMetrics> {
            match node {
                3 => Some(self.list),
                1 => Some(self.page),
                _ => None,
            }
        }
    }

    #[test]
    fn metrics_can_scroll() {
        let m = ScrollMetrics::new(0.0, 1000.0, 400.0);
        assert!(!m.can_scroll(ScrollDirection::Up));
        assert!(m.can_scroll(ScrollDirection::Down));
        let end = ScrollMetrics::new(600.0, 1000.0, 400.0);
        assert!(end.can_scroll(ScrollDirection::Up));
        assert!(!end.can_scroll(ScrollDirection::Down));
    }

    #[test]
    fn nested_scrolled_list_absorbs() {
        let probe = AncestorProbe::new(Nested {
            list: ScrollMetrics::new(25.0, 800.0, 200.0),
            page: ScrollMetrics::new(0.0, 2000.0, 800.0),
        });
        assert!(probe.can_scroll(&4, ScrollDirection::Up));
        // Above the list only the page remains, which is at its top.
        assert!(!probe.can_scroll(&2, ScrollDirection::Up));
        assert!(probe.can_scroll(&2, ScrollDirection::Down));
    }

    #[test]
    fn nothing_scrollable_at_top() {
        let probe = AncestorProbe::new(Nested {
            list: ScrollMetrics::new(0.0, 800.0, 200.0),
            page: ScrollMetrics::new(0.0, 2000.0, 800.0),
        });
        assert!(!probe.can_scroll(&4, ScrollDirection::Up));
    }

    #[test]
    fn depth_limit_stops_cycles() {
        struct Cycle;
        impl ScrollTree<u32> for Cycle {
            fn parent_of(&self, node: &u32) -> Option<u32> {
                Some(if *node == 1 { 2 } else { 1 })
            }
            fn scroll_metrics(&self, _node: &u32) -> Option<ScrollMetrics> {
                None
            }
        }
        let probe = AncestorProbe::new(Cycle).with_max_depth(8);
        assert!(!probe.can_scroll(&1, ScrollDirection::Up));
    }

    #[test]
    fn closures_are_probes() {
        let probe = |n: &u32, d: ScrollDirection| *n == 7 && d == ScrollDirection::Up;
        assert!(ScrollProbe::<u32>::can_scroll(
            &probe,
            &7,
            ScrollDirection::Up
        ));
        assert!(!ScrollProbe::<u32>::can_scroll(&NoProbe, &7, ScrollDirection::Up));
    }
}
