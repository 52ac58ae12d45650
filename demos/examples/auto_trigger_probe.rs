// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto trigger mode with a nested scroller.
//!
//! A page hosts a horizontal card strip and a comments panel that scrolls on
//! its own. Touches inside the comments panel while it is scrolled down are
//! left to the panel; once it is back at its top, the same touch pulls the
//! page. Mouse drags skip the probe.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_pull_refresh_demos --example auto_trigger_probe`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_pull_refresh::completion::Completion;
use understory_pull_refresh::config::{PullToRefreshConfig, TriggerHeight};
use understory_pull_refresh::controller::PullToRefresh;
use understory_pull_refresh::pointer::PointerKind;
use understory_pull_refresh::probe::{AncestorProbe, ScrollTree};
use understory_pull_refresh::tracker::ContainerContext;
use understory_pull_refresh::types::ScrollMetrics;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum Node {
    Page,
    Cards,
    Comments,
    Comment(u32),
}

/// Host tree: `Comment(n)` → `Comments` → `Page`, `Cards` → `Page`.
struct Layout {
    comments_top: Rc<Cell<f64>>,
}

impl ScrollTree<Node> for Layout {
    fn parent_of(&self, node: &Node) -> Option<Node> {
        match node {
            Node::Page => None,
            Node::Cards | Node::Comments => Some(Node::Page),
            Node::Comment(_) => Some(Node::Comments),
        }
    }

    fn scroll_metrics(&self, node: &Node) -> Option<ScrollMetrics> {
        match node {
            Node::Comments => Some(ScrollMetrics::new(self.comments_top.get(), 2400.0, 300.0)),
            // Horizontal only: never scrolls vertically.
            Node::Cards => Some(ScrollMetrics::new(0.0, 180.0, 180.0)),
            _ => None,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let comments_top = Rc::new(Cell::new(350.0));
    let probe = AncestorProbe::new(Layout {
        comments_top: comments_top.clone(),
    });
    let config = PullToRefreshConfig::new(70.0).with_trigger_height(TriggerHeight::Auto);
    let mut ptr: PullToRefresh<Node, _> = PullToRefresh::new(config, Completion::ready)
        .expect("valid config")
        .with_probe(probe);

    let page = ScrollMetrics::new(0.0, 1600.0, 800.0);
    let bounds = Rect::new(0.0, 0.0, 420.0, 800.0);
    let at = |target| ContainerContext::new(page, bounds, 900.0).with_target(target);
    let start = Point::new(120.0, 500.0);

    for (label, kind, target) in [
        ("touch on card", PointerKind::Touch, Node::Cards),
        ("touch on comment", PointerKind::Touch, Node::Comment(4)),
        ("mouse on comment", PointerKind::Mouse, Node::Comment(4)),
    ] {
        match ptr.pointer_down(kind, start, &at(target)) {
            Ok(_) => println!("{label}: armed"),
            Err(r) => println!("{label}: left alone ({r:?})"),
        }
        ptr.pointer_cancel();
    }

    comments_top.set(0.0);
    match ptr.pointer_down(PointerKind::Touch, start, &at(Node::Comment(4))) {
        Ok(_) => println!("touch on comment at its top: armed"),
        Err(r) => println!("touch on comment at its top: left alone ({r:?})"),
    }
    ptr.pointer_cancel();

    // A page taller than the viewport in both directions yields to page scroll.
    let tall = ContainerContext::new(page, Rect::new(0.0, -300.0, 420.0, 1300.0), 900.0)
        .with_target(Node::Page);
    if let Err(r) = ptr.pointer_down(PointerKind::Mouse, start, &tall) {
        println!("oversized page: left alone ({r:?})");
    }
}
