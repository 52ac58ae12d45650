// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pull-to-refresh basics.
//!
//! This example drags a list down from its top past the threshold, releases,
//! finishes the refresh from a simulated task, and prints every update the
//! presentation layer would apply along the way. A second, shorter drag shows
//! the snap back without a refresh.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_pull_refresh_demos --example pull_refresh_basics`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect};
use understory_pull_refresh::completion::{Resolver, completion};
use understory_pull_refresh::config::PullToRefreshConfig;
use understory_pull_refresh::controller::PullToRefresh;
use understory_pull_refresh::pointer::{PointerEvent, PointerPhase};
use understory_pull_refresh::tracker::ContainerContext;
use understory_pull_refresh::types::{PullDirection, ScrollMetrics, VisualUpdate};

fn apply(label: &str, updates: Vec<VisualUpdate>) {
    for u in updates {
        match u {
            VisualUpdate::Transition(Some(t)) => println!("  {label}: transition = {t}"),
            other => println!("  {label}: {other:?}"),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The "network task": the callback hands its resolver here.
    let pending: Rc<RefCell<Option<Resolver>>> = Rc::new(RefCell::new(None));
    let task = pending.clone();
    let mut ptr: PullToRefresh<()> = PullToRefresh::new(PullToRefreshConfig::new(80.0), move || {
        log::info!("refreshing list");
        let (done, resolver) = completion();
        *task.borrow_mut() = Some(resolver);
        done
    })
    .expect("valid config");
    // Measured height of the indicator above the list.
    ptr.set_indicator_extent(PullDirection::Down, 120.0);

    let ctx = ContainerContext::new(
        ScrollMetrics::new(0.0, 3000.0, 700.0),
        Rect::new(0.0, 0.0, 420.0, 700.0),
        900.0,
    );
    let touch = |phase, y| PointerEvent::touch(phase, &[Point::new(200.0, y)]);

    println!("== Pull past the threshold ==");
    apply("down", ptr.handle_pointer(&touch(PointerPhase::Down, 40.0), &ctx));
    for y in [70.0, 100.0, 130.0, 150.0] {
        apply("move", ptr.handle_pointer(&touch(PointerPhase::Move, y), &ctx));
    }
    apply("up", ptr.handle_pointer(&PointerEvent::touch(PointerPhase::Up, &[]), &ctx));
    println!("  state = {:?}", ptr.state());

    // Drive a tiny event loop at 16ms per frame.
    let mut now = Duration::ZERO;
    for frame in 0..30 {
        now += Duration::from_millis(16);
        if frame == 5
            && let Some(r) = pending.borrow_mut().take()
        {
            log::info!("list loaded");
            r.fulfill();
        }
        apply("tick", ptr.tick(now));
        if ptr.needs_frame() {
            apply("frame", ptr.on_frame());
        }
        if ptr.state().is_empty() && ptr.next_deadline().is_none() && frame > 5 {
            println!("  settled after {} ms", now.as_millis());
            break;
        }
    }

    println!("== Short pull ==");
    apply("down", ptr.handle_pointer(&touch(PointerPhase::Down, 40.0), &ctx));
    apply("move", ptr.handle_pointer(&touch(PointerPhase::Move, 90.0), &ctx));
    apply("up", ptr.handle_pointer(&PointerEvent::touch(PointerPhase::Up, &[]), &ctx));
    apply("frame", ptr.on_frame());
    println!("  state = {:?}", ptr.state());
}
