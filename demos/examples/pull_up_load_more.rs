// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pull-up to load more.
//!
//! This example scrolls a feed to its bottom and drags upward to load another
//! page. The load callback fails once, which settles the gesture the same way
//! a success does, and a drag started mid-load only moves the container.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_pull_refresh_demos --example pull_up_load_more`

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect};
use understory_pull_refresh::completion::{Completion, Resolver, completion};
use understory_pull_refresh::config::PullToRefreshConfig;
use understory_pull_refresh::controller::PullToRefresh;
use understory_pull_refresh::pointer::{PointerEvent, PointerPhase};
use understory_pull_refresh::tracker::ContainerContext;
use understory_pull_refresh::types::{PullDirection, ScrollMetrics, VisualUpdate};

struct Feed {
    pages: Cell<u32>,
    loading: RefCell<Option<Resolver>>,
}

fn print_updates(label: &str, updates: &[VisualUpdate]) {
    for u in updates {
        println!("  {label}: {u:?}");
    }
}

fn drag(ptr: &mut PullToRefresh<()>, ctx: &ContainerContext<()>, ys: &[f64]) {
    for (i, &y) in ys.iter().enumerate() {
        let phase = if i == 0 {
            PointerPhase::Down
        } else {
            PointerPhase::Move
        };
        let out = ptr.handle_pointer(&PointerEvent::mouse(phase, Point::new(100.0, y)), ctx);
        print_updates("drag", &out);
    }
    let out = ptr.handle_pointer(
        &PointerEvent::mouse(PointerPhase::Up, Point::new(100.0, ys[ys.len() - 1])),
        ctx,
    );
    print_updates("release", &out);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let feed = Rc::new(Feed {
        pages: Cell::new(1),
        loading: RefCell::new(None),
    });
    let loader = feed.clone();
    let config = PullToRefreshConfig::new(80.0).with_pull_up_threshold(50.0);
    let mut ptr: PullToRefresh<()> = PullToRefresh::new(config, Completion::ready)
        .expect("valid config")
        .with_pull_up(move || {
            log::info!("loading page {}", loader.pages.get() + 1);
            let (done, resolver) = completion();
            *loader.loading.borrow_mut() = Some(resolver);
            done
        });
    ptr.set_indicator_extent(PullDirection::Up, 90.0);

    let bottom = ContainerContext::new(
        ScrollMetrics::new(2300.0, 3000.0, 700.0),
        Rect::new(0.0, 100.0, 420.0, 800.0),
        900.0,
    );

    println!("== First load fails ==");
    drag(&mut ptr, &bottom, &[600.0, 580.0, 540.0]);
    if let Some(r) = feed.loading.borrow_mut().take() {
        log::warn!("page request failed");
        r.reject();
    }
    print_updates("tick", &ptr.tick(Duration::from_millis(100)));
    print_updates("frame", &ptr.on_frame());
    print_updates("tick", &ptr.tick(Duration::from_millis(300)));
    println!("  pages = {}, state = {:?}", feed.pages.get(), ptr.state());

    println!("== Retry, with an extra drag while loading ==");
    drag(&mut ptr, &bottom, &[600.0, 530.0]);
    drag(&mut ptr, &bottom, &[600.0, 500.0]);
    if let Some(r) = feed.loading.borrow_mut().take() {
        feed.pages.set(feed.pages.get() + 1);
        r.fulfill();
    }
    print_updates("tick", &ptr.tick(Duration::from_millis(1000)));
    print_updates("frame", &ptr.on_frame());
    print_updates("tick", &ptr.tick(Duration::from_millis(1200)));
    println!("  pages = {}, state = {:?}", feed.pages.get(), ptr.state());
}
