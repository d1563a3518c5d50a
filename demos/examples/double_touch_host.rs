// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double touch wired into a host.
//!
//! A toy host owns a ticker, a touch surface, and a scene of rectangles. It activates
//! the interaction, delivers multi-touch touch-starts, drives frames, and tears down.
//!
//! Run:
//! - `cargo run -p understory_demos --example double_touch_host`

use kurbo::{Point, Rect};
use understory_double_touch::clock::ManualClock;
use understory_double_touch::interaction::{
    DoubleTouchInteraction, HitTest, InteractionEvent, TickSource, TouchPoint, TouchStart,
    TouchStartSource,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Node(u32);

/// Scene: later entries are drawn on top.
struct Scene(Vec<(Node, Rect)>);

impl HitTest<Node> for Scene {
    fn hit_test(&self, position: Point) -> Option<Node> {
        self.0
            .iter()
            .rev()
            .find(|(_, r)| r.contains(position))
            .map(|(n, _)| *n)
    }
}

#[derive(Default)]
struct Ticker {
    next: u32,
    live: Vec<u32>,
}

impl TickSource for Ticker {
    type Subscription = u32;
    fn subscribe(&mut self) -> u32 {
        self.next += 1;
        self.live.push(self.next);
        println!("ticker: +subscription {}", self.next);
        self.next
    }
    fn unsubscribe(&mut self, subscription: u32) {
        self.live.retain(|s| *s != subscription);
        println!("ticker: -subscription {subscription}");
    }
}

struct Surface {
    touch: bool,
}

impl TouchStartSource for Surface {
    fn supports_touch_events(&self) -> bool {
        self.touch
    }
    fn listen_touch_start(&mut self) {
        println!("surface: touchstart listener added");
    }
    fn unlisten_touch_start(&mut self) {
        println!("surface: touchstart listener removed");
    }
}

#[derive(Debug)]
struct RawTouchStart {
    frame: u32,
}

fn main() {
    let scene = Scene(vec![
        (Node(1), Rect::new(0.0, 0.0, 400.0, 400.0)),
        (Node(2), Rect::new(20.0, 20.0, 120.0, 120.0)),
        (Node(3), Rect::new(200.0, 20.0, 300.0, 120.0)),
    ]);
    let clock = ManualClock::new(0);
    let mut ticker = Ticker::default();
    let mut surface = Surface { touch: true };
    let mut touch: DoubleTouchInteraction<Node, _, u32> = DoubleTouchInteraction::new(&clock);
    let mut sink = |target: Node, kind: &str, e: &InteractionEvent<'_, RawTouchStart>| {
        println!(
            "  -> {kind} on {target:?} (pointer {} in frame {})",
            e.point.pointer_id, e.original.frame
        );
    };

    touch.activate(&mut ticker, &mut surface);

    // (frame, touch points)
    let frames: [(u32, Vec<TouchPoint>); 4] = [
        (0, vec![TouchPoint::new(1, Point::new(50.0, 50.0))]),
        (6, vec![TouchPoint::new(2, Point::new(60.0, 60.0))]),
        // Two fingers at once on different buttons.
        (
            30,
            vec![
                TouchPoint::new(3, Point::new(250.0, 50.0)),
                TouchPoint::new(4, Point::new(50.0, 50.0)),
            ],
        ),
        (34, vec![TouchPoint::new(5, Point::new(50.0, 50.0))]),
    ];

    let mut frame = 0;
    for (at, points) in &frames {
        while frame < *at {
            clock.advance(16);
            touch.tick(1.0);
            frame += 1;
        }
        let raw = RawTouchStart { frame };
        let out = touch.handle_touch_start(&TouchStart::new(&raw, points), &scene, &mut sink);
        println!(
            "frame {frame}: hits={} fired={} prevent_default={}",
            out.hits, out.fired, out.prevent_default
        );
    }

    for _ in 0..120 {
        clock.advance(16);
        touch.tick(1.0);
    }
    println!("live after idle: {}", touch.detector().pool().len());

    touch.deactivate(&mut ticker, &mut surface);
    assert!(ticker.live.is_empty());
}
