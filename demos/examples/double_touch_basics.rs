// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double touch basics.
//!
//! Feeds a scripted sequence of confirmed hits into a detector and prints which
//! touches pair, which are blocked by an interleaved touch, and what the sweep removes.
//!
//! Run:
//! - `cargo run -p understory_demos --example double_touch_basics`

use understory_double_touch::clock::ManualClock;
use understory_double_touch::detector::GestureDetector;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Node {
    Play,
    Stop,
}

fn main() {
    let clock = ManualClock::new(0);
    let mut detector = GestureDetector::new(&clock);
    let mut sink = |target: Node, kind: &str, at: &u64| {
        println!("  -> {kind} on {target:?} at {at}ms");
    };

    let script = [
        (0, Node::Play),
        (100, Node::Play), // pairs with the touch at 0
        (500, Node::Play), // 400ms after the survivor: too late
        (600, Node::Stop),
        (650, Node::Play), // Stop in between: not adjacent to Play@500
        (700, Node::Play), // pairs with Play@650
    ];

    println!("== Hits ==");
    for (at, node) in script {
        clock.set(at);
        println!("touch {node:?} at {at}ms");
        detector.notify_hit(node, &at, &mut sink);
    }

    println!("== Pool ==");
    for r in detector.pool().iter() {
        println!("  id={} target={:?} t={}ms", r.id().get(), r.target(), r.timestamp());
    }

    // Two seconds of 60 Hz frames later, everything unpaired has expired.
    clock.set(3_000);
    let mut removed = 0;
    for _ in 0..120 {
        removed += detector.tick(1.0);
    }
    println!("== Sweep ==");
    println!("  removed={removed} live={}", detector.pool().len());
}
