//! Broadcasts to a three-inbox node and drains each inbox from its own
//! thread.
//!
//! Run: cargo run --example broadcast_node

use std::sync::Arc;
use std::thread;

use ringmesh::{Inbox, Node};

fn main() {
    let a = Inbox::<u64>::new(8, "a").expect("valid inbox");
    let b = Inbox::<u64>::new(8, "b").expect("valid inbox");
    let c = Inbox::<u64>::new(8, "c").expect("valid inbox");

    let node = Node::new("telemetry", vec![Arc::clone(&a), Arc::clone(&b), Arc::clone(&c)])
        .expect("distinct, non-empty inbox list");

    thread::scope(|scope| {
        for (name, inbox) in [("a", a), ("b", b), ("c", c)] {
            scope.spawn(move || {
                for _ in 0..20 {
                    let value = inbox.read_spin();
                    println!("{name} received {value}");
                }
            });
        }

        for seq in 0..20u64 {
            node.broadcast(seq);
        }
    });
}
