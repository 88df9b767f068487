//! Minimal single-producer/single-consumer example using the spinning
//! write/read pair.
//!
//! Run: cargo run --example spsc_spin

use std::thread;

use ringmesh::Inbox;

fn main() {
    let inbox = Inbox::<u64>::new(8, "spsc-demo").expect("valid capacity and name");

    let consumer = {
        let inbox = inbox.clone();
        thread::spawn(move || {
            let mut sum = 0u64;
            for _ in 0..100 {
                sum += inbox.read_spin();
            }
            sum
        })
    };

    for i in 0..100u64 {
        inbox.write_spin(i);
    }

    let sum = consumer.join().expect("consumer thread panicked");
    println!("sum of 0..100 = {sum}");
}
