//! Counter
//!
//! This example attaches the dev tools panel to a small counter store and
//! walks through the two history edits the panel offers.
//!
//! Key concepts:
//! - Opting state and actions into inspection with `inspect_via_serde!`
//! - Deleting a past action and replaying the rest of the log
//! - Committing: rewinding the store and dropping later actions
//! - Driving the panel with the commands found in a rendered frame
//!
//! Run with: cargo run --example counter

use rewind::inspect_via_serde;
use rewind::panel::{DevToolsPanel, HeadlessHost, PanelConfig};
use rewind::store::Store;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq)]
struct Counter {
    count: i64,
}

#[derive(Serialize, Debug)]
enum CounterAction {
    Increment,
    Decrement,
    Add(i64),
}

inspect_via_serde!(Counter, CounterAction);

fn reduce(state: &Counter, action: &CounterAction) -> Counter {
    let count = match action {
        CounterAction::Increment => state.count + 1,
        CounterAction::Decrement => state.count - 1,
        CounterAction::Add(n) => state.count + n,
    };
    Counter { count }
}

fn print_history(panel: &DevToolsPanel<Counter, CounterAction>) {
    for transition in panel.transitions() {
        println!(
            "  #{} {:?}: {} -> {}",
            transition.id.0, transition.action, transition.before.count, transition.after.count
        );
    }
}

fn main() {
    println!("=== Counter Example ===\n");

    let store = Store::new(Counter { count: 0 }, reduce);
    let host = HeadlessHost::new();
    let config = PanelConfig::builder()
        .title("Counter Tools")
        .start_open(true)
        .build()
        .unwrap();
    let panel = DevToolsPanel::attach(&store, config, host.clone());

    store.dispatch(CounterAction::Increment);
    store.dispatch(CounterAction::Add(10));
    store.dispatch(CounterAction::Decrement);
    store.dispatch(CounterAction::Add(5));

    println!("After four dispatches the count is {}", store.state().count);
    print_history(&panel);
    println!("\nPanel:\n{}\n", host.last_text());

    // Pretend the `Add(10)` never happened.
    let add_ten = panel.transitions()[1].id;
    panel.delete(add_ten).unwrap();

    println!("Deleted #{}; the rest was replayed", add_ten.0);
    println!("The count is now {}", store.state().count);
    print_history(&panel);

    // Rewind to the first dispatch by pressing its commit button.
    let frame = host.last_frame().unwrap();
    let commit = frame.find_button("!").unwrap().clone();
    panel.handle(&commit).unwrap();

    println!("\nCommitted to the first dispatch");
    println!("The count is now {}", store.state().count);
    print_history(&panel);
    println!("\nPanel:\n{}", host.last_text());

    println!("\nChain intact: {}", panel.verify_chain().is_success());
    println!("Memo stats: {:?}", panel.memo_stats());
    println!("\n=== Example Complete ===");
}
