// Example: classify dataset changes and pick a scroll recovery.
use feedlist::{MaximizeConfig, MaximizeController, TransitionPolicy, transition};

fn main() {
    let policy = TransitionPolicy::default();
    let old: Vec<u32> = (0..100).collect();

    let appended: Vec<u32> = (0..150).collect();
    let filtered: Vec<u32> = (0..100).filter(|i| i % 3 == 0).collect();
    let reordered: Vec<u32> = (30..130).rev().collect();

    let mut maximize = MaximizeController::new(MaximizeConfig::default());
    maximize.toggle(42, None, 800);
    println!("maximized={:?}", maximize.maximized());

    for (name, new) in [
        ("append", &appended),
        ("filter", &filtered),
        ("reorder", &reordered),
    ] {
        let plan = transition::plan(&old, new, maximize.maximized_key(), &policy);
        println!(
            "{name}: kind={:?} removed={} clear_maximized={} recovery={:?}",
            plan.kind,
            plan.removed.len(),
            plan.clear_maximized,
            plan.recovery
        );
    }
}
