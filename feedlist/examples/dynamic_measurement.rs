// Example: measured heights shift later items; jitter within one unit is absorbed.
use feedlist::PositionIndex;

fn main() {
    let mut index = PositionIndex::new(10, 2, 60_000);
    index.rebuild(["a", "b", "c", "d"], 0);
    println!("before: total={} c={:?}", index.total_height(), index.lookup(&"c"));

    let changed = index.record_measured_height(&"a", 40, 1);
    println!("measure(a, 40): changed={changed} c={:?}", index.lookup(&"c"));

    let changed = index.record_measured_height(&"a", 41, 2);
    println!("measure(a, 41): changed={changed} total={}", index.total_height());

    // Measurements follow identities across reorders.
    index.rebuild(["d", "c", "b", "a"], 3);
    println!("after reorder: a={:?}", index.lookup(&"a"));

    let saved = index.export_measurements();
    let mut restored = PositionIndex::new(10, 2, 60_000);
    restored.rebuild(["a", "b"], 0);
    restored.import_measurements(saved, 0);
    println!("restored total={}", restored.total_height());
}
