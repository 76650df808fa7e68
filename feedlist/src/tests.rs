use crate::*;

use alloc::vec;
use alloc::vec::Vec;
use std::string::{String, ToString};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_range_usize(0, i + 1);
            items.swap(i, j);
        }
    }
}

fn ids(range: core::ops::Range<u32>) -> Vec<u32> {
    range.collect()
}

fn index_with(count: u32, default_height: u32, gap: u32) -> PositionIndex<u32> {
    let mut index = PositionIndex::new(default_height, gap, 60_000);
    index.rebuild(ids(0..count), 0);
    index
}

fn assert_adjacency(index: &PositionIndex<u32>) {
    let gap = index.gap() as u64;
    let keys: Vec<u32> = index.keys().to_vec();
    for pair in keys.windows(2) {
        let a = index.lookup(&pair[0]).unwrap();
        let b = index.lookup(&pair[1]).unwrap();
        assert_eq!(b.top, a.top + a.height as u64 + gap, "between {pair:?}");
    }
    if let Some(last) = keys.last() {
        let last = index.lookup(last).unwrap();
        assert_eq!(index.total_height(), last.bottom());
    }
}

#[test]
fn empty_index_has_no_height_or_range() {
    let index = PositionIndex::<u32>::new(100, 8, 60_000);
    assert_eq!(index.total_height(), 0);
    assert_eq!(index.index_at_offset(0), None);
    assert!(index.range_for_window(0, 1000).is_empty());
    assert_eq!(index.lookup(&1), None);
}

#[test]
fn unmeasured_total_matches_estimate_formula() {
    let index = index_with(10, 100, 8);
    assert_eq!(index.total_height(), 10 * 100 + 9 * 8);
    assert_eq!(index.total_height(), estimated_total_height(10, 100, 8));
    assert_eq!(estimated_total_height(0, 100, 8), 0);
    assert_eq!(estimated_total_height(1, 100, 8), 100);
}

#[test]
fn rebuild_stacks_tops_with_gap() {
    let mut index = index_with(4, 50, 10);
    index.record_measured_height(&1, 80, 1);
    assert_eq!(index.lookup(&0).unwrap().top, 0);
    assert_eq!(index.lookup(&1).unwrap().top, 60);
    assert_eq!(index.lookup(&2).unwrap().top, 150);
    assert_eq!(index.lookup(&3).unwrap().top, 210);
    // No trailing gap after the last item.
    assert_eq!(index.total_height(), 260);
    assert_adjacency(&index);
}

#[test]
fn measure_then_lookup_roundtrips_within_tolerance() {
    let mut index = index_with(3, 100, 0);
    assert!(index.record_measured_height(&1, 240, 5));
    let m = index.lookup(&1).unwrap();
    assert_eq!(m.height, 240);
    assert_eq!(m.top, 100);
    assert!(m.measured);
    assert_eq!(m.last_used_ms, 5);
    assert_eq!(index.lookup(&2).unwrap().top, 340);

    // Jitter within one unit is absorbed.
    assert!(!index.record_measured_height(&1, 241, 6));
    assert!(!index.record_measured_height(&1, 239, 7));
    assert_eq!(index.lookup(&1).unwrap().height, 240);
    assert_eq!(index.lookup(&1).unwrap().last_used_ms, 7);

    assert!(index.record_measured_height(&1, 238, 8));
    assert_eq!(index.lookup(&1).unwrap().height, 238);
}

#[test]
fn zero_height_reports_are_discarded() {
    let mut index = index_with(2, 100, 0);
    assert!(!index.record_measured_height(&0, 0, 1));
    assert!(!index.is_measured(&0));
    assert_eq!(index.total_height(), 200);
}

#[test]
fn measurement_before_rebuild_is_used_by_next_rebuild() {
    let mut index = PositionIndex::<u32>::new(100, 0, 60_000);
    assert!(!index.record_measured_height(&7, 30, 0));
    assert_eq!(index.lookup(&7), None);

    index.rebuild([5, 7, 9], 1);
    assert_eq!(index.lookup(&7).unwrap().height, 30);
    assert_eq!(index.lookup(&9).unwrap().top, 130);
}

#[test]
fn rebuild_twice_is_idempotent() {
    let mut index = index_with(20, 40, 3);
    index.record_measured_height(&4, 90, 1);
    index.record_measured_height(&11, 15, 1);
    let order = index.keys().to_vec();

    index.rebuild(order.clone(), 2);
    let first: Vec<ItemMeasurement> = (0..20).map(|i| index.item_at(i).unwrap()).collect();
    index.rebuild(order, 2);
    let second: Vec<ItemMeasurement> = (0..20).map(|i| index.item_at(i).unwrap()).collect();

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.top, b.top);
        assert_eq!(a.height, b.height);
    }
    assert_eq!(index.generation(), 3);
}

#[test]
fn measurements_follow_ids_across_reorder() {
    let mut index = index_with(3, 10, 0);
    index.record_measured_height(&0, 50, 1);
    index.rebuild([2, 1, 0], 2);
    assert_eq!(index.lookup(&0).unwrap().index, 2);
    assert_eq!(index.lookup(&0).unwrap().height, 50);
    assert_eq!(index.lookup(&0).unwrap().top, 20);
    assert_eq!(index.lookup(&2).unwrap().height, 10);
}

#[test]
fn duplicate_ids_keep_first_position() {
    let mut index = PositionIndex::<u32>::new(10, 0, 60_000);
    index.rebuild([1, 2, 1, 3], 0);
    assert_eq!(index.len(), 3);
    assert_eq!(index.keys(), &[1, 2, 3]);
    assert_eq!(index.index_of(&3), Some(2));
}

#[test]
fn string_keys_work() {
    let mut index = PositionIndex::<String>::new(100, 0, 60_000);
    index.rebuild(["a", "b", "c"].iter().map(|s| s.to_string()), 0);
    index.record_measured_height(&"b".to_string(), 250, 1);
    assert_eq!(index.lookup(&"c".to_string()).unwrap().top, 350);
}

#[test]
fn viewport_window_selects_expected_range() {
    // 1000 items of 100, offset 5000, container 400, overscan 5 × 100.
    let index = index_with(1000, 100, 0);
    let options = ListOptions::default();
    let mut viewport = Viewport::from_options(&options);
    viewport.attach(400, 5000, index.total_height());

    let (start, end) = viewport.window(options.overscan());
    assert_eq!((start, end), (4500, 5900));
    let range = index.range_for_window(start, end);
    for i in 45..=59 {
        assert!(range.contains(i), "index {i} should be selected");
    }
    assert!(!range.contains(40));
    assert!(!range.contains(65));
}

#[test]
fn range_for_window_skips_item_ending_at_window_start() {
    let index = index_with(10, 10, 5);
    // Item 1 spans [15, 25), followed by a gap [25, 30).
    let r = index.range_for_window(27, 29);
    assert!(r.is_empty());
    let r = index.range_for_window(25, 30);
    assert_eq!(
        r,
        IndexRange {
            start_index: 2,
            end_index: 3
        }
    );
    let r = index.range_for_window(0, 1_000_000);
    assert_eq!(r.len(), 10);
    assert!(index.range_for_window(10_000, 20_000).is_empty());
}

#[test]
fn index_at_offset_maps_gaps_to_previous_item() {
    let index = index_with(2, 2, 1); // item0 [0,2), gap [2,3), item1 [3,5)
    assert_eq!(index.index_at_offset(0), Some(0));
    assert_eq!(index.index_at_offset(2), Some(0));
    assert_eq!(index.index_at_offset(3), Some(1));
    assert_eq!(index.index_at_offset(99), Some(1));
}

#[test]
fn height_override_wins_and_reverts_to_measured_height() {
    let mut index = index_with(3, 100, 0);
    index.record_measured_height(&1, 140, 1);
    assert!(index.set_height_override(&1, Some(600)));
    assert_eq!(index.lookup(&1).unwrap().height, 600);
    assert_eq!(index.lookup(&2).unwrap().top, 700);

    // Reports for the overridden item do not replace its collapsed height.
    assert!(!index.record_measured_height(&1, 600, 2));
    assert!(index.set_height_override(&1, None));
    assert_eq!(index.lookup(&1).unwrap().height, 140);
    assert_eq!(index.lookup(&2).unwrap().top, 240);
    assert!(!index.set_height_override(&1, None));
}

#[test]
fn stale_entries_are_evicted_after_window_or_two_generations() {
    let mut index = PositionIndex::<u32>::new(100, 0, 60_000);
    index.rebuild([1, 2, 3], 0);
    index.record_measured_height(&3, 50, 0);

    // 3 leaves the order; its entry lingers for one generation.
    index.rebuild([1, 2], 1_000);
    assert_eq!(index.entries_len(), 3);
    assert_eq!(index.lookup(&3), None);

    // Second rebuild without 3: generation lag reaches 2.
    index.rebuild([1, 2], 2_000);
    assert_eq!(index.entries_len(), 2);

    // Time-based eviction for an entry that was never part of a rebuild.
    index.record_measured_height(&9, 70, 3_000);
    assert_eq!(index.collect_garbage(3_000 + 60_000), 0);
    assert_eq!(index.collect_garbage(3_000 + 60_001), 1);
    assert!(!index.is_measured(&9));
}

#[test]
fn entries_in_current_order_are_never_collected() {
    let mut index = PositionIndex::<u32>::new(100, 0, 10);
    index.rebuild([1, 2], 0);
    assert_eq!(index.collect_garbage(1_000_000), 0);
    assert!(index.lookup(&1).is_some());
}

#[test]
fn prune_drops_removed_ids_only() {
    let mut index = index_with(4, 10, 0);
    index.record_measured_height(&3, 99, 0);
    index.rebuild([0, 1], 1);
    assert_eq!(index.prune([1u32, 2, 3].iter()), 2);
    assert_eq!(index.entries_len(), 2);
    assert!(index.lookup(&1).is_some());
    assert!(!index.remove(&1));
    assert!(!index.remove(&3));

    index.record_measured_height(&7, 10, 2);
    assert!(index.remove(&7));
    assert_eq!(index.entries_len(), 2);
}

#[test]
fn measurements_can_be_exported_and_imported() {
    let mut index = index_with(5, 10, 0);
    index.record_measured_height(&1, 20, 0);
    index.record_measured_height(&4, 40, 0);
    let mut exported = index.export_measurements();
    exported.sort_unstable();
    assert_eq!(exported, vec![(1, 20), (4, 40)]);

    let mut restored = index_with(5, 10, 0);
    assert_eq!(restored.import_measurements(exported, 5), 2);
    assert_eq!(restored.total_height(), index.total_height());
    assert_eq!(restored.lookup(&4).unwrap().top, 50);
}

#[test]
fn property_random_measurements_preserve_adjacency() {
    for seed in [1u64, 2, 3, 42, 999] {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_u32(1, 200);
        let gap = rng.gen_range_u32(0, 6);
        let mut index = index_with(count, rng.gen_range_u32(1, 60), gap);
        let mut expected: Vec<u32> = (0..count)
            .map(|i| index.lookup(&i).unwrap().height)
            .collect();

        for step in 0..50u64 {
            let id = rng.gen_range_u32(0, count);
            let h = rng.gen_range_u32(1, 300);
            index.record_measured_height(&id, h, step);
            if expected[id as usize].abs_diff(h) > MEASURE_TOLERANCE {
                expected[id as usize] = h;
            }
        }
        assert_adjacency(&index);
        for id in 0..count {
            assert_eq!(index.lookup(&id).unwrap().height, expected[id as usize]);
        }

        let mut order = index.keys().to_vec();
        rng.shuffle(&mut order);
        order.truncate(rng.gen_range_usize(1, order.len() + 1));
        index.rebuild(order.clone(), 100);
        assert_eq!(index.keys(), order.as_slice());
        assert_adjacency(&index);

        // Offset lookups agree with a linear scan.
        for _ in 0..30 {
            let off = rng.gen_range_u64(0, index.total_height() + 10);
            let linear = (0..index.len())
                .rev()
                .find(|&i| index.item_at(i).unwrap().top <= off)
                .unwrap_or(0);
            assert_eq!(index.index_at_offset(off), Some(linear));
        }
    }
}

#[test]
fn scroll_jitter_is_ignored_and_threshold_flags_scroll_to_top() {
    let mut v = Viewport::new(200);
    v.attach(400, 0, 10_000);
    assert!(!v.apply_scroll(0, 10_000));
    assert!(v.apply_scroll(150, 10_000));
    assert!(!v.show_scroll_to_top());
    assert!(v.apply_scroll(201, 10_000));
    assert!(v.show_scroll_to_top());
    assert!((v.scroll_ratio() - 201.0 / 9_600.0).abs() < 1e-9);
}

#[test]
fn resize_preserves_relative_position() {
    let mut v = Viewport::new(200);
    v.attach(1000, 4500, 10_000); // ratio 0.5
    let pending = v.capture_resize(600, 10_000);
    assert!((pending.scroll_ratio - 0.5).abs() < 1e-9);
    let off = v.apply_resize(pending, 10_000);
    assert_eq!(off, 4700); // 0.5 × (10_000 − 600)
    assert_eq!(v.container_height(), 600);
}

#[test]
fn ratio_uses_at_least_one_unit_of_scroll_distance() {
    let v = Viewport::new(200);
    assert_eq!(v.ratio_for(0, 0), 0.0);
    assert_eq!(v.offset_for_ratio(0.7, 0), 0);
    assert_eq!(v.offset_for_ratio(f64::NAN, 1_000), 0);
}

#[test]
fn item_targets_center_or_scroll_minimally() {
    let mut v = Viewport::new(200);
    v.attach(400, 1000, 10_000);

    // Fully visible: no movement.
    assert_eq!(v.target_for_item(1100, 100, false, 10_000), 1000);
    // Above: align top.
    assert_eq!(v.target_for_item(600, 100, false, 10_000), 600);
    // Below: align bottom.
    assert_eq!(v.target_for_item(1500, 100, false, 10_000), 1200);
    // Centered.
    assert_eq!(v.target_for_item(2000, 200, true, 10_000), 1900);
    // Clamped at both ends.
    assert_eq!(v.target_for_item(0, 100, true, 10_000), 0);
    assert_eq!(v.target_for_item(9_900, 100, true, 10_000), 9_600);
}

#[test]
fn viewport_state_can_roundtrip() {
    let mut v = Viewport::new(200);
    v.attach(500, 300, 5_000);
    let state = v.state();

    let mut restored = Viewport::new(200);
    assert_eq!(restored.restore(state, 5_000), 300);
    assert_eq!(restored.state(), state);
    assert!(restored.show_scroll_to_top());

    // Content shrank since the snapshot: the offset is clamped.
    let mut restored = Viewport::new(200);
    assert_eq!(restored.restore(state, 600), 100);
}

#[test]
fn fixed_mode_height_scenario() {
    let config = MaximizeConfig::new(MaximizeMode::Fixed)
        .with_container_percentage(0.7)
        .with_neighbor_space(100);
    assert_eq!(config.expanded_height(800), Some(560));
}

#[test]
fn percentage_mode_is_capped_then_floored() {
    let config = MaximizeConfig::new(MaximizeMode::Percentage)
        .with_container_percentage(0.95)
        .with_neighbor_space(120);
    // min(950, 880) = 880
    assert_eq!(config.expanded_height(1000), Some(880));
    // Tiny container: floored at MIN_MAXIMIZED_HEIGHT.
    assert_eq!(config.expanded_height(150), Some(MIN_MAXIMIZED_HEIGHT));
}

#[test]
fn natural_and_custom_modes() {
    let natural = MaximizeConfig::new(MaximizeMode::Natural);
    assert_eq!(natural.expanded_height(800), None);

    let custom = MaximizeConfig::new(MaximizeMode::Custom);
    assert_eq!(custom.expanded_height(1000), Some(800));
    let custom = custom.with_max_height(Some(333));
    assert_eq!(custom.expanded_height(1000), Some(333));
}

#[test]
fn maximize_is_exclusive_and_toggles() {
    let mut c = MaximizeController::new(MaximizeConfig::default());
    let change = c.toggle("a", None, 1000);
    assert_eq!(change.previous, None);
    assert_eq!(change.current, Some("a"));
    assert_eq!(change.height, Some(800));

    let change = c.toggle("b", None, 1000);
    assert_eq!(change.previous, Some("a"));
    assert_eq!(change.current, Some("b"));
    assert!(c.is_maximized(&"b"));
    assert!(!c.is_maximized(&"a"));

    let change = c.toggle("b", None, 1000);
    assert_eq!(change.previous, Some("b"));
    assert_eq!(change.current, None);
    assert!(!change.entered());
    assert_eq!(c.maximized_key(), None);
}

#[test]
fn explicit_height_wins_and_survives_resize() {
    let mut c = MaximizeController::new(MaximizeConfig::default());
    let change = c.toggle(1u32, Some(420), 1000);
    assert_eq!(change.height, Some(420));
    assert_eq!(c.on_container_resize(500), None);

    // Zero asks for natural sizing and is not replaced by the policy on resize.
    c.clear();
    assert_eq!(c.toggle(1u32, Some(0), 1000).height, None);
    assert!(c.maximized().unwrap().explicit);
    assert_eq!(c.on_container_resize(500), None);

    c.clear();
    assert_eq!(c.toggle(1u32, None, 1000).height, Some(800));
    assert_eq!(c.on_container_resize(500), Some((1, Some(380))));
    assert_eq!(c.on_container_resize(500), None);
    assert_eq!(c.clear(), Some(1));
    assert_eq!(c.clear(), None);
}

#[test]
fn maximize_exclusivity_reverts_previous_height_in_index() {
    let mut index = index_with(3, 100, 0);
    index.record_measured_height(&0, 150, 0);
    let mut c = MaximizeController::new(MaximizeConfig::default());

    let change = c.toggle(0u32, None, 1000);
    index.set_height_override(&0, change.height);
    index.refresh(1);
    assert_eq!(index.lookup(&0).unwrap().height, 800);

    let change = c.toggle(1u32, None, 1000);
    if let Some(prev) = &change.previous {
        index.set_height_override(prev, None);
    }
    if let Some(cur) = &change.current {
        index.set_height_override(cur, change.height);
    }
    index.refresh(2);
    assert_eq!(c.maximized_key(), Some(&1));
    assert_eq!(index.lookup(&0).unwrap().height, 150);
    assert_eq!(index.lookup(&1).unwrap().height, 800);
    assert_adjacency(&index);
}

#[test]
fn classification_examples() {
    let policy = TransitionPolicy::default();
    assert_eq!(
        transition::classify(&[1, 2, 3], &[1, 2, 3, 4, 5], &policy),
        TransitionKind::Append
    );
    assert_eq!(
        transition::classify(&[1, 2, 3, 4, 5], &[2, 4], &policy),
        TransitionKind::Filter
    );
    assert_eq!(
        transition::classify(&[1, 2, 3], &[1, 2, 3], &policy),
        TransitionKind::Replace
    );
    assert_eq!(
        transition::classify(&[1, 2, 3], &[3, 2, 1], &policy),
        TransitionKind::Replace
    );
    assert_eq!(
        transition::classify(&[1, 2, 3], &[7, 8, 9], &policy),
        TransitionKind::Replace
    );
    // Overlap 3 of smaller size 4 (> 50%).
    assert_eq!(
        transition::classify(&[1, 2, 3, 4], &[2, 3, 4, 5, 6], &policy),
        TransitionKind::Reorder
    );
    // Overlap 2 of smaller size 4 (not > 50%).
    assert_eq!(
        transition::classify(&[1, 2, 3, 4], &[3, 4, 5, 6, 7], &policy),
        TransitionKind::Unknown
    );
    assert_eq!(
        transition::classify::<u32>(&[], &[1], &policy),
        TransitionKind::Append
    );
    assert_eq!(
        transition::classify::<u32>(&[1], &[], &policy),
        TransitionKind::Filter
    );
}

#[test]
fn reorder_threshold_is_configurable() {
    let policy = TransitionPolicy {
        reorder_overlap: 0.4,
        ..TransitionPolicy::default()
    };
    assert_eq!(
        transition::classify(&[1, 2, 3, 4], &[3, 4, 5, 6, 7], &policy),
        TransitionKind::Reorder
    );
}

#[test]
fn filter_removing_maximized_clears_and_resets() {
    let policy = TransitionPolicy::default();
    let plan = transition::plan(&[1, 2, 3, 4, 5], &[2, 4], Some(&3), &policy);
    assert_eq!(plan.kind, TransitionKind::Filter);
    assert!(plan.clear_maximized);
    assert_eq!(plan.recovery, ScrollRecovery::ResetToTop);
    assert_eq!(plan.removed, vec![1, 3, 5]);
}

#[test]
fn filter_recovery_variants() {
    let policy = TransitionPolicy::default();
    let old: Vec<u32> = (0..100).collect();

    let kept: Vec<u32> = (0..50).collect();
    let plan = transition::plan(&old, &kept, Some(&10), &policy);
    assert_eq!(plan.recovery, ScrollRecovery::AnchorTo(10));
    assert!(!plan.clear_maximized);

    let plan = transition::plan(&old, &kept, None, &policy);
    assert_eq!(plan.recovery, ScrollRecovery::PreserveRatio { cap: Some(0.5) });

    let small: Vec<u32> = (0..19).collect();
    let plan = transition::plan(&old, &small, None, &policy);
    assert_eq!(plan.recovery, ScrollRecovery::ResetToTop);

    let plan = transition::plan(&old, &[], None, &policy);
    assert_eq!(plan.recovery, ScrollRecovery::ResetToTop);
}

#[test]
fn replace_reorder_unknown_and_append_recovery() {
    let policy = TransitionPolicy::default();

    let plan = transition::plan(&[1, 2, 3], &[3, 1, 2], Some(&2), &policy);
    assert_eq!(plan.kind, TransitionKind::Replace);
    assert_eq!(plan.recovery, ScrollRecovery::AnchorTo(2));

    let plan = transition::plan(&[1, 2, 3], &[4, 5, 6], Some(&2), &policy);
    assert!(plan.clear_maximized);
    assert_eq!(plan.recovery, ScrollRecovery::PreserveRatio { cap: None });

    let plan = transition::plan(&[1, 2, 3, 4], &[2, 3, 4, 5, 6], Some(&3), &policy);
    assert_eq!(plan.kind, TransitionKind::Reorder);
    assert_eq!(plan.recovery, ScrollRecovery::AnchorTo(3));

    let plan = transition::plan(&[1, 2, 3, 4], &[2, 3, 4, 5, 6], Some(&1), &policy);
    assert!(plan.clear_maximized);
    assert_eq!(plan.recovery, ScrollRecovery::ResetToTop);

    let plan = transition::plan(&[1, 2, 3, 4], &[3, 4, 5, 6, 7], Some(&3), &policy);
    assert_eq!(plan.kind, TransitionKind::Unknown);
    assert!(!plan.clear_maximized);
    assert_eq!(plan.recovery, ScrollRecovery::ResetToTop);

    let plan = transition::plan(&[1, 2], &[0, 1, 2, 3], Some(&1), &policy);
    assert_eq!(plan.kind, TransitionKind::Append);
    assert!(plan.removed.is_empty());
    assert_eq!(plan.recovery, ScrollRecovery::KeepVisualPosition);
}
