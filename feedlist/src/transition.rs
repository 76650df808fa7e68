//! Classification of dataset changes and the matching scroll recovery.

use alloc::vec::Vec;

use crate::TransitionPolicy;
use crate::key::{ItemKey, KeySet};

/// How the set of item identities changed between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionKind {
    /// Old ids are a strict subset of the new ids.
    Append,
    /// New ids are a strict subset of the old ids.
    Filter,
    /// Same number of ids (identical, reordered, or swapped out).
    Replace,
    /// Different sizes, no subset relation, overlap above the policy threshold.
    Reorder,
    /// Anything else.
    Unknown,
}

/// What to do with the scroll position once the index reflects the new order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollRecovery<K> {
    /// Keep the items on screen where they are (anchored on the first visible item).
    KeepVisualPosition,
    /// Re-apply the cached scroll ratio, optionally capped.
    PreserveRatio { cap: Option<f64> },
    /// Scroll so this item is centered.
    AnchorTo(K),
    ResetToTop,
}

/// The reconciler's decision for one dataset change.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPlan<K> {
    pub kind: TransitionKind,
    /// Ids that left the dataset, in their old order.
    pub removed: Vec<K>,
    pub clear_maximized: bool,
    pub recovery: ScrollRecovery<K>,
}

struct Diff<K> {
    new_set: KeySet<K>,
    overlap: usize,
    old_len: usize,
    new_len: usize,
}

fn diff<K: ItemKey>(old: &[K], new: &[K]) -> Diff<K> {
    let old_set: KeySet<K> = old.iter().cloned().collect();
    let new_set: KeySet<K> = new.iter().cloned().collect();
    let overlap = old_set.iter().filter(|k| new_set.contains(*k)).count();
    Diff {
        old_len: old_set.len(),
        new_len: new_set.len(),
        new_set,
        overlap,
    }
}

fn classify_diff<K>(d: &Diff<K>, policy: &TransitionPolicy) -> TransitionKind {
    if d.old_len == d.new_len {
        return TransitionKind::Replace;
    }
    if d.overlap == d.old_len {
        return TransitionKind::Append;
    }
    if d.overlap == d.new_len {
        return TransitionKind::Filter;
    }
    let smaller = d.old_len.min(d.new_len);
    if d.overlap as f64 > smaller as f64 * policy.reorder_overlap {
        TransitionKind::Reorder
    } else {
        TransitionKind::Unknown
    }
}

/// Classifies the change from `old` to `new`, both treated as unordered sets.
pub fn classify<K: ItemKey>(old: &[K], new: &[K], policy: &TransitionPolicy) -> TransitionKind {
    classify_diff(&diff(old, new), policy)
}

/// Classifies the change and decides how to recover the scroll position.
///
/// `maximized` is the currently maximized id, if any.
pub fn plan<K: ItemKey>(
    old: &[K],
    new: &[K],
    maximized: Option<&K>,
    policy: &TransitionPolicy,
) -> TransitionPlan<K> {
    let d = diff(old, new);
    let kind = classify_diff(&d, policy);

    let mut removed = Vec::new();
    for key in old {
        if !d.new_set.contains(key) {
            removed.push(key.clone());
        }
    }

    let survivor = maximized.filter(|k| d.new_set.contains(*k)).cloned();
    let vanished = maximized.is_some() && survivor.is_none();

    let (clear_maximized, recovery) = match kind {
        TransitionKind::Append => (false, ScrollRecovery::KeepVisualPosition),
        TransitionKind::Filter => {
            if vanished {
                (true, ScrollRecovery::ResetToTop)
            } else if let Some(key) = survivor {
                (false, ScrollRecovery::AnchorTo(key))
            } else if d.new_len < policy.small_list_threshold {
                (false, ScrollRecovery::ResetToTop)
            } else {
                (
                    false,
                    ScrollRecovery::PreserveRatio {
                        cap: Some(policy.filter_ratio_cap),
                    },
                )
            }
        }
        TransitionKind::Replace => match survivor {
            Some(key) => (false, ScrollRecovery::AnchorTo(key)),
            None => (vanished, ScrollRecovery::PreserveRatio { cap: None }),
        },
        TransitionKind::Reorder => match survivor {
            Some(key) => (false, ScrollRecovery::AnchorTo(key)),
            None => (vanished, ScrollRecovery::ResetToTop),
        },
        TransitionKind::Unknown => (vanished, ScrollRecovery::ResetToTop),
    };

    vdebug!(
        kind = ?kind,
        old = d.old_len,
        new = d.new_len,
        overlap = d.overlap,
        removed = removed.len(),
        clear_maximized,
        "transition::plan"
    );

    TransitionPlan {
        kind,
        removed,
        clear_maximized,
        recovery,
    }
}
