use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over item slots, where a slot is an item height plus the trailing gap (the last
/// slot carries no gap).
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    tree: Vec<u64>, // 1-indexed
    slots: Vec<u64>,
    total: u64,
    max_bit: usize,
    gap: u32,
}

impl Fenwick {
    pub(crate) fn from_heights(heights: &[u32], gap: u32) -> Self {
        let n = heights.len();
        let mut tree = alloc::vec![0u64; n + 1];
        let mut slots = Vec::with_capacity(n);
        let mut total = 0u64;
        for (i, &height) in heights.iter().enumerate() {
            let slot = slot_value(height, gap, i + 1 < n);
            slots.push(slot);
            total = total.saturating_add(slot);

            let node = i + 1;
            tree[node] = tree[node].saturating_add(slot);
            let parent = node + lsb(node);
            if parent <= n {
                tree[parent] = tree[parent].saturating_add(tree[node]);
            }
        }
        Self {
            tree,
            slots,
            total,
            max_bit: highest_power_of_two_leq(n),
            gap,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Replaces the height stored at `index` and returns the signed change of its slot.
    pub(crate) fn set_height(&mut self, index: usize, height: u32) -> i64 {
        let n = self.len();
        let Some(cur) = self.slots.get(index).copied() else {
            return 0;
        };
        let next = slot_value(height, self.gap, index + 1 < n);
        if next == cur {
            return 0;
        }
        self.slots[index] = next;
        let delta = next as i128 - cur as i128;
        self.total = (self.total as i128 + delta).clamp(0, u64::MAX as i128) as u64;

        let mut i = index + 1;
        while i <= n {
            let v = self.tree[i] as i128 + delta;
            debug_assert!(v >= 0, "Fenwick underflow (idx={i}, delta={delta})");
            self.tree[i] = v.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
        delta as i64
    }

    /// Sum of the first `count` slots, i.e. the top offset of item `count`.
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Number of slots whose cumulative sum is `<= offset`.
    ///
    /// For an offset inside the list this is the index of the slot containing it; offsets inside
    /// a gap resolve to the item before the gap.
    pub(crate) fn lower_bound(&self, mut offset: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= offset {
                offset -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn slot_value(height: u32, gap: u32, has_gap: bool) -> u64 {
    if has_gap {
        height as u64 + gap as u64
    } else {
        height as u64
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1usize << (usize::BITS - 1 - n.leading_zeros())
}
