use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::key::{ItemKey, KeyMap};
use crate::{IndexRange, ItemMeasurement, ListOptions};

/// Height reports within this distance of the stored height are treated as layout jitter.
pub const MEASURE_TOLERANCE: u32 = 1;

/// Entries whose generation lags the current one by at least this much are evicted.
pub const MAX_GENERATION_LAG: u64 = 2;

/// Total height of `count` unmeasured items.
pub fn estimated_total_height(count: usize, default_item_height: u32, gap: u32) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    (count * default_item_height as u64).saturating_add((count - 1) * gap as u64)
}

#[derive(Clone, Debug)]
struct Entry {
    height: u32, // measured or placeholder, never the maximized override
    measured: bool,
    height_override: Option<u32>,
    generation: u64,
    last_used_ms: u64,
}

impl Entry {
    fn effective_height(&self) -> u32 {
        self.height_override.unwrap_or(self.height)
    }
}

/// Maps item identity to height and top offset for the current order.
///
/// Heights are cached per key and survive reorders; tops are derived from Fenwick prefix sums, so
/// a size change shifts every later item in `O(log n)` and offset → index lookups are
/// `O(log n)`.
///
/// Every [`rebuild`](Self::rebuild) starts a new generation. Entries that are not revalidated by
/// later rebuilds, or that were not used within the staleness window, are garbage collected.
#[derive(Clone, Debug)]
pub struct PositionIndex<K> {
    default_item_height: u32,
    gap: u32,
    stale_after_ms: u64,
    generation: u64,

    order: Vec<K>,
    positions: KeyMap<K, usize>,
    entries: KeyMap<K, Entry>,
    sums: Fenwick,
}

impl<K: ItemKey> PositionIndex<K> {
    pub fn new(default_item_height: u32, gap: u32, stale_after_ms: u64) -> Self {
        Self {
            default_item_height,
            gap,
            stale_after_ms,
            generation: 0,
            order: Vec::new(),
            positions: KeyMap::new(),
            entries: KeyMap::new(),
            sums: Fenwick::default(),
        }
    }

    pub fn from_options(options: &ListOptions) -> Self {
        Self::new(
            options.default_item_height,
            options.gap,
            options.stale_after_ms,
        )
    }

    pub fn default_item_height(&self) -> u32 {
        self.default_item_height
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of items in the current order.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of cached entries, including ids outside the current order.
    pub fn entries_len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> &[K] {
        &self.order
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.order.get(index)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn is_measured(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|e| e.measured)
    }

    /// Records a height reported by the renderer.
    ///
    /// Returns `true` when the layout changed. Zero heights are discarded, reports within
    /// [`MEASURE_TOLERANCE`] only refresh the entry, and reports for an item with an active
    /// height override leave its collapsed height untouched.
    pub fn record_measured_height(&mut self, key: &K, height: u32, now_ms: u64) -> bool {
        if height == 0 {
            vtrace!(height, "record_measured_height: discarded non-positive height");
            return false;
        }
        let generation = self.generation;
        let Some(entry) = self.entries.get_mut(key) else {
            // Not part of any rebuild yet; the next rebuild picks it up.
            self.entries.insert(
                key.clone(),
                Entry {
                    height,
                    measured: true,
                    height_override: None,
                    generation,
                    last_used_ms: now_ms,
                },
            );
            return false;
        };

        entry.last_used_ms = now_ms;
        entry.generation = generation;
        if entry.height_override.is_some() {
            return false;
        }
        if entry.height.abs_diff(height) <= MEASURE_TOLERANCE {
            entry.measured = true;
            return false;
        }

        vtrace!(height, previous = entry.height, "record_measured_height");
        entry.height = height;
        entry.measured = true;
        match self.positions.get(key) {
            Some(&index) => self.sums.set_height(index, height) != 0,
            None => false,
        }
    }

    /// Replaces the current order and starts a new generation.
    ///
    /// Existing heights are reused, unknown ids get the default height, every visited entry is
    /// stamped with the new generation and `now_ms`. Duplicate ids keep their first position.
    /// Garbage collection runs afterwards. Returns the new generation.
    pub fn rebuild(&mut self, ordered: impl IntoIterator<Item = K>, now_ms: u64) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let default_item_height = self.default_item_height;

        self.order.clear();
        self.positions.clear();
        let mut heights = Vec::new();
        for key in ordered {
            if self.positions.contains_key(&key) {
                vwarn!("rebuild: duplicate id in ordered set ignored");
                continue;
            }
            let entry = self.entries.entry(key.clone()).or_insert_with(|| Entry {
                height: default_item_height,
                measured: false,
                height_override: None,
                generation,
                last_used_ms: now_ms,
            });
            entry.generation = generation;
            entry.last_used_ms = now_ms;
            heights.push(entry.effective_height());
            self.positions.insert(key.clone(), self.order.len());
            self.order.push(key);
        }
        self.sums = Fenwick::from_heights(&heights, self.gap);

        let _evicted = self.collect_garbage(now_ms);
        vdebug!(
            generation,
            count = self.order.len(),
            cached = self.entries.len(),
            evicted = _evicted,
            "PositionIndex::rebuild"
        );
        generation
    }

    /// Rebuilds over the current order (e.g. after a maximize toggle).
    pub fn refresh(&mut self, now_ms: u64) -> u64 {
        let order = core::mem::take(&mut self.order);
        self.rebuild(order, now_ms)
    }

    /// Evicts entries outside the current order whose generation lags by
    /// [`MAX_GENERATION_LAG`] or more, or that were unused for longer than the staleness window.
    ///
    /// Returns the number of evicted entries.
    pub fn collect_garbage(&mut self, now_ms: u64) -> usize {
        let generation = self.generation;
        let stale_after_ms = self.stale_after_ms;
        let positions = &self.positions;
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            if positions.contains_key(key) {
                return true;
            }
            let lag = generation.wrapping_sub(entry.generation);
            let idle = now_ms.saturating_sub(entry.last_used_ms);
            lag < MAX_GENERATION_LAG && idle <= stale_after_ms
        });
        before - self.entries.len()
    }

    /// Drops cached entries for ids that left the dataset.
    ///
    /// Ids that are still part of the current order are kept.
    pub fn prune<'a>(&mut self, removed: impl IntoIterator<Item = &'a K>) -> usize
    where
        K: 'a,
    {
        let mut n = 0usize;
        for key in removed {
            if self.positions.contains_key(key) {
                continue;
            }
            if self.entries.remove(key).is_some() {
                n += 1;
            }
        }
        n
    }

    /// Drops the cached entry of a single id that is no longer part of the order.
    pub fn remove(&mut self, key: &K) -> bool {
        self.prune(core::iter::once(key)) == 1
    }

    /// Sets or clears a height that takes precedence over the measured height.
    ///
    /// Returns `true` when the effective height changed.
    pub fn set_height_override(&mut self, key: &K, height: Option<u32>) -> bool {
        let generation = self.generation;
        let default_item_height = self.default_item_height;
        let entry = self.entries.entry(key.clone()).or_insert_with(|| Entry {
            height: default_item_height,
            measured: false,
            height_override: None,
            generation,
            last_used_ms: 0,
        });
        let before = entry.effective_height();
        entry.height_override = height;
        let after = entry.effective_height();
        if before == after {
            return false;
        }
        if let Some(&index) = self.positions.get(key) {
            self.sums.set_height(index, after);
        }
        true
    }

    /// Total content height: effective heights plus gaps, no trailing gap.
    pub fn total_height(&self) -> u64 {
        self.sums.total()
    }

    /// Returns the position of `key` if it belongs to the current generation.
    pub fn lookup(&self, key: &K) -> Option<ItemMeasurement> {
        let &index = self.positions.get(key)?;
        let entry = self.entries.get(key)?;
        if entry.generation != self.generation {
            return None;
        }
        Some(self.measurement(index, entry))
    }

    pub fn item_at(&self, index: usize) -> Option<ItemMeasurement> {
        let key = self.order.get(index)?;
        let entry = self.entries.get(key)?;
        Some(self.measurement(index, entry))
    }

    fn measurement(&self, index: usize, entry: &Entry) -> ItemMeasurement {
        ItemMeasurement {
            index,
            top: self.sums.prefix_sum(index),
            height: entry.effective_height(),
            measured: entry.measured,
            generation: entry.generation,
            last_used_ms: entry.last_used_ms,
        }
    }

    /// Index of the item containing `offset`; offsets inside a gap map to the previous item and
    /// offsets past the end map to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(self.order.len() - 1))
    }

    /// All indices whose `[top, top + height)` touches the closed window `[start, end]`.
    pub fn range_for_window(&self, start: u64, end: u64) -> IndexRange {
        let count = self.order.len();
        if count == 0 || end < start || start >= self.total_height() {
            return IndexRange::EMPTY;
        }

        let mut first = self.sums.lower_bound(start).min(count - 1);
        let first_bottom = self
            .sums
            .prefix_sum(first)
            .saturating_add(self.effective_height_at(first) as u64);
        if first_bottom <= start {
            first += 1;
        }
        let last = self.sums.lower_bound(end).min(count - 1);
        let range = IndexRange {
            start_index: first,
            end_index: last + 1,
        };
        if range.is_empty() {
            return IndexRange::EMPTY;
        }
        range
    }

    fn effective_height_at(&self, index: usize) -> u32 {
        self.order
            .get(index)
            .and_then(|k| self.entries.get(k))
            .map_or(self.default_item_height, Entry::effective_height)
    }

    /// Exports measured heights (key → collapsed height), e.g. for persistence.
    pub fn export_measurements(&self) -> Vec<(K, u32)> {
        let mut out = Vec::new();
        for (k, e) in self.entries.iter() {
            if e.measured {
                out.push((k.clone(), e.height));
            }
        }
        out
    }

    /// Imports previously exported heights. Zero heights are skipped.
    ///
    /// Returns the number of imported entries.
    pub fn import_measurements(
        &mut self,
        measurements: impl IntoIterator<Item = (K, u32)>,
        now_ms: u64,
    ) -> usize {
        let generation = self.generation;
        let mut n = 0usize;
        for (key, height) in measurements {
            if height == 0 {
                continue;
            }
            let entry = self.entries.entry(key).or_insert_with(|| Entry {
                height,
                measured: true,
                height_override: None,
                generation,
                last_used_ms: now_ms,
            });
            entry.height = height;
            entry.measured = true;
            entry.last_used_ms = now_ms;
            n += 1;
        }
        if n > 0 {
            let heights: Vec<u32> = (0..self.order.len())
                .map(|i| self.effective_height_at(i))
                .collect();
            self.sums = Fenwick::from_heights(&heights, self.gap);
        }
        vdebug!(entries = n, "import_measurements");
        n
    }
}
