use crate::{ListOptions, ViewportState};

/// Scroll deltas smaller than this are treated as micro-jitter and ignored.
pub const SCROLL_JITTER: u64 = 1;

/// Ratio captured before a container resize, applied once layout has settled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingResize {
    pub container_height: u32,
    pub scroll_ratio: f64,
}

/// Scroll offset and container geometry of a vertical list.
///
/// `Viewport` holds no reference to the content: every operation that depends on the content
/// takes the current total height as an argument.
#[derive(Clone, Debug)]
pub struct Viewport {
    scroll_offset: u64,
    container_height: u32,
    scroll_ratio: f64,
    show_scroll_to_top: bool,
    scroll_to_top_threshold: u64,
}

impl Viewport {
    pub fn new(scroll_to_top_threshold: u64) -> Self {
        Self {
            scroll_offset: 0,
            container_height: 0,
            scroll_ratio: 0.0,
            show_scroll_to_top: false,
            scroll_to_top_threshold,
        }
    }

    pub fn from_options(options: &ListOptions) -> Self {
        Self::new(options.scroll_to_top_threshold)
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    /// The cached ratio of `scroll_offset` to the maximum scroll distance.
    pub fn scroll_ratio(&self) -> f64 {
        self.scroll_ratio
    }

    pub fn show_scroll_to_top(&self) -> bool {
        self.show_scroll_to_top
    }

    pub fn max_scroll_offset(&self, total_height: u64) -> u64 {
        total_height.saturating_sub(self.container_height as u64)
    }

    pub fn clamp(&self, offset: u64, total_height: u64) -> u64 {
        offset.min(self.max_scroll_offset(total_height))
    }

    pub fn ratio_for(&self, offset: u64, total_height: u64) -> f64 {
        let max = self.max_scroll_offset(total_height).max(1);
        offset as f64 / max as f64
    }

    pub fn offset_for_ratio(&self, ratio: f64, total_height: u64) -> u64 {
        let max = self.max_scroll_offset(total_height);
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        ((max as f64 * ratio) + 0.5) as u64
    }

    /// Records the initial geometry of a freshly attached surface.
    pub fn attach(&mut self, container_height: u32, scroll_offset: u64, total_height: u64) {
        self.container_height = container_height;
        self.store_offset(scroll_offset, total_height);
    }

    /// Applies a scroll offset reported by the surface.
    ///
    /// Returns `false` when the change is below [`SCROLL_JITTER`].
    pub fn apply_scroll(&mut self, offset: u64, total_height: u64) -> bool {
        if offset.abs_diff(self.scroll_offset) < SCROLL_JITTER {
            return false;
        }
        self.store_offset(offset, total_height);
        true
    }

    /// Moves to a programmatic target (clamped). Returns the applied offset.
    pub fn scroll_to(&mut self, offset: u64, total_height: u64) -> u64 {
        let offset = self.clamp(offset, total_height);
        self.store_offset(offset, total_height);
        offset
    }

    /// Re-derives the ratio after the content height changed under a fixed offset.
    pub fn sync_ratio(&mut self, total_height: u64) {
        self.scroll_ratio = self.ratio_for(self.scroll_offset, total_height);
    }

    fn store_offset(&mut self, offset: u64, total_height: u64) {
        self.scroll_offset = offset;
        self.scroll_ratio = self.ratio_for(offset, total_height);
        self.show_scroll_to_top = offset > self.scroll_to_top_threshold;
    }

    /// Captures the ratio for the *current* height and offset, before the new container height
    /// is applied.
    pub fn capture_resize(&self, container_height: u32, total_height: u64) -> PendingResize {
        PendingResize {
            container_height,
            scroll_ratio: self.ratio_for(self.scroll_offset, total_height),
        }
    }

    /// Applies the new container height and rescales the offset so the same relative position
    /// stays visible. Returns the new offset.
    pub fn apply_resize(&mut self, pending: PendingResize, total_height: u64) -> u64 {
        self.container_height = pending.container_height;
        let offset = self.offset_for_ratio(pending.scroll_ratio, total_height);
        self.store_offset(offset, total_height);
        self.scroll_ratio = pending.scroll_ratio.clamp(0.0, 1.0);
        offset
    }

    /// Target offset that brings `[top, top + height)` into view.
    ///
    /// With `center`, the item is centered in the container; otherwise the smallest scroll that
    /// shows it fully is used (no scroll when it is already visible).
    pub fn target_for_item(&self, top: u64, height: u32, center: bool, total_height: u64) -> u64 {
        let view = self.container_height as u64;
        let bottom = top.saturating_add(height as u64);
        let target = if center {
            top.saturating_add(height as u64 / 2)
                .saturating_sub(view / 2)
        } else {
            let cur = self.scroll_offset;
            let cur_end = cur.saturating_add(view);
            if top >= cur && bottom <= cur_end {
                cur
            } else if top < cur {
                top
            } else {
                bottom.saturating_sub(view)
            }
        };
        self.clamp(target, total_height)
    }

    /// The closed window `[offset − overscan, offset + container + overscan]`.
    pub fn window(&self, overscan: u64) -> (u64, u64) {
        let start = self.scroll_offset.saturating_sub(overscan);
        let end = self
            .scroll_offset
            .saturating_add(self.container_height as u64)
            .saturating_add(overscan);
        (start, end)
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            scroll_offset: self.scroll_offset,
            container_height: self.container_height,
            scroll_ratio: self.scroll_ratio,
        }
    }

    /// Restores a previously captured snapshot, clamping the offset to the current content.
    pub fn restore(&mut self, state: ViewportState, total_height: u64) -> u64 {
        self.container_height = state.container_height;
        let offset = self.clamp(state.scroll_offset, total_height);
        self.store_offset(offset, total_height);
        offset
    }
}
