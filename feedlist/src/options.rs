/// Height (in layout units) below which a computed maximized height is never allowed to fall.
pub const MIN_MAXIMIZED_HEIGHT: u32 = 200;

/// Fraction of the container used by `Custom` mode when no `max_height` is configured.
pub const CUSTOM_FALLBACK_PERCENTAGE: f64 = 0.8;

/// How the expanded height of a maximized item is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaximizeMode {
    /// A share of the container, capped to leave room for neighbors.
    #[default]
    Fixed,
    /// No override: the item's rendered height is reported through the normal measurement path.
    Natural,
    /// Same formula as `Fixed`.
    Percentage,
    /// `max_height` when set, otherwise 80% of the container.
    Custom,
}

/// Maximization policy. Immutable for the lifetime of a list.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaximizeConfig {
    pub mode: MaximizeMode,
    pub max_height: Option<u32>,
    pub container_percentage: f64,
    /// Whether the renderer should clip content that exceeds the maximized height.
    pub clip_overflow: bool,
    /// Space kept free for neighboring items in `Fixed`/`Percentage` mode.
    pub neighbor_space: u32,
}

impl Default for MaximizeConfig {
    fn default() -> Self {
        Self {
            mode: MaximizeMode::Fixed,
            max_height: None,
            container_percentage: 0.8,
            clip_overflow: true,
            neighbor_space: 120,
        }
    }
}

impl MaximizeConfig {
    pub fn new(mode: MaximizeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_max_height(mut self, max_height: Option<u32>) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn with_container_percentage(mut self, container_percentage: f64) -> Self {
        self.container_percentage = container_percentage;
        self
    }

    pub fn with_clip_overflow(mut self, clip_overflow: bool) -> Self {
        self.clip_overflow = clip_overflow;
        self
    }

    pub fn with_neighbor_space(mut self, neighbor_space: u32) -> Self {
        self.neighbor_space = neighbor_space;
        self
    }

    /// Computes the maximized height for a container of the given height.
    ///
    /// `None` means "no override": the intrinsic content size applies.
    pub fn expanded_height(&self, container_height: u32) -> Option<u32> {
        match self.mode {
            MaximizeMode::Natural => None,
            MaximizeMode::Custom => Some(
                self.max_height
                    .unwrap_or_else(|| scale(container_height, CUSTOM_FALLBACK_PERCENTAGE)),
            ),
            MaximizeMode::Fixed | MaximizeMode::Percentage => {
                let share = scale(container_height, self.container_percentage);
                let cap = container_height.saturating_sub(self.neighbor_space);
                Some(share.min(cap).max(MIN_MAXIMIZED_HEIGHT))
            }
        }
    }
}

fn scale(height: u32, factor: f64) -> u32 {
    let v = height as f64 * factor.max(0.0);
    // `as` saturates, so oversized factors clamp to u32::MAX.
    (v + 0.5) as u32
}

/// Heuristic constants used to classify dataset transitions and pick a scroll recovery.
///
/// These are product tuning values, not structural requirements.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPolicy {
    /// Overlap (relative to the smaller set) above which a non-subset change is a reorder.
    pub reorder_overlap: f64,
    /// Filtered lists shorter than this reset to the top.
    pub small_list_threshold: usize,
    /// Upper bound for the preserved scroll ratio after a filter.
    pub filter_ratio_cap: f64,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            reorder_overlap: 0.5,
            small_list_threshold: 20,
            filter_ratio_cap: 0.5,
        }
    }
}

/// Configuration for a list instance.
///
/// All values are fixed at construction; the engine never mutates them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOptions {
    /// Space between items.
    pub gap: u32,
    /// Placeholder height for items that were never measured.
    pub default_item_height: u32,
    /// Overscan on each side of the viewport, in multiples of `default_item_height`.
    pub overscan_items: u32,
    /// Scroll offset past which the "scroll to top" affordance is shown.
    pub scroll_to_top_threshold: u64,
    /// Entries not used for longer than this are eligible for eviction.
    pub stale_after_ms: u64,
    /// Duration of animated programmatic scrolls.
    pub scroll_animation_ms: u64,
    pub maximize: MaximizeConfig,
    pub transitions: TransitionPolicy,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            gap: 0,
            default_item_height: 100,
            overscan_items: 5,
            scroll_to_top_threshold: 200,
            stale_after_ms: 60_000,
            scroll_animation_ms: 240,
            maximize: MaximizeConfig::default(),
            transitions: TransitionPolicy::default(),
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_default_item_height(mut self, default_item_height: u32) -> Self {
        self.default_item_height = default_item_height;
        self
    }

    pub fn with_overscan_items(mut self, overscan_items: u32) -> Self {
        self.overscan_items = overscan_items;
        self
    }

    pub fn with_scroll_to_top_threshold(mut self, threshold: u64) -> Self {
        self.scroll_to_top_threshold = threshold;
        self
    }

    pub fn with_stale_after_ms(mut self, stale_after_ms: u64) -> Self {
        self.stale_after_ms = stale_after_ms;
        self
    }

    pub fn with_scroll_animation_ms(mut self, duration_ms: u64) -> Self {
        self.scroll_animation_ms = duration_ms;
        self
    }

    pub fn with_maximize(mut self, maximize: MaximizeConfig) -> Self {
        self.maximize = maximize;
        self
    }

    pub fn with_transitions(mut self, transitions: TransitionPolicy) -> Self {
        self.transitions = transitions;
        self
    }

    /// Overscan margin in layout units.
    pub fn overscan(&self) -> u64 {
        self.overscan_items as u64 * self.default_item_height as u64
    }
}
