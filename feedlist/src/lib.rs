//! A headless engine for virtualized feeds.
//!
//! For orchestration (data sources, scroll surfaces, snapshots, subscribers), see the
//! `feedlist-adapter` crate.
//!
//! This crate holds the state and math needed to keep only the visible window of a large,
//! dynamically sized list attached to the screen:
//! - [`PositionIndex`]: per-item heights keyed by identity, Fenwick prefix sums for tops, and
//!   generation-stamped invalidation with garbage collection of stale entries
//! - [`Viewport`]: scroll offset, container height, scroll-ratio bookkeeping across resizes and
//!   scroll-to targets
//! - [`MaximizeController`]: the single expanded ("maximized") item and its height policy
//! - [`transition`]: classification of dataset changes and the matching scroll recovery
//!
//! It is UI-agnostic. A UI layer is expected to provide container heights, scroll offsets,
//! measured item heights, and a monotonic clock (`now_ms`).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod key;
mod maximize;
mod options;
mod position_index;
mod state;
pub mod transition;
mod types;
mod viewport;

#[cfg(test)]
mod tests;

pub use key::ItemKey;
pub use maximize::{MaximizeChange, MaximizeController, Maximized};
pub use options::{
    CUSTOM_FALLBACK_PERCENTAGE, ListOptions, MIN_MAXIMIZED_HEIGHT, MaximizeConfig, MaximizeMode,
    TransitionPolicy,
};
pub use position_index::{
    MAX_GENERATION_LAG, MEASURE_TOLERANCE, PositionIndex, estimated_total_height,
};
pub use state::ViewportState;
pub use transition::{ScrollRecovery, TransitionKind, TransitionPlan};
pub use types::{IndexRange, ItemMeasurement};
pub use viewport::{PendingResize, SCROLL_JITTER, Viewport};
