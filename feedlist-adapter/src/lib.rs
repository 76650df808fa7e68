//! Framework-neutral orchestration for the `feedlist` engine.
//!
//! `feedlist` holds the list state and math. This crate wires it to a host:
//!
//! - [`DataSource`]: the ordered ids and content behind the list
//! - [`ScrollSurface`]: the scrollable region (resize/scroll observation, programmatic scroll)
//! - [`Clock`]: monotonic milliseconds
//! - [`ListEngine`]: composes everything, coalesces notifications and produces [`ListSnapshot`]s
//!
//! Scroll anchoring and tween-driven scrolling are available on their own as well.
//!
//! Single-threaded by construction: nothing here is `Send`.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod anchor;
mod clock;
mod engine;
mod mailbox;
mod observers;
mod snapshot;
mod source;
mod surface;
mod tween;


pub use anchor::{ScrollAnchor, anchor_target, capture_first_visible_anchor};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::ListEngine;
pub use observers::{ObserverRegistry, Subscription};
pub use snapshot::{ListSnapshot, VisibleItem};
pub use source::{DataSource, ListItem};
pub use surface::{ScrollSurface, SurfaceEvents};
pub use tween::{Easing, ScrollTween};

pub use feedlist;
