//! Logging shims over `tracing`. Without the `tracing` feature every call expands to nothing,
//! so arguments are never evaluated.

#[cfg(feature = "tracing")]
pub(crate) const LOG_TARGET: &str = "feedlist";

#[cfg(feature = "tracing")]
macro_rules! vtrace {
    ($($arg:tt)+) => { ::tracing::trace!(target: crate::macros::LOG_TARGET, $($arg)+) };
}

#[cfg(feature = "tracing")]
macro_rules! vdebug {
    ($($arg:tt)+) => { ::tracing::debug!(target: crate::macros::LOG_TARGET, $($arg)+) };
}

#[cfg(feature = "tracing")]
macro_rules! vwarn {
    ($($arg:tt)+) => { ::tracing::warn!(target: crate::macros::LOG_TARGET, $($arg)+) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vtrace {
    ($($arg:tt)+) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! vdebug {
    ($($arg:tt)+) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! vwarn {
    ($($arg:tt)+) => {};
}
