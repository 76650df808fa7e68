/// A lightweight, serializable snapshot of the viewport.
///
/// Useful for restoring the scroll position across sessions without coupling the engine to a UI
/// framework. With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: u64,
    pub container_height: u32,
    pub scroll_ratio: f64,
}
