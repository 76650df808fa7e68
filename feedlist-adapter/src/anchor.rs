use core::fmt;

use feedlist::{ItemKey, PositionIndex, Viewport};

/// Identity-based scroll position: an item and how far the viewport top is past that item's top.
///
/// Survives data changes that move the item (prepends, reorders) as long as it stays in the list.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    pub offset_in_viewport: u64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Anchors on the item at the top edge of the viewport.
///
/// Returns `None` for an empty index.
pub fn capture_first_visible_anchor<K: ItemKey>(
    index: &PositionIndex<K>,
    viewport: &Viewport,
) -> Option<ScrollAnchor<K>> {
    let offset = viewport.scroll_offset();
    let i = index.index_at_offset(offset)?;
    let item = index.item_at(i)?;
    let key = index.key_at(i)?.clone();
    Some(ScrollAnchor {
        key,
        offset_in_viewport: offset.saturating_sub(item.top),
    })
}

/// Offset that puts the anchored item back where it was, or `None` when it left the list.
///
/// The result is clamped to the scrollable range.
pub fn anchor_target<K: ItemKey>(
    index: &PositionIndex<K>,
    viewport: &Viewport,
    anchor: &ScrollAnchor<K>,
) -> Option<u64> {
    let item = index.lookup(&anchor.key)?;
    let target = item.top.saturating_add(anchor.offset_in_viewport);
    Some(viewport.clamp(target, index.total_height()))
}
