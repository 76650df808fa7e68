// Example: keep the viewport anchored on an item while older entries are prepended.
use feedlist::{PositionIndex, Viewport};
use feedlist_adapter::{anchor_target, capture_first_visible_anchor};

fn main() {
    let mut index = PositionIndex::new(1, 0, 60_000);
    index.rebuild(1000u64..1100, 0);
    let mut viewport = Viewport::new(200);
    viewport.attach(10, 50, index.total_height());

    let anchor = capture_first_visible_anchor(&index, &viewport);
    println!("anchor={anchor:?}");

    // Prepend 10 items: old items shift down by 10.
    index.rebuild((2000u64..2010).chain(1000..1100), 1);

    if let Some(target) = anchor.as_ref().and_then(|a| anchor_target(&index, &viewport, a)) {
        viewport.scroll_to(target, index.total_height());
    }
    println!("scroll_offset={}", viewport.scroll_offset());
}
