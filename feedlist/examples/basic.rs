// Example: index a large list and select the window around a scroll offset.
use feedlist::{ListOptions, PositionIndex, Viewport};

fn main() {
    let options = ListOptions::default();
    let mut index = PositionIndex::from_options(&options);
    index.rebuild(0..1_000_000u64, 0);

    let mut viewport = Viewport::from_options(&options);
    viewport.attach(400, 123_456, index.total_height());

    let (start, end) = viewport.window(options.overscan());
    let range = index.range_for_window(start, end);
    println!("total_height={}", index.total_height());
    println!("window=[{start}, {end}] range={range:?}");
    println!("first={:?}", index.item_at(range.start_index));

    let last = index.item_at(index.len() - 1).map(|m| (m.top, m.height));
    if let Some((top, height)) = last {
        let off = viewport.scroll_to(
            viewport.target_for_item(top, height, false, index.total_height()),
            index.total_height(),
        );
        println!("after scroll to last item: offset={off}");
    }
}
