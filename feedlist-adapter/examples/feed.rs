// Example: drive a ListEngine from an in-memory data source and a headless surface.
use std::cell::RefCell;
use std::rc::Rc;

use feedlist::ListOptions;
use feedlist_adapter::{
    DataSource, ListEngine, ListItem, ManualClock, ObserverRegistry, ScrollSurface, Subscription,
    SurfaceEvents,
};

#[derive(Clone, Default)]
struct Posts {
    titles: Rc<RefCell<Vec<(u64, String)>>>,
    listeners: Rc<RefCell<ObserverRegistry>>,
}

impl Posts {
    fn replace(&self, titles: Vec<(u64, String)>) {
        *self.titles.borrow_mut() = titles;
        ObserverRegistry::notify(&self.listeners);
    }
}

impl DataSource<u64> for Posts {
    type Content = String;

    fn subscribe(&self, on_change: Box<dyn Fn()>) -> Subscription {
        ObserverRegistry::subscribe(&self.listeners, on_change)
    }

    fn ordered_ids(&self) -> Vec<u64> {
        self.titles.borrow().iter().map(|(id, _)| *id).collect()
    }

    fn item_by_id(&self, id: &u64) -> Option<ListItem<u64, String>> {
        let titles = self.titles.borrow();
        let (_, title) = titles.iter().find(|(k, _)| k == id)?;
        Some(ListItem::new(*id, title.clone()))
    }
}

#[derive(Default)]
struct Headless {
    offset: u64,
    events: Option<SurfaceEvents>,
}

impl ScrollSurface for Headless {
    fn container_height(&self) -> u32 {
        600
    }

    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    fn observe(&mut self, events: SurfaceEvents) -> Subscription {
        self.events = Some(events);
        Subscription::empty()
    }
}

fn posts(range: std::ops::Range<u64>) -> Vec<(u64, String)> {
    range.map(|id| (id, format!("post #{id}"))).collect()
}

fn main() {
    let source = Posts::default();
    source.replace(posts(0..500));

    let clock = ManualClock::new(0);
    let mut engine = ListEngine::new(ListOptions::default().with_gap(8), source.clone(), clock.clone());
    engine.attach_scroll_surface(Headless::default());
    let _sub = engine.subscribe(|| println!("  (notified)"));
    engine.flush();

    engine.on_scroll(4_000);
    for item in engine.snapshot().visible_items.iter().take(3) {
        engine_measure(&mut engine, item.id, 120 + (item.id % 5) as u32 * 30);
    }
    engine.flush();

    engine.toggle_maximize(&42, None);
    engine.on_frame(clock.advance(16));
    let snap = engine.snapshot();
    println!(
        "offset={} total={} maximized={:?} first_visible={:?}",
        engine.scroll_offset(),
        snap.total_height,
        snap.maximized_id,
        snap.visible_items.first().map(|i| &i.content)
    );

    // Filtering drops the maximized item: it is cleared and the list resets to the top.
    source.replace(posts(0..500).into_iter().filter(|(id, _)| id % 2 == 1).collect());
    engine.flush();
    println!("pending recovery={:?}", engine.pending_recovery());
    engine.on_frame(clock.advance(16));
    println!(
        "after filter: offset={} maximized={:?}",
        engine.scroll_offset(),
        engine.maximized_id()
    );

    engine.dispose();
}

fn engine_measure(engine: &mut ListEngine<u64, Posts>, id: u64, height: u32) {
    let changed = engine.measure_item(&id, height);
    println!("measure({id}, {height}) changed={changed}");
}
