use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use feedlist::{
    ItemKey, ListOptions, MaximizeChange, MaximizeController, PendingResize, PositionIndex,
    ScrollRecovery, Viewport, ViewportState, estimated_total_height, transition,
};

use crate::anchor::{ScrollAnchor, anchor_target, capture_first_visible_anchor};
use crate::mailbox::{HostEvent, Mailbox, MailboxSender};
use crate::{
    Clock, DataSource, Easing, ListSnapshot, ObserverRegistry, ScrollSurface, ScrollTween,
    Subscription, SurfaceEvents, VisibleItem,
};

/// Frames a Natural-mode centre-scroll waits for the item's size report before using the
/// height it has.
const FOCUS_FRAME_BUDGET: u8 = 3;

struct AttachedSurface {
    surface: Box<dyn ScrollSurface>,
    observation: Subscription,
}

#[derive(Clone, Debug)]
struct PendingRecovery<K> {
    epoch: u64,
    recovery: ScrollRecovery<K>,
    anchor: Option<ScrollAnchor<K>>,
    ratio: f64,
}

#[derive(Clone, Debug)]
struct FocusRequest<K> {
    key: K,
    center: bool,
    awaiting_measure: bool,
    frames_left: u8,
}

#[derive(Debug)]
struct Effects<K> {
    resize: Option<PendingResize>,
    recovery: Option<PendingRecovery<K>>,
    focus: Option<FocusRequest<K>>,
}

impl<K> Effects<K> {
    fn new() -> Self {
        Self {
            resize: None,
            recovery: None,
            focus: None,
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Orchestrates a virtualized list over a [`DataSource`] and an optional [`ScrollSurface`].
///
/// The engine owns every piece of list state (position index, viewport, maximize state) and is
/// driven by the host:
/// - direct calls for UI intents (`measure_item`, `toggle_maximize`, `scroll_to_*`)
/// - `flush()` at the host's microtask checkpoint: applies queued data-source and surface events
///   and notifies subscribers once
/// - `on_frame(now_ms)` from the host's paint callback: runs deferred work (resize rescale,
///   scroll recovery after dataset changes, maximize centring, animated scrolls), then flushes
///
/// Host callbacks never touch the engine directly; they post into a mailbox that is drained on
/// the next flush. After [`dispose`](Self::dispose) (or drop) those callbacks become no-ops.
///
/// `now_ms` passed to `on_frame` must be on the same timeline as the engine's [`Clock`].
pub struct ListEngine<K: ItemKey, S: DataSource<K>> {
    options: ListOptions,
    source: S,
    clock: Box<dyn Clock>,

    index: PositionIndex<K>,
    viewport: Viewport,
    maximize: MaximizeController<K>,
    initialized: bool,
    dataset_epoch: u64,

    surface: Option<AttachedSurface>,
    surface_epoch: u64,
    mailbox: Rc<RefCell<Mailbox>>,
    source_subscription: Option<Subscription>,
    observers: Rc<RefCell<ObserverRegistry>>,

    effects: Effects<K>,
    tween: Option<ScrollTween>,
    batch_depth: usize,
    notify_pending: bool,
    disposed: bool,
}

impl<K: ItemKey, S: DataSource<K>> ListEngine<K, S> {
    /// Creates an engine and subscribes to `source`.
    ///
    /// The first dataset is indexed on the first `flush()`; until then snapshots use estimated
    /// positions.
    pub fn new(options: ListOptions, source: S, clock: impl Clock + 'static) -> Self {
        let mailbox = Mailbox::shared();
        let sender = MailboxSender::new(&mailbox);
        let source_subscription = source.subscribe(Box::new(move || {
            sender.post(HostEvent::DataChanged);
        }));
        mailbox.borrow_mut().push(HostEvent::DataChanged);

        Self {
            index: PositionIndex::from_options(&options),
            viewport: Viewport::from_options(&options),
            maximize: MaximizeController::new(options.maximize),
            options,
            source,
            clock: Box::new(clock),
            initialized: false,
            dataset_epoch: 0,
            surface: None,
            surface_epoch: 0,
            mailbox,
            source_subscription: Some(source_subscription),
            observers: Rc::new(RefCell::new(ObserverRegistry::new())),
            effects: Effects::new(),
            tween: None,
            batch_depth: 0,
            notify_pending: false,
            disposed: false,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn index(&self) -> &PositionIndex<K> {
        &self.index
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn has_pending_notification(&self) -> bool {
        self.notify_pending
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn maximized_id(&self) -> Option<&K> {
        self.maximize.maximized_key()
    }

    pub fn is_maximized(&self, id: &K) -> bool {
        self.maximize.is_maximized(id)
    }

    /// Recovery scheduled by the last dataset change, not yet run.
    pub fn pending_recovery(&self) -> Option<&ScrollRecovery<K>> {
        self.effects.recovery.as_ref().map(|p| &p.recovery)
    }

    pub fn scroll_offset(&self) -> u64 {
        self.viewport.scroll_offset()
    }

    pub fn container_height(&self) -> u32 {
        self.viewport.container_height()
    }

    /// Content height: indexed heights once initialized, the default-height estimate before.
    pub fn total_height(&self) -> u64 {
        if self.initialized {
            self.index.total_height()
        } else {
            estimated_total_height(
                self.source.total_count(),
                self.options.default_item_height,
                self.options.gap,
            )
        }
    }

    /// Records a rendered height for `id`. Returns `true` when the layout changed.
    pub fn measure_item(&mut self, id: &K, height: u32) -> bool {
        if self.disposed {
            return false;
        }
        let now = self.clock.now_ms();
        let changed = self.index.record_measured_height(id, height, now);
        if height > 0 {
            if let Some(focus) = self.effects.focus.as_mut() {
                if &focus.key == id {
                    focus.awaiting_measure = false;
                }
            }
        }
        if changed {
            self.viewport.sync_ratio(self.index.total_height());
            self.mark_changed();
        }
        changed
    }

    /// Maximizes `id`, or collapses it when it is already maximized.
    ///
    /// `explicit_height` overrides the configured policy; `Some(0)` maximizes with natural sizing
    /// (no override, centred after the next size report) whatever the mode. Entering the maximized state schedules
    /// a centre-scroll on the item for the next frame; collapsing schedules the minimal scroll
    /// that keeps it in view. Returns `false` for ids outside the current list.
    pub fn toggle_maximize(&mut self, id: &K, explicit_height: Option<u32>) -> bool {
        if self.disposed {
            return false;
        }
        if !self.index.contains(id) {
            vwarn!("toggle_maximize: id is not part of the current list");
            return false;
        }
        let change = self.maximize.toggle(
            id.clone(),
            explicit_height,
            self.viewport.container_height(),
        );
        self.apply_maximize_change(&change);
        true
    }

    fn apply_maximize_change(&mut self, change: &MaximizeChange<K>) {
        let now = self.clock.now_ms();
        if let Some(previous) = &change.previous {
            self.index.set_height_override(previous, None);
        }
        if let Some(current) = &change.current {
            self.index.set_height_override(current, change.height);
        }
        self.index.refresh(now);
        self.viewport.sync_ratio(self.index.total_height());

        self.effects.focus = match (&change.current, &change.previous) {
            (Some(current), _) => Some(FocusRequest {
                key: current.clone(),
                center: true,
                awaiting_measure: change.height.is_none(),
                frames_left: FOCUS_FRAME_BUDGET,
            }),
            (None, Some(previous)) => Some(FocusRequest {
                key: previous.clone(),
                center: false,
                awaiting_measure: false,
                frames_left: 0,
            }),
            (None, None) => None,
        };
        self.mark_changed();
    }

    fn clear_maximized(&mut self) {
        if let Some(key) = self.maximize.clear() {
            self.index.set_height_override(&key, None);
            if self
                .effects
                .focus
                .as_ref()
                .is_some_and(|focus| focus.key == key)
            {
                self.effects.focus = None;
            }
            vdebug!("maximized item cleared");
        }
    }

    /// Attaches a scroll surface, replacing (and detaching) any previous one.
    pub fn attach_scroll_surface(&mut self, surface: impl ScrollSurface + 'static) {
        if self.disposed {
            return;
        }
        self.detach_scroll_surface();

        let mut surface: Box<dyn ScrollSurface> = Box::new(surface);
        self.surface_epoch += 1;
        let events = SurfaceEvents::new(MailboxSender::new(&self.mailbox), self.surface_epoch);
        let observation = surface.observe(events);

        let total = self.total_height();
        self.viewport
            .attach(surface.container_height(), surface.scroll_offset(), total);
        vdebug!(
            epoch = self.surface_epoch,
            container_height = self.viewport.container_height(),
            scroll_offset = self.viewport.scroll_offset(),
            "scroll surface attached"
        );
        self.surface = Some(AttachedSurface {
            surface,
            observation,
        });
        self.mark_changed();
    }

    /// Removes the surface's observers and hands the surface back.
    ///
    /// Events the surface queued but the engine has not applied yet are dropped.
    pub fn detach_scroll_surface(&mut self) -> Option<Box<dyn ScrollSurface>> {
        let AttachedSurface {
            surface,
            observation,
        } = self.surface.take()?;
        self.surface_epoch += 1;
        self.effects.resize = None;
        self.tween = None;
        observation.unsubscribe();
        vdebug!("scroll surface detached");
        Some(surface)
    }

    pub fn has_scroll_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Applies a scroll offset reported by the host. Sub-unit jitter is ignored; a real change
    /// cancels any running scroll animation.
    pub fn on_scroll(&mut self, offset: u64) {
        if self.disposed {
            return;
        }
        let total = self.total_height();
        if !self.viewport.apply_scroll(offset, total) {
            return;
        }
        vtrace!(offset, "on_scroll");
        if self.tween.take().is_some() {
            vtrace!("scroll animation cancelled by user scroll");
        }
        if let Some(pending) = self.effects.resize.as_mut() {
            // The container height is still the pre-resize one.
            pending.scroll_ratio = self.viewport.scroll_ratio();
        }
        self.mark_changed();
    }

    /// Records a new container height. The scroll ratio is captured now; the rescale runs on the
    /// next frame, once layout has settled.
    pub fn on_resize(&mut self, container_height: u32) {
        if self.disposed {
            return;
        }
        let pending = match self.effects.resize {
            Some(mut pending) => {
                pending.container_height = container_height;
                pending
            }
            None => {
                if container_height == self.viewport.container_height() {
                    return;
                }
                self.viewport
                    .capture_resize(container_height, self.total_height())
            }
        };
        vtrace!(container_height, ratio = pending.scroll_ratio, "on_resize");
        self.effects.resize = Some(pending);
    }

    pub fn scroll_to_top(&mut self) -> u64 {
        self.scroll_to_offset(0, true)
    }

    /// Scrolls to `offset`, clamped to the content. Returns the clamped target.
    ///
    /// Animated scrolls advance on each `on_frame`; a new animated scroll retargets a running
    /// one.
    pub fn scroll_to_offset(&mut self, offset: u64, animated: bool) -> u64 {
        if self.disposed {
            return self.viewport.scroll_offset();
        }
        let target = self.viewport.clamp(offset, self.total_height());
        let duration_ms = self.options.scroll_animation_ms;
        if !animated || duration_ms == 0 || target == self.viewport.scroll_offset() {
            self.tween = None;
            return self.apply_offset(target);
        }

        let now = self.clock.now_ms();
        match self.tween.as_mut() {
            Some(tween) => tween.retarget(now, target),
            None => {
                self.tween = Some(ScrollTween::new(
                    self.viewport.scroll_offset(),
                    target,
                    now,
                    duration_ms,
                    Easing::default(),
                ));
            }
        }
        target
    }

    /// Scrolls `id` into view: centred when `center` is set or the item is maximized, otherwise
    /// the minimal scroll that shows it fully.
    ///
    /// Items the index has not placed yet are estimated by their position in the data source.
    /// Returns `None` for unknown ids.
    pub fn scroll_to_item(&mut self, id: &K, center: bool) -> Option<u64> {
        if self.disposed {
            return None;
        }
        let (top, height) = self.locate(id)?;
        let center = center || self.maximize.is_maximized(id);
        let target = self
            .viewport
            .target_for_item(top, height, center, self.total_height());
        self.tween = None;
        Some(self.apply_offset(target))
    }

    fn locate(&self, id: &K) -> Option<(u64, u32)> {
        if let Some(item) = self.index.lookup(id) {
            return Some((item.top, item.height));
        }
        let position = self.source.ordered_ids().iter().position(|k| k == id)?;
        Some((position as u64 * self.stride(), self.options.default_item_height))
    }

    fn stride(&self) -> u64 {
        (self.options.default_item_height as u64 + self.options.gap as u64).max(1)
    }

    /// Registers a change listener, called once per flush that follows a state change.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        if self.disposed {
            return Subscription::empty();
        }
        ObserverRegistry::subscribe(&self.observers, callback)
    }

    /// Builds the rendering payload for the current state.
    pub fn snapshot(&self) -> ListSnapshot<K, S::Content> {
        if self.disposed {
            return ListSnapshot::default();
        }
        let (start, end) = self.viewport.window(self.options.overscan());
        let maximized = self.maximize.maximized_key();

        let visible_items = if self.initialized {
            let range = self.index.range_for_window(start, end);
            let mut items = Vec::with_capacity(range.len());
            for i in range.start_index..range.end_index {
                let (Some(key), Some(item)) = (self.index.key_at(i), self.index.item_at(i)) else {
                    continue;
                };
                let Some(entry) = self.source.item_by_id(key) else {
                    vtrace!(index = i, "snapshot: id missing from data source");
                    continue;
                };
                items.push(VisibleItem {
                    id: key.clone(),
                    content: entry.content,
                    top: item.top,
                    height: item.height,
                    is_maximized: maximized == Some(key),
                });
            }
            items
        } else {
            self.estimated_items(start, end)
        };

        ListSnapshot {
            visible_items,
            total_height: self.total_height(),
            show_scroll_to_top: self.viewport.show_scroll_to_top(),
            maximized_id: maximized.cloned(),
            is_initialized: self.initialized,
        }
    }

    fn estimated_items(&self, start: u64, end: u64) -> Vec<VisibleItem<K, S::Content>> {
        let stride = self.stride();
        let first = usize::try_from(start / stride).unwrap_or(usize::MAX);
        let last = usize::try_from(end / stride).unwrap_or(usize::MAX);
        let height = self.options.default_item_height;

        let mut items = Vec::new();
        let ids = self.source.ordered_ids();
        for (i, key) in ids
            .iter()
            .enumerate()
            .skip(first)
            .take(last.saturating_sub(first).saturating_add(1))
        {
            let Some(entry) = self.source.item_by_id(key) else {
                continue;
            };
            items.push(VisibleItem {
                id: key.clone(),
                content: entry.content,
                top: i as u64 * stride,
                height,
                is_maximized: false,
            });
        }
        items
    }

    /// Applies queued host events and notifies subscribers once if anything changed.
    pub fn flush(&mut self) {
        if self.disposed {
            return;
        }
        self.drain_mailbox();
        self.deliver();
    }

    /// Runs deferred work for a frame painted at `now_ms`, then flushes.
    pub fn on_frame(&mut self, now_ms: u64) {
        if self.disposed {
            return;
        }
        self.drain_mailbox();
        self.run_effects(now_ms);
        self.deliver();
    }

    /// Runs `f` with notifications held back, then flushes once.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let out = f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.flush();
        }
        out
    }

    /// Tears the engine down: unsubscribes from the data source, detaches the surface, drops
    /// subscribers and deferred work. Idempotent; every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.mailbox.borrow_mut().close();
        if let Some(subscription) = self.source_subscription.take() {
            subscription.unsubscribe();
        }
        self.detach_scroll_surface();
        self.observers.borrow_mut().clear();
        self.effects.clear();
        self.tween = None;
        self.notify_pending = false;
        vdebug!("ListEngine disposed");
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    /// Restores a saved viewport, clamped to the current content. Returns the applied offset.
    pub fn restore_viewport_state(&mut self, state: ViewportState) -> u64 {
        if self.disposed {
            return self.viewport.scroll_offset();
        }
        self.tween = None;
        let offset = self.viewport.restore(state, self.total_height());
        self.write_surface(offset);
        self.mark_changed();
        offset
    }

    pub fn export_measurements(&self) -> Vec<(K, u32)> {
        self.index.export_measurements()
    }

    pub fn import_measurements(&mut self, measurements: impl IntoIterator<Item = (K, u32)>) -> usize {
        if self.disposed {
            return 0;
        }
        let n = self
            .index
            .import_measurements(measurements, self.clock.now_ms());
        if n > 0 {
            self.viewport.sync_ratio(self.index.total_height());
            self.mark_changed();
        }
        n
    }

    pub fn capture_anchor(&self) -> Option<ScrollAnchor<K>> {
        capture_first_visible_anchor(&self.index, &self.viewport)
    }

    /// Scrolls so the anchored item is back at its captured position. Returns `false` when the
    /// item left the list.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor<K>) -> bool {
        if self.disposed {
            return false;
        }
        let Some(target) = anchor_target(&self.index, &self.viewport, anchor) else {
            return false;
        };
        self.tween = None;
        self.apply_offset(target);
        true
    }

    fn mark_changed(&mut self) {
        self.notify_pending = true;
    }

    fn write_surface(&mut self, offset: u64) {
        if let Some(attached) = self.surface.as_mut() {
            attached.surface.set_scroll_offset(offset);
        }
    }

    fn apply_offset(&mut self, offset: u64) -> u64 {
        let applied = self.viewport.scroll_to(offset, self.total_height());
        self.write_surface(applied);
        self.mark_changed();
        applied
    }

    fn drain_mailbox(&mut self) {
        let mut data_changed = false;
        loop {
            let event = self.mailbox.borrow_mut().pop();
            let Some(event) = event else {
                break;
            };
            match event {
                HostEvent::DataChanged => data_changed = true,
                HostEvent::Resized { epoch, height } if epoch == self.surface_epoch => {
                    self.on_resize(height)
                }
                HostEvent::Scrolled { epoch, offset } if epoch == self.surface_epoch => {
                    self.on_scroll(offset)
                }
                _ => {
                    vtrace!(?event, "dropped event from a detached surface");
                }
            }
        }
        if data_changed {
            self.reconcile();
        }
    }

    fn deliver(&mut self) {
        if self.disposed || self.batch_depth > 0 || !self.notify_pending {
            return;
        }
        self.notify_pending = false;
        let panicked = ObserverRegistry::notify(&self.observers);
        if panicked > 0 {
            vwarn!(panicked, "subscribers panicked during notification");
        }
    }

    /// Re-reads the ordered ids and folds the change into the index.
    ///
    /// The index is rebuilt immediately; the scroll recovery waits for the next frame so it runs
    /// against the rebuilt positions.
    fn reconcile(&mut self) {
        let now = self.clock.now_ms();
        let ids = self.source.ordered_ids();

        if !self.initialized {
            let _generation = self.index.rebuild(ids, now);
            self.initialized = true;
            self.viewport.sync_ratio(self.index.total_height());
            vdebug!(generation = _generation, count = self.index.len(), "initial rebuild");
            self.mark_changed();
            return;
        }

        if ids.as_slice() == self.index.keys() {
            // Content-only change.
            self.mark_changed();
            return;
        }

        // An earlier transition's recovery that has not run yet is applied first, so the
        // anchor and ratio below are taken from the position it asked for.
        if let Some(pending) = self.effects.recovery.take() {
            if pending.epoch == self.dataset_epoch {
                vtrace!("applying unsettled scroll recovery before the next transition");
                self.run_recovery(pending);
            }
        }

        let plan = transition::plan(
            self.index.keys(),
            &ids,
            self.maximize.maximized_key(),
            &self.options.transitions,
        );
        let anchor = match plan.recovery {
            ScrollRecovery::KeepVisualPosition => {
                capture_first_visible_anchor(&self.index, &self.viewport)
            }
            _ => None,
        };
        let ratio = self.viewport.scroll_ratio();

        if plan.clear_maximized {
            self.clear_maximized();
        }
        let _generation = self.index.rebuild(ids, now);
        let _pruned = self.index.prune(plan.removed.iter());
        self.dataset_epoch += 1;
        vdebug!(
            kind = ?plan.kind,
            generation = _generation,
            pruned = _pruned,
            epoch = self.dataset_epoch,
            "dataset transition"
        );

        self.effects.recovery = Some(PendingRecovery {
            epoch: self.dataset_epoch,
            recovery: plan.recovery,
            anchor,
            ratio,
        });
        self.mark_changed();
    }

    fn run_effects(&mut self, now_ms: u64) {
        if let Some(pending) = self.effects.resize.take() {
            self.apply_resize(pending);
        }
        if let Some(pending) = self.effects.recovery.take() {
            if pending.epoch == self.dataset_epoch {
                self.run_recovery(pending);
            } else {
                vtrace!(epoch = pending.epoch, "superseded scroll recovery dropped");
            }
        }
        self.run_focus();
        self.step_tween(now_ms);
    }

    fn apply_resize(&mut self, pending: PendingResize) {
        if let Some((key, height)) = self.maximize.on_container_resize(pending.container_height) {
            self.index.set_height_override(&key, height);
            self.index.refresh(self.clock.now_ms());
        }
        let offset = self.viewport.apply_resize(pending, self.total_height());
        vtrace!(
            container_height = pending.container_height,
            offset,
            "resize applied"
        );
        self.write_surface(offset);
        self.mark_changed();
    }

    fn run_recovery(&mut self, pending: PendingRecovery<K>) {
        let total = self.total_height();
        let target = match &pending.recovery {
            ScrollRecovery::KeepVisualPosition => pending
                .anchor
                .as_ref()
                .and_then(|anchor| anchor_target(&self.index, &self.viewport, anchor))
                .unwrap_or_else(|| self.viewport.offset_for_ratio(pending.ratio, total)),
            ScrollRecovery::PreserveRatio { cap } => {
                let ratio = cap.map_or(pending.ratio, |cap| pending.ratio.min(cap));
                self.viewport.offset_for_ratio(ratio, total)
            }
            ScrollRecovery::AnchorTo(key) => {
                let Some(item) = self.index.lookup(key) else {
                    return;
                };
                self.viewport
                    .target_for_item(item.top, item.height, true, total)
            }
            ScrollRecovery::ResetToTop => 0,
        };
        vtrace!(target, "scroll recovery");
        self.tween = None;
        self.apply_offset(target);
    }

    fn run_focus(&mut self) {
        let Some(mut focus) = self.effects.focus.take() else {
            return;
        };
        if focus.awaiting_measure && focus.frames_left > 0 {
            focus.frames_left -= 1;
            self.effects.focus = Some(focus);
            return;
        }
        if focus.center && !self.maximize.is_maximized(&focus.key) {
            return;
        }
        self.scroll_to_item(&focus.key, focus.center);
    }

    fn step_tween(&mut self, now_ms: u64) {
        let Some(tween) = self.tween else {
            return;
        };
        let offset = tween.offset_at(now_ms);
        self.apply_offset(offset);
        if tween.is_finished(now_ms) {
            self.tween = None;
        }
    }
}

impl<K: ItemKey, S: DataSource<K>> Drop for ListEngine<K, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<K: ItemKey + fmt::Debug, S: DataSource<K>> fmt::Debug for ListEngine<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEngine")
            .field("options", &self.options)
            .field("len", &self.index.len())
            .field("generation", &self.index.generation())
            .field("viewport", &self.viewport)
            .field("maximized", &self.maximize.maximized_key())
            .field("initialized", &self.initialized)
            .field("queued_events", &self.mailbox.borrow().len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
