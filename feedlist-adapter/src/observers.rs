use std::cell::RefCell;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

/// Handle to a registration (subscriber, data-source listener, surface observation).
///
/// Dropping the handle or calling [`unsubscribe`](Self::unsubscribe) removes the registration.
/// Removal runs at most once.
#[must_use = "dropping a Subscription removes the registration"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to remove.
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

type Callback = Rc<dyn Fn()>;

/// Change listeners keyed by registration id.
#[derive(Default)]
pub struct ObserverRegistry {
    callbacks: Vec<(u64, Callback)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.callbacks.iter().any(|(cb_id, _)| *cb_id == id)
    }

    pub fn insert(&mut self, callback: impl Fn() + 'static) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, Rc::new(callback)));
        id
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cb_id, _)| *cb_id != id);
        before != self.callbacks.len()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    /// Registers `callback` on a shared registry and returns a handle that removes it again.
    ///
    /// The handle holds a weak reference: dropping it after the registry is gone is a no-op.
    pub fn subscribe(this: &Rc<RefCell<Self>>, callback: impl Fn() + 'static) -> Subscription {
        let id = this.borrow_mut().insert(callback);
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                if let Ok(mut registry) = registry.try_borrow_mut() {
                    registry.remove(id);
                }
            }
        })
    }

    /// Invokes every registered callback once.
    ///
    /// Callbacks run without the registry borrowed, so they may subscribe or unsubscribe. One
    /// removed by an earlier callback in the same pass is skipped. A panicking callback is
    /// isolated and the rest still run. Returns the number of callbacks that panicked.
    pub fn notify(this: &Rc<RefCell<Self>>) -> usize {
        let callbacks: Vec<(u64, Callback)> = this.borrow().callbacks.clone();
        let mut panicked = 0usize;
        for (id, callback) in callbacks {
            if !this.borrow().contains(id) {
                continue;
            }
            if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                panicked += 1;
                vwarn!(id, "subscriber panicked during notification");
            }
        }
        panicked
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.callbacks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
