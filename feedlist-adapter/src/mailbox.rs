use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Something the host reported between two flushes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HostEvent {
    DataChanged,
    /// Container resize from the surface attached under `epoch`.
    Resized { epoch: u64, height: u32 },
    /// Scroll offset from the surface attached under `epoch`.
    Scrolled { epoch: u64, offset: u64 },
}

#[derive(Debug)]
pub(crate) struct Mailbox {
    events: VecDeque<HostEvent>,
    open: bool,
}

impl Mailbox {
    pub(crate) fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            events: VecDeque::new(),
            open: true,
        }))
    }

    pub(crate) fn push(&mut self, event: HostEvent) -> bool {
        if !self.open {
            return false;
        }
        // Consecutive data changes collapse into one reconcile.
        if event == HostEvent::DataChanged && self.events.back() == Some(&HostEvent::DataChanged) {
            return true;
        }
        self.events.push_back(event);
        true
    }

    pub(crate) fn pop(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    /// Stops accepting events and drops the queued ones.
    pub(crate) fn close(&mut self) {
        self.open = false;
        self.events.clear();
    }
}

/// Weak, cloneable handle for posting into a [`Mailbox`] from host callbacks.
#[derive(Clone, Debug)]
pub(crate) struct MailboxSender {
    inner: Weak<RefCell<Mailbox>>,
}

impl MailboxSender {
    pub(crate) fn new(mailbox: &Rc<RefCell<Mailbox>>) -> Self {
        Self {
            inner: Rc::downgrade(mailbox),
        }
    }

    /// Returns `false` when the engine is gone or disposed.
    pub(crate) fn post(&self, event: HostEvent) -> bool {
        let Some(mailbox) = self.inner.upgrade() else {
            return false;
        };
        let Ok(mut mailbox) = mailbox.try_borrow_mut() else {
            vwarn!(?event, "mailbox busy, host event dropped");
            return false;
        };
        mailbox.push(event)
    }
}
