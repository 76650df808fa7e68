use crate::Subscription;
use crate::mailbox::{HostEvent, MailboxSender};

/// A scrollable region provided by the host.
///
/// The engine reads the initial geometry on attach, writes programmatic scroll positions, and
/// asks the surface to start observing resizes and scrolls. The observation lasts until the
/// returned [`Subscription`] is dropped; implementations must remove both the resize observer and
/// the scroll listener at that point.
pub trait ScrollSurface {
    fn container_height(&self) -> u32;

    fn scroll_offset(&self) -> u64;

    fn set_scroll_offset(&mut self, offset: u64);

    fn observe(&mut self, events: SurfaceEvents) -> Subscription;
}

/// Sink for resize and scroll events of one attached surface.
///
/// Events are queued and applied on the engine's next `flush`/`on_frame`. Events sent after the
/// surface was detached, or after the engine was disposed, are dropped.
#[derive(Clone, Debug)]
pub struct SurfaceEvents {
    sender: MailboxSender,
    epoch: u64,
}

impl SurfaceEvents {
    pub(crate) fn new(sender: MailboxSender, epoch: u64) -> Self {
        Self { sender, epoch }
    }

    pub fn resized(&self, container_height: u32) -> bool {
        self.sender.post(HostEvent::Resized {
            epoch: self.epoch,
            height: container_height,
        })
    }

    pub fn scrolled(&self, offset: u64) -> bool {
        self.sender.post(HostEvent::Scrolled {
            epoch: self.epoch,
            offset,
        })
    }
}
