use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use common::sync::IrqSpinLock;

use super::channel::Channel;
use super::{ChanArgs, MailboxError, MboxXfer};
use crate::hal::mailbox::MailboxController;

/// A registered mailbox backend.
///
/// Owns the channels created through it (in creation order) and the sequence
/// counter shared by every transfer it issues.
pub struct Controller {
    id: u32,
    ops: Arc<dyn MailboxController>,
    channels: IrqSpinLock<Vec<Arc<Channel>>>,
    next_seq: AtomicU32,
}

impl Controller {
    pub(crate) fn new(id: u32, ops: Arc<dyn MailboxController>) -> Self {
        Self {
            id,
            ops,
            channels: IrqSpinLock::new(Vec::new()),
            next_seq: AtomicU32::new(0),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        self.ops.name()
    }

    /// Get the channel bound to `args`, creating it on first request.
    ///
    /// Lookup and creation happen under the channel-list lock, so concurrent
    /// requests for the same arguments yield one channel.
    pub fn request_channel(self: &Arc<Self>, args: &ChanArgs) -> Result<Arc<Channel>, MailboxError> {
        let mut channels = self.channels.lock();

        if let Some(chan) = channels.iter().find(|chan| chan.args() == args) {
            return Ok(chan.clone());
        }

        let info = self.ops.create_channel(args).inspect_err(|err| {
            log::warn!("mbox{}: channel {:?} rejected: {:?}", self.id, args, err);
        })?;

        let chan = Arc::new(Channel::new(args, info, Arc::downgrade(self)));
        channels.push(chan.clone());
        log::debug!("mbox{}: created channel {:?}", self.id, args);

        Ok(chan)
    }

    /// Release one channel through the backend and drop it from this
    /// controller. Channels not owned by this controller are ignored.
    pub fn free_channel(&self, chan: &Arc<Channel>) {
        let mut channels = self.channels.lock();

        let Some(idx) = channels.iter().position(|c| Arc::ptr_eq(c, chan)) else {
            return;
        };

        chan.detach();
        self.ops.destroy_channel(chan);
        channels.remove(idx);
        log::debug!("mbox{}: freed channel {:?}", self.id, chan.args());
    }

    /// Release every channel, in creation order.
    pub(crate) fn free_all_channels(&self) {
        let mut channels = self.channels.lock();

        for chan in channels.drain(..) {
            chan.detach();
            self.ops.destroy_channel(&chan);
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.lock().len()
    }

    /// Snapshot of the channels in creation order.
    pub fn channels(&self) -> Vec<Arc<Channel>> {
        self.channels.lock().clone()
    }

    /// Atomically advance the sequence counter and return the new value.
    ///
    /// Wraps at `u32::MAX`.
    pub fn next_sequence(&self) -> u32 {
        self.next_seq.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    /// Assign a sequence number unless the caller pinned one, then hand the
    /// transfer to the backend. The backend result is returned unchanged.
    pub fn transfer(&self, chan: &Channel, xfer: &mut MboxXfer<'_>) -> Result<(), MailboxError> {
        if !xfer.has_sequence() {
            xfer.seq = self.next_sequence();
        }

        let result = self.ops.exchange(chan, xfer);
        if let Err(err) = result {
            log::debug!(
                "mbox{}: xfer seq={} service={:#x} on {:?} failed: {:?}",
                self.id,
                xfer.seq,
                xfer.args.service_id,
                chan.args(),
                err
            );
        }
        result
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("channels", &self.channel_count())
            .finish()
    }
}
