use alloc::sync::{Arc, Weak};
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use super::controller::Controller;
use super::{ChanArgs, MailboxError, MboxXfer};

/// What a backend reports about a channel it has created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Largest payload a single message on this channel can carry.
    pub max_xfer_len: usize,
}

/// A logical endpoint on one controller.
///
/// Identified by its binding arguments. Holds no transport logic; transfers
/// are forwarded to the owning controller.
pub struct Channel {
    args: ChanArgs,
    info: ChannelInfo,
    controller: Weak<Controller>,
    attached: AtomicBool,
}

impl Channel {
    pub(crate) fn new(args: &ChanArgs, info: ChannelInfo, controller: Weak<Controller>) -> Self {
        Self {
            args: *args,
            info,
            controller,
            attached: AtomicBool::new(true),
        }
    }

    /// Binding arguments this channel was created with.
    pub fn args(&self) -> &ChanArgs {
        &self.args
    }

    pub fn info(&self) -> ChannelInfo {
        self.info
    }

    pub fn max_xfer_len(&self) -> usize {
        self.info.max_xfer_len
    }

    /// Owning controller, while this channel is still part of it.
    pub fn controller(&self) -> Option<Arc<Controller>> {
        if !self.is_attached() {
            return None;
        }
        self.controller.upgrade()
    }

    /// `false` once the channel has been freed or its controller removed.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    pub(crate) fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }

    /// Submit a transfer through the owning controller.
    pub fn transfer(&self, xfer: &mut MboxXfer<'_>) -> Result<(), MailboxError> {
        let controller = self.controller().ok_or(MailboxError::InvalidArgument)?;
        controller.transfer(self, xfer)
    }

    /// Reserve the next sequence number of the owning controller.
    pub fn next_sequence(&self) -> Result<u32, MailboxError> {
        self.controller()
            .map(|controller| controller.next_sequence())
            .ok_or(MailboxError::InvalidArgument)
    }

    /// Release this channel. No-op if it is already detached.
    pub fn free(self: &Arc<Self>) {
        if let Some(controller) = self.controller() {
            controller.free_channel(self);
        }
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("args", &self.args)
            .field("info", &self.info)
            .field("attached", &self.is_attached())
            .finish()
    }
}
