//! Mailbox Controller Hardware Abstraction Layer.
//!
//! This module defines the interface every mailbox transport implements.

use crate::mailbox::{ChanArgs, Channel, ChannelInfo, MailboxError, MboxXfer};

/// Mailbox backend trait.
///
/// Each physical or virtual transport implements this once and is then
/// registered with a [`Registry`](crate::mailbox::Registry).
///
/// # Thread Safety
///
/// `exchange` may be entered concurrently from several harts.
pub trait MailboxController: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &str;

    /// Validate binding arguments and set up backend state for a channel.
    ///
    /// Called at most once per distinct `args` while the channel lives.
    fn create_channel(&self, args: &ChanArgs) -> Result<ChannelInfo, MailboxError>;

    /// Release backend state of a channel.
    fn destroy_channel(&self, chan: &Channel) {
        let _ = chan;
    }

    /// Move one transfer across the link.
    ///
    /// The sequence number is already set. Blocks for at most the
    /// descriptor's timeouts.
    fn exchange(&self, chan: &Channel, xfer: &mut MboxXfer<'_>) -> Result<(), MailboxError>;
}
