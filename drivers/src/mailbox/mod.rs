//! Mailbox framework.
//!
//! ```text
//! Registry ──owns──▶ Controller ──owns──▶ Channel
//!                        │                   │
//!                        └─ seq counter      └─ transfer(MboxXfer) ─▶ backend
//! ```
//!
//! Backends implement [`MailboxController`](crate::hal::mailbox::MailboxController);
//! this module supplies registration, channel de-duplication and request
//! sequencing on top of them.

pub mod channel;
pub mod controller;
pub mod error;
pub mod registry;
pub mod xfer;


pub use channel::{Channel, ChannelInfo};
pub use controller::Controller;
pub use error::{MailboxError, check_status};
pub use registry::Registry;
pub use xfer::{MboxXfer, XferFlags};

/// Number of binding argument words per channel.
pub const MBOX_CHAN_MAX_ARGS: usize = 2;

/// Backend-specific channel binding key, compared word for word.
pub type ChanArgs = [u32; MBOX_CHAN_MAX_ARGS];
