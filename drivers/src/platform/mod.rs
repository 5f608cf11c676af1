//! Mailbox Transport Backends
//!
//! Each backend implements [`MailboxController`](crate::hal::mailbox::MailboxController)
//! for one physical link. Backends are selected with Cargo features:
//!
//! - `rpmi-shmem`: RPMI over shared-memory queues (default)

cfg_if::cfg_if! {
    if #[cfg(feature = "rpmi-shmem")] {
        pub mod rpmi_shmem;
        pub use rpmi_shmem::{Notification, RpmiShmem, ShmemConfig, ShmemRegions};
    }
}
