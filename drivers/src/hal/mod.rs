//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! Backends in [`crate::platform`] implement these; the mailbox framework
//! and its consumers only ever see the traits.
//!
//! # Available Interfaces
//!
//! - [`mailbox`]: Mailbox transport backends
//! - [`doorbell`]: Remote-side notification signal
//! - [`timer`]: Time source for bounded polling

pub mod doorbell;
pub mod mailbox;
pub mod timer;
