//! Mailbox Driver Subsystem
//!
//! This crate provides a layered architecture for firmware-to-platform
//! messaging:
//!
//! # Module Organization
//!
//! - [`hal`]: Backend and hardware trait definitions
//! - [`mailbox`]: Controller registry, channels and transfers
//! - [`platform`]: Transport backends
//! - [`hw`]: Raw shared-memory access
//! - [`rpmi`]: RPMI request helpers on top of channels
//!
//! # Usage Example
//!
//! ```ignore
//! use drivers::mailbox::Registry;
//! use drivers::rpmi::normal_request_with_status;
//!
//! let registry = Registry::new();
//! let controller = registry.add(0, backend)?;
//! let chan = controller.request_channel(&[ServiceGroup::Hsm.id() as u32, 0])?;
//! let resp: HsmGetHartStatusResp =
//!     normal_request_with_status(&chan, hsm::GET_HART_STATUS, &HsmGetHartStatusReq { hartid: 0 })?;
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod hal;
pub mod hw;
pub mod mailbox;
pub mod platform;
pub mod rpmi;

// Re-export commonly used types
pub use hal::doorbell::Doorbell;
pub use hal::mailbox::MailboxController;
pub use hal::timer::Clock;
pub use mailbox::{ChanArgs, Channel, Controller, MailboxError, MboxXfer, Registry};
