//! Firmware Mailbox Consumers
//!
//! Features that sit on top of the mailbox framework:
//!
//! - [`binding`]: Which controller and channel a consumer uses
//! - [`agent`]: Single-slot agent registration
//! - [`ras`]: RAS facade and its RPMI agent (`ras` feature)
//! - [`init`]: The subsystem context with cold init and teardown

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod agent;
pub mod binding;
pub mod error;
pub mod init;

cfg_if::cfg_if! {
    if #[cfg(feature = "ras")] {
        pub mod ras;
        pub use ras::{Ras, RasAgent, RasCaps, RpmiRasAgent};
    }
}

pub use binding::{BindingResolver, ConsumerDesc, StaticBindings};
pub use error::SbiError;
pub use init::Firmware;
