//! Shared definitions for the mailbox stack.
//!
//! - [`rpmi`]: the RPMI wire protocol
//! - [`sync`]: IRQ-safe locking
//! - [`arch`]: per-architecture interrupt masking

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod rpmi;
pub mod sync;
