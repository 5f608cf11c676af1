//! RPMI message protocol.
//!
//! Wire contract shared with the platform microcontroller: the message
//! envelope, shared-memory queue layout, status codes and the service-group
//! catalog. Nothing here touches hardware.

pub mod args;
pub mod error;
pub mod lifecycle;
pub mod message;
pub mod payload;
pub mod queue;
pub mod service;
pub mod status;

pub use args::{MsgArgsFlags, RpmiMessageArgs};
pub use error::ProtocolError;
pub use lifecycle::{MessageState, Transaction};
pub use message::{MessageHeader, MessageType};
pub use payload::{RpmiPayload, RpmiResponse};
pub use queue::QueueLayout;
pub use service::ServiceGroup;
pub use status::RpmiStatus;
