//! Message lifecycle.
//!
//! ```text
//! Built ──dispatch──▶ Sent ──ack (token match)──▶ Acknowledged
//!   │                  │ └──posted, dispatched──▶ PostedComplete
//!   │                  └──timeout / failure─────▶ Failed
//!   └──dispatch failed────────────────────────────▶ Failed
//!
//! (inbound)  ──────────────────────────────────────▶ Notified
//! ```
//!
//! Terminal states are never left.

use super::message::{MessageHeader, MessageType};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageState {
    Built,
    Sent,
    Acknowledged,
    PostedComplete,
    Notified,
    Failed,
}

impl MessageState {
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Acknowledged | Self::PostedComplete | Self::Notified | Self::Failed
        )
    }
}

/// Tracks one locally issued request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transaction {
    msg_type: MessageType,
    token: u16,
    state: MessageState,
}

impl Transaction {
    pub const fn new(msg_type: MessageType, token: u16) -> Self {
        Self {
            msg_type,
            token,
            state: MessageState::Built,
        }
    }

    /// The lifecycle of an inbound notification: it starts terminal.
    pub const fn notification(token: u16) -> Self {
        Self {
            msg_type: MessageType::Notification,
            token,
            state: MessageState::Notified,
        }
    }

    pub const fn state(&self) -> MessageState {
        self.state
    }

    pub const fn token(&self) -> u16 {
        self.token
    }

    /// Record the outcome of handing the message to a controller.
    ///
    /// A posted request completes here; a normal request waits for its
    /// acknowledgement.
    pub fn dispatched(&mut self, ok: bool) -> MessageState {
        if self.state == MessageState::Built {
            self.state = match (ok, self.msg_type) {
                (false, _) => MessageState::Failed,
                (true, MessageType::PostedRequest) => MessageState::PostedComplete,
                (true, _) => MessageState::Sent,
            };
        }
        self.state
    }

    /// Offer an inbound acknowledgement to a sent normal request.
    pub fn acknowledge(&mut self, ack: &MessageHeader) -> MessageState {
        let matches = ack.msg_type() == Ok(MessageType::Acknowledgement) && ack.token == self.token;
        if self.state == MessageState::Sent && matches {
            self.state = MessageState::Acknowledged;
        }
        self.state
    }

    /// The wait for an acknowledgement ended without one.
    pub fn fail(&mut self) -> MessageState {
        if !self.state.is_terminal() {
            self.state = MessageState::Failed;
        }
        self.state
    }
}
