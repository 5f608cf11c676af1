use bitflags::bitflags;

use super::message::MessageType;

bitflags! {
    /// Per-message directionality suppressors.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct MsgArgsFlags: u32 {
        /// Nothing is transmitted.
        const NO_TX = 1 << 0;
        /// No acknowledgement is awaited.
        const NO_RX = 1 << 1;
        /// Accept the first acknowledgement regardless of its token.
        const NO_RX_TOKEN = 1 << 2;
    }
}

/// Message-level arguments carried by every transfer.
///
/// The caller fills `flags`, `msg_type` and `service_id`; the backend fills
/// `rx_token` and `rx_data_len` when an acknowledgement is received.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RpmiMessageArgs {
    pub flags: MsgArgsFlags,
    pub msg_type: MessageType,
    pub service_id: u8,
    pub rx_token: u16,
    pub rx_data_len: usize,
}

impl RpmiMessageArgs {
    /// Request that expects a correlated acknowledgement.
    pub const fn normal(service_id: u8) -> Self {
        Self {
            flags: MsgArgsFlags::empty(),
            msg_type: MessageType::NormalRequest,
            service_id,
            rx_token: 0,
            rx_data_len: 0,
        }
    }

    /// Fire-and-forget request.
    pub const fn posted(service_id: u8) -> Self {
        Self {
            flags: MsgArgsFlags::NO_RX,
            msg_type: MessageType::PostedRequest,
            service_id,
            rx_token: 0,
            rx_data_len: 0,
        }
    }

    pub const fn with_flags(mut self, flags: MsgArgsFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    pub const fn transmits(&self) -> bool {
        !self.flags.contains(MsgArgsFlags::NO_TX)
    }

    pub const fn receives(&self) -> bool {
        !self.flags.contains(MsgArgsFlags::NO_RX)
    }

    pub const fn checks_token(&self) -> bool {
        !self.flags.contains(MsgArgsFlags::NO_RX_TOKEN)
    }
}
