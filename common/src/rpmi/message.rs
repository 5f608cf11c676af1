//! RPMI message envelope.
//!
//! Every message on the wire starts with the same 8-byte header:
//!
//! ```text
//! 31                                            0
//! +---------------------+-----------------------+
//! | FLAGS | SERVICE_ID  |   SERVICEGROUP_ID     |
//! +---------------------+-----------------------+
//! |        TOKEN        |     DATA LENGTH       |
//! +---------------------+-----------------------+
//! |                 DATA/PAYLOAD                |
//! +---------------------------------------------+
//! ```
//!
//! Multi-byte fields are little-endian regardless of the host.

use super::error::ProtocolError;

/// Message header size in bytes.
pub const HDR_SIZE: usize = 8;

/// Byte offsets of the header fields.
pub const SERVICEGROUP_ID_OFFSET: usize = 0;
pub const SERVICE_ID_OFFSET: usize = 2;
pub const FLAGS_OFFSET: usize = 3;
pub const DATALEN_OFFSET: usize = 4;
pub const TOKEN_OFFSET: usize = 6;
/// Payload starts right after the header.
pub const DATA_OFFSET: usize = HDR_SIZE;

/// Message type occupies bits 0..=2 of the flags byte.
pub const FLAGS_TYPE_MASK: u8 = 0x7;
/// Doorbell request is bit 3 of the flags byte.
pub const FLAGS_DOORBELL: u8 = 1 << 3;

pub const TOKEN_MASK: u32 = 0xffff;

/// Minimum slot size in bytes.
pub const SLOT_SIZE_MIN: usize = 64;

/// Default transfer timeouts (milliseconds).
pub const DEFAULT_TX_TIMEOUT: u64 = 20;
pub const DEFAULT_RX_TIMEOUT: u64 = 20;

/// Payload capacity of a slot of `slot_size` bytes.
pub const fn data_size(slot_size: usize) -> usize {
    slot_size - HDR_SIZE
}

/// Mask a sequence number down to a wire token.
#[inline]
pub const fn token_from_seq(seq: u32) -> u16 {
    (seq & TOKEN_MASK) as u16
}

/// RPMI message types.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    /// Request backed by an acknowledgement.
    NormalRequest = 0,
    /// Request without any acknowledgement.
    PostedRequest = 1,
    /// Acknowledgement for a normal request.
    Acknowledgement = 2,
    /// Unsolicited message from the platform.
    Notification = 3,
}

impl TryFrom<u8> for MessageType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NormalRequest),
            1 => Ok(Self::PostedRequest),
            2 => Ok(Self::Acknowledgement),
            3 => Ok(Self::Notification),
            other => Err(ProtocolError::UnknownMessageType(other)),
        }
    }
}

/// Decoded message header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub servicegroup_id: u16,
    pub service_id: u8,
    /// Raw flags byte: type in bits 0..=2, doorbell in bit 3.
    pub flags: u8,
    /// Payload length in bytes.
    pub datalen: u16,
    pub token: u16,
}

impl MessageHeader {
    pub const fn new(
        servicegroup_id: u16,
        service_id: u8,
        msg_type: MessageType,
        datalen: u16,
        token: u16,
    ) -> Self {
        Self {
            servicegroup_id,
            service_id,
            flags: msg_type as u8,
            datalen,
            token,
        }
    }

    /// Set or clear the doorbell request bit.
    pub const fn with_doorbell(mut self, doorbell: bool) -> Self {
        if doorbell {
            self.flags |= FLAGS_DOORBELL;
        } else {
            self.flags &= !FLAGS_DOORBELL;
        }
        self
    }

    pub fn msg_type(&self) -> Result<MessageType, ProtocolError> {
        MessageType::try_from(self.flags & FLAGS_TYPE_MASK)
    }

    pub const fn doorbell(&self) -> bool {
        self.flags & FLAGS_DOORBELL != 0
    }

    /// Write the header into the first [`HDR_SIZE`] bytes of `buf`.
    pub fn write(&self, buf: &mut [u8]) -> Result<(), ProtocolError> {
        let hdr = buf.get_mut(..HDR_SIZE).ok_or(ProtocolError::TooShort)?;
        hdr[SERVICEGROUP_ID_OFFSET..SERVICE_ID_OFFSET]
            .copy_from_slice(&self.servicegroup_id.to_le_bytes());
        hdr[SERVICE_ID_OFFSET] = self.service_id;
        hdr[FLAGS_OFFSET] = self.flags;
        hdr[DATALEN_OFFSET..TOKEN_OFFSET].copy_from_slice(&self.datalen.to_le_bytes());
        hdr[TOKEN_OFFSET..HDR_SIZE].copy_from_slice(&self.token.to_le_bytes());
        Ok(())
    }

    /// Read a header from the first [`HDR_SIZE`] bytes of `buf`.
    pub fn read(buf: &[u8]) -> Result<Self, ProtocolError> {
        let hdr = buf.get(..HDR_SIZE).ok_or(ProtocolError::TooShort)?;
        Ok(Self {
            servicegroup_id: u16::from_le_bytes([hdr[0], hdr[1]]),
            service_id: hdr[SERVICE_ID_OFFSET],
            flags: hdr[FLAGS_OFFSET],
            datalen: u16::from_le_bytes([hdr[4], hdr[5]]),
            token: u16::from_le_bytes([hdr[6], hdr[7]]),
        })
    }
}

/// Encode a full message into `buf`.
///
/// `header.datalen` is overwritten with the payload length. Returns the number
/// of bytes written (header plus payload).
pub fn encode(
    header: &MessageHeader,
    payload: &[u8],
    buf: &mut [u8],
) -> Result<usize, ProtocolError> {
    let total = HDR_SIZE + payload.len();
    if buf.len() < HDR_SIZE {
        return Err(ProtocolError::TooShort);
    }
    if total > buf.len() || payload.len() > u16::MAX as usize {
        return Err(ProtocolError::PayloadTooLarge);
    }

    let header = MessageHeader {
        datalen: payload.len() as u16,
        ..*header
    };
    header.write(buf)?;
    buf[DATA_OFFSET..total].copy_from_slice(payload);
    Ok(total)
}

/// Decode a message, borrowing the payload from `buf`.
pub fn decode(buf: &[u8]) -> Result<(MessageHeader, &[u8]), ProtocolError> {
    let header = MessageHeader::read(buf)?;
    let end = DATA_OFFSET + header.datalen as usize;
    let payload = buf
        .get(DATA_OFFSET..end)
        .ok_or(ProtocolError::LengthOverflow)?;
    Ok((header, payload))
}
