/// Framing and codec failures.
///
/// A message that fails to decode is discarded whole; no partially parsed
/// envelope is ever handed to a caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer is shorter than the fixed message header.
    TooShort,
    /// Header `datalen` runs past the end of the buffer.
    LengthOverflow,
    /// Payload does not fit in the destination buffer or slot.
    PayloadTooLarge,
    /// Message type bits hold a value outside the defined types.
    UnknownMessageType(u8),
    /// Status word holds a value outside the defined status codes.
    UnknownStatus(i32),
    /// Queue head/tail index outside the queue's message slots.
    InvalidQueueIndex(u32),
}
