use common::rpmi::{ProtocolError, RpmiStatus};

/// Mailbox errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MailboxError {
    /// Missing or malformed argument, detached channel, or a framing error.
    InvalidArgument,
    /// A controller with the same id is already registered.
    AlreadyExists,
    /// Backend could not allocate state for a new channel.
    NoMemory,
    /// Operation not provided by this backend or the remote side.
    NotSupported,
    /// No space to transmit, or no acknowledgement, before the timeout.
    Timeout,
    /// Generic failure.
    Failed,
    /// Remote side refused the request.
    Denied,
    /// Remote side does not know the addressed entity.
    NotFound,
    /// Remote side rejected a parameter as out of range.
    OutOfRange,
    /// Shared state read back from hardware is inconsistent.
    HardwareFault,
}

impl From<ProtocolError> for MailboxError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::InvalidQueueIndex(_) => MailboxError::HardwareFault,
            _ => MailboxError::InvalidArgument,
        }
    }
}

/// Interpret the status word of a response.
///
/// Transfers never call this themselves; only the `*_with_status` request
/// helpers do.
pub fn check_status(raw: i32) -> Result<(), MailboxError> {
    let status = RpmiStatus::try_from(raw).map_err(|_| MailboxError::Failed)?;
    status.into_result().map_err(|status| match status {
        RpmiStatus::NotSupported => MailboxError::NotSupported,
        RpmiStatus::InvalidParam => MailboxError::InvalidArgument,
        RpmiStatus::Denied => MailboxError::Denied,
        RpmiStatus::NotFound => MailboxError::NotFound,
        RpmiStatus::OutOfRange => MailboxError::OutOfRange,
        RpmiStatus::OutOfResources => MailboxError::NoMemory,
        RpmiStatus::HardwareFault => MailboxError::HardwareFault,
        RpmiStatus::Success | RpmiStatus::Failed => MailboxError::Failed,
    })
}
