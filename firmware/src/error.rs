use drivers::mailbox::MailboxError;

/// Error codes returned to supervisor software.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SbiError {
    Failed,
    NotSupported,
    InvalidParam,
    Denied,
    InvalidAddress,
    AlreadyAvailable,
    NoDevice,
    NoSys,
    TimedOut,
    Io,
    NoMemory,
    NotFound,
}

impl SbiError {
    /// Signed wire value.
    pub const fn code(self) -> i32 {
        match self {
            SbiError::Failed => -1,
            SbiError::NotSupported => -2,
            SbiError::InvalidParam => -3,
            SbiError::Denied => -4,
            SbiError::InvalidAddress => -5,
            SbiError::AlreadyAvailable => -6,
            SbiError::NoDevice => -1000,
            SbiError::NoSys => -1001,
            SbiError::TimedOut => -1002,
            SbiError::Io => -1003,
            SbiError::NoMemory => -1006,
            SbiError::NotFound => -1008,
        }
    }
}

impl From<MailboxError> for SbiError {
    fn from(err: MailboxError) -> Self {
        match err {
            MailboxError::InvalidArgument | MailboxError::OutOfRange => SbiError::InvalidParam,
            MailboxError::AlreadyExists => SbiError::AlreadyAvailable,
            MailboxError::NoMemory => SbiError::NoMemory,
            MailboxError::NotSupported => SbiError::NotSupported,
            MailboxError::Timeout => SbiError::TimedOut,
            MailboxError::Failed => SbiError::Failed,
            MailboxError::Denied => SbiError::Denied,
            MailboxError::NotFound => SbiError::NotFound,
            MailboxError::HardwareFault => SbiError::Io,
        }
    }
}
