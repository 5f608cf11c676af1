use super::error::ProtocolError;

/// Status word carried as the first payload word of every response.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(i32)]
pub enum RpmiStatus {
    Success = 0,
    Failed = -1,
    NotSupported = -2,
    InvalidParam = -3,
    Denied = -4,
    NotFound = -5,
    OutOfRange = -6,
    OutOfResources = -7,
    HardwareFault = -8,
}

impl RpmiStatus {
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// `Ok(())` for success, the status itself otherwise.
    pub const fn into_result(self) -> Result<(), RpmiStatus> {
        match self {
            Self::Success => Ok(()),
            other => Err(other),
        }
    }
}

impl TryFrom<i32> for RpmiStatus {
    type Error = ProtocolError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => Self::Success,
            -1 => Self::Failed,
            -2 => Self::NotSupported,
            -3 => Self::InvalidParam,
            -4 => Self::Denied,
            -5 => Self::NotFound,
            -6 => Self::OutOfRange,
            -7 => Self::OutOfResources,
            -8 => Self::HardwareFault,
            other => return Err(ProtocolError::UnknownStatus(other)),
        })
    }
}

/// Read the status word at the start of a response payload.
pub fn read_status(payload: &[u8]) -> Result<RpmiStatus, ProtocolError> {
    let word = payload.get(..4).ok_or(ProtocolError::TooShort)?;
    RpmiStatus::try_from(i32::from_le_bytes([word[0], word[1], word[2], word[3]]))
}
