//! Service groups and their service ids.

/// Service group ids.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u16)]
pub enum ServiceGroup {
    Base = 0x0001,
    SystemReset = 0x0002,
    SystemSuspend = 0x0003,
    Hsm = 0x0004,
    Cppc = 0x0005,
    Clock = 0x0007,
    Ras = 0x0008,
}

impl ServiceGroup {
    pub const fn id(self) -> u16 {
        self as u16
    }

    pub const fn from_id(id: u16) -> Option<Self> {
        Some(match id {
            0x0001 => Self::Base,
            0x0002 => Self::SystemReset,
            0x0003 => Self::SystemSuspend,
            0x0004 => Self::Hsm,
            0x0005 => Self::Cppc,
            0x0007 => Self::Clock,
            0x0008 => Self::Ras,
            _ => return None,
        })
    }
}

pub mod base {
    pub const ENABLE_NOTIFICATION: u8 = 0x01;
    pub const GET_IMPLEMENTATION_VERSION: u8 = 0x02;
    pub const GET_IMPLEMENTATION_IDN: u8 = 0x03;
    pub const GET_SPEC_VERSION: u8 = 0x04;
    pub const GET_HW_INFO: u8 = 0x05;
    pub const PROBE_SERVICE_GROUP: u8 = 0x06;
    pub const GET_ATTRIBUTES: u8 = 0x07;
    pub const SET_MSI: u8 = 0x08;

    /// `GET_ATTRIBUTES` f0 bits.
    pub const FLAGS_F0_EV_NOTIFY: u32 = 1 << 31;
    pub const FLAGS_F0_MSI_EN: u32 = 1 << 30;
}

pub mod system_reset {
    pub const ENABLE_NOTIFICATION: u8 = 0x01;
    pub const GET_ATTRIBUTES: u8 = 0x02;
    pub const SYSTEM_RESET: u8 = 0x03;

    pub const SHUTDOWN: u32 = 0;
    pub const COLD_RESET: u32 = 1;
    pub const WARM_RESET: u32 = 2;

    pub const FLAGS_SUPPORTED: u32 = 1 << 31;
}

pub mod system_suspend {
    pub const ENABLE_NOTIFICATION: u8 = 0x01;
    pub const GET_ATTRIBUTES: u8 = 0x02;
    pub const SYSTEM_SUSPEND: u8 = 0x03;

    pub const FLAGS_CUSTOM_RESUME_ADDR_SUPPORTED: u32 = 1 << 31;
    pub const FLAGS_SUPPORTED: u32 = 1 << 30;
}

pub mod hsm {
    pub const ENABLE_NOTIFICATION: u8 = 0x01;
    pub const HART_START: u8 = 0x02;
    pub const HART_STOP: u8 = 0x03;
    pub const HART_SUSPEND: u8 = 0x04;
    pub const GET_HART_STATUS: u8 = 0x05;
    pub const GET_HART_LIST: u8 = 0x06;
    pub const GET_SUSPEND_TYPES: u8 = 0x07;
    pub const GET_SUSPEND_INFO: u8 = 0x08;

    pub const FLAGS_LOCAL_TIME_STOP: u32 = 1 << 31;
}

pub mod cppc {
    pub const ENABLE_NOTIFICATION: u8 = 0x01;
    pub const PROBE_REG: u8 = 0x02;
    pub const READ_REG: u8 = 0x03;
    pub const WRITE_REG: u8 = 0x04;
    pub const GET_FAST_CHANNEL_REGION: u8 = 0x05;
    pub const GET_FAST_CHANNEL_OFFSET: u8 = 0x06;
    pub const GET_HART_LIST: u8 = 0x07;
}

pub mod clock {
    pub const ENABLE_NOTIFICATION: u8 = 0x01;
    pub const GET_NUM_CLOCKS: u8 = 0x02;
    pub const GET_ATTRIBUTES: u8 = 0x03;
    pub const GET_SUPPORTED_RATES: u8 = 0x04;
    pub const SET_CONFIG: u8 = 0x05;
    pub const GET_CONFIG: u8 = 0x06;
    pub const SET_RATE: u8 = 0x07;
    pub const GET_RATE: u8 = 0x08;

    pub const CONFIG_ENABLE: u32 = 1 << 0;

    pub const SET_RATE_ROUND_DOWN: u32 = 0;
    pub const SET_RATE_ROUND_UP: u32 = 1;
    pub const SET_RATE_ROUND_PLAT: u32 = 2;
}

pub mod ras {
    pub const PROBE: u8 = 0x01;
    pub const SYNC_HART_ERR: u8 = 0x02;
    pub const SYNC_DEV_ERR: u8 = 0x03;
}
