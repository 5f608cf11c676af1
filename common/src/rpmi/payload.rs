//! Request and response bodies.
//!
//! Every body is a sequence of little-endian 32-bit words. Responses start
//! with the signed status word.

use super::error::ProtocolError;
use super::message::{SLOT_SIZE_MIN, data_size};
use super::status::RpmiStatus;

/// Fixed-layout message body.
pub trait RpmiPayload: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Write the body into the start of `buf`.
    fn encode(&self, buf: &mut [u8]) -> Result<usize, ProtocolError>;

    /// Parse the body from the start of `buf`.
    fn decode(buf: &[u8]) -> Result<Self, ProtocolError>;
}

/// A response body whose first word is a status code.
pub trait RpmiResponse: RpmiPayload {
    fn status(&self) -> i32;
}

/// Empty body, for services that take no arguments.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NoPayload;

impl RpmiPayload for NoPayload {
    const SIZE: usize = 0;

    fn encode(&self, _buf: &mut [u8]) -> Result<usize, ProtocolError> {
        Ok(0)
    }

    fn decode(_buf: &[u8]) -> Result<Self, ProtocolError> {
        Ok(NoPayload)
    }
}

#[inline]
fn put_word(buf: &mut [u8], index: usize, value: u32) {
    buf[index * 4..index * 4 + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn get_word(buf: &[u8], index: usize) -> u32 {
    let w = &buf[index * 4..index * 4 + 4];
    u32::from_le_bytes([w[0], w[1], w[2], w[3]])
}

/// Word-typed field conversions used by [`rpmi_words!`].
pub trait Word: Copy {
    fn to_word(self) -> u32;
    fn from_word(word: u32) -> Self;
}

impl Word for u32 {
    fn to_word(self) -> u32 {
        self
    }

    fn from_word(word: u32) -> Self {
        word
    }
}

impl Word for i32 {
    fn to_word(self) -> u32 {
        self as u32
    }

    fn from_word(word: u32) -> Self {
        word as i32
    }
}

/// Define a body made only of 32-bit words.
///
/// A body declared with `status` as its first field also implements
/// [`RpmiResponse`].
#[macro_export]
macro_rules! rpmi_words {
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => { 1usize + $crate::rpmi_words!(@count $($tail)*) };

    (@response $name:ident status $($rest:ident)*) => {
        impl $crate::rpmi::payload::RpmiResponse for $name {
            fn status(&self) -> i32 {
                self.status
            }
        }
    };
    (@response $name:ident $($rest:ident)*) => {};

    ($(
        $(#[$meta:meta])*
        pub struct $name:ident { $(pub $field:ident: $ty:ty),* $(,)? }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: $ty),*
        }

        impl $crate::rpmi::payload::RpmiPayload for $name {
            const SIZE: usize = 4 * $crate::rpmi_words!(@count $($field)*);

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn encode(&self, buf: &mut [u8]) -> Result<usize, $crate::rpmi::ProtocolError> {
                if buf.len() < Self::SIZE {
                    return Err($crate::rpmi::ProtocolError::PayloadTooLarge);
                }
                let mut index = 0;
                $(
                    $crate::rpmi::payload::write_word(
                        buf,
                        index,
                        $crate::rpmi::payload::Word::to_word(self.$field),
                    );
                    index += 1;
                )*
                Ok(Self::SIZE)
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn decode(buf: &[u8]) -> Result<Self, $crate::rpmi::ProtocolError> {
                if buf.len() < Self::SIZE {
                    return Err($crate::rpmi::ProtocolError::TooShort);
                }
                let mut index = 0;
                $(
                    let $field = <$ty as $crate::rpmi::payload::Word>::from_word(
                        $crate::rpmi::payload::read_word(buf, index),
                    );
                    index += 1;
                )*
                Ok(Self { $($field),* })
            }
        }

        $crate::rpmi_words!(@response $name $($field)*);
    )*};
}

#[doc(hidden)]
pub fn write_word(buf: &mut [u8], index: usize, value: u32) {
    put_word(buf, index, value)
}

#[doc(hidden)]
pub fn read_word(buf: &[u8], index: usize) -> u32 {
    get_word(buf, index)
}

/// Entries in a list response sized to the minimum slot: the payload minus the
/// `status`, `remaining` and `returned` words.
pub const LIST_CAPACITY: usize = (data_size(SLOT_SIZE_MIN) - 3 * 4) / 4;

/// Paged list response (hart lists, suspend types, pending error vectors).
///
/// Only the first `returned` entries of `items` are meaningful.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ListResponse {
    pub status: i32,
    pub remaining: u32,
    pub returned: u32,
    pub items: [u32; LIST_CAPACITY],
}

impl Default for ListResponse {
    fn default() -> Self {
        Self {
            status: RpmiStatus::Success.as_raw(),
            remaining: 0,
            returned: 0,
            items: [0; LIST_CAPACITY],
        }
    }
}

impl ListResponse {
    /// Build a response from a slice of at most [`LIST_CAPACITY`] entries.
    pub fn from_items(items: &[u32], remaining: u32) -> Result<Self, ProtocolError> {
        if items.len() > LIST_CAPACITY {
            return Err(ProtocolError::PayloadTooLarge);
        }
        let mut resp = Self {
            remaining,
            returned: items.len() as u32,
            ..Self::default()
        };
        resp.items[..items.len()].copy_from_slice(items);
        Ok(resp)
    }

    /// The returned entries.
    pub fn entries(&self) -> &[u32] {
        let n = (self.returned as usize).min(LIST_CAPACITY);
        &self.items[..n]
    }
}

impl RpmiPayload for ListResponse {
    const SIZE: usize = (3 + LIST_CAPACITY) * 4;

    fn encode(&self, buf: &mut [u8]) -> Result<usize, ProtocolError> {
        let used = self.entries().len();
        let size = (3 + used) * 4;
        if buf.len() < size {
            return Err(ProtocolError::PayloadTooLarge);
        }
        put_word(buf, 0, self.status as u32);
        put_word(buf, 1, self.remaining);
        put_word(buf, 2, used as u32);
        for (i, item) in self.entries().iter().enumerate() {
            put_word(buf, 3 + i, *item);
        }
        Ok(size)
    }

    fn decode(buf: &[u8]) -> Result<Self, ProtocolError> {
        if buf.len() < 12 {
            return Err(ProtocolError::TooShort);
        }
        let returned = get_word(buf, 2);
        let count = returned as usize;
        if count > LIST_CAPACITY || buf.len() < (3 + count) * 4 {
            return Err(ProtocolError::LengthOverflow);
        }
        let mut resp = Self {
            status: get_word(buf, 0) as i32,
            remaining: get_word(buf, 1),
            returned,
            ..Self::default()
        };
        for i in 0..count {
            resp.items[i] = get_word(buf, 3 + i);
        }
        Ok(resp)
    }
}

impl RpmiResponse for ListResponse {
    fn status(&self) -> i32 {
        self.status
    }
}

pub type HsmHartListResp = ListResponse;
pub type HsmSuspendTypesResp = ListResponse;
pub type CppcHartListResp = ListResponse;
pub type RasSyncErrResp = ListResponse;

rpmi_words! {
    /// Response carrying only a status word.
    pub struct StatusResp { pub status: i32 }

    pub struct EnableNotificationReq { pub eventid: u32 }

    pub struct BaseProbeServiceGroupReq { pub servicegroup_id: u32 }
    pub struct BaseProbeServiceGroupResp { pub status: i32, pub version: u32 }

    pub struct BaseGetAttributesResp {
        pub status: i32,
        pub f0: u32,
        pub f1: u32,
        pub f2: u32,
        pub f3: u32,
    }

    pub struct SysRstGetAttributesReq { pub reset_type: u32 }
    pub struct SysRstGetAttributesResp { pub status: i32, pub flags: u32 }
    pub struct SysRstResetReq { pub reset_type: u32 }

    pub struct HsmHartStartReq {
        pub hartid: u32,
        pub start_addr_lo: u32,
        pub start_addr_hi: u32,
    }
    pub struct HsmHartStopReq { pub hartid: u32 }
    pub struct HsmHartSuspendReq {
        pub hartid: u32,
        pub suspend_type: u32,
        pub resume_addr_lo: u32,
        pub resume_addr_hi: u32,
    }
    pub struct HsmGetHartStatusReq { pub hartid: u32 }
    pub struct HsmGetHartStatusResp { pub status: i32, pub hart_status: u32 }
    pub struct HsmListReq { pub start_index: u32 }

    pub struct CppcReadRegReq { pub hart_id: u32, pub reg_id: u32 }
    pub struct CppcReadRegResp { pub status: i32, pub data_lo: u32, pub data_hi: u32 }
    pub struct CppcWriteRegReq {
        pub hart_id: u32,
        pub reg_id: u32,
        pub data_lo: u32,
        pub data_hi: u32,
    }

    pub struct ClockGetNumClocksResp { pub status: i32, pub num_clocks: u32 }
    pub struct ClockIdReq { pub clock_id: u32 }
    pub struct ClockSetConfigReq { pub clock_id: u32, pub config: u32 }
    pub struct ClockGetConfigResp { pub status: i32, pub config: u32 }
    pub struct ClockSetRateReq {
        pub clock_id: u32,
        pub flags: u32,
        pub clock_rate_low: u32,
        pub clock_rate_high: u32,
    }
    pub struct ClockGetRateResp {
        pub status: i32,
        pub clock_rate_low: u32,
        pub clock_rate_high: u32,
    }

    pub struct RasProbeResp { pub status: i32, pub version: u32 }
    pub struct RasSyncHartErrReq { pub hart_id: u32 }
}

impl ClockGetRateResp {
    pub const fn rate(&self) -> u64 {
        ((self.clock_rate_high as u64) << 32) | self.clock_rate_low as u64
    }
}

impl ClockSetRateReq {
    pub const fn new(clock_id: u32, flags: u32, rate: u64) -> Self {
        Self {
            clock_id,
            flags,
            clock_rate_low: rate as u32,
            clock_rate_high: (rate >> 32) as u32,
        }
    }
}

impl HsmHartStartReq {
    pub const fn new(hartid: u32, start_addr: u64) -> Self {
        Self {
            hartid,
            start_addr_lo: start_addr as u32,
            start_addr_hi: (start_addr >> 32) as u32,
        }
    }
}
