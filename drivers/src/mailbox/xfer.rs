use bitflags::bitflags;
use common::rpmi::RpmiMessageArgs;
use common::rpmi::message::{DEFAULT_RX_TIMEOUT, DEFAULT_TX_TIMEOUT, token_from_seq};

bitflags! {
    /// Transfer descriptor flags.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct XferFlags: u32 {
        /// `seq` was chosen by the caller; the controller must not assign one.
        const SEQ = 1 << 0;
    }
}

/// One unit of work submitted to a channel.
///
/// Built per call and dropped once the transfer completes or fails.
/// Timeouts are in milliseconds.
#[derive(Debug)]
pub struct MboxXfer<'a> {
    pub args: RpmiMessageArgs,
    pub tx: &'a [u8],
    pub tx_timeout: u64,
    pub rx: &'a mut [u8],
    /// Bytes of `rx` filled by the backend.
    pub rx_len: usize,
    pub rx_timeout: u64,
    pub flags: XferFlags,
    pub seq: u32,
}

impl<'a> MboxXfer<'a> {
    pub fn new(args: RpmiMessageArgs, tx: &'a [u8], rx: &'a mut [u8]) -> Self {
        Self {
            args,
            tx,
            tx_timeout: DEFAULT_TX_TIMEOUT,
            rx,
            rx_len: 0,
            rx_timeout: DEFAULT_RX_TIMEOUT,
            flags: XferFlags::empty(),
            seq: 0,
        }
    }

    pub fn with_timeouts(mut self, tx_timeout: u64, rx_timeout: u64) -> Self {
        self.tx_timeout = tx_timeout;
        self.rx_timeout = rx_timeout;
        self
    }

    /// Pin the sequence number; the controller will leave it alone.
    pub fn with_sequence(mut self, seq: u32) -> Self {
        self.set_sequence(seq);
        self
    }

    pub fn set_sequence(&mut self, seq: u32) {
        self.seq = seq;
        self.flags |= XferFlags::SEQ;
    }

    pub fn has_sequence(&self) -> bool {
        self.flags.contains(XferFlags::SEQ)
    }

    /// Wire token derived from the sequence number.
    pub fn token(&self) -> u16 {
        token_from_seq(self.seq)
    }

    /// Payload received from the remote side.
    pub fn received(&self) -> &[u8] {
        &self.rx[..self.rx_len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_protocol_timeouts() {
        let xfer = MboxXfer::new(RpmiMessageArgs::normal(1), &[], &mut []);
        assert_eq!(xfer.tx_timeout, 20);
        assert_eq!(xfer.rx_timeout, 20);
        assert!(!xfer.has_sequence());
        assert!(xfer.received().is_empty());
    }

    #[test]
    fn preset_sequence_sets_flag_and_token() {
        let xfer = MboxXfer::new(RpmiMessageArgs::posted(2), &[1, 2], &mut []).with_sequence(0x0003_0010);
        assert!(xfer.has_sequence());
        assert_eq!(xfer.token(), 0x0010);
    }
}
