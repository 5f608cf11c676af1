//! RAS agent backed by the RPMI RAS service group.

use alloc::sync::Arc;

use common::rpmi::payload::{NoPayload, RasProbeResp, RasSyncErrResp, RasSyncHartErrReq};
use common::rpmi::service::ras;
use drivers::mailbox::Channel;
use drivers::rpmi::normal_request_with_status;

use super::{RasAgent, RasCaps};
use crate::SbiError;

pub struct RpmiRasAgent {
    chan: Arc<Channel>,
    current_hart: fn() -> u32,
}

impl RpmiRasAgent {
    /// `current_hart` reports the id of the hart making a call.
    pub fn new(chan: Arc<Channel>, current_hart: fn() -> u32) -> Self {
        Self { chan, current_hart }
    }

    pub fn channel(&self) -> &Arc<Channel> {
        &self.chan
    }
}

impl RasAgent for RpmiRasAgent {
    fn name(&self) -> &str {
        "rpmi-ras-agent"
    }

    fn capabilities(&self) -> RasCaps {
        RasCaps::all()
    }

    fn probe(&self) -> Result<(), SbiError> {
        let resp: RasProbeResp = normal_request_with_status(&self.chan, ras::PROBE, &NoPayload)?;
        log::debug!("ras: platform service version {:#x}", resp.version);
        Ok(())
    }

    fn sync_hart_errs(&self, pending: &mut [u32]) -> Result<usize, SbiError> {
        let req = RasSyncHartErrReq {
            hart_id: (self.current_hart)(),
        };
        let resp: RasSyncErrResp =
            normal_request_with_status(&self.chan, ras::SYNC_HART_ERR, &req)?;

        let vectors = resp.entries();
        let n = vectors.len().min(pending.len());
        if n < vectors.len() {
            log::warn!(
                "ras: hart {} has {} pending vectors, room for {}",
                req.hart_id,
                vectors.len(),
                pending.len()
            );
        }
        pending[..n].copy_from_slice(&vectors[..n]);
        Ok(n)
    }

    /// Device errors are reported by the platform on its own.
    fn sync_dev_errs(&self, _pending: &mut [u32]) -> Result<usize, SbiError> {
        Ok(0)
    }
}
