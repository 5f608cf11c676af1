//! Firmware mailbox subsystem context.
//!
//! Everything the subsystem owns lives in one [`Firmware`] value created by
//! the boot path and handed to each feature's cold init.

use drivers::mailbox::Registry;

#[cfg(feature = "ras")]
use alloc::sync::Arc;

#[cfg(feature = "ras")]
use crate::binding::{self, BindingResolver, ConsumerDesc};
#[cfg(feature = "ras")]
use crate::ras::{Ras, RpmiRasAgent};

pub struct Firmware {
    registry: Registry,
    #[cfg(feature = "ras")]
    ras: Ras,
}

impl Firmware {
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
            #[cfg(feature = "ras")]
            ras: Ras::new(),
        }
    }

    /// Controllers are registered here by the platform code.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[cfg(feature = "ras")]
    pub fn ras(&self) -> &Ras {
        &self.ras
    }

    /// Bind the RPMI RAS agent.
    ///
    /// A platform without a RAS binding, or whose controller refuses the
    /// channel, simply has no RAS service; that is not an error.
    #[cfg(feature = "ras")]
    pub fn ras_cold_init(
        &self,
        resolver: &dyn BindingResolver,
        desc: &ConsumerDesc<'_>,
        current_hart: fn() -> u32,
    ) {
        let chan = match binding::request_channel(&self.registry, resolver, desc) {
            Ok(chan) => chan,
            Err(err) => {
                log::info!("ras: no channel for {}#{}: {:?}", desc.name, desc.index, err);
                return;
            }
        };

        self.ras
            .set_agent(Arc::new(RpmiRasAgent::new(chan, current_hart)));
    }

    /// Drop every agent, then every controller with its channels.
    pub fn teardown(&self) {
        #[cfg(feature = "ras")]
        self.ras.clear_agent();

        self.registry.clear();
        log::debug!("firmware: mailbox subsystem torn down");
    }
}

impl Default for Firmware {
    fn default() -> Self {
        Self::new()
    }
}
