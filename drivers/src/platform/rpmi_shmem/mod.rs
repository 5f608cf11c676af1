//! RPMI Shared-Memory Transport
//!
//! Messages travel through fixed-slot ring buffers in memory shared with the
//! platform microcontroller:
//! - A2P request queue: requests from this side (mandatory)
//! - P2A acknowledgement queue: replies to normal requests (mandatory)
//! - P2A request queue: notifications from the platform (optional)
//!
//! # Channel Arguments
//!
//! - `args[0]`: service group id
//! - `args[1]`: minimum service group version (informational)

pub mod queue;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use common::rpmi::message::{self, data_size};
use common::rpmi::{MessageHeader, MessageState, MessageType, QueueLayout, Transaction};
use common::sync::IrqSpinLock;

use self::queue::ShmemQueue;
use crate::hal::doorbell::Doorbell;
use crate::hal::mailbox::MailboxController;
use crate::hal::timer::{Clock, poll_timeout};
use crate::hw::shmem::ShmemRegion;
use crate::mailbox::{ChanArgs, Channel, ChannelInfo, MailboxError, MboxXfer};

/// Transport configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShmemConfig {
    /// Bytes per slot, header slots included.
    pub slot_size: usize,
    /// Slots per queue, header slots included.
    pub queue_slots: usize,
    /// Set the doorbell-request bit on outgoing messages.
    pub request_doorbell: bool,
}

impl ShmemConfig {
    pub fn layout(&self) -> Result<QueueLayout, MailboxError> {
        QueueLayout::new(self.slot_size, self.queue_slots).ok_or(MailboxError::InvalidArgument)
    }
}

impl Default for ShmemConfig {
    /// 64-byte slots, 16 slots per queue, no doorbell request.
    fn default() -> Self {
        Self {
            slot_size: message::SLOT_SIZE_MIN,
            queue_slots: 16,
            request_doorbell: false,
        }
    }
}

/// Memory backing each queue.
#[derive(Debug)]
pub struct ShmemRegions {
    pub a2p_req: ShmemRegion,
    pub p2a_ack: ShmemRegion,
    pub p2a_req: Option<ShmemRegion>,
}

/// A queue plus a slot-sized staging buffer, locked together.
struct Port {
    queue: ShmemQueue,
    slot: Vec<u8>,
}

impl Port {
    fn new(region: ShmemRegion, layout: QueueLayout) -> Result<IrqSpinLock<Self>, MailboxError> {
        Ok(IrqSpinLock::new(Self {
            queue: ShmemQueue::new(region, layout)?,
            slot: vec![0; layout.slot_size()],
        }))
    }
}

/// An inbound notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Notification {
    pub header: MessageHeader,
    /// Payload bytes copied to the caller's buffer.
    pub len: usize,
}

impl Notification {
    pub fn state(&self) -> MessageState {
        Transaction::notification(self.header.token).state()
    }
}

/// RPMI shared-memory mailbox backend.
pub struct RpmiShmem {
    name: &'static str,
    config: ShmemConfig,
    layout: QueueLayout,
    a2p_req: IrqSpinLock<Port>,
    p2a_ack: IrqSpinLock<Port>,
    p2a_req: Option<IrqSpinLock<Port>>,
    doorbell: Option<Box<dyn Doorbell>>,
    clock: Arc<dyn Clock>,
}

impl RpmiShmem {
    /// Create the backend over already-initialised queues.
    ///
    /// Fails with [`MailboxError::InvalidArgument`] if the configuration is
    /// not a valid queue layout or a region is too small for it.
    pub fn new(
        name: &'static str,
        config: ShmemConfig,
        regions: ShmemRegions,
        doorbell: Option<Box<dyn Doorbell>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, MailboxError> {
        let layout = config.layout()?;

        Ok(Self {
            name,
            config,
            layout,
            a2p_req: Port::new(regions.a2p_req, layout)?,
            p2a_ack: Port::new(regions.p2a_ack, layout)?,
            p2a_req: regions
                .p2a_req
                .map(|region| Port::new(region, layout))
                .transpose()?,
            doorbell,
            clock,
        })
    }

    pub fn config(&self) -> &ShmemConfig {
        &self.config
    }

    pub fn max_payload(&self) -> usize {
        data_size(self.layout.slot_size())
    }

    fn send(&self, servicegroup_id: u16, xfer: &MboxXfer<'_>) -> Result<(), MailboxError> {
        let tx = xfer.tx;
        if tx.len() > self.max_payload() {
            return Err(MailboxError::InvalidArgument);
        }

        let header = MessageHeader::new(
            servicegroup_id,
            xfer.args.service_id,
            xfer.args.msg_type,
            0,
            xfer.token(),
        )
        .with_doorbell(self.config.request_doorbell);

        let queued = poll_timeout(&*self.clock, xfer.tx_timeout, || -> Result<_, MailboxError> {
            let mut port = self.a2p_req.lock();
            let Port { queue, slot } = &mut *port;
            let len = message::encode(&header, tx, slot)?;
            Ok(queue.push(&slot[..len])?.then_some(()))
        })?;

        if queued.is_none() {
            log::warn!("{}: request queue full, token={:#06x}", self.name, header.token);
            return Err(MailboxError::Timeout);
        }

        if let Some(doorbell) = &self.doorbell {
            doorbell.ring();
        }

        Ok(())
    }

    fn receive(&self, xfer: &mut MboxXfer<'_>) -> Result<(), MailboxError> {
        let token = xfer.token();
        let check_token = xfer.args.checks_token();
        let rx = &mut *xfer.rx;

        let received = poll_timeout(&*self.clock, xfer.rx_timeout, || -> Result<_, MailboxError> {
            let mut port = self.p2a_ack.lock();
            let Port { queue, slot } = &mut *port;

            while queue.pop(slot)? {
                let (header, payload) = message::decode(slot)?;

                if header.msg_type() != Ok(MessageType::Acknowledgement) {
                    log::warn!(
                        "{}: dropping non-ack message flags={:#04x} on ack queue",
                        self.name,
                        header.flags
                    );
                    continue;
                }
                if check_token && header.token != token {
                    log::warn!(
                        "{}: dropping stale ack token={:#06x}, waiting for {:#06x}",
                        self.name,
                        header.token,
                        token
                    );
                    continue;
                }

                let out = rx
                    .get_mut(..payload.len())
                    .ok_or(MailboxError::InvalidArgument)?;
                out.copy_from_slice(payload);
                return Ok(Some((header.token, payload.len())));
            }

            Ok(None)
        })?;

        let Some((rx_token, len)) = received else {
            log::warn!("{}: no ack for token={:#06x}", self.name, token);
            return Err(MailboxError::Timeout);
        };

        xfer.args.rx_token = rx_token;
        xfer.args.rx_data_len = len;
        xfer.rx_len = len;
        Ok(())
    }

    /// Take the next notification off the P2A request queue.
    ///
    /// Platform requests other than notifications are not serviced here and
    /// are dropped. Returns `Ok(None)` when nothing is pending or the
    /// transport has no P2A request queue.
    pub fn poll_notification(&self, buf: &mut [u8]) -> Result<Option<Notification>, MailboxError> {
        let Some(p2a_req) = &self.p2a_req else {
            return Ok(None);
        };

        let mut port = p2a_req.lock();
        let Port { queue, slot } = &mut *port;

        while queue.pop(slot)? {
            let (header, payload) = message::decode(slot)?;

            if header.msg_type() != Ok(MessageType::Notification) {
                log::warn!(
                    "{}: dropping unsupported platform request group={:#x} service={:#x}",
                    self.name,
                    header.servicegroup_id,
                    header.service_id
                );
                continue;
            }

            let out = buf
                .get_mut(..payload.len())
                .ok_or(MailboxError::InvalidArgument)?;
            out.copy_from_slice(payload);
            log::debug!(
                "{}: notification group={:#x} event={:#x}",
                self.name,
                header.servicegroup_id,
                header.service_id
            );
            return Ok(Some(Notification {
                header,
                len: payload.len(),
            }));
        }

        Ok(None)
    }
}

fn servicegroup_of(args: &ChanArgs) -> Result<u16, MailboxError> {
    match u16::try_from(args[0]) {
        Ok(0) | Err(_) => Err(MailboxError::InvalidArgument),
        Ok(id) => Ok(id),
    }
}

impl MailboxController for RpmiShmem {
    fn name(&self) -> &str {
        self.name
    }

    fn create_channel(&self, args: &ChanArgs) -> Result<ChannelInfo, MailboxError> {
        let servicegroup_id = servicegroup_of(args)?;

        if common::rpmi::ServiceGroup::from_id(servicegroup_id).is_none() {
            log::debug!("{}: unknown service group {:#x}", self.name, servicegroup_id);
        }

        Ok(ChannelInfo {
            max_xfer_len: self.max_payload(),
        })
    }

    fn exchange(&self, chan: &Channel, xfer: &mut MboxXfer<'_>) -> Result<(), MailboxError> {
        let servicegroup_id = servicegroup_of(chan.args())?;

        if xfer.args.transmits() {
            self.send(servicegroup_id, xfer)?;
        }

        if !xfer.args.receives() {
            return Ok(());
        }

        self.receive(xfer)
    }
}
