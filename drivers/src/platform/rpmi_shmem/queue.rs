//! One shared-memory message queue.
//!
//! Each side only ever writes one index: the producer advances the tail, the
//! consumer advances the head.

use core::sync::atomic::{Ordering, fence};

use common::rpmi::QueueLayout;

use crate::hw::shmem::ShmemRegion;
use crate::mailbox::MailboxError;

#[derive(Debug)]
pub struct ShmemQueue {
    region: ShmemRegion,
    layout: QueueLayout,
}

impl ShmemQueue {
    pub fn new(region: ShmemRegion, layout: QueueLayout) -> Result<Self, MailboxError> {
        if region.size() < layout.size_bytes() {
            return Err(MailboxError::InvalidArgument);
        }
        Ok(Self { region, layout })
    }

    pub fn layout(&self) -> &QueueLayout {
        &self.layout
    }

    /// Mark the queue empty. Only the side that owns queue setup does this.
    pub fn reset(&mut self) {
        self.region.write_u32(self.layout.head_offset(), 0);
        self.region.write_u32(self.layout.tail_offset(), 0);
        fence(Ordering::SeqCst);
    }

    fn head(&self) -> Result<u32, MailboxError> {
        let head = self.region.read_u32(self.layout.head_offset());
        Ok(self.layout.check_index(head)?)
    }

    fn tail(&self) -> Result<u32, MailboxError> {
        let tail = self.region.read_u32(self.layout.tail_offset());
        Ok(self.layout.check_index(tail)?)
    }

    pub fn is_empty(&self) -> Result<bool, MailboxError> {
        Ok(self.layout.is_empty(self.head()?, self.tail()?))
    }

    pub fn len(&self) -> Result<usize, MailboxError> {
        Ok(self.layout.len(self.head()?, self.tail()?))
    }

    /// Copy `msg` into the next free slot. Returns `false` if the queue is full.
    pub fn push(&mut self, msg: &[u8]) -> Result<bool, MailboxError> {
        if msg.len() > self.layout.slot_size() {
            return Err(MailboxError::InvalidArgument);
        }

        let head = self.head()?;
        let tail = self.tail()?;
        if self.layout.is_full(head, tail) {
            return Ok(false);
        }

        self.region.write_bytes(self.layout.msg_offset(tail), msg);
        // Slot contents must be visible before the new tail
        fence(Ordering::Release);
        self.region
            .write_u32(self.layout.tail_offset(), self.layout.next(tail));

        Ok(true)
    }

    /// Copy the oldest slot into `out` and release it. Returns `false` if the
    /// queue is empty.
    ///
    /// `out` must hold a whole slot.
    pub fn pop(&mut self, out: &mut [u8]) -> Result<bool, MailboxError> {
        let slot_size = self.layout.slot_size();
        let out = out.get_mut(..slot_size).ok_or(MailboxError::InvalidArgument)?;

        let head = self.head()?;
        let tail = self.tail()?;
        if self.layout.is_empty(head, tail) {
            return Ok(false);
        }

        fence(Ordering::Acquire);
        self.region.read_bytes(self.layout.msg_offset(head), out);
        fence(Ordering::Release);
        self.region
            .write_u32(self.layout.head_offset(), self.layout.next(head));

        Ok(true)
    }
}
