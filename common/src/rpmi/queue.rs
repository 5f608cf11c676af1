//! Shared-memory queue layout.
//!
//! A queue is an array of fixed-size slots. Slot 0 holds the head index,
//! slot 1 the tail index (each a little-endian `u32` at the start of its
//! slot); message slots follow. Head and tail index message slots, so they
//! range over `0..msg_slots()`.

use super::error::ProtocolError;
use super::message::SLOT_SIZE_MIN;

pub const HEAD_SLOT: usize = 0;
pub const TAIL_SLOT: usize = 1;
pub const HEADER_SLOTS: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueueLayout {
    slot_size: usize,
    slot_count: usize,
}

impl QueueLayout {
    /// Describe a queue of `slot_count` slots (header slots included) of
    /// `slot_size` bytes each.
    ///
    /// Returns `None` if the slot is smaller than [`SLOT_SIZE_MIN`], not a
    /// multiple of 4, or the queue has no room for at least two message slots.
    pub const fn new(slot_size: usize, slot_count: usize) -> Option<Self> {
        if slot_size < SLOT_SIZE_MIN || slot_size % 4 != 0 || slot_count < HEADER_SLOTS + 2 {
            return None;
        }
        Some(Self {
            slot_size,
            slot_count,
        })
    }

    pub const fn slot_size(&self) -> usize {
        self.slot_size
    }

    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Number of slots that carry messages.
    pub const fn msg_slots(&self) -> usize {
        self.slot_count - HEADER_SLOTS
    }

    /// Total bytes the queue occupies.
    pub const fn size_bytes(&self) -> usize {
        self.slot_size * self.slot_count
    }

    pub const fn head_offset(&self) -> usize {
        HEAD_SLOT * self.slot_size
    }

    pub const fn tail_offset(&self) -> usize {
        TAIL_SLOT * self.slot_size
    }

    /// Byte offset of message slot `index`.
    pub const fn msg_offset(&self, index: u32) -> usize {
        (HEADER_SLOTS + index as usize) * self.slot_size
    }

    /// Check an index read back from shared memory.
    pub fn check_index(&self, index: u32) -> Result<u32, ProtocolError> {
        if (index as usize) < self.msg_slots() {
            Ok(index)
        } else {
            Err(ProtocolError::InvalidQueueIndex(index))
        }
    }

    pub const fn next(&self, index: u32) -> u32 {
        ((index as usize + 1) % self.msg_slots()) as u32
    }

    pub const fn is_empty(&self, head: u32, tail: u32) -> bool {
        head == tail
    }

    /// One slot is always left unused so a full queue is distinguishable from
    /// an empty one.
    pub const fn is_full(&self, head: u32, tail: u32) -> bool {
        self.next(tail) == head
    }

    /// Messages currently queued.
    pub const fn len(&self, head: u32, tail: u32) -> usize {
        let n = self.msg_slots();
        (tail as usize + n - head as usize) % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_undersized_layouts() {
        assert!(QueueLayout::new(32, 8).is_none());
        assert!(QueueLayout::new(66, 8).is_none());
        assert!(QueueLayout::new(64, 3).is_none());
        assert!(QueueLayout::new(64, 4).is_some());
    }

    #[test]
    fn message_slots_follow_header_slots() {
        let layout = QueueLayout::new(64, 8).unwrap();
        assert_eq!(layout.head_offset(), 0);
        assert_eq!(layout.tail_offset(), 64);
        assert_eq!(layout.msg_offset(0), 128);
        assert_eq!(layout.msg_offset(5), 448);
        assert_eq!(layout.size_bytes(), 512);
        assert_eq!(layout.msg_slots(), 6);
    }

    #[test]
    fn ring_discipline() {
        let layout = QueueLayout::new(64, 6).unwrap();
        assert!(layout.is_empty(2, 2));
        assert!(!layout.is_full(2, 2));
        assert_eq!(layout.next(3), 0);
        // tail one behind head: full
        assert!(layout.is_full(0, 3));
        assert!(layout.is_full(2, 1));
        assert_eq!(layout.len(0, 3), 3);
        assert_eq!(layout.len(3, 1), 2);
    }

    #[test]
    fn indices_outside_message_slots_are_invalid() {
        let layout = QueueLayout::new(64, 6).unwrap();
        assert_eq!(layout.check_index(3), Ok(3));
        assert_eq!(
            layout.check_index(4),
            Err(ProtocolError::InvalidQueueIndex(4))
        );
    }
}
