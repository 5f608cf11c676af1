use core::ptr::{NonNull, read_volatile, write_volatile};

/// A window of memory shared with the platform microcontroller.
///
/// Every access is volatile; the other side may change the contents at any
/// time.
#[derive(Debug)]
pub struct ShmemRegion {
    base: NonNull<u8>,
    size: usize,
}

// SAFETY: the region is plain memory; ordering between the two sides is
// handled by the queue protocol built on top.
unsafe impl Send for ShmemRegion {}
unsafe impl Sync for ShmemRegion {}

impl ShmemRegion {
    /// Wrap `size` bytes at `base`.
    ///
    /// # Safety
    ///
    /// - `base` must be 4-byte aligned and valid for reads and writes of
    ///   `size` bytes for as long as the region (and anything built on it)
    ///   lives
    /// - nothing else in this address space may hold a Rust reference to the
    ///   memory
    pub const unsafe fn new(base: NonNull<u8>, size: usize) -> Self {
        Self { base, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn base(&self) -> NonNull<u8> {
        self.base
    }

    #[inline]
    fn check(&self, offset: usize, len: usize) {
        assert!(
            offset.checked_add(len).is_some_and(|end| end <= self.size),
            "shmem access {offset:#x}+{len} outside {:#x}-byte region",
            self.size
        );
    }

    /// Read a little-endian word. `offset` must be 4-byte aligned.
    pub fn read_u32(&self, offset: usize) -> u32 {
        self.check(offset, 4);
        debug_assert_eq!(offset % 4, 0);
        // SAFETY: bounds checked above; alignment follows from the base
        // alignment contract.
        let raw = unsafe { read_volatile(self.base.as_ptr().add(offset) as *const u32) };
        u32::from_le(raw)
    }

    /// Write a little-endian word. `offset` must be 4-byte aligned.
    pub fn write_u32(&self, offset: usize, value: u32) {
        self.check(offset, 4);
        debug_assert_eq!(offset % 4, 0);
        unsafe { write_volatile(self.base.as_ptr().add(offset) as *mut u32, value.to_le()) }
    }

    pub fn read_bytes(&self, offset: usize, out: &mut [u8]) {
        self.check(offset, out.len());
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = unsafe { read_volatile(self.base.as_ptr().add(offset + i)) };
        }
    }

    pub fn write_bytes(&self, offset: usize, data: &[u8]) {
        self.check(offset, data.len());
        for (i, byte) in data.iter().enumerate() {
            unsafe { write_volatile(self.base.as_ptr().add(offset + i), *byte) };
        }
    }
}
