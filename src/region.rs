//! Ownership of the pressure buffer: one contiguous allocation per process,
//! either requested at an exact size or grown until the allocator refuses.

use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

use thiserror::Error;

/// Word written by the fill pass; also the allocation alignment.
pub const WORD: usize = size_of::<u32>();

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("not enough memory for {requested} bytes")]
    Exhausted { requested: usize },
    #[error("cannot lay out an allocation of {requested} bytes")]
    Layout { requested: usize },
}

/// The single contiguous buffer this process leans on the host with.
///
/// Address and length are final once acquisition returns; the buffer is
/// released exactly once, when the region is dropped.
pub struct Region {
    ptr: NonNull<u8>,
    len: usize,
}

impl Region {
    pub const fn empty() -> Self {
        Region {
            ptr: NonNull::dangling(),
            len: 0,
        }
    }

    /// One-shot allocation of exactly `bytes` bytes.
    ///
    /// The allocator hands the block back zeroed, so every byte is defined
    /// before any fill pass runs. Physical pages are still only committed
    /// once something writes to them.
    pub fn exact(bytes: usize) -> Result<Self, AcquireError> {
        if bytes == 0 {
            return Ok(Self::empty());
        }
        let layout = Self::layout(bytes)?;
        match NonNull::new(unsafe { alloc::alloc_zeroed(layout) }) {
            Some(ptr) => Ok(Region { ptr, len: bytes }),
            None => Err(AcquireError::Exhausted { requested: bytes }),
        }
    }

    /// Growth-to-failure: enlarge the buffer by `chunk` bytes at a time and
    /// keep the last size the allocator accepted.
    ///
    /// Reallocation leaves the old block valid when it fails, so a refused
    /// step costs nothing and the previous size stays owned. When not even
    /// one chunk can be had, the region comes back empty.
    pub fn greedy(chunk: usize) -> Self {
        if chunk == 0 {
            return Self::empty();
        }
        let Ok(first) = Self::layout(chunk) else {
            return Self::empty();
        };
        let Some(mut ptr) = NonNull::new(unsafe { alloc::alloc_zeroed(first) }) else {
            return Self::empty();
        };

        let len = grow_to_failure(chunk, chunk, |current, next| {
            let Ok(layout) = Self::layout(current) else {
                return false;
            };
            match NonNull::new(unsafe { alloc::realloc(ptr.as_ptr(), layout, next) }) {
                Some(moved) => {
                    ptr = moved;
                    true
                }
                None => false,
            }
        });

        Region { ptr, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Write one word at `offset`. The word must fit entirely below `len`.
    pub fn write_word(&mut self, offset: usize, value: u32) {
        assert!(offset + WORD <= self.len, "word write past region end");
        unsafe {
            self.ptr
                .as_ptr()
                .add(offset)
                .cast::<u32>()
                .write_unaligned(value);
        }
    }

    /// Read back one word at `offset`.
    pub fn read_word(&self, offset: usize) -> u32 {
        assert!(offset + WORD <= self.len, "word read past region end");
        unsafe { self.ptr.as_ptr().add(offset).cast::<u32>().read_unaligned() }
    }

    /// Zero the whole region in one pass.
    pub fn zero(&mut self) {
        if self.len > 0 {
            unsafe { ptr::write_bytes(self.ptr.as_ptr(), 0, self.len) };
        }
    }

    /// Borrow the region's contents.
    ///
    /// Exact regions are zeroed on acquisition, so every byte is defined;
    /// a greedily grown region is only defined where a fill pass has
    /// written.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn layout(bytes: usize) -> Result<Layout, AcquireError> {
        Layout::from_size_align(bytes, WORD).map_err(|_| AcquireError::Layout { requested: bytes })
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        if let Ok(layout) = Self::layout(self.len) {
            unsafe { alloc::dealloc(self.ptr.as_ptr(), layout) };
        }
    }
}

/// The growth schedule behind [`Region::greedy`], factored out so the
/// arithmetic can be exercised without exhausting host memory.
///
/// Starting from `start` already-owned bytes, keep proposing `next =
/// current + chunk` to `try_grow` and commit each accepted size. Returns
/// the last accepted size, which is what remains owned after the first
/// refusal, or after the byte counter would overflow.
pub fn grow_to_failure(
    start: usize,
    chunk: usize,
    mut try_grow: impl FnMut(usize, usize) -> bool,
) -> usize {
    debug_assert!(chunk > 0);
    let mut size = start;
    loop {
        let Some(next) = size.checked_add(chunk) else {
            return size;
        };
        if !try_grow(size, next) {
            return size;
        }
        size = next;
    }
}
