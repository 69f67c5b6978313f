//! Portable aligned allocation by over-allocation and pointer offset.
//!
//! Layout of one block:
//!
//! ```text
//! base                      ptr - HEADER   ptr (aligned)
//! |<------ padding -------->|<- base ptr ->|<------ bytes ------>|
//! ```
//!
//! The request grows by `ALIGNMENT - 1 + HEADER` bytes. The returned pointer is
//! the first aligned address at or after `base + HEADER`, and the `HEADER`
//! bytes right below it hold `base` so `free` can find the real block.

use super::{AlignedAlloc, ALIGNMENT};
use std::alloc::{self, Layout};
use std::mem::{align_of, size_of};
use std::ptr::NonNull;

const HEADER: usize = size_of::<*mut u8>();

/// Offset-based fallback that only needs a byte allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetAligned;

impl OffsetAligned {
    fn base_layout(bytes: usize) -> Option<Layout> {
        let total = bytes
            .max(1)
            .checked_add(ALIGNMENT - 1)?
            .checked_add(HEADER)?;
        Layout::from_size_align(total, align_of::<*mut u8>()).ok()
    }

    /// Distance from `base` to the aligned user pointer.
    #[inline]
    fn user_offset(base: *mut u8) -> usize {
        let first = base as usize + HEADER;
        let misalign = first & (ALIGNMENT - 1);
        let pad = if misalign == 0 { 0 } else { ALIGNMENT - misalign };
        HEADER + pad
    }
}

impl AlignedAlloc for OffsetAligned {
    fn allocate(bytes: usize) -> Option<NonNull<u8>> {
        let layout = Self::base_layout(bytes)?;
        let base = unsafe { alloc::alloc(layout) };
        if base.is_null() {
            return None;
        }

        unsafe {
            let ptr = base.add(Self::user_offset(base));
            // ptr is 64-aligned and HEADER divides 64, so the slot below is aligned too.
            ptr.sub(HEADER).cast::<*mut u8>().write(base);
            NonNull::new(ptr)
        }
    }

    unsafe fn free(ptr: NonNull<u8>, bytes: usize) {
        let base = ptr.as_ptr().sub(HEADER).cast::<*mut u8>().read();
        if let Some(layout) = Self::base_layout(bytes) {
            alloc::dealloc(base, layout);
        }
    }
}
