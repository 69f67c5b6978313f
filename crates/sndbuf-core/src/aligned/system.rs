//! Native aligned allocation through the global allocator.

use super::{AlignedAlloc, ALIGNMENT};
use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Aligned blocks straight from the global allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAligned;

impl SystemAligned {
    #[inline]
    fn layout(bytes: usize) -> Option<Layout> {
        Layout::from_size_align(bytes.max(1), ALIGNMENT).ok()
    }
}

impl AlignedAlloc for SystemAligned {
    fn allocate(bytes: usize) -> Option<NonNull<u8>> {
        let layout = Self::layout(bytes)?;
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    fn calloc(bytes: usize) -> Option<NonNull<u8>> {
        let layout = Self::layout(bytes)?;
        NonNull::new(unsafe { alloc::alloc_zeroed(layout) })
    }

    unsafe fn free(ptr: NonNull<u8>, bytes: usize) {
        if let Some(layout) = Self::layout(bytes) {
            alloc::dealloc(ptr.as_ptr(), layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligned::is_aligned;

    #[test]
    fn test_system_alignment() {
        for bytes in [0, 1, 3, 63, 64, 65, 4096, 100_003] {
            let ptr = SystemAligned::allocate(bytes).expect("allocation");
            assert!(is_aligned(ptr.as_ptr()), "size {}", bytes);
            unsafe { SystemAligned::free(ptr, bytes) };
        }
    }

    #[test]
    fn test_system_calloc_zeroed() {
        let bytes = 4099;
        let ptr = SystemAligned::calloc(bytes).expect("allocation");
        let data = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), bytes) };
        assert!(data.iter().all(|&b| b == 0));
        unsafe { SystemAligned::free(ptr, bytes) };
    }

    #[test]
    fn test_system_unrepresentable_size() {
        assert!(SystemAligned::allocate(usize::MAX).is_none());
    }
}
