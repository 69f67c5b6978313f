//! Aligned heap allocation for sample memory.
//!
//! Every block handed out here starts on an [`ALIGNMENT`]-byte boundary, which
//! covers both the widest SIMD register in use and the cache-line size.
//!
//! Two strategies implement [`AlignedAlloc`]:
//!
//! - [`SystemAligned`]: the global allocator with an aligned layout (native path).
//! - [`OffsetAligned`]: over-allocate, align by hand and stash the base pointer in
//!   the word just below the returned address. Works anywhere a plain byte
//!   allocator exists.
//!
//! [`DefaultAllocator`] is picked at build time. Both strategies are always
//! compiled and tested, whichever one is the default.

mod buf;
mod offset;
mod system;

pub use buf::AlignedBuf;
pub use offset::OffsetAligned;
pub use system::SystemAligned;

use core::mem::size_of;
use core::ptr::NonNull;

/// Byte alignment of every block (64 = cache line, >= AVX-512 register).
pub const ALIGNMENT: usize = 64;

/// Allocation strategy for aligned raw memory.
///
/// Strategies are zero-sized marker types; all functions are associated.
pub trait AlignedAlloc {
    /// Allocate `bytes` bytes aligned to [`ALIGNMENT`].
    ///
    /// Returns `None` on exhaustion or when the request cannot be represented.
    /// A zero-byte request still returns a unique, freeable pointer.
    fn allocate(bytes: usize) -> Option<NonNull<u8>>;

    /// Like [`allocate`](Self::allocate), with every byte zeroed.
    fn calloc(bytes: usize) -> Option<NonNull<u8>> {
        let ptr = Self::allocate(bytes)?;
        unsafe { ptr.as_ptr().write_bytes(0, bytes) };
        Some(ptr)
    }

    /// Release a block.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate`/`calloc` of the same strategy with the
    /// same `bytes`, and must not be used afterwards.
    unsafe fn free(ptr: NonNull<u8>, bytes: usize);
}

#[cfg(all(any(unix, windows), not(feature = "portable-alloc")))]
pub type DefaultAllocator = SystemAligned;

#[cfg(any(not(any(unix, windows)), feature = "portable-alloc"))]
pub type DefaultAllocator = OffsetAligned;

/// Allocate `bytes` aligned bytes with the default strategy.
#[inline]
pub fn allocate(bytes: usize) -> Option<NonNull<u8>> {
    DefaultAllocator::allocate(bytes)
}

/// Allocate `bytes` zeroed, aligned bytes with the default strategy.
#[inline]
pub fn calloc(bytes: usize) -> Option<NonNull<u8>> {
    DefaultAllocator::calloc(bytes)
}

/// Free a block from [`allocate`] or [`calloc`].
///
/// # Safety
///
/// See [`AlignedAlloc::free`].
#[inline]
pub unsafe fn free(ptr: NonNull<u8>, bytes: usize) {
    DefaultAllocator::free(ptr, bytes)
}

/// Allocate room for `count` values of `T`, uninitialized.
pub fn allocate_array<T>(count: usize) -> Option<NonNull<T>> {
    debug_assert!(core::mem::align_of::<T>() <= ALIGNMENT);
    let bytes = count.checked_mul(size_of::<T>())?;
    allocate(bytes).map(NonNull::cast)
}

/// Allocate room for `count` values of `T`, zero-filled.
pub fn calloc_array<T>(count: usize) -> Option<NonNull<T>> {
    debug_assert!(core::mem::align_of::<T>() <= ALIGNMENT);
    let bytes = count.checked_mul(size_of::<T>())?;
    calloc(bytes).map(NonNull::cast)
}

/// Free an array from [`allocate_array`] or [`calloc_array`].
///
/// # Safety
///
/// `ptr` and `count` must match the original call.
pub unsafe fn free_array<T>(ptr: NonNull<T>, count: usize) {
    free(ptr.cast(), count * size_of::<T>())
}

/// Whether `ptr` sits on an [`ALIGNMENT`] boundary.
#[inline]
pub fn is_aligned<T>(ptr: *const T) -> bool {
    (ptr as usize) % ALIGNMENT == 0
}
