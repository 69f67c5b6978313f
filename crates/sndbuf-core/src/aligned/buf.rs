//! Owning handle for one aligned block of `f32` samples.

use super::{AlignedAlloc, DefaultAllocator};
use crate::error::{Error, Result};
use std::fmt;
use std::marker::PhantomData;
use std::mem::size_of;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Exclusively owned, aligned `[f32]` released on drop.
///
/// The contents are always initialized: blocks are either zero-filled or
/// copied in full from a source slice before the handle is returned.
pub struct AlignedBuf<A: AlignedAlloc = DefaultAllocator> {
    ptr: NonNull<f32>,
    len: usize,
    _alloc: PhantomData<A>,
}

// Unique ownership of plain floats, same as Box<[f32]>.
unsafe impl<A: AlignedAlloc> Send for AlignedBuf<A> {}
unsafe impl<A: AlignedAlloc> Sync for AlignedBuf<A> {}

impl<A: AlignedAlloc> AlignedBuf<A> {
    fn byte_len(len: usize) -> Result<usize> {
        len.checked_mul(size_of::<f32>())
            .ok_or(Error::AllocationFailed { bytes: usize::MAX })
    }

    /// Allocate `len` samples set to 0.0.
    pub fn zeroed(len: usize) -> Result<Self> {
        let bytes = Self::byte_len(len)?;
        let ptr = A::calloc(bytes).ok_or(Error::AllocationFailed { bytes })?;
        Ok(Self {
            ptr: ptr.cast(),
            len,
            _alloc: PhantomData,
        })
    }

    /// Allocate a block holding a copy of `samples`.
    pub fn from_slice(samples: &[f32]) -> Result<Self> {
        let bytes = Self::byte_len(samples.len())?;
        let ptr = A::allocate(bytes)
            .ok_or(Error::AllocationFailed { bytes })?
            .cast::<f32>();
        unsafe {
            std::ptr::copy_nonoverlapping(samples.as_ptr(), ptr.as_ptr(), samples.len());
        }
        Ok(Self {
            ptr,
            len: samples.len(),
            _alloc: PhantomData,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const f32 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut f32 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn non_null(&self) -> NonNull<f32> {
        self.ptr
    }
}

impl<A: AlignedAlloc> Deref for AlignedBuf<A> {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<A: AlignedAlloc> DerefMut for AlignedBuf<A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<A: AlignedAlloc> Drop for AlignedBuf<A> {
    fn drop(&mut self) {
        let bytes = self.len * size_of::<f32>();
        unsafe { A::free(self.ptr.cast(), bytes) };
    }
}

impl<A: AlignedAlloc> fmt::Debug for AlignedBuf<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuf")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}
