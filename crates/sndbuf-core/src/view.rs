//! Non-owning view of slot memory for the render path.

use std::ptr::NonNull;

/// Pointer, shape and rate of one allocated buffer.
///
/// A view never owns or frees memory. It stays valid only while the slot it
/// was taken from keeps the same allocation; the layer that hands views to the
/// render context is responsible for retiring them before the slot is freed or
/// reallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferView {
    ptr: NonNull<f32>,
    frames: usize,
    channels: u32,
    sample_rate: u32,
}

// Plain pointer + metadata; liveness is the handoff protocol's job.
unsafe impl Send for BufferView {}
unsafe impl Sync for BufferView {}

impl BufferView {
    pub(crate) fn new(ptr: NonNull<f32>, frames: usize, channels: u32, sample_rate: u32) -> Self {
        Self {
            ptr,
            frames,
            channels,
            sample_rate,
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const f32 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total interleaved sample count.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames * self.channels as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the interleaved samples.
    ///
    /// # Safety
    ///
    /// The originating slot must not be freed, reallocated or written for the
    /// whole lifetime `'a`.
    #[inline]
    pub unsafe fn samples<'a>(&self) -> &'a [f32] {
        std::slice::from_raw_parts(self.ptr.as_ptr(), self.len())
    }
}
