//! Fixed-capacity pool of indexed buffer slots.

use crate::codec::SampleCodec;
use crate::config::PoolConfig;
use crate::error::{Error, Result};
use crate::handle::SlotMut;
use crate::sample::IntoSample;
use crate::slot::BufferSlot;
use crate::view::BufferView;
use std::fmt;
use std::path::Path;

/// `N` buffer slots allocated once at construction and never resized.
///
/// Slots are addressed by index. Index bounds are not checked as part of the
/// pool contract: the layer accepting external indices validates
/// `index < capacity()`, and an out-of-range index panics.
///
/// The pool takes no locks. The render context never goes through the pool;
/// it reads memory through [`BufferView`]s published by an external handoff,
/// which must also guarantee that no view of a slot is alive when that slot is
/// freed or reallocated.
pub struct BufferPool {
    slots: Box<[BufferSlot]>,
    codec: Option<Box<dyn SampleCodec>>,
    sample_rate: u32,
}

impl BufferPool {
    /// Create a new pool builder.
    pub fn builder() -> BufferPoolBuilder {
        BufferPoolBuilder::default()
    }

    /// Pool of `capacity` EMPTY slots at the default sample rate, no codec.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::builder().capacity(capacity).build()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn has_codec(&self) -> bool {
        self.codec.is_some()
    }

    #[inline]
    pub fn slot(&self, index: usize) -> &BufferSlot {
        &self.slots[index]
    }

    #[inline]
    pub fn is_in_use(&self, index: usize) -> bool {
        self.slots[index].is_allocated()
    }

    /// Render-path view of slot `index`, `None` when EMPTY.
    #[inline]
    pub fn view(&self, index: usize) -> Option<BufferView> {
        self.slots[index].view()
    }

    /// ALLOCATED slots with their indices.
    pub fn allocated(&self) -> impl Iterator<Item = (usize, &BufferSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_allocated())
    }

    /// Checked handle to slot `index`.
    pub fn slot_mut(&mut self, index: usize) -> SlotMut<'_> {
        SlotMut::new(
            index,
            &mut self.slots[index],
            self.codec.as_deref(),
            self.sample_rate,
        )
    }

    /// Checked handles to every slot, in index order.
    ///
    /// The handles borrow disjoint slots, so they can be sent to different
    /// threads to work on distinct indices concurrently.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = SlotMut<'_>> + '_ {
        let codec = self.codec.as_deref();
        let sample_rate = self.sample_rate;
        self.slots
            .iter_mut()
            .enumerate()
            .map(move |(index, slot)| SlotMut::new(index, slot, codec, sample_rate))
    }

    /// Fails with [`Error::AlreadyInUse`] when slot `index` is ALLOCATED.
    pub fn check_unused(&self, index: usize) -> Result<()> {
        if self.is_in_use(index) {
            return Err(Error::AlreadyInUse(index));
        }
        Ok(())
    }

    /// Fails with [`Error::NotInUse`] when slot `index` is EMPTY.
    pub fn check_in_use(&self, index: usize) -> Result<()> {
        if !self.is_in_use(index) {
            return Err(Error::NotInUse(index));
        }
        Ok(())
    }

    /// Allocate `frames * channels` zeroed samples in an EMPTY slot.
    pub fn allocate(&mut self, index: usize, frames: usize, channels: u32) -> Result<()> {
        self.slot_mut(index).allocate(frames, channels)
    }

    /// Decode `path` into an EMPTY slot. `frame_count == 0` reads to the end.
    pub fn read_allocate(
        &mut self,
        index: usize,
        path: impl AsRef<Path>,
        start_frame: usize,
        frame_count: usize,
    ) -> Result<()> {
        self.slot_mut(index)
            .read_allocate(path, start_frame, frame_count)
    }

    /// Decode selected source channels of `path` into an EMPTY slot.
    pub fn read_allocate_channels(
        &mut self,
        index: usize,
        path: impl AsRef<Path>,
        start_frame: usize,
        frame_count: usize,
        channels: &[u32],
    ) -> Result<()> {
        self.slot_mut(index)
            .read_allocate_channels(path, start_frame, frame_count, channels)
    }

    /// Release an ALLOCATED slot.
    pub fn free(&mut self, index: usize) -> Result<()> {
        self.slot_mut(index).free()
    }

    pub fn zero(&mut self, index: usize) -> Result<()> {
        self.slot_mut(index).zero()
    }

    /// Scatter form: write `values[i]` to channel 0 of frame `indices[i]`.
    pub fn set_samples_at<T: IntoSample>(
        &mut self,
        index: usize,
        indices: &[usize],
        values: &[T],
    ) -> Result<()> {
        self.slot_mut(index).set_samples_at(indices, values)
    }

    /// Contiguous form: write `values` to channel 0 of frames from `position`.
    pub fn set_samples<T: IntoSample>(
        &mut self,
        index: usize,
        position: usize,
        values: &[T],
    ) -> Result<usize> {
        self.slot_mut(index).set_samples(position, values)
    }

    /// Write whole interleaved frames from `position`.
    pub fn set_frames<T: IntoSample>(
        &mut self,
        index: usize,
        position: usize,
        values: &[T],
    ) -> Result<usize> {
        self.slot_mut(index).set_frames(position, values)
    }

    /// Set every channel of `count` frames from `position` to `value`.
    pub fn fill_samples<T: IntoSample>(
        &mut self,
        index: usize,
        position: usize,
        count: usize,
        value: T,
    ) -> Result<usize> {
        self.slot_mut(index).fill_samples(position, count, value)
    }

    /// Encode a frame range of an ALLOCATED slot to `path`.
    pub fn write(
        &mut self,
        index: usize,
        path: impl AsRef<Path>,
        header_format: &str,
        sample_format: &str,
        start_frame: usize,
        frame_count: usize,
    ) -> Result<()> {
        self.slot_mut(index).write(
            path,
            header_format,
            sample_format,
            start_frame,
            frame_count,
        )
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("capacity", &self.capacity())
            .field("allocated", &self.allocated().count())
            .field("sample_rate", &self.sample_rate)
            .field("has_codec", &self.has_codec())
            .finish()
    }
}

/// Builder for BufferPool.
#[derive(Default)]
pub struct BufferPoolBuilder {
    config: PoolConfig,
    codec: Option<Box<dyn SampleCodec>>,
}

impl BufferPoolBuilder {
    /// Number of slots (default: 1024).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Rate stamped on allocated buffers (default: 48000).
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    pub fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    /// Codec adapter used by file loads and stores.
    pub fn codec(mut self, codec: impl SampleCodec + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Validate the configuration and create every slot EMPTY.
    pub fn build(self) -> Result<BufferPool> {
        self.config.validate()?;
        let slots = (0..self.config.capacity)
            .map(|_| BufferSlot::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        tracing::debug!(
            "Created buffer pool: {} slots @ {} Hz",
            self.config.capacity,
            self.config.sample_rate
        );

        Ok(BufferPool {
            slots,
            codec: self.codec,
            sample_rate: self.config.sample_rate,
        })
    }
}
