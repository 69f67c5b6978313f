//! Checked access to a single pool slot.

use crate::codec::SampleCodec;
use crate::error::{Error, Result};
use crate::sample::IntoSample;
use crate::slot::BufferSlot;
use std::path::Path;

/// Mutable handle to one slot of a [`BufferPool`](crate::BufferPool).
///
/// Every operation checks the slot state before touching memory or files, so
/// a double allocate or a use of an EMPTY slot comes back as an error instead
/// of reaching sample memory. Handles for distinct indices can be used from
/// different threads at the same time (see
/// [`BufferPool::slots_mut`](crate::BufferPool::slots_mut)).
pub struct SlotMut<'a> {
    index: usize,
    slot: &'a mut BufferSlot,
    codec: Option<&'a dyn SampleCodec>,
    sample_rate: u32,
}

impl<'a> SlotMut<'a> {
    pub(crate) fn new(
        index: usize,
        slot: &'a mut BufferSlot,
        codec: Option<&'a dyn SampleCodec>,
        sample_rate: u32,
    ) -> Self {
        Self {
            index,
            slot,
            codec,
            sample_rate,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn slot(&self) -> &BufferSlot {
        self.slot
    }

    /// Fails with [`Error::AlreadyInUse`] when ALLOCATED.
    #[inline]
    pub fn check_unused(&self) -> Result<()> {
        if self.slot.is_allocated() {
            return Err(Error::AlreadyInUse(self.index));
        }
        Ok(())
    }

    /// Fails with [`Error::NotInUse`] when EMPTY.
    #[inline]
    pub fn check_in_use(&self) -> Result<()> {
        if !self.slot.is_allocated() {
            return Err(Error::NotInUse(self.index));
        }
        Ok(())
    }

    fn codec(&self) -> Result<&'a dyn SampleCodec> {
        self.codec
            .ok_or_else(|| Error::UnsupportedFormat("no codec adapter installed".into()))
    }

    /// EMPTY -> ALLOCATED with `frames * channels` zeroed samples.
    pub fn allocate(&mut self, frames: usize, channels: u32) -> Result<()> {
        self.check_unused()?;
        match self.slot.allocate(frames, channels, self.sample_rate) {
            Ok(()) => {
                tracing::debug!(
                    "Allocated buffer {}: {} frames x {} channels",
                    self.index,
                    frames,
                    channels
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to allocate buffer {}: {}", self.index, e);
                Err(e)
            }
        }
    }

    /// EMPTY -> ALLOCATED with frames decoded from `path`.
    ///
    /// `frame_count == 0` reads to the end of the file.
    pub fn read_allocate(
        &mut self,
        path: impl AsRef<Path>,
        start_frame: usize,
        frame_count: usize,
    ) -> Result<()> {
        self.read(path.as_ref(), start_frame, frame_count, None)
    }

    /// Like [`read_allocate`](Self::read_allocate), keeping only `channels`
    /// (source channel indices, in output order).
    pub fn read_allocate_channels(
        &mut self,
        path: impl AsRef<Path>,
        start_frame: usize,
        frame_count: usize,
        channels: &[u32],
    ) -> Result<()> {
        self.read(path.as_ref(), start_frame, frame_count, Some(channels))
    }

    fn read(
        &mut self,
        path: &Path,
        start_frame: usize,
        frame_count: usize,
        channels: Option<&[u32]>,
    ) -> Result<()> {
        self.check_unused()?;
        let codec = self.codec()?;
        match self
            .slot
            .read_file(codec, path, start_frame, frame_count, channels)
        {
            Ok(()) => {
                tracing::debug!(
                    "Loaded buffer {} from {}: {} frames x {} channels @ {} Hz",
                    self.index,
                    path.display(),
                    self.slot.frames(),
                    self.slot.channels(),
                    self.slot.sample_rate()
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load buffer {} from {}: {}",
                    self.index,
                    path.display(),
                    e
                );
                Err(e)
            }
        }
    }

    /// ALLOCATED -> EMPTY.
    pub fn free(&mut self) -> Result<()> {
        self.check_in_use()?;
        self.slot.free();
        tracing::debug!("Freed buffer {}", self.index);
        Ok(())
    }

    /// Set every sample to 0.0.
    pub fn zero(&mut self) -> Result<()> {
        self.check_in_use()?;
        self.slot.zero();
        Ok(())
    }

    /// Scatter-write channel 0 of frames `indices[i]` with `values[i]`.
    ///
    /// Pairs whose frame is out of range are skipped; extra entries in the
    /// longer slice are ignored.
    pub fn set_samples_at<T: IntoSample>(
        &mut self,
        indices: &[usize],
        values: &[T],
    ) -> Result<()> {
        self.check_in_use()?;
        self.slot.set_samples_at(indices, values);
        Ok(())
    }

    /// Write channel 0 of consecutive frames from `position`.
    ///
    /// Input past the last frame is dropped. Returns the frames written.
    pub fn set_samples<T: IntoSample>(&mut self, position: usize, values: &[T]) -> Result<usize> {
        self.check_in_use()?;
        Ok(self.slot.set_samples(position, values))
    }

    /// Write whole interleaved frames from `position`.
    ///
    /// Frames past the end are dropped. Returns the frames written.
    pub fn set_frames<T: IntoSample>(&mut self, position: usize, values: &[T]) -> Result<usize> {
        self.check_in_use()?;
        Ok(self.slot.set_frames(position, values))
    }

    /// Set all channels of `count` frames from `position` to `value`.
    ///
    /// Frames past the end are dropped. Returns the frames written.
    pub fn fill_samples<T: IntoSample>(
        &mut self,
        position: usize,
        count: usize,
        value: T,
    ) -> Result<usize> {
        self.check_in_use()?;
        Ok(self.slot.fill_samples(position, count, value))
    }

    /// Encode frames `start_frame..start_frame + frame_count` to `path`.
    ///
    /// `frame_count == 0` writes to the end of the buffer.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        header_format: &str,
        sample_format: &str,
        start_frame: usize,
        frame_count: usize,
    ) -> Result<()> {
        self.check_in_use()?;
        let path = path.as_ref();
        let codec = self.codec()?;
        match self.slot.write_file(
            codec,
            path,
            header_format,
            sample_format,
            start_frame,
            frame_count,
        ) {
            Ok(()) => {
                tracing::debug!(
                    "Wrote buffer {} to {} ({}/{})",
                    self.index,
                    path.display(),
                    header_format,
                    sample_format
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to write buffer {} to {}: {}",
                    self.index,
                    path.display(),
                    e
                );
                Err(e)
            }
        }
    }
}
