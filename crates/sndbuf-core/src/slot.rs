//! One pool entry: aligned sample memory plus its shape.
//!
//! Samples are interleaved per frame: `(frame f, channel c)` lives at
//! `f * channels + c`. The mutating operations here assume the caller has
//! already checked the slot state (see [`SlotMut`](crate::SlotMut)).

use crate::aligned::AlignedBuf;
use crate::codec::{DecodeRequest, EncodeRequest, SampleCodec};
use crate::error::{Error, Result};
use crate::sample::IntoSample;
use crate::simd;
use crate::view::BufferView;
use std::path::Path;

/// Indexed buffer slot, either EMPTY or ALLOCATED.
///
/// `data.is_none() <=> frames == 0 <=> channels == 0`.
#[derive(Debug, Default)]
pub struct BufferSlot {
    data: Option<AlignedBuf>,
    frames: usize,
    channels: u32,
    sample_rate: u32,
}

impl BufferSlot {
    pub const fn new() -> Self {
        Self {
            data: None,
            frames: 0,
            channels: 0,
            sample_rate: 0,
        }
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.data.is_some()
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

    /// Interleaved samples, `None` when EMPTY.
    #[inline]
    pub fn samples(&self) -> Option<&[f32]> {
        self.data.as_deref()
    }

    #[inline]
    pub fn samples_mut(&mut self) -> Option<&mut [f32]> {
        self.data.as_deref_mut()
    }

    /// Samples of one channel, frame by frame.
    pub fn channel(&self, channel: u32) -> impl Iterator<Item = f32> + '_ {
        let stride = self.channels.max(1) as usize;
        let offset = channel as usize;
        let data: &[f32] = match &self.data {
            Some(data) if channel < self.channels => &data[..],
            _ => &[],
        };
        data.iter().skip(offset).step_by(stride).copied()
    }

    /// Render-path view of the current allocation.
    pub fn view(&self) -> Option<BufferView> {
        self.data.as_ref().map(|data| {
            BufferView::new(data.non_null(), self.frames, self.channels, self.sample_rate)
        })
    }

    fn sample_count(frames: usize, channels: u32) -> Result<usize> {
        if frames == 0 || channels == 0 {
            return Err(Error::InvalidSize { frames, channels });
        }
        let len = frames
            .checked_mul(channels as usize)
            .ok_or(Error::InvalidSize { frames, channels })?;
        // Byte size must be representable too.
        len.checked_mul(std::mem::size_of::<f32>())
            .ok_or(Error::InvalidSize { frames, channels })?;
        Ok(len)
    }

    /// Allocate `frames * channels` zeroed samples. Requires EMPTY.
    pub(crate) fn allocate(
        &mut self,
        frames: usize,
        channels: u32,
        sample_rate: u32,
    ) -> Result<()> {
        debug_assert!(!self.is_allocated());
        let len = Self::sample_count(frames, channels)?;
        let data = AlignedBuf::zeroed(len)?;
        self.install(data, frames, channels, sample_rate);
        Ok(())
    }

    fn install(&mut self, data: AlignedBuf, frames: usize, channels: u32, sample_rate: u32) {
        self.data = Some(data);
        self.frames = frames;
        self.channels = channels;
        self.sample_rate = sample_rate;
    }

    /// Release the memory and return to EMPTY.
    pub(crate) fn free(&mut self) {
        debug_assert!(self.is_allocated());
        self.data = None;
        self.frames = 0;
        self.channels = 0;
        self.sample_rate = 0;
    }

    pub(crate) fn zero(&mut self) {
        if let Some(data) = self.data.as_deref_mut() {
            simd::zero(data);
        }
    }

    /// Scatter-write channel 0 of the given frames; out-of-range frames are skipped.
    pub(crate) fn set_samples_at<T: IntoSample>(&mut self, indices: &[usize], values: &[T]) {
        let frames = self.frames;
        let stride = self.channels as usize;
        let Some(data) = self.data.as_deref_mut() else {
            return;
        };
        for (&index, &value) in indices.iter().zip(values) {
            if index < frames {
                data[index * stride] = value.into_sample();
            }
        }
    }

    /// Write channel 0 of consecutive frames from `position`, clipped to the buffer.
    ///
    /// Returns the number of frames written.
    pub(crate) fn set_samples<T: IntoSample>(&mut self, position: usize, values: &[T]) -> usize {
        let count = self.clip(position, values.len());
        let stride = self.channels as usize;
        let Some(data) = self.data.as_deref_mut() else {
            return 0;
        };
        for (i, &value) in values[..count].iter().enumerate() {
            data[(position + i) * stride] = value.into_sample();
        }
        count
    }

    /// Write whole interleaved frames from `position`, clipped to the buffer.
    ///
    /// A trailing partial frame in `values` is ignored. Returns the frames written.
    pub(crate) fn set_frames<T: IntoSample>(&mut self, position: usize, values: &[T]) -> usize {
        let channels = self.channels as usize;
        if channels == 0 {
            return 0;
        }
        let count = self.clip(position, values.len() / channels);
        if count == 0 {
            return 0;
        }
        let Some(data) = self.data.as_deref_mut() else {
            return 0;
        };
        let start = position * channels;
        let dst = &mut data[start..start + count * channels];
        for (out, &value) in dst.iter_mut().zip(values) {
            *out = value.into_sample();
        }
        count
    }

    /// Set every channel of `count` frames from `position` to `value`, clipped.
    ///
    /// Returns the number of frames written.
    pub(crate) fn fill_samples<T: IntoSample>(
        &mut self,
        position: usize,
        count: usize,
        value: T,
    ) -> usize {
        let count = self.clip(position, count);
        if count == 0 {
            return 0;
        }
        let channels = self.channels as usize;
        if let Some(data) = self.data.as_deref_mut() {
            simd::fill_frames(data, channels, position, count, value.into_sample());
        }
        count
    }

    #[inline]
    fn clip(&self, position: usize, count: usize) -> usize {
        count.min(self.frames.saturating_sub(position))
    }

    /// Decode a file into a new allocation. Requires EMPTY; stays EMPTY on failure.
    pub(crate) fn read_file(
        &mut self,
        codec: &dyn SampleCodec,
        path: &Path,
        start_frame: usize,
        frame_count: usize,
        channels: Option<&[u32]>,
    ) -> Result<()> {
        debug_assert!(!self.is_allocated());
        let decoded = codec.decode(&DecodeRequest {
            path,
            start_frame,
            frame_count,
            channels,
        })?;

        if decoded.frames == 0 || decoded.channels == 0 {
            return Err(Error::Codec(format!(
                "no audio decoded from {}",
                path.display()
            )));
        }
        let len = Self::sample_count(decoded.frames, decoded.channels)?;
        if decoded.samples.len() != len {
            return Err(Error::Codec(format!(
                "decoder returned {} samples for {} frames x {} channels",
                decoded.samples.len(),
                decoded.frames,
                decoded.channels
            )));
        }

        let data = AlignedBuf::from_slice(&decoded.samples)?;
        self.install(data, decoded.frames, decoded.channels, decoded.sample_rate);
        Ok(())
    }

    /// Encode a frame range to a file. Requires ALLOCATED.
    pub(crate) fn write_file(
        &self,
        codec: &dyn SampleCodec,
        path: &Path,
        header_format: &str,
        sample_format: &str,
        start_frame: usize,
        frame_count: usize,
    ) -> Result<()> {
        let samples = self.samples().unwrap_or(&[]);
        codec.encode(&EncodeRequest {
            path,
            header_format,
            sample_format,
            samples,
            channels: self.channels,
            sample_rate: self.sample_rate,
            start_frame,
            frame_count,
        })
    }
}
