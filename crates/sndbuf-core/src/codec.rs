//! Contract between buffer slots and the audio file codec.
//!
//! The pool never parses or produces file data itself. A [`SampleCodec`]
//! decodes interleaved `f32` frames out of a file and encodes them back, with
//! `header_format`/`sample_format` passed through as opaque descriptor strings.

use crate::Result;
use std::path::Path;

/// Parameters of one decode call.
#[derive(Debug, Clone, Copy)]
pub struct DecodeRequest<'a> {
    pub path: &'a Path,
    /// First frame to read.
    pub start_frame: usize,
    /// Frames to read; 0 reads to the end of the file.
    pub frame_count: usize,
    /// Source channel indices to keep, in output order. `None` keeps all.
    pub channels: Option<&'a [u32]>,
}

/// Interleaved audio produced by [`SampleCodec::decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub frames: usize,
    pub channels: u32,
    pub sample_rate: u32,
}

/// Parameters of one encode call.
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    pub path: &'a Path,
    /// Container descriptor, e.g. `"wav"`.
    pub header_format: &'a str,
    /// Sample encoding descriptor, e.g. `"int16"` or `"float"`.
    pub sample_format: &'a str,
    /// The whole interleaved buffer.
    pub samples: &'a [f32],
    pub channels: u32,
    pub sample_rate: u32,
    /// First frame to write.
    pub start_frame: usize,
    /// Frames to write; 0 writes to the end of the buffer.
    pub frame_count: usize,
}

impl<'a> EncodeRequest<'a> {
    /// Frames in the buffer.
    pub fn total_frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Interleaved samples of the requested range, clipped to the buffer.
    pub fn frames_in_range(&self) -> &'a [f32] {
        let total = self.total_frames();
        let start = self.start_frame.min(total);
        let avail = total - start;
        let count = if self.frame_count == 0 {
            avail
        } else {
            self.frame_count.min(avail)
        };
        let channels = self.channels as usize;
        &self.samples[start * channels..(start + count) * channels]
    }
}

/// Decoder/encoder used by slots for file loads and stores.
pub trait SampleCodec: Send + Sync {
    /// Decode frames from a file.
    fn decode(&self, request: &DecodeRequest<'_>) -> Result<DecodedAudio>;

    /// Encode frames to a file. Must not retain `request.samples`.
    fn encode(&self, request: &EncodeRequest<'_>) -> Result<()>;
}

impl<C: SampleCodec + ?Sized> SampleCodec for Box<C> {
    fn decode(&self, request: &DecodeRequest<'_>) -> Result<DecodedAudio> {
        (**self).decode(request)
    }

    fn encode(&self, request: &EncodeRequest<'_>) -> Result<()> {
        (**self).encode(request)
    }
}
