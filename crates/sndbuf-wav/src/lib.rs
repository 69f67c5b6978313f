//! # sndbuf-wav
//!
//! WAV codec adapter for [`sndbuf_core::BufferPool`], built on `hound`.
//!
//! ```ignore
//! use sndbuf_core::BufferPool;
//! use sndbuf_wav::WavCodec;
//!
//! let mut pool = BufferPool::builder().capacity(128).codec(WavCodec::new()).build()?;
//! pool.read_allocate(0, "kick.wav", 0, 0)?;
//! pool.write(0, "kick_copy.wav", "wav", "float", 0, 0)?;
//! ```
//!
//! Supported descriptors:
//! - header: `wav` / `wave`
//! - samples: `int8`, `int16`, `int24`, `int32`, `float` / `float32`

pub mod decode;
pub mod encode;
pub mod format;

pub use format::{HeaderFormat, SampleFormat};

use sndbuf_core::{DecodeRequest, DecodedAudio, EncodeRequest, Error, Result, SampleCodec};

/// [`SampleCodec`] reading and writing WAV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavCodec;

impl WavCodec {
    pub fn new() -> Self {
        Self
    }
}

impl SampleCodec for WavCodec {
    fn decode(&self, request: &DecodeRequest<'_>) -> Result<DecodedAudio> {
        decode::decode_file(request)
    }

    fn encode(&self, request: &EncodeRequest<'_>) -> Result<()> {
        encode::encode_file(request)
    }
}

/// Convert hound errors to pool errors at the crate boundary.
pub(crate) fn map_hound_error(e: hound::Error) -> Error {
    match e {
        hound::Error::IoError(io) => Error::Io(io),
        hound::Error::Unsupported => Error::UnsupportedFormat("unsupported WAV variant".into()),
        other => Error::Codec(other.to_string()),
    }
}
