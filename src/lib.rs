//! # sndbuf - Indexed Sample Buffer Pool
//!
//! Fixed-capacity pool of 64-byte aligned, interleaved `f32` sample buffers,
//! addressed by index, with file load and store through a pluggable codec.
//!
//! ## Architecture
//!
//! sndbuf is an umbrella crate over:
//! - **sndbuf-core** - Aligned allocation, buffer slots, the pool and its checked slot handles
//! - **sndbuf-wav** - WAV codec adapter (hound)
//!
//! ## Quick Start
//!
//! ```ignore
//! use sndbuf::prelude::*;
//!
//! let mut pool = sndbuf::pool().capacity(256).sample_rate(44100).build()?;
//!
//! pool.read_allocate(0, "loop.wav", 0, 0)?;
//! pool.allocate(1, 1024, 2)?;
//! pool.fill_samples(1, 0, 512, 0.25f32)?;
//! pool.write(1, "half.wav", "wav", "int16", 0, 0)?;
//!
//! // Hand the view to the render side.
//! let view = pool.view(0);
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - WAV codec
//! - `wav` - WAV file load/store
//! - `portable-alloc` - Offset-header aligned allocator on every platform

/// Re-export of sndbuf-core for direct access
pub use sndbuf_core as core;

pub use sndbuf_core::{
    // Aligned allocation
    aligned,
    AlignedAlloc,
    AlignedBuf,
    // Pool
    BufferPool,
    BufferPoolBuilder,
    BufferSlot,
    BufferView,
    // Codec seam
    DecodeRequest,
    DecodedAudio,
    EncodeRequest,
    // Error
    Error,
    ErrorKind,
    IntoSample,
    PoolConfig,
    Result,
    SampleCodec,
    SlotMut,
    ALIGNMENT,
};

// WAV codec
#[cfg(feature = "wav")]
pub use sndbuf_wav as wav;

#[cfg(feature = "wav")]
pub use sndbuf_wav::{HeaderFormat, SampleFormat, WavCodec};

/// Pool builder with the default codec installed.
///
/// With the `wav` feature this is [`BufferPool::builder`] plus [`WavCodec`];
/// without it, file operations on the built pool fail with
/// [`Error::UnsupportedFormat`].
pub fn pool() -> BufferPoolBuilder {
    let builder = BufferPool::builder();

    #[cfg(feature = "wav")]
    let builder = builder.codec(WavCodec::new());

    tracing::debug!("Pool builder created (wav: {})", cfg!(feature = "wav"));
    builder
}

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        BufferPool, BufferPoolBuilder, BufferSlot, BufferView, Error, ErrorKind, PoolConfig,
        Result, SampleCodec, SlotMut,
    };

    #[cfg(feature = "wav")]
    pub use crate::WavCodec;
}
