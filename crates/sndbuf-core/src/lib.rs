//! Fixed-capacity pool of SIMD-aligned sample buffers for a real-time audio engine.
//!
//! A non-real-time control path allocates, fills, loads, stores and frees
//! buffers through [`BufferPool`]; a real-time render path reads sample memory
//! directly through [`BufferView`]s and never calls into the pool.
//!
//! # Primary API
//!
//! - [`BufferPool`] / [`BufferPoolBuilder`]: indexed slots with checked state transitions
//! - [`SlotMut`]: checked handle to one slot
//! - [`BufferView`]: non-owning pointer + shape for the render path
//! - [`SampleCodec`]: contract for the audio file codec adapter
//! - [`aligned`]: aligned allocation strategies and [`AlignedBuf`]
//!
//! # Layout
//!
//! Samples are interleaved per frame: `(frame f, channel c)` is at
//! `f * channels + c`.
//!
//! # Example
//!
//! ```
//! use sndbuf_core::BufferPool;
//!
//! let mut pool = BufferPool::builder().capacity(64).sample_rate(48000).build()?;
//!
//! pool.allocate(0, 512, 2)?;
//! pool.fill_samples(0, 0, 512, 0.5f32)?;
//! assert!(pool.allocate(0, 512, 2).is_err());
//!
//! let view = pool.view(0).expect("allocated");
//! assert_eq!(view.len(), 1024);
//!
//! pool.free(0)?;
//! # Ok::<(), sndbuf_core::Error>(())
//! ```

pub mod aligned;
pub use aligned::{
    AlignedAlloc, AlignedBuf, DefaultAllocator, OffsetAligned, SystemAligned, ALIGNMENT,
};

pub mod codec;
pub use codec::{DecodeRequest, DecodedAudio, EncodeRequest, SampleCodec};

pub mod config;
pub use config::PoolConfig;

pub mod error;
pub use error::{Error, ErrorKind, Result};

mod handle;
pub use handle::SlotMut;

mod pool;
pub use pool::{BufferPool, BufferPoolBuilder};

pub mod sample;
pub use sample::IntoSample;

pub mod simd;

mod slot;
pub use slot::BufferSlot;

mod view;
pub use view::BufferView;
