//! Header and sample format descriptors.
//!
//! Descriptors arrive as strings from the command layer. Parsing accepts the
//! common container and encoding names; whether a parsed format can actually
//! be written is a separate question answered by [`SampleFormat::wav_params`].

use hound::SampleFormat as HoundFormat;
use sndbuf_core::{Error, Result};
use std::str::FromStr;

/// Container kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFormat {
    Wav,
    Aiff,
    Flac,
    Caf,
    Raw,
}

impl FromStr for HeaderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wav" | "wave" => Ok(HeaderFormat::Wav),
            "aiff" | "aif" => Ok(HeaderFormat::Aiff),
            "flac" => Ok(HeaderFormat::Flac),
            "caf" => Ok(HeaderFormat::Caf),
            "raw" => Ok(HeaderFormat::Raw),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown header format '{}'",
                other
            ))),
        }
    }
}

impl HeaderFormat {
    /// Fails unless the container is WAV.
    pub fn require_wav(self) -> Result<()> {
        match self {
            HeaderFormat::Wav => Ok(()),
            other => Err(Error::UnsupportedFormat(format!(
                "{:?} container not supported by the WAV codec",
                other
            ))),
        }
    }
}

/// Sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Int8,
    Int16,
    Int24,
    Int32,
    Float,
    Double,
    Uint8,
    Mulaw,
    Alaw,
}

impl FromStr for SampleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "int8" => Ok(SampleFormat::Int8),
            "int16" => Ok(SampleFormat::Int16),
            "int24" => Ok(SampleFormat::Int24),
            "int32" => Ok(SampleFormat::Int32),
            "float" | "float32" => Ok(SampleFormat::Float),
            "double" | "float64" => Ok(SampleFormat::Double),
            "uint8" => Ok(SampleFormat::Uint8),
            "mulaw" => Ok(SampleFormat::Mulaw),
            "alaw" => Ok(SampleFormat::Alaw),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown sample format '{}'",
                other
            ))),
        }
    }
}

impl SampleFormat {
    /// Bits per sample and hound encoding, for formats WAV can carry here.
    pub fn wav_params(self) -> Result<(u16, HoundFormat)> {
        match self {
            SampleFormat::Int8 => Ok((8, HoundFormat::Int)),
            SampleFormat::Int16 => Ok((16, HoundFormat::Int)),
            SampleFormat::Int24 => Ok((24, HoundFormat::Int)),
            SampleFormat::Int32 => Ok((32, HoundFormat::Int)),
            SampleFormat::Float => Ok((32, HoundFormat::Float)),
            other => Err(Error::UnsupportedFormat(format!(
                "{:?} samples not supported by the WAV codec",
                other
            ))),
        }
    }
}
