//! WAV encoding from interleaved `f32`.

use crate::format::{HeaderFormat, SampleFormat};
use crate::map_hound_error;
use hound::{SampleFormat as HoundFormat, WavSpec, WavWriter};
use sndbuf_core::{EncodeRequest, Error, Result};
use std::io::{Seek, Write};

/// Build the hound spec for a request, rejecting formats WAV cannot carry.
pub fn wav_spec(request: &EncodeRequest<'_>) -> Result<WavSpec> {
    request.header_format.parse::<HeaderFormat>()?.require_wav()?;
    let (bits_per_sample, sample_format) = request
        .sample_format
        .parse::<SampleFormat>()?
        .wav_params()?;
    let channels = u16::try_from(request.channels).map_err(|_| {
        Error::UnsupportedFormat(format!("{} channels exceed WAV limit", request.channels))
    })?;

    Ok(WavSpec {
        channels,
        sample_rate: request.sample_rate,
        bits_per_sample,
        sample_format,
    })
}

/// Encode the requested frame range to `request.path`.
pub fn encode_file(request: &EncodeRequest<'_>) -> Result<()> {
    let spec = wav_spec(request)?;
    let samples = request.frames_in_range();
    tracing::debug!(
        "Encoding {} frames to {} ({}-bit {:?})",
        samples.len() / request.channels.max(1) as usize,
        request.path.display(),
        spec.bits_per_sample,
        spec.sample_format
    );
    let writer = WavWriter::create(request.path, spec).map_err(map_hound_error)?;
    encode_writer(writer, samples)
}

/// Encode to any seekable writer and finalize the header.
pub fn encode_writer<W: Write + Seek>(mut writer: WavWriter<W>, samples: &[f32]) -> Result<()> {
    let spec = writer.spec();
    match (spec.sample_format, spec.bits_per_sample) {
        (HoundFormat::Float, _) => write_all(&mut writer, samples, |s| s)?,
        (HoundFormat::Int, 8) => write_all(&mut writer, samples, float_to_i8)?,
        (HoundFormat::Int, 16) => write_all(&mut writer, samples, float_to_i16)?,
        (HoundFormat::Int, 24) => write_all(&mut writer, samples, float_to_i24)?,
        (HoundFormat::Int, 32) => write_all(&mut writer, samples, float_to_i32)?,
        (_, bits) => {
            return Err(Error::UnsupportedFormat(format!(
                "{}-bit integer samples",
                bits
            )))
        }
    }
    writer.finalize().map_err(map_hound_error)
}

fn write_all<W, S, F>(writer: &mut WavWriter<W>, samples: &[f32], convert: F) -> Result<()>
where
    W: Write + Seek,
    S: hound::Sample,
    F: Fn(f32) -> S,
{
    for &sample in samples {
        writer
            .write_sample(convert(sample))
            .map_err(map_hound_error)?;
    }
    Ok(())
}

#[inline]
fn float_to_i8(sample: f32) -> i8 {
    (sample.clamp(-1.0, 1.0) * 127.0) as i8
}

#[inline]
fn float_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// 24-bit value stored in an i32.
#[inline]
fn float_to_i24(sample: f32) -> i32 {
    (sample.clamp(-1.0, 1.0) * 8388607.0) as i32
}

#[inline]
fn float_to_i32(sample: f32) -> i32 {
    (sample.clamp(-1.0, 1.0) as f64 * 2147483647.0) as i32
}
