//! WAV decoding into interleaved `f32`.

use crate::map_hound_error;
use hound::{SampleFormat as HoundFormat, WavReader};
use sndbuf_core::{DecodeRequest, DecodedAudio, Error, Result};
use std::io::{Read, Seek};

/// Decode the requested frame range of a WAV file.
pub fn decode_file(request: &DecodeRequest<'_>) -> Result<DecodedAudio> {
    let reader = WavReader::open(request.path).map_err(map_hound_error)?;
    let spec = reader.spec();
    tracing::debug!(
        "Opened {}: {} ch, {} Hz, {}-bit {:?}, {} frames",
        request.path.display(),
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format,
        reader.duration()
    );
    decode_reader(reader, request)
}

/// Decode from an already opened reader.
pub fn decode_reader<R: Read + Seek>(
    mut reader: WavReader<R>,
    request: &DecodeRequest<'_>,
) -> Result<DecodedAudio> {
    let spec = reader.spec();
    let file_channels = spec.channels as usize;
    let total = reader.duration() as usize;

    if request.start_frame >= total {
        return Err(Error::Codec(format!(
            "start frame {} beyond end of file ({} frames)",
            request.start_frame, total
        )));
    }

    let avail = total - request.start_frame;
    let frames = if request.frame_count == 0 {
        avail
    } else {
        request.frame_count.min(avail)
    };

    if let Some(channels) = request.channels {
        if channels.is_empty() {
            return Err(Error::Codec("empty channel selection".into()));
        }
        if let Some(&bad) = channels.iter().find(|&&c| c as usize >= file_channels) {
            return Err(Error::Codec(format!(
                "channel {} out of range (file has {} channels)",
                bad, file_channels
            )));
        }
    }

    reader
        .seek(request.start_frame as u32)
        .map_err(Error::Io)?;

    let wanted = frames * file_channels;
    let interleaved = match spec.sample_format {
        HoundFormat::Float => read_samples(reader.samples::<f32>(), wanted, |s| s)?,
        HoundFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f64;
            read_samples(reader.samples::<i32>(), wanted, |s| (s as f64 * scale) as f32)?
        }
    };

    let (samples, channels) = match request.channels {
        Some(selection) => (
            select_channels(&interleaved, file_channels, selection),
            selection.len() as u32,
        ),
        None => (interleaved, spec.channels as u32),
    };

    Ok(DecodedAudio {
        samples,
        frames,
        channels,
        sample_rate: spec.sample_rate,
    })
}

fn read_samples<S, I, F>(samples: I, wanted: usize, convert: F) -> Result<Vec<f32>>
where
    I: Iterator<Item = hound::Result<S>>,
    F: Fn(S) -> f32,
{
    let mut out = Vec::with_capacity(wanted);
    for sample in samples.take(wanted) {
        out.push(convert(sample.map_err(map_hound_error)?));
    }
    if out.len() != wanted {
        return Err(Error::Codec(format!(
            "truncated data: expected {} samples, got {}",
            wanted,
            out.len()
        )));
    }
    Ok(out)
}

/// Pick `selection` (source channel indices) out of interleaved frames.
fn select_channels(interleaved: &[f32], file_channels: usize, selection: &[u32]) -> Vec<f32> {
    interleaved
        .chunks_exact(file_channels)
        .flat_map(|frame| selection.iter().map(move |&c| frame[c as usize]))
        .collect()
}
