//! Test helpers and fixtures for sndbuf integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact copies, float WAV round trips
//! - `INT8_EPSILON` / `INT16_EPSILON` / `INT24_EPSILON`: one quantization step

#![allow(dead_code)]

pub mod tolerances;

use sndbuf::prelude::*;
use std::path::Path;
use std::result::Result;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: u32 = 48000;

/// Pool size used by integration tests.
pub const TEST_CAPACITY: usize = 16;

/// Route `tracing` output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Pool with the WAV codec at the test sample rate.
pub fn test_pool() -> BufferPool {
    init_tracing();
    sndbuf::pool()
        .capacity(TEST_CAPACITY)
        .sample_rate(TEST_SAMPLE_RATE)
        .build()
        .expect("Failed to create test pool")
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate a normalized staircase signal in range [-1, 1].
pub fn generate_normalized_staircase(num_samples: usize) -> Vec<f32> {
    if num_samples <= 1 {
        return vec![0.0; num_samples];
    }
    let max = (num_samples - 1) as f32;
    (0..num_samples)
        .map(|i| (i as f32 / max) * 2.0 - 1.0)
        .collect()
}

/// Interleave equal-length channels into frames.
pub fn interleave(channels: &[&[f32]]) -> Vec<f32> {
    let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..frames)
        .flat_map(|i| channels.iter().map(move |c| c[i]))
        .collect()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Check if two signals are approximately equal within tolerance.
pub fn signals_approx_equal(a: &[f32], b: &[f32], tolerance: f32) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance)
}

/// Save a stereo 16-bit PCM WAV file written by hound directly.
pub fn save_wav_file_pcm16(
    path: &Path,
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
) -> Result<(), String> {
    use hound::{WavSpec, WavWriter};

    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| format!("Failed to create WAV: {}", e))?;

    for (&l, &r) in left.iter().zip(right) {
        for sample in [l, r] {
            writer
                .write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16)
                .map_err(|e| format!("Failed to write sample: {}", e))?;
        }
    }

    writer
        .finalize()
        .map_err(|e| format!("Failed to finalize WAV: {}", e))
}

/// Read every sample of a WAV file as f32 through hound.
pub fn load_wav_samples(path: &Path) -> Result<(hound::WavSpec, Vec<f32>), String> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| format!("Failed to open WAV: {}", e))?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())?
        }
    };
    Ok((spec, samples))
}
