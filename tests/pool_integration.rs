//! Pool integration tests: slot lifecycle, file load/store, render views.
//!
//! Run with:
//! ```bash
//! cargo test -p sndbuf --test pool_integration
//! ```

#![cfg(feature = "wav")]

#[path = "helpers/mod.rs"]
mod helpers;

use approx::assert_abs_diff_eq;
use helpers::tolerances::{FLOAT_EPSILON, INT16_EPSILON};
use helpers::{
    generate_normalized_staircase, generate_sine, interleave, load_wav_samples, peak,
    save_wav_file_pcm16, signals_approx_equal, test_pool, TEST_CAPACITY, TEST_SAMPLE_RATE,
};
use sndbuf::{BufferPool, Error, ErrorKind};
use tempfile::TempDir;

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_slot_lifecycle() {
    let mut pool = test_pool();
    assert_eq!(pool.capacity(), TEST_CAPACITY);
    assert_eq!(pool.allocated().count(), 0);

    pool.allocate(3, 512, 2).unwrap();
    assert!(pool.is_in_use(3));
    assert_eq!(pool.slot(3).sample_rate(), TEST_SAMPLE_RATE);
    assert_eq!(peak(pool.slot(3).samples().unwrap()), 0.0);

    assert_eq!(pool.fill_samples(3, 100, 50, 0.5f32).unwrap(), 50);
    assert_eq!(peak(pool.slot(3).samples().unwrap()), 0.5);

    pool.zero(3).unwrap();
    assert_eq!(peak(pool.slot(3).samples().unwrap()), 0.0);

    pool.free(3).unwrap();
    assert!(!pool.is_in_use(3));
    assert!(pool.view(3).is_none());

    // EMPTY again: can be reallocated with a different shape.
    pool.allocate(3, 16, 1).unwrap();
    assert_eq!(pool.slot(3).frames(), 16);
}

#[test]
fn test_state_machine_errors() {
    let mut pool = test_pool();
    pool.allocate(0, 8, 1).unwrap();

    let err = pool.allocate(0, 8, 1).unwrap_err();
    assert!(matches!(err, Error::AlreadyInUse(0)));
    assert!(err.is_precondition());

    for err in [
        pool.free(1).unwrap_err(),
        pool.zero(1).unwrap_err(),
        pool.set_samples_at(1, &[0], &[1.0f32]).unwrap_err(),
        pool.fill_samples(1, 0, 1, 1.0f32).unwrap_err(),
    ] {
        assert!(matches!(err, Error::NotInUse(1)));
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    let err = pool.allocate(2, 0, 2).unwrap_err();
    assert!(matches!(err, Error::InvalidSize { .. }));
    assert!(!pool.is_in_use(2));
}

#[test]
fn test_setters_accept_mixed_sample_types() {
    let mut pool = test_pool();
    pool.allocate(0, 4, 1).unwrap();

    pool.set_samples_at(0, &[0], &[0.5f64]).unwrap();
    pool.set_samples(0, 1, &[16384i16, -16384]).unwrap();
    pool.set_samples_at(0, &[3], &[i32::MIN]).unwrap();

    let samples = pool.slot(0).samples().unwrap();
    assert_abs_diff_eq!(samples[0], 0.5, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(samples[1], 0.5, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(samples[2], -0.5, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(samples[3], -1.0, epsilon = FLOAT_EPSILON);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(matches!(BufferPool::new(0), Err(Error::InvalidConfig(_))));

    let err = sndbuf::pool().sample_rate(1000).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

// =============================================================================
// File load/store
// =============================================================================

#[test]
fn test_load_reference_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reference.wav");
    let left = generate_sine(440.0, 44100.0, 4410);
    let right = generate_normalized_staircase(4410);
    save_wav_file_pcm16(&path, &left, &right, 44100).unwrap();

    let mut pool = test_pool();
    pool.read_allocate(0, &path, 0, 0).unwrap();

    let slot = pool.slot(0);
    assert_eq!(slot.frames(), 4410);
    assert_eq!(slot.channels(), 2);
    // Loaded buffers carry the file's rate, not the pool default.
    assert_eq!(slot.sample_rate(), 44100);

    let loaded_left: Vec<f32> = slot.channel(0).collect();
    let loaded_right: Vec<f32> = slot.channel(1).collect();
    assert!(signals_approx_equal(&loaded_left, &left, 2.0 * INT16_EPSILON));
    assert!(signals_approx_equal(&loaded_right, &right, 2.0 * INT16_EPSILON));
}

#[test]
fn test_load_range_and_channel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reference.wav");
    let left = generate_normalized_staircase(1000);
    let right: Vec<f32> = left.iter().map(|s| -s).collect();
    save_wav_file_pcm16(&path, &left, &right, 48000).unwrap();

    let mut pool = test_pool();
    pool.read_allocate_channels(5, &path, 200, 100, &[1]).unwrap();

    let slot = pool.slot(5);
    assert_eq!(slot.channels(), 1);
    assert_eq!(slot.frames(), 100);
    assert!(signals_approx_equal(
        slot.samples().unwrap(),
        &right[200..300],
        2.0 * INT16_EPSILON
    ));
}

#[test]
fn test_store_is_readable_by_hound() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.wav");
    let left = generate_sine(1000.0, 48000.0, 480);
    let right = generate_sine(250.0, 48000.0, 480);
    let frames = interleave(&[&left[..], &right[..]]);

    let mut pool = test_pool();
    pool.allocate(0, 480, 2).unwrap();
    pool.set_frames(0, 0, &frames).unwrap();
    pool.write(0, &path, "wav", "int16", 0, 0).unwrap();

    let (spec, samples) = load_wav_samples(&path).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, TEST_SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);
    assert!(signals_approx_equal(&samples, &frames, 2.0 * INT16_EPSILON));
}

#[test]
fn test_store_and_reload_float() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("float.wav");
    let signal = generate_sine(440.0, 48000.0, 2048);

    let mut pool = test_pool();
    pool.allocate(0, 2048, 1).unwrap();
    pool.set_samples(0, 0, &signal).unwrap();
    pool.write(0, &path, "wav", "float", 1024, 0).unwrap();
    pool.read_allocate(1, &path, 0, 0).unwrap();

    assert_eq!(pool.slot(1).samples().unwrap(), &signal[1024..]);
}

#[test]
fn test_failed_load_keeps_slot_empty() {
    let dir = TempDir::new().unwrap();
    let mut pool = test_pool();

    let err = pool
        .read_allocate(0, dir.path().join("missing.wav"), 0, 0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!pool.is_in_use(0));
    assert_eq!(pool.allocated().count(), 0);
}

// =============================================================================
// Render views and concurrency
// =============================================================================

#[test]
fn test_view_is_aligned_and_sendable() {
    let mut pool = test_pool();
    pool.allocate(0, 256, 2).unwrap();
    pool.fill_samples(0, 0, 256, 0.25f32).unwrap();

    let view = pool.view(0).unwrap();
    assert_eq!(view.as_ptr() as usize % sndbuf::ALIGNMENT, 0);
    assert_eq!(view.len(), 512);

    // The pool is not touched while the reader runs.
    let sum = std::thread::scope(|s| {
        s.spawn(move || {
            // SAFETY: slot 0 is neither freed nor written until the scope ends.
            let samples = unsafe { view.samples() };
            samples.iter().sum::<f32>()
        })
        .join()
        .unwrap()
    });
    assert_abs_diff_eq!(sum, 128.0, epsilon = FLOAT_EPSILON);
}

#[test]
fn test_distinct_slots_loaded_concurrently() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<_> = (0..4)
        .map(|i| {
            let path = dir.path().join(format!("part{}.wav", i));
            let tone = generate_sine(110.0 * (i + 1) as f64, 48000.0, 480);
            save_wav_file_pcm16(&path, &tone, &tone, 48000).unwrap();
            path
        })
        .collect();

    let mut pool = test_pool();
    std::thread::scope(|s| {
        for (mut handle, path) in pool.slots_mut().zip(&paths) {
            s.spawn(move || handle.read_allocate(path, 0, 0).unwrap());
        }
    });

    assert_eq!(pool.allocated().count(), 4);
    for (index, slot) in pool.allocated() {
        assert!(index < 4);
        assert_eq!(slot.frames(), 480);
    }
}
