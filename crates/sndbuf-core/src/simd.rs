//! Vectorized bulk writes over sample memory.

use wide::f32x8;

const LANES: usize = 8;

/// Store `lanes` into every full 8-sample chunk of `dst`; returns the tail.
#[inline]
fn store_lanes(dst: &mut [f32], lanes: f32x8) -> &mut [f32] {
    let mut chunks = dst.chunks_exact_mut(LANES);
    for chunk in &mut chunks {
        // SAFETY: chunk is exactly 8 f32s, the size of f32x8; the store is unaligned.
        unsafe { chunk.as_mut_ptr().cast::<f32x8>().write_unaligned(lanes) };
    }
    chunks.into_remainder()
}

/// Set every sample in `dst` to `value`.
#[inline]
pub fn fill(dst: &mut [f32], value: f32) {
    store_lanes(dst, f32x8::splat(value)).fill(value);
}

/// Set every sample in `dst` to 0.0.
#[inline]
pub fn zero(dst: &mut [f32]) {
    store_lanes(dst, f32x8::ZERO).fill(0.0);
}

/// Fill `channels`-interleaved frames with `value` on every channel.
#[inline]
pub fn fill_frames(
    dst: &mut [f32],
    channels: usize,
    first_frame: usize,
    frames: usize,
    value: f32,
) {
    let start = first_frame * channels;
    fill(&mut dst[start..start + frames * channels], value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_with_remainder() {
        let mut data = vec![1.0f32; 19];
        fill(&mut data, 0.5);
        assert!(data.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_zero() {
        let mut data: Vec<f32> = (0..35).map(|i| i as f32).collect();
        zero(&mut data);
        assert!(data.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_fill_frames_interleaved() {
        let mut data = vec![0.0f32; 12];
        fill_frames(&mut data, 2, 2, 3, 9.0);
        assert_eq!(&data[..4], &[0.0; 4]);
        assert_eq!(&data[4..10], &[9.0; 6]);
        assert_eq!(&data[10..], &[0.0; 2]);
    }

    #[test]
    fn test_fill_unaligned_subslice() {
        let mut data = vec![0.0f32; 40];
        fill(&mut data[3..30], -2.0);
        assert!(data[..3].iter().all(|&s| s == 0.0));
        assert!(data[3..30].iter().all(|&s| s == -2.0));
        assert!(data[30..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_fill_empty() {
        let mut data: Vec<f32> = Vec::new();
        fill(&mut data, 1.0);
        zero(&mut data);
    }
}
