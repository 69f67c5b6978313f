//! Tolerance constants for sample comparisons.

/// Floating point rounding errors (for exact copies and float WAV round trips).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// 16-bit quantization step size.
/// Use when testing bit-depth conversion to 16-bit.
pub const INT16_EPSILON: f32 = 1.0 / 32768.0;

/// 24-bit quantization step size.
pub const INT24_EPSILON: f32 = 1.0 / 8388608.0;

/// 8-bit quantization step size.
pub const INT8_EPSILON: f32 = 1.0 / 128.0;
