//! Conversion of control-path input values into stored samples.

/// A value the setters accept and store as `f32`.
///
/// Integer PCM is normalized to -1.0..1.0.
pub trait IntoSample: Copy {
    fn into_sample(self) -> f32;
}

impl IntoSample for f32 {
    #[inline]
    fn into_sample(self) -> f32 {
        self
    }
}

impl IntoSample for f64 {
    #[inline]
    fn into_sample(self) -> f32 {
        self as f32
    }
}

impl IntoSample for i16 {
    #[inline]
    fn into_sample(self) -> f32 {
        self as f32 / 32768.0
    }
}

impl IntoSample for i32 {
    #[inline]
    fn into_sample(self) -> f32 {
        (self as f64 / 2_147_483_648.0) as f32
    }
}
