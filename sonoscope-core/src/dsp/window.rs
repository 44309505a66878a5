/// Hann window coefficients: `w[i] = 0.5 * (1 - cos(2*pi*i / (n - 1)))`.
///
/// Windows shorter than two samples have no taper to speak of; those
/// coefficients are fixed at 1.0 so degenerate frames pass through unscaled.
pub fn hann(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos()))
        .collect()
}

/// Multiplies a frame by its Hann window in place.
pub fn apply_hann(frame: &mut [f32], window: &[f32]) {
    debug_assert_eq!(frame.len(), window.len());
    for (s, w) in frame.iter_mut().zip(window) {
        *s *= w;
    }
}
