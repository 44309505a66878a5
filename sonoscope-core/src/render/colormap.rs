//! Perceptual color mapping for spectrogram cells.

/// Maps a normalized magnitude in [0, 1] to an RGB triple.
///
/// Quadratic red, square-root green, inverted-linear blue: quiet cells sit
/// in blue-violet, loud cells run through orange into bright yellow-white.
/// Out-of-range or non-finite input is clamped, never rejected.
pub fn value_to_rgb(value: f32) -> [u8; 3] {
    let v = value.clamp(0.0, 1.0);
    let v = if v.is_nan() { 0.0 } else { v };
    let r = 30.0 + 225.0 * v * v;
    let g = 60.0 + 180.0 * v.sqrt();
    let b = 80.0 + 120.0 * (1.0 - v);
    [
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_color() {
        assert_eq!(value_to_rgb(0.0), [30, 60, 200]);
    }

    #[test]
    fn test_peak_color() {
        assert_eq!(value_to_rgb(1.0), [255, 240, 80]);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(value_to_rgb(-3.0), value_to_rgb(0.0));
        assert_eq!(value_to_rgb(7.5), value_to_rgb(1.0));
        assert_eq!(value_to_rgb(f32::NAN), value_to_rgb(0.0));
        assert_eq!(value_to_rgb(f32::INFINITY), value_to_rgb(1.0));
    }

    #[test]
    fn test_red_and_green_rise_with_value() {
        let lo = value_to_rgb(0.2);
        let hi = value_to_rgb(0.8);
        assert!(hi[0] > lo[0]);
        assert!(hi[1] > lo[1]);
        assert!(hi[2] < lo[2]);
    }
}
