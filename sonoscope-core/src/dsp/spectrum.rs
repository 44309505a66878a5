use serde::Serialize;

use crate::dsp::{fft, window};
use crate::error::{AnalysisError, Result};
use crate::types::AudioClip;

/// Default cap on the transform length used by [`analyze`].
pub const DEFAULT_MAX_FFT: usize = 1 << 18;

/// Floor added to magnitudes before `log10` so silent bins stay finite.
pub const DB_EPSILON: f32 = 1e-12;

/// Display floor for relative dB values.
pub const DB_FLOOR: f32 = -120.0;

/// Single-frame magnitude spectrum with its frequency axis.
///
/// `magnitudes[k]` is the linear magnitude of bin `k`, `frequencies[k]` its
/// center frequency in Hz (`k * sample_rate / fft_len`). Only the lower half
/// of the transform is kept; the upper bins mirror it for real input.
#[derive(Clone, Debug, Serialize)]
pub struct MagnitudeSpectrum {
    pub magnitudes: Vec<f32>,
    pub frequencies: Vec<f32>,
    pub fft_len: usize,
}

impl MagnitudeSpectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Absolute per-bin level in dB: `20 * log10(magnitude + epsilon)`.
    pub fn to_db(&self) -> Vec<f32> {
        self.magnitudes
            .iter()
            .map(|&m| 20.0 * (m + DB_EPSILON).log10())
            .collect()
    }

    /// Display levels in [0, 1]: dB relative to the loudest bin of this
    /// spectrum, clamped to [`DB_FLOOR`]. A spectrum with no energy above
    /// the epsilon floor maps to all zeros.
    pub fn db_normalized(&self) -> Vec<f32> {
        let peak = self.magnitudes.iter().cloned().fold(0.0f32, f32::max);
        if peak <= DB_EPSILON {
            return vec![0.0; self.magnitudes.len()];
        }
        self.magnitudes
            .iter()
            .map(|&m| {
                let db = 20.0 * ((m + DB_EPSILON) / peak).log10();
                let db = db.max(DB_FLOOR).min(0.0);
                (db - DB_FLOOR) / -DB_FLOOR
            })
            .collect()
    }

    /// Index of the loudest bin (lowest index wins ties).
    pub fn peak_bin(&self) -> Option<usize> {
        if self.magnitudes.is_empty() {
            return None;
        }
        let mut idx = 0;
        for (i, &m) in self.magnitudes.iter().enumerate() {
            if m > self.magnitudes[idx] {
                idx = i;
            }
        }
        Some(idx)
    }

    pub fn peak_frequency(&self) -> Option<f32> {
        self.peak_bin().map(|i| self.frequencies[i])
    }
}

/// Magnitude spectrum of the leading slice of a clip.
///
/// The transform length is the largest power of two that fits in the clip,
/// capped at `max_len` (callers usually pass [`DEFAULT_MAX_FFT`]). The slice
/// is Hann-windowed before the transform, and the first `n / 2` bins are
/// returned. A one-sample clip degenerates to the single DC bin.
pub fn analyze(clip: &AudioClip, max_len: usize) -> Result<MagnitudeSpectrum> {
    if clip.samples.is_empty() {
        return Err(AnalysisError::InputTooShort { needed: 1, got: 0 });
    }
    if clip.sample_rate == 0 {
        return Err(AnalysisError::InvalidParameter(
            "sample rate must be positive".to_string(),
        ));
    }
    if max_len == 0 {
        return Err(AnalysisError::InvalidParameter(
            "max transform length must be positive".to_string(),
        ));
    }

    let n = floor_pow2(clip.samples.len()).min(floor_pow2(max_len));
    let mut frame = clip.samples[..n].to_vec();
    let win = window::hann(n);
    window::apply_hann(&mut frame, &win);
    let spec = fft::transform(&frame)?;

    let half = (n / 2).max(1);
    log::debug!(
        "spectrum: {} samples in, transform length {}, {} bins out",
        clip.samples.len(),
        n,
        half
    );

    let mut magnitudes = Vec::with_capacity(half);
    let mut frequencies = Vec::with_capacity(half);
    for k in 0..half {
        magnitudes.push(spec.magnitude(k));
        frequencies.push(k as f32 * clip.sample_rate as f32 / n as f32);
    }
    Ok(MagnitudeSpectrum {
        magnitudes,
        frequencies,
        fft_len: n,
    })
}

/// Largest power of two `<= x`, for `x > 0`.
fn floor_pow2(x: usize) -> usize {
    debug_assert!(x > 0);
    1usize << (usize::BITS - 1 - x.leading_zeros())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> AudioClip {
        let samples = (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect();
        AudioClip::new(samples, sample_rate)
    }

    #[test]
    fn test_transform_length_is_largest_fitting_pow2() {
        let clip = AudioClip::new(vec![0.0; 44100], 44100);
        let spec = analyze(&clip, DEFAULT_MAX_FFT).unwrap();
        assert_eq!(spec.fft_len, 32768);
        assert_eq!(spec.len(), 16384);
    }

    #[test]
    fn test_cap_limits_transform_length() {
        let clip = AudioClip::new(vec![0.0; 8192], 44100);
        let spec = analyze(&clip, 1024).unwrap();
        assert_eq!(spec.fft_len, 1024);
        assert_eq!(spec.len(), 512);
    }

    #[test]
    fn test_frequency_axis_monotonic() {
        let spec = analyze(&sine(1000.0, 48000, 4096), DEFAULT_MAX_FFT).unwrap();
        assert_eq!(spec.frequencies[0], 0.0);
        let step = 48000.0 / 4096.0;
        assert!((spec.frequencies[1] - step).abs() < 1e-3);
        for w in spec.frequencies.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn test_440hz_peaks_at_expected_bin() {
        let spec = analyze(&sine(440.0, 44100, 4096), DEFAULT_MAX_FFT).unwrap();
        assert_eq!(spec.fft_len, 4096);
        // 440 * 4096 / 44100 = 40.86, nearest bin 41.
        assert_eq!(spec.peak_bin(), Some(41));
        let peak_freq = spec.peak_frequency().unwrap();
        assert!(
            (peak_freq - 440.0).abs() < 44100.0 / 4096.0,
            "peak at {} Hz",
            peak_freq
        );
    }

    #[test]
    fn test_single_sample_is_dc_only() {
        let clip = AudioClip::new(vec![0.5], 44100);
        let spec = analyze(&clip, DEFAULT_MAX_FFT).unwrap();
        assert_eq!(spec.fft_len, 1);
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.frequencies, vec![0.0]);
    }

    #[test]
    fn test_boundary_validation() {
        let empty = AudioClip::new(Vec::new(), 44100);
        assert!(matches!(
            analyze(&empty, DEFAULT_MAX_FFT),
            Err(AnalysisError::InputTooShort { .. })
        ));

        let no_rate = AudioClip::new(vec![0.0; 16], 0);
        assert!(matches!(
            analyze(&no_rate, DEFAULT_MAX_FFT),
            Err(AnalysisError::InvalidParameter(_))
        ));

        let clip = AudioClip::new(vec![0.0; 16], 44100);
        assert!(matches!(
            analyze(&clip, 0),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_db_of_silence_hits_epsilon_floor() {
        let clip = AudioClip::new(vec![0.0; 256], 8000);
        let spec = analyze(&clip, DEFAULT_MAX_FFT).unwrap();
        for db in spec.to_db() {
            assert!((db - 20.0 * DB_EPSILON.log10()).abs() < 1e-3);
        }
        assert!(spec.db_normalized().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_db_normalized_peak_is_one() {
        let spec = analyze(&sine(440.0, 44100, 4096), DEFAULT_MAX_FFT).unwrap();
        let norm = spec.db_normalized();
        let max = norm.iter().cloned().fold(0.0f32, f32::max);
        assert!((max - 1.0).abs() < 1e-6);
        assert!(norm.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_floor_pow2() {
        assert_eq!(floor_pow2(1), 1);
        assert_eq!(floor_pow2(2), 2);
        assert_eq!(floor_pow2(3), 2);
        assert_eq!(floor_pow2(4096), 4096);
        assert_eq!(floor_pow2(44100), 32768);
    }
}
