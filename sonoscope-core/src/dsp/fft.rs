use crate::error::{AnalysisError, Result};

/// Complex frequency-domain output of [`transform`], stored as parallel
/// real/imaginary buffers.
///
/// Bin `k` of an `n`-point transform corresponds to frequency
/// `k * sample_rate / n`; bins above `n / 2` mirror the lower half for
/// real-valued input.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexSpectrum {
    pub re: Vec<f32>,
    pub im: Vec<f32>,
}

impl ComplexSpectrum {
    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn magnitude(&self, k: usize) -> f32 {
        (self.re[k] * self.re[k] + self.im[k] * self.im[k]).sqrt()
    }

    pub fn magnitudes(&self) -> Vec<f32> {
        (0..self.len()).map(|k| self.magnitude(k)).collect()
    }
}

/// Forward DFT of a real-valued signal via iterative radix-2 Cooley-Tukey.
///
/// Input of any nonzero length is accepted: a non-power-of-two signal is
/// zero-padded up to the next power of two, so the output length is always
/// `input.len().next_power_of_two()`. A single-sample input degenerates to a
/// one-bin (DC) spectrum. The transform is unscaled (no 1/N factor), the
/// usual forward convention.
pub fn transform(samples: &[f32]) -> Result<ComplexSpectrum> {
    if samples.is_empty() {
        return Err(AnalysisError::InputTooShort { needed: 1, got: 0 });
    }
    let n = samples.len().next_power_of_two();
    let mut re = vec![0.0f32; n];
    let mut im = vec![0.0f32; n];
    re[..samples.len()].copy_from_slice(samples);
    fft_in_place(&mut re, &mut im);
    Ok(ComplexSpectrum { re, im })
}

/// In-place decimation-in-time FFT over parallel re/im buffers.
///
/// Buffer length must be a power of two (callers pad first). Kept separate
/// from [`transform`] so frame loops can reuse scratch buffers.
pub(crate) fn fft_in_place(re: &mut [f32], im: &mut [f32]) {
    let n = re.len();
    debug_assert_eq!(n, im.len());
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation, j tracking the reversed index incrementally.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    // Butterfly stages. The principal twiddle for each stage is
    // exp(-2*pi*i / len); successive powers come from a complex recurrence
    // accumulated in f64 (drift control), while the data path stays f32.
    let mut len = 2;
    while len <= n {
        let angle = -2.0 * std::f64::consts::PI / len as f64;
        let (wlen_re, wlen_im) = (angle.cos(), angle.sin());

        let mut start = 0;
        while start < n {
            let mut w_re = 1.0f64;
            let mut w_im = 0.0f64;

            for k in 0..len / 2 {
                let a = start + k;
                let b = a + len / 2;

                let wr = w_re as f32;
                let wi = w_im as f32;
                let v_re = re[b] * wr - im[b] * wi;
                let v_im = re[b] * wi + im[b] * wr;

                let u_re = re[a];
                let u_im = im[a];
                re[a] = u_re + v_re;
                im[a] = u_im + v_im;
                re[b] = u_re - v_re;
                im[b] = u_im - v_im;

                let next_re = w_re * wlen_re - w_im * wlen_im;
                let next_im = w_re * wlen_im + w_im * wlen_re;
                w_re = next_re;
                w_im = next_im;
            }

            start += len;
        }

        len <<= 1;
    }
}
