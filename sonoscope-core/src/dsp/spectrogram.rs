//! Spectrogram rasterization.
//!
//! Frames a clip with an overlapping Hann window, transforms each retained
//! frame, and renders log-scaled magnitudes through the colormap into a flat
//! RGB raster with row 0 at the highest frequency. Long inputs are decimated
//! by frame stride so the raster never exceeds the requested display width.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::dsp::{fft, window};
use crate::error::{AnalysisError, Result};
use crate::render::colormap;
use crate::types::AudioClip;

/// Framing and sizing parameters for [`build`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrogramParams {
    /// Samples per analysis frame. A power of two keeps the raster height at
    /// exactly `window_size / 2`; other sizes are zero-padded up to one.
    pub window_size: usize,
    /// Samples between successive frame starts, in `1..=window_size`.
    pub hop_size: usize,
    /// Maximum number of raster columns.
    pub out_width: usize,
}

impl Default for SpectrogramParams {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 512,
            out_width: 1024,
        }
    }
}

impl SpectrogramParams {
    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(AnalysisError::InvalidParameter(
                "window_size must be positive".to_string(),
            ));
        }
        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(AnalysisError::InvalidParameter(format!(
                "hop_size must be in 1..={}, got {}",
                self.window_size, self.hop_size
            )));
        }
        if self.out_width == 0 {
            return Err(AnalysisError::InvalidParameter(
                "out_width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Finished spectrogram image: tightly packed RGB rows, row 0 on top at the
/// highest frequency, one column per retained frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrogramRaster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SpectrogramRaster {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, col: u32, row: u32) -> [u8; 3] {
        let i = ((row * self.width + col) * 3) as usize;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

/// Renders a clip into a spectrogram raster.
///
/// Frames start at `0, hop, 2*hop, ...` while a full window still fits; a
/// clip shorter than one window yields an empty raster. When there are more
/// frames than `out_width`, every `stride`-th frame is kept
/// (`stride = max(1, total / out_width)`) and the column count is capped at
/// `out_width`. Cell values are `log10(1 + mag) / log10(1 + global_max)`
/// with the maximum taken over every retained frame, so coloring is stable
/// across the whole image.
pub fn build(clip: &AudioClip, params: &SpectrogramParams) -> Result<SpectrogramRaster> {
    build_cancellable(clip, params, &AtomicBool::new(false))
}

/// Like [`build`], but reads `cancel` once per retained frame and bails out
/// with [`AnalysisError::Cancelled`] when it is set.
pub fn build_cancellable(
    clip: &AudioClip,
    params: &SpectrogramParams,
    cancel: &AtomicBool,
) -> Result<SpectrogramRaster> {
    params.validate()?;
    if clip.sample_rate == 0 {
        return Err(AnalysisError::InvalidParameter(
            "sample rate must be positive".to_string(),
        ));
    }

    let samples = &clip.samples;
    if samples.len() < params.window_size {
        return Ok(SpectrogramRaster::empty());
    }

    let fft_len = params.window_size.next_power_of_two();
    let half = fft_len / 2;
    let total_frames = (samples.len() - params.window_size) / params.hop_size + 1;
    let stride = (total_frames / params.out_width).max(1);

    let win = window::hann(params.window_size);
    let mut re = vec![0.0f32; fft_len];
    let mut im = vec![0.0f32; fft_len];

    // Pass 1: scan retained frames for the global magnitude maximum.
    let mut global_max = 0.0f32;
    let mut width = 0usize;
    for frame_idx in (0..total_frames).step_by(stride) {
        if width == params.out_width {
            break;
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(AnalysisError::Cancelled);
        }
        let start = frame_idx * params.hop_size;
        load_frame(&mut re, &mut im, &samples[start..start + params.window_size], &win);
        fft::fft_in_place(&mut re, &mut im);
        for k in 0..half {
            let m = (re[k] * re[k] + im[k] * im[k]).sqrt();
            if m > global_max {
                global_max = m;
            }
        }
        width += 1;
    }

    log::debug!(
        "spectrogram: {} frames total, stride {}, {} columns x {} rows, peak magnitude {:.4}",
        total_frames,
        stride,
        width,
        half,
        global_max
    );

    let height = half;
    let denom = (1.0 + global_max).log10();
    let row_span = height.saturating_sub(1) as f32;
    let mut pixels = vec![0u8; width * height * 3];

    // Pass 2: transform the same frames again and write log-scaled colors,
    // flipped so low bins land on the bottom rows.
    let mut col = 0usize;
    for frame_idx in (0..total_frames).step_by(stride) {
        if col == width {
            break;
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(AnalysisError::Cancelled);
        }
        let start = frame_idx * params.hop_size;
        load_frame(&mut re, &mut im, &samples[start..start + params.window_size], &win);
        fft::fft_in_place(&mut re, &mut im);
        for k in 0..half {
            let m = (re[k] * re[k] + im[k] * im[k]).sqrt();
            let v = if denom > 0.0 {
                (1.0 + m).log10() / denom
            } else {
                0.0
            };
            let row = ((1.0 - k as f32 / half as f32) * row_span) as usize;
            let rgb = colormap::value_to_rgb(v);
            let i = (row * width + col) * 3;
            pixels[i..i + 3].copy_from_slice(&rgb);
        }
        col += 1;
    }

    Ok(SpectrogramRaster {
        width: width as u32,
        height: height as u32,
        pixels,
    })
}

/// Copies a Hann-windowed frame into the scratch buffers, zero-padding the
/// tail past the window and clearing the imaginary half.
fn load_frame(re: &mut [f32], im: &mut [f32], frame: &[f32], win: &[f32]) {
    re.fill(0.0);
    im.fill(0.0);
    for (i, (&s, &w)) in frame.iter().zip(win).enumerate() {
        re[i] = s * w;
    }
}
