//! # sonoscope-core
//!
//! Audio analysis primitives for waveform and spectrogram displays: a
//! self-contained radix-2 FFT, single-frame magnitude spectra, STFT
//! spectrogram rasters with perceptual coloring, and waveform reduction
//! for plotting.
//!
//! Everything here is pure computation over caller-owned buffers. Inputs
//! are borrowed immutably, outputs are freshly allocated, and there are no
//! caches or globals, so identical inputs always produce identical outputs
//! and the routines can run concurrently from any thread.
//!
//! ```
//! use sonoscope_core::dsp::spectrum::{self, DEFAULT_MAX_FFT};
//! use sonoscope_core::AudioClip;
//!
//! # fn main() -> sonoscope_core::Result<()> {
//! let samples: Vec<f32> = (0..4096)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let clip = AudioClip::new(samples, 44100);
//! let spectrum = spectrum::analyze(&clip, DEFAULT_MAX_FFT)?;
//! assert_eq!(spectrum.peak_bin(), Some(41));
//! # Ok(())
//! # }
//! ```

pub mod dsp;
pub mod error;
pub mod render;
pub mod types;

pub use dsp::fft::ComplexSpectrum;
pub use dsp::spectrogram::{SpectrogramParams, SpectrogramRaster};
pub use dsp::spectrum::MagnitudeSpectrum;
pub use error::{AnalysisError, Result};
pub use types::AudioClip;
