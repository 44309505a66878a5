use std::path::Path;

use anyhow::{bail, Context, Result};
use hound::SampleFormat;
use sonoscope_core::AudioClip;

/// Read one channel of a WAV file as an [`AudioClip`].
///
/// WAV frames are interleaved, so channel `c` of an n-channel file is every
/// n-th sample starting at offset `c`. Integer formats are normalized to
/// [-1.0, 1.0] by 2^(bits - 1).
pub fn read_wav_channel(path: &Path, channel: usize) -> Result<AudioClip> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();
    let n_channels = spec.channels as usize;
    if channel >= n_channels {
        bail!(
            "Channel {} does not exist; file has {} channel(s)",
            channel,
            n_channels
        );
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .context("Failed to decode float samples")?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .context("Failed to decode integer samples")?
        }
    };

    let samples: Vec<f32> = interleaved
        .iter()
        .skip(channel)
        .step_by(n_channels)
        .copied()
        .collect();

    Ok(AudioClip::new(samples, spec.sample_rate))
}
