mod audio;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sonoscope_core::dsp::spectrogram::{self, SpectrogramParams};
use sonoscope_core::dsp::spectrum::{self, DEFAULT_MAX_FFT};
use sonoscope_core::render::waveform;

/// Duration clamp applied to every input before analysis.
const MIN_ANALYSIS_SECS: f64 = 1.0;
const MAX_ANALYSIS_SECS: f64 = 120.0;

const WINDOW_SIZES: [usize; 4] = [512, 1024, 2048, 4096];

#[derive(Parser)]
#[command(
    name = "sonoscope",
    about = "Analyze a WAV file into a magnitude spectrum, waveform envelope, and spectrogram PNG"
)]
struct Cli {
    /// Input WAV file
    input: PathBuf,

    /// Channel to analyze (0-based)
    #[arg(short, long, default_value_t = 0)]
    channel: usize,

    /// Spectrogram window size in samples
    #[arg(short = 'w', long, default_value_t = 2048, value_parser = parse_window_size)]
    window_size: usize,

    /// Hop between frame starts in samples (default: window_size / 4)
    #[arg(long)]
    hop_size: Option<usize>,

    /// Maximum spectrogram width in columns
    #[arg(long, default_value_t = 1024)]
    width: usize,

    /// Analyze at most this many seconds (clamped to 1-120)
    #[arg(long, default_value_t = 30.0)]
    max_secs: f64,

    /// Spectrogram PNG path
    #[arg(short, long, default_value = "spectrogram.png")]
    output: PathBuf,

    /// Also write the magnitude spectrum as JSON
    #[arg(long)]
    spectrum_json: Option<PathBuf>,

    /// Also write the waveform envelope as JSON
    #[arg(long)]
    waveform_json: Option<PathBuf>,
}

fn parse_window_size(s: &str) -> std::result::Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if WINDOW_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("window size must be one of {:?}", WINDOW_SIZES))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // 1. Decode and bound the input
    let clip = audio::read_wav_channel(&cli.input, cli.channel)?;
    eprintln!(
        "Read {}: {:.2}s at {} Hz ({} samples)",
        cli.input.display(),
        clip.duration_secs(),
        clip.sample_rate,
        clip.len()
    );
    let clip = clip.truncated(cli.max_secs.clamp(MIN_ANALYSIS_SECS, MAX_ANALYSIS_SECS));

    // 2. Single-frame spectrum
    let spectrum =
        spectrum::analyze(&clip, DEFAULT_MAX_FFT).context("Spectrum analysis failed")?;
    if let (Some(bin), Some(freq)) = (spectrum.peak_bin(), spectrum.peak_frequency()) {
        eprintln!(
            "Spectrum: {} bins from a {}-point transform, peak {:.1} Hz (bin {})",
            spectrum.len(),
            spectrum.fft_len,
            freq,
            bin
        );
    }
    if let Some(path) = &cli.spectrum_json {
        write_json(path, &spectrum).context("Failed to write spectrum JSON")?;
        eprintln!("Wrote {}", path.display());
    }

    // 3. Waveform envelope at the display width
    if let Some(path) = &cli.waveform_json {
        let env = waveform::envelope(&clip.samples, cli.width);
        write_json(path, &env).context("Failed to write waveform JSON")?;
        eprintln!("Wrote {}", path.display());
    }

    // 4. Spectrogram raster to PNG
    let params = SpectrogramParams {
        window_size: cli.window_size,
        hop_size: cli.hop_size.unwrap_or(cli.window_size / 4),
        out_width: cli.width,
    };
    let raster = spectrogram::build(&clip, &params).context("Spectrogram failed")?;
    if raster.is_empty() {
        eprintln!(
            "Input shorter than one {}-sample window; no spectrogram written",
            params.window_size
        );
        return Ok(());
    }
    let (width, height) = (raster.width, raster.height);
    let image = image::RgbImage::from_raw(width, height, raster.pixels)
        .context("Raster buffer does not match its dimensions")?;
    image
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    eprintln!(
        "Wrote {} ({}x{}, window {}, hop {})",
        cli.output.display(),
        width,
        height,
        params.window_size,
        params.hop_size
    );

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    // Payloads smaller than the buffer only hit the file at flush.
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
